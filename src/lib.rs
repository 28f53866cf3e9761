pub mod bnf;
pub mod cli;
pub mod cyk;
pub mod error_handling;
pub mod generator;
pub mod grammar;
