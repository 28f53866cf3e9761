use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use log::{info, warn, LevelFilter};

use chomsky::cli::Cli;
use chomsky::cyk::{self, ParseError, ParseErrorType, ParseOutcome};
use chomsky::error_handling::Location;
use chomsky::generator::{self, GenerateError};
use chomsky::grammar::cnf::find_violation;
use chomsky::grammar::{Grammar, Symbol};
use chomsky::bnf;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG still wins over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_outcome(cli: &Cli, outcome: &ParseOutcome) {
    if cli.table {
        println!("Analysis table :");
        print!("{}", outcome.table);
        println!();
    }

    if outcome.accepted {
        println!("The word is generated by the grammar");
        for tree in &outcome.trees {
            if cli.pretty {
                println!("{}", tree.pretty());
            } else {
                println!("{}", tree);
            }
        }
    } else {
        println!("The word is NOT generated by the grammar");
    }
}

// The words from the command line followed by the generated ones, each
// with its tokens
fn collect_words(cli: &Cli, grammar: &Grammar) -> Result<Vec<(String, Vec<String>)>, GenerateError> {
    let mut words = cli.words.iter().map(|word| (word.clone(), cli.tokens(word))).collect_vec();

    let separator = if cli.words_are_tokens { " " } else { "" };
    let mut rng = rand::thread_rng();
    for _ in 0..cli.generate.unwrap_or(0) {
        let tokens = generator::generate(grammar, &mut rng, cli.max_depth)
            .map_err(|error| GenerateError::at(Location::file(&cli.file), error))?;
        words.push((tokens.join(separator), tokens));
    }

    return Ok(words);
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let grammar = match bnf::parse_file(&cli.file) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            return ExitCode::FAILURE;
        }
    };
    let grammar = match &cli.axiom {
        Some(axiom) => grammar.with_axiom(Symbol::new(axiom.as_str())),
        None => grammar,
    };
    info!("{}", grammar);
    if !grammar.is_non_terminal(grammar.axiom()) {
        warn!("Axiom `{}` has no rule, every word will be rejected", grammar.axiom());
    }

    if let Some((rule, violation)) = find_violation(&grammar) {
        let error = ParseErrorType::NotCnf(rule.clone(), violation);
        eprintln!("{}", ParseError::at(Location::file(&cli.file), error));
        return ExitCode::FAILURE;
    }

    let words = match collect_words(&cli, &grammar) {
        Ok(words) => words,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    for (word, tokens) in &words {
        println!("--- \"{}\" - {} ---", word, grammar.name());
        match cyk::parse(tokens, &grammar) {
            Ok(outcome) => print_outcome(&cli, &outcome),
            Err(error) => {
                eprintln!("{}", ParseError::at(Location::file(&cli.file), error));
                return ExitCode::FAILURE;
            }
        }
        println!();
    }

    ExitCode::SUCCESS
}
