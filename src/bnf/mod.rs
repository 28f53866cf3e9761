/*
    This module reads grammars from BNF-like files:

        ; comment
        S = A B | "a"
        A = S B | "b"
        B = "b"

    The first rule line defines the axiom
*/

mod lexer;
mod verifier;

use std::collections::HashSet;
use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;
use log::debug;
use verifier::verify_rules;

#[derive(Debug)]
pub enum CompileErrorType {
    // A line which should contain a rule does not
    MissingEquals,
    // A rule has multiple equals signs
    UnexpectedEquals,
    // The user starts a rule line with something other than a nonterminal
    MissingNonterminal,
    // There is an unclosed quote
    UnmatchedQuote,
    // An undefined token was used
    UndefinedNonterminal(String),
    // Somehow a full rule was parsed as a single alternative
    // This is a problem with chomsky, not the grammar
    UnsplitAlternatives,
    // A quoted terminal has the name of a defined nonterminal
    AmbiguousSymbol(String),
    // The file has no rule at all, so there is no axiom
    NoRules,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::UndefinedNonterminal(a), CompileErrorType::UndefinedNonterminal(b)) => a == b,
            (CompileErrorType::AmbiguousSymbol(a), CompileErrorType::AmbiguousSymbol(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingEquals => write!(f, "Expected `=` after nonterminal"),
            CompileErrorType::UnexpectedEquals => write!(f, "Unexpected `=` encountered"),
            CompileErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            CompileErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            CompileErrorType::UndefinedNonterminal(nonterminal) => write!(f, "Could not find definition for `{}`", nonterminal),
            CompileErrorType::UnsplitAlternatives => write!(f, "Alternatives were not fully split (this is a problem with chomsky, not the grammar)"),
            CompileErrorType::AmbiguousSymbol(name) => write!(f, "Terminal \"{}\" has the name of a nonterminal", name),
            CompileErrorType::NoRules => write!(f, "No rules found"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> CompileError {
    CompileError {
        location: Location::file(file),
        error: CompileErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

// A symbol as written in the file, before terminals and nonterminals
// are merged into one vocabulary
#[derive(PartialEq, Debug, Clone)]
enum Item {
    Terminal(String),
    Nonterminal(String)
}

impl Item {
    fn name(&self) -> &str {
        match self {
            Item::Terminal(s) | Item::Nonterminal(s) => s
        }
    }
}

type Alternative = Vec<Item>;

#[derive(PartialEq, Debug)]
struct RuleLine {
    symbol: String,
    alternatives: Vec<Alternative>,
    location: Location
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    tokens.iter().map(|t| match t {
        Token::Equals => Err(CompileErrorType::UnexpectedEquals),
        Token::Or => Err(CompileErrorType::UnsplitAlternatives),
        Token::Nonterminal(s) => Ok(Item::Nonterminal(s.clone())),
        Token::Terminal(s) => Ok(Item::Terminal(s.clone()))
    }).collect()
}

fn parse_alternatives(tokens: &[Token]) -> Result<Vec<Alternative>> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<RuleLine> {
    // Try to get the token the rule is for. The match returns a result which
    // is then unwrapped with the ? operator
    let symbol = match tokens.first() {
        Some(Token::Nonterminal(s)) => Ok(s.clone()),
        _ => Err(CompileErrorType::MissingNonterminal),
    }?;

    if tokens.get(1) != Some(&Token::Equals) {
        return Err(CompileErrorType::MissingEquals)
    }

    let alternatives = parse_alternatives(&tokens[2..])?;

    return Ok(RuleLine {
        symbol,
        alternatives,
        location
    });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Option<RuleLine>> {
    let lexed_line = lexer::lex_line(line)
        .map_err(|error| CompileError { location: location.clone(), error })?;

    // Lines holding only a comment
    if lexed_line.is_empty() {
        return Ok(None);
    }

    parse_line(&lexed_line, location.clone())
        .map(Some)
        .map_err(|error| CompileError { location, error })
}

fn is_rule_line(line: &String) -> bool {
    !line.trim().is_empty() && !line.trim_start().starts_with(';')
}

// Returns an iterator over the lines of a reader, with the io errors wrapped
// in CompileError and enumerated
fn line_nums<'a>(reader: impl BufRead + 'a, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    reader
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.to_path_buf())))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

fn push_unique(symbols: &mut Vec<Symbol>, seen: &mut HashSet<String>, name: &str) {
    if seen.insert(name.to_string()) {
        symbols.push(Symbol::new(name));
    }
}

// Builds the grammar once the lines are known to be consistent
fn grammar_from_rules(path: &Path, rule_lines: Vec<RuleLine>) -> FileResult<Grammar> {
    verify_rules(&rule_lines)?;

    let name = path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let axiom = match rule_lines.first() {
        Some(line) => Symbol::new(line.symbol.as_str()),
        None => return Err(vec![CompileError {
            location: Location::file(path),
            error: CompileErrorType::NoRules
        }]),
    };

    let mut symbols = Vec::new();
    let mut seen = HashSet::new();
    let mut rules = Vec::new();

    for line in rule_lines {
        push_unique(&mut symbols, &mut seen, &line.symbol);
        for alternative in line.alternatives {
            for item in &alternative {
                push_unique(&mut symbols, &mut seen, item.name());
            }
            let rhs = alternative.iter().map(|item| Symbol::new(item.name())).collect_vec();
            rules.push(Rule::new(Symbol::new(line.symbol.as_str()), rhs));
        }
    }

    debug!("Loaded grammar {} with {} rules over {} symbols", name, rules.len(), symbols.len());
    return Ok(Grammar::new(name, symbols, axiom, rules));
}

/// Reads a grammar from any buffered source; `path` is used for the
/// grammar name and for error locations.
pub fn parse_reader<'a>(reader: impl BufRead + 'a, path: &'a Path) -> FileResult<Grammar> {
    let lines = line_nums(reader, path);

    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: path.to_path_buf(),
            line: num
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition(LineResult::is_ok);
    if !errors.is_empty() {
        return Err(errors.into_iter().filter_map(LineResult::err).collect_vec());
    }
    let rules_unwrapped = rules.into_iter().filter_map(|rule| rule.ok().flatten()).collect_vec();

    return grammar_from_rules(path, rules_unwrapped);
}

pub fn parse_str(text: &str, path: &Path) -> FileResult<Grammar> {
    parse_reader(text.as_bytes(), path)
}

pub fn parse_file(path: &Path) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.to_path_buf())])?;
    parse_reader(std::io::BufReader::new(file), path)
}
