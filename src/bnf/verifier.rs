use std::collections::HashSet;

use super::CompileErrorType::{AmbiguousSymbol, UndefinedNonterminal};
use super::{Alternative, CompileError, CompileErrors, FileResult, Item, Location, RuleLine};

fn get_alternative_errors(alternative: &Alternative, location: &Location, defined: &HashSet<&str>) -> CompileErrors {
    // A nonterminal needs a definition somewhere in the file, and a terminal
    // must not share its name with one since symbols are matched by name
    alternative.iter()
        .filter_map(|item| match item {
            Item::Nonterminal(name) if !defined.contains(name.as_str()) => Some(UndefinedNonterminal(name.to_owned())),
            Item::Terminal(name) if defined.contains(name.as_str()) => Some(AmbiguousSymbol(name.to_owned())),
            _ => None
        })
        .map(|error| CompileError {
            location: location.to_owned(),
            error
        })
        .collect()
}

fn get_line_errors(line: &RuleLine, defined: &HashSet<&str>) -> CompileErrors {
    // Check each alternative while flattening into all the errors of the line
    line.alternatives.iter()
        .flat_map(|alternative| get_alternative_errors(alternative, &line.location, defined))
        .collect()
}

pub fn verify_rules(lines: &[RuleLine]) -> FileResult<()> {
    let defined: HashSet<&str> = lines.iter().map(|line| line.symbol.as_str()).collect();

    let errors: CompileErrors = lines.iter()
        .flat_map(|line| get_line_errors(line, &defined))
        .collect();

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}
