use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Equals,
    Or,
    Nonterminal(String),
    Terminal(String)
}

fn ends_name(c: char) -> bool {
    c.is_whitespace() || c == '=' || c == '|' || c == '\"' || c == ';'
}

pub fn lex_terminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    line.next(); // Consume open quote
    let token_text = line.peeking_take_while(|&c| c != '\"').collect();

    // Check if there is a close quote and consume it if there is
    if line.next() != Some('\"') {
        return Err(CompileErrorType::UnmatchedQuote);
    }

    Ok(Token::Terminal(token_text))
}

// Names run up to the next space or punctuation, which is left in place
pub fn lex_nonterminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    Ok(Token::Nonterminal(line.peeking_take_while(|&c| !ends_name(c)).collect()))
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(c) = line_chars.peek() {
        if *c == '=' {
            line_chars.next();
            tokens.push(Token::Equals);
        } else if *c == '|' {
            line_chars.next();
            tokens.push(Token::Or);
        } else if *c == '\"' {
            tokens.push(lex_terminal(&mut line_chars)?);
        } else if *c == ';' {
            // Comment until the end of the line
            break;
        } else if !c.is_whitespace() {
            tokens.push(lex_nonterminal(&mut line_chars)?);
        } else {
            line_chars.next();
        }
    }

    return Ok(tokens);
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    #[test]
    fn lex_normal_terminal() {
        let lines = vec![
            "\"a\" B C",
            "\"the\"",
            "\"a\"\"b\"\"c\""
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Terminal("a".to_string()), " B C"),
            (Token::Terminal("the".to_string()), ""),
            (Token::Terminal("a".to_string()), "\"b\"\"c\"")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_mismatched_terminal() {
        let lines = vec![
            "\"a",
            "\"a B C"
        ];

        for line in lines {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap_err(), CompileErrorType::UnmatchedQuote);
        }
    }

    #[test]
    fn lex_normal_nonterminal() {
        let lines = vec![
            "Noun Verb",
            "S",
            "A|B",
            "Det=\"the\""
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Nonterminal("Noun".to_string()), " Verb"),
            (Token::Nonterminal("S".to_string()), ""),
            (Token::Nonterminal("A".to_string()), "|B"),
            (Token::Nonterminal("Det".to_string()), "=\"the\"")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_nonterminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "S = A B | \"a\"",
            "A=S B|\"b\" ; left recursive through S",
            "S = |"
        ];
        let answers = vec![
            vec![
                Token::Nonterminal("S".to_string()),
                Token::Equals,
                Token::Nonterminal("A".to_string()),
                Token::Nonterminal("B".to_string()),
                Token::Or,
                Token::Terminal("a".to_string())
            ],
            vec![
                Token::Nonterminal("A".to_string()),
                Token::Equals,
                Token::Nonterminal("S".to_string()),
                Token::Nonterminal("B".to_string()),
                Token::Or,
                Token::Terminal("b".to_string())
            ],
            vec![
                Token::Nonterminal("S".to_string()),
                Token::Equals,
                Token::Or
            ]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line).unwrap(), answer)
        }
    }
}
