use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "cyk", version, about = "Decides membership in a grammar in Chomsky Normal Form and prints the derivation trees")]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Words to parse
    pub words: Vec<String>,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub axiom: Option<String>,

    /// Split words on whitespace instead of into single characters
    #[arg(short, long)]
    pub words_are_tokens: bool,

    /// Also parse this many randomly generated words
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub generate: Option<u32>,

    /// Depth after which generated words are closed off as soon as possible
    #[arg(long, value_name = "DEPTH", default_value_t = 6)]
    pub max_depth: usize,

    /// Print the parse table of each word
    #[arg(short, long)]
    pub table: bool,

    /// Print trees indented over several lines
    #[arg(short, long)]
    pub pretty: bool,

    /// More logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    // Splits a word given on the command line into tokens
    pub fn tokens(&self, word: &str) -> Vec<String> {
        if self.words_are_tokens {
            word.split_whitespace().map(String::from).collect()
        } else {
            word.chars().map(String::from).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn arguments() {
        let cli = Cli::parse_from(["cyk", "g1.bnf", "abb", "bb", "-t", "-n", "3", "-vv"]);
        assert_eq!(cli.file, PathBuf::from("g1.bnf"));
        assert_eq!(cli.words, vec!["abb", "bb"]);
        assert!(cli.table);
        assert!(!cli.pretty);
        assert_eq!(cli.generate, Some(3));
        assert_eq!(cli.max_depth, 6);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.axiom, None);
    }

    #[test]
    fn tokenizing() {
        let chars = Cli::parse_from(["cyk", "g.bnf"]);
        assert_eq!(chars.tokens("ab"), vec!["a", "b"]);

        let words = Cli::parse_from(["cyk", "g.bnf", "-w", "-a", "Sentence"]);
        assert_eq!(words.tokens("the  cat sleeps"), vec!["the", "cat", "sleeps"]);
        assert_eq!(words.axiom.as_deref(), Some("Sentence"));
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn command_is_named_cyk() {
        let mut command = Cli::command();
        assert_eq!(command.get_name(), "cyk");
        assert!(command.render_usage().to_string().contains("cyk [OPTIONS] <FILE>"));
    }
}
