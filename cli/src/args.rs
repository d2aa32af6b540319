//! Command-line argument definitions

use clap::{ArgAction, Parser, ValueEnum};
use gabarito_domain::QuestionKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gabarito",
    version,
    about = "Answer exam questions by multi-provider weighted consensus"
)]
pub struct Cli {
    /// Question text to answer directly
    #[arg(short, long)]
    pub question: Option<String>,

    /// Item number of the question within its sheet
    #[arg(long, default_value = "1")]
    pub item: String,

    /// Question kind
    #[arg(short, long, value_enum, default_value_t = KindArg::Binary)]
    pub kind: KindArg,

    /// Extracted sheet JSON file to answer in full
    #[arg(short, long, conflicts_with = "question")]
    pub file: Option<PathBuf>,

    /// Explicit config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ignore config files and use built-in defaults
    #[arg(long)]
    pub no_config: bool,

    /// Do not persist the report to the responses directory
    #[arg(long)]
    pub no_save: bool,

    /// Suppress decorative output
    #[arg(long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Binary,
    MultipleChoice,
    Discursive,
}

impl From<KindArg> for QuestionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Binary => QuestionKind::Binary,
            KindArg::MultipleChoice => QuestionKind::MultipleChoice,
            KindArg::Discursive => QuestionKind::Discursive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_mode_parsing() {
        let cli = Cli::parse_from([
            "gabarito",
            "--question",
            "O item está correto.",
            "--item",
            "3",
            "--kind",
            "binary",
            "-vv",
        ]);
        assert_eq!(cli.question.as_deref(), Some("O item está correto."));
        assert_eq!(cli.item, "3");
        assert_eq!(cli.kind, KindArg::Binary);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_file_mode_parsing() {
        let cli = Cli::parse_from(["gabarito", "--file", "sheet.json", "--no-save"]);
        assert!(cli.file.is_some());
        assert!(cli.no_save);
        assert!(cli.question.is_none());
    }

    #[test]
    fn test_question_and_file_conflict() {
        let result = Cli::try_parse_from(["gabarito", "--question", "x", "--file", "y.json"]);
        assert!(result.is_err());
    }
}
