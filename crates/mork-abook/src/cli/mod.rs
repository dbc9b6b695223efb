//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `list`: List contacts and their numbers (default)
//! - `show`: Show full details of matching contacts
//! - `search`: Find contacts by phone number
//! - `books`: Show which address book is used and what it holds
//! - `dump`: Print the decoded Mork rows without projection
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--book`: Read this address book instead of discovering one
//! - `--profile-dir`: Read `abook.mab` from this Thunderbird profile
//!
//! # Example
//!
//! ```bash
//! mork-abook list --limit 20
//! mork-abook show "jane"
//! mork-abook --json search 5551234
//! mork-abook --book ~/backup/abook.mab dump
//! ```

mod args;
mod execute;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

pub use args::{ListArgs, SearchArgs, ShowArgs};

/// mork-abook - read Thunderbird address books
///
/// Decodes the Mork database Thunderbird keeps its personal address book in
/// and prints the contacts it holds.
#[derive(Parser, Debug)]
#[command(name = "mork-abook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Address book to read
    #[arg(long, global = true, env = "MORK_ABOOK_BOOK", value_name = "PATH")]
    pub book: Option<PathBuf>,

    /// Thunderbird profile directory holding `abook.mab`, ignored with `--book`
    #[arg(long, global = true, value_name = "DIR")]
    pub profile_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

async fn load(config: crate::config::Config) -> Result<crate::app::App> {
    let book = config.book.clone();
    crate::app::App::load(config)
        .await
        .with_context(|| format!("Failed to read {}", book.display()))
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List contacts sorted by name
    ///
    /// Prints each contact with its phone numbers. This is the default
    /// command.
    List(ListArgs),

    /// Show detailed information about contacts
    ///
    /// Displays numbers, addresses, company, and photo path of every contact
    /// whose name contains the given text.
    Show(ShowArgs),

    /// Find contacts by phone number
    ///
    /// Only digits are compared, so formatting in the query or in the book
    /// does not matter.
    Search(SearchArgs),

    /// Show the address book in use
    ///
    /// Prints the resolved path with contact, row, and skipped cell counts.
    Books,

    /// Print the decoded rows
    ///
    /// Shows every row with its cells resolved to column names and values,
    /// without building contacts. Fails on a malformed book.
    Dump,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Fails when no address book can be located or read, when `show` or
    /// `search` find nothing, or when `dump` meets a malformed book.
    pub async fn execute(&self) -> Result<()> {
        use crate::config::Config;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let config = Config::resolve(self.book.clone(), self.profile_dir.clone())
            .await
            .context("Failed to locate address book")?;

        match &self.command {
            Some(Commands::List(args)) => {
                execute::execute_list(&load(config).await?, args, output_mode)
            }
            None => execute::execute_list(&load(config).await?, &ListArgs::default(), output_mode),
            Some(Commands::Show(args)) => {
                execute::execute_show(&load(config).await?, args, output_mode)
            }
            Some(Commands::Search(args)) => {
                execute::execute_search(&load(config).await?, args, output_mode)
            }
            Some(Commands::Dump) => execute::execute_dump(&load(config).await?, output_mode),
            Some(Commands::Books) => execute::execute_books(config, output_mode).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn no_subcommand_defaults_to_list() {
        let cli = Cli::try_parse_from(["mork-abook"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn list_with_limit() {
        let cli = Cli::try_parse_from(["mork-abook", "list", "--limit", "3"]).unwrap();
        match cli.command {
            Some(Commands::List(args)) => assert_eq!(args.limit, Some(3)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["mork-abook", "show", "jane", "--json", "--book", "/tmp/a.mab"])
                .unwrap();
        assert!(cli.json);
        assert_eq!(cli.book, Some(PathBuf::from("/tmp/a.mab")));
        match cli.command {
            Some(Commands::Show(args)) => assert_eq!(args.name, "jane"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn profile_dir_is_global() {
        let cli = Cli::try_parse_from(["mork-abook", "dump", "--profile-dir", "/tmp/p"]).unwrap();
        assert_eq!(cli.profile_dir, Some(PathBuf::from("/tmp/p")));
    }

    #[rstest]
    #[case::show(&["mork-abook", "show"])]
    #[case::search(&["mork-abook", "search"])]
    #[case::search_without_digits(&["mork-abook", "search", "abc"])]
    #[case::zero_limit(&["mork-abook", "list", "--limit", "0"])]
    #[case::unknown(&["mork-abook", "frobnicate"])]
    fn rejects_invalid_arguments(#[case] argv: &[&str]) {
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn books_and_dump_parse() {
        let cli = Cli::try_parse_from(["mork-abook", "books"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Books)));
        let cli = Cli::try_parse_from(["mork-abook", "dump"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Dump)));
    }
}
