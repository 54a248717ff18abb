use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};

use crate::config::Style;

/// A comma-separated column list given as one argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Columns(pub Vec<String>);

impl FromStr for Columns {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let columns: Vec<String> = s
            .split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if columns.is_empty() {
            return Err("at least one column is required".into());
        }
        Ok(Self(columns))
    }
}

#[derive(Parser)]
#[command(
    name = "rowdiff",
    about = "Diff and patch delimited datasets keyed by index columns",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with default options
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two files and print the patch that turns one into the other
    Diff(DiffArgs),
    /// Apply a patch to a file
    Patch(PatchArgs),
    /// Rank candidate files by similarity to a reference file
    Rank(RankArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Comma-separated index columns
    pub index_columns: Columns,
    pub from: PathBuf,
    pub to: PathBuf,
    #[arg(long, value_enum)]
    pub style: Option<Style>,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Print nothing; report through the exit code only
    #[arg(short, long)]
    pub quiet: bool,
    /// Field separator [default: ,]
    #[arg(long)]
    pub sep: Option<char>,
    /// Comma-separated columns to leave out of the comparison
    #[arg(short = 'i', long = "ignore-columns", value_delimiter = ',')]
    pub ignore_columns: Vec<String>,
    /// Ignore numeric changes below this many significant figures
    #[arg(long)]
    pub significance: Option<NonZeroU32>,
}

#[derive(Args)]
pub struct PatchArgs {
    pub input_csv: PathBuf,
    /// Read the patch from a file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Write the patched file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Require the source to match the patch exactly (default)
    #[arg(long, overrides_with = "no_strict")]
    pub strict: bool,
    /// Apply best-effort on a changed source
    #[arg(long, overrides_with = "strict")]
    pub no_strict: bool,
    #[arg(long)]
    pub sep: Option<char>,
}

impl PatchArgs {
    /// Strictness from the flags, if either was given.
    pub fn strictness(&self) -> Option<bool> {
        match (self.strict, self.no_strict) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args)]
pub struct RankArgs {
    /// Comma-separated index columns
    pub index_columns: Columns,
    pub reference: PathBuf,
    /// Candidate files or directories of .csv files
    #[arg(required = true)]
    pub candidates: Vec<PathBuf>,
    #[arg(short = 'i', long = "ignore-columns", value_delimiter = ',')]
    pub ignore_columns: Vec<String>,
    #[arg(long)]
    pub sep: Option<char>,
    /// How many candidates to keep [default: 5]
    #[arg(long)]
    pub top: Option<usize>,
    #[arg(long)]
    pub json: bool,
}
