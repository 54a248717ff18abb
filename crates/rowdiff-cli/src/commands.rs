use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use rowdiff_sdk::{
    collect_candidates, diff_files, patch_streams, rank_candidates, ApplyMode, CompareOptions,
    RankReport,
};

use crate::cli::*;
use crate::config::{separator_byte, DiffConfig, Style};

pub const EXIT_SAME: u8 = 0;
pub const EXIT_DIFFERENT: u8 = 1;
pub const EXIT_ERROR: u8 = 2;

/// Result of a command that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Inputs identical, or the command simply succeeded.
    Same,
    /// `diff` found differences.
    Different,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Outcome::Same => EXIT_SAME,
            Outcome::Different => EXIT_DIFFERENT,
        }
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<Outcome> {
    let config = DiffConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &config),
        Command::Patch(args) => cmd_patch(args, &config),
        Command::Rank(args) => cmd_rank(args, &config),
    }
}

fn compare_options(
    index: Columns,
    ignore: Vec<String>,
    sep: Option<char>,
    config: &DiffConfig,
) -> anyhow::Result<CompareOptions> {
    let ignore = if ignore.is_empty() { config.ignore_columns.clone() } else { ignore };
    Ok(CompareOptions::new(index.0)
        .with_ignore(ignore)
        .with_separator(separator_byte(sep.unwrap_or(config.separator))?))
}

fn cmd_diff(args: DiffArgs, config: &DiffConfig) -> anyhow::Result<Outcome> {
    let style = args.style.unwrap_or(config.style);
    let options = compare_options(args.index_columns, args.ignore_columns, args.sep, config)?
        .with_significance(args.significance.or(config.significance));

    let result = diff_files(&args.from, &args.to, &options)?;
    let mut out = open_output(args.output.as_deref(), args.quiet)?;
    match style {
        Style::Summary => write!(out, "{}", result.summary())?,
        Style::Compact => {
            rowdiff_diff::save(result.diff(), &mut out, true)?;
            writeln!(out)?;
        }
        Style::Pretty => rowdiff_diff::save(result.diff(), &mut out, false)?,
    }
    out.flush()?;

    Ok(if result.diff().is_empty() {
        Outcome::Same
    } else {
        Outcome::Different
    })
}

fn cmd_patch(args: PatchArgs, config: &DiffConfig) -> anyhow::Result<Outcome> {
    let separator = separator_byte(args.sep.unwrap_or(config.separator))?;
    let mode = ApplyMode::from_strict(args.strictness().unwrap_or(config.strict));

    let patch: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening patch {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let source = File::open(&args.input_csv)
        .with_context(|| format!("opening {}", args.input_csv.display()))?;

    // The destination is only touched once the patch applied cleanly.
    let mut patched = Vec::new();
    patch_streams(patch, BufReader::new(source), &mut patched, mode, separator)
        .context("applying patch")?;

    let mut out = open_output(args.output.as_deref(), false)?;
    out.write_all(&patched)?;
    out.flush()?;
    Ok(Outcome::Same)
}

fn cmd_rank(args: RankArgs, config: &DiffConfig) -> anyhow::Result<Outcome> {
    rank_to(args, config, &mut io::stdout().lock())
}

fn rank_to(args: RankArgs, config: &DiffConfig, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let options = compare_options(args.index_columns, args.ignore_columns, args.sep, config)?;
    let candidates = collect_candidates(&args.candidates)?;
    let report = rank_candidates(
        &args.reference,
        &candidates,
        &options,
        args.top.unwrap_or(config.top),
    )?;

    if args.json {
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&report_json(&args.reference, &report))?
        )?;
    } else {
        write_report(out, &args.reference, &report)?;
    }
    out.flush()?;
    Ok(Outcome::Same)
}

fn open_output(path: Option<&Path>, quiet: bool) -> anyhow::Result<Box<dyn Write>> {
    if quiet {
        return Ok(Box::new(io::sink()));
    }
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}

fn report_json(reference: &Path, report: &RankReport) -> serde_json::Value {
    serde_json::json!({
        "reference": reference.display().to_string(),
        "ranked": report.ranked.iter().map(|r| serde_json::json!({
            "candidate": r.candidate.display().to_string(),
            "score": r.score,
        })).collect::<Vec<_>>(),
        "unscorable": report.unscorable.iter().map(|(path, reason)| serde_json::json!({
            "candidate": path.display().to_string(),
            "reason": reason,
        })).collect::<Vec<_>>(),
    })
}

fn write_report(out: &mut dyn Write, reference: &Path, report: &RankReport) -> io::Result<()> {
    writeln!(out, "Closest to {}", reference.display().to_string().bold())?;
    if report.ranked.is_empty() {
        writeln!(out, "  no scorable candidates")?;
    }
    for (rank, r) in report.ranked.iter().enumerate() {
        writeln!(
            out,
            "  {:>2}. {}  {}",
            rank + 1,
            format!("{:.4}", r.score).green(),
            r.candidate.display()
        )?;
    }
    for (path, reason) in &report.unscorable {
        writeln!(out, "  {} {} ({})", "unscorable:".dimmed(), path.display(), reason)?;
    }
    Ok(())
}
