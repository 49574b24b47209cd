//
// cli.rs
// CTP-DicomEdit
//
// Defines the CLI surface with Clap and dispatches user-selected commands to the conversion modules.
//
// Thales Matheus Mendonça Santos - October 2026

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use crate::convert::{self, FileOutcome};
use crate::models::TranslateSettings;
use crate::output::{default_output_path, OverwritePolicy, StdinConfirm};
use crate::report::DiagnosticReport;
use crate::rules::RuleTable;
use crate::{batch, logging};

/// Command-line interface glue code: defines the available verbs and dispatches to modules.
#[derive(Parser)]
#[command(name = "ctp-dicomedit")]
#[command(about = "Convert CTP DicomAnonymizer scripts into DicomEdit scripts", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one CTP script
    Convert {
        input: PathBuf,
        /// Output path (defaults to the input with a .das extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing output without asking
        #[arg(long, conflicts_with = "no_clobber")]
        force: bool,
        /// Never overwrite an existing output
        #[arg(long)]
        no_clobber: bool,
        /// Write the untranslated-command report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
        /// Leave entries marked en="F" untranslated
        #[arg(long)]
        skip_disabled: bool,
    },
    /// Convert every .xml/.script file under a directory
    Batch {
        #[arg(short, long)]
        directory: PathBuf,
        /// Overwrite existing .das files (otherwise they are skipped)
        #[arg(long)]
        force: bool,
        #[arg(long)]
        skip_disabled: bool,
    },
    /// List the CTP command bodies that can be translated
    Rules,
}

pub fn run() -> anyhow::Result<()> {
    // Parse the raw CLI arguments once and dispatch to a subcommand handler.
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            output,
            force,
            no_clobber,
            report,
            skip_disabled,
        } => {
            let output = output.unwrap_or_else(|| default_output_path(&input));
            let settings = TranslateSettings { skip_disabled };
            let policy = OverwritePolicy::from_flags(force, no_clobber);

            let outcome = convert::convert_file(&input, &output, policy, &mut StdinConfirm, &settings)?;
            match &outcome {
                FileOutcome::Written { output, conversion } => {
                    println!("DicomEdit script saved to {:?}", output);
                    println!(
                        "  Translated: {} | Not translated: {}",
                        conversion.translated,
                        conversion.report.len()
                    );
                }
                FileOutcome::Skipped { output, .. } => {
                    println!("Skipped: {:?} already exists", output);
                }
            }
            if let Some(path) = report {
                write_report(&path, &outcome.conversion().report)?;
                println!("  Report saved to {:?}", path);
            }
        }
        Commands::Batch {
            directory,
            force,
            skip_disabled,
        } => {
            if !directory.is_dir() {
                bail!("{:?} is not a directory", directory);
            }
            let settings = TranslateSettings { skip_disabled };
            let summary = batch::process_directory(&directory, force, &settings)?;
            println!(
                "Converted: {} | Skipped: {} | Failed: {} | Untranslated commands: {}",
                summary.converted,
                summary.skipped,
                summary.failed.len(),
                summary.untranslated
            );
            for path in &summary.failed {
                eprintln!("Failed: {:?}", path);
            }
            if !summary.failed.is_empty() {
                bail!("{} script(s) could not be converted", summary.failed.len());
            }
        }
        Commands::Rules => {
            for table in [RuleTable::element_commands(), RuleTable::global_removes()] {
                println!("{}", table.name().to_uppercase());
                for rule in table.iter() {
                    println!("  {:<32} {}", rule.body, rule.summary);
                }
                println!();
            }
            println!("PARAMETERS");
            println!("  {:<32} {}", "<p t=\"NAME\">value</p>", "NAME := \"value\"");
        }
    }

    Ok(())
}

fn write_report(path: &Path, report: &DiagnosticReport) -> anyhow::Result<()> {
    let json = report.to_json().context("Failed to serialize report")?;
    std::fs::write(path, json).context("Failed to write report to file")?;
    Ok(())
}
