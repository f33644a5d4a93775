use anyhow::Result;
use clap::{Parser, Subcommand};
use ledgerpull_core::AccountLayout;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::AggregateOptions;
use config::{Answers, ExtractFlags, ExtractOptions};

#[derive(Parser, Debug)]
#[command(name = "ledgerpull", version, about = "Turn scraped bank rows into hledger-ready CSV")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize rows scraped from one account page (JSON) into a ledger CSV
    Extract {
        /// Account type: chequing or visa
        #[arg(short = 't', long = "account-type", alias = "layout")]
        layout: Option<AccountLayout>,

        /// Account name to put in the ledger, e.g. assets:chequing
        #[arg(short = 'n', long)]
        account_name: Option<String>,

        /// Scraped rows as a JSON array of {"cells": [...], "classes": [...]}
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// The output filename
        #[arg(short = 'f', long = "filename", alias = "output")]
        output: Option<PathBuf>,

        /// The start date the rows were downloaded from (YYYY/MM/DD)
        #[arg(short = 's', long)]
        start: Option<String>,

        /// The scraper already limited rows to --start
        #[arg(long)]
        start_filter_applied: bool,

        /// strftime format of the date cells (default: "%b. %d, %Y")
        #[arg(long)]
        date_format: Option<String>,

        /// TOML file with defaults for the options above
        #[arg(short = 'a', long)]
        answers: Option<PathBuf>,
    },

    /// Convert downloaded bank CSVs (MM/DD/YYYY, description, out, in, balance) into ledger CSVs
    Clean {
        /// Directory of downloads named after their account, e.g. assets-chequing.csv
        #[arg(long, default_value = "imports/csvs")]
        input: PathBuf,

        /// Directory for the cleaned files; existing *.csv files in it are replaced
        #[arg(long, default_value = "imports/cleaned")]
        output: PathBuf,
    },

    /// Merge per-account ledger CSVs into one date-sorted file
    Aggregate {
        /// Directory holding <account>.csv files, e.g. assets-chequing.csv
        #[arg(long, default_value = "imports")]
        dir: PathBuf,

        /// Name of the aggregate file (without .csv)
        #[arg(long, default_value = "all")]
        file: String,

        /// TOML rules for transfer exclusion and description rewrites
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Write "<account> <last date>" lines here
        #[arg(long)]
        last_import: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            layout,
            account_name,
            input,
            output,
            start,
            start_filter_applied,
            date_format,
            answers,
        } => {
            let answers = match answers {
                Some(path) => Answers::load(&path)?,
                None => Answers::default(),
            };
            let flags = ExtractFlags {
                layout,
                account_name,
                input,
                output,
                start,
                date_format,
            };
            let opts = ExtractOptions::resolve(flags, answers)?;
            let count = commands::run_extract(&opts, start_filter_applied)?;
            println!("Wrote {count} transactions to {}", opts.output.display());
        }

        Command::Clean { input, output } => {
            let accounts = commands::run_clean(&input, &output)?;
            println!("Cleaned {} accounts into {}", accounts.len(), output.display());
        }

        Command::Aggregate {
            dir,
            file,
            rules,
            last_import,
        } => {
            let opts = AggregateOptions {
                dir,
                file,
                rules,
                last_import,
            };
            let agg = commands::run_aggregate(&opts)?;
            tracing::info!(
                accounts = agg.accounts.len(),
                zero = agg.zero,
                excluded = agg.excluded,
                rewritten = agg.rewritten,
                "aggregated"
            );
            println!(
                "Wrote {} transactions to {}",
                agg.rows.len(),
                opts.output_path().display()
            );
        }
    }

    Ok(())
}
