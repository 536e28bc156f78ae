mod classify;
mod emit;
mod parser;
mod pipeline;
mod record;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use parser::SourceFormat;
use pipeline::{TidyConfig, TidyOutcome};

#[derive(Parser)]
#[command(name = "bookmark_tidy", about = "Tidy browser bookmark exports: flatten, dedupe, classify, re-emit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    /// Sniff from extension/basename/content
    Auto,
    /// Chrome bookmark-tree JSON
    Json,
    /// Netscape bookmark HTML
    Html,
}

impl FormatArg {
    fn resolve(self) -> Option<SourceFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Json => Some(SourceFormat::JsonTree),
            FormatArg::Html => Some(SourceFormat::NetscapeHtml),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Dedupe + classify, write a grouped review HTML file
    Tidy {
        /// Bookmark export to read (JSON tree or Netscape HTML)
        #[arg(short, long)]
        input: PathBuf,
        /// Output directory (created if missing)
        #[arg(long, default_value = "out")]
        outdir: PathBuf,
        #[arg(long, value_enum, default_value = "auto")]
        format: FormatArg,
        /// Mark the run as review-only in the closing message
        #[arg(long)]
        simulate: bool,
    },
    /// Dedupe + classify, write the JSON audit index
    Audit {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long, default_value = "out")]
        outdir: PathBuf,
        #[arg(long, value_enum, default_value = "auto")]
        format: FormatArg,
    },
    /// Flatten into a Netscape bookmark file Chrome can import
    Convert {
        #[arg(short, long)]
        input: PathBuf,
        /// Output HTML path
        #[arg(short, long)]
        output: PathBuf,
        /// Name of the single folder holding all imported links
        #[arg(long, default_value = "Imported-from-JSON")]
        folder_name: String,
        /// <TITLE>/<H1> text for the generated file
        #[arg(long, default_value = "Bookmarks")]
        title: String,
        #[arg(long, value_enum, default_value = "auto")]
        format: FormatArg,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tidy { input, outdir, format, simulate } => {
            let config = TidyConfig { outdir: outdir.clone(), ..TidyConfig::default() };
            let outcome = pipeline::run(&input, format.resolve(), &config)?;
            print_counts(&input, &outcome);

            let outpath = config.outdir.join("bookmarks-reorganized.html");
            emit::report::write_report(&outcome.buckets, &outpath)?;
            println!("Wrote reorganized bookmarks to {}", outpath.display());
            if simulate {
                println!("Simulation only: file written for review. Will not modify browser bookmarks.");
            } else {
                println!("Done. Import the file from {} into your browser's bookmark manager to apply.", outdir.display());
            }
            Ok(())
        }
        Commands::Audit { input, outdir, format } => {
            let config = TidyConfig { outdir, ..TidyConfig::default() };
            let outcome = pipeline::run(&input, format.resolve(), &config)?;
            print_counts(&input, &outcome);

            let outpath = config.outdir.join("bookmarks_index.json");
            emit::audit::write_index(&outcome.buckets, &outpath)?;
            println!("Wrote audit JSON to {}", outpath.display());
            Ok(())
        }
        Commands::Convert { input, output, folder_name, title, format } => {
            let config = TidyConfig { folder_name, title, ..TidyConfig::default() };
            let outcome = pipeline::run(&input, format.resolve(), &config)?;
            println!("Loaded {} bookmarks from {}", outcome.loaded, input.display());
            println!("Deduped -> {} unique bookmarks", outcome.records.len());

            emit::netscape::write_import_file(
                &outcome.records,
                &output,
                &config.folder_name,
                &config.title,
            )?;
            println!("Wrote Chrome-importable HTML to {}", output.display());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn print_counts(input: &std::path::Path, outcome: &TidyOutcome) {
    println!("Loaded {} bookmarks from {}", outcome.loaded, input.display());
    println!("Deduped -> {} unique bookmarks", outcome.records.len());
    println!("Bucket counts:");
    for (name, count) in outcome.buckets.counts() {
        println!(" - {}: {}", name, count);
    }
}
