use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process;

use energy_doctor::reporter::{cli::CliReporter, json::JsonReporter, score_only, Reporter};

#[derive(Parser)]
#[command(
    name = "energy-doctor",
    version,
    about = "Score home energy-audit surveys and recommend upgrades"
)]
struct Cli {
    /// Audit JSON file, or a directory of audit files (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "cli")]
    format: OutputFormat,

    /// Only output the efficiency score (0-100)
    #[arg(long)]
    score: bool,

    /// Product catalog JSON (overrides the configured catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Exit non-zero when any audit scores below this value (overrides config)
    #[arg(long)]
    fail_below: Option<u32>,

    /// Show verbose output with descriptions and skipped components
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Cli,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let result = match energy_doctor::engine::run(&cli.path, cli.catalog.as_deref()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let fail_below = cli.fail_below.unwrap_or(result.fail_below);
    let mut failed = false;

    for report in &result.reports {
        if cli.score {
            print!("{}", score_only(&report.score));
        } else {
            let reporter: Box<dyn Reporter> = match cli.format {
                OutputFormat::Cli => Box::new(CliReporter),
                OutputFormat::Json => Box::new(JsonReporter),
            };
            print!("{}", reporter.format(report, cli.verbose));
        }
        if report.score.value < fail_below {
            failed = true;
        }
    }

    if result.audits_analyzed == 0 {
        eprintln!("Error: no audits could be analyzed");
        process::exit(1);
    }
    if failed {
        process::exit(1);
    }
}
