mod extract;
mod fetch;
mod parser;
mod report;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gform_scraper", about = "Google Forms question/answer extractor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a form page and write the Q&A report
    Run {
        /// Form URL
        url: String,
        /// Report output path
        #[arg(short, long, default_value = report::DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Also save the raw embedded payload as pretty-printed JSON
        #[arg(long)]
        raw: Option<PathBuf>,
    },
    /// Parse an already-saved form page from disk
    Parse {
        /// Path to the saved HTML file
        file: PathBuf,
        /// Report output path
        #[arg(short, long, default_value = report::DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Also save the raw embedded payload as pretty-printed JSON
        #[arg(long)]
        raw: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { url, output, raw } => {
            println!("Fetching form page...");
            let html = fetch::fetch_form(&url).await?;
            process(&html, &output, raw.as_deref())
        }
        Commands::Parse { file, output, raw } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            process(&html, &output, raw.as_deref())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn process(html: &str, output: &Path, raw: Option<&Path>) -> Result<()> {
    let payload = extract::extract(html).context("failed to extract the embedded form payload")?;

    if let Some(path) = raw {
        std::fs::write(path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("failed to write raw payload to {}", path.display()))?;
        println!("Raw payload saved to {}", path.display());
    }

    let (records, counts) = parser::interpret(&payload);
    report::save(&records, output)?;
    println!("Report saved to {} ({} questions)", output.display(), records.len());
    counts.print();
    Ok(())
}
