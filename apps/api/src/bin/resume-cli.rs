//! Command-line front end for the resume analyzer API.
//!
//! `resume-cli analyze resume.pdf` uploads a resume and prints the report.
//! `resume-cli match resume.pdf --job "..."` analyzes it, then scores it
//! against a job description.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_api::client::render::{render_analysis, render_match};
use resume_api::client::{AnalyzerClient, ClientError, DEFAULT_API_URL};

#[derive(Parser)]
#[command(name = "resume-cli")]
#[command(about = "Analyze resumes and match them against job descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the analyzer API
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Print raw JSON instead of the formatted report
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a PDF resume and print its analysis
    Analyze {
        /// Path to the resume PDF
        file: PathBuf,

        /// Optional job description to check keywords against
        #[arg(short = 'j', long)]
        job_description: Option<String>,
    },

    /// Analyze a PDF resume, then match it against a job description
    Match {
        /// Path to the resume PDF
        file: PathBuf,

        /// Job description text
        #[arg(short, long, conflicts_with = "job_file")]
        job: Option<String>,

        /// File containing the job description
        #[arg(long)]
        job_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("resume_api={default_level}"))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = AnalyzerClient::new(cli.api_url.clone())?;

    match cli.command {
        Commands::Analyze {
            file,
            job_description,
        } => {
            let response = client
                .analyze_file(&file, job_description.as_deref())
                .await
                .map_err(user_facing)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", render_analysis(&response));
            }
        }
        Commands::Match {
            file,
            job,
            job_file,
        } => {
            let job_description = match (job, job_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => String::new(),
            };
            // Checked before the upload so a blank description costs no requests.
            if job_description.trim().is_empty() {
                return Err(user_facing(ClientError::EmptyJobDescription));
            }

            let analysis = client
                .analyze_file(&file, None)
                .await
                .map_err(user_facing)?;
            let result = client
                .match_job(&analysis.extracted_text, &job_description)
                .await
                .map_err(user_facing)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_match(&result));
            }
        }
    }

    Ok(())
}

/// Client errors are shown to the user in red, with no cause chain.
fn user_facing(err: ClientError) -> anyhow::Error {
    anyhow::anyhow!("{}", style(err.to_string()).red().bold())
}
