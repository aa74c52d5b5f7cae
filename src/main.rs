use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use tracing_subscriber::EnvFilter;

use aaroh::commands::explain::{self, OutputMode};
use aaroh::llm::{API_KEY_ENV, GeminiClient};

#[derive(Parser, Debug)]
#[command(
    name = "aaroh",
    version,
    about = "Simple explanations, analogies and quizzes for complex text.",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Explain a piece of text simply, with an analogy and a short quiz
    Explain {
        /// Text to explain. Read from --file or stdin when omitted.
        #[arg(value_name = "TEXT", conflicts_with = "file")]
        text: Option<String>,
        /// Read the text to explain from a file
        #[arg(long, short, value_name = "PATH", value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long, default_value_t = false, conflicts_with = "quiz")]
        json: bool,
        /// Hide the answers and quiz yourself interactively
        #[arg(long, default_value_t = false)]
        quiz: bool,
    },
    /// Verify GEMINI_API_KEY by calling the Gemini API
    CheckKey,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Explain {
            text,
            file,
            json,
            quiz,
        } => {
            let mode = match (json, quiz) {
                (true, _) => OutputMode::Json,
                (false, true) => OutputMode::Quiz,
                (false, false) => OutputMode::Pretty,
            };
            explain::run(text, file, mode).await?;
        }
        Command::CheckKey => check_key().await?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn check_key() -> Result<()> {
    let client = GeminiClient::from_env()?;
    client.healthcheck().await?;
    println!("Gemini API key from {} is valid.", API_KEY_ENV);
    Ok(())
}
