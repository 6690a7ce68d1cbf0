use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, WrapErr};
use lumen_core::config::AVAILABLE_MODELS;
use lumen_core::{Config, Mode};
use tracing_subscriber::EnvFilter;

mod ask;
mod overrides;
mod serve;

use overrides::QueryOverrides;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Answers questions from live web search results", long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question
    Ask {
        /// The question to answer
        #[arg(required = true)]
        question: Vec<String>,

        /// Model identifier (see `lumen models`)
        #[arg(long)]
        model: Option<String>,

        /// Answering mode: adapt or think-hard
        #[arg(long)]
        mode: Option<Mode>,

        /// Skip follow-up question generation
        #[arg(long)]
        no_follow_ups: bool,

        /// Tavily API key (defaults to TAVILY_API_KEY)
        #[arg(long)]
        search_api_key: Option<String>,

        /// Groq API key (defaults to GROQ_API_KEY)
        #[arg(long)]
        llm_api_key: Option<String>,
    },
    /// Start the browser UI
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3333)]
        port: u16,

        /// Don't open the browser automatically
        #[arg(long)]
        no_open: bool,
    },
    /// List available models and modes
    Models,
    /// Print the default configuration file
    Config,
}

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Keep terminal answers clean; the server logs requests.
    let default_level = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    init_tracing(default_level);

    let config = match &cli.config {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
    .wrap_err("failed to load configuration")?;

    match cli.command {
        Commands::Ask {
            question,
            model,
            mode,
            no_follow_ups,
            search_api_key,
            llm_api_key,
        } => {
            let overrides = QueryOverrides {
                model,
                mode,
                search_api_key,
                llm_api_key,
            };
            let follow_ups = config.pipeline.follow_ups && !no_follow_ups;
            ask::run(&config, &question.join(" "), overrides, follow_ups).await
        }
        Commands::Serve { port, no_open } => {
            let serve_config = serve::ServeConfig {
                port,
                open_browser: !no_open,
                settings: config,
            };
            serve::start_server(serve_config)
                .await
                .wrap_err("server failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Models => {
            println!("Models:");
            for (i, model) in AVAILABLE_MODELS.iter().enumerate() {
                let marker = if i == 0 { " (default)" } else { "" };
                println!("  {model}{marker}");
            }
            println!("Modes:");
            for mode in Mode::ALL {
                println!("  {:<12}{}", mode.as_str(), mode.display_name());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config => {
            print!("{}", Config::default_config_string());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
