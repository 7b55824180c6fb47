use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// keyseek — YouTube keyword research powered by Gemini.
///
/// Describe a content topic and keyseek generates search keywords tuned to
/// your audience, each with a Google Trends link for validation, exportable
/// to CSV.
#[derive(Parser, Debug)]
#[command(name = "keyseek", version, about)]
struct Cli {
    /// Search topic (can also be entered in the TUI).
    #[arg(short, long)]
    topic: Option<String>,

    /// Keyword language, e.g. "Vietnamese" or "English".
    #[arg(short, long)]
    language: Option<String>,

    /// How many keywords to generate (1-50).
    #[arg(short = 'n', long)]
    count: Option<u8>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Log to a file to avoid corrupting the TUI output. If the log file
    // can't be opened, silently discard logs rather than polluting the
    // alternate screen buffer.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("keyseek");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("keyseek.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            // Fallback: discard all logs to avoid TUI corruption.
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }

    // Load config.
    let config = keyseek_core::KeyseekConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        keyseek_core::KeyseekConfig::default()
    });

    tracing::info!("Starting keyseek v{}", env!("CARGO_PKG_VERSION"));

    // The API key must be available before the TUI starts. Failing here
    // gives a readable error instead of one buried in the alternate screen.
    let api_key = match config.resolve_api_key() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let client = keyseek_gemini::GeminiClient::new(
        api_key,
        config.generation.model.clone(),
        config.generation.temperature,
    );

    // Start the TUI.
    let mut app = keyseek_tui::App::new(
        client,
        config.generation.default_keyword_count,
        config.export_dir(),
    );

    // Pre-fill the form from CLI args if provided.
    if let Some(ref topic) = cli.topic {
        app.set_initial_topic(topic.clone());
    }
    if let Some(ref language) = cli.language {
        app.set_initial_language(language);
    }
    if let Some(count) = cli.count {
        app.set_initial_count(count);
    }

    app.run().await?;

    tracing::info!("keyseek exited cleanly");
    Ok(())
}
