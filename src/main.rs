use anyhow::Context;
use cal::pipeline::{self, Sink};
use cal::{Config, HttpConsoleClient};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cal", about = "Console Audit Logs — export developer audit logs as CSV")]
struct Cli {
    /// TOML config file layered over the built-in defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Application id. Overrides BACKENDLESS_APP_ID.
    #[arg(long)]
    app_id: Option<String>,

    /// CSV output path. Overrides `export.output_path`.
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the CSV to stdout instead of writing the output file.
    #[arg(long)]
    stdout: bool,

    /// Normalise a saved console response instead of logging in and fetching.
    #[arg(long, value_name = "PATH")]
    from_file: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still wins when set).
    #[arg(long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    run(cli).await.inspect_err(|err| tracing::error!("{err:#}"))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(app_id) = cli.app_id {
        config.console.app_id = Some(app_id);
    }
    if let Some(output) = cli.output {
        config.export.output_path = output;
    }

    let sink = if cli.stdout {
        Sink::Stdout
    } else {
        Sink::File(config.export.output_path.clone())
    };

    let mut out = std::io::stdout().lock();
    match &cli.from_file {
        Some(path) => pipeline::export(&pipeline::read_raw(path)?, &sink, &mut out)?,
        None => {
            let client = HttpConsoleClient::new(&config.console.host);
            pipeline::run(&client, &config, &sink, &mut out).await?
        }
    };
    Ok(())
}
