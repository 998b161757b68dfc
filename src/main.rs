use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod core;
mod polling;
mod service;
mod setup;
mod ui;

use crate::core::settings::Settings;

#[derive(Parser)]
#[command(name = "mailpoll")]
#[command(author, version, about = "Configure and toggle remote mailbox polling for OCR processing")]
struct Cli {
    /// Polling service base URL (overrides server.base_url)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Hide informational messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Write logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known provider presets
    Presets {
        /// Show only the preset matching this address
        #[arg(long)]
        email: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Test IMAP/SMTP credentials against the service
    Test {
        #[command(flatten)]
        connection: cli::connect::ConnectionArgs,

        /// Start polling right after a successful test and stay attached
        #[arg(long)]
        start: bool,
    },

    /// Start polling and watch it until Ctrl-C or a server-side stop
    Start {
        #[arg(long)]
        email: Option<String>,

        /// Return once polling has started instead of watching it
        #[arg(long)]
        detach: bool,
    },

    /// Stop polling on the server
    Stop {
        #[arg(long)]
        email: Option<String>,
    },

    /// Show polling status
    Status {
        #[arg(long)]
        email: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the address OCR results are sent to
    Notify {
        #[arg(long)]
        email: Option<String>,

        /// Notification address
        #[arg(long)]
        to: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(debug: bool, json: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            return Ok(());
        }
        Commands::Presets { email, json } => return cli::presets::run(json, email),
        command => command,
    };

    let mut settings = Settings::load()?;
    if let Some(server) = cli.server {
        settings.server.base_url = server;
    }
    settings.validate()?;
    init_logging(settings.debug, cli.json_logs);
    tracing::debug!(
        path = ?Settings::config_path(),
        server = %settings.server.base_url,
        "Loaded config"
    );

    let ctx = cli::Context::new(settings, cli.quiet)?;

    match command {
        Commands::Test { connection, start } => cli::connect::run(&ctx, connection, start).await,
        Commands::Start { email, detach } => cli::start::run(&ctx, email, detach).await,
        Commands::Stop { email } => cli::stop::run(&ctx, email).await,
        Commands::Status { email, json } => cli::status::run(&ctx, email, json).await,
        Commands::Notify { email, to } => cli::notify::run(&ctx, email, to).await,
        Commands::Presets { .. } | Commands::Completions { .. } => Ok(()),
    }
}
