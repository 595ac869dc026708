use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Use the library instead of redeclaring modules
use matchcast::{
    config::{Config, PublishBackend},
    publish::build_publisher,
    services::{CollectorService, RunSummary, ScheduleOutcome, ScheduleService},
    utils::{HttpFetcher, StandardHttpClient},
    web::{AppState, WebServer},
};

#[derive(Parser)]
#[command(name = "matchcast")]
#[command(version)]
#[command(about = "Collects live sports streams and publishes schedule and playlist documents")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: String,

    /// Log level
    #[arg(short = 'v', long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP trigger endpoints (default)
    Serve {
        /// Listening IP address
        #[arg(short = 'H', long, value_name = "IP")]
        host: Option<String>,

        /// Listening port
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        #[command(flatten)]
        publish: PublishArgs,
    },
    /// Run one catalogue collection and publish the documents
    Update {
        #[command(flatten)]
        publish: PublishArgs,
    },
    /// Build the match schedule and publish it
    Schedule {
        #[command(flatten)]
        publish: PublishArgs,
    },
}

#[derive(Args, Default)]
struct PublishArgs {
    /// Publish backend (overrides config file)
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Output directory for the local backend
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum BackendArg {
    Github,
    Local,
}

impl PublishArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(backend) = self.backend {
            config.publish.backend = match backend {
                BackendArg::Github => PublishBackend::Github,
                BackendArg::Local => PublishBackend::Local,
            };
        }
        if let Some(dir) = &self.output_dir {
            config.publish.output_dir = dir.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("matchcast={},tower_http=trace", cli.log_level)
    } else {
        format!("matchcast={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting matchcast v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    let command = cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
        publish: PublishArgs::default(),
    });

    match command {
        Command::Serve {
            host,
            port,
            publish,
        } => {
            if let Some(host) = host {
                config.web.host = host;
            }
            if let Some(port) = port {
                config.web.port = port;
            }
            publish.apply(&mut config);

            let (collector, schedule) = build_services(&config)?;
            let web_server = WebServer::new(&config, AppState::new(collector, schedule))?;
            info!(
                "Starting web server on {}:{}",
                web_server.host(),
                web_server.port()
            );
            web_server.serve().await?;
        }
        Command::Update { publish } => {
            publish.apply(&mut config);
            let (collector, _) = build_services(&config)?;
            match collector.run_update().await? {
                RunSummary::Success {
                    assets_count,
                    reports,
                    ..
                } => {
                    info!(assets_count, "Files updated successfully");
                    if reports.iter().any(|r| !r.success) {
                        bail!("one or more documents failed to publish");
                    }
                }
                RunSummary::NoAssets => {
                    error!("No DAI assets found");
                    bail!("No DAI assets found");
                }
            }
        }
        Command::Schedule { publish } => {
            publish.apply(&mut config);
            let (_, schedule) = build_services(&config)?;
            let run = schedule.run().await?;
            println!("{}", run.outcome.to_document()?);
            if let ScheduleOutcome::Failed(failure) = &run.outcome {
                bail!("schedule feed failed: {}", failure.error);
            }
        }
    }

    Ok(())
}

fn build_services(config: &Config) -> Result<(CollectorService, ScheduleService)> {
    let fetcher: Arc<dyn HttpFetcher> =
        Arc::new(StandardHttpClient::with_timeout(config.http.timeout())?);
    let publisher = build_publisher(&config.publish, config.http.timeout())?;
    info!("Publishing through the {} backend", publisher.name());

    let collector = CollectorService::from_config(config, fetcher.clone(), publisher.clone())?;
    let schedule = ScheduleService::from_config(config, fetcher, publisher)?;
    Ok((collector, schedule))
}
