//! Chartroom - terminal client for board and interview rehearsal sessions
//!
//! Main entry point for the Chartroom CLI.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chartroom::cli::{Cli, Commands};
use chartroom::commands;
use chartroom::commands::chat::ChatOptions;
use chartroom::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    match cli.command {
        // Render works offline; it needs no configuration
        Commands::Render { ref file } => {
            tracing::info!("Rendering {}", file.display());
            commands::render::run_render(file).await
        }
        Commands::Chat {
            ref mode,
            ref submode,
            ref persona,
            ref resume,
            ref company,
            ref projects,
            ref experience,
            ref years,
        } => {
            let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
            let config = Config::load(config_path, &cli)?;

            config.validate()?;

            tracing::info!("Starting interactive session against {}", config.server.base_url);
            if let Some(m) = mode {
                tracing::debug!("Using mode override: {}", m);
            }
            if let Some(p) = persona {
                tracing::debug!("Using persona override: {}", p);
            }
            if let Some(r) = resume {
                tracing::debug!("Loading resume from: {}", r.display());
            }

            let options = ChatOptions {
                mode: mode.clone(),
                submode: submode.clone(),
                persona: persona.clone(),
                resume: resume.clone(),
                company: company.clone(),
                projects: projects.clone(),
                experience: experience.clone(),
                years: years.clone(),
            };
            commands::chat::run_chat(config, options).await?;
            Ok(())
        }
    }
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` takes precedence; otherwise the level follows `--verbose`.
/// Logs go to stderr so they never interleave with rendered output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "chartroom=debug"
    } else {
        "chartroom=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
