use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use tag_publish::cli::{run_publish_workflow, WorkflowOptions};
use tag_publish::config::{self, Config};
use tag_publish::github::GitHubClient;
use tag_publish::platform::PlatformClient;
use tag_publish::ui;

#[derive(clap::Parser)]
#[command(
    name = "tag-publish",
    version,
    about = "Publish customization projects at the latest tags of their source repositories"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Validate the customization set without publishing it")]
    validate_only: bool,

    #[arg(long, help = "Append the markdown run summary to this file")]
    summary_file: Option<PathBuf>,

    #[arg(long, help = "Do not read a .env file from the working directory")]
    no_dotenv: bool,
}

fn load(args: &Args) -> Result<Config> {
    if !args.no_dotenv {
        config::load_dotenv(Path::new(".env"))?;
    }

    let mut config = config::load_config(args.config.as_deref())?;
    config.apply_process_env()?;

    if args.validate_only {
        config.platform.validate_only = true;
    }
    if let Some(path) = &args.summary_file {
        config.output.summary_path = Some(path.clone());
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match load(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {:#}", e));
            std::process::exit(1);
        }
    };

    let http = reqwest::Client::builder()
        .build()
        .context("Failed to create HTTP client")?;
    let platform = PlatformClient::new(http.clone(), &config.platform);
    let tags = GitHubClient::from_config(http, &config.tags);

    match run_publish_workflow(&config, &platform, &tags, &WorkflowOptions::default()).await {
        Ok(result) => {
            let verb = if result.validate_only {
                "Validated"
            } else {
                "Published"
            };
            ui::display_success(&format!(
                "{} {} projects ({} updated)",
                verb,
                result.published.len(),
                result.replacements.len()
            ));
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
