use clap::{Parser, Subcommand};
use colored::Colorize;
use rk_core::config::settings::load_settings;
use rk_core::ConfigLoader;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "garden-config", version, about = "Load and inspect garden.yml resources")]
struct Cli {
    /// Loader settings file (TOML). Defaults are used when omitted.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the project enclosing a directory and print it as JSON
    Find {
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Keep searching upward past directories whose config is invalid
        #[arg(long)]
        allow_invalid: bool,
    },

    /// Load every resource declared in a directory's config file and print them as JSON
    Load {
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Project root used for relative paths in errors. Defaults to the
        /// enclosing project, or the directory itself.
        #[arg(long)]
        project_root: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();

    let loader = match &cli.settings {
        Some(path) => ConfigLoader::new(load_settings(path).await?),
        None => ConfigLoader::default(),
    };

    match cli.command {
        Commands::Find {
            path,
            allow_invalid,
        } => match loader.find_project_config(&path, allow_invalid).await? {
            Some(project) => println!("{}", serde_json::to_string_pretty(&project)?),
            None => {
                eprintln!(
                    "{} no project config found above {}",
                    "warning:".yellow().bold(),
                    path.display()
                );
                std::process::exit(1);
            }
        },
        Commands::Load { path, project_root } => {
            let project_root = match project_root {
                Some(root) => root,
                None => loader
                    .find_project_config(&path, true)
                    .await?
                    .map(|project| project.path)
                    .unwrap_or_else(|| path.clone()),
            };

            let resources = loader.load_config(&project_root, &path).await?;
            tracing::debug!(count = resources.len(), "loaded resources");
            println!("{}", serde_json::to_string_pretty(&resources)?);
        }
    }

    Ok(())
}
