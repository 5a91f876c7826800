//! Command-line interface for the styletype pipeline.
//!
//! `styletype generate` processes files once in force mode, surfacing skip
//! reasons and completion messages. `styletype watch` regenerates on save
//! and stays quiet unless something goes wrong.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use styletype::prelude::*;

#[derive(Parser)]
#[command(
    name = "styletype",
    version,
    about = "Generates typed declarations for CSS, Less and SCSS style sheets"
)]
struct Cli {
    /// Workspace root; relative settings paths resolve against it.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Settings file (defaults to styletype.toml under the root).
    #[arg(long)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate declarations for the given style sheets.
    Generate {
        /// Style-sheet files to process.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Watch a directory tree and regenerate on save.
    Watch {
        /// Directory to watch (defaults to the workspace root).
        dir: Option<PathBuf>,
    },
    /// Write a default styletype.toml.
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(|| cli.root.join("styletype.toml"));

    match &cli.command {
        Command::Init => init(&settings_path),
        Command::Generate { paths } => {
            let pipeline = build_pipeline(&cli, &settings_path)?;
            for path in paths {
                pipeline.process_file(path, true).await;
            }
            Ok(())
        }
        Command::Watch { dir } => {
            let pipeline = build_pipeline(&cli, &settings_path)?;
            let dir = dir.clone().unwrap_or_else(|| cli.root.clone());
            watch_loop(pipeline, &dir).await
        }
    }
}

fn build_pipeline(cli: &Cli, settings_path: &Path) -> anyhow::Result<Arc<Pipeline>> {
    let settings = Settings::load(settings_path)?;
    Ok(Arc::new(Pipeline::new(
        settings,
        cli.root.clone(),
        Arc::new(ConsoleReporter),
    )))
}

fn init(settings_path: &Path) -> anyhow::Result<()> {
    if settings_path.exists() {
        anyhow::bail!("{} already exists", settings_path.display());
    }
    Settings::default().save(settings_path)?;
    println!("Wrote {}", settings_path.display());
    Ok(())
}

async fn watch_loop(pipeline: Arc<Pipeline>, dir: &Path) -> anyhow::Result<()> {
    let mut watcher = SaveWatcher::new()?;
    watcher.watch(dir)?;
    tracing::info!(
        "styletype v{} watching {}",
        env!("CARGO_PKG_VERSION"),
        dir.display()
    );

    loop {
        for path in watcher.poll() {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move {
                pipeline.process_file(&path, false).await;
            });
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
