//! Command-line entry point (native).

#[cfg(feature = "native")]
mod cli {
    use anyhow::Context;
    use clap::{Parser, Subcommand};
    use shakyo_app::{AppConfig, NotebookApp, load_script, replay, report};
    use shakyo_core::storage::{FileStorage, Storage};
    use shakyo_render::RecordingSurface;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    /// Shakyo - freehand notes on ruled paper
    #[derive(Parser, Debug)]
    #[command(name = "shakyo")]
    #[command(author, version, about, long_about = None)]
    pub struct Cli {
        /// Document directory (defaults to the platform data dir)
        #[arg(long, global = true)]
        store: Option<PathBuf>,

        /// Config file (defaults to ./shakyo.config.json if present)
        #[arg(long, global = true)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// List stored documents
        List,

        /// Show a document and its strokes
        Show {
            /// Document id
            id: String,
        },

        /// Replay a recorded input script and save the result
        Replay {
            /// JSON script file
            script: PathBuf,

            /// Edit an existing document instead of creating one
            #[arg(long)]
            edit: Option<String>,

            /// Group for a new document
            #[arg(long)]
            group: Option<String>,
        },
    }

    fn open_store(cli: &Cli, config: &AppConfig) -> anyhow::Result<FileStorage> {
        let storage = match cli.store.as_ref().or(config.storage_dir.as_ref()) {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        log::debug!("Using document store {}", storage.base_path().display());
        Ok(storage)
    }

    fn list(storage: &FileStorage) -> anyhow::Result<()> {
        let mut ids = storage.list()?;
        ids.sort();
        if ids.is_empty() {
            println!("No documents in {}", storage.base_path().display());
        }
        for id in ids {
            match storage.load(&id) {
                Ok(document) => println!("{}", report::summary_line(&document)),
                Err(e) => {
                    log::warn!("Skipping {}: {}", id, e);
                    println!("{}\t<unreadable>", id);
                }
            }
        }
        Ok(())
    }

    fn show(storage: &FileStorage, id: &str) -> anyhow::Result<()> {
        let document = storage
            .load(id)
            .with_context(|| format!("Cannot show document {}", id))?;
        print!("{}", report::details(&document));
        Ok(())
    }

    fn replay_script(
        storage: FileStorage,
        config: &AppConfig,
        script: &Path,
        edit: Option<&str>,
        group: Option<&str>,
    ) -> anyhow::Result<()> {
        let steps = load_script(script)?;
        let mut app: NotebookApp<FileStorage, RecordingSurface> =
            NotebookApp::open(config, Arc::new(storage), edit, group);
        app.attach_surface(RecordingSurface::new());

        let summary = replay(&mut app, &steps)?;
        let saved = app.close()?;

        println!(
            "Replayed {} steps: {} strokes, {} full repaints, {} segments",
            summary.steps, summary.strokes, summary.full_repaints, summary.segments
        );
        match saved {
            Some(id) => println!("Saved \"{}\" as {}", app.title(), id),
            None => println!("Nothing drawn, not saved"),
        }
        Ok(())
    }

    pub fn run(cli: Cli) -> anyhow::Result<()> {
        let config = match &cli.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::load(&std::env::current_dir()?)?,
        };
        let storage = open_store(&cli, &config)?;

        match &cli.command {
            Command::List => list(&storage),
            Command::Show { id } => show(&storage, id),
            Command::Replay { script, edit, group } => {
                replay_script(storage, &config, script, edit.as_deref(), group.as_deref())
            }
        }
    }
}

#[cfg(feature = "native")]
fn main() {
    use clap::Parser;

    env_logger::init();

    let cli = cli::Cli::parse();
    if let Err(err) = cli::run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    eprintln!("Native feature not enabled. Use `cargo run --features native`");
    std::process::exit(1);
}
