use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use promptdeck_storage::{FileStorage, Storage};
use promptdeck_store::{EnvSchemeSource, Library, Theme, DEFAULT_RECENT_LIMIT};

mod api;
mod categories;
mod config;
mod logging;
mod prompts;
mod transfer;

use categories::CategoriesAction;
use config::AppConfig;
use logging::LogFormat;
use prompts::ListOptions;

#[derive(Parser, Debug)]
#[command(
    name = "promptdeck",
    about = "Local library of reusable text prompts",
    version,
    author
)]
struct Cli {
    /// Data directory (default: platform data dir, or promptdeck.toml)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log filter (default: warn; RUST_LOG overrides)
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a prompt
    Add {
        /// Prompt title
        title: String,

        /// Prompt content
        #[arg(short, long)]
        content: String,

        /// Category ID
        #[arg(long, default_value_t = 1)]
        category: u64,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// List prompts
    List {
        /// Search title, content and tags
        #[arg(short, long)]
        query: Option<String>,

        /// Filter by category ID
        #[arg(long)]
        category: Option<u64>,

        /// Only favorited prompts
        #[arg(long)]
        favorites: bool,

        /// Most recently created prompts, newest first (default: 5)
        #[arg(long, value_name = "N", num_args = 0..=1)]
        recent: Option<Option<usize>>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one prompt in full
    Show {
        /// Prompt ID
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit a prompt's fields
    Edit {
        /// Prompt ID
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New content
        #[arg(long)]
        content: Option<String>,

        /// New category ID
        #[arg(long)]
        category: Option<u64>,

        /// Replacement tags (repeatable; omit to keep existing)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Remove a prompt
    Rm {
        /// Prompt ID
        id: u64,
    },

    /// Toggle a prompt's favorite flag
    Fav {
        /// Prompt ID
        id: u64,
    },

    /// Print a prompt's content and count the use
    Use {
        /// Prompt ID
        id: u64,
    },

    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoriesAction,
    },

    /// Show or set the theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Export prompts and categories to a JSON file
    Export {
        /// Destination file
        file: PathBuf,
    },

    /// Merge prompts and categories from a JSON file
    Import {
        /// Source file
        file: PathBuf,
    },

    /// Delete all prompts and categories
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },

    /// Serve the JSON API
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 7700)]
        port: u16,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    /// Show the current theme and resolved dark/light state
    Show,

    /// Set the theme preference (system, light or dark)
    Set {
        theme: Theme,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = AppConfig::load(&working_dir)?.unwrap_or_default();

    let level = cli
        .log_level
        .clone()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| "warn".to_string());
    logging::init_tracing(&level, cli.log_format);

    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(FileStorage::default_dir);
    let storage: Arc<dyn Storage> =
        Arc::new(FileStorage::open_at(&data_dir).context("Failed to open storage")?);
    let mut library = Library::open(storage, Box::new(EnvSchemeSource))
        .context("Failed to open prompt library")?;

    match cli.command {
        Command::Add {
            title,
            content,
            category,
            tags,
        } => prompts::handle_add(&mut library, title, content, category, tags),
        Command::List {
            query,
            category,
            favorites,
            recent,
            json,
        } => prompts::handle_list(
            &library,
            ListOptions {
                query,
                category,
                favorites,
                recent: recent.map(|n| n.unwrap_or(DEFAULT_RECENT_LIMIT)),
                json,
            },
        ),
        Command::Show { id, json } => prompts::handle_show(&library, id, json),
        Command::Edit {
            id,
            title,
            content,
            category,
            tags,
        } => prompts::handle_edit(&mut library, id, title, content, category, tags),
        Command::Rm { id } => prompts::handle_rm(&mut library, id),
        Command::Fav { id } => prompts::handle_fav(&mut library, id),
        Command::Use { id } => prompts::handle_use(&mut library, id),
        Command::Categories { action } => {
            categories::handle_categories_command(&mut library, action)
        }
        Command::Theme { action } => handle_theme_command(&mut library, action),
        Command::Export { file } => {
            transfer::export_to_file(&library, &file)?;
            println!(
                "{} {} prompts and {} categories to {}",
                "Exported".green(),
                library.prompts.all().len(),
                library.categories.all().len(),
                file.display()
            );
            Ok(())
        }
        Command::Import { file } => {
            let report = transfer::import_from_file(&mut library, &file)?;
            println!(
                "{} {} prompts and {} categories",
                "Imported".green(),
                report.prompts_added,
                report.categories_added
            );
            Ok(())
        }
        Command::Clear { yes } => handle_clear(&mut library, yes),
        Command::Serve { port } => api::serve(library, port).await,
    }
}

fn handle_theme_command(library: &mut Library, action: Option<ThemeAction>) -> Result<()> {
    match action {
        None | Some(ThemeAction::Show) => {
            library.settings.system_scheme_changed();
            println!(
                "{} (resolved: {}, dark mode: {})",
                library.settings.theme().to_string().bold(),
                library.settings.display_theme(),
                library.settings.is_dark_mode()
            );
        }
        Some(ThemeAction::Set { theme }) => {
            library.settings.set_theme(theme)?;
            println!(
                "{} theme to {}",
                "Set".green(),
                theme.to_string().bold()
            );
        }
    }
    Ok(())
}

fn handle_clear(library: &mut Library, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("refusing to clear the library without --yes");
    }

    library.prompts.clear_all()?;
    library.categories.clear_all()?;
    println!("{} all prompts and categories", "Cleared".green());
    Ok(())
}
