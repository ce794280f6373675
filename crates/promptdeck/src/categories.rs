//! CLI handlers for category commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use promptdeck_store::{CategoryDraft, Library};

#[derive(Subcommand, Debug)]
pub enum CategoriesAction {
    /// List all categories
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a category
    Add {
        /// Category name
        name: String,

        /// Display color (defaults to #3498db)
        #[arg(long)]
        color: Option<String>,
    },

    /// Edit a category's name or color
    Edit {
        /// Category ID
        id: u64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New color
        #[arg(long)]
        color: Option<String>,
    },

    /// Remove a category (prompts keep their reference)
    Rm {
        /// Category ID
        id: u64,
    },
}

pub fn handle_categories_command(library: &mut Library, action: CategoriesAction) -> Result<()> {
    match action {
        CategoriesAction::List { json } => {
            let categories = library.categories.all();
            if json {
                println!("{}", serde_json::to_string_pretty(categories)?);
            } else if categories.is_empty() {
                println!("{}", "No categories.".dimmed());
            } else {
                for category in categories {
                    println!(
                        "{:>4}  {:<24} {}",
                        category.id,
                        category.name,
                        category.color.dimmed()
                    );
                }
            }
        }
        CategoriesAction::Add { name, color } => {
            let category = library.categories.add(CategoryDraft { name, color })?;
            println!(
                "{} category {} ({})",
                "Created".green(),
                category.id.to_string().bold(),
                category.name
            );
        }
        CategoriesAction::Edit { id, name, color } => {
            let Some(existing) = library.categories.get(id) else {
                println!("{}", format!("Category {} not found.", id).dimmed());
                return Ok(());
            };
            let draft = CategoryDraft {
                name: name.unwrap_or_else(|| existing.name.clone()),
                color,
            };
            if library.categories.update(id, draft)?.is_some() {
                println!("{} category {}", "Updated".green(), id.to_string().bold());
            }
        }
        CategoriesAction::Rm { id } => {
            if library.categories.delete(id)? {
                println!("{} category {}", "Deleted".green(), id.to_string().bold());
            } else {
                println!("{}", format!("Category {} not found.", id).dimmed());
            }
        }
    }
    Ok(())
}
