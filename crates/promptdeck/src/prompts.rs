//! CLI handlers for prompt commands.

use anyhow::Result;
use colored::Colorize;

use promptdeck_store::{Library, Prompt, PromptDraft};

/// Filters for the `list` command. `recent` wins over `favorites`, which
/// wins over `category`, which wins over `query`.
#[derive(Debug, Default)]
pub struct ListOptions {
    pub query: Option<String>,
    pub category: Option<u64>,
    pub favorites: bool,
    pub recent: Option<usize>,
    pub json: bool,
}

pub fn handle_add(
    library: &mut Library,
    title: String,
    content: String,
    category: u64,
    tags: Vec<String>,
) -> Result<()> {
    let prompt = library.prompts.add(PromptDraft {
        title,
        content,
        category_id: category,
        tags,
        examples: Vec::new(),
    })?;

    println!(
        "{} prompt {} ({})",
        "Created".green(),
        prompt.id.to_string().bold(),
        prompt.title
    );
    Ok(())
}

pub fn handle_list(library: &Library, opts: ListOptions) -> Result<()> {
    let prompts: Vec<&Prompt> = if let Some(limit) = opts.recent {
        library.prompts.recent(limit)
    } else if opts.favorites {
        library.prompts.favorites()
    } else if let Some(category) = opts.category {
        library.prompts.by_category(category)
    } else {
        library.prompts.search(opts.query.as_deref().unwrap_or(""))
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&prompts)?);
    } else if prompts.is_empty() {
        println!("{}", "No prompts found.".dimmed());
    } else {
        print_prompt_table(library, &prompts);
    }
    Ok(())
}

pub fn handle_show(library: &Library, id: u64, json: bool) -> Result<()> {
    let Some(prompt) = library.prompts.get(id) else {
        println!("{}", format!("Prompt {} not found.", id).dimmed());
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(prompt)?);
    } else {
        print_prompt_detail(library, prompt);
    }
    Ok(())
}

pub fn handle_edit(
    library: &mut Library,
    id: u64,
    title: Option<String>,
    content: Option<String>,
    category: Option<u64>,
    tags: Vec<String>,
) -> Result<()> {
    let Some(existing) = library.prompts.get(id) else {
        println!("{}", format!("Prompt {} not found.", id).dimmed());
        return Ok(());
    };

    let draft = PromptDraft {
        title: title.unwrap_or_else(|| existing.title.clone()),
        content: content.unwrap_or_else(|| existing.content.clone()),
        category_id: category.unwrap_or(existing.category_id),
        tags: if tags.is_empty() {
            existing.tags.clone()
        } else {
            tags
        },
        examples: existing.examples.clone(),
    };

    // Lookup above guarantees the id exists
    if library.prompts.update(id, draft)?.is_some() {
        println!("{} prompt {}", "Updated".green(), id.to_string().bold());
    }
    Ok(())
}

pub fn handle_rm(library: &mut Library, id: u64) -> Result<()> {
    if library.prompts.delete(id)? {
        println!("{} prompt {}", "Deleted".green(), id.to_string().bold());
    } else {
        println!("{}", format!("Prompt {} not found.", id).dimmed());
    }
    Ok(())
}

pub fn handle_fav(library: &mut Library, id: u64) -> Result<()> {
    match library.prompts.toggle_favorite(id)? {
        Some(true) => println!("{} prompt {}", "Favorited".yellow(), id.to_string().bold()),
        Some(false) => println!("Unfavorited prompt {}", id.to_string().bold()),
        None => println!("{}", format!("Prompt {} not found.", id).dimmed()),
    }
    Ok(())
}

/// Increment the usage counter and print the content, suitable for piping.
pub fn handle_use(library: &mut Library, id: u64) -> Result<()> {
    match library.prompts.increment_usage(id)? {
        Some(count) => {
            let content = library
                .prompts
                .get(id)
                .map(|p| p.content.clone())
                .unwrap_or_default();
            println!("{}", content);
            tracing::debug!(id, count, "prompt used");
        }
        None => println!("{}", format!("Prompt {} not found.", id).dimmed()),
    }
    Ok(())
}

fn print_prompt_table(library: &Library, prompts: &[&Prompt]) {
    println!(
        "{:>4}  {:<2} {:<32} {:<18} {:>5}  {}",
        "ID".bold(),
        "",
        "TITLE".bold(),
        "CATEGORY".bold(),
        "USES".bold(),
        "UPDATED".bold()
    );

    for prompt in prompts {
        let star = if prompt.is_favorite { "*" } else { " " };
        let category = library
            .categories
            .get(prompt.category_id)
            .map(|c| c.name.as_str())
            .unwrap_or("-");

        println!(
            "{:>4}  {:<2} {:<32} {:<18} {:>5}  {}",
            prompt.id,
            star.yellow(),
            truncate(&prompt.title, 32),
            category,
            prompt.usage_count,
            prompt.updated_at.format("%Y-%m-%d").to_string().dimmed()
        );
    }
}

fn print_prompt_detail(library: &Library, prompt: &Prompt) {
    let category = library
        .categories
        .get(prompt.category_id)
        .map(|c| c.name.as_str())
        .unwrap_or("-");

    println!("{} {}", "Prompt".bold(), prompt.id.to_string().bold());
    println!("  {:<10} {}", "Title:".dimmed(), prompt.title);
    println!("  {:<10} {}", "Category:".dimmed(), category);
    if !prompt.tags.is_empty() {
        println!("  {:<10} {}", "Tags:".dimmed(), prompt.tags.join(", "));
    }
    println!(
        "  {:<10} {}",
        "Favorite:".dimmed(),
        if prompt.is_favorite { "yes" } else { "no" }
    );
    println!("  {:<10} {}", "Uses:".dimmed(), prompt.usage_count);
    println!(
        "  {:<10} {}",
        "Created:".dimmed(),
        prompt.created_at.format("%Y-%m-%d %H:%M")
    );
    println!();
    println!("{}", prompt.content);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}\u{2026}")
    }
}
