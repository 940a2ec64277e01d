use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use quill_sdk::loaders::{self, PostPage, RenderMode};
use quill_sdk::{format_date, BlogContext, ClientConfig, FetchOutcome, Post};

use crate::cli::*;

const DEFAULT_CONFIG_FILE: &str = "quill.toml";

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.config.as_deref(), cli.base_url.as_deref())?;
    let ctx = BlogContext::from_config(&config).context("building API client")?;
    let format = cli.format;

    match cli.command {
        Command::Status => cmd_status(&ctx, format).await,
        Command::Posts(args) => cmd_posts(&ctx, args, format).await,
        Command::Show(args) => cmd_show(&ctx, args, format).await,
        Command::Entries => cmd_entries(&ctx, format).await,
        Command::Tags => cmd_tags(&ctx, format).await,
        Command::Tag(args) => cmd_tag(&ctx, args, format).await,
    }
}

/// Explicit `--config` must exist; the default file is optional.
/// `--base-url` wins over the file.
fn resolve_config(path: Option<&Path>, base_url: Option<&str>) -> anyhow::Result<ClientConfig> {
    let mut config = match path {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            ClientConfig::load(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("loading config from {DEFAULT_CONFIG_FILE}"))?
        }
        None => ClientConfig::default(),
    };
    if let Some(url) = base_url {
        config.api.base_url = url.to_string();
    }
    debug!(base_url = %config.api.base_url, "configuration resolved");
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Loaders never fail; surface a stored fetch error on stderr instead.
fn warn_on_error(ctx: &BlogContext) {
    if let Some(err) = ctx.store().snapshot().error {
        eprintln!("{} {}", "warning:".yellow().bold(), err);
    }
}

fn print_post_line(post: &Post) {
    let tags = if post.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", post.tags.join(", "))
    };
    println!(
        "  {}  {}  {}{}",
        format_date(&post.published_date).dimmed(),
        post.slug.yellow(),
        post.title.bold(),
        tags.cyan()
    );
}

async fn cmd_status(ctx: &BlogContext, format: OutputFormat) -> anyhow::Result<()> {
    let outcome = loaders::load_layout(ctx, RenderMode::Server)
        .await
        .unwrap_or(FetchOutcome::Cached);
    let state = ctx.store().snapshot();

    if format == OutputFormat::Json {
        return print_json(&json!({
            "is_loaded": state.is_loaded,
            "is_loading": state.is_loading,
            "error": state.error,
            "posts": state.posts().len(),
            "pagination": state.data.pagination,
            "phase": format!("{:?}", ctx.coordinator().phase()),
            "network_calls": ctx.coordinator().network_calls(),
        }));
    }

    let marker = if outcome.is_failure() { "✗".red().bold() } else { "✓".green().bold() };
    println!("{} {:?}", marker, outcome);
    println!("  Loaded: {}  Loading: {}", state.is_loaded, state.is_loading);
    println!("  Posts: {}", state.posts().len().to_string().bold());
    println!(
        "  Pagination: page {} of {} ({} total, limit {})",
        state.data.pagination.page,
        state.data.pagination.last_page,
        state.data.pagination.total,
        state.data.pagination.limit
    );
    if let Some(err) = &state.error {
        println!("  Error: {}", err.red());
    }
    Ok(())
}

async fn cmd_posts(ctx: &BlogContext, args: PostsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let page = loaders::load_blog_index(ctx, args.page.as_deref()).await;
    warn_on_error(ctx);
    if format == OutputFormat::Json {
        return print_json(&page);
    }

    println!("Page {} of {}", page.page.to_string().bold(), page.last_page);
    if page.posts.is_empty() {
        println!("No posts.");
    }
    for post in &page.posts {
        print_post_line(post);
    }
    Ok(())
}

async fn cmd_show(ctx: &BlogContext, args: ShowArgs, format: OutputFormat) -> anyhow::Result<()> {
    let PostPage { slug, post } = loaders::load_post(ctx, &args.slug).await;
    warn_on_error(ctx);
    let Some(post) = post else {
        bail!("no post with slug {slug}");
    };
    if format == OutputFormat::Json {
        return print_json(&post);
    }

    println!("{}", post.title.bold());
    println!("  Slug: {}", post.slug.yellow());
    println!("  Published: {}", format_date(&post.published_date));
    if let Some(updated) = &post.updated_date {
        println!("  Updated: {}", format_date(updated));
    }
    if !post.tags.is_empty() {
        println!("  Tags: {}", post.tags.join(", ").cyan());
    }
    if !post.excerpt.is_empty() {
        println!("\n{}", post.excerpt.italic());
    }
    println!("\n{}", post.content);
    Ok(())
}

async fn cmd_entries(ctx: &BlogContext, format: OutputFormat) -> anyhow::Result<()> {
    let entries = loaders::post_entries(ctx).await;
    warn_on_error(ctx);
    if format == OutputFormat::Json {
        return print_json(&entries);
    }
    for entry in &entries {
        println!("{}", entry.slug);
    }
    Ok(())
}

async fn cmd_tags(ctx: &BlogContext, format: OutputFormat) -> anyhow::Result<()> {
    let page = loaders::load_tags(ctx).await;
    warn_on_error(ctx);
    if format == OutputFormat::Json {
        return print_json(&page);
    }
    if page.tags.is_empty() {
        println!("No tags.");
    }
    for tag in &page.tags {
        println!("  {} ({})  {}", tag.name.cyan().bold(), tag.count, tag.slug.dimmed());
    }
    Ok(())
}

async fn cmd_tag(ctx: &BlogContext, args: TagArgs, format: OutputFormat) -> anyhow::Result<()> {
    let page = loaders::load_tag(ctx, &args.slug).await;
    warn_on_error(ctx);
    if format == OutputFormat::Json {
        return print_json(&page);
    }

    println!("Posts tagged {}: {}", page.slug.cyan().bold(), page.posts.len());
    for post in &page.posts {
        print_post_line(post);
    }
    Ok(())
}
