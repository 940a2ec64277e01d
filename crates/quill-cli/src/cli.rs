use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quill", about = "Quill: read and inspect blog posts from the API", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./quill.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load posts and report the store state
    Status,
    /// List one page of the blog index
    Posts(PostsArgs),
    /// Show a single post
    Show(ShowArgs),
    /// Enumerate post slugs for static generation
    Entries,
    /// List tags with post counts
    Tags,
    /// List posts carrying a tag
    Tag(TagArgs),
}

#[derive(Args)]
pub struct PostsArgs {
    /// Page number, as it would appear in `?page=`
    #[arg(short, long)]
    pub page: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub slug: String,
}

#[derive(Args)]
pub struct TagArgs {
    /// Tag name, optionally percent-encoded
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status() {
        let cli = Cli::try_parse_from(["quill", "status"]).unwrap();
        assert!(matches!(cli.command, Command::Status));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_posts_page() {
        let cli = Cli::try_parse_from(["quill", "posts", "--page", "3"]).unwrap();
        if let Command::Posts(args) = cli.command {
            assert_eq!(args.page.as_deref(), Some("3"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_posts_without_page() {
        let cli = Cli::try_parse_from(["quill", "posts"]).unwrap();
        if let Command::Posts(args) = cli.command {
            assert!(args.page.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from(["quill", "show", "hello-world"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.slug, "hello-world");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn show_requires_slug() {
        assert!(Cli::try_parse_from(["quill", "show"]).is_err());
    }

    #[test]
    fn parse_tag_encoded() {
        let cli = Cli::try_parse_from(["quill", "tag", "c%23"]).unwrap();
        if let Command::Tag(args) = cli.command {
            assert_eq!(args.slug, "c%23");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags_after_command() {
        let cli = Cli::try_parse_from([
            "quill", "entries", "-v", "--format", "json", "--base-url", "https://blog.example/api",
            "--config", "/etc/quill.toml",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Entries));
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.base_url.as_deref(), Some("https://blog.example/api"));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/quill.toml")));
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(Cli::try_parse_from(["quill", "tags", "--format", "yaml"]).is_err());
    }
}
