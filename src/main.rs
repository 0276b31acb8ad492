//! CLI entry point for blog-engine

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_engine::commands::list::ListOptions;
use blog_engine::query::SortKey;

#[derive(Parser)]
#[command(name = "blog-engine")]
#[command(version)]
#[command(about = "Load, query and publish MDX blog content for multi-site setups", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Site whose content is loaded (overrides the config file)
    #[arg(short, long, global = true)]
    site: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Date,
    Title,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortKey::Date,
            SortArg::Title => SortKey::Title,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, recent posts, tags or categories
    List {
        /// Type of content to list (post, recent, tag, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only posts carrying any of these tags
        #[arg(short, long)]
        tag: Vec<String>,

        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,

        /// Sort key
        #[arg(long, value_enum, default_value = "date")]
        sort: SortArg,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,

        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show a single post
    Show {
        /// Post slug
        slug: String,

        /// Print the post and its metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the RSS feed and sitemap
    #[command(alias = "g")]
    Generate {
        /// Output directory (defaults to the configured public directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Feed build date (RFC 3339), for reproducible output
        #[arg(long)]
        build_date: Option<String>,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_engine=debug,info"
    } else {
        "blog_engine=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let mut blog = blog_engine::Blog::new(&base_dir)?;
    if let Some(site) = cli.site {
        blog = blog.with_site(site);
    }

    match cli.command {
        Commands::List {
            r#type,
            tag,
            category,
            sort,
            asc,
            page,
        } => {
            let options = ListOptions {
                kind: r#type,
                tags: tag,
                category,
                sort: sort.into(),
                ascending: asc,
                page,
            };
            blog_engine::commands::list::run(&blog, &options).await?;
        }

        Commands::Show { slug, json } => {
            blog_engine::commands::show::run(&blog, &slug, json).await?;
        }

        Commands::Generate { output, build_date } => {
            let build_date = build_date
                .map(|raw| {
                    DateTime::parse_from_rfc3339(&raw)
                        .map(|d| d.with_timezone(&Utc))
                        .with_context(|| format!("Invalid --build-date: {}", raw))
                })
                .transpose()?;

            tracing::info!("Generating feed and sitemap...");
            blog_engine::commands::generate::run(&blog, output.as_deref(), build_date).await?;
            println!("Generated successfully!");
        }

        Commands::Clean => {
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("blog-engine version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
