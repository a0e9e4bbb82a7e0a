//! CLI entry point for simple-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "simple-blog")]
#[command(version)]
#[command(about = "A small blog reader that pulls post metadata out of template files", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the blog server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List the posts shown on the index page
    List,

    /// Show the metadata of one post
    Show {
        /// Post id
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Create a new post resource
    New {
        /// Post id
        id: i64,

        /// Title of the new post
        title: String,

        /// Author of the new post
        #[arg(short, long)]
        author: Option<String>,

        /// Image file name for the new post
        #[arg(long)]
        image: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "simple_blog=debug,info"
    } else {
        "simple_blog=info"
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

    match cli.command {
        Commands::Server { port, ip } => {
            let blog = simple_blog::Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            simple_blog::server::start(&blog, &ip, port).await?;
        }

        Commands::List => {
            let blog = simple_blog::Blog::new(&base_dir)?;
            simple_blog::commands::list::run(&blog)?;
        }

        Commands::Show { id } => {
            let blog = simple_blog::Blog::new(&base_dir)?;
            simple_blog::commands::show::run(&blog, id)?;
        }

        Commands::New {
            id,
            title,
            author,
            image,
        } => {
            let blog = simple_blog::Blog::new(&base_dir)?;
            tracing::info!("Creating post {} with title: {}", id, title);
            let post = simple_blog::commands::new::NewPost {
                id,
                title: &title,
                author: author.as_deref(),
                image_url: image.as_deref(),
            };
            simple_blog::commands::new::create_post(&blog, &post)?;
        }

        Commands::Version => {
            println!("simple-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
