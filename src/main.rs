//! CLI entry point for penna

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "penna")]
#[command(author = "Mara Ostrenko")]
#[command(version)]
#[command(about = "A minimal static blog generator", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post or page
    New {
        /// Title of the new post
        title: String,

        /// Create a page instead of a post
        #[arg(long)]
        page: bool,
    },

    /// Generate the static site
    #[command(alias = "g")]
    Generate,

    /// Convert and mirror images into the target directory
    Images,

    /// Build the site and serve it locally
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List site content
    List {
        /// Type of content to list (post, page, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Remove the generated public directory
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "penna=debug,info"
    } else {
        "penna=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            penna::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New { title, page } => {
            let site = penna::Penna::new(&base_dir)?;
            site.new_content(&title, page)?;
        }

        Commands::Generate => {
            let site = penna::Penna::new(&base_dir)?;
            tracing::info!("Generating static site...");
            site.generate()?;
            println!("Generated successfully!");
        }

        Commands::Images => {
            let site = penna::Penna::new(&base_dir)?;
            site.process_images()?;
        }

        Commands::Serve { port, ip } => {
            let site = penna::Penna::new(&base_dir)?;
            tracing::info!("Generating static site...");
            site.generate()?;
            penna::server::start(&site, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let site = penna::Penna::new(&base_dir)?;
            penna::commands::list::run(&site, &r#type)?;
        }

        Commands::Clean => {
            let site = penna::Penna::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
