//! CLI entry point for prismo-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "prismo-rs")]
#[command(version = "0.1.0")]
#[command(about = "A static blog generator backed by a Prismic-style headless CMS", long_about = None)]
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

    /// Generate static files from the content backend
    #[command(alias = "g")]
    Generate,

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no on-demand generation for unlisted posts)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, route)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "prismo_rs=debug,info"
    } else {
        "prismo_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            prismo_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized empty Prismo site in {:?}", target_dir);
        }

        Commands::Generate => {
            let prismo = prismo_rs::Prismo::new(&base_dir)?;
            tracing::info!("Generating static files...");
            prismo.generate().await?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip, r#static } => {
            let prismo = prismo_rs::Prismo::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            prismo.generate().await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            prismo_rs::server::start(&prismo, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let prismo = prismo_rs::Prismo::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            prismo.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let prismo = prismo_rs::Prismo::new(&base_dir)?;
            prismo_rs::commands::list::run(&prismo, &r#type).await?;
        }

        Commands::Version => {
            println!("prismo-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
