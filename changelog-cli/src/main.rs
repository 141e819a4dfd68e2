use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod commands;
mod display;

use commands::{create, delete, edit, list, publish, serve, show, Remote};

#[derive(Parser)]
#[command(name = "changelog")]
#[command(version, about = "Author, publish and read release notes", long_about = None)]
struct Cli {
    /// Changelog API base URL
    #[arg(
        long,
        global = true,
        env = "CHANGELOG_SERVER",
        default_value = "http://localhost:8000"
    )]
    server: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "CHANGELOG_TIMEOUT_SECS", default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the changelog API server
    Serve {
        /// Address to bind (overrides CHANGELOG_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port for the API server (overrides CHANGELOG_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Database path (overrides CHANGELOG_DB)
        #[arg(short, long)]
        db: Option<PathBuf>,
    },

    /// List changelogs, drafts included
    List {
        /// Show only what end users see
        #[arg(long)]
        published: bool,
    },

    /// Show one changelog with its rendered content
    Show { id: Uuid },

    /// Create a draft changelog
    Create {
        #[arg(long)]
        version: String,

        #[arg(long)]
        title: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Git diff to summarize, read from a file or `-` for stdin
        #[arg(long)]
        diff: Option<PathBuf>,
    },

    /// Edit a changelog; omitted fields keep their current values
    Edit {
        id: Uuid,

        #[arg(long)]
        version: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Git diff to summarize, read from a file or `-` for stdin
        #[arg(long)]
        diff: Option<PathBuf>,
    },

    /// Make a changelog visible to end users
    Publish { id: Uuid },

    /// Return a changelog to draft
    Unpublish { id: Uuid },

    /// Delete a changelog
    Delete {
        id: Uuid,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn init_tracing(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Client commands print their own output; only the server logs at info.
    match cli.command {
        Commands::Serve { .. } => init_tracing("changelog=info,tower_http=info"),
        _ => init_tracing("changelog=warn"),
    }

    let remote = Remote::new(cli.server, cli.timeout);

    match cli.command {
        Commands::Serve { host, port, db } => {
            serve::run(host, port, db).await?;
        }
        Commands::List { published } => {
            list::run(&remote, published).await?;
        }
        Commands::Show { id } => {
            show::run(&remote, id).await?;
        }
        Commands::Create {
            version,
            title,
            description,
            diff,
        } => {
            create::run(&remote, version, title, description, diff).await?;
        }
        Commands::Edit {
            id,
            version,
            title,
            description,
            diff,
        } => {
            let changes = edit::Changes {
                version,
                title,
                description,
                diff,
            };
            edit::run(&remote, id, changes).await?;
        }
        Commands::Publish { id } => {
            publish::run(&remote, id, true).await?;
        }
        Commands::Unpublish { id } => {
            publish::run(&remote, id, false).await?;
        }
        Commands::Delete { id, yes } => {
            delete::run(&remote, id, yes).await?;
        }
    }

    Ok(())
}
