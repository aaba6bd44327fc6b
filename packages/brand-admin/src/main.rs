//! brand-admin: manage brandsite content from the terminal.

mod cmd;
mod context;

use anyhow::{Context, Result};
use brand_api_client::ApiConfig;
use brand_resources::{Direction, ResourceKind};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::context::AppContext;

#[derive(Parser)]
#[command(name = "brand-admin")]
#[command(about = "Manage brandsite content (projects, slides, metrics, media)")]
struct Cli {
    /// API base URL (overrides BRAND_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (overrides BRAND_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a collection sorted by orderIndex
    List {
        #[arg(value_parser = parse_kind)]
        resource: ResourceKind,
        /// Only items whose `type` matches
        #[arg(long = "type")]
        kind: Option<String>,
        /// Include inactive items
        #[arg(long)]
        all: bool,
    },

    /// Create an item from a JSON object
    Create {
        #[arg(value_parser = parse_kind)]
        resource: ResourceKind,
        #[arg(long)]
        data: String,
    },

    /// Patch an item with a JSON object
    Update {
        #[arg(value_parser = parse_kind)]
        resource: ResourceKind,
        id: String,
        #[arg(long)]
        data: String,
    },

    /// Delete an item (soft or hard, per collection)
    Delete {
        #[arg(value_parser = parse_kind)]
        resource: ResourceKind,
        id: String,
    },

    /// Move an item one step up or down
    Move {
        #[arg(value_parser = parse_kind)]
        resource: ResourceKind,
        id: String,
        direction: Direction,
    },

    /// Upload an image and print its URL
    Upload { file: std::path::PathBuf },

    /// List the social links or videos of a project
    Children {
        #[arg(value_parser = parse_kind)]
        resource: ResourceKind,
        parent_id: String,
    },

    /// Show an item with its children inlined
    Relations {
        #[arg(value_parser = parse_kind)]
        resource: ResourceKind,
        id: String,
    },

    /// Print the embeddable form of a video link
    VideoUrl { url: String },
}

fn parse_kind(s: &str) -> std::result::Result<ResourceKind, String> {
    ResourceKind::from_slug(s).ok_or_else(|| {
        let known: Vec<&str> = ResourceKind::variants().iter().map(|k| k.slug()).collect();
        format!("unknown resource '{}', expected one of: {}", s, known.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,brand_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ApiConfig::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
        config.validate().context("Invalid --api-url")?;
    }
    if let Some(token) = cli.token {
        config.token = Some(token);
    }

    let ctx = AppContext::new(&config, cli.yes);
    tracing::debug!(api_url = %config.api_url, "Admin context ready");

    match cli.command {
        Commands::List {
            resource,
            kind,
            all,
        } => cmd::resources::list(&ctx, resource, kind.as_deref(), all).await,
        Commands::Create { resource, data } => cmd::resources::create(&ctx, resource, &data).await,
        Commands::Update { resource, id, data } => {
            cmd::resources::update(&ctx, resource, &id, &data).await
        }
        Commands::Delete { resource, id } => cmd::resources::delete(&ctx, resource, &id).await,
        Commands::Move {
            resource,
            id,
            direction,
        } => cmd::resources::move_one(&ctx, resource, &id, direction).await,
        Commands::Upload { file } => cmd::media::upload(&ctx, &file).await,
        Commands::Children {
            resource,
            parent_id,
        } => cmd::relations::children(&ctx, resource, &parent_id).await,
        Commands::Relations { resource, id } => cmd::relations::relations(&ctx, resource, &id).await,
        Commands::VideoUrl { url } => cmd::media::video_url(&ctx, &url),
    }
}
