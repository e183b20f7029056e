use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{load_settings, CollectionSnapshot, ListController, ListEvent};
use shared::domain::RepositoryId;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod render;

const DEFAULT_URL: &str = "https://github.com/xggax";
const DEFAULT_TECHS: [&str; 3] = ["ReactJS", "React Native", "NodeJs"];

#[derive(Parser, Debug)]
#[command(about = "List, add, like and remove repositories")]
struct Args {
    /// Overrides `api_base_url` from client.toml / API_BASE_URL.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Add {
        #[arg(long)]
        title: Option<String>,
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
        #[arg(long = "tech")]
        techs: Vec<String>,
    },
    Like {
        id: String,
    },
    Remove {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.api_base_url = server_url;
    }

    let controller = ListController::from_settings(&settings)?;
    let mut events = controller.subscribe_events();

    let loaded = controller.load().await?;
    match args.command {
        Command::List => {}
        Command::Add { title, url, techs } => {
            let title = title.unwrap_or_else(default_title);
            let techs = if techs.is_empty() {
                DEFAULT_TECHS.iter().map(|tech| tech.to_string()).collect()
            } else {
                techs
            };
            controller.add(title, url, techs).await?;
        }
        Command::Like { id } => {
            controller.like(&resolve_id(&loaded, &id)).await?;
        }
        Command::Remove { id } => {
            controller.remove(&resolve_id(&loaded, &id)).await?;
        }
    }

    while let Ok(event) = events.try_recv() {
        match event {
            ListEvent::LikeDiscarded { repository } => eprintln!(
                "note: like for {} was counted by the server but it is no longer listed",
                repository.id
            ),
            ListEvent::Removed { id, removed: 0 } => {
                eprintln!("note: {id} was deleted on the server but was not listed locally")
            }
            other => debug!(?other, "list event"),
        }
    }

    print!("{}", render::render_snapshot(&controller.snapshot()));
    Ok(())
}

/// Picks the listed id whose rendered form equals `arg`, so text ids such as
/// `"42"` keep their wire shape. Unlisted arguments fall back to parsing.
fn resolve_id(snapshot: &CollectionSnapshot, arg: &str) -> RepositoryId {
    snapshot
        .iter()
        .find(|repository| repository.id.to_string() == arg)
        .map(|repository| repository.id.clone())
        .unwrap_or_else(|| RepositoryId::parse(arg))
}

fn default_title() -> String {
    format!("New Project {}", chrono::Utc::now().timestamp_millis())
}
