use clap::Parser;
use std::sync::Arc;
use tracing::info;

use st_cms::{CmsConfig, PostFeed, PrismicClient, SharedFeed};
use st_core::{ContentSource, Result};
use st_web::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Content repository endpoint, e.g. https://spacetraveling.cdn.prismic.io/api/v2
    #[arg(long)]
    api_url: String,
    /// How many posts each page carries
    #[arg(long, default_value_t = 20)]
    page_size: u32,
    #[arg(long, default_value = "posts")]
    content_type: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the blog list page and its JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        listen: String,
    },
    /// Fetch the first page of posts and print it to stdout
    Fetch,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = CmsConfig::new(cli.api_url);
    config.page_size = cli.page_size;
    config.content_type = cli.content_type;

    let source: Arc<dyn ContentSource> = Arc::new(PrismicClient::new(config.clone())?);

    // Initial load runs ahead of serving; a failure here aborts startup.
    info!("📡 Loading initial posts from {}", config.api_url);
    let feed = PostFeed::load(source.as_ref(), &config).await?;
    info!(
        "📚 Loaded {} posts ({})",
        feed.posts().len(),
        if feed.has_more() { "more available" } else { "no more pages" }
    );

    match cli.command {
        Commands::Serve { listen } => {
            let state = AppState {
                source,
                feed: SharedFeed::new(feed),
            };
            let app = st_web::create_app(state).await;
            let listener = tokio::net::TcpListener::bind(&listen).await?;
            info!("🌐 Listening on http://{}", listen);
            axum::serve(listener, app).await?;
        }
        Commands::Fetch => {
            for post in feed.posts() {
                let id = post.id.as_deref().unwrap_or("-");
                println!("{} - {} ({})", id, post.summary.title, post.summary.author);
            }
        }
    }

    Ok(())
}
