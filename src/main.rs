use clap::Parser;
use colored::*;
use portfolio_server::actors::{PortfolioActor, PortfolioArgs};
use portfolio_server::chess::{ChessClient, RatingsDataSource};
use portfolio_server::cli::{Cli, Command, OutputFormat};
use portfolio_server::config::{CurationConfig, SiteConfig};
use portfolio_server::content::PortfolioContent;
use portfolio_server::error::PortfolioError;
use portfolio_server::github::{GitHubClient, ProfileDataSource};
use portfolio_server::models::PortfolioSnapshot;
use portfolio_server::server::{start_server, AppState};
use portfolio_server::view::render_page;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Logs go to stderr so `render` can write the page to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let site = cli.site_config()?;
    let curation = CurationConfig::default().with_max_curated(cli.max_curated());
    let content = PortfolioContent::default();

    let profile_source = ProfileDataSource::new(
        GitHubClient::from_config(&site)?,
        curation.manual_pins.clone(),
    );
    let ratings_source = RatingsDataSource::new(ChessClient::from_config(&site)?);

    match cli.command {
        Command::Serve { port } => {
            serve(site, curation, content, profile_source, ratings_source, port).await?
        }
        Command::Render { output, format } => {
            render(site, curation, content, profile_source, ratings_source, output, format).await?
        }
    }

    Ok(())
}

async fn serve(
    site: SiteConfig,
    curation: CurationConfig,
    content: PortfolioContent,
    profile_source: ProfileDataSource,
    ratings_source: RatingsDataSource,
    port: u16,
) -> anyhow::Result<()> {
    println!("{}", "Portfolio Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());
    println!("GitHub:    {}", site.github_user.cyan());
    println!("Chess.com: {}", site.chess_user.cyan());

    let portfolio = PortfolioActor::spawn_with_sources(PortfolioArgs {
        profile_source: Arc::new(profile_source),
        ratings_source: Arc::new(ratings_source),
        github_user: site.github_user.clone(),
        chess_user: site.chess_user.clone(),
        curation: curation.clone(),
        load_on_start: true,
    })
    .await
    .map_err(|e| PortfolioError::ActorError(format!("Failed to start portfolio actor: {}", e)))?;

    println!("✅ Portfolio actor started, loading data...");
    println!("\nPress Ctrl+C to stop the server\n");

    let app_state = AppState {
        portfolio: portfolio.clone(),
        content: Arc::new(content),
        site: Arc::new(site),
        curation: Arc::new(curation),
        start_time: std::time::Instant::now(),
    };

    tokio::select! {
        result = start_server(app_state, port) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\n🛑 Shutting down server...");
        }
    }

    portfolio.stop(None);
    Ok(())
}

async fn render(
    site: SiteConfig,
    curation: CurationConfig,
    content: PortfolioContent,
    profile_source: ProfileDataSource,
    ratings_source: RatingsDataSource,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let (github, ratings) = tokio::join!(
        profile_source.load(&site.github_user),
        ratings_source.load(&site.chess_user)
    );

    let mut snapshot = PortfolioSnapshot::begin(1);
    snapshot.apply_profile(github.map_err(|e| e.to_string()), &curation);
    snapshot.apply_ratings(ratings.map_err(|e| e.to_string()));

    for error in [&snapshot.github.error, &snapshot.ratings.error].into_iter().flatten() {
        warn!("Rendering with error placeholder: {}", error);
    }

    let body = match format {
        OutputFormat::Html => render_page(&snapshot, &content, &site, &curation)?,
        OutputFormat::Json => serde_json::to_string_pretty(&snapshot).map_err(PortfolioError::from)?,
    };

    match output {
        Some(path) => {
            tokio::fs::write(&path, body).await.map_err(PortfolioError::from)?;
            info!("Wrote portfolio to {}", path.display());
        }
        None => println!("{}", body),
    }

    Ok(())
}
