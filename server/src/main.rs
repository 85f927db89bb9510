use anyhow::Result;
use axum::Router;
use clap::Parser;
use lexis_server::{build_app, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// File listing document paths for search and summarization
    #[arg(long)]
    listing: Option<PathBuf>,
    /// Stopword file
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Abbreviations that do not end a sentence
    #[arg(long)]
    abbreviations: Option<PathBuf>,
    /// Movie plot summaries (`id<TAB>summary` lines)
    #[arg(long)]
    movie_summaries: Option<PathBuf>,
    /// Movie metadata TSV
    #[arg(long)]
    movie_metadata: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = ServerConfig {
        listing: args.listing,
        stopwords: args.stopwords,
        abbreviations: args.abbreviations,
        movie_summaries: args.movie_summaries,
        movie_metadata: args.movie_metadata,
    };
    let app: Router = build_app(&config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
