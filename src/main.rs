//! `builderai` serves the page and the generation proxy.
//!
//! Credentials come from the environment (or a `.env` file in the working
//! directory): `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET` and
//! `GOOGLE_REFRESH_TOKEN` are required, `GOOGLE_PROJECT_ID` and
//! `GOOGLE_LOCATION` are optional. Set `RUST_LOG=debug` for request logs.

use std::net::{IpAddr, SocketAddr};

use builderai::{server, Client, Config};
use clap::Parser;

/// Describe a web page, get code back from Gemini, preview it live.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,
    /// Port to bind.
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    // A missing `.env` is fine; the variables may be set some other way.
    if let Err(e) = dotenvy::dotenv() {
        log::debug!("No .env loaded: {}", e);
    }

    let args = Args::parse();

    // Missing credentials stop us here rather than on the first request.
    let config = Config::from_env()?;
    let client = Client::new(config)?;

    server::serve(client, SocketAddr::new(args.host, args.port)).await?;

    Ok(())
}
