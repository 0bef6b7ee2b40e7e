use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use rocket::config::Config as RocketCfg;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rota_planner::{config::Config, web};

#[derive(Debug, Parser)]
#[command(name = "rota-server", version, about = "Delivery route sequencing service")]
struct Args {
    /// Path to the TOML configuration file (default: rota.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the configuration)
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut cfg = Config::try_load_from_file_or_default(args.config.as_ref())?;
    if let Some(port) = args.port {
        cfg.server.port = port;
    }

    // HTTP clients are built outside the async runtime: reqwest's blocking
    // client must not be created or dropped inside it.
    let planner = Arc::new(cfg.build_planner()?);
    info!(
        depot = %cfg.depot.label,
        lat = cfg.depot.location.lat,
        lng = cfg.depot.location.lng,
        "starting rota-server on {}:{}",
        cfg.server.address,
        cfg.server.port
    );

    let mut rocket_cfg = RocketCfg::release_default();
    rocket_cfg.address = cfg.server.address;
    rocket_cfg.port = cfg.server.port;

    rocket::execute(web::rocket(Arc::clone(&planner), rocket_cfg).launch())
        .map_err(|err| anyhow::anyhow!("server failed: {err}"))?;
    drop(planner);
    Ok(())
}
