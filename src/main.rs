use std::path::PathBuf;

use ::tracing::{error, info_span};
use clap::Parser;
use config::ServerConfig;
use service::Service;

mod config;
mod http_objects;
mod middleware;
mod openapi;
mod routes;
mod service;
mod tracing;
use tracing::setup_tracing;

#[cfg(test)]
mod testing;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "config file", help = "Path to config file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Write openapi.json to the working directory and exit")]
    gen_openapi: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if cli.gen_openapi {
        if let Err(err) = openapi::generate_openapi(&PathBuf::from("openapi.json")) {
            eprintln!("Error generating openapi.json: {:?}", err);
            std::process::exit(1);
        }
        return;
    }

    let config = match ServerConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {:?}", err);
            std::process::exit(1);
        }
    };

    setup_tracing(&config);

    let root_span = info_span!(
        "filegate",
        env = config.env,
        "filegate-instance" = config.instance_id()
    );
    let _guard = root_span.enter();

    let service = match Service::new(config).await {
        Ok(service) => service,
        Err(err) => {
            error!("Error creating service: {:?}", err);
            std::process::exit(1);
        }
    };
    if let Err(err) = service.start().await {
        error!("Error starting service: {:?}", err);
        std::process::exit(1);
    }
}
