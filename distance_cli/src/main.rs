use clap::{Parser, Subcommand};

use distance_calculator::{Coordinate, geometry_distance};
use mimalloc::MiMalloc;
use tracing::info;

use crate::{matrix::MatrixArgs, service_args::ServiceArgs};

mod matrix;
mod parsers;
mod real_distance;
mod service_args;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Straight line distance, no API call
    #[command(visible_alias = "g")]
    Geometry {
        #[arg(value_parser = parsers::parse_coordinate, allow_hyphen_values = true)]
        origin: Coordinate,

        #[arg(value_parser = parsers::parse_coordinate, allow_hyphen_values = true)]
        destination: Coordinate,
    },
    /// Travel distance between two coordinates
    Real {
        #[arg(value_parser = parsers::parse_coordinate, allow_hyphen_values = true)]
        origin: Coordinate,

        #[arg(value_parser = parsers::parse_coordinate, allow_hyphen_values = true)]
        destination: Coordinate,

        #[command(flatten)]
        service: ServiceArgs,
    },
    /// Travel distances between every origin and destination
    #[command(visible_alias = "m")]
    Matrix {
        #[command(flatten)]
        args: MatrixArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Geometry {
            origin,
            destination,
        } => {
            let distance = geometry_distance(&origin, &destination)?;
            info!("Geometry distance from {} to {}", origin, destination);
            println!("{}", distance);
        }
        Commands::Real {
            origin,
            destination,
            service,
        } => real_distance::run(origin, destination, service).await?,
        Commands::Matrix { args } => matrix::run(args).await?,
    }

    Ok(())
}
