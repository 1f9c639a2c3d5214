use std::{fs::File, io::BufReader, path::PathBuf, time::Duration};

use clap::Args;
use comfy_table::Table;
use distance_calculator::{Coordinate, DistanceError, DistanceMatrixResult, DistanceResult};
use indicatif::ProgressBar;
use serde::Deserialize;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::{parsers, service_args::ServiceArgs};

#[derive(Args)]
pub struct MatrixArgs {
    /// Origins as "lat,lng;lat,lng"
    #[arg(short, long, value_parser = parsers::parse_coordinate, value_delimiter = ';', allow_hyphen_values = true)]
    origins: Vec<Coordinate>,

    /// Destinations as "lat,lng;lat,lng"
    #[arg(short, long, value_parser = parsers::parse_coordinate, value_delimiter = ';', allow_hyphen_values = true)]
    destinations: Vec<Coordinate>,

    /// JSON file with "origins" and "destinations" arrays
    #[arg(short = 'i', long, conflicts_with_all = ["origins", "destinations"])]
    input: Option<PathBuf>,

    /// Print the matrix as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    service: ServiceArgs,
}

#[derive(Deserialize)]
struct MatrixInput {
    origins: Vec<Coordinate>,
    destinations: Vec<Coordinate>,
}

fn read_input(path: &PathBuf) -> anyhow::Result<MatrixInput> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

fn format_result(result: &DistanceResult) -> String {
    match result {
        DistanceResult::Distance(meters) => format!("{:.0}", meters.value()),
        DistanceResult::NotFound => "-".to_string(),
    }
}

fn build_table(
    origins: &[Coordinate],
    destinations: &[Coordinate],
    matrix: &DistanceMatrixResult,
) -> Table {
    let mut table = Table::new();

    let mut header = vec!["origin \\ destination (m)".to_string()];
    header.extend(destinations.iter().map(|destination| destination.to_string()));
    table.set_header(header);

    for (origin, row) in origins.iter().zip(matrix.rows()) {
        let mut cells = vec![origin.to_string()];
        cells.extend(row.iter().map(format_result));
        table.add_row(cells);
    }

    table
}

pub async fn run(args: MatrixArgs) -> anyhow::Result<()> {
    let MatrixInput {
        origins,
        destinations,
    } = match &args.input {
        Some(path) => read_input(path)?,
        None => MatrixInput {
            origins: args.origins,
            destinations: args.destinations,
        },
    };

    let service = args.service.build()?;

    info!(
        "Requesting {}x{} distance matrix",
        origins.len(),
        destinations.len()
    );

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Waiting for the distance matrix API (Ctrl-C to cancel)");

    let (sender, receiver) = oneshot::channel();
    service.real_distances_with_callback(&origins, &destinations, move |result| {
        let _ = sender.send(result);
    });

    let mut receiver = receiver;
    let result = tokio::select! {
        result = &mut receiver => result?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Cancelling distance matrix request");
            service.cancel_calculator();
            receiver.await?
        }
    };
    spinner.finish_and_clear();

    let matrix = match result {
        Ok(matrix) => matrix,
        Err(DistanceError::Cancelled) => {
            info!("Request cancelled");
            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matrix)?);
    } else {
        println!("{}", build_table(&origins, &destinations, &matrix));
    }

    Ok(())
}
