use std::time::Duration;

use distance_calculator::{Coordinate, DistanceResult};
use indicatif::ProgressBar;

use crate::service_args::ServiceArgs;

pub async fn run(
    origin: Coordinate,
    destination: Coordinate,
    args: ServiceArgs,
) -> anyhow::Result<()> {
    let service = args.build()?;

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("{} -> {} ({})", origin, destination, service.travel_mode()));

    let result = service.fetch_distance(origin, destination).await;
    spinner.finish_and_clear();

    match result? {
        DistanceResult::Distance(meters) => println!("{}", meters),
        DistanceResult::NotFound => println!("No route found"),
    }

    Ok(())
}
