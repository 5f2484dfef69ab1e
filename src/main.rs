//! Default launch: integrate one trajectory and report how long it took

use arrow_ballistics::{ballistics, SimulationParams};
use std::error::Error;
use std::time::Instant;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("arrow_ballistics=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    let start = Instant::now();
    let params = SimulationParams::default();
    let trajectory = ballistics(&params)?;
    tracing::debug!(
        samples = trajectory.len(),
        range = trajectory.range(),
        "default launch done"
    );
    drop(trajectory);

    println!("--- {:.6} seconds ---", start.elapsed().as_secs_f64());
    Ok(())
}
