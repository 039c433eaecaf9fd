mod args;
mod parameters;
mod summary;

use crate::args::Args;
use crate::parameters::Parameters;
use crate::summary::Summary;

use commons::log::{error, info, LevelFilter};
use commons::perlin::{octave_weights, stacked_perlin_noise};
use commons::rand::rngs::SmallRng;
use commons::rand::SeedableRng;
use commons::{rescale, M};
use hydrology::{Erosion, ErosionReport, HeightField};
use simple_logger::SimpleLogger;
use std::env;
use std::error::Error;
use std::process;

fn generate_heights(args: &Args, params: &Parameters) -> M<f64> {
    let weights = octave_weights(params.octaves, params.persistence);
    let noise = stacked_perlin_noise(args.width(), args.width(), args.noise_seed(), &weights);
    rescale(noise, (0.0, params.max_height))
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let params = match &args.parameters {
        Some(path) => Parameters::load(path)?,
        None => Parameters::default(),
    };
    let erosion = Erosion::new(params.erosion.clone())?;

    info!("Generating {0}x{0} terrain", args.width());
    let heights = generate_heights(&args, &params);
    let mut field = HeightField::new(heights.clone())?;
    let mut rng = SmallRng::seed_from_u64(args.seed);

    let mut total = ErosionReport::default();
    for pass in 0..params.passes {
        let report = erosion.erode(&mut field, &mut rng);
        info!("Pass {}/{}: {:?}", pass + 1, params.passes, report);
        total += report;
    }

    let summary = Summary::new(&heights, &field);
    info!("Droplets: {} ({:?})", total.droplets(), total);
    info!(
        "Removed {:.4}, deposited {:.4}",
        summary.removed, summary.deposited
    );
    info!(
        "{} wet cells, deepest pool {:.4}, {} cells visited",
        summary.wet_cells, summary.deepest_pool, summary.visited_cells
    );
    Ok(())
}

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Debug)
        .init()
        .expect("logger initialised twice");

    let args = match Args::new(env::args().collect()) {
        Ok(args) => args,
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}
