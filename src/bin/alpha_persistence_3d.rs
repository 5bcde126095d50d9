//! Persistence of a weighted periodic 3D alpha complex.
//!
//! Reads a point cloud, per-point weights, and a periodic cuboid domain,
//! builds the periodic weighted alpha-shape filtration, and prints the
//! persistence diagram to stdout, one `characteristic dimension birth
//! death` line per pair (`inf` marks an essential class).

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use alpha_persistence::{
    assemble_filtration, build_periodic_alpha_complex, io, Error, PersistentCohomology,
};

#[derive(Parser, Debug)]
#[command(
    name = "alpha_persistence_3d",
    about = "Persistent cohomology of a weighted periodic 3D alpha-shape filtration"
)]
struct Args {
    /// Point cloud: point count, then one `x y z` row per point.
    point_file: PathBuf,

    /// Weights: one float per point.
    weight_file: PathBuf,

    /// Periodic domain: `x_min y_min z_min x_max y_max z_max`.
    cuboid_file: PathBuf,

    /// Characteristic p of the coefficient field Z/pZ (a prime).
    coeff_field_characteristic: u64,

    /// Minimum persistence for a finite pair to be reported (>= -1.0).
    min_persistence: f64,
}

fn run(args: &Args) -> Result<(), Error> {
    if args.min_persistence < -1.0 {
        return Err(Error::InvalidArgument(format!(
            "min_persistence must be >= -1.0, got {}",
            args.min_persistence
        )));
    }

    let points = io::read_points(&args.point_file)?;
    let weights = io::read_weights(&args.weight_file, points.nrows())?;
    let domain = io::read_domain(&args.cuboid_file)?;
    info!(points = points.nrows(), "input read");

    let stream = build_periodic_alpha_complex(&points, &weights, &domain)?;
    let filtration = assemble_filtration(stream)?;
    info!(simplices = filtration.len(), "filtration assembled");

    let engine = PersistentCohomology::new(args.coeff_field_characteristic)?;
    let diagram = engine.compute(&filtration, args.min_persistence);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    diagram.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            eprintln!(
                "usage: alpha_persistence_3d <point_file> <weight_file> <cuboid_file> \
                 <coeff_field_characteristic (prime)> <min_persistence (>= -1.0)>"
            );
            ExitCode::FAILURE
        }
    }
}
