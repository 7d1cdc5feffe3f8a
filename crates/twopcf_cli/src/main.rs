use clap::{Parser, ValueEnum};
use log::info;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;
use std::io::{BufWriter, Write};
use std::num::NonZeroU32;
use std::process;
use twopcf::{CorrelationBuilder, Estimator, PairCounts, PairingRule, PointSet, distros};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Distribution {
    /// points on a square lattice (uses --spacing)
    Grid,
    /// radius drawn uniformly, concentrated toward the center (uses --radius)
    Disc,
    /// uniform in area over a disc (uses --radius)
    UniformDisc,
    /// an annulus (uses --r-int and --r-ext)
    Ring,
    /// evenly spaced points on one circle (uses --radius)
    Circle,
    /// circles with random radii (uses --n-rings)
    RandomCircles,
    /// circles with a common radius (uses --n-rings and --radius)
    UniformCircles,
    /// uniform over the whole box
    UniformBox,
}

#[derive(Parser)]
#[command(
    name = "twopcf",
    about = "Estimate the two-point correlation function of a synthetic 2D point distribution",
    long_about = "Generates a data catalog, compares its pair separations against a uniform \
                 random catalog and prints a tab-separated table holding the pair counts and \
                 the Peebles-Hauser, Davis-Peebles, Hamilton & Landy-Szalay estimators."
)]
struct Cli {
    /// The distribution of the data catalog
    #[arg(value_enum)]
    distribution: Distribution,

    /// Side length of the square box
    #[arg(long, default_value = "10")]
    box_size: f64,

    /// Number of data points (for every distribution other than grid).
    /// With circles, this is the number of points per ring
    #[arg(long, short = 'n', default_value = "500")]
    n_points: usize,

    /// Number of points in the random catalog
    #[arg(long, default_value = "500")]
    n_random: usize,

    /// Width of the separation bins
    #[arg(long, default_value = "0.5")]
    bin_size: f64,

    /// Seed for the random number generator
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Lattice spacing for grid
    #[arg(long, default_value = "1")]
    spacing: f64,

    /// Radius for disc, uniform-disc, circle & uniform-circles
    #[arg(long, default_value = "1")]
    radius: f64,

    /// Inner radius for ring
    #[arg(long, default_value = "2")]
    r_int: f64,

    /// Outer radius for ring
    #[arg(long, default_value = "3")]
    r_ext: f64,

    /// Number of rings for random-circles & uniform-circles
    #[arg(long, default_value = "4")]
    n_rings: usize,

    /// Center x coordinate (defaults to the middle of the box)
    #[arg(long)]
    x0: Option<f64>,

    /// Center y coordinate (defaults to the middle of the box)
    #[arg(long)]
    y0: Option<f64>,

    /// Histogram the x & y coordinate differences instead of distances
    #[arg(long)]
    axis: bool,

    /// Pair every data point with every random point for DR
    #[arg(long)]
    full_cross: bool,

    /// Reject catalogs that can't form a pair rather than printing inf/NaN
    #[arg(long)]
    strict: bool,

    /// Number of shards the pair loops are split into
    #[arg(long, default_value = "1")]
    shards: NonZeroU32,
}

fn generate(cli: &Cli, rng: &mut Xoshiro256PlusPlus) -> Result<PointSet, twopcf::Error> {
    let x_0 = cli.x0.unwrap_or(cli.box_size / 2.0);
    let y_0 = cli.y0.unwrap_or(cli.box_size / 2.0);
    match cli.distribution {
        Distribution::Grid => distros::square_grid(cli.box_size, cli.spacing),
        Distribution::Disc => distros::disc(cli.n_points, cli.radius, x_0, y_0, rng),
        Distribution::UniformDisc => distros::uniform_disc(cli.n_points, cli.radius, x_0, y_0, rng),
        Distribution::Ring => distros::ring(cli.n_points, cli.r_int, cli.r_ext, x_0, y_0, rng),
        Distribution::Circle => distros::circle(x_0, y_0, cli.radius, cli.n_points),
        Distribution::RandomCircles => {
            distros::random_circles(cli.box_size, cli.n_rings, cli.n_points, rng)
        }
        Distribution::UniformCircles => {
            distros::uniform_circles(cli.box_size, cli.n_rings, cli.n_points, cli.radius, rng)
        }
        Distribution::UniformBox => distros::uniform_box(cli.box_size, cli.n_points, rng),
    }
}

fn write_table(
    out: &mut impl Write,
    axis: Option<&str>,
    counts: &PairCounts,
) -> Result<(), std::io::Error> {
    let xi: Vec<Vec<f64>> = Estimator::ALL
        .iter()
        .map(|est| counts.estimate(*est))
        .collect();
    for (i, left_edge) in counts.left_edges().iter().enumerate() {
        if let Some(axis) = axis {
            write!(out, "{axis}\t")?;
        }
        write!(
            out,
            "{left_edge}\t{}\t{}\t{}",
            counts.dd()[i],
            counts.rr()[i],
            counts.dr()[i]
        )?;
        for values in xi.iter() {
            write!(out, "\t{}", values[i])?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_header(out: &mut impl Write, with_axis: bool) -> Result<(), std::io::Error> {
    write!(out, "#")?;
    if with_axis {
        write!(out, "axis\t")?;
    }
    write!(out, "left_edge\tDD\tRR\tDR")?;
    for est in Estimator::ALL {
        write!(out, "\t{est}")?;
    }
    writeln!(out)
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cross_pairing = if cli.full_cross {
        PairingRule::FullCross
    } else {
        PairingRule::LegacyOffset
    };
    let driver = CorrelationBuilder::new()
        .box_size(cli.box_size)
        .bin_size(cli.bin_size)
        .n_random(cli.n_random)
        .cross_pairing(cross_pairing)
        .n_shards(cli.shards)
        .strict(cli.strict)
        .build()?;

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(cli.seed);
    let data = generate(cli, &mut rng)?;
    info!(
        "generated {} data points from the {:?} distribution",
        data.len(),
        cli.distribution
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_header(&mut out, cli.axis)?;
    if cli.axis {
        let counts = driver.axis_pair_counts(&data, &mut rng)?;
        write_table(&mut out, Some("x"), counts.x())?;
        write_table(&mut out, Some("y"), counts.y())?;
    } else {
        let counts = driver.pair_counts(&data, &mut rng)?;
        write_table(&mut out, None, &counts)?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn table_layout() {
        let cli = Cli::parse_from(["twopcf", "uniform-box", "-n", "20", "--n-random", "20"]);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(cli.seed);
        let data = generate(&cli, &mut rng).unwrap();
        assert_eq!(data.len(), 20);

        let driver = CorrelationBuilder::new()
            .box_size(cli.box_size)
            .bin_size(cli.bin_size)
            .n_random(cli.n_random)
            .build()
            .unwrap();
        let counts = driver.pair_counts(&data, &mut rng).unwrap();

        let mut buf = Vec::new();
        write_header(&mut buf, false).unwrap();
        write_table(&mut buf, None, &counts).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + counts.n_bins());
        assert!(lines[0].starts_with("#left_edge\tDD"));
        assert!(lines.iter().all(|line| line.split('\t').count() == 8));
    }

    #[test]
    fn huge_shard_count() {
        let cli = Cli::parse_from([
            "twopcf",
            "uniform-box",
            "-n",
            "20",
            "--n-random",
            "20",
            "--shards",
            "4000000000",
        ]);
        assert_eq!(cli.shards.get(), 4_000_000_000);
        assert!(run(&cli).is_ok());
    }

    #[test]
    fn bad_parameters_are_errors() {
        let cli = Cli::parse_from(["twopcf", "ring", "--r-int", "3", "--r-ext", "1"]);
        assert!(run(&cli).is_err());
        let cli = Cli::parse_from(["twopcf", "grid", "--bin-size", "0"]);
        assert!(run(&cli).is_err());
        let cli = Cli::parse_from(["twopcf", "circle", "--radius=-1"]);
        assert!(run(&cli).is_err());
        let cli = Cli::parse_from(["twopcf", "random-circles", "--n-rings", "0"]);
        assert!(run(&cli).is_err());
    }
}
