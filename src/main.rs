//! moody - reduce a Union Jack surface plate survey

use anyhow::{Context, Result};
use clap::Parser;
use moody::{estimate_flatness, FlatnessEstimate, Line, Report, Survey};
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;

/// Moody method surface plate reduction
#[derive(Parser, Debug)]
#[command(name = "moody")]
#[command(about = "Reduce Union Jack autocollimator readings into a flatness map", long_about = None)]
#[command(version)]
struct Cli {
    /// Survey file (TOML)
    survey: PathBuf,

    /// Output the full reduction in JSON format
    #[arg(long)]
    json: bool,

    /// Multiplier applied to vertex heights in the JSON output
    #[arg(long, default_value_t = 1.)]
    z_scale: f64,

    /// Monte Carlo trials for the flatness uncertainty estimate
    #[arg(long)]
    trials: Option<usize>,

    /// Reading uncertainty in arc-seconds (overrides the survey file)
    #[arg(long)]
    uncertainty: Option<f64>,

    /// RNG seed for the uncertainty estimate
    #[arg(long)]
    seed: Option<u64>,
}

/// Uncertainty settings after merging the survey file with the command line
struct UncertaintySettings {
    reading_arcsec: f64,
    trials: usize,
    seed: Option<u64>,
}

impl UncertaintySettings {
    fn resolve(cli: &Cli, survey: &Survey) -> Option<Self> {
        let file = survey.uncertainty;
        let reading_arcsec = cli.uncertainty
            .or(file.map(|f| f.reading_arcsec))?;

        Some(Self {
            reading_arcsec,
            trials: cli.trials.or(file.map(|f| f.trials)).unwrap_or(100),
            seed:   cli.seed.or(file.and_then(|f| f.seed)),
        })
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a Report,
    vertices: Vec<Point3<f64>>,
    flatness_inches: f64,
    uncertainty: Option<FlatnessEstimate>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let survey = Survey::load_from_file(&cli.survey)
        .with_context(|| format!("loading {}", cli.survey.display()))?;
    let plate = survey.plate_config()?;
    let report = Report::build(&plate, &survey.readings)?;

    let uncertainty = match UncertaintySettings::resolve(&cli, &survey) {
        Some(settings) => {
            let mut rng = match settings.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None       => StdRng::from_entropy(),
            };
            Some(estimate_flatness(&plate, &survey.readings, settings.reading_arcsec,
                settings.trials, &mut rng)?)
        }
        None => None,
    };

    if cli.json {
        let output = JsonOutput {
            report: &report,
            vertices: report.vertices(cli.z_scale),
            flatness_inches: report.flatness(),
            uncertainty,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let counts = plate.suggested_station_counts();
    println!("Plate {} x {} in, foot spacing {} in, diagonal {:.3} in (inset {} in)",
        plate.width_inches(), plate.height_inches(),
        plate.reflector_foot_spacing_inches(), plate.diagonal_inches(),
        plate.diagonal_inset());
    println!("Stations: diagonal {} | horizontal {} | vertical {}",
        counts.diagonal, counts.horizontal, counts.vertical);
    println!();

    for line in Line::ALL {
        let table = report.table(line);
        let heights = table.baseline_linear_displacement();
        let low  = heights.iter().copied().fold(f64::MAX, f64::min);
        let high = heights.iter().copied().fold(f64::MIN, f64::max);

        println!("{:<26} {:<24} {:>3} stations | low {:8.1} uin | high {:8.1} uin",
            line.segment().name, line.segment().display_name(), table.num_stations(),
            low * 1e6, high * 1e6);
    }
    println!();

    println!("Lowest datum value {:.2} arc-sec", report.lowest_value_across_all_tables());
    println!("Overall flatness   {:.1} uin ({:.8} in)",
        report.flatness() * 1e6, report.flatness());

    if let Some(estimate) = uncertainty {
        println!("Uncertainty        {:.1} .. {:.1} uin, mean {:.1} uin over {} trials",
            estimate.min * 1e6, estimate.max * 1e6, estimate.mean * 1e6, estimate.trials);
    }

    Ok(())
}
