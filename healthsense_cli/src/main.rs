use clap::Parser;
use healthsense_core::*;
use std::io;
use std::path::PathBuf;

mod menu;

#[derive(Parser)]
#[command(name = "healthsense")]
#[command(about = "Hospital outbreak tracking console", long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with an empty engine instead of the sample hospitals
    #[arg(long)]
    no_seed: bool,
}

fn main() -> Result<()> {
    healthsense_core::logging::init_console("warn")?;

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut engine = Engine::new(&config);
    if config.cli.seed_sample_data && !cli.no_seed {
        seed_sample_data(&mut engine)?;
    }

    let stdin = io::stdin();
    menu::run(&mut engine, &mut stdin.lock())
}

/// Preload three hospitals, their weekly records and two alerts
///
/// Seeded records bypass the undo log.
fn seed_sample_data(engine: &mut Engine) -> Result<()> {
    const HOSPITALS: [(&str, &str); 3] = [
        ("NHSL", "Western"),
        ("KTH", "Central"),
        ("THJ", "Southern"),
    ];
    const RECORDS: [(&str, &str, u32, u32); 9] = [
        ("NHSL", "Dengue", 10, 120),
        ("NHSL", "Dengue", 11, 180),
        ("NHSL", "Dengue", 12, 250),
        ("NHSL", "COVID-19", 11, 90),
        ("KTH", "Leptospirosis", 10, 45),
        ("KTH", "Leptospirosis", 11, 60),
        ("KTH", "Influenza", 12, 75),
        ("THJ", "Cholera", 12, 40),
        ("THJ", "Dengue", 11, 95),
    ];
    const REPORTS: [(&str, &str, &str); 2] = [
        (
            "Western",
            "NHSL",
            "Dengue cases rising sharply in Colombo (Week 12)",
        ),
        ("Central", "KTH", "Leptospirosis trend increasing in Kandy"),
    ];

    for (name, region) in HOSPITALS {
        match engine.add_hospital(name, region) {
            Ok(_) => {}
            // A small config limit is allowed to cut the sample set short
            Err(Error::CapacityExceeded(reason)) => {
                tracing::warn!("Skipping sample hospital {}: {}", name, reason);
            }
            Err(e) => return Err(e),
        }
    }

    for (hospital, disease, week, count) in RECORDS {
        let record = Record::new(disease, week, count)?;
        if let Err(e) = engine.load_record(hospital, record) {
            tracing::warn!("Skipping sample record for {}: {}", hospital, e);
        }
    }

    for (region, hospital, summary) in REPORTS {
        if let Err(e) = engine.enqueue_report(Report::new(region, hospital, summary)?) {
            tracing::warn!("Skipping sample report for {}: {}", region, e);
        }
    }

    tracing::info!("Seeded {} sample hospitals", engine.hospitals().len());
    Ok(())
}
