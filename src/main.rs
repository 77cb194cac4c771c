use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod analytics;
mod backfill;
mod fixtures;
mod models;
mod report;
mod sdg;
mod store;

#[derive(Parser)]
#[command(name = "sdg-engagement")]
#[command(about = "SDG activity engagement analytics for the student admin dashboard", long_about = None)]
struct Cli {
    /// Dataset snapshot (JSON). Falls back to SDG_TRACKER_DATA, then built-in fixtures.
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Locally persisted edits layered over the dataset
    #[arg(long, global = true)]
    overrides: Option<PathBuf>,
    /// Seed for synthetic activity backfill
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the built-in mock dataset to a snapshot file
    Seed {
        #[arg(long, default_value = "dataset.json")]
        out: PathBuf,
    },
    /// Participation per SDG goal
    Sdg {
        #[arg(long, default_value_t = 17)]
        limit: usize,
    },
    /// Registration, attendance and rating per catalog event
    Events,
    /// Points and activity per faculty
    Faculty,
    /// Headline dashboard figures
    Dashboard,
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "sdg-report.md")]
        out: PathBuf,
    },
    /// Import event registrations from a CSV file into a snapshot
    ImportRegistrations {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "dataset.json")]
        out: PathBuf,
    },
}

fn load_dataset(cli: &Cli) -> anyhow::Result<store::Dataset> {
    let source = store::resolve_data_source(cli.data.clone());
    let mut dataset = store::load(&source)?;

    if let Some(path) = &cli.overrides {
        let overrides = store::load_overrides(path)?;
        store::apply_overrides(&mut dataset, overrides);
    }

    Ok(dataset)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let today = Utc::now().date_naive();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match &cli.command {
        Commands::Seed { out } => {
            store::save_dataset(out, &fixtures::dataset())?;
            println!("Mock dataset written to {}.", out.display());
        }
        Commands::Sdg { limit } => {
            let dataset = load_dataset(&cli)?;
            let snapshot = analytics::run(&dataset, &mut rng, today);

            println!("SDG goals by participation:");
            for stat in snapshot.sdg_stats.iter().take(*limit) {
                println!(
                    "- SDG {} {}: {} participants, {} activities, {} points",
                    stat.goal, stat.name, stat.participants, stat.activity_count, stat.total_points
                );
            }
        }
        Commands::Events => {
            let dataset = load_dataset(&cli)?;
            let snapshot = analytics::run(&dataset, &mut rng, today);

            if snapshot.event_stats.is_empty() {
                println!("No events in the catalog.");
                return Ok(());
            }

            println!("Event performance:");
            for stat in snapshot.event_stats.iter() {
                println!(
                    "- {} ({}): {} registered, {} attended, {} cancelled, attendance {:.1}%, rating {:.1}, {} favorites",
                    stat.title,
                    stat.organizer,
                    stat.registered,
                    stat.attended,
                    stat.cancelled,
                    stat.attendance_rate,
                    stat.average_rating,
                    stat.favorite_count
                );
            }
        }
        Commands::Faculty => {
            let dataset = load_dataset(&cli)?;
            let snapshot = analytics::run(&dataset, &mut rng, today);

            println!("Faculties by points:");
            for stat in snapshot.faculty_stats.iter() {
                println!(
                    "- {}: {} students, {} points (avg {:.1}), {} activities",
                    stat.faculty,
                    stat.total_students,
                    stat.total_points,
                    stat.average_points,
                    stat.total_activities
                );
            }
        }
        Commands::Dashboard => {
            let dataset = load_dataset(&cli)?;
            let overview = analytics::run(&dataset, &mut rng, today).overview;
            let rendered = serde_json::to_string_pretty(&overview)
                .context("failed to render dashboard overview")?;
            println!("{rendered}");
        }
        Commands::Report { out } => {
            let dataset = load_dataset(&cli)?;
            let snapshot = analytics::run(&dataset, &mut rng, today);
            let report = report::build_report(&snapshot, today);
            std::fs::write(out, report)
                .with_context(|| format!("failed to write report {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::ImportRegistrations { csv, out } => {
            let mut dataset = load_dataset(&cli)?;
            let inserted = store::import_registrations_csv(&mut dataset, csv)?;
            store::save_dataset(out, &dataset)?;
            println!(
                "Imported {inserted} registrations from {} into {}.",
                csv.display(),
                out.display()
            );
        }
    }

    Ok(())
}
