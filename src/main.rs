mod config;
mod db;
mod download;
mod error;
mod fetch;
mod parser;
mod semester;
mod storage;

use std::time::Instant;

use clap::{Parser, Subcommand};

use crate::config::Settings;
use parser::PageReport;
use semester::Semester;

#[derive(Parser)]
#[command(name = "sevsu_scraper", about = "SevSU class schedule scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema
    Init,
    /// Fetch the schedule page and print per-institute semester links
    Parse {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch, segment and download one semester's schedule files
    Run {
        /// Semester to download: 1 or 2 (default: by calendar)
        #[arg(short, long)]
        semester: Option<u8>,
    },
    /// Show stored lessons
    Rows {
        /// Filter by group name
        #[arg(short, long)]
        group: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Show scraping statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load();

    let result = match cli.command {
        Commands::Init => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            println!("Database ready at {}", settings.db_path);
            Ok(())
        }
        Commands::Parse { json } => {
            let client = fetch::client(&settings)?;
            let html = fetch::fetch_page(&client, &settings).await?;
            let report = parser::collect(&html)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report.records)?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Commands::Run { semester } => {
            let sem = match semester {
                Some(n) => Semester::from_number(n)
                    .ok_or_else(|| anyhow::anyhow!("semester must be 1 or 2"))?,
                None => Semester::current(),
            };
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;

            let client = fetch::client(&settings)?;
            let html = fetch::fetch_page(&client, &settings).await?;
            let report = parser::collect(&html)?;

            for f in &report.failures {
                println!("Skipping {}: {}", f.institute, f.error);
            }
            println!(
                "Downloading semester {} files for {} institutes...",
                sem.number(),
                report.records.len()
            );
            let stats =
                download::download_semester(&conn, &client, &settings, &report.records, sem)
                    .await?;
            println!(
                "Done: {} files ({} ok, {} errors).",
                stats.total, stats.ok, stats.errors
            );
            Ok(())
        }
        Commands::Rows { group, limit } => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let rows = db::fetch_pairs(&conn, group.as_deref(), limit)?;
            if rows.is_empty() {
                println!("No lessons stored.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<12} | {:>4} | {:<10} | {:<12} | {:<24} | {:<20} | {:<4} | {:<8}",
                "#", "Day", "Pair", "Weeks", "Group", "Lesson", "Teacher", "Type", "Room"
            );
            println!("{}", "-".repeat(118));
            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<12} | {:>4} | {:<10} | {:<12} | {:<24} | {:<20} | {:<4} | {:<8}",
                    i + 1,
                    truncate(&r.day, 12),
                    r.lesson_number,
                    truncate(&r.week_number, 10),
                    truncate(&r.group_name, 12),
                    truncate(&r.lesson, 24),
                    truncate(&r.teacher_name, 20),
                    truncate(&r.lesson_type, 4),
                    truncate(&r.auditorium, 8),
                );
            }
            println!("\n{} lessons", rows.len());
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Institutes: {}", s.institutes);
            println!("Files:      {}", s.files);
            println!("Downloaded: {}", s.downloaded);
            println!("Errors:     {}", s.errors);
            println!("Lessons:    {}", s.pairs);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn print_report(report: &PageReport) {
    for record in &report.records {
        println!("\n{}", record.name);
        if record.semester1.is_empty() && record.semester2.is_empty() {
            println!("  (no schedules published yet)");
            continue;
        }
        if !record.semester1.is_empty() {
            println!("  Semester 1:");
            for link in &record.semester1 {
                println!("    {}", link);
            }
        }
        if !record.semester2.is_empty() {
            println!("  Semester 2:");
            for link in &record.semester2 {
                println!("    {}", link);
            }
        }
    }

    if !report.failures.is_empty() {
        println!("\n--- Failures ---");
        for f in &report.failures {
            println!("  {}: {}", f.institute, f.error);
        }
    }

    println!(
        "\n{} institutes parsed, {} failed",
        report.records.len(),
        report.failures.len()
    );
}

fn truncate(s: &str, max: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_none() {
        head
    } else {
        format!("{head}…")
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs >= 3600 {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}
