//! Command-line front end: statistics, strokes-gained and CSV export for a
//! round saved as JSON.
//!
//! Usage: shotline <stats|sg|holes|csv|new> ...
//!
//! Logging goes to stderr; set `RUST_LOG=shotline=debug` for per-round
//! summaries or `=trace` for every shot.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use shotline::export::{self, RoundReport};
use shotline::sg::strokes_gained_by_shot;
use shotline::{Baselines, Category, Round, SgTotals, Stats};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the statistics card for a round.
    Stats {
        round: PathBuf,
        /// Print the report as JSON instead.
        #[arg(long)]
        json: bool,
    },
    /// Print strokes-gained totals.
    Sg {
        round: PathBuf,
        /// Baseline tables to use instead of the built-in ones.
        #[arg(long)]
        baselines: Option<PathBuf>,
        /// Also list every shot.
        #[arg(long)]
        shots: bool,
    },
    /// List holes with par and progress markers.
    Holes { round: PathBuf },
    /// Export one CSV row per shot.
    Csv {
        round: PathBuf,
        /// Output file (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print an empty 18-hole round as JSON.
    New {
        course: String,
        /// Round date (format: YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Stats { round, json } => {
            let round = load_round(&round)?;
            let report = RoundReport::new(&round, &Baselines::default());
            if json {
                println!("{}", report.to_json()?);
            } else {
                print_stats(&round, &report.stats, &report.sg);
            }
        }
        Commands::Sg { round, baselines, shots } => {
            let round = load_round(&round)?;
            let baselines = match baselines {
                Some(path) => load_baselines(&path)?,
                None => Baselines::default(),
            };
            let totals = shotline::compute_sg_totals_with(&round, &baselines);
            print_sg(&totals);
            if shots {
                println!();
                println!("{:>4} {:>4}  {:<4} {:>7}", "hole", "shot", "cat", "sg");
                for s in strokes_gained_by_shot(&round, &baselines) {
                    let cat = s.category.map_or("-", Category::as_str);
                    let sg = s.sg.map_or_else(|| "-".to_owned(), signed);
                    println!("{:>4} {:>4}  {:<4} {:>7}", s.hole, s.shot, cat, sg);
                }
            }
        }
        Commands::Holes { round } => {
            let round = load_round(&round)?;
            for hole in &round.holes {
                let par = hole.par.map_or_else(|| "P?".to_owned(), |p| format!("par {p}"));
                println!(
                    "{:>2}  {:<6} {:>2} shots  {}",
                    hole.number,
                    par,
                    hole.shots.len(),
                    hole.status().marker()
                );
            }
        }
        Commands::Csv { round, output } => {
            let round = load_round(&round)?;
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    export::write_csv(&round, file)?;
                    tracing::info!(path = %path.display(), "wrote shots");
                }
                None => {
                    export::write_csv(&round, io::stdout().lock())?;
                    tracing::info!(suggested = %export::csv_file_name(&round), "wrote shots to stdout");
                }
            }
        }
        Commands::New { course, date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let round = Round::new(&course, date);
            let mut out = io::stdout().lock();
            writeln!(out, "{}", round.to_json()?)?;
        }
    }
    Ok(())
}

/// Read, parse and validate a round.
fn load_round(path: &Path) -> Result<Round> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read round file: {}", path.display()))?;
    let round = Round::from_json(&text)
        .with_context(|| format!("Failed to parse round file: {}", path.display()))?;
    round
        .validate()
        .with_context(|| format!("Round {} is inconsistent", round.round_id))?;
    Ok(round)
}

fn load_baselines(path: &Path) -> Result<Baselines> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read baselines: {}", path.display()))?;
    Baselines::from_json(&text)
        .with_context(|| format!("Invalid baselines: {}", path.display()))
}

/// "+0.27" / "-1.05"
fn signed(v: f64) -> String {
    if v >= 0.0 { format!("+{v:.2}") } else { format!("{v:.2}") }
}

fn print_stats(round: &Round, s: &Stats, sg: &SgTotals) {
    println!("Round: {}", round.round_id);
    println!();
    println!("Holes started     {}/{}", s.holes_started, s.holes_total);
    println!("Holes finished    {}/{}", s.holes_finished, s.holes_total);
    println!("Total shots       {}", s.total_shots);
    println!(
        "FW hit            {}%  ({}/{} par 4/5 only)",
        s.fw_hit_pct, s.fw_hits, s.fw_opportunities
    );
    println!("GIR               {}%  ({}/{})", s.gir_pct, s.gir_hits, s.gir_opportunities);
    println!(
        "Scramble          {}%  ({}/{} no GIR -> par)",
        s.scramble_pct, s.scramble_hits, s.scramble_opportunities
    );
    println!("Putts             {}", s.putts);
    println!("Penalties         {}", s.penalties);
    println!(
        "Driving avg yd    {:.1}  ({} tee shots par 4/5)",
        s.driving_avg, s.driving_count
    );
    println!("Driving max yd    {}", s.driving_max);
    println!();
    print_sg(sg);

    if !s.lie_after_counts.is_empty() {
        println!();
        println!("Lie after");
        let mut counts: Vec<_> = s.lie_after_counts.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1));
        for (lie, n) in counts {
            println!("  {:<8} {n}", lie.as_str());
        }
    }
}

fn print_sg(sg: &SgTotals) {
    println!("SG total          {}", signed(sg.total));
    println!("SG tee-to-green   {}", signed(sg.t2g));
    for category in Category::ALL {
        println!("SG {:<14} {}", category.as_str(), signed(sg.get(category)));
    }
}
