use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Leaderboard, RankedFilmRecord};
use orchestrator::LeaderboardOrchestrator;
use pipeline::{ScoringConfig, ScoringEngine};
use sources::{CsvSource, ListingSource, ScrapeConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Film Leaderboard - re-rank a top-rated chart by awards and popularity
#[derive(Parser, Debug)]
#[command(name = "film-leaderboard")]
#[command(about = "Re-rank a film chart with an award bonus and a popularity penalty", long_about = None)]
struct Cli {
    /// Where to write the before/after CSV
    #[arg(short, long, global = true, default_value = "result.csv")]
    output: PathBuf,

    /// JSON file overriding the scoring constants
    #[arg(long, global = true)]
    scoring_config: Option<PathBuf>,

    /// Do not print the rankings to the terminal
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape the chart and its detail pages, then score
    Scrape {
        /// Site root that chart and detail links are resolved against
        #[arg(long, default_value = sources::config::DEFAULT_BASE_URL)]
        base_url: String,

        /// Path of the chart listing page
        #[arg(long, default_value = sources::config::DEFAULT_CHART_PATH)]
        chart_path: String,

        /// Number of films taken from the top of the chart
        #[arg(long, default_value = "20")]
        top: usize,

        /// Maximum concurrent detail page fetches
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },

    /// Score a saved Name,Oscars,Rating,Votes table
    Score {
        /// Raw-record CSV file
        #[arg(long)]
        input: PathBuf,

        /// Require exactly this many films (extra rows are ignored)
        #[arg(long)]
        top: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.scoring_config {
        Some(path) => ScoringConfig::from_json_file(path)?,
        None => ScoringConfig::default(),
    };
    let engine = ScoringEngine::new(&config).context("Failed to build scoring engine")?;
    info!(stages = ?engine.stage_names(), "Scoring engine ready");
    let orchestrator = LeaderboardOrchestrator::new(engine).with_output(&cli.output);

    let start = Instant::now();
    let leaderboard = match cli.command {
        Commands::Scrape {
            base_url,
            chart_path,
            top,
            concurrency,
            timeout_secs,
        } => {
            let config = ScrapeConfig::default()
                .with_base_url(base_url)
                .with_chart_path(chart_path)
                .with_top_n(top)
                .with_concurrency(concurrency)
                .with_timeout(Duration::from_secs(timeout_secs));
            println!("Scraping top {} films from {}...", top, config.chart_url());
            orchestrator.run_scrape(ListingSource::http(config)).await?
        }
        Commands::Score { input, top } => {
            println!("Scoring films from {}...", input.display());
            let mut source = CsvSource::new(input);
            if let Some(top) = top {
                source = source.with_limit(top);
            }
            orchestrator.run_source(Arc::new(source)).await?
        }
    };

    println!(
        "{} Scored {} films in {:?}, wrote {}",
        "✓".green(),
        leaderboard.len(),
        start.elapsed(),
        cli.output.display()
    );

    if !cli.quiet {
        print_leaderboard(&leaderboard);
    }

    Ok(())
}

/// Print both rankings side by side
fn print_leaderboard(leaderboard: &Leaderboard) {
    let width = leaderboard
        .rows()
        .map(|r| r.film.name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(10, 40);

    println!();
    println!(
        "{}",
        format!(
            "{:>4}  {:<width$} {:>6}   {:>4}  {:<width$} {:>6}  {:>5}",
            "#", "Scraped", "Rating", "#", "Adjusted", "Rating", "Move",
        )
        .bold()
        .blue()
    );

    for (before, after) in leaderboard.before.iter().zip(&leaderboard.after) {
        println!(
            "{:>4}  {:<width$} {:>6.1}   {:>4}  {:<width$} {:>6.1}  {}",
            before.rank.to_string().green(),
            truncate(&before.film.name, width),
            before.film.rating,
            after.rank.to_string().green(),
            truncate(&after.film.name, width),
            after.film.rating,
            movement_marker(after),
        );
    }
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(width.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}

/// Places gained or lost between the scraped and adjusted rankings
fn movement_marker(record: &RankedFilmRecord) -> String {
    let moved = record.movement();
    let text = format!("{:>5}", movement_text(moved));
    match moved {
        m if m > 0 => text.green().to_string(),
        m if m < 0 => text.red().to_string(),
        _ => text.dimmed().to_string(),
    }
}

fn movement_text(moved: i64) -> String {
    match moved {
        m if m > 0 => format!("▲{}", m),
        m if m < 0 => format!("▼{}", -m),
        _ => "=".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_text() {
        assert_eq!(movement_text(3), "▲3");
        assert_eq!(movement_text(-2), "▼2");
        assert_eq!(movement_text(0), "=");
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("Heat", 10), "Heat");
        assert_eq!(truncate("The Good, the Bad and the Ugly", 8), "The Goo…");
    }

    #[test]
    fn test_scrape_defaults() {
        let cli = Cli::try_parse_from(["film-leaderboard", "scrape"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("result.csv"));
        assert!(!cli.quiet);
        match cli.command {
            Commands::Scrape {
                base_url,
                chart_path,
                top,
                concurrency,
                timeout_secs,
            } => {
                assert_eq!(base_url, "https://www.imdb.com");
                assert_eq!(chart_path, "/chart/top/");
                assert_eq!(top, 20);
                assert_eq!(concurrency, 4);
                assert_eq!(timeout_secs, 30);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_score_with_global_flags() {
        let cli = Cli::try_parse_from([
            "film-leaderboard",
            "score",
            "--input",
            "films.csv",
            "--top",
            "5",
            "--quiet",
            "--output",
            "out.csv",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.output, PathBuf::from("out.csv"));
        assert!(matches!(
            cli.command,
            Commands::Score { top: Some(5), .. }
        ));
    }
}
