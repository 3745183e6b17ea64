//! newton CLI
//!
//! Recruiter capacity from a vacancy sheet, squad evaluation and Best XI from
//! a squad export, league wage baselines from a wage export, and a blank
//! vacancy template.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use newton_core::capacity::RecruiterSummary;
use newton_core::squad::PlayerAnalysis;
use newton_core::{
    AnalysisConfig, Batch, CapacityCalculator, FormationXI, LeagueBaselines, LineupBuilder,
    SquadEvaluator, SquadReport,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "newton")]
#[command(about = "Recruiter capacity and squad evaluation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recruiter workload from a vacancy sheet
    Capacity {
        /// Vacancy CSV (Vacancy Name, Recruiter Name, Role Type, Internal?, Stage[, Count])
        #[arg(long)]
        csv: PathBuf,

        /// Print JSON instead of a text report
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Role scores and Best XI from a squad export
    Squad {
        /// Squad export saved as CSV
        #[arg(long)]
        csv: PathBuf,

        /// Build this formation only (e.g. "4-3-3" or "433")
        #[arg(long)]
        formation: Option<String>,

        /// Number of ranked formations to show when no formation is given
        #[arg(long, default_value_t = 3)]
        top: usize,

        /// YAML config; falls back to $NEWTON_CONFIG, then built-in defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// League baselines JSON, used with --division
        #[arg(long, requires = "division")]
        league: Option<PathBuf>,

        /// Division to compare wages against
        #[arg(long, requires = "league")]
        division: Option<String>,

        /// Print JSON instead of a text report
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Generate league wage baselines from a wage export
    Baselines {
        /// Wage export saved as CSV (Name, Position, Wage, Division)
        #[arg(long)]
        csv: PathBuf,

        /// Output JSON path
        #[arg(long)]
        out: PathBuf,
    },

    /// Write a vacancy CSV template
    Template {
        /// Output CSV path
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Serialize)]
struct CapacityOutput<'a> {
    recruiters: &'a [RecruiterSummary],
    team: Option<newton_core::TeamSummary>,
    errors: &'a [newton_core::RowError],
}

#[derive(Serialize)]
struct SquadOutput<'a> {
    report: &'a SquadReport,
    lineups: &'a [FormationXI],
    errors: &'a [newton_core::RowError],
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Capacity { csv, json } => run_capacity(csv, json),
        Commands::Squad {
            csv,
            formation,
            top,
            config,
            league,
            division,
            json,
        } => {
            let league = match (league, division) {
                (Some(path), Some(division)) => Some((path, division)),
                (None, None) => None,
                _ => bail!("--league and --division go together"),
            };
            run_squad(csv, formation, top, config, league, json)
        }
        Commands::Baselines { csv, out } => run_baselines(csv, out),
        Commands::Template { out } => {
            newton_import::write_vacancy_template(&out)?;
            println!("Template written to {}", out.display());
            Ok(())
        }
    }
}

/// Logs go to stderr so `--json` output stays clean.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<PathBuf>) -> Result<AnalysisConfig> {
    let config = match path {
        Some(path) => AnalysisConfig::from_path(&path)?,
        None => AnalysisConfig::from_env_or_default()?,
    };
    Ok(config)
}

fn run_capacity(csv: PathBuf, json: bool) -> Result<()> {
    let Batch { items, errors } = newton_import::read_vacancy_csv(&csv)?;
    let calculator = CapacityCalculator::new(load_config(None)?.capacity);
    let summaries = calculator.summarize_all(&items);
    let team = calculator.team_summary(&summaries);

    if json {
        let output = CapacityOutput {
            recruiters: &summaries,
            team,
            errors: &errors,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for summary in &summaries {
        println!(
            "{:<24} {:>6.1}%  {:<14} {}",
            summary.name,
            summary.percentage,
            summary.status.to_string(),
            summary.headroom.message()
        );
    }
    match team {
        Some(team) => println!(
            "\nTeam: {} recruiters, average {:.1}% ({})",
            team.recruiters, team.average_percentage, team.health
        ),
        None => println!("No vacancies found."),
    }
    print_row_errors(&errors);
    Ok(())
}

fn run_squad(
    csv: PathBuf,
    formation: Option<String>,
    top: usize,
    config: Option<PathBuf>,
    league: Option<(PathBuf, String)>,
    json: bool,
) -> Result<()> {
    let Batch { items, errors } = newton_import::read_squad_csv(&csv)?;
    let mut evaluator =
        SquadEvaluator::new(load_config(config)?).context("Invalid catalog in config")?;
    if let Some((path, division)) = league {
        evaluator = evaluator.with_league(LeagueBaselines::from_path(&path)?, division);
    }
    let today = chrono::Local::now().date_naive();
    let report = evaluator.analyze(&items, today);

    let builder = LineupBuilder::new(evaluator.config());
    let lineups = match formation.as_deref() {
        Some(name) => vec![builder.build(evaluator.formations().find(name)?, &report.players)],
        None => builder.rank_formations(evaluator.formations(), &report.players, top),
    };

    if json {
        let output = SquadOutput {
            report: &report,
            lineups: &lineups,
            errors: &errors,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(division) = &report.division {
        println!("Compared against {}", division);
        if report.low_sample_division {
            println!("  (few players in this division; league figures are rough)");
        }
    }
    println!("Players ({})", report.players.len());
    for analysis in &report.players {
        print_player(analysis);
    }
    for lineup in &lineups {
        print_lineup(lineup);
    }
    print_row_errors(&errors);
    Ok(())
}

fn run_baselines(csv: PathBuf, out: PathBuf) -> Result<()> {
    let Batch { items, errors } = newton_import::read_wage_csv(&csv)?;
    let baselines = LeagueBaselines::generate(&items);
    std::fs::write(&out, baselines.to_json_string()?)
        .with_context(|| format!("Failed to write baselines: {}", out.display()))?;
    println!(
        "{} baselines for {} divisions written to {}",
        baselines.baselines.len(),
        baselines.division_metadata.len(),
        out.display()
    );
    print_row_errors(&errors);
    Ok(())
}

fn print_player(analysis: &PlayerAnalysis) {
    let best = analysis
        .best_role()
        .map(|r| format!("{} {:.1} {}", r.display_name, r.score, r.verdict))
        .unwrap_or_else(|| "no playable role".to_string());
    println!(
        "  {:<24} {:<3} {:<40} index {:>6.1}  {}",
        analysis.player.name,
        analysis.category.to_string(),
        best,
        analysis.performance_index,
        analysis.advice.message()
    );
    if let Some(league) = &analysis.league {
        let indicator = league.indicator.map(|i| i.label()).unwrap_or("");
        println!(
            "      league value {:.1}, wage percentile {:.0} vs {} {}",
            league.value_score, league.wage_percentile, league.baseline_position, indicator
        );
    }
    for change in &analysis.recommendations {
        println!(
            "      consider {} -> {} ({:.1} -> {:.1})",
            change.from, change.to, change.current_score, change.suggested_score
        );
    }
}

fn print_lineup(lineup: &FormationXI) {
    println!("\n{} (total {:.1})", lineup.formation, lineup.total_score);
    for starter in &lineup.starters {
        println!(
            "  {:<3} {:<12} {:<24} {:>5.1} {}",
            starter.position.to_string(),
            starter.role,
            starter.player,
            starter.score,
            starter.verdict
        );
    }
    if !lineup.bench.is_empty() {
        let names: Vec<&str> = lineup.bench.iter().map(|b| b.player.as_str()).collect();
        println!("  Bench: {}", names.join(", "));
    }
    for gap in &lineup.gaps {
        println!("  Gap: {:?}", gap);
    }
}

fn print_row_errors(errors: &[newton_core::RowError]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("\n{} row(s) skipped:", errors.len());
    for error in errors {
        eprintln!("  {}", error);
    }
}
