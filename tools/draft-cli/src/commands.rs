//! Subcommand implementations

use anyhow::{bail, Context, Result};
use colored::*;
use franchise_registry::{draw_franchises, find_franchise, validate_complete_lineup, LineupPick};
use lineup_scoring::{LineupScore, LineupScorer, ScoringConfig, Snapshot};
use run_ledger::{BenchmarkScope, LedgerConfig, LocalRunStore, RunRecord, RunStore};
use std::path::{Path, PathBuf};
use tracing::info;

/// Read a lineup file: a JSON array of picks
pub fn read_lineup(path: &Path) -> Result<Vec<LineupPick>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read lineup file {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid lineup JSON in {:?}", path))
}

/// `global` or a group code
pub fn parse_scope(scope: Option<&str>) -> BenchmarkScope {
    match scope.map(str::trim) {
        None | Some("") => BenchmarkScope::Global,
        Some(s) if s.eq_ignore_ascii_case("global") => BenchmarkScope::Global,
        Some(group) => BenchmarkScope::Group(group.to_string()),
    }
}

fn open_ledger(dir: Option<PathBuf>) -> Result<LocalRunStore> {
    let mut config = LedgerConfig::from_env();
    if let Some(dir) = dir {
        config.data_dir = dir;
    }
    LocalRunStore::open(config).context("Failed to open run ledger")
}

pub struct ScoreArgs {
    pub lineup: PathBuf,
    pub snapshot: PathBuf,
    pub config: Option<PathBuf>,
    pub record: bool,
    pub group: Option<String>,
    pub seed: Option<u64>,
    pub ledger: Option<PathBuf>,
}

pub async fn score(args: ScoreArgs) -> Result<()> {
    let picks = read_lineup(&args.lineup)?;
    let snapshot = Snapshot::load(&args.snapshot)
        .with_context(|| format!("Failed to load roster snapshot {:?}", args.snapshot))?;
    let config = ScoringConfig::load(args.config.as_deref()).context("Failed to load scoring configuration")?;

    let result = LineupScorer::new(&config).score_lineup(&snapshot, &picks);
    print_score(&result);

    if args.record {
        validate_complete_lineup(&picks, snapshot.registry()).context("Only completed drafts can be recorded")?;

        let store = open_ledger(args.ledger)?;
        let record = RunRecord::from_result(&result, args.group.as_deref(), args.seed);
        let share_code = record.share_code.clone();
        let scope = record
            .group_code
            .clone()
            .map(BenchmarkScope::Group)
            .unwrap_or(BenchmarkScope::Global);

        store.save_run(record).await.context("Failed to record run")?;
        info!("💾 Run recorded with share code {}", share_code);

        println!("\n{} {}", "Share code:".bold(), share_code.green().bold());
        if let Some(average) = store.average_score(&scope).await? {
            println!("{} {:.1}", "Benchmark average:".bold(), average);
        }
    }

    Ok(())
}

fn print_score(result: &LineupScore) {
    println!("{}", "Lineup".bold().underline());
    for player in &result.player_scores {
        let line = format!(
            "  {:<2}  {:<28} {:<4} {:>6.1}",
            player.slot.as_str(),
            player.player_name,
            player.franchise_abbr,
            player.contribution
        );
        if player.is_penalty {
            println!("{} {}", line.red(), "(penalty)".red());
        } else if player.used_fallback {
            println!("{} {}", line, "(baseline)".yellow());
        } else {
            println!("{}", line);
        }
    }

    let chem = &result.chemistry;
    println!("\n{}", "Chemistry".bold().underline());
    println!("  role coverage     {:>6.1}", chem.role_coverage);
    println!("  complementarity   {:>6.1}", chem.complementarity);
    println!("  usage balance     {:>6.1}", chem.usage_balance);
    println!("  two-way balance   {:>6.1}", chem.two_way_balance);
    println!("  culture           {:>6.1}", chem.culture);
    println!("  score {:.1}, multiplier x{:.3}", chem.chemistry_score, chem.multiplier);

    println!("\n{} {:.1}", "Base score:".bold(), result.base_team_score);
    println!("{} {}", "Team score:".bold(), format!("{:.1}", result.team_score).green().bold());
    if result.used_fallback_stats {
        println!("{}", "Some players were scored from baseline profiles".yellow());
    }
}

pub fn draw(seed: u64, count: usize) -> Result<()> {
    if count == 0 {
        bail!("count must be at least 1");
    }
    println!("{} {}", "Seed".bold(), seed);
    for (i, franchise) in draw_franchises(seed, count).iter().enumerate() {
        println!("  {}. {} {}", i + 1, franchise.abbreviation.bold(), franchise.display_name);
    }
    Ok(())
}

pub fn roster(abbr: &str, snapshot: &Path) -> Result<()> {
    let franchise = find_franchise(abbr).with_context(|| format!("Unknown franchise {:?}", abbr))?;
    let snapshot =
        Snapshot::load(snapshot).with_context(|| format!("Failed to load roster snapshot {:?}", snapshot))?;
    let players = snapshot.registry().roster_by_team(franchise.abbreviation)?;

    println!("{} ({})", franchise.display_name.bold(), franchise.abbreviation);
    for player in players {
        let slots: Vec<&str> = player.eligible_positions.iter().map(|s| s.as_str()).collect();
        println!(
            "  {:<28} {:<10} {:<12} {} titles",
            player.name,
            slots.join("/"),
            player.years_with_team_label,
            player.championships
        );
    }
    Ok(())
}

pub async fn benchmark(scope: Option<&str>, top: Option<usize>, ledger: Option<PathBuf>) -> Result<()> {
    let store = open_ledger(ledger)?;
    let scope = parse_scope(scope);
    let summary = store.benchmark(&scope).await?;

    let label = match &scope {
        BenchmarkScope::Global => "global".to_string(),
        BenchmarkScope::Group(code) => format!("group {}", code),
    };
    println!("{} ({})", "Benchmark".bold(), label);
    match (summary.average_score, summary.best_score) {
        (Some(average), Some(best)) => {
            println!("  runs {}, average {:.1}, best {:.1}", summary.runs, average, best)
        }
        _ => println!("  no runs yet"),
    }

    let limit = top.unwrap_or(store.config().default_top_limit);
    for (i, run) in store.top_runs(&scope, limit).await?.iter().enumerate() {
        println!(
            "  {:>2}. {:>6.1}  {}  {}",
            i + 1,
            run.final_score,
            run.share_code,
            run.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

pub async fn show(share_code: &str, ledger: Option<PathBuf>) -> Result<()> {
    let store = open_ledger(ledger)?;
    let run = store
        .find_by_share_code(share_code)
        .await?
        .with_context(|| format!("No run with share code {:?}", share_code))?;

    println!("{} {} ({:.1})", "Run".bold(), run.share_code, run.final_score);
    for pick in &run.picks {
        let marker = if pick.is_penalty { " (penalty)" } else { "" };
        println!(
            "  {:<2}  {:<28} {:<4} {:>6.1}{}",
            pick.slot.as_str(),
            pick.player_name,
            pick.franchise_abbr,
            pick.contribution,
            marker
        );
    }
    Ok(())
}
