use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::{Duration, Local};
use lookback_core::config::Config;
use lookback_core::runner;
use lookback_core::things::ThingsStore;
use std::path::Path;

pub fn run(
    config: &Config,
    db: Option<&Path>,
    name: &str,
    limit: Option<i64>,
    dry_run: bool,
    json: bool,
) -> anyhow::Result<()> {
    let db_path = match db {
        Some(p) => p.to_path_buf(),
        None => ThingsStore::default_db_path()?,
    };
    let store = ThingsStore::open(&db_path, dry_run)
        .with_context(|| format!("failed to open Things database at {}", db_path.display()))?;

    let today = Local::now().date_naive();
    let outcome = runner::run_review(&store, config, name, limit, today)?;

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    if json {
        print_json(&serde_json::json!({
            "title": outcome.document.title,
            "save_area": outcome.document.save_area,
            "dry_run": dry_run,
            "projects": outcome.selected,
        }))?;
        return Ok(());
    }

    let verb = if dry_run { "Prepared" } else { "Created" };
    println!(
        "{verb} review '{}' with {} project(s) in area {}",
        outcome.document.title,
        outcome.selected.len(),
        outcome.document.save_area
    );

    if !outcome.selected.is_empty() {
        let rows: Vec<Vec<String>> = outcome
            .selected
            .iter()
            .enumerate()
            .map(|(i, state)| {
                vec![
                    (i + 1).to_string(),
                    state.project.title.clone(),
                    state
                        .last_reviewed
                        .map(|t| t.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "never".to_string()),
                ]
            })
            .collect();
        print_table(&["#", "PROJECT", "LAST REVIEWED"], rows);
    }

    let next = today + Duration::days(i64::from(config.gtd.review_frequency_days));
    println!("\nNext scheduled review: {}", next.format("%A, %B %d"));
    Ok(())
}
