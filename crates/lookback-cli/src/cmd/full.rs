use chrono::{Duration, Local};
use lookback_core::checklist;
use lookback_core::config::Config;
use std::io::{self, Write};

/// Walk the fixed review checklist. Each step prints its guidance, opens the
/// relevant Things view when it has one, and waits for Enter. No selection
/// logic and no writes; the checklist only navigates.
pub fn run(config: &Config, dry_run: bool) -> anyhow::Result<()> {
    let steps = checklist::steps(&config.gtd);
    println!("FULL REVIEW: {} steps. Ctrl+C quits at any time.", steps.len());

    for (idx, step) in steps.iter().enumerate() {
        println!("\n=== STEP {}/{}: {} ===", idx + 1, steps.len(), step.title);
        for line in step.guidance {
            println!("  - {line}");
        }
        if let Some(view) = &step.view {
            let url = view.url();
            if dry_run {
                println!("  -> {url}");
            } else {
                // Best effort; the checklist continues even if nothing opens.
                let _ = open::that(&url);
            }
        }
        wait_for_enter()?;
    }

    let next = Local::now().date_naive()
        + Duration::days(i64::from(config.gtd.review_frequency_days));
    println!(
        "\nReview complete. Next scheduled review: {}",
        next.format("%A, %B %d")
    );
    Ok(())
}

fn wait_for_enter() -> io::Result<()> {
    print!("Press Enter to continue... ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(())
}
