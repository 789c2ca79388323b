use crate::output::{print_json, print_table};
use lookback_core::config::Config;

pub fn run(config: &Config, json: bool) -> anyhow::Result<()> {
    if json {
        let entries: Vec<_> = config
            .reviews
            .iter()
            .map(|(name, review)| {
                serde_json::json!({
                    "name": name,
                    "mode": review.selection.describe(),
                    "save_area": review.save_area,
                })
            })
            .collect();
        print_json(&entries)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = config
        .reviews
        .iter()
        .map(|(name, review)| {
            vec![
                name.clone(),
                review.selection.describe(),
                review.save_area.clone(),
            ]
        })
        .collect();
    print_table(&["NAME", "MODE", "SAVE AREA"], rows);
    Ok(())
}
