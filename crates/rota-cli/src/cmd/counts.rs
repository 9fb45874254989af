use super::group_error;
use crate::output::print_json;
use anyhow::Context;
use rota_core::Settings;

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

pub fn show(settings: &Settings, group: &str, json: bool) -> anyhow::Result<()> {
    let counts = rota_core::get_counts(settings, group)
        .map_err(group_error)
        .context("failed to get counts")?;

    if json {
        return print_json(&counts);
    }

    println!("Assignment counts for group {group}:");
    for user in &counts.users {
        let n = counts.counts.get(user).copied().unwrap_or(0);
        println!("  {user}: {n}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// reset
// ---------------------------------------------------------------------------

pub fn reset(settings: &Settings, group: &str, json: bool) -> anyhow::Result<()> {
    rota_core::reset_counts(settings, group)
        .map_err(group_error)
        .context("failed to reset counts")?;

    if json {
        return print_json(&serde_json::json!({ "group": group, "reset": true }));
    }
    println!("Successfully reset assignment counts for group {group}");
    Ok(())
}
