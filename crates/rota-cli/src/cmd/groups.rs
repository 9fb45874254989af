use crate::output::print_json;
use anyhow::Context;
use rota_core::{group, Settings};

pub fn list(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let groups = group::list_groups(settings).context("failed to list groups")?;

    if json {
        return print_json(&serde_json::json!({ "groups": groups }));
    }

    if groups.is_empty() {
        println!("No groups found in config directory");
        return Ok(());
    }
    println!("Available groups:");
    for g in &groups {
        println!("  {g}");
    }
    Ok(())
}
