use super::group_error;
use crate::output::print_json;
use rota_core::Settings;

pub fn run(settings: &Settings, group: &str, dry_run: bool, json: bool) -> anyhow::Result<()> {
    // Nothing is printed until the commit has succeeded, so a failed write
    // never leaves the caller believing someone was assigned.
    let assignment = rota_core::assign(settings, group, dry_run).map_err(group_error)?;

    if json {
        return print_json(&assignment);
    }

    if assignment.dry_run {
        println!("[DRY RUN] Would assign to: {}", assignment.user);
    } else {
        println!("{}", assignment.user);
    }
    Ok(())
}
