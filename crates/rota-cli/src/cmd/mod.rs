pub mod assign;
pub mod counts;
pub mod groups;
pub mod version;

use rota_core::RotaError;

/// Convert a core error, pointing the user at `--list-groups` when the
/// group name did not match any config file.
pub fn group_error(e: RotaError) -> anyhow::Error {
    if e.is_missing_group() {
        anyhow::anyhow!("{e}\nUse --list-groups to see available groups")
    } else {
        e.into()
    }
}
