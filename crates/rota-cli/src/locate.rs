use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

/// Resolve the process configuration file.
///
/// Priority:
/// 1. `--config` flag / `AUTOASSIGNER_CONFIG` env var (passed in as `explicit`)
/// 2. `config.json` in the current directory, if present
/// 3. `~/.config/autoassigner/config.json`, if present
/// 4. Fall back to `config.json` in the current directory
pub fn resolve_config(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let local = cwd.join(CONFIG_FILE);
    if local.is_file() {
        return local;
    }

    if let Some(user) = user_config(home::home_dir().as_deref()) {
        if user.is_file() {
            return user;
        }
    }

    local
}

fn user_config(home: Option<&Path>) -> Option<PathBuf> {
    home.map(|h| h.join(".config").join("autoassigner").join(CONFIG_FILE))
}
