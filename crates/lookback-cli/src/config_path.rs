use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "lookback.json";

/// Resolve the config file path.
///
/// Priority:
/// 1. `--config` flag / `LOOKBACK_CONFIG` env var (passed in as `explicit`)
/// 2. `./lookback.json` in the current directory
/// 3. `~/.config/lookback/lookback.json`
///
/// Falls back to the current-directory path so the "not found" error names
/// the most likely place to create it.
pub fn resolve(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return local;
    }

    if let Some(home) = home::home_dir() {
        let user = home.join(".config/lookback").join(CONFIG_FILE);
        if user.exists() {
            return user;
        }
    }

    local
}
