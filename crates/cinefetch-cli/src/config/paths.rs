//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Application directory name under the config home.
const APP_DIR: &str = "cinefetch";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// Lookup order: `{dir}/config.toml`, `$XDG_CONFIG_HOME/cinefetch/config.toml`,
/// `~/.config/cinefetch/config.toml`.
///
/// # Errors
///
/// Returns an error if no `dir` is given and neither `XDG_CONFIG_HOME` nor
/// `HOME` is set.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    config_path_from(dir.map(PathBuf::as_path), xdg.as_deref(), home.as_deref())
}

/// Picks the config path from explicit inputs. Empty variables count as unset.
fn config_path_from(dir: Option<&Path>, xdg: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    if let Some(x) = xdg.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(x.join(APP_DIR).join(CONFIG_FILE));
    }
    match home.filter(|p| !p.as_os_str().is_empty()) {
        Some(h) => Ok(h.join(".config").join(APP_DIR).join(CONFIG_FILE)),
        None => bail!("cannot locate config: neither XDG_CONFIG_HOME nor HOME is set"),
    }
}
