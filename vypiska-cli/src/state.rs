use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$VYPISKA_HOME`, or `~/.vypiska`.
pub fn vypiska_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("VYPISKA_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".vypiska"))
}

pub fn ensure_vypiska_home() -> Result<PathBuf> {
    let dir = vypiska_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
