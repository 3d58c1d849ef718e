use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Environment variable that relocates the Claude data directory
pub const CLAUDE_CONFIG_DIR_ENV: &str = "CLAUDE_CONFIG_DIR";

/// Get the Claude directory path (`$CLAUDE_CONFIG_DIR`, else `~/.claude`)
pub fn get_claude_dir() -> Result<PathBuf> {
    resolve_claude_dir(env::var(CLAUDE_CONFIG_DIR_ENV).ok(), env::var("HOME").ok())
}

fn resolve_claude_dir(config_dir: Option<String>, home: Option<String>) -> Result<PathBuf> {
    if let Some(dir) = config_dir.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    match home.filter(|h| !h.trim().is_empty()) {
        Some(home) => Ok(PathBuf::from(home).join(".claude")),
        None => bail!("HOME environment variable not set"),
    }
}
