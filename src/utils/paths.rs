use std::borrow::Cow;
use std::env;
use std::path::Path;

/// Session id of a log file: its file name without the `.jsonl` extension
pub fn session_id_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    if stem.is_empty() { None } else { Some(stem.into_owned()) }
}

/// Expands a leading `~` to the home directory, if one is known
pub fn expand_tilde(value: &str) -> Cow<'_, str> {
    match (value.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) => Cow::Owned(format!("{}{}", home.to_string_lossy(), rest)),
        _ => Cow::Borrowed(value),
    }
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &str) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &str, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref()).filter(|h| !h.is_empty());

    if let Some(home) = home
        && let Some(rest) = path.strip_prefix(home)
        && (rest.is_empty() || rest.starts_with('/'))
    {
        return format!("~{}", rest);
    }

    path.to_string()
}
