//! Audit runtime configuration.
use std::env;
use std::path::PathBuf;

use sheet_core::ValidationMode;

/// Settings read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditConfig {
    /// Directory holding the catalog tables and `rules.toml`.
    pub content_dir: PathBuf,
    pub mode: ValidationMode,
    /// Pretty-print repaired records.
    pub pretty: bool,
}

impl AuditConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SHEET_CONTENT_DIR` - Content directory (default: platform data dir)
    /// - `SHEET_AUDIT_MODE` - `report` or `repair` (default: report)
    /// - `SHEET_PRETTY` - Pretty-print repaired JSON (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let content_dir = lookup("SHEET_CONTENT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_content_dir);

        let mode = match lookup("SHEET_AUDIT_MODE") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "unknown SHEET_AUDIT_MODE, using report");
                ValidationMode::Report
            }),
            None => ValidationMode::default(),
        };

        let pretty = read_value::<bool>(lookup("SHEET_PRETTY")).unwrap_or(true);

        Self {
            content_dir,
            mode,
            pretty,
        }
    }
}

/// Platform data directory for shipped content.
///
/// - Linux: `~/.local/share/sheet` (or `$XDG_DATA_HOME/sheet`)
/// - macOS: `~/Library/Application Support/sheet`
/// - Windows: `%APPDATA%\sheet`
/// - Fallback: `./data`
fn default_content_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "sheet")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}

fn read_value<T>(raw: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    raw?.parse().ok()
}
