use std::path::PathBuf;

/// Runtime settings, read once from `STOREPICK_*` environment variables.
///
/// Unset or empty variables mean "use the default"; numeric values that don't
/// parse are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Batch input file. `None` reads stdin.
    pub input: Option<PathBuf>,
    /// Outcome lines destination. `None` writes stdout.
    pub output: Option<PathBuf>,
    /// Optional JSON summary report.
    pub report: Option<PathBuf>,
    pub metrics_port: Option<u16>,
    pub metrics_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let path = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };
        Self {
            input: path("STOREPICK_INPUT"),
            output: path("STOREPICK_OUTPUT"),
            report: path("STOREPICK_REPORT"),
            metrics_port: lookup("STOREPICK_METRICS_PORT").and_then(|s| s.trim().parse().ok()),
            metrics_file: path("STOREPICK_METRICS_FILE"),
        }
    }
}
