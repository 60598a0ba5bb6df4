use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Print no-records / unable-to-resolve diagnostics on stderr.
    #[serde(default)]
    pub verbose: bool,

    /// Results are echoed to this file in addition to stdout.
    #[serde(default)]
    pub file: Option<String>,
}
