use super::super::model::ConfigurationModel;
use crate::conf::home_dir;
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_HISTORY_FILE: &str = ".mysh_history";
const DEFAULT_HISTORY_LIMIT: usize = 1024;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct HistoryConfigSection {
    pub enabled: Option<bool>,
    pub file: Option<String>,
    pub limit: Option<usize>,
}

impl HistoryConfigSection {
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Number of entries preloaded into the line editor.
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    /// History file location, or `None` when history is disabled or `HOME` is unknown.
    pub fn resolved_file(&self, config: &ConfigurationModel) -> Option<PathBuf> {
        if !self.enabled() {
            return None;
        }
        match self.file.as_ref() {
            Some(raw) => Some(config.resolve_path(raw)),
            None => home_dir().map(|home| home.join(DEFAULT_HISTORY_FILE)),
        }
    }
}
