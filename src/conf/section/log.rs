use serde::Deserialize;

const DEFAULT_LEVEL: &str = "warn";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogConfigSection {
    pub level: Option<String>,
}

impl LogConfigSection {
    /// Filter directive used when `MYSH_LOG` is unset.
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LEVEL)
    }
}
