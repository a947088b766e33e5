use serde::Deserialize;

const DEFAULT_PROMPT_NAME: &str = "mysh";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UiConfigSection {
    pub prompt_name: Option<String>,
    pub color: Option<bool>,
}

impl UiConfigSection {
    pub fn prompt_name(&self) -> &str {
        self.prompt_name.as_deref().unwrap_or(DEFAULT_PROMPT_NAME)
    }

    pub fn color(&self) -> bool {
        self.color.unwrap_or(true)
    }
}
