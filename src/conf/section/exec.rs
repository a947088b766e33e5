use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExecConfigSection {
    pub discard_background_output: Option<bool>,
}

impl ExecConfigSection {
    /// Send a detached command's standard output to `/dev/null`.
    pub fn discard_background_output(&self) -> bool {
        self.discard_background_output.unwrap_or(true)
    }
}
