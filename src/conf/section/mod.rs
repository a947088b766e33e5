mod exec;
mod history;
mod log;
mod ui;

pub use exec::ExecConfigSection;
pub use history::HistoryConfigSection;
pub use log::LogConfigSection;
pub use ui::UiConfigSection;
