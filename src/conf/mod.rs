mod loader;
mod model;
mod paths;
pub mod section;

pub use loader::{load, load_from};
pub use model::ConfigurationModel;
pub use paths::{expand_path, home_dir};
