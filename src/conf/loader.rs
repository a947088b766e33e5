use super::model::ConfigurationModel;
use super::paths::resolve_config_path;
use std::fs;
use std::path::PathBuf;

/// Load the user's configuration file, falling back to defaults when absent or invalid.
pub fn load() -> ConfigurationModel {
    match resolve_config_path() {
        Some(path) => load_from(path),
        None => ConfigurationModel::default(),
    }
}

/// Load configuration from an explicit path, warning on stderr when it is unusable.
pub fn load_from(path: PathBuf) -> ConfigurationModel {
    match fs::read_to_string(&path) {
        Ok(contents) => match serde_yaml::from_str::<ConfigurationModel>(&contents) {
            Ok(mut cfg) => {
                cfg.set_source_path(path);
                return cfg;
            }
            Err(err) => {
                eprintln!(
                    "Warning: unable to parse config file '{}': {err}",
                    path.display()
                );
            }
        },
        Err(err) => {
            eprintln!(
                "Warning: unable to read config file '{}': {err}",
                path.display()
            );
        }
    }

    ConfigurationModel::default()
}
