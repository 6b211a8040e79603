//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "agenda-vote";
const PROJECT_FILES: [&str; 2] = ["agenda.toml", ".agenda.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./agenda.toml` or `./.agenda.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/agenda-vote/config.toml`
    /// 4. Fallback: `~/.config/agenda-vote/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();
        Self::load_from(global.as_deref(), project.as_deref(), config_path.map(PathBuf::as_path))
    }

    /// Merge the given files over the defaults, lowest priority first
    ///
    /// An explicit path that does not exist is an error; the other two are
    /// expected to be checked by the caller.
    pub fn load_from(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global {
            debug!("Merging global config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project {
            debug!("Merging project config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            debug!("Merging explicit config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/agenda-vote/config.toml if set,
    /// otherwise falls back to ~/.config/agenda-vote/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        // Project config
        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./agenda.toml or ./.agenda.toml");
        }

        // Global config
        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_application::TallyFreeze;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(!config.agenda.post_phase);
        assert_eq!(config.agenda.other_outcome_slots, 2);
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("agenda-vote"));
    }

    #[test]
    fn test_load_from_no_files_is_default() {
        let config = ConfigLoader::load_from(None, None, None).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_later_sources_override_earlier() {
        let global = toml_file(
            r#"
[agenda]
post_phase = true
other_outcome_slots = 5

[output]
color = false
"#,
        );
        let project = toml_file(
            r#"
[agenda]
tally_freeze = "vote_start"
other_outcome_slots = 3
"#,
        );
        let explicit = toml_file(
            r#"
[agenda]
other_outcome_slots = 1
"#,
        );

        let config = ConfigLoader::load_from(
            Some(global.path()),
            Some(project.path()),
            Some(explicit.path()),
        )
        .unwrap();

        assert!(config.agenda.post_phase);
        assert_eq!(config.agenda.tally_freeze, TallyFreeze::VoteStart);
        assert_eq!(config.agenda.other_outcome_slots, 1);
        assert!(!config.output.color);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = ConfigLoader::load_from(None, None, Some(Path::new("/nonexistent/agenda.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let file = toml_file(
            r#"
[output]
format = "yaml"
"#,
        );
        assert!(ConfigLoader::load_from(None, None, Some(file.path())).is_err());
    }
}
