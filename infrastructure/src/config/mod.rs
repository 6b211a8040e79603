//! Configuration file loading for agenda-vote
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./agenda.toml` or `./.agenda.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/agenda-vote/config.toml`
//! 4. Fallback: `~/.config/agenda-vote/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgendaConfig, FileConfig, FileOutputConfig, FileOutputFormat,
};
pub use loader::ConfigLoader;
