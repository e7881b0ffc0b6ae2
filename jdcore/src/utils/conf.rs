//! Solver configuration, stored as TOML.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    magic::{DEFAULT_DEPTH_BOUND, DEFAULT_RENDER_WIDTH, ENV_SOLVE_CONFIG_PATH},
    utils::error::{JdError, JdResult},
};

/// Knobs of the solve step. Missing keys take their default value.
///
/// ```
/// use jdcore::utils::conf::SolveConfig;
///
/// let conf = SolveConfig::from_toml_str("depth_bound = 8").unwrap();
/// assert_eq!(conf.depth_bound, 8);
/// assert_eq!(conf.attempt_budget, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolveConfig {
    /// Maximum height of a proof tree found by the search.
    pub depth_bound: usize,
    /// Optional cap on the number of rule applications tried per search.
    pub attempt_budget: Option<usize>,
    /// Target line width when rendering proofs.
    pub render_width: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            depth_bound: DEFAULT_DEPTH_BOUND,
            attempt_budget: None,
            render_width: DEFAULT_RENDER_WIDTH,
        }
    }
}

impl SolveConfig {
    pub fn with_depth_bound(mut self, depth_bound: usize) -> Self {
        self.depth_bound = depth_bound;
        self
    }

    pub fn with_attempt_budget(mut self, attempt_budget: usize) -> Self {
        self.attempt_budget = Some(attempt_budget);
        self
    }

    pub fn with_render_width(mut self, render_width: usize) -> Self {
        self.render_width = render_width;
        self
    }

    /// Get the default path to the solver configuration file.
    pub fn default_path() -> PathBuf {
        // Check if the environment variable is set
        if let Ok(config_path) = std::env::var(ENV_SOLVE_CONFIG_PATH) {
            return config_path.into();
        }

        let mut path = PathBuf::new();

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                path.push(appdata);
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                path.push(xdg_config_home);
            } else if let Ok(home) = std::env::var("HOME") {
                path.push(home);
                path.push(".config");
            }
        }

        path.push("jdsolve");
        path.push("solve.toml");
        path
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(toml_str: &str) -> JdResult<Self> {
        toml::from_str(toml_str).map_err(|e| JdError::ConfigParseError {
            source: e,
            file: "<string>".to_string(),
        })
    }

    /// Load a configuration from a TOML file.
    pub fn load_from_toml(path: &Path) -> JdResult<Self> {
        let toml_str = std::fs::read_to_string(path)?;

        toml::from_str(&toml_str).map_err(|e| JdError::ConfigParseError {
            source: e,
            file: path.display().to_string(),
        })
    }

    /// Load from [`SolveConfig::default_path`], falling back to the defaults
    /// when no file exists there.
    pub fn load_or_default() -> JdResult<Self> {
        let path = Self::default_path();
        if !path.exists() {
            log::debug!(
                "No solver configuration at `{}`, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_toml(&path)
    }

    /// Save the configuration to a TOML file.
    pub fn save_to_toml(&self, path: &Path) -> JdResult<()> {
        let toml_str = toml::to_string(self).map_err(|e| JdError::ConfigSerializeError {
            source: e,
            file: path.display().to_string(),
        })?;

        // Attempt to create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(SolveConfig::from_toml_str("").unwrap(), SolveConfig::default());
        assert_eq!(SolveConfig::default().depth_bound, 5);
    }

    #[test]
    fn all_keys_are_read() {
        let conf = SolveConfig::from_toml_str(
            r#"
            depth_bound = 3
            attempt_budget = 100
            render_width = 40
            "#,
        )
        .unwrap();
        assert_eq!(
            conf,
            SolveConfig::default()
                .with_depth_bound(3)
                .with_attempt_budget(100)
                .with_render_width(40)
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = SolveConfig::from_toml_str("depth = 3").unwrap_err();
        assert!(matches!(err, JdError::ConfigParseError { .. }));
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("jdcore-conf-{}", std::process::id()));
        let path = dir.join("nested").join("solve.toml");
        let conf = SolveConfig::default().with_attempt_budget(7);

        conf.save_to_toml(&path).unwrap();
        assert_eq!(SolveConfig::load_from_toml(&path).unwrap(), conf);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SolveConfig::load_from_toml(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, JdError::IoError(_)));
    }
}
