//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
const PROJECT_FILES: [&str; 2] = ["cine-sleuth.toml", ".cine-sleuth.toml"];

/// Prefix of environment overrides, e.g. `CINE_SLEUTH_GAME__MAX_ROUNDS=10`.
pub const ENV_PREFIX: &str = "CINE_SLEUTH_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CINE_SLEUTH_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./cine-sleuth.toml` or `./.cine-sleuth.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/cine-sleuth/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();

        Self::figment(global.as_deref(), project.as_deref(), config_path.map(PathBuf::as_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Defaults plus the given files, lowest priority first.
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        for path in [global, project, explicit].into_iter().flatten() {
            figment = figment.merge(Toml::file(path));
        }
        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/cine-sleuth/config.toml if set,
    /// otherwise falls back to ~/.config/cine-sleuth/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cine-sleuth").join("config.toml"))
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
        println!("  [     ] Env:     {}*", ENV_PREFIX);

        // Project config
        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./cine-sleuth.toml or ./.cine-sleuth.toml");
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
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.game.max_rounds, 20);
        assert_eq!(config.oracle.model, "gemini-2.0-flash");
        assert!(config.transcript.enabled);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("cine-sleuth"));
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(
            &global,
            "[game]\nmax_rounds = 10\n\n[oracle]\nmodel = \"gemini-1.5-pro\"\n",
        )
        .unwrap();
        fs::write(&explicit, "[game]\nmax_rounds = 5\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(Some(&global), None, Some(&explicit))
            .extract()
            .unwrap();

        assert_eq!(config.game.max_rounds, 5);
        assert_eq!(config.oracle.model, "gemini-1.5-pro");
        assert_eq!(config.oracle.timeout_secs, 60);
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config: FileConfig = ConfigLoader::figment(None, None, Some(&missing))
            .extract()
            .unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[game]\nmax_rounds = \"many\"\n").unwrap();

        let result: Result<FileConfig, _> = ConfigLoader::figment(None, None, Some(&path)).extract();
        assert!(result.is_err());
    }
}
