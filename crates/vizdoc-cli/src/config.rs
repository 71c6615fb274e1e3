//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use vizdoc::{VizdocError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for VizdocError {
    fn from(err: ConfigError) -> Self {
        VizdocError::Config(err.to_string())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigLocation {
    Explicit,
    Local,
    System,
}

impl ConfigLocation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Local => "local",
            Self::System => "system",
        }
    }
}

/// Path of the project-local configuration file.
const LOCAL_CONFIG: &str = "vizdoc/config.toml";

/// Picks the configuration file to load, if any.
///
/// An explicit path is returned even if it does not exist, so loading it
/// reports the missing file instead of silently using defaults.
fn discover_config(
    explicit_path: Option<&Path>,
    local_config: &Path,
    system_dir: Option<&Path>,
) -> Option<(ConfigLocation, PathBuf)> {
    // 1. The explicitly provided path wins unconditionally
    if let Some(path) = explicit_path {
        return Some((ConfigLocation::Explicit, path.to_path_buf()));
    }

    // 2. Then the project-local file
    if local_config.exists() {
        return Some((ConfigLocation::Local, local_config.to_path_buf()));
    }

    // 3. Then the platform-specific config directory
    let Some(system_dir) = system_dir else {
        debug!("Could not determine platform-specific config directory");
        return None;
    };
    let system_config = system_dir.join("config.toml");
    if system_config.exists() {
        return Some((ConfigLocation::System, system_config));
    }

    debug!(path = system_config.display().to_string(); "System configuration file not found");
    None
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (vizdoc/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or fails validation
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, VizdocError> {
    let proj_dirs = ProjectDirs::from("com", "vizdoc", "vizdoc");
    let found = discover_config(
        explicit_path.as_ref().map(|path| path.as_ref()),
        Path::new(LOCAL_CONFIG),
        proj_dirs.as_ref().map(ProjectDirs::config_dir),
    );

    let Some((location, path)) = found else {
        // 4. Nothing found, fall back to the defaults
        debug!("No configuration file found, using default configuration");
        return Ok(AppConfig::default());
    };

    info!(
        path = path.display().to_string(),
        location = location.as_str();
        "Loading configuration"
    );
    load_config_file(path)
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
/// - A fence tag is empty or contains whitespace
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, VizdocError> {
    let path = path.as_ref();

    // Check if file exists
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    // Read and parse TOML content
    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    // Settings serde cannot check on its own
    validate(&config)?;

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    for tag in config.extract().tags() {
        if tag.is_empty() || tag.contains(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "fence tag `{tag}` must be a single non-empty word"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use vizdoc::grammar::{GrammarHint, GrammarKind};

    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_full_config() {
        let (_dir, path) = write_config(
            r#"
            [assets]
            asset_dir = "vendor/js"
            template_dir = "my-templates"

            [extract]
            tags = ["mermaid", "diagram"]
            grammar = "plantuml"

            [style]
            mermaid_theme = "dark"
            title = "Architecture"
            "#,
        );

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.assets().asset_dir(), Path::new("vendor/js"));
        assert_eq!(
            config.assets().template_dir(),
            Some(Path::new("my-templates"))
        );
        assert_eq!(config.extract().tags(), ["mermaid", "diagram"]);
        assert_eq!(
            config.extract().grammar(),
            GrammarHint::Explicit(GrammarKind::PlantUml)
        );
        assert_eq!(config.style().title(), Some("Architecture"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let (_dir, path) = write_config("");
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.assets().asset_dir(), Path::new("static/js"));
        assert_eq!(config.extract().grammar(), GrammarHint::Auto);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, VizdocError::Config(_)));
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_invalid_grammar_is_parse_error() {
        let (_dir, path) = write_config("[extract]\ngrammar = \"svg\"\n");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML configuration"));
    }

    #[test]
    fn test_blank_fence_tag_is_validation_error() {
        let (_dir, path) = write_config("[extract]\ntags = [\"mermaid\", \"my tag\"]\n");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Validation error"));
        assert!(err.to_string().contains("`my tag`"));
    }

    #[test]
    fn test_discovery_order() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let local = dir.path().join("local.toml");
        let system_dir = dir.path().join("system");
        fs::create_dir(&system_dir).unwrap();

        let explicit = dir.path().join("absent.toml");
        assert_eq!(
            discover_config(Some(&explicit), &local, Some(&system_dir)),
            Some((ConfigLocation::Explicit, explicit.clone()))
        );

        assert_eq!(discover_config(None, &local, Some(&system_dir)), None);
        assert_eq!(discover_config(None, &local, None), None);

        fs::write(system_dir.join("config.toml"), "").unwrap();
        assert_eq!(
            discover_config(None, &local, Some(&system_dir)),
            Some((ConfigLocation::System, system_dir.join("config.toml")))
        );

        fs::write(&local, "").unwrap();
        assert_eq!(
            discover_config(None, &local, Some(&system_dir)),
            Some((ConfigLocation::Local, local.clone()))
        );
    }

    #[test]
    fn test_unknown_theme_is_accepted_at_load() {
        let (_dir, path) = write_config("[style]\nmermaid_theme = \"sparkly\"\n");
        let config = load_config(Some(&path)).unwrap();
        assert!(config.style().mermaid_theme().is_err());
    }
}
