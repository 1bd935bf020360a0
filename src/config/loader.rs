//! Settings file loader.
//!
//! Settings are TOML. Missing keys fall back to defaults, so an empty file
//! is valid. A settings file may declare its own module graph:
//!
//! ```toml
//! prefix = "ex"
//! output_dir = "module-playground"
//!
//! [[modules]]
//! name = "configfs"
//! provides = ["config_group_init"]
//!
//! [[modules]]
//! name = "target_core_mod"
//! calls = ["config_group_init"]
//! ```

use crate::config::GeneratorSettings;
use crate::error::{GenError, Result};
use std::fs;
use std::path::Path;

/// Load settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<GeneratorSettings> {
    validate_config_path(path)?;

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GenError::Config(format!("Settings file not found at: {}", path.display()))
        } else {
            GenError::io(path, e)
        }
    })?;

    let settings = parse_settings(&content)?;
    log::debug!(
        "[Config] loaded {} ({} custom modules)",
        path.display(),
        settings.modules.len()
    );
    Ok(settings)
}

/// Parse settings from a TOML string.
pub fn parse_settings(content: &str) -> Result<GeneratorSettings> {
    let settings: GeneratorSettings = toml::from_str(content)?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Reject settings that would produce unusable file names.
///
/// The prefix, the recipe file and every custom module name end up as a
/// single path component inside the output directory.
pub fn validate_settings(settings: &GeneratorSettings) -> Result<()> {
    check_bare_name("prefix", &settings.prefix)?;
    check_bare_name("recipe_file", &settings.recipe_file)?;
    for m in &settings.modules {
        if m.name.is_empty() {
            return Err(GenError::Config(format!(
                "module with empty name in custom graph (provides {:?})",
                m.provides
            )));
        }
        check_bare_name("module name", &m.name)?;
    }
    Ok(())
}

fn check_bare_name(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(GenError::Config(format!("{} cannot be empty", what)));
    }
    if value.contains(['/', '\\']) || value == ".." {
        return Err(GenError::Config(format!(
            "{} must be a bare file name: {}",
            what, value
        )));
    }
    Ok(())
}

/// Validate settings path (.toml extension required).
pub fn validate_config_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(GenError::Config(
            "Settings path cannot be empty".to_string(),
        ));
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Ok(()),
        _ => Err(GenError::Config(format!(
            "Settings file must have .toml extension: {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_empty_settings_are_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, GeneratorSettings::default());
    }

    #[test]
    fn test_parse_custom_graph() {
        let settings = parse_settings(
            r#"
prefix = "fake"
output_dir = "out"

[[modules]]
name = "configfs"
provides = ["config_group_init"]

[[modules]]
name = "target_core_mod"
calls = ["config_group_init"]
int_calls = ["qlt_stop_phase2"]
"#,
        )
        .unwrap();
        assert_eq!(settings.prefix, "fake");
        assert_eq!(settings.recipe_file, "gen_mod.mak");
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.modules.len(), 2);
        assert_eq!(settings.modules[1].calls, vec!["config_group_init"]);
        assert_eq!(settings.modules[1].int_calls, vec!["qlt_stop_phase2"]);
        assert!(settings.modules[0].calls.is_empty());
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_settings("prefix = [").unwrap_err();
        assert!(matches!(err, GenError::ConfigParse(_)));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        assert!(parse_settings(r#"prefix = """#).is_err());
        assert!(parse_settings(r#"recipe_file = "sub/gen.mak""#).is_err());
    }

    #[test]
    fn test_names_cannot_leave_output_dir() {
        assert!(parse_settings(r#"prefix = "../ex""#).is_err());
        assert!(parse_settings(r#"prefix = "sub/ex""#).is_err());
        assert!(parse_settings("[[modules]]\nname = \"../../etc/x\"\n").is_err());
        assert!(parse_settings("[[modules]]\nname = \"dm-mod\"\n").is_ok());
        assert!(parse_settings(r#"prefix = "fake.v2""#).is_ok());
    }

    #[test]
    fn test_validate_config_path() {
        assert!(validate_config_path(Path::new("modgen.toml")).is_ok());
        assert!(validate_config_path(Path::new("modgen.json")).is_err());
        assert!(validate_config_path(Path::new("")).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_settings(&temp_dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, GenError::Config(_)));
    }

    #[test]
    fn test_load_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("modgen.toml");
        fs::write(&path, "license = \"GPL v2\"\n").unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.license, "GPL v2");
        assert_eq!(settings.prefix, "ex");
    }
}
