use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub trait LoadableConfig: Sized + Default + for<'de> Deserialize<'de> {
    fn file_name() -> &'static str;

    fn load() -> Result<Self>
    where
        Self: Serialize,
    {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            Ok(default_config)
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content: String = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    fn save(&self) -> Result<()>
    where
        Self: Serialize,
    {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<()>
    where
        Self: Serialize,
    {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir: PathBuf = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("keytable").join(Self::file_name()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneratorConfig {
    pub codegen: CodegenConfig,
    pub logging: LoggingConfig,
}

impl LoadableConfig for GeneratorConfig {
    fn file_name() -> &'static str {
        "generator.toml"
    }
}

/// Layout of emitted table sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    pub line_width: usize,
    pub indent: String,
    /// Module path that provides `SparseStringTable` to generated code.
    pub table_path: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            line_width: 80,
            indent: "    ".to_string(),
            table_path: "crate::table".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator.toml");
        fs::write(&path, "[codegen]\nline_width = 100\n").unwrap();

        let config = GeneratorConfig::load_from(&path).unwrap();
        assert_eq!(config.codegen.line_width, 100);
        assert_eq!(config.codegen.indent, "    ");
        assert_eq!(config.codegen.table_path, "crate::table");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("generator.toml");

        let mut config = GeneratorConfig::default();
        config.codegen.table_path = "keytable_core::table".to_string();
        config.logging.level = "debug".to_string();
        config.save_to(&path).unwrap();

        let loaded = GeneratorConfig::load_from(&path).unwrap();
        assert_eq!(loaded.codegen.table_path, "keytable_core::table");
        assert_eq!(loaded.logging.level, "debug");
    }

    #[test]
    fn invalid_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator.toml");
        fs::write(&path, "[codegen]\nline_width = \"wide\"\n").unwrap();

        let err = GeneratorConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("generator.toml"), "{err}");
    }
}
