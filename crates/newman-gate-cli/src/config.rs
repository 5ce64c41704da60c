use crate::args::ThresholdArgs;
use anyhow::{Context, Result, bail};
use newman_gate_engine::ExtractorConfig;
use newman_gate_engine::digest::{DEFAULT_SAMPLES_PER_REQUEST, DEFAULT_TOP_N};
use newman_gate_types::{DEFAULT_GLOBAL_MAX, DEFAULT_PER_REQUEST_FAIL_MAX, ThresholdConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "newman-gate.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_max: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_max: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn_max: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummarySection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples_per_request: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub thresholds: ThresholdSection,
    pub extractor: ExtractorConfig,
    pub summary: SummarySection,
}

impl Config {
    /// Load `explicit` if given (must exist), else `newman-gate.toml` in `cwd`
    /// when present, else defaults.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("Invalid configuration: config file not found: {}", path.display());
                }
                Self::load_from(path)
            }
            None => Self::load_from(&cwd.join(DEFAULT_CONFIG_FILE)),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Flag > config file > default. WARN falls back to the effective FAIL limit.
    pub fn thresholds(&self, args: &ThresholdArgs) -> ThresholdConfig {
        let global_max = args
            .global_max
            .or(self.thresholds.global_max)
            .unwrap_or(DEFAULT_GLOBAL_MAX);
        let fail_max = args
            .fail_max
            .or(self.thresholds.fail_max)
            .unwrap_or(DEFAULT_PER_REQUEST_FAIL_MAX);
        let warn_max = args.warn_max.or(self.thresholds.warn_max);

        ThresholdConfig::new(global_max, fail_max, warn_max)
    }

    pub fn top(&self, flag: Option<usize>) -> usize {
        flag.or(self.summary.top).unwrap_or(DEFAULT_TOP_N)
    }

    pub fn samples_per_request(&self) -> usize {
        self.summary
            .samples_per_request
            .unwrap_or(DEFAULT_SAMPLES_PER_REQUEST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        let thresholds = config.thresholds(&ThresholdArgs::default());
        assert_eq!(thresholds, ThresholdConfig::new(3, 3, None));
        assert_eq!(config.top(None), 8);
        assert_eq!(config.samples_per_request(), 2);
        assert_eq!(config.extractor.window, 30);
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::resolve(None, temp_dir.path())?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_explicit_missing_file_is_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let missing = temp_dir.path().join("nope.toml");
        let err = Config::resolve(Some(&missing), temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            "[thresholds]\nfail_max = 5\nwarn_max = 2\n\n[extractor]\nwindow = 12\n",
        )?;

        let config = Config::resolve(None, temp_dir.path())?;
        assert_eq!(config.extractor.window, 12);
        assert_eq!(config.extractor.marker, "AssertionError");
        assert_eq!(
            config.thresholds(&ThresholdArgs::default()),
            ThresholdConfig::new(3, 5, Some(2))
        );
        Ok(())
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config {
            thresholds: ThresholdSection {
                global_max: Some(10),
                fail_max: Some(5),
                warn_max: None,
            },
            ..Config::default()
        };
        let args = ThresholdArgs {
            global_max: Some(1),
            fail_max: None,
            warn_max: None,
        };

        let thresholds = config.thresholds(&args);
        assert_eq!(thresholds.global_max, 1);
        assert_eq!(thresholds.per_request_fail_max, 5);
        assert_eq!(thresholds.per_request_warn_max, 5);
    }

    #[test]
    fn test_save_and_load_roundtrip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("saved.toml");
        let mut config = Config::default();
        config.summary.top = Some(4);

        config.save_to(&path)?;
        assert_eq!(Config::load_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_unknown_section_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[thresholdz]\nfail_max = 5\n")?;
        assert!(Config::load_from(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_misspelled_keys_are_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);

        for content in [
            "[thresholds]\nfail_mx = 0\n",
            "[extractor]\nwindw = 1\n",
            "[summary]\ntop_n = 2\n",
        ] {
            std::fs::write(&path, content)?;
            let err = Config::load_from(&path).unwrap_err();
            assert!(
                format!("{:#}", err).contains("unknown field"),
                "accepted {:?}: {:#}",
                content,
                err
            );
        }
        Ok(())
    }
}
