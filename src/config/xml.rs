//! XML configuration support (quick_xml + serde).
//!
//! ```xml
//! <config>
//!   <root>/mnt/efs</root>
//!   <pattern>aws-backup-restore_*</pattern>
//!   <log_level>normal</log_level>
//!   <log_file>/var/log/restore_merge.log</log_file>
//!   <dry_run>false</dry_run>
//! </config>
//! ```
//!
//! Unknown elements are rejected so typos surface instead of silently falling back to defaults.

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::paths::default_config_path;
use super::types::{Config, LogLevel};
use super::{CONFIG_ENV, PATTERN_ENV};

#[derive(Debug, Deserialize)]
#[serde(rename = "config", deny_unknown_fields)]
struct XmlConfig {
    root: Option<String>,
    pattern: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    dry_run: Option<bool>,
}

/// Trimmed, non-empty text.
fn text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn apply_xml(cfg: &mut Config, parsed: XmlConfig) -> Result<()> {
    if let Some(root) = text(parsed.root) {
        cfg.root = PathBuf::from(root);
    }
    if let Some(pattern) = text(parsed.pattern) {
        cfg.pattern = pattern;
    }
    if let Some(level) = text(parsed.log_level) {
        cfg.log_level = level.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    if let Some(log_file) = text(parsed.log_file) {
        cfg.log_file = Some(PathBuf::from(log_file));
    }
    if let Some(dry_run) = parsed.dry_run {
        cfg.dry_run = dry_run;
    }
    Ok(())
}

/// Defaults overlaid with the values of one XML file.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    let mut cfg = Config::default();
    apply_xml(&mut cfg, parsed)
        .with_context(|| format!("invalid value in config xml '{}'", path.display()))?;
    Ok(cfg)
}

/// A config plus the file it came from, if any.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

/// Defaults < XML file < `RESTORE_DIRECTORY_PATTERN`.
///
/// A missing file at the default location means "use defaults"; a missing file
/// named by `RESTORE_MERGE_CONFIG` is an error.
pub fn load_config() -> Result<LoadedConfig> {
    let explicit = env::var_os(CONFIG_ENV).is_some();
    let path = default_config_path()?;

    let (mut config, source) = if path.exists() {
        (load_config_from_xml_path(&path)?, Some(path))
    } else if explicit {
        bail!(
            "config file '{}' named by {} does not exist",
            path.display(),
            CONFIG_ENV
        );
    } else {
        (Config::default(), None)
    };

    if let Some(pattern) = text(env::var(PATTERN_ENV).ok()) {
        config.pattern = pattern;
    }

    Ok(LoadedConfig { config, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(&path, "<config>\n  <pattern> restore-* </pattern>\n</config>\n").unwrap();

        let cfg = load_config_from_xml_path(&path).unwrap();
        assert_eq!(cfg.pattern, "restore-*");
        assert_eq!(cfg.root, Config::default().root);
        assert_eq!(cfg.log_level, LogLevel::Normal);
    }

    #[test]
    fn unknown_element_is_rejected() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(&path, "<config><download_base>/x</download_base></config>").unwrap();

        let err = load_config_from_xml_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parse config xml"), "{err:#}");
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(&path, "<config><log_level>loud</log_level></config>").unwrap();

        assert!(load_config_from_xml_path(&path).is_err());
    }
}
