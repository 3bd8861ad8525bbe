use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use restore_merge::LogLevel;
use restore_merge::config::{CONFIG_ENV, PATTERN_ENV, default_config_path, load_config};

fn clear_env() {
    unsafe {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var(PATTERN_ENV);
    }
}

#[test]
#[serial]
fn explicit_config_file_is_loaded() {
    clear_env();
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("restore.xml");
    let root = td.path().join("efs");
    fs::write(
        &cfg_path,
        format!(
            "<config>\n  <root>{}</root>\n  <pattern>restore-*</pattern>\n  <log_level>debug</log_level>\n  <dry_run>true</dry_run>\n</config>\n",
            root.display()
        ),
    )
    .unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, &cfg_path);
    }
    let loaded = load_config().expect("load_config");
    clear_env();

    assert_eq!(loaded.source.as_deref(), Some(cfg_path.as_path()));
    assert_eq!(loaded.config.root, root);
    assert_eq!(loaded.config.pattern, "restore-*");
    assert_eq!(loaded.config.log_level, LogLevel::Debug);
    assert!(loaded.config.dry_run);
}

#[test]
#[serial]
fn pattern_env_overrides_file() {
    clear_env();
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("restore.xml");
    fs::write(&cfg_path, "<config><pattern>from-file-*</pattern></config>").unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, &cfg_path);
        std::env::set_var(PATTERN_ENV, "from-env-*");
    }
    let loaded = load_config().expect("load_config");
    clear_env();

    assert_eq!(loaded.config.pattern, "from-env-*");
}

#[test]
#[serial]
fn missing_explicit_file_is_an_error() {
    clear_env();
    let td = tempdir().unwrap();
    let missing = td.path().join("absent.xml");

    unsafe {
        std::env::set_var(CONFIG_ENV, &missing);
    }
    let err = load_config().unwrap_err();
    clear_env();

    assert!(err.to_string().contains("does not exist"), "{err}");
}

#[test]
#[serial]
fn relative_env_path_resolves_against_cwd() {
    clear_env();
    unsafe {
        std::env::set_var(CONFIG_ENV, "relative/config.xml");
    }
    let resolved = default_config_path().unwrap();
    clear_env();

    assert!(resolved.is_absolute());
    assert!(resolved.ends_with(PathBuf::from("relative").join("config.xml")));
}
