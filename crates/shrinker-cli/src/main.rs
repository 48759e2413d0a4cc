mod commands;
mod logging;
mod progress;

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context};
use clap::Parser;
use commands::Cli;
use dotenv::dotenv;
use progress::CliReporter;
use shrinker_core::config::{load_configuration, parse_threshold_gb};
use shrinker_core::units::GIB;
use shrinker_core::{AppConfig, ShrinkEngine};
use tracing::{error, warn};

const EXIT_FAILURE: i32 = -1;

fn main() {
    dotenv().ok();

    let guard = logging::init_logger();

    let args = Cli::parse();

    let code = exit_code(args);
    drop(guard);
    process::exit(code);
}

/// Run and map the outcome to the process exit code, logging any fatal error.
fn exit_code(args: Cli) -> i32 {
    match run(args) {
        Ok(()) => 0,
        Err(err) => {
            error!("{:#}", err);
            EXIT_FAILURE
        }
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let mut config = load_configuration(args.config.as_deref())
        .context("Error loading configuration")?;

    let root = resolve_root(args.root.as_deref(), &config)?;
    apply_threshold(args.threshold_gb.as_deref(), &mut config)?;
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    config.dry_run |= args.dry_run;
    config.follow_links |= args.follow_links;

    if !root.is_dir() {
        bail!(
            "The root directory parameter \"{}\" points to a non-existing directory. It should point to a real directory",
            root.display()
        );
    }

    let engine = ShrinkEngine::from_config(root, &config)?;
    let reporter = CliReporter::new(args.progress);
    engine
        .run(&reporter)
        .with_context(|| format!("Error while processing files in \"{}\"", engine.root().display()))?;

    Ok(())
}

fn resolve_root(arg: Option<&str>, config: &AppConfig) -> anyhow::Result<PathBuf> {
    match arg.or(config.root_path.as_deref()) {
        Some(root) if !root.trim().is_empty() => Ok(PathBuf::from(root)),
        _ => bail!("No root directory passed as arguments. It is required"),
    }
}

fn apply_threshold(arg: Option<&str>, config: &mut AppConfig) -> anyhow::Result<()> {
    match arg {
        Some(value) if !value.trim().is_empty() => {
            let bytes = parse_threshold_gb(value).with_context(|| {
                format!(
                    "The threshold \"{}\" argument is not a number, please use a whole number of gigabytes",
                    value
                )
            })?;
            config.threshold_gb = bytes / GIB;
        }
        _ => warn!(
            "No threshold passed as arguments. Will use {} GB ({} bytes)",
            config.threshold_gb,
            config.threshold_gb.saturating_mul(GIB)
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shrinker").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_resolve_root_prefers_argument() {
        let config = AppConfig {
            root_path: Some("/from/config".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(
            resolve_root(Some("/from/args"), &config).unwrap(),
            PathBuf::from("/from/args")
        );
        assert_eq!(
            resolve_root(None, &config).unwrap(),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn test_resolve_root_rejects_blank() {
        let config = AppConfig::default();
        assert!(resolve_root(None, &config).is_err());
        assert!(resolve_root(Some("   "), &config).is_err());
    }

    #[test]
    fn test_apply_threshold() {
        let mut config = AppConfig::default();
        apply_threshold(Some("35"), &mut config).unwrap();
        assert_eq!(config.threshold_gb, 35);

        apply_threshold(Some(""), &mut config).unwrap();
        assert_eq!(config.threshold_gb, 35);

        assert!(apply_threshold(Some("lots"), &mut config).is_err());
        assert_eq!(config.threshold_gb, 35);
    }

    #[test]
    fn test_exit_code_missing_root() {
        assert_eq!(exit_code(cli(&[""])), EXIT_FAILURE);
    }

    #[test]
    fn test_exit_code_root_is_not_a_directory() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        assert_eq!(exit_code(cli(&[file.to_str().unwrap()])), EXIT_FAILURE);
        let missing = tmp.path().join("gone");
        assert_eq!(exit_code(cli(&[missing.to_str().unwrap()])), EXIT_FAILURE);
    }

    #[test]
    fn test_exit_code_bad_threshold() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_str().unwrap();

        assert_eq!(exit_code(cli(&[root, "lots"])), EXIT_FAILURE);
        assert_eq!(exit_code(cli(&[root, "99999999999999999999"])), EXIT_FAILURE);
    }

    #[test]
    fn test_exit_code_nothing_to_do() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("keep")).unwrap();
        let root = tmp.path().to_str().unwrap();

        assert_eq!(exit_code(cli(&[root, "0", "--dry-run"])), 0);
        assert!(tmp.path().join("keep").exists());
    }
}
