//! Config command feature.
//!
//! Handles "appsweep init-config".

use crate::config::Config;
use anyhow::bail;
use std::path::Path;

pub(crate) fn handle_init_config(
    config: &Config,
    path: Option<&Path>,
    force: bool,
) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };

    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    config.save_to(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_init_config_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let mut config = Config::default();
        config.storage.internal = Some(PathBuf::from("/apps"));

        handle_init_config(&config, Some(&path), false).unwrap();
        assert_eq!(Config::load_from(&path), config);

        assert!(handle_init_config(&Config::default(), Some(&path), false).is_err());
        handle_init_config(&Config::default(), Some(&path), true).unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }
}
