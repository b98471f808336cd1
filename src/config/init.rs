use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::Config;

const HEADER: &str = "\
# catalog-score configuration
#
# scoring.parameters: weighted evaluation functions, summed in order.
#   evaluation is one of compliance, correctness, completeness,
#   or `linear: { <attribute>: <sub-weight>, ... }`.
#   Weights are not normalized.
# bench: defaults for the throughput benchmark.
";

/// Write the default configuration to `path`.
///
/// Refuses to replace an existing file unless `force` is set. The file is
/// written atomically, so an interrupted write never leaves a partial config.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let yaml = serde_saphyr::to_string(&Config::default())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    write!(file, "{}{}", HEADER, yaml)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;

    #[test]
    fn test_written_config_loads_as_default() {
        let dir = env::temp_dir().join("catalog_score_test_init");
        let temp_path = dir.join("config.yaml");
        let _ = std::fs::remove_file(&temp_path);

        write_default_config(&temp_path, false).unwrap();
        let loaded = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(loaded, Config::default());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_existing_config_requires_force() {
        let temp_path = env::temp_dir().join("catalog_score_test_init_force.yaml");
        std::fs::write(&temp_path, "{}").unwrap();

        let err = write_default_config(&temp_path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&temp_path).unwrap(), "{}");

        write_default_config(&temp_path, true).unwrap();
        assert!(std::fs::read_to_string(&temp_path).unwrap().contains("Compliance"));

        let _ = std::fs::remove_file(&temp_path);
    }
}
