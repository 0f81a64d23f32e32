use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-backend key/value credential store, one TOML file per backend under
/// the user config directory (`~/.config/tunelink/<name>.toml` on Linux).
///
/// Values are read into memory once at open time; `set` writes through to
/// disk. Missing keys read as the empty string, which is also how backends
/// encode "unconfigured".
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Open the store scoped to `name` in the default config location.
    pub fn open(name: &str) -> Result<Self> {
        let root = dirs::config_dir()
            .context("could not determine the user config directory")?
            .join("tunelink");
        Self::with_root(&root, name)
    }

    /// Open the store under an explicit root directory. Used by tests.
    pub fn with_root(root: &Path, name: &str) -> Result<Self> {
        let path = root.join(format!("{name}.toml"));
        let values = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("config file {} is not valid TOML", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    /// The stored value for `key`, or the empty string when unset.
    pub fn get(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }

    /// Store `value` under `key` and persist the whole file.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(&self.values)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write config file {}", self.path.display()))?;
        Ok(())
    }
}
