use anyhow::{Context, Result};
use std::path::PathBuf;

/// Fixed lookup name for the OpenRouter bearer token.
pub const OPENROUTER_KEY: &str = "openrouter-api-key";

/// Opaque token storage. The pipeline only ever reads; `cmg auth` writes.
pub trait CredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// TOML file next to the global config, kept out of the config file itself
/// so tokens never end up in shared dotfiles.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn open_default() -> Result<Self> {
        let dir = crate::config::config_home()
            .context("Could not determine the configuration directory")?;
        Ok(Self {
            path: dir.join("credentials.toml"),
        })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_table(&self) -> Result<toml::Table> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        content
            .parse()
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let table = self.read_table()?;
        Ok(table
            .get(key)
            .and_then(|value| value.as_str())
            .map(ToString::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut table = self.read_table()?;
        table.insert(key.to_string(), toml::Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(&table).context("Failed to serialize credentials")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to restrict {}", self.path.display()))?;
        }

        Ok(())
    }
}
