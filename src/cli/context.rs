//! Connection and vault resolution shared by the commands.

use std::cell::OnceCell;

use tracing::debug;

use crate::cli::GlobalArgs;
use crate::core::config::Config;
use crate::core::domain::{Item, Vault};
use crate::core::session::Session;
use crate::core::store::Connect;
use crate::error::Result;

/// Global flags plus the config file, loaded on first use.
pub struct Context {
    global: GlobalArgs,
    config: OnceCell<Config>,
}

impl Context {
    pub fn new(global: GlobalArgs) -> Self {
        Self {
            global,
            config: OnceCell::new(),
        }
    }

    /// The merged configuration file.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `--config` is missing or the file is malformed.
    pub fn config(&self) -> Result<&Config> {
        if let Some(config) = self.config.get() {
            return Ok(config);
        }
        let loaded = Config::load(self.global.config.as_deref())?;
        Ok(self.config.get_or_init(|| loaded))
    }

    /// Open a session against the configured store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingHost` or `ConfigError::MissingToken`.
    pub fn session(&self) -> Result<Session<Connect>> {
        let conn = self
            .config()?
            .connection(self.global.host.as_deref(), self.global.token.as_deref())?;
        debug!(host = %conn.host, "connecting");
        Ok(Session::new(Connect::new(&conn.host, conn.token)))
    }

    /// The vault title to use, falling back to `[defaults] vault`.
    pub fn vault_title(&self, flag: Option<&str>) -> Result<String> {
        self.config()?.vault(flag)
    }

    /// Resolve a vault and an item inside it, both by title.
    pub fn resolve(
        &self,
        session: &Session<Connect>,
        vault: Option<&str>,
        item: &str,
    ) -> Result<(Vault, Item)> {
        let vault = session.resolve_vault(&self.vault_title(vault)?)?;
        let item = session.resolve_item(&vault, item)?;
        Ok((vault, item))
    }
}
