//! Process-wide state, built once at start-up and passed down by reference.

use anyhow::Result;
use tracing::{debug, info};

use crate::config::EffectiveConfig;
use crate::i18n::{Catalog, Locale};

/// Everything a command needs besides its own arguments.
///
/// Constructed with [`AppContext::init`] in `main` and torn down with
/// [`AppContext::shutdown`]. There is no global instance.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: EffectiveConfig,
    catalog: Catalog,
}

impl AppContext {
    /// Load the locale catalog and bind the resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded locale tables cannot be parsed.
    pub fn init(config: EffectiveConfig) -> Result<Self> {
        let catalog = Catalog::embedded()?;
        info!(
            locale = config.resolved_locale.code(),
            output = %config.resolved_output,
            sectors = config.sectors(),
            "context initialized"
        );
        Ok(Self { config, catalog })
    }

    #[must_use]
    pub const fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Active display locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.config.resolved_locale
    }

    /// Translate `key` in the active locale.
    #[must_use]
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalog.translate(self.locale(), key)
    }

    /// Release the context.
    pub fn shutdown(self) {
        debug!(locale = self.locale().code(), "context shut down");
    }
}
