//! Locale tables and string lookup.
//!
//! Tables are embedded at build time from `locales/*.toml`. Lookup is a pure
//! function of (active table, fallback table, key); the active locale is
//! always passed in explicitly.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::error::CoreError;

/// Key → translated string for one locale.
pub type Table = BTreeMap<String, String>;

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Hi,
    Bn,
    Ta,
    Te,
}

impl Locale {
    pub const ALL: [Self; 6] = [Self::En, Self::Es, Self::Hi, Self::Bn, Self::Ta, Self::Te];

    /// ISO 639-1 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Hi => "hi",
            Self::Bn => "bn",
            Self::Ta => "ta",
            Self::Te => "te",
        }
    }

    /// Name of the language written in that language.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
            Self::Hi => "हिन्दी",
            Self::Bn => "বাংলা",
            Self::Ta => "தமிழ்",
            Self::Te => "తెలుగు",
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::En => include_str!("../locales/en.toml"),
            Self::Es => include_str!("../locales/es.toml"),
            Self::Hi => include_str!("../locales/hi.toml"),
            Self::Bn => include_str!("../locales/bn.toml"),
            Self::Ta => include_str!("../locales/ta.toml"),
            Self::Te => include_str!("../locales/te.toml"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        // Accept region-qualified tags such as `hi-IN` or `en_GB`.
        let primary = wanted.split(['-', '_']).next().unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|locale| locale.code() == primary)
            .ok_or_else(|| CoreError::UnknownLocale(s.to_string()))
    }
}

/// Resolve `key` against `table`, then `fallback`, then the key itself.
///
/// Empty strings count as missing.
#[must_use]
pub fn lookup<'a>(table: Option<&'a Table>, fallback: Option<&'a Table>, key: &'a str) -> &'a str {
    let found = |t: Option<&'a Table>| {
        t.and_then(|t| t.get(key))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    };
    found(table).or_else(|| found(fallback)).unwrap_or(key)
}

/// Replace every `{{name}}` placeholder with its value.
#[must_use]
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{{{name}}}}}"), value)
        })
}

/// Split `name=value` into its parts.
///
/// # Errors
///
/// Returns [`CoreError::InvalidParam`] if there is no `=` or the name is empty.
pub fn parse_param(raw: &str) -> Result<(String, String), CoreError> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(CoreError::InvalidParam(raw.to_string())),
    }
}

/// All locale tables plus the locale used when a key is missing.
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: BTreeMap<Locale, Table>,
    fallback: Locale,
}

impl Catalog {
    /// Parse the tables compiled into the binary, falling back to English.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded table is not a flat string map.
    pub fn embedded() -> Result<Self> {
        let mut tables = BTreeMap::new();
        for locale in Locale::ALL {
            let table: Table = toml::from_str(locale.source())
                .with_context(|| format!("Failed to parse embedded locale table '{locale}'"))?;
            debug!(locale = locale.code(), keys = table.len(), "loaded locale table");
            tables.insert(locale, table);
        }
        Ok(Self::from_tables(tables, Locale::En))
    }

    /// Build a catalog from explicit tables.
    #[must_use]
    pub const fn from_tables(tables: BTreeMap<Locale, Table>, fallback: Locale) -> Self {
        Self { tables, fallback }
    }

    #[must_use]
    pub const fn fallback(&self) -> Locale {
        self.fallback
    }

    #[must_use]
    pub fn table(&self, locale: Locale) -> Option<&Table> {
        self.tables.get(&locale)
    }

    /// Translate `key` for `locale`.
    #[must_use]
    pub fn translate<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        lookup(self.table(locale), self.table(self.fallback), key)
    }

    /// Translate `key` and fill `{{name}}` placeholders.
    #[must_use]
    pub fn translate_with(&self, locale: Locale, key: &str, params: &[(&str, &str)]) -> String {
        interpolate(self.translate(locale, key), params)
    }

    /// Keys present in the fallback table but missing (or empty) in `locale`.
    #[must_use]
    pub fn missing_keys(&self, locale: Locale) -> Vec<&str> {
        let Some(reference) = self.table(self.fallback) else {
            return Vec::new();
        };
        let table = self.table(locale);
        reference
            .keys()
            .filter(|key| {
                table
                    .and_then(|t| t.get(key.as_str()))
                    .is_none_or(String::is_empty)
            })
            .map(String::as_str)
            .collect()
    }
}
