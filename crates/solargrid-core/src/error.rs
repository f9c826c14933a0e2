use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    UnknownLocale,
    InvalidSector,
    InvalidTimeframe,
    InvalidParam,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::UnknownLocale => "E1002",
            Self::InvalidSector => "E2001",
            Self::InvalidTimeframe => "E2002",
            Self::InvalidParam => "E2003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::UnknownLocale => "Unknown locale",
            Self::InvalidSector => "Invalid sector id",
            Self::InvalidTimeframe => "Invalid price-history timeframe",
            Self::InvalidParam => "Invalid translation parameter",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix .solargrid/config.toml and retry."),
            Self::UnknownLocale => Some("Run `solargrid locales` to list supported codes."),
            Self::InvalidSector => Some("Sector ids start at 1; see `solargrid map`."),
            Self::InvalidTimeframe => Some("Use `7d` or `1m`."),
            Self::InvalidParam => Some("Pass parameters as `name=value`."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Typed failures raised outside the generator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Locale code not present in the catalog.
    #[error("unknown locale '{0}'")]
    UnknownLocale(String),
    /// Sector ids are 1-based.
    #[error("invalid sector id {0}: sector ids start at 1")]
    InvalidSector(u32),
    /// Price history is only recorded for a week or a month.
    #[error("invalid timeframe '{0}'")]
    InvalidTimeframe(String),
    /// A `name=value` parameter could not be split.
    #[error("invalid parameter '{0}': expected name=value")]
    InvalidParam(String),
    /// A config file was readable but not valid TOML for the schema.
    #[error("failed to parse {path}: {reason}")]
    ConfigParse { path: String, reason: String },
}

impl CoreError {
    /// The stable code this error surfaces as.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownLocale(_) => ErrorCode::UnknownLocale,
            Self::InvalidSector(_) => ErrorCode::InvalidSector,
            Self::InvalidTimeframe(_) => ErrorCode::InvalidTimeframe,
            Self::InvalidParam(_) => ErrorCode::InvalidParam,
            Self::ConfigParse { .. } => ErrorCode::ConfigParseError,
        }
    }

    /// Remediation text, falling back to the generic code message.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or(code.message()).to_string()
    }
}
