//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for scripts, or stable
//! JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / hidden `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. User config, then project config
//! 4. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.
//!
//! Steps 2–4 happen in `solargrid_core::config`; this module maps the
//! resolved name back onto [`OutputMode`].

use clap::ValueEnum;
use serde::Serialize;
use solargrid_core::error::{CoreError, ErrorCode};
use std::io::{self, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<20} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, aligned labels, localized headings).
    Pretty,
    /// Tab-separated rows for pipes and scripts.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Canonical name, as accepted by config files and `FORMAT`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// Map a name resolved by the config layer onto a mode.
    ///
    /// Unknown names fall back to text.
    pub fn from_resolved(name: &str) -> Self {
        match name {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Render a serializable value with explicit pretty/text renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_mode_to(&mut out, mode, value, text_fn, pretty_fn)
}

/// [`render_mode`] into an arbitrary writer.
pub fn render_mode_to<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            // Serialize first so write failures surface as `io::Error`.
            let json = serde_json::to_string_pretty(value)?;
            writeln!(out, "{json}")?;
        }
        OutputMode::Text => text_fn(value, out)?,
        OutputMode::Pretty => pretty_fn(value, out)?,
    }
    Ok(())
}

/// Whether `err` comes from writing to a closed pipe.
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E2001").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create a simple error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    /// Build from any error, picking up code and hint when it is a [`CoreError`].
    ///
    /// Anything else is reported as [`ErrorCode::InternalUnexpected`].
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<CoreError>())
            .map_or_else(
                || {
                    let code = ErrorCode::InternalUnexpected;
                    Self {
                        suggestion: code.hint().map(str::to_string),
                        error_code: Some(code.to_string()),
                        ..Self::new(format!("{err:#}"))
                    }
                },
                Self::from,
            )
    }
}

impl From<&CoreError> for CliError {
    fn from(err: &CoreError) -> Self {
        Self {
            message: err.to_string(),
            suggestion: Some(err.suggestion()),
            error_code: Some(err.error_code().to_string()),
        }
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    render_error_to(&mut out, mode, error)
}

fn render_error_to(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            match &error.error_code {
                Some(code) => writeln!(out, "error[{code}]: {}", error.message)?,
                None => writeln!(out, "error: {}", error.message)?,
            }
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// One decimal place, the precision the dashboard shows for kW figures.
pub fn kw1(value: f64) -> String {
    format!("{value:.1}")
}

/// Whole units, as shown on live-map tiles.
pub fn kw0(value: f64) -> String {
    format!("{value:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── OutputMode ──────────────────────────────────────────────────────────

    #[test]
    fn output_mode_round_trips_names() {
        for mode in [OutputMode::Pretty, OutputMode::Text, OutputMode::Json] {
            assert_eq!(OutputMode::from_resolved(mode.as_str()), mode);
        }
        assert_eq!(OutputMode::from_resolved("bogus"), OutputMode::Text);
    }

    // ── render_mode_to ──────────────────────────────────────────────────────

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
    }

    fn render(mode: OutputMode) -> String {
        let mut buf = Vec::new();
        render_mode_to(
            &mut buf,
            mode,
            &Sample { name: "grid" },
            |v, w| writeln!(w, "{}", v.name),
            |v, w| pretty_kv(w, "Name", v.name),
        )
        .expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn render_mode_dispatches() {
        assert_eq!(render(OutputMode::Text), "grid\n");
        assert!(render(OutputMode::Pretty).starts_with("Name:"));
        let json: serde_json::Value =
            serde_json::from_str(&render(OutputMode::Json)).expect("valid JSON");
        assert_eq!(json["name"], "grid");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_pipe_is_recognised_in_every_mode() {
        for mode in [OutputMode::Pretty, OutputMode::Text, OutputMode::Json] {
            let err = render_mode_to(
                &mut ClosedPipe,
                mode,
                &Sample { name: "grid" },
                |v, w| writeln!(w, "{}", v.name),
                |v, w| pretty_kv(w, "Name", v.name),
            )
            .expect_err("write must fail");
            assert!(is_broken_pipe(&err), "{mode:?}");
        }
    }

    #[test]
    fn broken_pipe_found_under_context() {
        let err = anyhow::Error::new(io::Error::from(io::ErrorKind::BrokenPipe))
            .context("writing map");
        assert!(is_broken_pipe(&err));
        assert!(!is_broken_pipe(&anyhow::anyhow!("boom")));
        let other = anyhow::Error::new(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(!is_broken_pipe(&other));
    }

    // ── Errors ──────────────────────────────────────────────────────────────

    #[test]
    fn core_error_carries_code_and_hint() {
        let err = anyhow::Error::new(CoreError::InvalidSector(0)).context("rendering sector");
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.error_code.as_deref(), Some("E2001"));
        assert!(cli.suggestion.is_some());
    }

    #[test]
    fn plain_error_is_internal() {
        let err = anyhow::anyhow!("boom");
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.message, "boom");
        assert_eq!(cli.error_code.as_deref(), Some("E9001"));
    }

    #[test]
    fn bare_error_renders_without_code() {
        let mut buf = Vec::new();
        render_error_to(&mut buf, OutputMode::Text, &CliError::new("boom")).expect("render");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "error: boom\n");
    }

    #[test]
    fn error_json_is_wrapped() {
        let mut buf = Vec::new();
        let error = CliError::from(&CoreError::UnknownLocale("fr".into()));
        render_error_to(&mut buf, OutputMode::Json, &error).expect("render");
        let json: serde_json::Value = serde_json::from_slice(&buf).expect("valid JSON");
        assert_eq!(json["error"]["error_code"], "E1002");
    }

    #[test]
    fn error_text_includes_code() {
        let mut buf = Vec::new();
        let error = CliError::from(&CoreError::InvalidSector(0));
        render_error_to(&mut buf, OutputMode::Text, &error).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("error[E2001]: invalid sector id 0"));
        assert!(text.contains("suggestion:"));
    }

    #[test]
    fn kw_formatting() {
        assert_eq!(kw1(4.664), "4.7");
        assert_eq!(kw0(50.000_78), "50");
    }
}
