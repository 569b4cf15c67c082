//! Miette diagnostics for errors shown to the user.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error};

/// Configuration error pointing into the TOML file.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(b3_screener::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(message: impl Into<String>, name: impl AsRef<str>, src: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: None,
            help: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, offset: usize, len: usize) -> Self {
        self.span = Some((offset, len).into());
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Failure of a whole command, with a suggestion when one applies.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(b3_screener::run))]
pub struct RunDiagnostic {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Turn a crate error into a rendered diagnostic.
///
/// `config_src` is the config file name and text when the error came from
/// loading it; parse errors then carry the offending span.
#[must_use]
pub fn report(error: Error, config_src: Option<(&str, String)>) -> miette::Report {
    match (error, config_src) {
        (Error::Config(ConfigError::Parse(e)), Some((name, src))) => {
            let mut diagnostic = ConfigDiagnostic::new(e.message().to_string(), name, src)
                .with_help("check the TOML syntax and field types");
            if let Some(range) = e.span() {
                diagnostic = diagnostic.with_span(range.start, range.len().max(1));
            }
            miette::Report::new(diagnostic)
        }
        (
            Error::Config(
                e @ (ConfigError::InvalidValue { .. } | ConfigError::MissingField { .. }),
            ),
            _,
        ) => {
            miette::Report::new(RunDiagnostic {
                message: e.to_string(),
                help: Some("run `b3-screener config validate` after editing the file".into()),
            })
        }
        (e @ Error::NoData(_), _) => miette::Report::new(RunDiagnostic {
            message: e.to_string(),
            help: Some("every source failed; check connectivity or retry later".into()),
        }),
        (e, _) => miette::Report::new(RunDiagnostic {
            message: e.to_string(),
            help: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_span() {
        let src = "[screening]\nfallback_selic = \"high\"\n".to_string();
        let err = toml::from_str::<crate::app::Config>(&src).unwrap_err();
        let report = report(ConfigError::Parse(err).into(), Some(("config.toml", src)));

        let diagnostic = report.downcast_ref::<ConfigDiagnostic>().unwrap();
        assert!(diagnostic.span.is_some());
        assert!(diagnostic.help.is_some());
    }

    #[test]
    fn test_no_data_gets_help() {
        let report = report(Error::NoData("data.js".into()), None);
        let diagnostic = report.downcast_ref::<RunDiagnostic>().unwrap();
        assert!(diagnostic.message.contains("data.js"));
        assert!(diagnostic.help.is_some());
    }
}
