use std::{fmt, fs, io, path::Path};

use mathtype::PartialConfig;

/// Error type for configuration loading operations.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error when reading the file.
    Io(io::Error),
    /// TOML parsing error, together with the text that failed to parse.
    Parse {
        error: toml::de::Error,
        content: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {err}"),
            ConfigError::Parse { error, .. } => write!(f, "TOML parsing error: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse { error, .. } => Some(error),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl ConfigError {
    /// Formats the error for the terminal.
    ///
    /// Parse errors are rendered as a report that points at the offending part of the file.
    pub fn to_report(&self, source_name: &str, with_color: bool) -> String {
        use ariadne::{Label, Report, ReportKind, Source};

        let ConfigError::Parse { error, content } = self else {
            return self.to_string();
        };
        let span = error.span().unwrap_or(0..0);

        let mut config = ariadne::Config::default().with_index_type(ariadne::IndexType::Byte);
        if !with_color {
            config = config.with_color(false);
        }
        let report = Report::build(ReportKind::Error, (source_name, span.clone()))
            .with_config(config)
            .with_message("invalid configuration file")
            .with_label(Label::new((source_name, span)).with_message(error.message()))
            .finish();

        let mut buf = Vec::new();
        if report
            .write((source_name, Source::from(content.as_str())), &mut buf)
            .is_err()
        {
            return self.to_string();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Loads the configuration overrides from a TOML file.
///
/// Keys are the kebab-case names of the [`mathtype::Config`] fields; keys that are left out keep
/// their defaults, and unknown keys are an error.
pub fn load_config_file(path: &Path) -> Result<PartialConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(content)
}

fn parse_config(content: String) -> Result<PartialConfig, ConfigError> {
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(error) => Err(ConfigError::Parse { error, content }),
    }
}
