//! Process-wide defaults for message formatting and error construction.
//!
//! Every formatting and construction call accepts its settings explicitly.
//! The process-wide [`Configuration`] only supplies defaults for the
//! convenience entry points (`create_with_defaults`, `AssertionErrorCreator::new`).
//!
//! ```rust
//! use fluent_errors::config::Configuration;
//!
//! let config = Configuration::builder()
//!     .max_elements_for_printing(10)
//!     .remove_internal_frames(false)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.max_elements_for_printing(), 10);
//! assert!(!config.remove_internal_frames());
//! ```
//!
//! # Environment
//!
//! [`Configuration::from_env`] reads:
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `FLUENT_ERRORS_MAX_ELEMENTS` | max collection elements printed |
//! | `FLUENT_ERRORS_MAX_LINE_LENGTH` | single-line width limit |
//! | `FLUENT_ERRORS_FILTER_STACK` | `0`/`false` keeps internal stack frames |

use std::fmt;
use std::sync::{Arc, LazyLock, RwLock};

use crate::representation::{
    DEFAULT_MAX_ELEMENTS_FOR_PRINTING, DEFAULT_MAX_LENGTH_FOR_SINGLE_LINE_DESCRIPTION,
    SharedRepresentation, StandardRepresentation,
};
use crate::sync::{read_recover, write_recover};

const ENV_MAX_ELEMENTS: &str = "FLUENT_ERRORS_MAX_ELEMENTS";
const ENV_MAX_LINE_LENGTH: &str = "FLUENT_ERRORS_MAX_LINE_LENGTH";
const ENV_FILTER_STACK: &str = "FLUENT_ERRORS_FILTER_STACK";

static GLOBAL: LazyLock<RwLock<Configuration>> = LazyLock::new(|| {
    let config = Configuration::from_env().unwrap_or_else(|err| {
        log::warn!("ignoring environment configuration: {err}");
        Configuration::default()
    });
    RwLock::new(config)
});

/// Errors raised for invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_elements_for_printing` must be at least 1.
    InvalidMaxElementsForPrinting(usize),
    /// `max_length_for_single_line_description` must be positive.
    InvalidMaxLineLength(usize),
    /// An environment variable could not be parsed.
    InvalidEnvValue { name: &'static str, value: String },
    /// An ignored-field pattern is not a valid regular expression.
    InvalidFieldRegex { pattern: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMaxElementsForPrinting(value) => {
                write!(f, "max_elements_for_printing must be >= 1, but was {value}")
            }
            Self::InvalidMaxLineLength(value) => write!(
                f,
                "max_length_for_single_line_description must be > 0, but was {value}"
            ),
            Self::InvalidEnvValue { name, value } => {
                write!(f, "invalid value for {name}: {value:?}")
            }
            Self::InvalidFieldRegex { pattern, reason } => {
                write!(f, "invalid field regex {pattern:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Formatting and error-construction defaults.
#[derive(Clone)]
pub struct Configuration {
    representation: SharedRepresentation,
    custom_representation: bool,
    remove_internal_frames: bool,
    max_elements_for_printing: usize,
    max_length_for_single_line_description: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            representation: Arc::new(StandardRepresentation::default()),
            custom_representation: false,
            remove_internal_frames: true,
            max_elements_for_printing: DEFAULT_MAX_ELEMENTS_FOR_PRINTING,
            max_length_for_single_line_description: DEFAULT_MAX_LENGTH_FOR_SINGLE_LINE_DESCRIPTION,
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("representation", &self.representation)
            .field("remove_internal_frames", &self.remove_internal_frames)
            .field("max_elements_for_printing", &self.max_elements_for_printing)
            .field(
                "max_length_for_single_line_description",
                &self.max_length_for_single_line_description,
            )
            .finish()
    }
}

impl Configuration {
    #[must_use]
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// The representation used when none is passed explicitly.
    #[must_use]
    pub fn representation(&self) -> SharedRepresentation {
        Arc::clone(&self.representation)
    }

    /// Whether frames of this crate are stripped from error stack traces.
    #[must_use]
    pub fn remove_internal_frames(&self) -> bool {
        self.remove_internal_frames
    }

    #[must_use]
    pub fn max_elements_for_printing(&self) -> usize {
        self.max_elements_for_printing
    }

    #[must_use]
    pub fn max_length_for_single_line_description(&self) -> usize {
        self.max_length_for_single_line_description
    }

    /// Human-readable summary of the settings.
    #[must_use]
    pub fn describe(&self) -> String {
        let representation = if self.custom_representation {
            format!("{:?}", self.representation)
        } else {
            "StandardRepresentation".to_string()
        };
        format!(
            "Applying configuration:\n\
             - representation .................................. = {representation}\n\
             - remove_internal_frames .......................... = {}\n\
             - max_elements_for_printing ....................... = {}\n\
             - max_length_for_single_line_description .......... = {}\n",
            self.remove_internal_frames,
            self.max_elements_for_printing,
            self.max_length_for_single_line_description
        )
    }

    /// Build a configuration from `FLUENT_ERRORS_*` environment variables.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidEnvValue`] for unparsable values, or a range
    /// error for parsed values out of bounds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_settings(&read_env_settings())
    }

    fn from_env_settings(env: &EnvSettings) -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        if let Some(value) = &env.max_elements {
            builder = builder.max_elements_for_printing(parse_usize(ENV_MAX_ELEMENTS, value)?);
        }
        if let Some(value) = &env.max_line_length {
            builder = builder
                .max_length_for_single_line_description(parse_usize(ENV_MAX_LINE_LENGTH, value)?);
        }
        if let Some(value) = &env.filter_stack {
            builder = builder.remove_internal_frames(parse_bool(ENV_FILTER_STACK, value)?);
        }
        builder.build()
    }

    /// Snapshot of the process-wide configuration.
    #[must_use]
    pub fn global() -> Self {
        read_recover(&GLOBAL).clone()
    }

    /// Replace the process-wide configuration; last writer wins.
    pub fn set_global(config: Self) {
        log::debug!("installing global configuration: {config:?}");
        *write_recover(&GLOBAL) = config;
    }

    /// Restore the built-in defaults process-wide.
    pub fn reset_global() {
        Self::set_global(Self::default());
    }
}

/// Builder for [`Configuration`].
#[derive(Default)]
pub struct ConfigurationBuilder {
    representation: Option<SharedRepresentation>,
    remove_internal_frames: Option<bool>,
    max_elements_for_printing: Option<usize>,
    max_length_for_single_line_description: Option<usize>,
}

impl ConfigurationBuilder {
    /// Use a custom representation. The element and line-length limits then
    /// only describe the defaults; the custom policy applies its own.
    #[must_use]
    pub fn representation(mut self, representation: SharedRepresentation) -> Self {
        self.representation = Some(representation);
        self
    }

    #[must_use]
    pub fn remove_internal_frames(mut self, remove: bool) -> Self {
        self.remove_internal_frames = Some(remove);
        self
    }

    #[must_use]
    pub fn max_elements_for_printing(mut self, max: usize) -> Self {
        self.max_elements_for_printing = Some(max);
        self
    }

    #[must_use]
    pub fn max_length_for_single_line_description(mut self, max: usize) -> Self {
        self.max_length_for_single_line_description = Some(max);
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// A [`ConfigError`] when a limit is zero.
    pub fn build(self) -> Result<Configuration, ConfigError> {
        let max_elements = self
            .max_elements_for_printing
            .unwrap_or(DEFAULT_MAX_ELEMENTS_FOR_PRINTING);
        if max_elements < 1 {
            return Err(ConfigError::InvalidMaxElementsForPrinting(max_elements));
        }
        let max_line = self
            .max_length_for_single_line_description
            .unwrap_or(DEFAULT_MAX_LENGTH_FOR_SINGLE_LINE_DESCRIPTION);
        if max_line == 0 {
            return Err(ConfigError::InvalidMaxLineLength(max_line));
        }

        let custom_representation = self.representation.is_some();
        let representation = self.representation.unwrap_or_else(|| {
            Arc::new(
                StandardRepresentation::default()
                    .with_max_elements_for_printing(max_elements)
                    .with_max_length_for_single_line_description(max_line),
            )
        });
        Ok(Configuration {
            representation,
            custom_representation,
            remove_internal_frames: self.remove_internal_frames.unwrap_or(true),
            max_elements_for_printing: max_elements,
            max_length_for_single_line_description: max_line,
        })
    }
}

struct EnvSettings {
    max_elements: Option<String>,
    max_line_length: Option<String>,
    filter_stack: Option<String>,
}

fn read_env_settings() -> EnvSettings {
    EnvSettings {
        max_elements: std::env::var(ENV_MAX_ELEMENTS).ok(),
        max_line_length: std::env::var(ENV_MAX_LINE_LENGTH).ok(),
        filter_stack: std::env::var(ENV_FILTER_STACK).ok(),
    }
}

fn parse_usize(name: &'static str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvValue {
            name,
            value: value.to_string(),
        })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvValue {
            name,
            value: value.to_string(),
        }),
    }
}
