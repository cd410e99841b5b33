/// Options shared by the parser, the pattern compiler, the matcher and the path builder
///
/// One struct drives the whole pipeline so a route table can configure it
/// from a single `[options]` TOML section.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Characters that terminate a default parameter segment
pub const DEFAULT_DELIMITER: &str = "/#?";

/// Characters that are absorbed as a parameter prefix when written right before it
pub const DEFAULT_PREFIXES: &str = "./";

/// How parameter values are transformed on their way in and out of a path
///
/// `decode` is applied to captured segments when matching, `encode` to
/// supplied values when building a path (and to literal text when
/// compiling a matcher).
#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// Leave values untouched
    #[default]
    Identity,
    /// Percent-encoding (`%20` ↔ ` `), the natural choice for URL paths
    Percent,
    /// Caller-supplied transformation
    #[serde(skip)]
    Custom(fn(&str) -> String),
}

impl Codec {
    /// Decodes a captured value
    ///
    /// Percent-decoding falls back to the raw value when the decoded bytes
    /// are not valid UTF-8, so matching never fails because of encoding.
    pub fn decode(&self, value: &str) -> String {
        match self {
            Codec::Identity => value.to_string(),
            Codec::Percent => match urlencoding::decode(value) {
                Ok(decoded) => decoded.into_owned(),
                Err(err) => {
                    debug!(value, %err, "keeping undecodable segment as-is");
                    value.to_string()
                }
            },
            Codec::Custom(f) => f(value),
        }
    }

    /// Encodes a value for output
    pub fn encode(&self, value: &str) -> String {
        match self {
            Codec::Identity => value.to_string(),
            Codec::Percent => urlencoding::encode(value).into_owned(),
            Codec::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::Identity => f.write_str("Identity"),
            Codec::Percent => f.write_str("Percent"),
            Codec::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Pattern compilation options
///
/// # Examples
///
/// ```
/// use routekit::PatternOptions;
///
/// let options = PatternOptions::default()
///     .with_sensitive(true)
///     .with_end(false);
/// assert!(options.sensitive);
/// assert!(!options.end);
/// assert_eq!(options.delimiter, "/#?");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternOptions {
    /// Case-sensitive matching (default: false)
    #[serde(default = "default_false")]
    pub sensitive: bool,

    /// Disallow an optional trailing delimiter (default: false)
    #[serde(default = "default_false")]
    pub strict: bool,

    /// Anchor at the start of the path (default: true)
    #[serde(default = "default_true")]
    pub start: bool,

    /// Anchor at the end of the path (default: true)
    #[serde(default = "default_true")]
    pub end: bool,

    /// Segment delimiter characters (default: "/#?")
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Extra characters accepted as the end of a match
    #[serde(default)]
    pub ends_with: String,

    /// Characters absorbed as a parameter prefix (default: "./")
    #[serde(default = "default_prefixes")]
    pub prefixes: String,

    /// Applied to built values and compiled literal text
    #[serde(default)]
    pub encode: Codec,

    /// Applied to captured values
    #[serde(default)]
    pub decode: Codec,

    /// Check built values against their capture pattern (default: true)
    #[serde(default = "default_true")]
    pub validate: bool,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_prefixes() -> String {
    DEFAULT_PREFIXES.to_string()
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            sensitive: false, // Case-insensitive is the friendlier default for paths
            strict: false,
            start: true,
            end: true,
            delimiter: default_delimiter(),
            ends_with: String::new(),
            prefixes: default_prefixes(),
            encode: Codec::Identity,
            decode: Codec::Identity,
            validate: true,
        }
    }
}

impl PatternOptions {
    pub fn with_sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_start(mut self, start: bool) -> Self {
        self.start = start;
        self
    }

    /// `false` turns the matcher into a prefix matcher: `/users` then
    /// matches `/users/42` as well
    pub fn with_end(mut self, end: bool) -> Self {
        self.end = end;
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_ends_with(mut self, ends_with: impl Into<String>) -> Self {
        self.ends_with = ends_with.into();
        self
    }

    pub fn with_prefixes(mut self, prefixes: impl Into<String>) -> Self {
        self.prefixes = prefixes.into();
        self
    }

    pub fn with_encode(mut self, encode: Codec) -> Self {
        self.encode = encode;
        self
    }

    pub fn with_decode(mut self, decode: Codec) -> Self {
        self.decode = decode;
        self
    }

    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}
