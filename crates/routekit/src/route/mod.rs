/// Route pattern pipeline
///
/// pattern string → [`lexer`] → [`parser`] → token sequence →
/// [`regexp`] (automaton source + keys) → [`matcher`] for paths in,
/// [`builder`] for paths out.
///
/// Every stage is a pure function of its input and the [`PatternOptions`];
/// compiled values are immutable and can be shared across threads.

pub mod builder;
pub mod lexer;
pub mod matcher;
pub mod parser;
pub mod regexp;

use fancy_regex::Regex;

use crate::error::{BuildError, SyntaxError};
use crate::options::{Codec, PatternOptions};
use crate::params::Params;

pub use builder::{compile, PathBuilder};
pub use matcher::{MatchResult, Matcher};
pub use parser::{Key, Modifier, Token};

/// Escapes regex metacharacters in literal text
pub fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(
            ch,
            '.' | '+' | '*' | '?' | '^' | '$' | '(' | ')' | '{' | '}' | '[' | ']' | '|' | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Escapes characters that are special inside a `[...]` class
pub fn escape_class(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | ']' | '[' | '^' | '-' | '&' | '~') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Compiles an automaton source, honouring case sensitivity
pub(crate) fn build_regex(source: &str, sensitive: bool) -> Result<Regex, SyntaxError> {
    let full = if sensitive {
        source.to_string()
    } else {
        format!("(?i){}", source)
    };
    Regex::new(&full).map_err(|err| SyntaxError::invalid_regex(source, err))
}

/// A route pattern compiled in both directions
///
/// # Examples
///
/// ```
/// use routekit::{Params, Pattern, PatternOptions};
///
/// let pattern = Pattern::new("/product/:id/info", &PatternOptions::default()).unwrap();
///
/// let found = pattern.matches("/product/42/info").unwrap();
/// assert_eq!(found.params.get_str("id"), Some("42"));
///
/// let path = pattern.build(&Params::new().with("id", "7")).unwrap();
/// assert_eq!(path, "/product/7/info");
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    matcher: Matcher,
    builder: PathBuilder,
}

impl Pattern {
    pub fn new(pattern: &str, options: &PatternOptions) -> Result<Self, SyntaxError> {
        let tokens = parser::parse(pattern, options)?;
        let matcher = Matcher::from_tokens(&tokens, options)?;
        let builder = PathBuilder::from_tokens(tokens, options)?;

        Ok(Self {
            text: pattern.to_string(),
            matcher,
            builder,
        })
    }

    /// Compiles for URL paths: captures are percent-decoded and built
    /// values percent-encoded, so building and matching stay inverses
    ///
    /// Literal text is matched as written.
    pub fn for_url(pattern: &str, options: &PatternOptions) -> Result<Self, SyntaxError> {
        let tokens = parser::parse(pattern, options)?;
        let decoding = options
            .clone()
            .with_encode(Codec::Identity)
            .with_decode(Codec::Percent);
        let encoding = options.clone().with_encode(Codec::Percent);
        let matcher = Matcher::from_tokens(&tokens, &decoding)?;
        let builder = PathBuilder::from_tokens(tokens, &encoding)?;

        Ok(Self {
            text: pattern.to_string(),
            matcher,
            builder,
        })
    }

    /// Original pattern text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when the pattern has no parameters at all
    pub fn is_plain(&self) -> bool {
        self.matcher.is_plain()
    }

    pub fn keys(&self) -> &[Key] {
        self.matcher.keys()
    }

    pub fn tokens(&self) -> &[Token] {
        self.builder.tokens()
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn builder(&self) -> &PathBuilder {
        &self.builder
    }

    pub fn matches(&self, path: &str) -> Option<MatchResult> {
        self.matcher.matches(path)
    }

    pub fn build(&self, params: &Params) -> Result<String, BuildError> {
        self.builder.build(params)
    }
}
