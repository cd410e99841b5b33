/// Executable matcher
///
/// Runs the compiled automaton against a path and decodes the captures into
/// [`Params`]. Not matching is an ordinary outcome and is reported as `None`.

use fancy_regex::Regex;
use tracing::warn;

use crate::error::SyntaxError;
use crate::options::{Codec, PatternOptions};
use crate::params::{ParamName, ParamValue, Params};
use crate::route::build_regex;
use crate::route::parser::{parse, Key, Modifier, Token};
use crate::route::regexp::tokens_to_regexp;

/// Successful match of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// The matched portion of the input
    pub path: String,
    /// Byte offset where the match starts
    pub index: usize,
    pub params: Params,
}

/// Compiled route matcher
///
/// # Examples
///
/// ```
/// use routekit::{Matcher, PatternOptions};
///
/// let matcher = Matcher::new("/files/:path+", &PatternOptions::default()).unwrap();
/// let found = matcher.matches("/files/a/b/c").unwrap();
///
/// assert_eq!(found.params.get_all("path").unwrap(), ["a", "b", "c"]);
/// assert!(matcher.matches("/files").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    keys: Vec<Key>,
    is_plain: bool,
    decode: Codec,
}

impl Matcher {
    /// Parses and compiles a pattern string
    pub fn new(pattern: &str, options: &PatternOptions) -> Result<Self, SyntaxError> {
        let tokens = parse(pattern, options)?;
        Self::from_tokens(&tokens, options)
    }

    pub fn from_tokens(tokens: &[Token], options: &PatternOptions) -> Result<Self, SyntaxError> {
        let compiled = tokens_to_regexp(tokens, options);

        Ok(Self {
            regex: build_regex(&compiled.source, options.sensitive)?,
            keys: compiled.keys,
            is_plain: compiled.is_plain,
            decode: options.decode,
        })
    }

    /// Compiles several patterns into one alternation
    ///
    /// Keys of every alternative are concatenated in order; only the
    /// alternative that matched yields parameters.
    pub fn from_paths<S: AsRef<str>>(
        patterns: &[S],
        options: &PatternOptions,
    ) -> Result<Self, SyntaxError> {
        let mut parts = Vec::with_capacity(patterns.len());
        let mut keys = Vec::new();
        let mut is_plain = true;

        for pattern in patterns {
            let tokens = parse(pattern.as_ref(), options)?;
            let compiled = tokens_to_regexp(&tokens, options);
            parts.push(compiled.source);
            keys.extend(compiled.keys);
            is_plain &= compiled.is_plain;
        }

        let source = format!("(?:{})", parts.join("|"));

        Ok(Self {
            regex: build_regex(&source, options.sensitive)?,
            keys,
            is_plain,
            decode: options.decode,
        })
    }

    /// Wraps a hand-written regular expression
    ///
    /// Capturing groups become keys: `(?<name>...)` / `(?P<name>...)` keep
    /// their name, plain groups are numbered from 0.
    pub fn from_regex(source: &str, options: &PatternOptions) -> Result<Self, SyntaxError> {
        Ok(Self {
            regex: build_regex(source, options.sensitive)?,
            keys: regex_keys(source),
            is_plain: false,
            decode: options.decode,
        })
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn is_plain(&self) -> bool {
        self.is_plain
    }

    /// Expression source the matcher runs (including the case flag)
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.matches(path).is_some()
    }

    /// Matches a path, decoding captured parameters
    ///
    /// Optional parameters that did not participate are left out of the
    /// result. Repeated parameters are split on `prefix + suffix`; a value
    /// containing that text is split too.
    pub fn matches(&self, path: &str) -> Option<MatchResult> {
        let captures = match self.regex.captures(path) {
            Ok(Some(captures)) => captures,
            Ok(None) => return None,
            Err(err) => {
                warn!(path, pattern = self.regex.as_str(), %err, "route matching aborted");
                return None;
            }
        };

        let whole = captures.get(0)?;
        let mut params = Params::new();

        for (i, key) in self.keys.iter().enumerate() {
            let Some(capture) = captures.get(i + 1) else {
                continue;
            };
            let raw = capture.as_str();
            if raw.is_empty() {
                continue;
            }

            let value = if key.modifier.is_repeat() {
                let separator = format!("{}{}", key.prefix, key.suffix);
                ParamValue::Repeated(
                    split_run(raw, &separator)
                        .map(|segment| self.decode.decode(segment))
                        .collect(),
                )
            } else {
                ParamValue::Single(self.decode.decode(raw))
            };

            params.insert(key.name.clone(), value);
        }

        Some(MatchResult {
            path: whole.as_str().to_string(),
            index: whole.start(),
            params,
        })
    }
}

/// Splits a repeated capture; an empty separator yields single characters
fn split_run<'a>(raw: &'a str, separator: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
    if separator.is_empty() {
        Box::new(raw.char_indices().map(move |(i, c)| &raw[i..i + c.len_utf8()]))
    } else {
        Box::new(raw.split(separator))
    }
}

/// Derives keys from the capturing groups of a raw expression
fn regex_keys(source: &str) -> Vec<Key> {
    let chars: Vec<char> = source.chars().collect();
    let mut keys = Vec::new();
    let mut next_index = 0usize;
    let mut in_class = false;
    let mut i = 0;

    let key = |name: ParamName| Key {
        name,
        prefix: String::new(),
        suffix: String::new(),
        pattern: String::new(),
        modifier: Modifier::None,
    };

    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '[' => in_class = true,
            ']' => in_class = false,
            '(' if !in_class => {
                let rest: String = chars[i + 1..].iter().collect();
                let named = rest
                    .strip_prefix("?P<")
                    .or_else(|| rest.strip_prefix("?<"))
                    .filter(|r| !r.starts_with('=') && !r.starts_with('!'))
                    .and_then(|r| r.split_once('>'))
                    .map(|(name, _)| name.to_string());

                if let Some(name) = named {
                    keys.push(key(ParamName::Named(name)));
                } else if !rest.starts_with('?') {
                    keys.push(key(ParamName::Index(next_index)));
                    next_index += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    keys
}
