/// Route pattern parser
///
/// Turns the lexer output into a token sequence: literal text interleaved
/// with parameter descriptors ([`Key`]). Single left-to-right pass with
/// one-token lookahead, no backtracking.

use std::fmt;

use crate::error::SyntaxError;
use crate::options::PatternOptions;
use crate::params::ParamName;
use crate::route::escape_class;
use crate::route::lexer::{tokenize, LexKind, LexToken};

/// Repetition applied to a parameter or group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifier {
    #[default]
    None,
    /// `?`
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

impl Modifier {
    fn from_token(value: &str) -> Self {
        match value {
            "?" => Modifier::Optional,
            "*" => Modifier::ZeroOrMore,
            "+" => Modifier::OneOrMore,
            _ => Modifier::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Optional => "?",
            Modifier::ZeroOrMore => "*",
            Modifier::OneOrMore => "+",
        }
    }

    /// `?` and `*` may be absent
    pub fn is_optional(&self) -> bool {
        matches!(self, Modifier::Optional | Modifier::ZeroOrMore)
    }

    /// `*` and `+` capture a run of segments
    pub fn is_repeat(&self) -> bool {
        matches!(self, Modifier::ZeroOrMore | Modifier::OneOrMore)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter descriptor
///
/// `pattern` is a regular-expression fragment. It is empty only for a
/// `{...}` group holding nothing but literal text, which never captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub name: ParamName,
    pub prefix: String,
    pub suffix: String,
    pub pattern: String,
    pub modifier: Modifier,
}

/// Element of a parsed pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    Param(Key),
}

impl Token {
    pub fn as_key(&self) -> Option<&Key> {
        match self {
            Token::Param(key) => Some(key),
            Token::Text(_) => None,
        }
    }
}

/// Default capture pattern: one or more characters outside the delimiter set
pub fn default_pattern(delimiter: &str) -> String {
    if delimiter.is_empty() {
        return "[\\s\\S]+?".to_string();
    }
    format!("[^{}]+?", escape_class(delimiter))
}

/// Cursor over the lexer output
struct TokenStream {
    tokens: Vec<LexToken>,
    pos: usize,
}

impl TokenStream {
    fn try_consume(&mut self, kind: LexKind) -> Option<String> {
        match self.tokens.get(self.pos) {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Some(token.value.clone())
            }
            _ => None,
        }
    }

    fn must_consume(&mut self, kind: LexKind) -> Result<String, SyntaxError> {
        if let Some(value) = self.try_consume(kind) {
            return Ok(value);
        }
        // The End sentinel guarantees there is always a token to report
        let (found, index) = self
            .tokens
            .get(self.pos)
            .map_or((LexKind::End, 0), |t| (t.kind, t.index));
        Err(SyntaxError::Unexpected {
            found,
            index,
            expected: kind,
        })
    }

    /// Consumes a run of plain and escaped characters
    fn consume_text(&mut self) -> String {
        let mut text = String::new();
        while let Some(value) = self
            .try_consume(LexKind::Char)
            .or_else(|| self.try_consume(LexKind::EscapedChar))
        {
            text.push_str(&value);
        }
        text
    }

    fn modifier(&mut self) -> Modifier {
        self.try_consume(LexKind::Modifier)
            .map(|m| Modifier::from_token(&m))
            .unwrap_or_default()
    }

    fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

/// Parses a route pattern into a token sequence
///
/// # Examples
///
/// ```
/// use routekit::route::parser::{parse, Modifier, Token};
/// use routekit::{ParamName, PatternOptions};
///
/// let tokens = parse("/user/:id?", &PatternOptions::default()).unwrap();
/// assert_eq!(tokens[0], Token::Text("/user".to_string()));
///
/// let key = tokens[1].as_key().unwrap();
/// assert_eq!(key.name, ParamName::Named("id".to_string()));
/// assert_eq!(key.prefix, "/");
/// assert_eq!(key.modifier, Modifier::Optional);
/// ```
pub fn parse(pattern: &str, options: &PatternOptions) -> Result<Vec<Token>, SyntaxError> {
    let mut stream = TokenStream {
        tokens: tokenize(pattern)?,
        pos: 0,
    };
    let default_pattern = default_pattern(&options.delimiter);

    let mut result = Vec::new();
    let mut next_index = 0usize;
    let mut path = String::new();

    let flush = |path: &mut String, result: &mut Vec<Token>| {
        if !path.is_empty() {
            result.push(Token::Text(std::mem::take(path)));
        }
    };

    while !stream.is_done() {
        let ch = stream.try_consume(LexKind::Char);
        let name = stream.try_consume(LexKind::Name);
        let custom = stream.try_consume(LexKind::Pattern);

        if name.is_some() || custom.is_some() {
            let mut prefix = ch.unwrap_or_default();

            if !prefix.is_empty() && !options.prefixes.contains(prefix.as_str()) {
                path.push_str(&prefix);
                prefix.clear();
            }

            flush(&mut path, &mut result);

            let name = match name {
                Some(name) => ParamName::Named(name),
                None => {
                    next_index += 1;
                    ParamName::Index(next_index - 1)
                }
            };

            result.push(Token::Param(Key {
                name,
                prefix,
                suffix: String::new(),
                pattern: custom.unwrap_or_else(|| default_pattern.clone()),
                modifier: stream.modifier(),
            }));
            continue;
        }

        if let Some(value) = ch.or_else(|| stream.try_consume(LexKind::EscapedChar)) {
            path.push_str(&value);
            continue;
        }

        flush(&mut path, &mut result);

        if stream.try_consume(LexKind::Open).is_some() {
            let prefix = stream.consume_text();
            let name = stream.try_consume(LexKind::Name);
            let custom = stream.try_consume(LexKind::Pattern);
            let suffix = stream.consume_text();

            stream.must_consume(LexKind::Close)?;

            let (name, pattern) = match (name, custom) {
                (Some(name), Some(custom)) => (ParamName::Named(name), custom),
                (Some(name), None) => (ParamName::Named(name), default_pattern.clone()),
                (None, Some(custom)) => {
                    next_index += 1;
                    (ParamName::Index(next_index - 1), custom)
                }
                (None, None) => (ParamName::Named(String::new()), String::new()),
            };

            result.push(Token::Param(Key {
                name,
                prefix,
                suffix,
                pattern,
                modifier: stream.modifier(),
            }));
            continue;
        }

        stream.must_consume(LexKind::End)?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(pattern: &str) -> Vec<Token> {
        parse(pattern, &PatternOptions::default()).unwrap()
    }

    fn key(
        name: impl Into<ParamName>,
        prefix: &str,
        suffix: &str,
        pattern: &str,
        modifier: Modifier,
    ) -> Token {
        Token::Param(Key {
            name: name.into(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            pattern: pattern.to_string(),
            modifier,
        })
    }

    const SEGMENT: &str = "[^/#?]+?";

    #[test]
    fn test_parse_plain() {
        assert_eq!(
            parse_default("/product/create"),
            vec![Token::Text("/product/create".to_string())]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_default("").is_empty());
    }

    #[test]
    fn test_parse_named_with_prefix() {
        assert_eq!(
            parse_default("/product/:id/info"),
            vec![
                Token::Text("/product".to_string()),
                key("id", "/", "", SEGMENT, Modifier::None),
                Token::Text("/info".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_prefix_char_stays_literal() {
        assert_eq!(
            parse_default("/a-:b"),
            vec![
                Token::Text("/a-".to_string()),
                key("b", "", "", SEGMENT, Modifier::None),
            ]
        );
    }

    #[test]
    fn test_dot_prefix() {
        assert_eq!(
            parse_default("/file.:ext"),
            vec![
                Token::Text("/file".to_string()),
                key("ext", ".", "", SEGMENT, Modifier::None),
            ]
        );
    }

    #[test]
    fn test_custom_prefixes() {
        let options = PatternOptions::default().with_prefixes("");
        let tokens = parse("/:id", &options).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Text("/".to_string()),
                key("id", "", "", SEGMENT, Modifier::None),
            ]
        );
    }

    #[test]
    fn test_repeat_modifier() {
        assert_eq!(
            parse_default("/files/*rest"),
            vec![
                Token::Text("/files".to_string()),
                key("rest", "/", "", SEGMENT, Modifier::ZeroOrMore),
            ]
        );
        assert_eq!(
            parse_default("/files/:rest*"),
            vec![
                Token::Text("/files".to_string()),
                key("rest", "/", "", SEGMENT, Modifier::ZeroOrMore),
            ]
        );
    }

    #[test]
    fn test_anonymous_patterns_are_numbered() {
        assert_eq!(
            parse_default("/(\\d+)/:name/(\\w+)"),
            vec![
                key(0usize, "/", "", "\\d+", Modifier::None),
                key("name", "/", "", SEGMENT, Modifier::None),
                key(1usize, "/", "", "\\w+", Modifier::None),
            ]
        );
    }

    #[test]
    fn test_named_custom_pattern() {
        assert_eq!(
            parse_default("/:id(\\d+)+"),
            vec![key("id", "/", "", "\\d+", Modifier::OneOrMore)]
        );
    }

    #[test]
    fn test_group_with_prefix_and_suffix() {
        assert_eq!(
            parse_default("/a{/:id.json}?"),
            vec![
                Token::Text("/a".to_string()),
                key("id", "/", ".json", SEGMENT, Modifier::Optional),
            ]
        );
    }

    #[test]
    fn test_group_with_anonymous_pattern() {
        assert_eq!(
            parse_default("{-(\\d+)}*"),
            vec![key(0usize, "-", "", "\\d+", Modifier::ZeroOrMore)]
        );
    }

    #[test]
    fn test_literal_only_group() {
        assert_eq!(
            parse_default("/page{s}?"),
            vec![
                Token::Text("/page".to_string()),
                key("", "s", "", "", Modifier::Optional),
            ]
        );
    }

    #[test]
    fn test_escaped_chars_join_text() {
        assert_eq!(
            parse_default("/a\\:b\\*"),
            vec![Token::Text("/a:b*".to_string())]
        );
    }

    #[test]
    fn test_custom_delimiter_default_pattern() {
        let options = PatternOptions::default().with_delimiter(".");
        let tokens = parse("/:host", &options).unwrap();
        assert_eq!(tokens[0].as_key().unwrap().pattern, "[^.]+?");
    }

    #[test]
    fn test_unclosed_group() {
        let err = parse("/a{/:id", &PatternOptions::default()).unwrap_err();
        assert_eq!(
            err,
            SyntaxError::Unexpected {
                found: LexKind::End,
                index: 7,
                expected: LexKind::Close,
            }
        );
    }

    #[test]
    fn test_stray_modifier() {
        let err = parse("/foo?", &PatternOptions::default()).unwrap_err();
        assert_eq!(
            err,
            SyntaxError::Unexpected {
                found: LexKind::Modifier,
                index: 4,
                expected: LexKind::End,
            }
        );
    }

    #[test]
    fn test_stray_close() {
        assert!(matches!(
            parse("/a}", &PatternOptions::default()),
            Err(SyntaxError::Unexpected { found: LexKind::Close, .. })
        ));
    }

    #[test]
    fn test_wildcard_shorthand_inside_group_is_rejected() {
        assert_eq!(
            parse("{/*rest}", &PatternOptions::default()),
            Err(SyntaxError::Unexpected {
                found: LexKind::Modifier,
                index: 2,
                expected: LexKind::Close,
            })
        );
        assert_eq!(
            parse_default("{/:rest}*"),
            vec![key("rest", "/", "", SEGMENT, Modifier::ZeroOrMore)]
        );
    }
}
