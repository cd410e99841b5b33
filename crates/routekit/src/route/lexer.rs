//! Route pattern lexer.
//!
//! Splits a pattern string like `/user/:id(\d+)?` into a flat list of
//! [`LexToken`]s. The list always ends with a single [`LexKind::End`]
//! sentinel so the parser can use one-token lookahead without bounds checks.

use std::fmt;

use crate::error::SyntaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexKind {
    Open,        // {
    Close,       // }
    Pattern,     // (...)
    Name,        // :name
    Char,
    EscapedChar, // \c
    Modifier,    // * + ?
    End,
}

impl fmt::Display for LexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LexKind::Open => "OPEN",
            LexKind::Close => "CLOSE",
            LexKind::Pattern => "PATTERN",
            LexKind::Name => "NAME",
            LexKind::Char => "CHAR",
            LexKind::EscapedChar => "ESCAPED_CHAR",
            LexKind::Modifier => "MODIFIER",
            LexKind::End => "END",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexToken {
    pub kind: LexKind,
    /// Byte offset of the token in the pattern
    pub index: usize,
    pub value: String,
}

impl LexToken {
    fn new(kind: LexKind, index: usize, value: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            value: value.into(),
        }
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn read_name(chars: &[(usize, char)], from: usize) -> String {
    chars[from..]
        .iter()
        .map(|&(_, c)| c)
        .take_while(|&c| is_name_char(c))
        .collect()
}

fn next_is_name(chars: &[(usize, char)], i: usize) -> bool {
    chars.get(i + 1).map_or(false, |&(_, c)| is_name_char(c))
}

/// A modifier directly after a parameter or group applies to it
fn in_modifier_position(tokens: &[LexToken]) -> bool {
    matches!(
        tokens.last().map(|t| t.kind),
        Some(LexKind::Name | LexKind::Pattern | LexKind::Close)
    )
}

/// Tokenizes a route pattern
///
/// `*name` outside a modifier position is read as `:name*`. Inside a group
/// the shorthand has no meaning (`{/*rest}` would put the modifier before
/// `}`); write `{/:rest}*` instead.
///
/// # Examples
///
/// ```
/// use routekit::route::lexer::{tokenize, LexKind};
///
/// let kinds: Vec<LexKind> = tokenize("/:id?").unwrap().iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![LexKind::Char, LexKind::Name, LexKind::Modifier, LexKind::End]
/// );
/// ```
pub fn tokenize(pattern: &str) -> Result<Vec<LexToken>, SyntaxError> {
    let chars: Vec<(usize, char)> = pattern.char_indices().collect();
    let offset = |i: usize| chars.get(i).map_or(pattern.len(), |&(at, _)| at);

    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (at, ch) = chars[i];

        match ch {
            '*' if !in_modifier_position(&tokens) && next_is_name(&chars, i) => {
                // `*rest` is shorthand for a zero-or-more named parameter
                let name = read_name(&chars, i + 1);
                i += 1 + name.chars().count();
                tokens.push(LexToken::new(LexKind::Name, at, name));
                tokens.push(LexToken::new(LexKind::Modifier, at, ch));
            }
            '*' | '+' | '?' => {
                tokens.push(LexToken::new(LexKind::Modifier, at, ch));
                i += 1;
            }
            '\\' => {
                let (_, escaped) = *chars
                    .get(i + 1)
                    .ok_or(SyntaxError::DanglingEscape { index: at })?;
                tokens.push(LexToken::new(LexKind::EscapedChar, at, escaped));
                i += 2;
            }
            '{' => {
                tokens.push(LexToken::new(LexKind::Open, at, ch));
                i += 1;
            }
            '}' => {
                tokens.push(LexToken::new(LexKind::Close, at, ch));
                i += 1;
            }
            ':' => {
                let name = read_name(&chars, i + 1);

                if name.is_empty() {
                    return Err(SyntaxError::MissingParameterName { index: at });
                }

                i += 1 + name.chars().count();
                tokens.push(LexToken::new(LexKind::Name, at, name));
            }
            '(' => {
                let (pattern_text, next) = lex_pattern(&chars, i, &offset)?;
                tokens.push(LexToken::new(LexKind::Pattern, at, pattern_text));
                i = next;
            }
            _ => {
                tokens.push(LexToken::new(LexKind::Char, at, ch));
                i += 1;
            }
        }
    }

    tokens.push(LexToken::new(LexKind::End, pattern.len(), ""));
    Ok(tokens)
}

/// Reads a balanced `(...)` group starting at `start`
///
/// Returns the inner text and the char position after the closing paren.
/// Nested groups must be non-capturing (`(?:...)`, lookarounds).
fn lex_pattern(
    chars: &[(usize, char)],
    start: usize,
    offset: &impl Fn(usize) -> usize,
) -> Result<(String, usize), SyntaxError> {
    let open_at = chars[start].0;
    let mut depth = 1;
    let mut text = String::new();
    let mut j = start + 1;

    if matches!(chars.get(j), Some((_, '?'))) {
        return Err(SyntaxError::PatternStartsWithQuestion { index: offset(j) });
    }

    while j < chars.len() {
        let ch = chars[j].1;

        if ch == '\\' {
            // Escaped pairs are copied verbatim and never count towards depth
            let Some(&(_, escaped)) = chars.get(j + 1) else {
                return Err(SyntaxError::UnbalancedPattern { index: open_at });
            };
            text.push(ch);
            text.push(escaped);
            j += 2;
            continue;
        }

        if ch == ')' {
            depth -= 1;
            if depth == 0 {
                j += 1;
                break;
            }
        } else if ch == '(' {
            depth += 1;
            if opens_capture(chars, j) {
                return Err(SyntaxError::CapturingGroup { index: offset(j) });
            }
        }

        text.push(ch);
        j += 1;
    }

    if depth > 0 {
        return Err(SyntaxError::UnbalancedPattern { index: open_at });
    }
    if text.is_empty() {
        return Err(SyntaxError::MissingPattern { index: open_at });
    }

    Ok((text, j))
}

/// Whether the group opened at `at` captures
///
/// `(?<name>...)` and `(?P<name>...)` capture; `(?<=...)` and `(?<!...)` are
/// lookbehinds and do not.
fn opens_capture(chars: &[(usize, char)], at: usize) -> bool {
    let next = |k: usize| chars.get(at + k).map(|&(_, c)| c);

    match (next(1), next(2), next(3)) {
        (Some('?'), Some('<'), Some('=' | '!')) => false,
        (Some('?'), Some('<'), _) => true,
        (Some('?'), Some('P'), Some('<')) => true,
        (Some('?'), _, _) => false,
        _ => true,
    }
}
