/// Token sequence → regular expression
///
/// Every parameter with a capture pattern contributes exactly one capturing
/// group and one entry in `keys`, in the same order, so capture `i` always
/// belongs to `keys[i - 1]`.

use crate::options::PatternOptions;
use crate::route::parser::{Key, Modifier, Token};
use crate::route::{escape_class, escape_string};

/// Output of the pattern compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRegexp {
    /// Expression source, without case flags
    pub source: String,
    pub keys: Vec<Key>,
    /// No parameter descriptors at all (pure literal route)
    pub is_plain: bool,
}

fn char_class(chars: &str) -> Option<String> {
    (!chars.is_empty()).then(|| format!("[{}]", escape_class(chars)))
}

fn param_regexp(key: &Key, prefix: &str, suffix: &str) -> String {
    let pattern = &key.pattern;
    let modifier = key.modifier.as_str();

    if pattern.is_empty() {
        return format!("(?:{prefix}{suffix}){modifier}");
    }

    match (prefix.is_empty() && suffix.is_empty(), key.modifier.is_repeat()) {
        (false, true) => {
            let optional = if key.modifier == Modifier::ZeroOrMore { "?" } else { "" };
            format!(
                "(?:{prefix}((?:{pattern})(?:{suffix}{prefix}(?:{pattern}))*){suffix}){optional}"
            )
        }
        (false, false) => format!("(?:{prefix}({pattern}){suffix}){modifier}"),
        (true, true) => format!("((?:{pattern}){modifier})"),
        (true, false) => format!("({pattern}){modifier}"),
    }
}

/// Compiles a token sequence into an expression source
///
/// # Examples
///
/// ```
/// use routekit::route::{parser::parse, regexp::tokens_to_regexp};
/// use routekit::PatternOptions;
///
/// let options = PatternOptions::default();
/// let tokens = parse("/user/:id", &options).unwrap();
/// let compiled = tokens_to_regexp(&tokens, &options);
///
/// assert_eq!(compiled.source, "^/user(?:/([^/#?]+?))[/#?]?$");
/// assert_eq!(compiled.keys.len(), 1);
/// assert!(!compiled.is_plain);
/// ```
pub fn tokens_to_regexp(tokens: &[Token], options: &PatternOptions) -> CompiledRegexp {
    let encode = options.encode;
    let delimiter_re = char_class(&options.delimiter);
    let ends_with_re = match char_class(&options.ends_with) {
        Some(class) => format!("{class}|$"),
        None => "$".to_string(),
    };

    let mut route = String::from(if options.start { "^" } else { "" });
    let mut keys = Vec::new();

    for token in tokens {
        match token {
            Token::Text(text) => route.push_str(&escape_string(&encode.encode(text))),
            Token::Param(key) => {
                let prefix = escape_string(&encode.encode(&key.prefix));
                let suffix = escape_string(&encode.encode(&key.suffix));

                if !key.pattern.is_empty() {
                    keys.push(key.clone());
                }
                route.push_str(&param_regexp(key, &prefix, &suffix));
            }
        }
    }

    if options.end {
        if !options.strict {
            if let Some(delimiter) = &delimiter_re {
                route.push_str(delimiter);
                route.push('?');
            }
        }

        if options.ends_with.is_empty() {
            route.push('$');
        } else {
            route.push_str(&format!("(?={ends_with_re})"));
        }
    } else {
        let is_end_delimited = match tokens.last() {
            Some(Token::Text(text)) => text
                .chars()
                .last()
                .map_or(false, |c| options.delimiter.contains(c)),
            Some(Token::Param(_)) => false,
            None => true,
        };

        if let Some(delimiter) = &delimiter_re {
            if !options.strict {
                route.push_str(&format!("(?:{delimiter}(?={ends_with_re}))?"));
            }
            if !is_end_delimited {
                route.push_str(&format!("(?={delimiter}|{ends_with_re})"));
            }
        } else if !is_end_delimited {
            route.push_str(&format!("(?={ends_with_re})"));
        }
    }

    CompiledRegexp {
        source: route,
        keys,
        is_plain: tokens.iter().all(|t| matches!(t, Token::Text(_))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::parser::parse;

    fn source(pattern: &str, options: &PatternOptions) -> String {
        let tokens = parse(pattern, options).unwrap();
        tokens_to_regexp(&tokens, options).source
    }

    #[test]
    fn test_plain_route() {
        let options = PatternOptions::default();
        let tokens = parse("/product/create", &options).unwrap();
        let compiled = tokens_to_regexp(&tokens, &options);
        assert_eq!(compiled.source, "^/product/create[/#?]?$");
        assert!(compiled.is_plain);
        assert!(compiled.keys.is_empty());
    }

    #[test]
    fn test_literal_escaping() {
        let options = PatternOptions::default();
        assert_eq!(source("/a.b", &options), "^/a\\.b[/#?]?$");
    }

    #[test]
    fn test_strict() {
        let options = PatternOptions::default().with_strict(true);
        assert_eq!(source("/a", &options), "^/a$");
    }

    #[test]
    fn test_ends_with() {
        let options = PatternOptions::default().with_ends_with("!");
        assert_eq!(source("/a", &options), "^/a[/#?]?(?=[!]|$)");
    }

    #[test]
    fn test_not_end() {
        let options = PatternOptions::default().with_end(false);
        assert_eq!(source("/a", &options), "^/a(?:[/#?](?=$))?(?=[/#?]|$)");
        // Already delimiter-terminated: no trailing lookahead
        assert_eq!(source("/a/", &options), "^/a/(?:[/#?](?=$))?");
    }

    #[test]
    fn test_no_start() {
        let options = PatternOptions::default().with_start(false);
        assert_eq!(source("/a", &options), "/a[/#?]?$");
    }

    #[test]
    fn test_optional_param() {
        let options = PatternOptions::default().with_strict(true);
        assert_eq!(source("/:id?", &options), "^(?:/([^/#?]+?))?$");
    }

    #[test]
    fn test_repeated_param_with_prefix() {
        let options = PatternOptions::default().with_strict(true);
        assert_eq!(
            source("/:rest*", &options),
            "^(?:/((?:[^/#?]+?)(?:/(?:[^/#?]+?))*))?$"
        );
        assert_eq!(
            source("/:rest+", &options),
            "^(?:/((?:[^/#?]+?)(?:/(?:[^/#?]+?))*))$"
        );
    }

    #[test]
    fn test_repeated_param_without_prefix() {
        let options = PatternOptions::default().with_strict(true);
        assert_eq!(source("-(\\d+)*", &options), "^-((?:\\d+)*)$");
    }

    #[test]
    fn test_literal_group() {
        let options = PatternOptions::default().with_strict(true);
        let tokens = parse("/page{s}?", &options).unwrap();
        let compiled = tokens_to_regexp(&tokens, &options);
        assert_eq!(compiled.source, "^/page(?:s)?$");
        assert!(compiled.keys.is_empty());
        assert!(!compiled.is_plain);
    }

    #[test]
    fn test_keys_follow_capture_order() {
        let options = PatternOptions::default();
        let tokens = parse("/(\\d+)/:b/{x-:c}?", &options).unwrap();
        let compiled = tokens_to_regexp(&tokens, &options);
        let names: Vec<String> = compiled.keys.iter().map(|k| k.name.to_string()).collect();
        assert_eq!(names, vec!["0", "b", "c"]);
    }

    #[test]
    fn test_encode_applies_to_literals() {
        let options = PatternOptions::default()
            .with_strict(true)
            .with_encode(crate::options::Codec::Percent);
        assert_eq!(source("/caf\u{e9}", &options), "^%2Fcaf%C3%A9$");
    }
}
