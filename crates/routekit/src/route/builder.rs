/// Path builder: parameters → concrete path
///
/// The inverse of the matcher. Each supplied value is encoded and, unless
/// validation is disabled, checked against its parameter's capture pattern
/// so the produced path is guaranteed to match the pattern again.

use fancy_regex::Regex;

use crate::error::{BuildError, SyntaxError};
use crate::options::{Codec, PatternOptions};
use crate::params::{ParamValue, Params};
use crate::route::build_regex;
use crate::route::parser::{parse, Key, Token};

/// Compiled path template
///
/// # Examples
///
/// ```
/// use routekit::{compile, Params, PatternOptions};
///
/// let builder = compile("/user/:id(\\d+)", &PatternOptions::default()).unwrap();
///
/// assert_eq!(builder.build(&Params::new().with("id", 42)).unwrap(), "/user/42");
/// assert!(builder.build(&Params::new().with("id", "abc")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PathBuilder {
    tokens: Vec<Token>,
    /// One validator per token, `None` for literal text
    validators: Vec<Option<Regex>>,
    encode: Codec,
    validate: bool,
}

impl PathBuilder {
    pub fn new(pattern: &str, options: &PatternOptions) -> Result<Self, SyntaxError> {
        Self::from_tokens(parse(pattern, options)?, options)
    }

    pub fn from_tokens(tokens: Vec<Token>, options: &PatternOptions) -> Result<Self, SyntaxError> {
        let validators = tokens
            .iter()
            .map(|token| {
                token
                    .as_key()
                    .map(|key| build_regex(&format!("^(?:{})$", key.pattern), options.sensitive))
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            tokens,
            validators,
            encode: options.encode,
            validate: options.validate,
        })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Interpolates parameters into the pattern
    pub fn build(&self, data: &Params) -> Result<String, BuildError> {
        let mut path = String::new();

        for (token, validator) in self.tokens.iter().zip(&self.validators) {
            let key = match token {
                Token::Text(text) => {
                    path.push_str(text);
                    continue;
                }
                Token::Param(key) => key,
            };

            // `{literal}` groups carry no value of their own
            if key.pattern.is_empty() {
                if !key.modifier.is_optional() {
                    path.push_str(&key.prefix);
                    path.push_str(&key.suffix);
                }
                continue;
            }

            match data.get(&key.name.to_string()) {
                Some(ParamValue::Repeated(values)) => {
                    if !key.modifier.is_repeat() {
                        return Err(BuildError::UnexpectedRepeat {
                            name: key.name.to_string(),
                        });
                    }

                    if values.is_empty() {
                        if key.modifier.is_optional() {
                            continue;
                        }
                        return Err(BuildError::EmptyRepeat {
                            name: key.name.to_string(),
                        });
                    }

                    for value in values {
                        let segment = self.segment(key, validator.as_ref(), value)?;
                        push_segment(&mut path, key, &segment);
                    }
                }
                Some(ParamValue::Single(value)) => {
                    let segment = self.segment(key, validator.as_ref(), value)?;
                    push_segment(&mut path, key, &segment);
                }
                None if key.modifier.is_optional() => {}
                None => {
                    let expected = if key.modifier.is_repeat() {
                        "an array"
                    } else {
                        "a string"
                    };
                    return Err(BuildError::Missing {
                        name: key.name.to_string(),
                        expected,
                    });
                }
            }
        }

        Ok(path)
    }

    /// Encodes one value and checks it against the capture pattern
    fn segment(
        &self,
        key: &Key,
        validator: Option<&Regex>,
        value: &str,
    ) -> Result<String, BuildError> {
        let segment = self.encode.encode(value);

        if self.validate {
            // A validator that cannot finish is treated as a mismatch
            let valid = validator.map_or(true, |re| re.is_match(&segment).unwrap_or(false));
            if !valid {
                return Err(BuildError::InvalidSegment {
                    name: key.name.to_string(),
                    pattern: key.pattern.clone(),
                    segment,
                });
            }
        }

        Ok(segment)
    }
}

/// Parses a pattern and compiles it into a [`PathBuilder`]
pub fn compile(pattern: &str, options: &PatternOptions) -> Result<PathBuilder, SyntaxError> {
    PathBuilder::new(pattern, options)
}

fn push_segment(path: &mut String, key: &Key, segment: &str) {
    path.push_str(&key.prefix);
    path.push_str(segment);
    path.push_str(&key.suffix);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(pattern: &str) -> PathBuilder {
        PathBuilder::new(pattern, &PatternOptions::default()).unwrap()
    }

    #[test]
    fn test_build_plain() {
        assert_eq!(builder("/about").build(&Params::new()).unwrap(), "/about");
    }

    #[test]
    fn test_build_named() {
        let params = Params::new().with("productId", "abc");
        assert_eq!(
            builder("/product/:productId/info").build(&params).unwrap(),
            "/product/abc/info"
        );
    }

    #[test]
    fn test_build_custom_pattern_validation() {
        let b = builder("/:id(\\d+)");
        assert_eq!(b.build(&Params::new().with("id", "42")).unwrap(), "/42");

        let err = b.build(&Params::new().with("id", "abc")).unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidSegment {
                name: "id".to_string(),
                pattern: "\\d+".to_string(),
                segment: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_build_without_validation() {
        let options = PatternOptions::default().with_validate(false);
        let b = PathBuilder::new("/:id(\\d+)", &options).unwrap();
        assert_eq!(b.build(&Params::new().with("id", "abc")).unwrap(), "/abc");
    }

    #[test]
    fn test_build_missing_required() {
        let err = builder("/:id").build(&Params::new()).unwrap_err();
        assert_eq!(
            err,
            BuildError::Missing {
                name: "id".to_string(),
                expected: "a string",
            }
        );

        let err = builder("/:ids+").build(&Params::new()).unwrap_err();
        assert_eq!(
            err,
            BuildError::Missing {
                name: "ids".to_string(),
                expected: "an array",
            }
        );
    }

    #[test]
    fn test_build_missing_optional() {
        assert_eq!(builder("/a/:id?").build(&Params::new()).unwrap(), "/a");
        assert_eq!(builder("/a{/:id}?").build(&Params::new()).unwrap(), "/a");
    }

    #[test]
    fn test_build_repeated() {
        let params = Params::new().with("rest", vec!["a", "b", "c"]);
        assert_eq!(builder("/files/*rest").build(&params).unwrap(), "/files/a/b/c");
    }

    #[test]
    fn test_build_array_for_scalar_fails() {
        let params = Params::new().with("id", vec!["a"]);
        assert_eq!(
            builder("/:id").build(&params).unwrap_err(),
            BuildError::UnexpectedRepeat {
                name: "id".to_string()
            }
        );
    }

    #[test]
    fn test_build_empty_array() {
        let empty: Vec<String> = Vec::new();
        let params = Params::new().with("rest", empty);
        assert_eq!(builder("/files/:rest*").build(&params).unwrap(), "/files");
        assert_eq!(
            builder("/files/:rest+").build(&params).unwrap_err(),
            BuildError::EmptyRepeat {
                name: "rest".to_string()
            }
        );
    }

    #[test]
    fn test_build_repeated_validates_each_segment() {
        let params = Params::new().with("n", vec!["1", "x"]);
        let err = builder("/:n(\\d+)+").build(&params).unwrap_err();
        assert!(matches!(err, BuildError::InvalidSegment { segment, .. } if segment == "x"));
    }

    #[test]
    fn test_build_group_prefix_suffix() {
        let params = Params::new().with("id", "7");
        assert_eq!(builder("/a{/:id.json}?").build(&params).unwrap(), "/a/7.json");
    }

    #[test]
    fn test_build_ordinal() {
        let params = Params::new().with(0usize, "2024");
        assert_eq!(builder("/archive/(\\d{4})").build(&params).unwrap(), "/archive/2024");
    }

    #[test]
    fn test_build_literal_group() {
        assert_eq!(builder("/page{s}").build(&Params::new()).unwrap(), "/pages");
        assert_eq!(builder("/page{s}?").build(&Params::new()).unwrap(), "/page");
    }

    #[test]
    fn test_build_percent_encoding() {
        let options = PatternOptions::default().with_encode(Codec::Percent);
        let b = PathBuilder::new("/search/:q", &options).unwrap();
        let path = b.build(&Params::new().with("q", "a b/c")).unwrap();
        assert_eq!(path, "/search/a%20b%2Fc");
    }

    #[test]
    fn test_validation_is_case_insensitive_by_default() {
        let b = builder("/:lang(en|fr)");
        assert_eq!(b.build(&Params::new().with("lang", "EN")).unwrap(), "/EN");
    }
}
