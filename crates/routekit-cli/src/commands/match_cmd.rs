use anyhow::{Context, Result};
use colored::Colorize;
use routekit::{Codec, Matcher, PatternOptions};

use super::{print_no_match, print_params};

pub struct MatchOptions {
    pub sensitive: bool,
    pub strict: bool,
    pub prefix_match: bool,
    pub json: bool,
}

/// Returns whether the path matched
pub fn execute(pattern: &str, path: &str, opts: MatchOptions) -> Result<bool> {
    let options = PatternOptions::default()
        .with_sensitive(opts.sensitive)
        .with_strict(opts.strict)
        .with_end(!opts.prefix_match)
        .with_decode(Codec::Percent);

    let matcher = Matcher::new(pattern, &options)
        .with_context(|| format!("Invalid pattern: {}", pattern))?;

    let found = matcher.matches(path);

    if opts.json {
        let value = match &found {
            Some(m) => serde_json::json!({
                "matched": true,
                "path": m.path,
                "index": m.index,
                "params": m.params,
            }),
            None => serde_json::json!({ "matched": false }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(found.is_some());
    }

    match found {
        Some(m) => {
            println!("{} {}", "matched".green().bold(), m.path);
            print_params(&m.params);
            Ok(true)
        }
        None => {
            print_no_match(path);
            Ok(false)
        }
    }
}
