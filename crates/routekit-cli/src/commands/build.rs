use anyhow::{bail, Context, Result};
use colored::Colorize;
use routekit::{compile, Codec, ParamValue, Params, PatternOptions};

pub fn execute(pattern: &str, args: &[String], validate: bool, encode: bool) -> Result<()> {
    let mut options = PatternOptions::default().with_validate(validate);
    if encode {
        options = options.with_encode(Codec::Percent);
    }

    let builder = compile(pattern, &options)
        .with_context(|| format!("Invalid pattern: {}", pattern))?;

    let params = parse_params(args)?;
    let path = builder
        .build(&params)
        .with_context(|| format!("Cannot build {}", pattern))?;

    println!("{}", path.green());
    Ok(())
}

/// Collects `name=value` arguments; a repeated name becomes a sequence
fn parse_params(args: &[String]) -> Result<Params> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();

    for arg in args {
        let Some((name, value)) = arg.split_once('=') else {
            bail!("Expected name=value, got {:?}", arg);
        };

        match grouped.iter_mut().find(|(n, _)| n == name) {
            Some((_, values)) => values.push(value.to_string()),
            None => grouped.push((name.to_string(), vec![value.to_string()])),
        }
    }

    Ok(grouped
        .into_iter()
        .map(|(name, mut values)| {
            let value = if values.len() == 1 {
                ParamValue::Single(values.remove(0))
            } else {
                ParamValue::Repeated(values)
            };
            (name, value)
        })
        .collect())
}
