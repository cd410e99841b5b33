use anyhow::{Context, Result};
use colored::Colorize;
use routekit::{parse, PatternOptions, Token};

pub fn execute(pattern: &str) -> Result<()> {
    let tokens = parse(pattern, &PatternOptions::default())
        .with_context(|| format!("Invalid pattern: {}", pattern))?;

    println!("{} {}", "Tokens for".green().bold(), pattern.cyan());
    println!();

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Text(text) => println!("{:>3}  {:<6} {:?}", i, "text".yellow(), text),
            Token::Param(key) => println!(
                "{:>3}  {:<6} name={} prefix={:?} suffix={:?} pattern={:?} modifier={:?}",
                i,
                "param".blue(),
                key.name.to_string().cyan(),
                key.prefix,
                key.suffix,
                key.pattern,
                key.modifier.as_str(),
            ),
        }
    }

    Ok(())
}
