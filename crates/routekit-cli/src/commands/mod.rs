pub mod build;
pub mod match_cmd;
pub mod resolve;
pub mod tokens;

use colored::Colorize;
use routekit::{ParamValue, Params};

/// Prints parameters one per line, indented
pub(crate) fn print_params(params: &Params) {
    if params.is_empty() {
        println!("  {}", "(no parameters)".dimmed());
        return;
    }

    for (name, value) in params.iter() {
        let value = match value {
            ParamValue::Single(value) => value.clone(),
            ParamValue::Repeated(values) => format!("[{}]", values.join(", ")),
        };
        println!("  {} = {}", name.to_string().cyan(), value);
    }
}

pub(crate) fn print_no_match(path: &str) {
    println!("{} {}", "no match".red().bold(), path.dimmed());
}
