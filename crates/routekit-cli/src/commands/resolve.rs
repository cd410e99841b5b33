use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use routekit::RouterConfig;
use tracing::info;

use super::{print_no_match, print_params};

/// Resolves every path; returns false if any of them matched nothing
pub fn execute(paths: &[String], config_path: &Path, json: bool) -> Result<bool> {
    let config = RouterConfig::load(config_path)?;
    let router = config
        .into_router()
        .with_context(|| format!("Invalid route in {:?}", config_path))?;

    info!(routes = router.len(), config = ?config_path, "loaded route table");

    let mut all_matched = true;
    let mut results = Vec::with_capacity(paths.len());

    for path in paths {
        let resolved = router.resolve(path);
        all_matched &= resolved.is_some();

        if json {
            results.push(match resolved {
                Some(found) => serde_json::json!({
                    "path": found.path,
                    "pattern": found.pattern,
                    "name": found.meta.name,
                    "meta": found.meta.meta,
                    "params": found.params,
                }),
                None => serde_json::json!({ "path": path, "pattern": null }),
            });
            continue;
        }

        match resolved {
            Some(found) => {
                println!(
                    "{} {} {} {}",
                    found.path,
                    "→".dimmed(),
                    found.meta.name.green().bold(),
                    format!("({})", found.pattern).dimmed()
                );
                print_params(&found.params);
            }
            None => print_no_match(path),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(all_matched)
}
