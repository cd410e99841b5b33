mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "routekit")]
#[command(version, about = "routekit CLI - match and build route patterns", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token sequence of a pattern
    Tokens {
        /// Route pattern, e.g. "/user/:id"
        pattern: String,
    },

    /// Match a path against a pattern
    Match {
        pattern: String,

        path: String,

        /// Case-sensitive matching
        #[arg(long)]
        sensitive: bool,

        /// Reject an optional trailing delimiter
        #[arg(long)]
        strict: bool,

        /// Match a prefix of the path instead of the whole path
        #[arg(long)]
        prefix_match: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a path from name=value parameters
    Build {
        pattern: String,

        /// Parameters as name=value (repeat a name to build a sequence)
        params: Vec<String>,

        /// Skip validating values against their capture patterns
        #[arg(long)]
        no_validate: bool,

        /// Percent-encode parameter values
        #[arg(long)]
        encode: bool,
    },

    /// Resolve paths against a route table
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,

        /// Route table file
        #[arg(short, long, default_value = "routekit.toml")]
        config: PathBuf,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let matched = match cli.command {
        Commands::Tokens { pattern } => {
            commands::tokens::execute(&pattern)?;
            true
        }
        Commands::Match {
            pattern,
            path,
            sensitive,
            strict,
            prefix_match,
            json,
        } => {
            let options = commands::match_cmd::MatchOptions {
                sensitive,
                strict,
                prefix_match,
                json,
            };
            commands::match_cmd::execute(&pattern, &path, options)?
        }
        Commands::Build {
            pattern,
            params,
            no_validate,
            encode,
        } => {
            commands::build::execute(&pattern, &params, !no_validate, encode)?;
            true
        }
        Commands::Resolve {
            paths,
            config,
            json,
        } => commands::resolve::execute(&paths, &config, json)?,
    };

    Ok(if matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
