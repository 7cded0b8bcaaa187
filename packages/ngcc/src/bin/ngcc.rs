/**
 * Angular ngcc - Rust Implementation
 *
 * Main entry point: transforms compiled Angular modules file by file
 */
use anyhow::{Context, Result};
use clap::{Arg, Command};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process;

use angular_ngcc::logging::{ConsoleLogger, LogLevel, Logger};
use angular_ngcc::util::path::output_path;
use angular_ngcc::{transform_file, FormatOption, NgccConfig};

fn main() {
    let matches = Command::new("ngcc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Angular compatibility compiler (Rust implementation)")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to an ngcc JSON config file"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .value_parser(|s: &str| s.parse::<FormatOption>())
                .help("Module format of the inputs: auto, esm2015 or esm5"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .required(true)
                .help("Directory the transformed files and their maps are written to"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(|s: &str| s.parse::<LogLevel>())
                .help("Minimum level of logged messages: debug, info, warn or error"),
        )
        .arg(
            Arg::new("files")
                .value_name("FILES")
                .num_args(1..)
                .required(true)
                .help("Compiled modules to transform"),
        )
        .get_matches();

    let config = match load_config(
        matches.get_one::<String>("config").map(Path::new),
        matches.get_one::<FormatOption>("format").copied(),
        matches.get_one::<LogLevel>("log-level").copied(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    let logger = ConsoleLogger::new(config.log_level);
    let out_dir = matches
        .get_one::<String>("out-dir")
        .map(String::as_str)
        .unwrap_or(".");
    let files: Vec<(String, String)> = matches
        .get_many::<String>("files")
        .map(|files| {
            files
                .map(|file| {
                    let file = file.replace('\\', "/");
                    let target = output_path(out_dir, &file);
                    (file, target)
                })
                .collect()
        })
        .unwrap_or_default();

    let mut targets: HashMap<&str, &str> = HashMap::new();
    for (file, target) in &files {
        if let Some(previous) = targets.insert(target.as_str(), file.as_str()) {
            logger.error(&format!(
                "{} and {} would both be written to {}",
                previous, file, target
            ));
            process::exit(1);
        }
    }

    let failures: usize = files
        .par_iter()
        .map(|(file, target)| match process_file(file, target, &config, &logger) {
            Ok(()) => 0,
            Err(e) => {
                logger.error(&format!("{:#}", e));
                1
            }
        })
        .sum();

    if failures > 0 {
        logger.error(&format!("{} of {} files could not be transformed", failures, files.len()));
        process::exit(1);
    }
}

fn load_config(
    path: Option<&Path>,
    format: Option<FormatOption>,
    log_level: Option<LogLevel>,
) -> Result<NgccConfig> {
    let mut config = match path {
        Some(path) => NgccConfig::load(path)?,
        None => NgccConfig::default(),
    };
    if let Some(format) = format {
        config.format = format;
    }
    if let Some(log_level) = log_level {
        config.log_level = log_level;
    }
    Ok(config)
}

fn process_file(file: &str, target_path: &str, config: &NgccConfig, logger: &dyn Logger) -> Result<()> {
    let contents = fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?;

    let result = transform_file(file, &contents, target_path, config, logger)
        .with_context(|| format!("Failed to transform {}", file))?;

    if let Some(parent) = Path::new(target_path).parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&result.source.path, &result.source.contents)
        .with_context(|| format!("Failed to write {}", result.source.path))?;
    fs::write(&result.map.path, &result.map.contents)
        .with_context(|| format!("Failed to write {}", result.map.path))?;

    logger.info(&format!("{} -> {}", file, result.source.path));
    Ok(())
}
