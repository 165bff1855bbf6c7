//! tvctl CLI
//!
//! Sends one command to a display over its serial control port.
//!
//! ```text
//! tvctl --port /dev/ttyUSB0 --model 42LW650S poweroff
//! tvctl --toggle input=inputrgbpc,inputhdmi1 --debounce togglepower --togglepower
//! tvctl --list
//! ```
//!
//! Prints the payload for status queries and `true` for actions. On failure
//! nothing is printed to stdout and the exit status is 1.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use tvctl::cli::{command_name, parse_debounce, parse_toggle, Args};
use tvctl::{Config, Tv};

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the result
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tvctl=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = Config::builder().port(&args.port).model(&args.model);
    if let Some(dir) = &args.lock_dir {
        builder = builder.lock_dir(dir);
    }
    let config = builder.build();

    let mut tv = match Tv::open(config) {
        Ok(tv) => tv,
        Err(e) => {
            tracing::error!("Failed to set up display: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for spec in &args.toggles {
        let registered = parse_toggle(spec)
            .ok_or_else(|| format!("expected NAME=FIRST,SECOND, got {:?}", spec))
            .and_then(|(name, first, second)| {
                tv.add_toggle(name, first, second).map_err(|e| e.to_string())
            });
        if let Err(e) = registered {
            tracing::error!("Bad --toggle: {}", e);
            return ExitCode::FAILURE;
        }
    }

    for spec in &args.debounces {
        match parse_debounce(spec) {
            Some((command, Some(settle))) => tv.debounce(command, settle),
            Some((command, None)) => tv.debounce_default(command),
            None => {
                tracing::error!("Bad --debounce: {:?}", spec);
                return ExitCode::FAILURE;
            }
        }
    }

    if args.list {
        println!("Some features (such as a 4th HDMI port) might not be available for your model");
        for (name, code) in tv.available_commands() {
            println!("{} : {}", name, code);
        }
        return ExitCode::SUCCESS;
    }

    let command = command_name(args.command.as_deref().unwrap_or_default());

    match tv.send(command) {
        Ok(reply) => {
            println!("{}", reply);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}: {}", command, e);
            ExitCode::FAILURE
        }
    }
}
