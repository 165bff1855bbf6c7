//! Command-line arguments
//!
//! The argument forms the `tvctl` binary accepts, kept in the library so the
//! parsing rules can be exercised without spawning the binary.
//!
//! ```text
//! --toggle  input=inputrgbpc,inputhdmi1   → ("input", "inputrgbpc", "inputhdmi1")
//! --debounce togglepower                  → ("togglepower", default settle)
//! --debounce togglepower=0.5              → ("togglepower", 500ms)
//! --poweroff                              → "poweroff"
//! ```

use std::time::Duration;

use clap::Parser;

/// Command-line arguments of the `tvctl` binary
#[derive(Parser, Debug)]
#[command(name = "tvctl")]
#[command(about = "Send RS-232 control commands to a display")]
#[command(version)]
pub struct Args {
    /// Serial device
    #[arg(short, long, default_value = "/dev/ttyUSB0")]
    pub port: String,

    /// Display model name (e.g. 42LW650S)
    #[arg(short, long, default_value = "42LW650S")]
    pub model: String,

    /// Extra toggle: NAME=FIRST,SECOND registers toggleNAME
    #[arg(short, long = "toggle", value_name = "NAME=FIRST,SECOND")]
    pub toggles: Vec<String>,

    /// Debounce a command: COMMAND or COMMAND=SECONDS
    #[arg(short, long = "debounce", value_name = "COMMAND[=SECONDS]")]
    pub debounces: Vec<String>,

    /// Directory for debounce lock files
    #[arg(long)]
    pub lock_dir: Option<String>,

    /// List the commands available for the model and exit
    #[arg(short, long)]
    pub list: bool,

    /// Command to send; a leading "--" is accepted (--poweroff)
    #[arg(allow_hyphen_values = true, required_unless_present = "list")]
    pub command: Option<String>,
}

/// Parse `NAME=FIRST,SECOND`.
///
/// A `toggle` prefix on the name is dropped, so `togglepower=a,b` and
/// `power=a,b` register the same toggle. Any empty part rejects the value.
pub fn parse_toggle(value: &str) -> Option<(&str, &str, &str)> {
    let (name, states) = value.split_once('=')?;
    let (first, second) = states.split_once(',')?;

    let name = name.trim();
    let name = name.strip_prefix("toggle").unwrap_or(name);
    let (first, second) = (first.trim(), second.trim());

    if name.is_empty() || first.is_empty() || second.is_empty() {
        return None;
    }
    Some((name, first, second))
}

/// Parse `COMMAND` or `COMMAND=SECONDS`.
///
/// `None` for the settle means "use the configured default". Seconds must be
/// a finite, non-negative number.
pub fn parse_debounce(value: &str) -> Option<(&str, Option<Duration>)> {
    let (command, settle) = match value.split_once('=') {
        None => (value.trim(), None),
        Some((command, secs)) => {
            let secs: f64 = secs.trim().parse().ok()?;
            let settle = Duration::try_from_secs_f64(secs).ok()?;
            (command.trim(), Some(settle))
        }
    };

    if command.is_empty() {
        return None;
    }
    Some((command, settle))
}

/// Command name from the positional argument; `--poweroff` means `poweroff`
pub fn command_name(arg: &str) -> &str {
    arg.trim_start_matches('-')
}
