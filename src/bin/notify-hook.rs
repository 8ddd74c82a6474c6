//! notify-hook - desktop notifications for Claude Code
//!
//! Reads a Notification or Stop hook payload from stdin and shows it as a
//! desktop notification. Never fails the host: bad input and delivery
//! errors are reported on stderr and the exit code is always 0.

use std::env;
use std::io::{self, Read};
use std::path::Path;

use claude_hooks::{
    audit::{AuditEntry, AuditLogger, HookKind},
    notify::{self, Outcome},
    Config, HookError, NotificationEvent, NotificationInput, OsNotifier,
};

fn print_help() {
    println!(
        r#"notify-hook - desktop notifications for Claude Code

USAGE:
    notify-hook [OPTIONS] < hook-input.json

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -c, --config PATH       Path to config file

ENVIRONMENT:
    CLAUDE_HOOKS_NO_NOTIFY=1  Disable notifications
    CLAUDE_PROJECT_DIR        Project directory when the payload has no cwd
"#
    );
}

struct Args {
    help: bool,
    version: bool,
    config_path: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            config_path: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                arg if arg.starts_with("--config=") => {
                    result.config_path = Some(arg.trim_start_matches("--config=").to_string());
                }
                _ => {}
            }
            i += 1;
        }

        result
    }
}

fn read_input() -> Result<NotificationInput, HookError> {
    let mut input_json = String::new();
    io::stdin().read_to_string(&mut input_json)?;
    if input_json.trim().is_empty() {
        return Err(HookError::EmptyInput);
    }
    Ok(NotificationInput::from_json(&input_json)?)
}

fn main() {
    let args = Args::parse();

    if args.help {
        print_help();
        return;
    }

    if args.version {
        println!("notify-hook {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let mut config = match args.config_path {
        Some(ref path) => Config::load_from(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Warning: {}", e);
            Config::default()
        }),
        None => Config::load(),
    };
    config.apply_env();

    let mut logger = AuditLogger::new(config.audit_path().as_deref());

    let mut input = match read_input() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Warning: {} (no notification sent)", e);
            let entry = AuditEntry::for_parse_error(HookKind::Notify, &e.to_string());
            if let Err(log_err) = logger.log(&entry) {
                eprintln!("Warning: Failed to write audit log: {}", log_err);
            }
            return;
        }
    };
    if input.cwd.is_none() {
        input.cwd = env::var("CLAUDE_PROJECT_DIR").ok();
    }

    let event = NotificationEvent::from_input(input);
    let sink = OsNotifier::new(config.notify.sound.clone());
    let outcome = notify::run(&event, &config.notify, &sink);

    if let Outcome::Failed(_, ref e) = outcome {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = logger.log(&AuditEntry::for_notification(&event, &outcome)) {
        eprintln!("Warning: Failed to write audit log: {}", e);
    }
}
