//! Delivery of notifications to the desktop

use std::process::{Command, Stdio};

use super::Notification;
use crate::error::{HookError, Result};

/// Somewhere a notification can be delivered
pub trait NotificationSink {
    fn send(&self, notification: &Notification) -> Result<()>;
}

/// Shells out to the platform notification command:
/// `osascript` on macOS, `notify-send` elsewhere on unix.
#[derive(Debug, Clone, Default)]
pub struct OsNotifier {
    /// Sound name (macOS only)
    pub sound: Option<String>,
}

impl OsNotifier {
    pub fn new(sound: Option<String>) -> Self {
        Self { sound }
    }

    /// The program and arguments used to show `notification`
    pub fn command_line(&self, notification: &Notification) -> Result<(String, Vec<String>)> {
        if cfg!(target_os = "macos") {
            let mut script = format!(
                "display notification \"{}\" with title \"{}\"",
                applescript_escape(&notification.body),
                applescript_escape(&notification.title)
            );
            if let Some(sound) = &self.sound {
                script.push_str(&format!(" sound name \"{}\"", applescript_escape(sound)));
            }
            Ok(("osascript".to_string(), vec!["-e".to_string(), script]))
        } else if cfg!(unix) {
            Ok((
                "notify-send".to_string(),
                vec![
                    "--app-name=Claude Code".to_string(),
                    // title or body may start with '-'
                    "--".to_string(),
                    notification.title.clone(),
                    notification.body.clone(),
                ],
            ))
        } else {
            Err(HookError::Unsupported(std::env::consts::OS))
        }
    }
}

impl NotificationSink for OsNotifier {
    fn send(&self, notification: &Notification) -> Result<()> {
        let (program, args) = self.command_line(notification)?;
        let output = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| HookError::Notify(format!("{}: {}", program, e)))?;

        if !output.status.success() {
            return Err(HookError::Notify(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

/// Escape a string for use inside an AppleScript string literal
fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> Notification {
        Notification {
            title: "my-app".to_string(),
            body: "Use \"main\"?".to_string(),
        }
    }

    #[test]
    fn test_applescript_escape() {
        assert_eq!(applescript_escape(r#"say "hi" \o/"#), r#"say \"hi\" \\o/"#);
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_macos_command_line() {
        let notifier = OsNotifier::new(Some("Glass".to_string()));
        let (program, args) = notifier.command_line(&notification()).unwrap();
        assert_eq!(program, "osascript");
        assert_eq!(args[0], "-e");
        assert_eq!(
            args[1],
            r#"display notification "Use \"main\"?" with title "my-app" sound name "Glass""#
        );
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_linux_command_line() {
        let notifier = OsNotifier::new(Some("Glass".to_string()));
        let (program, args) = notifier.command_line(&notification()).unwrap();
        assert_eq!(program, "notify-send");
        assert_eq!(
            &args[1..],
            &["--".to_string(), "my-app".to_string(), "Use \"main\"?".to_string()]
        );
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_linux_dash_body_not_an_option() {
        let notification = Notification {
            title: "api".to_string(),
            body: "- All tests pass".to_string(),
        };
        let (_, args) = OsNotifier::default().command_line(&notification).unwrap();
        let sep = args.iter().position(|a| a == "--").unwrap();
        assert_eq!(&args[sep + 1..], &["api".to_string(), "- All tests pass".to_string()]);
    }
}
