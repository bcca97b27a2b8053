use crate::views::Alerts;
use std::io::{BufRead, Write};

/// Alerts on stdout; confirmations read a `s/n` answer from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalAlerts {
    assume_yes: bool,
}

impl TerminalAlerts {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Alerts for TerminalAlerts {
    fn alert(&self, message: &str) {
        println!("{message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{message} [s/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                tracing::warn!(error = %err, "could not read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}
