use std::io::{self, BufRead, Write};

/// Blocking yes/no decision point in front of destructive operations.
/// `false` is an unconditional abort with no side effects.
pub trait ConfirmationGate {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Blocking failure alert, distinct from the transient banner: the user has
/// to acknowledge before the affected control is usable again.
pub trait AlertGate {
    fn alert(&self, text: &str);
}

/// Terminal stand-ins for the page's confirm/alert dialogs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleGate;

impl ConfirmationGate for ConsoleGate {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    }
}

impl AlertGate for ConsoleGate {
    fn alert(&self, text: &str) {
        println!("!! {}", text);
    }
}
