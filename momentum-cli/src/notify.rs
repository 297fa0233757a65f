//! Terminal notification sink.
//!
//! Toasts become stderr/stdout lines. Duration is carried by the payload
//! but a terminal has nothing to do with it.

use momentum_core::{Notification, Notifier, Severity};

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Error => eprintln!("!! {}: {}", n.title, n.body),
            Severity::Warning => eprintln!("~ {}: {}", n.title, n.body),
            Severity::Success | Severity::Info => println!("{}  {}", n.title, n.body),
        }
    }
}
