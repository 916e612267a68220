//! Terminal output: broadcasts and station rosters, colored with `console`.

use console::Style;

use wanted_status::memory::MemoryHost;
use wanted_status::notification::NotificationMessage;
use wanted_status::records::SecurityStatus;

pub fn broadcasts_json(messages: &[NotificationMessage]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(messages)
}

/// Styles shared by every printer.
pub struct Printer {
    red: Style,
    yellow: Style,
    green: Style,
    dim: Style,
    bold: Style,
}

impl Default for Printer {
    fn default() -> Self {
        Self {
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            green: Style::new().green(),
            dim: Style::new().dim(),
            bold: Style::new().bold(),
        }
    }
}

impl Printer {
    pub fn heading(&self, text: &str) {
        println!();
        println!("{}", self.bold.apply_to(format!("─── {text} ───")));
    }

    /// One line per broadcast, prefixed with its channel.
    pub fn broadcasts(&self, messages: &[NotificationMessage]) {
        if messages.is_empty() {
            println!("  {}", self.dim.apply_to("(no broadcast)"));
            return;
        }
        for msg in messages {
            println!(
                "  {} {}",
                self.yellow.apply_to(format!("[{}]", msg.channel)),
                msg.text
            );
        }
    }

    /// Prints the broadcasts as a JSON array and nothing else.
    pub fn broadcasts_json(&self, messages: &[NotificationMessage]) -> serde_json::Result<()> {
        println!("{}", broadcasts_json(messages)?);
        Ok(())
    }

    /// Every station and its records, wanted entries highlighted.
    pub fn rosters(&self, host: &MemoryHost) {
        for (station, name) in host.stations() {
            self.heading(&format!("{name} ({station})"));
            for (id, general, criminal) in host.roster(station) {
                let status = match criminal.status {
                    SecurityStatus::Wanted => self.red.apply_to(criminal.status.to_string()),
                    SecurityStatus::None => self.green.apply_to(criminal.status.to_string()),
                    _ => self.yellow.apply_to(criminal.status.to_string()),
                };
                let reason = criminal
                    .reason
                    .as_deref()
                    .map(|r| format!(" {}", self.dim.apply_to(format!("({r})"))))
                    .unwrap_or_default();
                println!(
                    "  {id:>3}  {:<16} {:<16} {status}{reason}",
                    general.name, general.job_title
                );
            }
        }
    }
}
