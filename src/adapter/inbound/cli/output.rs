//! Terminal output for CLI handlers.
//!
//! Each printer is routed by the global [`OutputMode`]: JSON mode writes a
//! `{"type": ..., "payload": ...}` line, quiet mode drops progress chatter
//! but keeps warnings and results.

use std::fmt::Display;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output switches taken from `--json` and `--quiet`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputMode {
    pub json: bool,
    pub quiet: bool,
}

/// How much a line matters when the user asked for quiet output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Weight {
    Chatter,
    Essential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Json,
    Human,
    Drop,
}

impl OutputMode {
    #[must_use]
    pub const fn from_flags(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    fn route(self, weight: Weight) -> Route {
        if self.json {
            Route::Json
        } else if self.quiet && weight == Weight::Chatter {
            Route::Drop
        } else {
            Route::Human
        }
    }
}

static MODE: RwLock<OutputMode> =
    parking_lot::const_rwlock(OutputMode::from_flags(false, false));

/// Install the mode for the rest of the process.
pub fn configure(mode: OutputMode) {
    *MODE.write() = mode;
}

fn mode() -> OutputMode {
    *MODE.read()
}

#[must_use]
pub fn is_json() -> bool {
    mode().json
}

#[must_use]
pub fn is_quiet() -> bool {
    mode().quiet
}

fn emit(kind: &str, weight: Weight, payload: impl FnOnce() -> Value, human: impl FnOnce()) {
    match mode().route(weight) {
        Route::Json => println!("{}", json!({ "type": kind, "payload": payload() })),
        Route::Human => human(),
        Route::Drop => {}
    }
}

pub fn header(version: &str) {
    emit(
        "header",
        Weight::Chatter,
        || json!({ "app": env!("CARGO_PKG_NAME"), "version": version }),
        || println!("{} {}\n", env!("CARGO_PKG_NAME").bold(), version.dimmed()),
    );
}

/// A `label value` pair, labels padded to one column.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        Weight::Chatter,
        || json!({ "label": label, "value": value }),
        || println!("  {:<14} {}", label.dimmed(), value),
    );
}

pub fn section(title: &str) {
    emit(
        "section",
        Weight::Chatter,
        || json!({ "title": title }),
        || println!("\n{}", title.bold()),
    );
}

pub fn success(message: &str) {
    emit(
        "success",
        Weight::Chatter,
        || json!({ "message": message }),
        || println!("  {} {message}", "✓".green()),
    );
}

pub fn warning(message: &str) {
    emit(
        "warning",
        Weight::Essential,
        || json!({ "message": message }),
        || println!("  {} {message}", "⚠".yellow()),
    );
}

pub fn note(message: &str) {
    emit(
        "note",
        Weight::Chatter,
        || json!({ "message": message }),
        || println!("  {}", message.dimmed()),
    );
}

pub fn hint(message: &str) {
    emit(
        "hint",
        Weight::Chatter,
        || json!({ "message": message }),
        || println!("  {}: {}", "hint".cyan(), message.dimmed()),
    );
}

/// Print a result document as a single line, bypassing the envelope.
pub fn json_output(value: Value) {
    println!("{value}");
}

/// Rounded table, indented two spaces. Printed even when quiet.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    for line in table.to_string().lines() {
        println!("  {line}");
    }
}

/// Colour `text` by the sign of `value`.
#[must_use]
pub fn signed(value: f64, text: impl Display) -> String {
    let text = text.to_string();
    match value.partial_cmp(&0.0) {
        _ if is_json() => text,
        Some(std::cmp::Ordering::Greater) => text.green().to_string(),
        Some(std::cmp::Ordering::Less) => text.red().to_string(),
        _ => text,
    }
}

#[must_use]
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        value.cyan().bold().to_string()
    }
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner for a long fetch. Hidden unless output is interactive text.
pub fn spinner(message: &str) -> ProgressBar {
    let mode = mode();
    let pb = if mode.json || mode.quiet {
        ProgressBar::hidden()
    } else {
        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);
        let pb = ProgressBar::new_spinner().with_style(style);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    };
    pb.set_message(message.to_string());
    pb
}

pub fn spinner_success(pb: &ProgressBar, message: &str) {
    finish(pb, "spinner_success", Weight::Chatter, message, "✓".green().to_string());
}

pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    finish(pb, "spinner_fail", Weight::Essential, message, "×".red().to_string());
}

fn finish(pb: &ProgressBar, kind: &str, weight: Weight, message: &str, mark: String) {
    match mode().route(weight) {
        Route::Human => pb.finish_with_message(format!("{mark} {message}")),
        Route::Json => {
            pb.finish_and_clear();
            println!("{}", json!({ "type": kind, "payload": { "message": message } }));
        }
        Route::Drop => pb.finish_and_clear(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_routes_everything_to_json() {
        let mode = OutputMode::from_flags(true, true);
        assert_eq!(mode.route(Weight::Chatter), Route::Json);
        assert_eq!(mode.route(Weight::Essential), Route::Json);
    }

    #[test]
    fn test_quiet_mode_keeps_only_essential_lines() {
        let mode = OutputMode::from_flags(false, true);
        assert_eq!(mode.route(Weight::Chatter), Route::Drop);
        assert_eq!(mode.route(Weight::Essential), Route::Human);
    }

    #[test]
    fn test_default_mode_is_human() {
        assert_eq!(OutputMode::default().route(Weight::Chatter), Route::Human);
    }
}
