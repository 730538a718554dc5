//! Output formatting for the CLI.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shop_commerce::Money;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Human-readable output is suppressed in JSON mode.
    fn human(&self) -> bool {
        !self.json
    }

    pub fn info(&self, msg: &str) {
        if self.human() {
            println!("{} {msg}", style("ℹ").blue());
        }
    }

    pub fn success(&self, msg: &str) {
        if self.human() {
            println!("{} {msg}", style("✓").green());
        }
    }

    /// Print a warning to stderr.
    pub fn warn(&self, msg: &str) {
        if self.human() {
            eprintln!("{} {msg}", style("⚠").yellow());
        }
    }

    /// Print an error to stderr; in JSON mode as `{"error": ...}`.
    pub fn error(&self, msg: &str) {
        if self.human() {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        } else {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }

    /// Print an inline form error under a field.
    pub fn field_error(&self, field: &str, msg: &str) {
        if self.human() {
            println!("  {} {}", style(format!("{field}:")).dim(), style(msg).red());
        }
    }

    /// Print a message only with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && self.human() {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, msg: &str) {
        if self.human() {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    /// Print `value` as pretty JSON on stdout.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!(error = %e, "failed to render JSON output"),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.human() {
            println!("  {}: {value}", style(key).dim());
        }
    }

    /// Print one table row, padding each column to its width.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if !self.human() {
            return;
        }
        let row = cols
            .iter()
            .zip(widths)
            .map(|(col, &width)| format!("{col:width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {row}");
    }

    /// Show a spinner for `delay`, then clear it.
    pub async fn countdown(&self, msg: &str, delay: Duration) {
        let pb = if self.human() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        if let Ok(spinner) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        tokio::time::sleep(delay).await;
        pb.finish_and_clear();
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Format a price for a table cell, right-aligned.
pub fn price_cell(price: &Money, width: usize) -> String {
    format!("{:>width$}", price.display_compact(), width = width)
}

/// Badge for the cart line count.
pub fn cart_badge(count: usize) -> String {
    if count == 0 {
        style("cart").dim().to_string()
    } else {
        format!("cart {}", style(format!("({count})")).red().bold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_commerce::Currency;

    #[test]
    fn test_price_cell() {
        let price = Money::from_major(20, Currency::INR);
        assert_eq!(price_cell(&price, 8), "   Rs.20");
    }

    #[test]
    fn test_cart_badge_mentions_count() {
        assert!(cart_badge(3).contains('3'));
        assert!(cart_badge(0).contains("cart"));
    }
}
