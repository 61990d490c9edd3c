//! Terminal formatting helpers.

use crate::registry::Preview;
use colored::Colorize;

/// Quote `value` and right-align it in a column of `width`.
///
/// Values wider than the column are left as is.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

/// Human readable summary of a form preview.
pub fn format_preview(preview: &Preview) -> String {
    let mut lines = Vec::new();
    match (&preview.prefix, preview.entry_count, preview.range) {
        (Some(prefix), Some(count), Some(range)) => {
            let kind = if prefix.is_area_code() {
                "area code"
            } else {
                "exchange prefix"
            };
            lines.push(format!("{prefix}: {kind}, {count} entries"));
            lines.push(format!("  range {range}"));
        }
        _ => lines.push(format!("'{}': not a valid prefix", preview.candidate)),
    }
    if let Some(existing) = &preview.conflicting {
        lines.push(format!("  overlaps blocked prefix {existing}"));
    }
    match preview.total_after {
        Some(after) => lines.push(format!(
            "  total {} -> {after}",
            preview.current_total
        )),
        None => lines.push(format!("  total {}", preview.current_total)),
    }
    match &preview.rejection {
        None => lines.push(format!("  {}", "can be added".green())),
        Some(reason) => lines.push(format!("  {} {reason}", "rejected:".red())),
    }
    lines.join("\n")
}
