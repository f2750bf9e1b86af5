//! Source excerpts for syntax errors.

use std::fmt::Write as _;

/// Render the line at `line` (1-based) with one line of context on each side
/// and a caret under `column` (1-based).
///
/// ```text
///   1 | a {
/// > 2 |   ..b: red;
///     |   ^
///   3 | }
/// ```
pub fn excerpt(input: &str, line: u32, column: u32) -> String {
    let lines: Vec<&str> = input.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let target = (line.max(1) as usize).min(lines.len());
    let first = target.saturating_sub(1).max(1);
    let last = (target + 1).min(lines.len());
    let width = last.to_string().len();

    let mut out = String::new();
    for number in first..=last {
        let marker = if number == target { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {number:>width$} | {}", lines[number - 1]);
        if number == target {
            let pad = " ".repeat(column.saturating_sub(1) as usize);
            let _ = writeln!(out, "  {:width$} | {pad}^", "");
        }
    }
    out.truncate(out.trim_end().len());
    out
}
