//! Unified diffs between a source file and its processed output.

use similar::TextDiff;

/// Lines of unchanged context around each hunk.
pub const CONTEXT_LINES: usize = 4;

/// Patch turning `old` into `new`, both labelled `label`.
///
/// ```text
/// Index: dist/a.css
/// ===================================================================
/// --- dist/a.css
/// +++ dist/a.css
/// @@ -1,3 +1,4 @@
/// ```
///
/// Identical inputs produce only the `Index` header.
pub fn create_patch(label: &str, old: &str, new: &str) -> String {
    let hunks = TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(label, label)
        .to_string();
    format!("Index: {label}\n{}\n{hunks}", "=".repeat(67))
}
