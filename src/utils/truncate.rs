//! Report Truncation
//!
//! Counterexamples are rendered with `Debug`, which can be arbitrarily
//! large for collection-like types. Long renderings keep a prefix and a
//! suffix and note how much was dropped, respecting UTF-8 boundaries.

use std::fmt::Debug;

/// Longest rendering of a single sampled value kept in a report.
pub const MAX_VALUE_BYTES: usize = 512;

pub fn truncate_text(content: &str, max_bytes: usize) -> String {
    if content.len() <= max_bytes {
        return content.to_string();
    }

    if max_bytes == 0 {
        return format!("... [{} chars truncated] ...", content.len());
    }

    let half = max_bytes / 2;

    let prefix_end = content
        .char_indices()
        .map(|(idx, c)| idx + c.len_utf8())
        .take_while(|end| *end <= half)
        .last()
        .unwrap_or(0);

    let suffix_target = content.len().saturating_sub(half);
    let suffix_start = content
        .char_indices()
        .map(|(idx, _)| idx)
        .find(|idx| *idx >= suffix_target)
        .unwrap_or(content.len())
        .max(prefix_end);

    let prefix = &content[..prefix_end];
    let suffix = &content[suffix_start..];
    let dropped = content.len() - (prefix.len() + suffix.len());

    format!("{} ... [{} chars truncated] ... {}", prefix, dropped, suffix)
}

/// Renders sampled values as a comma separated list.
pub fn render_values<T: Debug>(values: &[T]) -> String {
    values
        .iter()
        .map(|value| truncate_text(&format!("{:?}", value), MAX_VALUE_BYTES))
        .collect::<Vec<_>>()
        .join(", ")
}
