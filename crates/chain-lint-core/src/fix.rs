//! Application of automatic fixes to source text.

use crate::types::Violation;

/// A single source edit: replace bytes `[start..end)` with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    /// Byte offset, inclusive.
    pub start: usize,
    /// Byte offset, exclusive.
    pub end: usize,
    /// Replacement text (empty string = deletion).
    pub text: String,
}

/// A set of non-overlapping fixes, sorted by start offset.
///
/// Overlapping fixes are resolved by dropping the later one; the dropped
/// edit is picked up by the next fix pass if its violation persists.
/// Insertions at the same offset are all kept, in input order.
#[derive(Debug, Default)]
pub struct FixSet {
    fixes: Vec<Fix>,
}

impl FixSet {
    /// Builds a fix set from an unsorted list of edits.
    #[must_use]
    pub fn from_vec(mut raw: Vec<Fix>) -> Self {
        raw.sort_by_key(|f| (f.start, f.end));

        let mut accepted: Vec<Fix> = Vec::with_capacity(raw.len());
        for fix in raw {
            if let Some(last) = accepted.last() {
                if fix.start < last.end {
                    continue;
                }
            }
            accepted.push(fix);
        }

        Self { fixes: accepted }
    }

    /// Collects the automatic fixes carried by `violations`.
    #[must_use]
    pub fn from_violations<'a>(violations: impl IntoIterator<Item = &'a Violation>) -> Self {
        let raw = violations
            .into_iter()
            .filter_map(Violation::fix)
            .map(|r| Fix {
                start: r.location.offset,
                end: r.location.offset + r.location.length,
                text: r.new_text.clone(),
            })
            .collect();
        Self::from_vec(raw)
    }

    /// Applies the fixes to `source` in a single linear pass.
    ///
    /// Edits whose range does not fall on character boundaries of `source`
    /// are skipped.
    #[must_use]
    pub fn apply(&self, source: &str) -> String {
        let mut result = String::with_capacity(source.len() + self.fixes.len());
        let mut cursor = 0;

        for fix in &self.fixes {
            if fix.end < fix.start || !source.is_char_boundary(fix.end) {
                continue;
            }
            let Some(before) = source.get(cursor..fix.start) else {
                continue;
            };
            result.push_str(before);
            result.push_str(&fix.text);
            cursor = fix.end;
        }

        result.push_str(source.get(cursor..).unwrap_or(""));
        result
    }

    /// Returns true when there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Number of accepted fixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fixes.len()
    }
}
