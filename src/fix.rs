//! Suggested fixes: byte-range edits attached to offenses.
//!
//! Fixes are advisory. They are only collected when the user opted in with
//! `--fix`, and the linter re-parses the patched source before writing it,
//! discarding the whole batch if the edit produced invalid syntax.

/// A single source-level edit: replace byte range [start..end) with replacement.
#[derive(Debug, Clone)]
pub struct Fix {
    /// Byte offset, inclusive.
    pub start: usize,
    /// Byte offset, exclusive.
    pub end: usize,
    /// Replacement text (empty string = deletion).
    pub replacement: String,
    /// Cop that produced this fix.
    pub cop_name: &'static str,
    /// Registry index for deterministic conflict resolution (lower wins).
    pub cop_index: usize,
}

/// A set of non-overlapping fixes, sorted by start offset.
///
/// Overlapping fixes are resolved by dropping the later one (first merged
/// wins). When two fixes start at the same offset, the one from the earlier
/// cop in registry order wins.
pub struct FixSet {
    fixes: Vec<Fix>,
}

impl FixSet {
    /// Build from an unsorted vec of fixes.
    pub fn from_vec(mut raw: Vec<Fix>) -> Self {
        raw.sort_by(|a, b| a.start.cmp(&b.start).then(a.cop_index.cmp(&b.cop_index)));

        let mut accepted: Vec<Fix> = Vec::with_capacity(raw.len());
        for f in raw {
            if let Some(last) = accepted.last() {
                if f.start < last.end {
                    // Overlaps with the previously accepted fix.
                    continue;
                }
            }
            accepted.push(f);
        }

        Self { fixes: accepted }
    }

    /// Apply the fixes to source bytes in a single linear scan.
    pub fn apply(&self, source: &[u8]) -> Vec<u8> {
        let mut result = Vec::with_capacity(source.len());
        let mut cursor = 0;

        for f in &self.fixes {
            if f.start > cursor {
                result.extend_from_slice(&source[cursor..f.start]);
            }
            result.extend_from_slice(f.replacement.as_bytes());
            cursor = f.end;
        }

        if cursor < source.len() {
            result.extend_from_slice(&source[cursor..]);
        }

        result
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }
}
