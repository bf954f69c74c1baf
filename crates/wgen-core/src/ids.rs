//! Per-row identifier generation.
//!
//! Two strategies exist, selected by the schema variant: zero-padded
//! sequential ids (`task_007`) and question slugs with run-scoped collision
//! resolution (`same-q`, `same-q-1`, `same-q-2`). The collision table lives
//! inside the generator so its lifetime is bounded to one run.

use std::collections::HashMap;

use crate::variant::IdStrategy;

/// Longest slug produced before word-boundary truncation.
pub const DEFAULT_SLUG_MAX_LENGTH: usize = 50;

/// Prefix for sequential ids.
pub const DEFAULT_SEQUENTIAL_PREFIX: &str = "task_";

const EMPTY_SLUG: &str = "untitled";

/// Derive a filesystem-safe slug from free text.
///
/// Lower-cases, strips everything outside alphanumerics, underscore, hyphen,
/// and whitespace, collapses hyphen/whitespace runs into a single hyphen, and
/// trims. Results longer than `max_length` are cut at `max_length` characters
/// and the trailing partial hyphen-delimited segment is dropped. Empty input
/// slugifies to `"untitled"`.
#[must_use]
pub fn slugify(text: &str, max_length: usize) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.to_lowercase().chars() {
        if ch.is_alphanumeric() || ch == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else if ch == '-' || ch.is_whitespace() {
            pending_hyphen = true;
        }
        // anything else is stripped without acting as a separator
    }

    if slug.chars().count() > max_length {
        let truncated: String = slug.chars().take(max_length).collect();
        slug = match truncated.rsplit_once('-') {
            Some((head, _)) => head.to_string(),
            None => truncated,
        };
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// Run-scoped base-slug collision table.
///
/// The first occurrence of a base keeps it unsuffixed; the n-th repeat gets
/// `-<n>` with n starting at 1.
#[derive(Debug, Default)]
pub struct SlugTable {
    counts: HashMap<String, u32>,
}

impl SlugTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `base` and return the unique identifier for this occurrence.
    pub fn assign(&mut self, base: &str) -> String {
        if let Some(count) = self.counts.get_mut(base) {
            *count += 1;
            format!("{base}-{count}")
        } else {
            self.counts.insert(base.to_string(), 0);
            base.to_string()
        }
    }
}

/// Produces one identifier per row, deterministic within a run.
#[derive(Debug)]
pub struct IdGenerator {
    strategy: IdStrategy,
    prefix: String,
    slug_max_length: usize,
    table: SlugTable,
}

impl IdGenerator {
    #[must_use]
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            prefix: DEFAULT_SEQUENTIAL_PREFIX.to_string(),
            slug_max_length: DEFAULT_SLUG_MAX_LENGTH,
            table: SlugTable::new(),
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_slug_max_length(mut self, max_length: usize) -> Self {
        self.slug_max_length = max_length;
        self
    }

    /// Identifier for the row at 1-based `row_index`.
    ///
    /// Slug strategy: an empty question yields `row-<row_index>` without
    /// touching the collision table.
    pub fn next(&mut self, question: &str, row_index: usize) -> String {
        match self.strategy {
            IdStrategy::Sequential => format!("{}{row_index:03}", self.prefix),
            IdStrategy::Slug => {
                let question = question.trim();
                if question.is_empty() {
                    return format!("row-{row_index}");
                }
                let base = slugify(question, self.slug_max_length);
                self.table.assign(&base)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{DEFAULT_SLUG_MAX_LENGTH, IdGenerator, SlugTable, slugify};
    use crate::variant::IdStrategy;

    fn slug(text: &str) -> String {
        slugify(text, DEFAULT_SLUG_MAX_LENGTH)
    }

    #[test]
    fn slugify_basic_question() {
        assert_eq!(slug("Is X true?"), "is-x-true");
        assert_eq!(slug("  What   about    spaces  "), "what-about-spaces");
    }

    #[test]
    fn slugify_keeps_underscores_and_hyphens() {
        assert_eq!(slug("snake_case stays"), "snake_case-stays");
        assert_eq!(slug("pre-hyphenated - words"), "pre-hyphenated-words");
    }

    #[test]
    fn slugify_strips_punctuation_without_splitting_words() {
        // A stripped character is not a separator: "don't" -> "dont".
        assert_eq!(slug("Don't panic!"), "dont-panic");
        assert_eq!(slug("a&b"), "ab");
    }

    #[test]
    fn slugify_empty_input_is_untitled() {
        assert_eq!(slug(""), "untitled");
        assert_eq!(slug("???!!!"), "untitled");
    }

    #[test]
    fn slugify_truncates_at_word_boundary() {
        // Cutting at 20 lands on the hyphen after "charlie"; the partial
        // trailing segment is dropped.
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india";
        let slug = slugify(text, 20);
        assert_eq!(slug, "alpha-bravo-charlie");
        assert!(slug.chars().count() <= 20);
    }

    #[test]
    fn slugify_without_hyphen_keeps_truncated_prefix() {
        let slug = slugify("abcdefghijklmnopqrstuvwxyz", 10);
        assert_eq!(slug, "abcdefghij");
    }

    #[test]
    fn slug_table_suffixes_repeats_in_order() {
        let mut table = SlugTable::new();
        assert_eq!(table.assign("same-q"), "same-q");
        assert_eq!(table.assign("same-q"), "same-q-1");
        assert_eq!(table.assign("same-q"), "same-q-2");
        assert_eq!(table.assign("other"), "other");
    }

    #[test]
    fn sequential_ids_are_zero_padded() {
        let mut ids = IdGenerator::new(IdStrategy::Sequential);
        assert_eq!(ids.next("ignored", 1), "task_001");
        assert_eq!(ids.next("ignored", 42), "task_042");
        assert_eq!(ids.next("ignored", 1000), "task_1000");
    }

    #[test]
    fn sequential_prefix_is_configurable() {
        let mut ids = IdGenerator::new(IdStrategy::Sequential).with_prefix("eval_");
        assert_eq!(ids.next("q", 7), "eval_007");
    }

    #[test]
    fn slug_ids_resolve_collisions() {
        let mut ids = IdGenerator::new(IdStrategy::Slug);
        assert_eq!(ids.next("Same Q?", 1), "same-q");
        assert_eq!(ids.next("Same Q?", 2), "same-q-1");
    }

    #[test]
    fn empty_question_falls_back_to_row_id() {
        let mut ids = IdGenerator::new(IdStrategy::Slug);
        assert_eq!(ids.next("   ", 3), "row-3");
        // The fallback never enters the collision table.
        assert_eq!(ids.next("row 3", 4), "row-3");
    }
}
