//! Schema variants and the per-variant policy knobs.
//!
//! A variant is chosen once per run. It decides the identifier strategy, how
//! rubric cells are interpreted, and whether a document must carry at least
//! one rubric entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How per-row identifiers are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    /// `<prefix><NNN>` from the 1-based row index. Collision-free.
    Sequential,
    /// Slugified question text with collision suffixes.
    Slug,
}

/// How rubric cells are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RubricMode {
    /// Expects a JSON array of criterion objects; degrades to an empty list.
    Structured,
    /// Accepts raw text verbatim as the fallback; no warning on parse failure.
    Passthrough,
}

/// Target document shape, selected once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    /// Prompt/rubrics document with per-entry scoring and sequential ids.
    Worlds,
    /// Flat id/title document with passthrough rubric and top-level scoring.
    Rocker,
    /// Flat task_id/criteria document with per-entry outcome scores.
    Harness,
}

impl SchemaVariant {
    #[must_use]
    pub const fn id_strategy(self) -> IdStrategy {
        match self {
            Self::Worlds => IdStrategy::Sequential,
            Self::Rocker | Self::Harness => IdStrategy::Slug,
        }
    }

    #[must_use]
    pub const fn rubric_mode(self) -> RubricMode {
        match self {
            Self::Worlds | Self::Harness => RubricMode::Structured,
            Self::Rocker => RubricMode::Passthrough,
        }
    }

    /// Whether an empty normalized rubric gets the default completion entry.
    #[must_use]
    pub const fn requires_rubric_entry(self) -> bool {
        match self {
            Self::Worlds | Self::Harness => true,
            Self::Rocker => false,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Worlds => "worlds",
            Self::Rocker => "rocker",
            Self::Harness => "harness",
        }
    }

    /// All variants, in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Worlds, Self::Rocker, Self::Harness]
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVariant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "worlds" => Ok(Self::Worlds),
            "rocker" => Ok(Self::Rocker),
            "harness" => Ok(Self::Harness),
            other => Err(format!(
                "unknown schema variant '{other}' (expected worlds, rocker, or harness)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IdStrategy, RubricMode, SchemaVariant};

    #[test]
    fn policies_per_variant() {
        assert_eq!(SchemaVariant::Worlds.id_strategy(), IdStrategy::Sequential);
        assert_eq!(SchemaVariant::Rocker.id_strategy(), IdStrategy::Slug);
        assert_eq!(SchemaVariant::Harness.id_strategy(), IdStrategy::Slug);

        assert_eq!(SchemaVariant::Worlds.rubric_mode(), RubricMode::Structured);
        assert_eq!(SchemaVariant::Rocker.rubric_mode(), RubricMode::Passthrough);

        assert!(SchemaVariant::Worlds.requires_rubric_entry());
        assert!(SchemaVariant::Harness.requires_rubric_entry());
        assert!(!SchemaVariant::Rocker.requires_rubric_entry());
    }

    #[test]
    fn from_str_round_trips_all_variants() {
        for variant in SchemaVariant::all() {
            assert_eq!(variant.as_str().parse::<SchemaVariant>(), Ok(*variant));
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert!("xml".parse::<SchemaVariant>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&SchemaVariant::Harness).expect("serialize");
        assert_eq!(json, "\"harness\"");
        let back: SchemaVariant = serde_json::from_str("\"worlds\"").expect("deserialize");
        assert_eq!(back, SchemaVariant::Worlds);
    }
}
