//! JSON Schema registry for the document variants.
//!
//! Built from the [`crate::render`] document types via
//! [`schemars::schema_for!`], keyed by variant name. Used by `wgen schema`
//! to hand the document contracts to external tooling.

use std::collections::HashMap;

use schemars::schema_for;

use crate::variant::SchemaVariant;

/// Schemas of every document shape worldgen can emit.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema, converting the `schemars` output to a
/// `serde_json::Value`.
macro_rules! register {
    ($map:expr, $variant:expr, $ty:ty) => {
        $map.insert($variant.as_str(), serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build the registry with one schema per [`SchemaVariant`].
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on a `schemars`-generated
    /// schema, which is not expected in practice.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();
        register!(schemas, SchemaVariant::Worlds, crate::render::WorldsDocument);
        register!(schemas, SchemaVariant::Rocker, crate::render::RockerDocument);
        register!(schemas, SchemaVariant::Harness, crate::render::HarnessDocument);
        Self { schemas }
    }

    /// Schema for a variant name. `None` if unknown.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Registered variant names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
