use std::collections::BTreeMap;

use anyhow::bail;
use wgen_core::schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `wgen schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();

    match &args.name {
        Some(name) => match registry.get(name) {
            Some(schema) => output(schema, flags.format),
            None => bail!(
                "unknown schema '{name}' (known: {})",
                registry.list().join(", ")
            ),
        },
        None => {
            let all: BTreeMap<&str, &serde_json::Value> = registry
                .list()
                .into_iter()
                .filter_map(|name| registry.get(name).map(|schema| (name, schema)))
                .collect();
            output(&all, flags.format)
        }
    }
}
