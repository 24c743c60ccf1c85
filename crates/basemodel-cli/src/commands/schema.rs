use basemodel_config::BasemodelConfig;
use basemodel_core::LifecycleMetadata;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `basemodel schema`.
pub fn handle(config: &BasemodelConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = serde_json::to_value(schema_for!(LifecycleMetadata))?;
    output(&schema, flags.format, config.general.pretty)
}
