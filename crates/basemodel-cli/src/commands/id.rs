use anyhow::Context;
use basemodel_config::BasemodelConfig;
use basemodel_core::{Clock, ObjectId, SystemClock, ids};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{InspectIdArgs, NewIdArgs};
use crate::output::{output, output_items};

/// An id together with what it encodes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IdInfo {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub unset: bool,
}

impl From<ObjectId> for IdInfo {
    fn from(id: ObjectId) -> Self {
        Self {
            id: id.to_hex(),
            timestamp: ids::embedded_timestamp(&id),
            unset: ids::is_unset(&id),
        }
    }
}

/// Handle `basemodel new-id`.
pub fn handle_new(
    args: &NewIdArgs,
    config: &BasemodelConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let generated = generate(&SystemClock, args.count);
    tracing::debug!(count = generated.len(), "generated ids");
    output_items(&generated, flags.format, config.general.pretty)
}

/// Handle `basemodel inspect-id`.
pub fn handle_inspect(
    args: &InspectIdArgs,
    config: &BasemodelConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let info = inspect(&args.id)?;
    output(&info, flags.format, config.general.pretty)
}

fn generate(clock: &impl Clock, count: u32) -> Vec<IdInfo> {
    (0..count)
        .map(|_| IdInfo::from(ids::generate_at(clock.now())))
        .collect()
}

fn inspect(value: &str) -> anyhow::Result<IdInfo> {
    let id = ids::parse_id(value.trim()).context("cannot inspect id")?;
    Ok(IdInfo::from(id))
}
