use std::time::Duration;

use basemodel_config::BasemodelConfig;
use basemodel_core::{Clock, Lifecycle, LifecycleMetadata, SystemClock, impl_lifecycle};
use serde::{Deserialize, Serialize};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LifecycleArgs;
use crate::output::output_items;

/// Demo entity embedding the lifecycle record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoUser {
    #[serde(flatten)]
    pub meta: LifecycleMetadata,
    pub name: String,
    pub email: String,
    pub age: u32,
}

impl_lifecycle!(DemoUser, meta);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Created,
    Inserted,
    Updated,
    Deleted,
}

/// Snapshot of the entity after one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepSnapshot {
    pub step: Step,
    pub id: String,
    pub is_deleted: bool,
    pub record: DemoUser,
}

impl StepSnapshot {
    fn capture(step: Step, user: &DemoUser) -> Self {
        Self {
            step,
            id: user.id(),
            is_deleted: user.is_deleted(),
            record: user.clone(),
        }
    }
}

/// Handle `basemodel lifecycle`.
pub fn handle(
    args: &LifecycleArgs,
    config: &BasemodelConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let delay = args
        .delay_ms
        .map_or_else(|| config.lifecycle.step_delay(), Duration::from_millis);

    let user = DemoUser {
        name: args.name.clone(),
        email: args.email.clone(),
        age: 30,
        ..DemoUser::default()
    };

    let steps = walk(user, &SystemClock, || std::thread::sleep(delay));
    output_items(&steps, flags.format, config.general.pretty)
}

/// Insert, update twice, then soft-delete, calling `pause` between steps.
fn walk(mut user: DemoUser, clock: &impl Clock, mut pause: impl FnMut()) -> Vec<StepSnapshot> {
    let mut steps = vec![StepSnapshot::capture(Step::Created, &user)];

    user.meta.apply_insert_metadata_with(clock);
    tracing::info!(id = %user.id(), "inserted");
    steps.push(StepSnapshot::capture(Step::Inserted, &user));

    pause();
    user.name = format!("{} (renamed)", user.name);
    user.meta.apply_update_metadata_with(clock);
    steps.push(StepSnapshot::capture(Step::Updated, &user));

    pause();
    user.age += 1;
    user.meta.apply_update_metadata_with(clock);
    steps.push(StepSnapshot::capture(Step::Updated, &user));

    pause();
    user.meta.apply_delete_metadata_with(clock);
    tracing::info!(id = %user.id(), "soft-deleted");
    steps.push(StepSnapshot::capture(Step::Deleted, &user));

    steps
}
