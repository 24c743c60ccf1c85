use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Walk a demo user through insert, two updates, and a soft delete.
    Lifecycle(LifecycleArgs),
    /// Generate new ids.
    NewId(NewIdArgs),
    /// Parse an id and show its embedded timestamp.
    InspectId(InspectIdArgs),
    /// Print the JSON Schema of the lifecycle record.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct LifecycleArgs {
    #[arg(long, default_value = "John Doe")]
    pub name: String,
    #[arg(long, default_value = "john@example.com")]
    pub email: String,
    /// Pause between steps in milliseconds (defaults to lifecycle.step_delay_ms).
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

#[derive(Clone, Debug, Args)]
pub struct NewIdArgs {
    /// How many ids to generate.
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub count: u32,
}

#[derive(Clone, Debug, Args)]
pub struct InspectIdArgs {
    /// 24-character hex id.
    pub id: String,
}
