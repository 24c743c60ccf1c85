use basemodel_config::BasemodelConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: &Commands,
    config: &BasemodelConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Lifecycle(args) => commands::lifecycle::handle(args, config, flags),
        Commands::NewId(args) => commands::id::handle_new(args, config, flags),
        Commands::InspectId(args) => commands::id::handle_inspect(args, config, flags),
        Commands::Schema => commands::schema::handle(config, flags),
    }
}
