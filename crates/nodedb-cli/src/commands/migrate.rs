//! Migrate command implementation

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{build_runner, database_for, load_config};
use anyhow::{Context, Result};
use nodedb_core::MigrationDirection;

/// Execute the migrate command
pub async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let set = args.target.set.as_str();
    let db = database_for(&config, set)?;
    let runner = build_runner(&args.target).await?;
    let direction = MigrationDirection::from(args.direction);

    let count = runner
        .run(db, set, direction)
        .await
        .with_context(|| format!("Failed to {} '{set}' migrations", direction.verb()))?;

    println!("{set}: ran {count} migration(s) {direction}");
    Ok(())
}
