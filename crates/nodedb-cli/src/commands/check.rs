//! Check command implementation

use crate::cli::{CheckArgs, GlobalArgs};
use crate::commands::common::{build_runner, database_for, load_config};
use anyhow::Result;
use nodedb_core::MigrationDirection;

/// Execute the check command
pub async fn execute(args: &CheckArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let set = args.target.set.as_str();
    let db = database_for(&config, set)?;
    let runner = build_runner(&args.target).await?;
    let direction = MigrationDirection::from(args.direction);

    runner.check(db, set, direction).await?;

    println!("{set}: schema is up to date ({direction})");
    Ok(())
}
