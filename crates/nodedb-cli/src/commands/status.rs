//! Status command implementation

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common::{database_for, load_config};
use anyhow::Result;
use nodedb_pg::MigrationRunner;

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let db = database_for(&config, &args.set)?;
    let runner = MigrationRunner::embedded();

    let records = runner.records(db, &args.set).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{}: no migrations applied", args.set);
        return Ok(());
    }
    for record in &records {
        let state = if record.success { "applied" } else { "DIRTY" };
        println!(
            "  {:>6}  {:<8} {}  {}",
            record.version,
            state,
            record.installed_on.format("%Y-%m-%d %H:%M:%S"),
            record.description
        );
    }
    Ok(())
}
