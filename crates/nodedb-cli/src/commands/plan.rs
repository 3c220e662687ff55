//! Plan command implementation

use crate::cli::{GlobalArgs, PlanArgs};
use crate::commands::common::{build_runner, database_for, load_config};
use anyhow::Result;
use nodedb_core::MigrationDirection;

/// Execute the plan command
pub async fn execute(args: &PlanArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let set = args.target.set.as_str();
    let db = database_for(&config, set)?;
    let runner = build_runner(&args.target).await?;
    let direction = MigrationDirection::from(args.direction);

    let plan = runner.plan(db, set, direction).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if plan.is_empty() {
        println!("{set}: nothing to {}", direction.verb());
        return Ok(());
    }
    println!("{set}: {} migration(s) to {}", plan.len(), direction.verb());
    for step in &plan {
        println!("  {:>6}  {}", step.version, step.description);
    }
    Ok(())
}
