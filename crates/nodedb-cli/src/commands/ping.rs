//! Ping command implementation

use crate::cli::{GlobalArgs, PingArgs};
use crate::commands::common::{database_for, load_config};
use anyhow::Result;

/// Execute the ping command
pub async fn execute(args: &PingArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let db = database_for(&config, &args.set)?;

    let pool = nodedb_pg::open_pool(db).await?;
    nodedb_pg::ping(&pool).await?;
    pool.close().await;

    println!("{}: connected to {}", args.set, db.redacted_url());
    Ok(())
}
