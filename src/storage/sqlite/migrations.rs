use anyhow::{bail, Context, Result};
use rusqlite::Connection;

use crate::log_info;

const ENABLE_LOGS: bool = true;

/// Schema scripts in order; entry `n` upgrades `user_version` from `n` to `n + 1`.
const MIGRATIONS: &[(&str, &str)] = &[("schema_v1.sql", include_str!("schemas/schema_v1.sql"))];

pub(super) fn current_schema_version() -> i32 {
    MIGRATIONS.len() as i32
}

pub(super) fn schema_version(conn: &Connection) -> Result<i32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")
}

/// Bring `conn` up to the latest schema inside one transaction.
pub(super) fn run_migrations(conn: &mut Connection) -> Result<()> {
    let target = current_schema_version();
    let found = schema_version(conn)?;

    if found > target {
        bail!("kv store schema v{found} is newer than this build understands (v{target})");
    }

    let pending = &MIGRATIONS[found.max(0) as usize..];
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;
    for (name, sql) in pending {
        tx.execute_batch(sql)
            .with_context(|| format!("failed to apply {name}"))?;
    }
    tx.pragma_update(None, "user_version", target)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")?;

    log_info!("Migrated kv store schema from v{found} to v{target}");
    Ok(())
}
