//! The `boards` table.
//!
//! | column | type | meaning |
//! |--------|------|---------|
//! | `board_id` | BLOB, primary key | canonical identifier |
//! | `expanded` | BOOLEAN | children computed |
//! | `is_root` | BOOLEAN | inserted as a seed |
//! | `parent_size` | INTEGER | width of every parent entry, 0 without parents |
//! | `parents` | BLOB | `parent_size`-wide zero-padded entries, largest first |
//! | `children` | BLOB | one fixed-width entry per ruleset id, NULL until expanded |

use rusqlite::Connection;
use tracing::debug;

use crate::error::StoreError;

/// Name of the only table.
pub const BOARDS_TABLE: &str = "boards";

/// Columns every `boards` table must have, in declaration order.
pub const BOARDS_COLUMNS: [&str; 6] = [
    "board_id",
    "expanded",
    "is_root",
    "parent_size",
    "parents",
    "children",
];

const CREATE_BOARDS: &str = "CREATE TABLE IF NOT EXISTS boards (
    board_id    BLOB PRIMARY KEY,
    expanded    BOOLEAN NOT NULL DEFAULT 0,
    is_root     BOOLEAN NOT NULL DEFAULT 0,
    parent_size INTEGER NOT NULL DEFAULT 0,
    parents     BLOB,
    children    BLOB
)";

/// Creates the table if needed and checks the shape of an existing one.
pub fn ensure(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(CREATE_BOARDS)?;

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let present = stmt
        .query_map([BOARDS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let missing: Vec<&str> = BOARDS_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.iter().any(|p| p == col))
        .collect();
    if !missing.is_empty() {
        return Err(StoreError::Schema(format!(
            "table {BOARDS_TABLE} lacks column(s) {}",
            missing.join(", ")
        )));
    }

    debug!("Schema ready ({} columns)", present.len());
    Ok(())
}
