use std::path::Path;

use multiverse::layout::parent_width;
use multiverse::{BoardId, RULESET_COUNT};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, instrument, warn};

use crate::entries::{
    child_at, children_readable, children_width, pack_children, pack_parents, sort_parents,
    unpack_children, unpack_parents, MAX_PARENTS,
};
use crate::error::StoreError;
use crate::schema;

/// Connection settings for file-backed stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Use SQLite's write-ahead log.
    pub wal: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { wal: true }
    }
}

/// A full board record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardNode {
    pub id: BoardId,
    /// True only when the children blob is also usable.
    pub expanded: bool,
    pub is_root: bool,
    /// One entry per ruleset id, `None` until expanded.
    pub children: Option<Vec<BoardId>>,
    /// Largest first.
    pub parents: Vec<BoardId>,
}

/// What [`GraphStore::add_parent`] did with the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentOutcome {
    /// Recorded; the set had room.
    Added,
    /// Already recorded; nothing changed.
    AlreadyPresent,
    /// Recorded in place of the largest stored parent.
    Replaced { evicted: BoardId },
    /// The set is full and the parent is not smaller than its largest entry.
    Declined,
}

impl ParentOutcome {
    /// True when the stored parent set changed.
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Added | Self::Replaced { .. })
    }
}

/// The board graph, backed by one SQLite database.
///
/// Every method is a single statement or a single transaction, so a run
/// killed at any point leaves a store the next run can resume from.
pub struct GraphStore {
    conn: Connection,
}

impl GraphStore {
    /// Opens (or creates) a store at the given path with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with(path, StoreOptions::default())
    }

    /// Opens (or creates) a store at the given path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open_with(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        if options.wal {
            // journal_mode returns the resulting mode as a row.
            let mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
            debug!("journal_mode={}", mode);
        }
        schema::ensure(&conn)?;
        debug!("Opened GraphStore at {}", path.as_ref().display());
        Ok(Self { conn })
    }

    /// Opens an in-memory store (useful for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::ensure(&conn)?;
        debug!("Opened in-memory GraphStore");
        Ok(Self { conn })
    }

    /// Inserts an unexpanded board. Returns `false` if it was already present,
    /// in which case nothing changes.
    #[instrument(skip_all, fields(id = %id, is_root = is_root))]
    pub fn insert(&self, id: &BoardId, is_root: bool) -> Result<bool, StoreError> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO boards (board_id, is_root) VALUES (?1, ?2)",
            params![id.as_bytes(), is_root],
        )?;
        if inserted > 0 {
            debug!("Inserted board");
        }
        Ok(inserted > 0)
    }

    pub fn exists(&self, id: &BoardId) -> Result<bool, StoreError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM boards WHERE board_id = ?1",
                [id.as_bytes()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// True when the board is flagged expanded and its children are readable.
    /// False for an absent board.
    pub fn is_expanded(&self, id: &BoardId) -> Result<bool, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT expanded, children FROM boards WHERE board_id = ?1",
                [id.as_bytes()],
                |row| Ok((row.get::<_, bool>(0)?, row.get::<_, Option<Vec<u8>>>(1)?)),
            )
            .optional()?;
        Ok(row.is_some_and(|(expanded, blob)| expanded_and_readable(id, expanded, blob.as_deref())))
    }

    /// False for an absent board.
    pub fn is_root(&self, id: &BoardId) -> Result<bool, StoreError> {
        let root = self
            .conn
            .query_row(
                "SELECT is_root FROM boards WHERE board_id = ?1",
                [id.as_bytes()],
                |row| row.get::<_, bool>(0),
            )
            .optional()?;
        Ok(root.unwrap_or(false))
    }

    /// The child recorded for one ruleset id.
    ///
    /// `None` unless the board is expanded, the children blob is usable and
    /// `rule_id` is a valid ruleset id.
    pub fn get_evolution(&self, id: &BoardId, rule_id: usize) -> Result<Option<BoardId>, StoreError> {
        let Some(blob) = self.expanded_children_blob(id)? else {
            return Ok(None);
        };
        Ok(children_width(id)
            .filter(|&w| children_readable(&blob, w, RULESET_COUNT))
            .and_then(|w| child_at(&blob, w, RULESET_COUNT, rule_id)))
    }

    /// All children in ruleset-id order, `None` unless expanded and usable.
    pub fn get_all_evolutions(&self, id: &BoardId) -> Result<Option<Vec<BoardId>>, StoreError> {
        let Some(blob) = self.expanded_children_blob(id)? else {
            return Ok(None);
        };
        let children = children_width(id).and_then(|w| unpack_children(&blob, w, RULESET_COUNT));
        if children.is_none() {
            warn!(%id, len = blob.len(), "Children blob does not match its layout");
        }
        Ok(children)
    }

    /// Stores the children and marks the board expanded, replacing any
    /// earlier children.
    #[instrument(skip_all, fields(id = %id))]
    pub fn set_evolutions(&self, id: &BoardId, children: &[BoardId]) -> Result<(), StoreError> {
        if children.len() != RULESET_COUNT {
            return Err(StoreError::ChildCount {
                expected: RULESET_COUNT,
                got: children.len(),
            });
        }
        let width = children_width(id).ok_or_else(|| StoreError::NonCanonical(id.clone()))?;
        if let Some(child) = children.iter().find(|c| !c.is_canonical()) {
            return Err(StoreError::NonCanonical(child.clone()));
        }
        let blob = pack_children(children, width).map_err(|child| StoreError::ChildTooWide {
            parent: id.clone(),
            child,
            width,
        })?;

        let updated = self.conn.execute(
            "UPDATE boards SET expanded = 1, children = ?2 WHERE board_id = ?1",
            params![id.as_bytes(), blob],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }
        debug!("Stored {} children at width {}", children.len(), width);
        Ok(())
    }

    /// Records `parent` as a parent of `child`, keeping at most
    /// [`MAX_PARENTS`] of the smallest parents.
    ///
    /// With the set full, a parent strictly shorter than the largest stored
    /// one evicts it; anything else is declined without error.
    ///
    /// Fails with [`StoreError::NotFound`] for an absent child. A parent
    /// that is not a live canonical identifier, or too narrow to have
    /// produced the child, is rejected as a caller bug.
    #[instrument(skip_all, fields(child = %child, parent = %parent))]
    pub fn add_parent(&self, child: &BoardId, parent: &BoardId) -> Result<ParentOutcome, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let Some(mut parents) = read_parents(&tx, child)? else {
            return Err(StoreError::NotFound(child.clone()));
        };
        if !parent.is_canonical() || parent.is_zero() {
            return Err(StoreError::NonCanonical(parent.clone()));
        }
        if let Some(min_width) = child.side().and_then(parent_width) {
            if parent.len() < min_width {
                return Err(StoreError::ParentTooNarrow {
                    child: child.clone(),
                    parent: parent.clone(),
                    min_width,
                });
            }
        }

        let outcome = if parents.contains(parent) {
            ParentOutcome::AlreadyPresent
        } else if parents.len() < MAX_PARENTS {
            parents.push(parent.clone());
            ParentOutcome::Added
        } else if parents.first().is_some_and(|largest| parent.len() < largest.len()) {
            let evicted = parents.remove(0);
            parents.push(parent.clone());
            ParentOutcome::Replaced { evicted }
        } else {
            ParentOutcome::Declined
        };

        if outcome.is_recorded() {
            sort_parents(&mut parents);
            let (width, blob) = pack_parents(&parents);
            tx.execute(
                "UPDATE boards SET parent_size = ?2, parents = ?3 WHERE board_id = ?1",
                params![child.as_bytes(), width, blob],
            )?;
            tx.commit()?;
            debug!(count = parents.len(), ?outcome, "Parent recorded");
        }
        Ok(outcome)
    }

    /// Stored parents, largest first. Empty for an absent board or an
    /// unreadable parents blob.
    pub fn get_parents(&self, id: &BoardId) -> Result<Vec<BoardId>, StoreError> {
        Ok(read_parents(&self.conn, id)?.unwrap_or_default())
    }

    pub fn parent_count(&self, id: &BoardId) -> Result<usize, StoreError> {
        Ok(self.get_parents(id)?.len())
    }

    /// The whole record, or `None` if the board is absent.
    pub fn node(&self, id: &BoardId) -> Result<Option<BoardNode>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT expanded, is_root, parent_size, parents, children
                 FROM boards WHERE board_id = ?1",
                [id.as_bytes()],
                |row| {
                    Ok((
                        row.get::<_, bool>(0)?,
                        row.get::<_, bool>(1)?,
                        row.get::<_, usize>(2)?,
                        row.get::<_, Option<Vec<u8>>>(3)?,
                        row.get::<_, Option<Vec<u8>>>(4)?,
                    ))
                },
            )
            .optional()?;
        let Some((expanded, is_root, parent_size, parents, children)) = row else {
            return Ok(None);
        };

        let children = children
            .filter(|_| expanded)
            .and_then(|blob| {
                children_width(id).and_then(|w| unpack_children(&blob, w, RULESET_COUNT))
            });
        let parents = unpack_parents(parents.as_deref().unwrap_or_default(), parent_size)
            .unwrap_or_default();
        Ok(Some(BoardNode {
            id: id.clone(),
            expanded: children.is_some(),
            is_root,
            children,
            parents,
        }))
    }

    /// Boards still to expand, in insertion order. A board flagged expanded
    /// whose children blob is unusable is listed too.
    pub fn unexpanded_boards(&self) -> Result<Vec<BoardId>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT board_id, expanded, CASE WHEN expanded THEN children END
                 FROM boards ORDER BY rowid",
            )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, Vec<u8>>(0)?,
                row.get::<_, bool>(1)?,
                row.get::<_, Option<Vec<u8>>>(2)?,
            ))
        })?;

        let mut pending = Vec::new();
        for row in rows {
            let (bytes, expanded, blob) = row?;
            let id = BoardId::from_vec(bytes);
            if !expanded_and_readable(&id, expanded, blob.as_deref()) {
                if expanded {
                    warn!(%id, "Expanded board has an unusable children blob");
                }
                pending.push(id);
            }
        }
        debug!("Found {} unexpanded boards", pending.len());
        Ok(pending)
    }

    /// Boards inserted as roots, in insertion order.
    pub fn root_boards(&self) -> Result<Vec<BoardId>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT board_id FROM boards WHERE is_root = 1 ORDER BY rowid")?;
        let roots = stmt
            .query_map([], |row| row.get::<_, Vec<u8>>(0))?
            .map(|bytes| bytes.map(BoardId::from_vec))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(roots)
    }

    pub fn total_boards(&self) -> Result<usize, StoreError> {
        let count: usize = self
            .conn
            .query_row("SELECT COUNT(*) FROM boards", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn unexpanded_count(&self) -> Result<usize, StoreError> {
        Ok(self.unexpanded_boards()?.len())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// The raw children blob of an expanded board.
    fn expanded_children_blob(&self, id: &BoardId) -> Result<Option<Vec<u8>>, StoreError> {
        let blob = self
            .conn
            .query_row(
                "SELECT children FROM boards WHERE board_id = ?1 AND expanded = 1",
                [id.as_bytes()],
                |row| row.get::<_, Option<Vec<u8>>>(0),
            )
            .optional()?;
        Ok(blob.flatten())
    }

    /// Raw handle for tests that need to damage rows.
    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// `None` if the board is absent; an unreadable blob reads as no parents.
fn read_parents(conn: &Connection, id: &BoardId) -> Result<Option<Vec<BoardId>>, StoreError> {
    let row = conn
        .query_row(
            "SELECT parent_size, parents FROM boards WHERE board_id = ?1",
            [id.as_bytes()],
            |row| Ok((row.get::<_, usize>(0)?, row.get::<_, Option<Vec<u8>>>(1)?)),
        )
        .optional()?;
    Ok(row.map(|(width, blob)| {
        let blob = blob.unwrap_or_default();
        unpack_parents(&blob, width).unwrap_or_else(|| {
            warn!(%id, width, len = blob.len(), "Parents blob does not match its layout");
            Vec::new()
        })
    }))
}

/// The expanded flag, confirmed by a readable children blob.
fn expanded_and_readable(id: &BoardId, expanded: bool, children: Option<&[u8]>) -> bool {
    expanded
        && matches!(
            (children_width(id), children),
            (Some(width), Some(blob)) if children_readable(blob, width, RULESET_COUNT)
        )
}
