//! The expansion loop.

use std::collections::HashSet;

use multiverse::{encode, trim_fully, Board, BoardId, RulesetCatalog, Successors};
use multiverse_store::{GraphStore, ParentOutcome};
use tracing::{debug, info, instrument, warn};

use crate::error::ExploreError;
use crate::report::{ExpansionReport, FailedExpansion, NodeExpansion, PassSummary};

/// Drives expansion of the board graph held by a [`GraphStore`].
///
/// A board goes from unexpanded to expanded exactly once; the explorer never
/// touches the children of an expanded board again.
pub struct Explorer<'a> {
    store: &'a GraphStore,
    catalog: &'a RulesetCatalog,
}

impl<'a> Explorer<'a> {
    pub fn new(store: &'a GraphStore, catalog: &'a RulesetCatalog) -> Self {
        Self { store, catalog }
    }

    /// Inserts a root board and returns its canonical identifier.
    ///
    /// Trailing dead rings are stripped first, so `6000` seeds the same board
    /// as `60`. Seeding a board already present leaves it untouched.
    /// Bits past the last ring the identifier's length can hold, as in `01`,
    /// fail with [`ExploreError::NonCanonical`].
    pub fn seed(&self, id: &BoardId) -> Result<BoardId, ExploreError> {
        let canonical = BoardId::from_padded(id.as_bytes())
            .ok_or_else(|| ExploreError::NonCanonical(id.clone()))?;
        if canonical.is_zero() {
            return Err(ExploreError::DeadSeed(id.clone()));
        }
        if self.store.insert(&canonical, true)? {
            info!(seed = %canonical, "Seeded root board");
        } else {
            debug!(seed = %canonical, "Seed already present");
        }
        Ok(canonical)
    }

    /// Seeds a board given cell by cell. Dead outer rings are trimmed first.
    pub fn seed_board(&self, board: &Board) -> Result<BoardId, ExploreError> {
        let trimmed = trim_fully(board.clone());
        self.seed(&trimmed.map_or_else(BoardId::zero, |b| encode(&b)))
    }

    /// Expands one board. Returns `false` without touching the store if the
    /// board is absent or already expanded.
    pub fn expand_node(&self, id: &BoardId) -> Result<bool, ExploreError> {
        Ok(self.expand_node_with_stats(id)?.is_some())
    }

    /// Like [`Explorer::expand_node`], reporting what the expansion changed.
    ///
    /// Children are computed under every ruleset in catalog order. Each
    /// distinct live child is inserted if new and gets this board as a
    /// parent; the full positional child list is stored last, so a failure
    /// part way leaves the board unexpanded.
    #[instrument(skip_all, fields(id = %id))]
    pub fn expand_node_with_stats(
        &self,
        id: &BoardId,
    ) -> Result<Option<NodeExpansion>, ExploreError> {
        if !self.store.exists(id)? || self.store.is_expanded(id)? {
            return Ok(None);
        }
        let board = id
            .to_board()
            .ok_or_else(|| ExploreError::NonCanonical(id.clone()))?;

        let successors = Successors::new(&board);
        let children: Vec<BoardId> = successors.children(self.catalog).collect();

        let mut stats = NodeExpansion::default();
        let mut seen = HashSet::new();
        for child in &children {
            if child.is_zero() {
                stats.zero_children += 1;
                continue;
            }
            if !seen.insert(child) {
                continue;
            }
            if self.store.insert(child, false)? {
                stats.new_boards += 1;
            }
            match self.store.add_parent(child, id)? {
                ParentOutcome::Added => stats.parent_links += 1,
                ParentOutcome::Replaced { .. } => {
                    stats.parent_links += 1;
                    stats.evictions += 1;
                }
                ParentOutcome::Declined => stats.declined += 1,
                ParentOutcome::AlreadyPresent => {}
            }
        }
        stats.distinct_children = seen.len();

        self.store.set_evolutions(id, &children)?;
        debug!(
            side = board.side(),
            distinct = stats.distinct_children,
            new = stats.new_boards,
            "Expanded board"
        );
        Ok(Some(stats))
    }

    /// Expands until no unexpanded board remains.
    ///
    /// Only terminates on its own if the reachable graph is finite; see
    /// [`Explorer::expand_all_with_budget`].
    pub fn expand_all(&self) -> Result<ExpansionReport, ExploreError> {
        self.expand_all_with_budget(None)
    }

    /// Expands pass by pass, stopping after `max_expansions` expansions.
    ///
    /// Each pass fetches every unexpanded board and expands it; boards
    /// inserted during a pass wait for the next one. A board whose expansion
    /// fails is recorded in the report, stays unexpanded and is not retried
    /// in this run. Errors fetching the pending list are returned.
    pub fn expand_all_with_budget(
        &self,
        max_expansions: Option<u64>,
    ) -> Result<ExpansionReport, ExploreError> {
        let mut report = ExpansionReport::new();
        let mut failed: HashSet<BoardId> = HashSet::new();
        let mut expanded: u64 = 0;

        loop {
            let pending: Vec<BoardId> = self
                .store
                .unexpanded_boards()?
                .into_iter()
                .filter(|id| !failed.contains(id))
                .collect();
            if pending.is_empty() {
                break;
            }

            let mut pass = PassSummary::new(report.passes.len() + 1, pending.len());
            for id in pending {
                if max_expansions.is_some_and(|max| expanded >= max) {
                    report.budget_exhausted = true;
                    break;
                }
                match self.expand_node_with_stats(&id) {
                    Ok(Some(stats)) => {
                        pass.record(&stats);
                        expanded += 1;
                    }
                    Ok(None) => {}
                    Err(err) => {
                        warn!(%id, error = %err, "Expansion failed; board stays unexpanded");
                        pass.failed += 1;
                        report.failed.push(FailedExpansion {
                            id: id.clone(),
                            error: err.to_string(),
                        });
                        failed.insert(id);
                    }
                }
            }

            info!(
                pass = pass.pass,
                pending = pass.pending,
                expanded = pass.expanded,
                new_boards = pass.new_boards,
                declined = pass.declined,
                failed = pass.failed,
                "Pass complete"
            );
            report.passes.push(pass);
            if report.budget_exhausted {
                break;
            }
        }

        info!(
            expanded = report.total_expanded(),
            passes = report.passes.len(),
            complete = report.is_complete(),
            "Exploration finished"
        );
        Ok(report)
    }
}
