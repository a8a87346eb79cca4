//! Expansion report types: per-node statistics, per-pass summaries and the
//! run report.

use multiverse::BoardId;

/// What one node expansion changed in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeExpansion {
    /// Boards inserted for the first time.
    pub new_boards: usize,
    /// Parent back-links recorded (added or replacing a larger parent).
    pub parent_links: usize,
    /// Larger parents evicted to make room.
    pub evictions: usize,
    /// Back-links declined because the child's parent set was full.
    pub declined: usize,
    /// Rules under which the board died out entirely.
    pub zero_children: usize,
    /// Distinct live children.
    pub distinct_children: usize,
}

/// Totals for one fetch-and-expand pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// 1-based pass number.
    pub pass: usize,
    /// Unexpanded boards fetched at the start of the pass.
    pub pending: usize,
    pub expanded: usize,
    pub new_boards: usize,
    pub parent_links: usize,
    pub evictions: usize,
    /// Back-links turned away by full parent sets.
    pub declined: usize,
    pub zero_children: usize,
    pub failed: usize,
}

impl PassSummary {
    /// Creates an empty summary for pass `pass` over `pending` boards.
    pub fn new(pass: usize, pending: usize) -> Self {
        Self {
            pass,
            pending,
            ..Self::default()
        }
    }

    /// Adds one successful expansion.
    pub fn record(&mut self, node: &NodeExpansion) {
        self.expanded += 1;
        self.new_boards += node.new_boards;
        self.parent_links += node.parent_links;
        self.evictions += node.evictions;
        self.declined += node.declined;
        self.zero_children += node.zero_children;
    }
}

/// A node whose expansion failed; it stays unexpanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedExpansion {
    pub id: BoardId,
    pub error: String,
}

/// Aggregated report of an `expand_all` run.
#[derive(Debug, Clone, Default)]
pub struct ExpansionReport {
    pub passes: Vec<PassSummary>,
    pub failed: Vec<FailedExpansion>,
    /// The run stopped at its expansion budget with boards still pending.
    pub budget_exhausted: bool,
}

impl ExpansionReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Boards expanded across all passes.
    pub fn total_expanded(&self) -> usize {
        self.passes.iter().map(|p| p.expanded).sum()
    }

    /// Boards inserted across all passes.
    pub fn total_new_boards(&self) -> usize {
        self.passes.iter().map(|p| p.new_boards).sum()
    }

    pub fn total_evictions(&self) -> usize {
        self.passes.iter().map(|p| p.evictions).sum()
    }

    /// Back-links declined across all passes.
    pub fn total_declined(&self) -> usize {
        self.passes.iter().map(|p| p.declined).sum()
    }

    /// True when the run ended because nothing expandable was left.
    pub fn is_complete(&self) -> bool {
        !self.budget_exhausted
    }
}
