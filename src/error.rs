use crate::TextSize;

/// Contract violations reported by tree construction and the text
/// primitives.
///
/// Every variant is a programming error on the caller's side, not a
/// data-dependent failure: a build that observes one is aborted, never
/// resumed. Probing tree shape (`child_at` out of range, `parent` of the
/// root) is *not* an error and returns `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `TextSize` addition went past `u32::MAX`.
    #[error("text size overflowed")]
    Overflow,
    /// `TextSize` subtraction went below zero.
    #[error("text size underflowed")]
    Underflow,
    /// `TextRange::new` called with `start > end`.
    #[error("invalid range: {start}..{end}")]
    InvalidRange {
        /// The offending start offset.
        start: TextSize,
        /// The offending end offset.
        end: TextSize,
    },
    /// `finish_node` called with no node open.
    #[error("unbalanced finish_node, no node is open")]
    UnbalancedNode,
    /// `start_node_at` called with a checkpoint that no longer indexes a
    /// valid boundary.
    #[error("stale checkpoint: {0}")]
    StaleCheckpoint(&'static str),
    /// `finish` called before exactly one root node was completed.
    #[error("no root node was produced")]
    NoRootProduced,
    /// `finish` called while nodes are still open.
    #[error("{0} node(s) left unclosed")]
    UnclosedNodes(usize),
    /// `token` called with no node open after the root was finished.
    #[error("the root node was already finished")]
    RootAlreadyFinished,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
