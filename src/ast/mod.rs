//! # AST
//!
//! Typed expression and statement nodes produced by the parser. Every
//! expression node carries a stable [`NodeId`], assigned at parse time, which
//! the resolver uses to key its scope-depth side-table instead of relying on
//! pointer identity (see the teacher's resolver-keying guidance: raw pointer
//! identity is fragile across moves, so a monotonically assigned id is used
//! instead).

mod expr;
mod printer;
mod stmt;

pub use expr::*;
pub use printer::*;
pub use stmt::*;

use std::sync::atomic::{AtomicU32, Ordering};

/// Stable identity for an expression node, used to key the resolver's
/// scope-depth side-table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

static NEXT_ID: AtomicU32 = AtomicU32::new(0);

impl NodeId {
    /// Allocates a fresh, never-reused id.
    pub fn fresh() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}
