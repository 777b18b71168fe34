//! Structural self-checks for the mesh, adjacency and priority containers.
//!
//! [`DebugInvariants::validate_invariants`] is always available and returns
//! the first violation as a [`MeshBisectError`]. The assert variant panics on
//! a violation, but only in debug builds or with the `strict-invariants` /
//! `check-invariants` features; release builds skip the walk entirely.

use crate::mesh_error::MeshBisectError;

pub trait DebugInvariants {
    /// Panic on the first violated invariant when checking is enabled.
    fn debug_assert_invariants(&self);
    /// Walk the structure and report the first violated invariant.
    fn validate_invariants(&self) -> Result<(), MeshBisectError>;
}

/// Validate several structures in order, stopping at the first failure.
pub fn validate_all(items: &[&dyn DebugInvariants]) -> Result<(), MeshBisectError> {
    items.iter().try_for_each(|item| item.validate_invariants())
}

/// Run a fallible check and panic with `[invariants] <context>: <error>` when
/// invariant checking is compiled in.
#[macro_export]
macro_rules! debug_invariants {
    ($check:expr, $($context:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(err) = $check {
            panic!(concat!("[invariants] ", $($context)*, ": {}"), err);
        }
    };
}
