//! Cooperating-worker reproduction.
//!
//! The engine asks a [`Coordinator`] for its local share of reproduction
//! units and hands back its offspring for merging. [`SingleProcess`] is the
//! default; [`local_group`] / [`run_local_group`] run a group of workers on
//! threads with a real blocking merge.

mod coordinator;
mod group;

pub use coordinator::{fair_share, split_counts, Coordinator, SingleProcess};
pub use group::{local_group, run_local_group, GroupMember};
