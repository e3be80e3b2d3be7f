//! On-the-fly analysis hooks.
//!
//! Hooks observe the evolution without influencing it. The engine decides
//! when they fire (see [`AnalysisHook`]); the hooks decide what to do.
//!
//! - [`ConsoleOutput`]: progress reporting via `log`
//! - [`FitnessStore`]: best-fitness history, readable through a
//!   [`FitnessHistory`] handle

mod console;
mod store;
mod types;

pub use console::ConsoleOutput;
pub use store::{FitnessHistory, FitnessRecord, FitnessStore};
pub use types::AnalysisHook;
