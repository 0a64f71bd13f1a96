//! Game state owned by the orchestrator
//!
//! - [`TurnManager`] - whose turn it is
//! - [`ScoreBoard`] - captures per side
//! - [`Selection`] - selected square plus its cached suggestions
//! - [`PendingCaptures`] - enemies flagged mid-chain, removed at turn finish
//! - [`MovementLog`] - the hops consumed so far this turn

pub mod history;
pub mod pending;
pub mod score;
pub mod selection;
pub mod turn;

pub use history::MovementLog;
pub use pending::PendingCaptures;
pub use score::ScoreBoard;
pub use selection::Selection;
pub use turn::TurnManager;
