//! # Editing Module
//!
//! The machinery around edits: batching rebuilds, telling listeners the world
//! changed, and undo/redo over recorded change-sets.

pub mod batch;
pub mod history;
pub mod notifier;

pub use batch::BatchController;
pub use history::{BlockChange, BlockWriter, ChangeSet, CommandHistory, DEFAULT_HISTORY_CAPACITY};
pub use notifier::{ChangeNotifier, SubscriptionToken};
