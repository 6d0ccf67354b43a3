//! The per-node migration pipeline
//!
//! - `lister` - builds the candidate node list from the allow-list
//! - `checker` - advisory existence probe against the destination
//! - `driver` - per-node state machine and the aggregate run loop
//! - `report` - run counters and the final summary line

pub mod checker;
pub mod driver;
pub mod lister;
pub mod report;

#[cfg(test)]
pub(crate) mod fakes;

pub use checker::node_exists;
pub use driver::{
    MigrationDriver,
    NodeOutcome,
    Stage,
    StageFailure,
};
pub use lister::list_nodes;
pub use report::MigrationReport;
