// Life of a request:
// 1. The front end (dashboard form or console menu) builds a `PlotRecord`
//    or a search key from user input
// 2. `PlotIndex` applies the registry policy (unique keys, area tolerance)
//    and picks the tree operation
// 3. `AvlTree` descends, mutates, and rebalances on the way back up
// 4. Records or errors flow back unchanged to the front end
//
// System components:
//  - Record types
//  - AVL tree engine
//  - Plot index facade
//  - Configuration

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod index;
pub mod tree;
pub mod types;


pub use config::{ConfigError, IndexConfig};
pub use index::{IndexError, IndexKind, PlotIndex};
pub use types::{PlotNumber, PlotRecord};
