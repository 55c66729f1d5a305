//! Selection core: cell identity, rectangular ranges and the selection model.
//!
//! Nothing in this crate knows about a rendering engine. Cells are reached
//! through the [`host::TableSource`] and [`host::CellResolver`] capabilities,
//! which the embedding layer implements (or [`memory::MemoryTables`] in tests).

pub mod cell;
pub mod host;
pub mod memory;
pub mod range;
pub mod selection;

pub use cell::{CellHandle, CellRef, TableId};
pub use host::{CellResolver, TableSource};
pub use range::SelectionRange;
pub use selection::{CellKind, Notify, SelectionModel, SelectionSet};
