//! Domain models.

pub mod inventory;

pub use inventory::{InventoryRecord, NewInventory, UpdateInventoryInput};
