//! Repository modules implementing CRUD operations for all acre entities.
//!
//! Each module adds methods to `AcreService` via `impl AcreService` blocks.

pub mod audit;
pub mod farm;
pub mod field;
pub mod irrigation;
mod list;
pub mod named;
pub mod organisation;
pub mod population;
pub mod property;
pub mod province;
pub mod property_type;
pub mod reports;
pub mod taxon;
pub mod taxon_rank;
pub mod user;
