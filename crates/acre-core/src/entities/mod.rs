//! Entity structs for every acre record.
//!
//! Each entity maps to a table in the libSQL database (see `acre-db/schema`).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod audit;
mod farm;
mod field;
mod irrigation;
mod stamp;
mod taxon;
mod user;
mod wildlife;

pub use audit::AuditEntry;
pub use farm::Farm;
pub use field::Field;
pub use irrigation::IrrigationPoint;
pub use stamp::AuditStamp;
pub use taxon::{Taxon, TaxonRank};
pub use user::User;
pub use wildlife::{AnnualPopulation, Organisation, Property, PropertyType, Province};
