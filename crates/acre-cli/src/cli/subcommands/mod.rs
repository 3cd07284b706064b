mod farm;
mod field;
mod irrigation;
mod named;
mod organisation;
mod population;
mod property;
mod taxon;
mod user;

pub use farm::FarmCommands;
pub use field::FieldCommands;
pub use irrigation::IrrigationCommands;
pub use named::NamedCommands;
pub use organisation::OrganisationCommands;
pub use population::PopulationCommands;
pub use property::PropertyCommands;
pub use taxon::TaxonCommands;
pub use user::UserCommands;
