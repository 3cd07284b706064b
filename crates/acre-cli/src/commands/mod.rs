pub mod dispatch;
pub mod farm;
pub mod field;
pub mod history;
pub mod irrigation;
pub mod named;
pub mod organisation;
pub mod population;
pub mod property;
pub mod report;
pub mod serve;
pub mod shared;
pub mod taxon;
pub mod user;
