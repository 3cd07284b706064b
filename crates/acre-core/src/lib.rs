//! # acre-core
//!
//! Core types and forms for the acre registries.
//!
//! This crate provides the foundational types shared across all acre crates:
//! - Entity structs for the farm registry (farms, fields, irrigation points)
//!   and the wildlife registry (provinces, properties, taxa, populations)
//! - GeoJSON-shaped geometry values (`Point`, `Polygon`)
//! - Forms that turn untrusted input into validated inputs
//! - Choice and audit enums
//! - List pages and wildlife report response types

pub mod entities;
pub mod enums;
pub mod forms;
pub mod geo;
pub mod responses;
