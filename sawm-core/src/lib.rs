//! Core types and service wiring for the sawm Ramadan timetable.

/// Selectable cities and countries.
pub mod catalog;
/// Static supplications displayed alongside the timetable.
pub mod devotions;
/// Domain models shared by all providers.
pub mod model;
/// Offsetting and formatting of raw prayer times.
pub mod normalize;
/// Traits describing the provider interface and its error type.
pub mod ports;
/// High-level service facade used by clients.
pub mod service;
/// Calendar constants and configurable overrides.
pub mod settings;

pub use catalog::*;
pub use devotions::*;
pub use model::*;
pub use normalize::*;
pub use ports::*;
pub use service::*;
pub use settings::*;
