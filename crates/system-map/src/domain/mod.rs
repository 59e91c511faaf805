//! Domain layer: entities, value objects, and the error taxonomy.

pub mod entities;
pub mod errors;
pub mod value_objects;
