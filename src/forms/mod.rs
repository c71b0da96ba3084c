//! Deserializable input forms and their typed payload conversions.

pub mod categories;
