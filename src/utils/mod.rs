pub mod escape;

pub use escape::{escape_identifier, escape_label, escape_relationship_type};
