//! Unit tests - Core compilation machinery exercised through the public API
//!
//! Escaping, naming, parameter collection and composite flattening, without
//! full end-to-end query assembly (see the integration harness for that).

mod escape_tests;
mod flattening_tests;
mod naming_tests;
