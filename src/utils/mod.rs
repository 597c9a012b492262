//! Shared helpers: JWT handling, password hashing, payment card and RUT
//! validation, and the validating JSON extractor.

pub mod card;
pub mod jwt;
pub mod password;
pub mod rut;
pub mod validate;
