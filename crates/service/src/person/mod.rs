//! Person storage contract, its table-backed implementation and the service facade.
//!
//! The flat-file implementation lives in `crate::storage::flat_file`.

pub mod repository;
pub mod service;
pub mod table;
