//! Service layer for person records.
//! - `colors` holds the read-only color reference table.
//! - `person` defines the repository contract, the table backend and the service facade.
//! - `storage` holds the flat-file backend and its row codec.

pub mod colors;
pub mod errors;
pub mod person;
pub mod storage;
#[cfg(test)]
pub mod test_support;
