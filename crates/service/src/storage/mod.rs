pub mod flat_file;
pub mod person_csv;
