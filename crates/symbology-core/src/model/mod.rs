pub mod mapping;

pub use mapping::{MappingRecord, MappingState};
