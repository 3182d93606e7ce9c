pub mod mapping_ops;
pub mod store;

pub use store::RecordStore;
