pub mod backup;
pub mod engine;
pub mod location;
pub mod locks;
pub mod log;
pub mod query;
