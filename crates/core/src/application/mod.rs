// Application Layer - Driver implementations over the ports

pub mod store_driver;

// Re-exports
pub use store_driver::StoreDriver;
