// Port Layer - Interfaces for external dependencies

pub mod driver;
pub mod store_client;

// Re-exports
pub use driver::Driver;
pub use store_client::StoreClient;

#[cfg(test)]
pub use store_client::MockStoreClient;
