// kvqueue Core - Domain, Ports & the Queue Store Driver
// NO network dependencies: store clients live in the infra crates

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::StoreDriver;
pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
