// kvqueue Infrastructure - In-Memory Store
// Implements: StoreClient with Redis list/set semantics inside the process

mod memory_store;

pub use memory_store::MemoryStore;
