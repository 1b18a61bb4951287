//! Object Storage Adapters
//!
//! ## Available Adapters
//!
//! - **LocalObjectStorage** - Stores objects as files under a root directory
//! - **InMemoryObjectStorage** - Stores objects in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! // Production: file-based storage
//! let storage = LocalObjectStorage::new("./data/objects", "https://files.example.com");
//!
//! // Testing: in-memory storage
//! let storage = InMemoryObjectStorage::new();
//! ```

mod in_memory;
mod local;

pub use in_memory::InMemoryObjectStorage;
pub use local::{LocalObjectStorage, MAX_OBJECT_SIZE_BYTES};
