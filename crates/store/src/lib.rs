//! Durable local storage for the opsdesk client.
//!
//! Sessions and per-view preferences survive restarts through a small
//! key/value layer:
//!
//! - [`KvStore`]: the storage trait (get/set/delete/scan).
//! - [`RedbStore`]: the production implementation, a single-table redb
//!   database under the client's data directory.
//! - [`MemoryStore`]: in-memory implementation for tests.
//! - [`json`]: typed JSON blob helpers. Malformed stored JSON is treated
//!   as an absent value, never an error; a client must keep working when
//!   its local state is stale or hand-edited.

pub mod error;
pub mod json;
pub mod keys;
pub mod kv;
pub mod memory;
pub mod redb_store;

pub use error::StoreError;
pub use kv::KvStore;
pub use memory::MemoryStore;
pub use redb_store::RedbStore;
