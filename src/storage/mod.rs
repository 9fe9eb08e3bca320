//! Document-store access for kcontent.
//!
//! The [`DocumentStore`] trait is the only seam to the external database.
//! Two backends ship with the crate; production deployments plug in their
//! own driver adapter.

mod json_dir;
mod memory;
mod traits;

pub use json_dir::JsonDirStore;
pub use memory::InMemoryDocumentStore;
pub use traits::{value_at_path, Document, DocumentStore, NameFilter, StorageError};
