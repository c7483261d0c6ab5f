//! Storage seam shared by the word store and the mistake ledger.
//!
//! Implemented by [`crate::document::FileDocument`] for real files and by
//! [`crate::document::MemoryDocument`] for tests.

use crate::error::StoreError;

/// A single persisted text document.
pub trait DocumentStore {
    /// Human-readable location used in logs and error messages.
    fn location(&self) -> String;

    /// Read the whole document. `Ok(None)` means it does not exist yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the whole document.
    fn write(&self, contents: &str) -> Result<(), StoreError>;
}
