pub mod catalog;
pub mod coordinator;
pub mod error;
pub mod preferences;
pub mod storage;

pub use catalog::LanguageCatalog;
pub use coordinator::TranslationCoordinator;
pub use error::{SelectionError, StorageError};
pub use preferences::PreferenceStore;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
