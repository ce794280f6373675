use thiserror::Error;

use promptdeck_storage::StorageError;

/// Errors raised by the stores.
///
/// Absent records are not errors; lookups return `Option` and deletes return
/// `bool`. These variants cover the storage layer and corrupt persisted state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("corrupt persisted data under {key:?}: {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("corrupt persisted counter under {key:?}: {source}")]
    DecodeCounter {
        key: &'static str,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("failed to serialize {key:?}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
