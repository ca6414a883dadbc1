use thiserror::Error;

/// Failures reading, writing or validating snapshot artifacts.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// No artifact with the requested name exists in the snapshot directory.
    #[error("Snapshot not found: {0}")]
    NotFound(String),

    /// The artifact name would escape the snapshot directory.
    #[error("Invalid snapshot name: {0}")]
    InvalidName(String),

    /// Filesystem error while reading, writing or listing artifacts.
    #[error("Snapshot IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be serialized.
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// The artifact exists but its bytes are not a readable snapshot.
    #[error("Failed to decode snapshot: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// The artifact was written by an incompatible format version.
    #[error("Unsupported snapshot format version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version stored in the artifact
        found: u32,
        /// Version this build reads and writes
        expected: u32,
    },

    /// The snapshot holds no `@everyone` role.
    #[error("Snapshot has no default role")]
    MissingDefaultRole,

    /// The snapshot holds more than one role of a singleton variant.
    #[error("Snapshot has {count} {variant} roles, at most one is allowed")]
    DuplicateRoleVariant {
        /// Variant name ("default" or "premium")
        variant: &'static str,
        /// How many were found
        count: usize,
    },
}
