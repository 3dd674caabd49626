use std::path::PathBuf;

use id24_thinker::ThinkError;

use crate::tier::FeatureTier;

/// Alias for `Result<T, DataError>`.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while loading or reading data tables.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The input is not valid table JSON.
    #[error("invalid table data: {0}")]
    Json(#[from] serde_json::Error),

    /// A table file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file that failed to open or read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A record within the declared tier carries an extension group that
    /// is newer than the declared tier.
    #[error("{table} #{index} carries `{group}` fields from {introduced}, reader declared {declared}")]
    GroupTierViolation {
        /// Table the record belongs to.
        table: &'static str,
        /// Index of the offending record.
        index: i32,
        /// Key of the extension group.
        group: &'static str,
        /// Tier that introduced the group.
        introduced: FeatureTier,
        /// The tier the reader declared.
        declared: FeatureTier,
    },

    /// A record requires a newer feature tier than the reader declared.
    #[error("{table} #{index} requires {required}, reader declared {declared}")]
    TierViolation {
        /// Table the record belongs to.
        table: &'static str,
        /// Index of the offending record.
        index: i32,
        /// The record's minimum feature tier.
        required: FeatureTier,
        /// The tier the reader declared.
        declared: FeatureTier,
    },

    /// A field group was read by a reader below the tier that introduced it.
    #[error("field group `{group}` is introduced at {introduced}, reader is at {reader}")]
    FieldTierViolation {
        /// Name of the field group.
        group: &'static str,
        /// Tier that introduced the group.
        introduced: FeatureTier,
        /// Tier of the reader.
        reader: FeatureTier,
    },

    /// A state names a codepointer the table does not know.
    #[error("state #{state} uses unknown codepointer `{name}`")]
    UnknownCodepointer {
        /// The codepointer name as written.
        name: String,
        /// Index of the state.
        state: i32,
    },

    /// A state uses a codepointer newer than the reader's tier.
    #[error("state #{state} uses `{name}`, which requires {required}, reader declared {declared}")]
    CodepointerTierViolation {
        /// The codepointer name.
        name: String,
        /// Index of the state.
        state: i32,
        /// Tier that introduced the codepointer.
        required: FeatureTier,
        /// The tier the reader declared.
        declared: FeatureTier,
    },

    /// Two records in one table share an index.
    #[error("duplicate index {index} in {table}")]
    DuplicateIndex {
        /// Table with the duplicate.
        table: &'static str,
        /// The repeated index.
        index: i32,
    },

    /// A tier name that does not parse.
    #[error("unknown feature tier: \"{0}\"")]
    UnknownTier(String),

    /// A codepointer was bound to an action of the wrong shape.
    #[error(transparent)]
    Action(#[from] ThinkError),
}
