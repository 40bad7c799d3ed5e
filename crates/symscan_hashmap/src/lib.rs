//! Extendible hash map.
//!
//! The map keeps a directory of `2^global_depth` slots. Each slot refers to a
//! bucket, and a bucket with `local_depth < global_depth` is shared by
//! `2^(global_depth - local_depth)` slots. A slot index is the low
//! `global_depth` bits of one fixed hash value per key, so growing the
//! directory only refines existing placements.
//!
//! Buckets live in an arena owned by the map and the directory stores
//! [`BucketId`]s into it. Two slots alias the same bucket exactly when they
//! hold the same id, and dropping the arena releases every bucket once.

mod bucket;
mod directory;
mod error;
mod hash;
mod map;

#[cfg(test)]
mod proptests;

pub use bucket::{Bucket, BucketId, Iter as BucketIter};
pub use directory::Directory;
pub use error::{InsertError, InvariantViolation, MapError};
pub use hash::{Keyed, TableKey, djb2, index_at_depth};
pub use map::{
    DEFAULT_BUCKET_LIMIT, DEFAULT_MAX_GLOBAL_DEPTH, ExtendibleMap, INITIAL_GLOBAL_DEPTH,
    MAX_SUPPORTED_DEPTH, MapConfig,
};
