use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use crate::bucket::BucketId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// Buckets must be able to hold at least one entry.
    InvalidBucketLimit,
    InvalidMaxDepth(u32),
    AllocationFailure,
    /// The key is already stored. The table keeps the first value.
    DuplicateKey,
    /// Splitting stopped making room: the overflowing bucket already uses as many
    /// hash bits as the map allows, so its keys collide in every usable bit.
    DegenerateSplit { rounds: u32, local_depth: u32 },
}

impl Error for MapError {}

impl Display for MapError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            MapError::InvalidBucketLimit => write!(f, "bucket limit must be at least 1"),
            MapError::InvalidMaxDepth(depth) => {
                write!(f, "maximum global depth {depth} is out of range")
            }
            MapError::AllocationFailure => write!(f, "allocation failed while growing the table"),
            MapError::DuplicateKey => write!(f, "key is already present"),
            MapError::DegenerateSplit { rounds, local_depth } => write!(
                f,
                "key/collision capacity exceeded: bucket still full after {rounds} split round(s) at local depth {local_depth}"
            ),
        }
    }
}

/// A rejected insert. Owns the value that could not be stored.
pub struct InsertError<T> {
    value: T,
    kind: MapError,
}

impl<T> InsertError<T> {
    pub(crate) fn new(value: T, kind: MapError) -> Self {
        Self { value, kind }
    }

    pub fn kind(&self) -> MapError {
        self.kind
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn is_duplicate(&self) -> bool {
        self.kind == MapError::DuplicateKey
    }
}

impl<T> Debug for InsertError<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsertError")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<T> Display for InsertError<T> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        Display::fmt(&self.kind, f)
    }
}

impl<T> Error for InsertError<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
    }
}

impl<T> From<InsertError<T>> for MapError {
    fn from(error: InsertError<T>) -> Self {
        error.kind
    }
}

/// A broken structural invariant, reported by
/// [`ExtendibleMap::check_invariants`](crate::ExtendibleMap::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    DirectoryLength { global_depth: u32, len: usize },
    UnknownBucket { slot: usize, bucket: BucketId },
    UnreferencedBucket { bucket: BucketId },
    LocalDepthExceedsGlobal { bucket: BucketId, local_depth: u32, global_depth: u32 },
    AliasCount { bucket: BucketId, expected: usize, actual: usize },
    Overfull { bucket: BucketId, len: usize, limit: usize },
    LengthMismatch { bucket: BucketId, recorded: usize, counted: usize },
    Misplaced { bucket: BucketId, slot: usize },
    TotalLength { recorded: usize, counted: usize },
}

impl Error for InvariantViolation {}

impl Display for InvariantViolation {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            InvariantViolation::DirectoryLength { global_depth, len } => write!(
                f,
                "directory has {len} slots at global depth {global_depth}"
            ),
            InvariantViolation::UnknownBucket { slot, bucket } => {
                write!(f, "slot {slot} refers to missing bucket {bucket}")
            }
            InvariantViolation::UnreferencedBucket { bucket } => {
                write!(f, "bucket {bucket} is not referenced by any slot")
            }
            InvariantViolation::LocalDepthExceedsGlobal {
                bucket,
                local_depth,
                global_depth,
            } => write!(
                f,
                "bucket {bucket} has local depth {local_depth} above global depth {global_depth}"
            ),
            InvariantViolation::AliasCount {
                bucket,
                expected,
                actual,
            } => write!(
                f,
                "bucket {bucket} is referenced by {actual} slots, expected {expected}"
            ),
            InvariantViolation::Overfull { bucket, len, limit } => {
                write!(f, "bucket {bucket} holds {len} entries, limit is {limit}")
            }
            InvariantViolation::LengthMismatch {
                bucket,
                recorded,
                counted,
            } => write!(
                f,
                "bucket {bucket} records {recorded} entries but chains {counted}"
            ),
            InvariantViolation::Misplaced { bucket, slot } => write!(
                f,
                "bucket {bucket} holds an entry belonging to slot {slot}"
            ),
            InvariantViolation::TotalLength { recorded, counted } => {
                write!(f, "map records {recorded} entries but holds {counted}")
            }
        }
    }
}
