use log::{debug, warn};

use crate::bucket::{Bucket, BucketId};
use crate::directory::Directory;
use crate::error::{InsertError, InvariantViolation, MapError};
use crate::hash::{Keyed, TableKey, index_at_depth};

pub const INITIAL_GLOBAL_DEPTH: u32 = 1;
pub const DEFAULT_BUCKET_LIMIT: usize = 3;
/// 16M directory slots.
pub const DEFAULT_MAX_GLOBAL_DEPTH: u32 = 24;
pub const MAX_SUPPORTED_DEPTH: u32 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapConfig {
    /// Entries a bucket holds before it splits.
    pub bucket_limit: usize,
    /// Upper bound for the global depth. A bucket at this local depth can no
    /// longer split, which bounds the split rounds of a single insert.
    pub max_global_depth: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            bucket_limit: DEFAULT_BUCKET_LIMIT,
            max_global_depth: DEFAULT_MAX_GLOBAL_DEPTH,
        }
    }
}

impl MapConfig {
    pub fn with_bucket_limit(bucket_limit: usize) -> Self {
        Self {
            bucket_limit,
            ..Self::default()
        }
    }

    fn validate(self) -> Result<Self, MapError> {
        if self.bucket_limit == 0 {
            return Err(MapError::InvalidBucketLimit);
        }
        if !(INITIAL_GLOBAL_DEPTH..=MAX_SUPPORTED_DEPTH).contains(&self.max_global_depth) {
            return Err(MapError::InvalidMaxDepth(self.max_global_depth));
        }
        Ok(self)
    }
}

#[derive(Debug)]
pub struct ExtendibleMap<T> {
    config: MapConfig,
    directory: Directory,
    buckets: Vec<Bucket<T>>,
    len: usize,
}

impl<T: Keyed> ExtendibleMap<T> {
    /// A map with two empty depth-1 buckets behind a two-slot directory.
    pub fn new(bucket_limit: usize) -> Result<Self, MapError> {
        Self::with_config(MapConfig::with_bucket_limit(bucket_limit))
    }

    pub fn with_config(config: MapConfig) -> Result<Self, MapError> {
        let config = config.validate()?;
        let mut buckets = Vec::new();
        buckets
            .try_reserve(2)
            .map_err(|_| MapError::AllocationFailure)?;

        Ok(Self::with_buckets(config, buckets))
    }

    /// Fills `buckets`, which must be empty, with the two initial buckets.
    fn with_buckets(config: MapConfig, mut buckets: Vec<Bucket<T>>) -> Self {
        buckets.push(Bucket::new(INITIAL_GLOBAL_DEPTH));
        buckets.push(Bucket::new(INITIAL_GLOBAL_DEPTH));

        ExtendibleMap {
            config,
            directory: Directory::new(BucketId::new(0), BucketId::new(1)),
            buckets,
            len: 0,
        }
    }

    pub fn config(&self) -> MapConfig {
        self.config
    }

    pub fn bucket_limit(&self) -> usize {
        self.config.bucket_limit
    }

    pub fn global_depth(&self) -> u32 {
        self.directory.global_depth()
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket(&self, id: BucketId) -> Option<&Bucket<T>> {
        self.buckets.get(id.index())
    }

    pub fn find(&self, key: &T::Key) -> Option<&T> {
        self.find_hashed(key.table_hash(), key)
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.find(key).is_some()
    }

    fn find_hashed(&self, hash: u64, key: &T::Key) -> Option<&T> {
        let id = self.directory.bucket_of(hash);
        self.buckets[id.index()].find(hash, key)
    }

    /// Stores `value` unless its key is already present.
    ///
    /// A full target bucket is split, doubling the directory first when the
    /// bucket already uses every directory bit, and the insert is retried. On
    /// error the value is handed back and the map is left as it was before
    /// the failing split round; earlier completed splits are kept.
    pub fn insert(&mut self, value: T) -> Result<(), InsertError<T>> {
        let hash = value.key().table_hash();

        if self.find_hashed(hash, value.key()).is_some() {
            return Err(InsertError::new(value, MapError::DuplicateKey));
        }

        let mut rounds = 0;

        loop {
            let id = self.directory.bucket_of(hash);
            let bucket = &mut self.buckets[id.index()];

            if bucket.len() < self.config.bucket_limit {
                bucket.insert(hash, value);
                self.len += 1;
                return Ok(());
            }

            if bucket.local_depth() >= self.config.max_global_depth {
                warn!(
                    "Cannot split bucket {id} any further (local depth {}, {rounds} round(s))",
                    bucket.local_depth()
                );
                let kind = MapError::DegenerateSplit {
                    rounds,
                    local_depth: bucket.local_depth(),
                };
                return Err(InsertError::new(value, kind));
            }

            if let Err(kind) = self.split(id) {
                return Err(InsertError::new(value, kind));
            }
            rounds += 1;
        }
    }

    /// Splits `id` into itself and a fresh sibling one level deeper and
    /// redistributes its entries between the two.
    fn split(&mut self, id: BucketId) -> Result<(), MapError> {
        let local_depth = self.buckets[id.index()].local_depth();

        self.buckets
            .try_reserve(1)
            .map_err(|_| MapError::AllocationFailure)?;

        if local_depth == self.directory.global_depth() {
            self.directory.double()?;
        }

        let depth = local_depth + 1;
        let sibling = BucketId::new(self.buckets.len());
        self.buckets.push(Bucket::new(depth));
        self.buckets[id.index()].set_local_depth(depth);

        // The bit that became significant at the new depth decides the side.
        let bit = 1usize << (depth - 1);
        let moved = self.directory.redirect(id, sibling, bit);

        for (hash, value) in self.buckets[id.index()].take_chain() {
            let target = self.directory.bucket_of(hash);
            self.buckets[target.index()].insert(hash, value);
        }

        debug!(
            "Split bucket {id} into {sibling} at local depth {depth}, {moved} slot(s) moved, {} + {} entries",
            self.buckets[id.index()].len(),
            self.buckets[sibling.index()].len()
        );

        Ok(())
    }

    /// Releases every entry and returns to the freshly created shape.
    pub fn clear(&mut self) {
        // Dropping the arena frees each bucket exactly once, however many slots alias it.
        self.buckets.clear();
        self.buckets.push(Bucket::new(INITIAL_GLOBAL_DEPTH));
        self.buckets.push(Bucket::new(INITIAL_GLOBAL_DEPTH));
        self.directory.reset(BucketId::new(0), BucketId::new(1));
        self.len = 0;
    }

    /// Tears the map down. Returns the number of distinct buckets released.
    pub fn destroy(self) -> usize {
        let buckets = self.buckets.len();
        debug!(
            "Releasing {buckets} bucket(s) and {} entries behind {} slots",
            self.len,
            self.directory.len()
        );
        buckets
    }

    /// Distinct buckets in directory order, each with the first slot referring to it.
    pub fn buckets(&self) -> impl Iterator<Item = (usize, &Bucket<T>)> {
        self.directory
            .distinct(self.buckets.len())
            .map(move |(slot, id)| (slot, &self.buckets[id.index()]))
    }

    /// Values bucket by bucket in directory order, most recent first within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets().flat_map(|(_, bucket)| bucket.iter())
    }

    /// Verifies the structural invariants, returning the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let global_depth = self.directory.global_depth();
        let slots = self.directory.slots();

        if slots.len() != 1usize << global_depth {
            return Err(InvariantViolation::DirectoryLength {
                global_depth,
                len: slots.len(),
            });
        }

        let mut aliases = vec![0usize; self.buckets.len()];
        for (slot, &id) in slots.iter().enumerate() {
            match aliases.get_mut(id.index()) {
                Some(count) => *count += 1,
                None => return Err(InvariantViolation::UnknownBucket { slot, bucket: id }),
            }
        }

        let mut total = 0;
        for (index, bucket) in self.buckets.iter().enumerate() {
            let id = BucketId::new(index);
            let local_depth = bucket.local_depth();

            if aliases[index] == 0 {
                return Err(InvariantViolation::UnreferencedBucket { bucket: id });
            }
            if local_depth > global_depth {
                return Err(InvariantViolation::LocalDepthExceedsGlobal {
                    bucket: id,
                    local_depth,
                    global_depth,
                });
            }

            let expected = 1usize << (global_depth - local_depth);
            if aliases[index] != expected {
                return Err(InvariantViolation::AliasCount {
                    bucket: id,
                    expected,
                    actual: aliases[index],
                });
            }

            if bucket.len() > self.config.bucket_limit {
                return Err(InvariantViolation::Overfull {
                    bucket: id,
                    len: bucket.len(),
                    limit: self.config.bucket_limit,
                });
            }

            let counted = bucket.iter().count();
            if counted != bucket.len() {
                return Err(InvariantViolation::LengthMismatch {
                    bucket: id,
                    recorded: bucket.len(),
                    counted,
                });
            }

            // An entry belongs to whichever bucket its hash selects at the global depth.
            for hash in bucket.hashes() {
                let slot = index_at_depth(hash, global_depth);
                if slots[slot] != id {
                    return Err(InvariantViolation::Misplaced { bucket: id, slot });
                }
            }

            total += counted;
        }

        if total != self.len {
            return Err(InvariantViolation::TotalLength {
                recorded: self.len,
                counted: total,
            });
        }

        Ok(())
    }
}

impl<T: Keyed> Default for ExtendibleMap<T> {
    fn default() -> Self {
        Self::with_buckets(MapConfig::default(), Vec::with_capacity(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_map_has_two_distinct_depth_one_buckets() {
        let map: ExtendibleMap<String> = ExtendibleMap::new(2).unwrap();

        assert_eq!(map.global_depth(), 1);
        assert_eq!(map.directory().slots(), &[BucketId::new(0), BucketId::new(1)]);
        assert_eq!(map.bucket_count(), 2);
        assert!(map.buckets().all(|(_, bucket)| bucket.local_depth() == 1));
        assert!(map.is_empty());
        assert_eq!(map.check_invariants(), Ok(()));
    }

    #[test]
    fn test_config_is_validated() {
        assert_eq!(
            ExtendibleMap::<String>::new(0).unwrap_err(),
            MapError::InvalidBucketLimit
        );

        for max_global_depth in [0, MAX_SUPPORTED_DEPTH + 1] {
            let config = MapConfig {
                max_global_depth,
                ..MapConfig::default()
            };
            assert_eq!(
                ExtendibleMap::<String>::with_config(config).unwrap_err(),
                MapError::InvalidMaxDepth(max_global_depth)
            );
        }
    }

    #[test]
    fn test_split_without_doubling_when_bucket_is_shallow() {
        let mut map: ExtendibleMap<RawHash> = ExtendibleMap::new(1).unwrap();

        map.insert(RawHash(0b000)).unwrap();
        map.insert(RawHash(0b010)).unwrap();
        assert_eq!(map.global_depth(), 2);
        assert_eq!(map.bucket_count(), 3);

        map.insert(RawHash(0b001)).unwrap();
        map.insert(RawHash(0b011)).unwrap();

        // Slot 1's bucket was at local depth 1 under global depth 2, so it split
        // in place without growing the directory.
        assert_eq!(map.global_depth(), 2);
        assert_eq!(map.bucket_count(), 4);
        assert_eq!(map.check_invariants(), Ok(()));
    }

    #[test]
    fn test_clear_resets_shape() {
        let mut map: ExtendibleMap<String> = ExtendibleMap::new(1).unwrap();
        for key in ["alpha", "beta", "gamma", "delta"] {
            map.insert(key.to_string()).unwrap();
        }

        map.clear();

        assert_eq!(map.len(), 0);
        assert_eq!(map.global_depth(), 1);
        assert_eq!(map.bucket_count(), 2);
        assert_eq!(map.find("alpha"), None);
        assert_eq!(map.check_invariants(), Ok(()));

        map.insert("alpha".to_string()).unwrap();
        assert_eq!(map.find("alpha").map(String::as_str), Some("alpha"));
    }

    /// Stored value whose key is its own hash.
    #[derive(Debug)]
    struct RawHash(u64);

    impl Keyed for RawHash {
        type Key = u64;

        fn key(&self) -> &u64 {
            &self.0
        }
    }
}
