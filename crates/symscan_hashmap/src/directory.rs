use log::debug;

use crate::bucket::BucketId;
use crate::error::MapError;
use crate::hash::index_at_depth;

/// The slot table of an extendible hash map: always `2^global_depth` bucket ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    global_depth: u32,
    slots: Vec<BucketId>,
}

impl Directory {
    /// A depth-1 directory whose two slots refer to `low` and `high`.
    pub(crate) fn new(low: BucketId, high: BucketId) -> Self {
        Directory {
            global_depth: 1,
            slots: vec![low, high],
        }
    }

    pub fn global_depth(&self) -> u32 {
        self.global_depth
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[BucketId] {
        &self.slots
    }

    /// The slot `hash` selects at the current global depth.
    pub fn slot_of(&self, hash: u64) -> usize {
        index_at_depth(hash, self.global_depth)
    }

    /// The bucket `hash` selects at the current global depth.
    pub fn bucket_of(&self, hash: u64) -> BucketId {
        self.slots[self.slot_of(hash)]
    }

    /// Doubles the directory. Slot `i + old_len` aliases the same bucket as slot
    /// `i`, so every bucket keeps its alias count relative to the new depth.
    ///
    /// Nothing changes when the allocation fails.
    pub(crate) fn double(&mut self) -> Result<(), MapError> {
        let old_len = self.slots.len();

        self.slots
            .try_reserve_exact(old_len)
            .map_err(|_| MapError::AllocationFailure)?;
        self.slots.extend_from_within(..);
        self.global_depth += 1;

        debug!(
            "Doubled directory to {} slots (global depth {})",
            self.slots.len(),
            self.global_depth
        );

        Ok(())
    }

    /// Repoints every slot that refers to `from` and has `bit` set to `to`.
    /// Returns how many slots moved.
    pub(crate) fn redirect(&mut self, from: BucketId, to: BucketId, bit: usize) -> usize {
        let mut moved = 0;

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if *slot == from && index & bit != 0 {
                *slot = to;
                moved += 1;
            }
        }

        moved
    }

    /// Number of slots referring to `bucket`.
    pub fn alias_count(&self, bucket: BucketId) -> usize {
        self.slots.iter().filter(|&&slot| slot == bucket).count()
    }

    /// Each distinct bucket once, paired with the first slot that refers to it,
    /// in slot order. `bucket_count` bounds the ids found in the directory.
    pub fn distinct(&self, bucket_count: usize) -> impl Iterator<Item = (usize, BucketId)> + '_ {
        let mut seen = vec![false; bucket_count];

        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(slot, &bucket)| {
                let first = seen.get_mut(bucket.index())?;
                if *first {
                    return None;
                }
                *first = true;
                Some((slot, bucket))
            })
    }

    pub(crate) fn reset(&mut self, low: BucketId, high: BucketId) {
        *self = Directory::new(low, high);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(index: usize) -> BucketId {
        BucketId::new(index)
    }

    #[test]
    fn test_double_mirrors_low_half() {
        let mut directory = Directory::new(id(0), id(1));

        directory.double().unwrap();

        assert_eq!(directory.global_depth(), 2);
        assert_eq!(directory.slots(), &[id(0), id(1), id(0), id(1)]);
    }

    #[test]
    fn test_redirect_moves_slots_with_split_bit() {
        let mut directory = Directory::new(id(0), id(1));
        directory.double().unwrap();
        directory.double().unwrap();

        let moved = directory.redirect(id(0), id(2), 0b10);

        assert_eq!(moved, 2);
        assert_eq!(
            directory.slots(),
            &[id(0), id(1), id(2), id(1), id(0), id(1), id(2), id(1)]
        );
        assert_eq!(directory.alias_count(id(0)), 2);
        assert_eq!(directory.alias_count(id(1)), 4);
    }

    #[test]
    fn test_distinct_reports_first_slot_in_order() {
        let mut directory = Directory::new(id(1), id(0));
        directory.double().unwrap();
        directory.redirect(id(1), id(2), 0b10);

        let distinct: Vec<_> = directory.distinct(3).collect();

        assert_eq!(distinct, vec![(0, id(1)), (1, id(0)), (2, id(2))]);
    }

    #[test]
    fn test_slot_of_uses_global_depth() {
        let mut directory = Directory::new(id(0), id(1));
        assert_eq!(directory.slot_of(0b111), 1);

        directory.double().unwrap();
        directory.double().unwrap();
        assert_eq!(directory.slot_of(0b1110), 0b110);
        assert_eq!(directory.bucket_of(0b1110), id(0));
    }
}
