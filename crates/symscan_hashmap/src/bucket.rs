use symscan_span::id::Id;

use crate::hash::{Keyed, TableKey};

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct BucketTag;

/// Position of a bucket in the map's arena. Directory slots holding equal ids
/// alias the same bucket.
pub type BucketId = Id<BucketTag>;

/// One link of a bucket's chain. The hash is kept so a split can redistribute
/// the entry without rehashing its key.
#[derive(Debug)]
struct Entry<T> {
    hash: u64,
    value: T,
    next: Link<T>,
}

type Link<T> = Option<Box<Entry<T>>>;

#[derive(Debug)]
pub struct Bucket<T> {
    local_depth: u32,
    len: usize,
    head: Link<T>,
}

impl<T> Bucket<T> {
    pub(crate) fn new(local_depth: u32) -> Self {
        Bucket {
            local_depth,
            len: 0,
            head: None,
        }
    }

    /// Number of low hash bits shared by every entry of this bucket.
    pub fn local_depth(&self) -> u32 {
        self.local_depth
    }

    pub(crate) fn set_local_depth(&mut self, local_depth: u32) {
        self.local_depth = local_depth;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Prepends an entry. Uniqueness is the map's concern, not the bucket's.
    pub(crate) fn insert(&mut self, hash: u64, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Entry { hash, value, next }));
        self.len += 1;
    }

    /// Detaches the whole chain, leaving the bucket empty at its current depth.
    pub(crate) fn take_chain(&mut self) -> Drain<T> {
        self.len = 0;
        Drain {
            next: self.head.take(),
        }
    }

    /// Releases every entry and the values they own.
    pub(crate) fn clear(&mut self) {
        drop(self.take_chain());
    }

    /// Entries from most to least recently inserted.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub(crate) fn hashes(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries().map(|entry| entry.hash)
    }

    fn entries(&self) -> impl Iterator<Item = &Entry<T>> {
        std::iter::successors(self.head.as_deref(), |entry| entry.next.as_deref())
    }
}

impl<T: Keyed> Bucket<T> {
    pub(crate) fn find(&self, hash: u64, key: &T::Key) -> Option<&T> {
        self.entries()
            .find(|entry| entry.hash == hash && entry.value.key().table_eq(key))
            .map(|entry| &entry.value)
    }
}

// Unlink iteratively, the default recursive drop of a long chain could exhaust the stack.
impl<T> Drop for Bucket<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Entry<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let entry = self.next?;
        self.next = entry.next.as_deref();
        Some(&entry.value)
    }
}

/// Owning iterator over a detached chain, yielding `(hash, value)` pairs.
pub(crate) struct Drain<T> {
    next: Link<T>,
}

impl<T> Iterator for Drain<T> {
    type Item = (u64, T);

    fn next(&mut self) -> Option<(u64, T)> {
        let entry = self.next.take()?;
        let Entry { hash, value, next } = *entry;
        self.next = next;
        Some((hash, value))
    }
}

impl<T> Drop for Drain<T> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}
