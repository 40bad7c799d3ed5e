use std::marker::PhantomData;

/// A zero-based index tagged with the kind of thing it indexes, so bucket ids
/// and declaration indices cannot be mixed up.
#[derive(Eq, PartialEq, Hash)]
pub struct Id<T> {
    inner: usize,
    _marker: PhantomData<T>,
}

// Manual impls, deriving would require `T: Copy`.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Id<T> {
    pub fn new(index: usize) -> Self {
        Id {
            inner: index,
            _marker: PhantomData,
        }
    }

    pub fn index(self) -> usize {
        self.inner
    }

    pub fn next(self) -> Self {
        Id::new(self.inner.saturating_add(1))
    }
}

impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = std::any::type_name::<T>();
        let short = name.rsplit("::").next().unwrap_or(name);
        write!(f, "{}({})", short, self.inner)
    }
}

impl<T> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IdAllocator<T> {
    next_id: Id<T>,
}

impl<T> IdAllocator<T> {
    pub fn new() -> Self {
        IdAllocator { next_id: Id::new(0) }
    }

    pub fn next_id(&mut self) -> Id<T> {
        let id = self.next_id;
        self.next_id = self.next_id.next();
        id
    }
}

impl<T> Default for IdAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
    struct Tag;

    #[test]
    fn test_allocator_hands_out_sequential_ids() {
        let mut allocator = IdAllocator::<Tag>::new();
        assert_eq!(allocator.next_id().index(), 0);
        assert_eq!(allocator.next_id().index(), 1);
        assert_eq!(allocator.next_id().index(), 2);
    }

    #[test]
    fn test_debug_uses_short_tag_name() {
        let id = Id::<Tag>::new(4);
        assert_eq!(format!("{id:?}"), "Tag(4)");
        assert_eq!(id.to_string(), "4");
    }
}
