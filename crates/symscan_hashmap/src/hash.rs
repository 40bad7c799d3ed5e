/// Hashing and equality a key must provide to be stored in an
/// [`ExtendibleMap`](crate::ExtendibleMap).
///
/// `table_hash` must be stable for the lifetime of the map: slot indices are
/// always derived from the low bits of this one value.
pub trait TableKey {
    fn table_hash(&self) -> u64;

    fn table_eq(&self, other: &Self) -> bool;
}

/// A value stored in the map, addressed by the key it carries.
pub trait Keyed {
    type Key: TableKey + ?Sized;

    fn key(&self) -> &Self::Key;
}

const DJB2_SEED: u64 = 5381;

/// Bernstein's `h * 33 + byte` string hash.
///
/// Computed with wrapping 64-bit arithmetic. The low 32 bits are identical to
/// the classic 32-bit variant.
pub fn djb2(bytes: &[u8]) -> u64 {
    bytes.iter().fold(DJB2_SEED, |hash, &byte| {
        (hash << 5).wrapping_add(hash).wrapping_add(u64::from(byte))
    })
}

/// The directory slot `hash` selects at `depth`: its low `depth` bits.
#[inline]
pub fn index_at_depth(hash: u64, depth: u32) -> usize {
    let mask = (1u64 << depth) - 1;
    (hash & mask) as usize
}

impl TableKey for str {
    fn table_hash(&self) -> u64 {
        djb2(self.as_bytes())
    }

    fn table_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl TableKey for String {
    fn table_hash(&self) -> u64 {
        self.as_str().table_hash()
    }

    fn table_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl TableKey for u64 {
    fn table_hash(&self) -> u64 {
        *self
    }

    fn table_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl Keyed for String {
    type Key = str;

    fn key(&self) -> &str {
        self
    }
}

impl Keyed for Box<str> {
    type Key = str;

    fn key(&self) -> &str {
        self
    }
}

impl<V> Keyed for (String, V) {
    type Key = str;

    fn key(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_djb2_matches_reference_values() {
        assert_eq!(djb2(b""), 5381);
        assert_eq!(djb2(b"a"), 177_670);
        assert_eq!(djb2(b"ab"), 5_863_208);
    }

    #[test]
    fn test_low_bits_match_32_bit_variant() {
        let hash32 = b"a rather long identifier_name"
            .iter()
            .fold(5381u32, |h, &b| (h << 5).wrapping_add(h).wrapping_add(u32::from(b)));

        assert_eq!(djb2(b"a rather long identifier_name") as u32, hash32);
    }

    #[test]
    fn test_index_refines_when_depth_grows() {
        let hash = djb2(b"counter");

        for depth in 1..20 {
            let shallow = index_at_depth(hash, depth);
            let deep = index_at_depth(hash, depth + 1);
            assert_eq!(deep & ((1 << depth) - 1), shallow);
        }
    }

    #[test]
    fn test_index_at_depth_masks_low_bits() {
        assert_eq!(index_at_depth(0b1011_0110, 1), 0);
        assert_eq!(index_at_depth(0b1011_0110, 3), 0b110);
        assert_eq!(index_at_depth(0b1011_0110, 5), 0b1_0110);
    }
}
