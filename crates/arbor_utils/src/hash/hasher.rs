//! `FixedHashState` and `NoOpHashState`.
//!
//! `FixedHashState` uses `foldhash` with a constant seed, so two maps that
//! received the same keys in the same order iterate identically between runs.
//! `NoOpHashState` passes an already uniform `u64` (such as a `TypeId`) through.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6A09E667F3BCC908);

/// A hasher whose results only depend on the input.
pub type FixedHasher = FoldHasher<'static>;

/// Builds [`FixedHasher`]s from a constant seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use arbor_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("piece");
/// let b = FixedHashState.hash_one("piece");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that keeps the last written `u64` as the hash.
///
/// Byte writes are folded in reverse order with a left rotation, so
/// `write_u32(10)` and `write_u64(10)` agree when called once.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        self.hash = bytes
            .iter()
            .rev()
            .fold(self.hash, |hash, byte| hash.rotate_left(8) ^ u64::from(*byte));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`]s.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use arbor_utils::hash::NoOpHashState;
///
/// assert_eq!(NoOpHashState.hash_one(3_u64), 3);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

#[cfg(test)]
mod tests {
    use core::hash::{BuildHasher, Hasher};

    use super::{FixedHashState, NoOpHashState};

    #[test]
    fn noop_width_agnostic() {
        let mut a = NoOpHashState.build_hasher();
        a.write_u32(1234);
        let mut b = NoOpHashState.build_hasher();
        b.write_u64(1234);
        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn fixed_is_stable() {
        assert_eq!(FixedHashState.hash_one(42_i32), FixedHashState.hash_one(42_i32));
        assert_ne!(FixedHashState.hash_one(1_i32), FixedHashState.hash_one(2_i32));
    }
}
