//! Owned, length-tagged byte buffers and the byte-exact comparator.

/// An owned, contiguous region of memory paired with its logical length.
///
/// A buffer of length 0 is valid and represents an empty file. Buffers
/// returned by the reader are owned by the caller; ownership is passed
/// forward explicitly, never shared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Create a zero-length buffer. Owns no readable storage.
    #[must_use]
    pub const fn empty() -> Self {
        Self { data: Vec::new() }
    }

    /// Allocate a buffer of exactly `len` zeroed bytes.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self {
            data: vec![0u8; len],
        }
    }

    /// Take ownership of an existing byte vector.
    #[must_use]
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Logical length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds zero bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the contents.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Borrow the contents mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}

/// Byte-wise equality over exactly `len` bytes of each buffer, starting at
/// offset 0. Short-circuits on the first mismatched byte.
///
/// The caller guarantees both buffers hold at least `len` bytes; the
/// orchestrator only invokes this once the two declared lengths are known
/// equal.
///
/// # Panics
///
/// Panics if `len` exceeds either buffer's length.
#[must_use]
pub fn compare_buffers(a: &Buffer, b: &Buffer, len: usize) -> bool {
    a.as_slice()[..len]
        .iter()
        .zip(&b.as_slice()[..len])
        .all(|(x, y)| x == y)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Reflexivity: a buffer always compares equal to itself.
        #[test]
        fn compare_reflexive(data in prop::collection::vec(any::<u8>(), 0..1024)) {
            let buf = Buffer::from_vec(data);
            let len = buf.len();
            prop_assert!(compare_buffers(&buf, &buf, len));
        }

        /// Symmetry: comparison order never changes the result.
        #[test]
        fn compare_symmetric(
            a in prop::collection::vec(any::<u8>(), 0..512),
            b in prop::collection::vec(any::<u8>(), 0..512),
        ) {
            let len = a.len().min(b.len());
            let a = Buffer::from_vec(a);
            let b = Buffer::from_vec(b);
            prop_assert_eq!(compare_buffers(&a, &b, len), compare_buffers(&b, &a, len));
        }

        /// A single flipped byte inside the compared window is detected.
        #[test]
        fn compare_detects_single_flip(
            data in prop::collection::vec(any::<u8>(), 1..512),
            idx in any::<prop::sample::Index>(),
        ) {
            let idx = idx.index(data.len());
            let mut flipped = data.clone();
            flipped[idx] ^= 0xFF;
            let a = Buffer::from_vec(data);
            let b = Buffer::from_vec(flipped);
            let len = a.len();
            prop_assert!(!compare_buffers(&a, &b, len));
        }
    }
}
