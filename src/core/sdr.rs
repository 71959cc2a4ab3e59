//! # SDR
//!
//! Sparse Distributed Representation: a fixed-shape binary tensor.
//!
//! The same content can be read and written in two forms:
//! - **Dense**: one byte (0 or 1) per position, in storage order
//! - **Sparse**: ascending, duplicate-free indices of the active positions
//!
//! Single positions are addressed with [`Sdr::at`], which uses the engine's
//! axis-reversed convention (see [`super::layout`]).
//!
//! Content is only ever replaced wholesale. Every setter validates its input
//! first and swaps in a freshly built buffer on success, so a rejected call
//! leaves the previous content untouched.

use std::fmt;

use super::layout;

/// Result type for SDR operations
pub type SdrResult<T> = Result<T, SdrError>;

/// SDR codec errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdrError {
    #[error("Invalid shape {shape:?}: {reason}")]
    InvalidShape { shape: Vec<usize>, reason: String },

    /// A sparse index or an `at` coordinate tuple does not address a position
    #[error("{0}")]
    IndexOutOfRange(OutOfRange),

    #[error("Length mismatch: expected {expected} bytes, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("Invalid value {value} at position {position}, expected 0 or 1")]
    InvalidAlphabet { position: usize, value: u8 },
}

/// What was out of range in an [`SdrError::IndexOutOfRange`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutOfRange {
    #[error("Index {index} out of range for SDR of size {size}")]
    Index { index: usize, size: usize },

    #[error("Coordinates {coordinates:?} out of range for shape {shape:?}")]
    Coordinates {
        coordinates: Vec<usize>,
        shape: Vec<usize>,
    },
}

/// A fixed-shape binary tensor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sdr {
    shape: Vec<usize>,
    dense: Vec<u8>,
}

impl Sdr {
    /// Create an all-zero SDR with the given shape
    ///
    /// # Example
    /// ```
    /// use htm_rest::Sdr;
    /// let sdr = Sdr::new(&[8, 2]).unwrap();
    /// assert_eq!(sdr.size(), 16);
    /// assert!(sdr.get_sparse().is_empty());
    /// ```
    pub fn new(shape: &[usize]) -> SdrResult<Self> {
        let invalid = |reason: &str| SdrError::InvalidShape {
            shape: shape.to_vec(),
            reason: reason.to_string(),
        };

        if shape.is_empty() {
            return Err(invalid("at least one dimension is required"));
        }
        if shape.contains(&0) {
            return Err(invalid("every dimension must be at least 1"));
        }
        let size = shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or_else(|| invalid("total size overflows"))?;

        // The shape may come from an engine payload, so a failed allocation
        // must surface as an error rather than abort.
        let mut dense = Vec::new();
        dense
            .try_reserve_exact(size)
            .map_err(|_| invalid("total size too large"))?;
        dense.resize(size, 0);

        Ok(Self {
            shape: shape.to_vec(),
            dense,
        })
    }

    /// Create an SDR and activate the given sparse indices
    pub fn from_sparse(shape: &[usize], indices: &[usize]) -> SdrResult<Self> {
        let mut sdr = Self::new(shape)?;
        sdr.set_sparse(indices)?;
        Ok(sdr)
    }

    /// Dimensions, in declaration order
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions
    pub fn num_dimensions(&self) -> usize {
        self.shape.len()
    }

    /// Total number of addressable positions
    pub fn size(&self) -> usize {
        self.dense.len()
    }

    /// Number of active positions
    pub fn sum(&self) -> usize {
        self.dense.iter().filter(|&&bit| bit == 1).count()
    }

    /// Replace the content with the given active indices
    ///
    /// Indices may be unsorted and may repeat. Every position not named is
    /// cleared.
    pub fn set_sparse(&mut self, indices: &[usize]) -> SdrResult<()> {
        let size = self.size();
        if let Some(&index) = indices.iter().find(|&&i| i >= size) {
            return Err(SdrError::IndexOutOfRange(OutOfRange::Index { index, size }));
        }

        let mut dense = vec![0u8; size];
        for &index in indices {
            dense[index] = 1;
        }
        self.dense = dense;
        Ok(())
    }

    /// Ascending indices of the active positions
    pub fn get_sparse(&self) -> Vec<usize> {
        self.dense
            .iter()
            .enumerate()
            .filter(|(_, &bit)| bit == 1)
            .map(|(index, _)| index)
            .collect()
    }

    /// Replace the content with a dense byte sequence in storage order
    pub fn set_dense(&mut self, dense: &[u8]) -> SdrResult<()> {
        if dense.len() != self.size() {
            return Err(SdrError::LengthMismatch {
                expected: self.size(),
                got: dense.len(),
            });
        }
        if let Some((position, &value)) = dense.iter().enumerate().find(|(_, &b)| b > 1) {
            return Err(SdrError::InvalidAlphabet { position, value });
        }

        self.dense = dense.to_vec();
        Ok(())
    }

    /// Copy of the full content in storage order
    pub fn get_dense(&self) -> Vec<u8> {
        self.dense.clone()
    }

    /// Value at the given coordinates, one per dimension
    ///
    /// Addressing is axis-reversed: for shape `[2, 8]`, `at(&[1, 0])` reads
    /// flat position 1 and `at(&[0, 1])` reads flat position 2. This matches
    /// the layout of engine payloads; do not replace it with plain row-major
    /// indexing.
    pub fn at(&self, coordinates: &[usize]) -> SdrResult<u8> {
        layout::engine_flat_index(&self.shape, coordinates)
            .map(|index| self.dense[index])
            .ok_or_else(|| {
                SdrError::IndexOutOfRange(OutOfRange::Coordinates {
                    coordinates: coordinates.to_vec(),
                    shape: self.shape.clone(),
                })
            })
    }

    /// Dense content as `[b0,b1,...]`
    pub fn stringify_dense(&self) -> String {
        join_bracketed(self.dense.iter())
    }
}

/// Sparse content as `[i0,i1,...]`
impl fmt::Display for Sdr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_bracketed(self.get_sparse().iter()))
    }
}

fn join_bracketed<T: fmt::Display>(values: impl Iterator<Item = T>) -> String {
    let joined: Vec<String> = values.map(|v| v.to_string()).collect();
    format!("[{}]", joined.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_zero() {
        let sdr = Sdr::new(&[8, 8]).unwrap();
        assert_eq!(sdr.size(), 64);
        assert_eq!(sdr.num_dimensions(), 2);
        assert_eq!(sdr.sum(), 0);
        assert!(sdr.get_dense().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        assert!(matches!(Sdr::new(&[]), Err(SdrError::InvalidShape { .. })));
        assert!(matches!(Sdr::new(&[8, 0]), Err(SdrError::InvalidShape { .. })));
        assert!(matches!(
            Sdr::new(&[usize::MAX, 2]),
            Err(SdrError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_new_unallocatable_shape_is_an_error() {
        match Sdr::new(&[usize::MAX / 2]) {
            Err(SdrError::InvalidShape { reason, .. }) => assert_eq!(reason, "total size too large"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_one_dimensional_sparse() {
        let mut sdr = Sdr::new(&[8]).unwrap();
        sdr.set_sparse(&[0, 7]).unwrap();
        assert_eq!(sdr.get_sparse(), vec![0, 7]);
        assert_eq!(sdr.get_dense(), vec![1, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_two_dimensional_sparse() {
        let mut sdr = Sdr::new(&[8, 8]).unwrap();
        sdr.set_sparse(&[1, 6, 8, 63]).unwrap();
        assert_eq!(sdr.get_sparse(), vec![1, 6, 8, 63]);
    }

    #[test]
    fn test_two_dimensional_dense_from_sparse() {
        let mut sdr = Sdr::new(&[8, 2]).unwrap();
        sdr.set_sparse(&[0, 1, 14, 15]).unwrap();
        assert_eq!(
            sdr.get_dense(),
            vec![1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1]
        );
    }

    #[test]
    fn test_one_dimensional_sparse_from_dense() {
        let mut sdr = Sdr::new(&[8]).unwrap();
        sdr.set_dense(&[1, 1, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(sdr.get_sparse(), vec![0, 1]);
    }

    #[test]
    fn test_two_dimensional_sparse_from_dense() {
        let mut sdr = Sdr::new(&[8, 2]).unwrap();
        sdr.set_dense(&[1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1])
            .unwrap();
        assert_eq!(sdr.get_sparse(), vec![0, 1, 14, 15]);
    }

    #[test]
    fn test_sparse_is_normalized() {
        let mut sdr = Sdr::new(&[10]).unwrap();
        sdr.set_sparse(&[9, 3, 3, 0, 9]).unwrap();
        assert_eq!(sdr.get_sparse(), vec![0, 3, 9]);
        assert_eq!(sdr.sum(), 3);
    }

    #[test]
    fn test_set_sparse_overwrites() {
        let mut sdr = Sdr::new(&[8]).unwrap();
        sdr.set_sparse(&[1, 2]).unwrap();
        sdr.set_sparse(&[5]).unwrap();
        assert_eq!(sdr.get_sparse(), vec![5]);

        sdr.set_sparse(&[]).unwrap();
        assert!(sdr.get_sparse().is_empty());
    }

    #[test]
    fn test_at() {
        let dense = [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1];
        let mut sdr = Sdr::new(&[2, 8]).unwrap();
        sdr.set_dense(&dense).unwrap();

        assert_eq!(sdr.at(&[0, 0]).unwrap(), dense[0]);
        assert_eq!(sdr.at(&[1, 0]).unwrap(), dense[1]);
        assert_eq!(sdr.at(&[0, 1]).unwrap(), dense[2]);
        assert_eq!(sdr.at(&[1, 1]).unwrap(), dense[3]);
        assert_eq!(sdr.at(&[0, 7]).unwrap(), dense[14]);
        assert_eq!(sdr.at(&[1, 7]).unwrap(), dense[15]);
    }

    #[test]
    fn test_at_out_of_range() {
        let sdr = Sdr::new(&[2, 8]).unwrap();
        assert_eq!(
            sdr.at(&[2, 0]).unwrap_err(),
            SdrError::IndexOutOfRange(OutOfRange::Coordinates {
                coordinates: vec![2, 0],
                shape: vec![2, 8],
            })
        );
        assert!(matches!(sdr.at(&[0, 8]), Err(SdrError::IndexOutOfRange(_))));
        assert!(matches!(sdr.at(&[0]), Err(SdrError::IndexOutOfRange(_))));
        assert!(matches!(sdr.at(&[0, 0, 0]), Err(SdrError::IndexOutOfRange(_))));
    }

    #[test]
    fn test_set_sparse_out_of_range_keeps_content() {
        let mut sdr = Sdr::new(&[8]).unwrap();
        sdr.set_sparse(&[2, 4]).unwrap();

        let err = sdr.set_sparse(&[1, 8]).unwrap_err();
        assert_eq!(
            err,
            SdrError::IndexOutOfRange(OutOfRange::Index { index: 8, size: 8 })
        );
        assert_eq!(sdr.get_sparse(), vec![2, 4]);
    }

    #[test]
    fn test_set_dense_length_mismatch_keeps_content() {
        let mut sdr = Sdr::new(&[8]).unwrap();
        sdr.set_sparse(&[3]).unwrap();

        let err = sdr.set_dense(&[1, 0, 0]).unwrap_err();
        assert_eq!(err, SdrError::LengthMismatch { expected: 8, got: 3 });
        assert_eq!(sdr.get_sparse(), vec![3]);
    }

    #[test]
    fn test_set_dense_invalid_alphabet_keeps_content() {
        let mut sdr = Sdr::new(&[8]).unwrap();
        sdr.set_sparse(&[3]).unwrap();

        let err = sdr.set_dense(&[1, 0, 0, 0, 2, 0, 0, 0]).unwrap_err();
        assert_eq!(err, SdrError::InvalidAlphabet { position: 4, value: 2 });
        assert_eq!(sdr.get_sparse(), vec![3]);
    }

    #[test]
    fn test_shape_survives_assignment() {
        let mut sdr = Sdr::new(&[4, 2]).unwrap();
        sdr.set_dense(&[0, 1, 0, 1, 0, 1, 0, 1]).unwrap();
        sdr.set_sparse(&[7]).unwrap();
        assert_eq!(sdr.shape(), &[4, 2]);
    }

    #[test]
    fn test_display() {
        let sdr = Sdr::from_sparse(&[8], &[7, 0]).unwrap();
        assert_eq!(sdr.to_string(), "[0,7]");
        assert_eq!(sdr.stringify_dense(), "[1,0,0,0,0,0,0,1]");

        let empty = Sdr::new(&[3]).unwrap();
        assert_eq!(empty.to_string(), "[]");
        assert_eq!(empty.stringify_dense(), "[0,0,0]");
    }

    #[test]
    fn test_snapshots_do_not_alias() {
        let mut sdr = Sdr::from_sparse(&[4], &[1]).unwrap();
        let mut dense = sdr.get_dense();
        dense[0] = 1;
        assert_eq!(sdr.get_sparse(), vec![1]);

        sdr.set_sparse(&[2]).unwrap();
        assert_eq!(dense, vec![1, 1, 0, 0]);
    }
}
