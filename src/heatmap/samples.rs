//! Raw sample file format
//!
//! A sample file is a flat sequence of IEEE-754 `f64` values in big-endian
//! byte order, with no header and no padding. The solver side writes meshes
//! this way; the renderer reads them back.
//!
//! Byte order matters: reading these files as little-endian does not fail,
//! it silently produces garbage values.

use super::error::{HeatmapError, Result};
use super::grid::Grid;
use std::path::Path;
use tracing::debug;

/// Size of one encoded sample in bytes
pub const SAMPLE_SIZE: usize = std::mem::size_of::<f64>();

/// Read a whole sample file into memory
pub fn read_samples(path: &Path) -> Result<Vec<f64>> {
    let bytes = std::fs::read(path).map_err(|e| HeatmapError::file_access(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read sample file");
    decode_samples(&bytes)
}

/// Decode big-endian `f64` samples
///
/// Fails with a shape error when the byte count is not a multiple of 8.
pub fn decode_samples(bytes: &[u8]) -> Result<Vec<f64>> {
    if bytes.len() % SAMPLE_SIZE != 0 {
        return Err(HeatmapError::Shape(format!(
            "sample data is {} bytes, which is not a multiple of {}",
            bytes.len(),
            SAMPLE_SIZE
        )));
    }

    Ok(bytes
        .chunks_exact(SAMPLE_SIZE)
        .map(|chunk| {
            let mut raw = [0u8; SAMPLE_SIZE];
            raw.copy_from_slice(chunk);
            f64::from_be_bytes(raw)
        })
        .collect())
}

/// Encode samples as big-endian `f64` bytes
pub fn encode_samples(samples: &[f64]) -> Vec<u8> {
    samples.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// Write a grid as a flat row-major sample file
///
/// The file is replaced atomically, so readers never observe a partial mesh.
pub fn write_samples(path: &Path, grid: &Grid) -> Result<()> {
    let bytes = encode_samples(&grid.to_flat());
    super::output::write_atomic(path, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_big_endian() {
        // 1.0 = 0x3FF0000000000000, -2.5 = 0xC004000000000000
        let bytes = [
            0x3F, 0xF0, 0, 0, 0, 0, 0, 0, //
            0xC0, 0x04, 0, 0, 0, 0, 0, 0,
        ];
        assert_eq!(decode_samples(&bytes).unwrap(), vec![1.0, -2.5]);
    }

    #[test]
    fn test_decode_is_not_little_endian() {
        let bytes = 0.5f64.to_le_bytes();
        let decoded = decode_samples(&bytes).unwrap();
        assert_ne!(decoded[0], 0.5);
    }

    #[test]
    fn test_decode_rejects_partial_sample() {
        let err = decode_samples(&[0u8; 10]).unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_samples(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_encode_matches_to_be_bytes() {
        let values = [0.5, -0.5, f64::MAX, 0.0];
        let bytes = encode_samples(&values);
        assert_eq!(bytes.len(), values.len() * SAMPLE_SIZE);
        assert_eq!(&bytes[0..8], &0.5f64.to_be_bytes());
        assert_eq!(decode_samples(&bytes).unwrap(), values.to_vec());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_samples(&dir.path().join("MyMesh")).unwrap_err();
        assert!(err.is_file_access_error());
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MyMesh");
        let grid = Grid::from_fn(2, 3, |i, j| (i * 3 + j) as f64 - 2.5);

        write_samples(&path, &grid).unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 6 * 8);
        assert_eq!(read_samples(&path).unwrap(), grid.to_flat());
    }
}
