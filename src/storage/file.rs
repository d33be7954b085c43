//! File-backed save and load.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::StorageError;
use super::format::{load_grid, packed_len, save_grid};
use crate::compute::Grid;

/// Save `grid` to `path`, replacing any existing file.
pub fn save_to_path<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<(), StorageError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    save_grid(grid, &mut writer)?;
    writer.flush()?;

    log::info!(
        "saved {}x{} grid ({} bytes) to {}",
        grid.width(),
        grid.height(),
        packed_len(grid.width(), grid.height()),
        path.display()
    );
    Ok(())
}

/// Load `path` into `grid` using the grid's current dimensions.
///
/// A file longer than the grid needs is read from its prefix.
pub fn load_from_path<P: AsRef<Path>>(grid: &mut Grid, path: P) -> Result<(), StorageError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let file_len = file.metadata()?.len();
    let expected = packed_len(grid.width(), grid.height()) as u64;
    if file_len > expected {
        log::warn!(
            "{} holds {} bytes, {}x{} grid only uses {}",
            path.display(),
            file_len,
            grid.width(),
            grid.height(),
            expected
        );
    }

    let mut reader = BufReader::new(file);
    load_grid(grid, &mut reader)?;

    log::info!(
        "loaded {}x{} grid from {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn glider_grid() -> Grid {
        let mut grid = Grid::new(10, 10).unwrap();
        for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
            grid.set_alive(x, y, true).unwrap();
        }
        grid
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid-save.bin");

        let grid = glider_grid();
        save_to_path(&grid, &path).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 13);

        let mut loaded = Grid::new(10, 10).unwrap();
        load_from_path(&mut loaded, &path).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let mut grid = Grid::new(4, 4).unwrap();
        let err = load_from_path(&mut grid, dir.path().join("nope.bin")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn test_truncated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.bin");
        fs::write(&path, [0xFFu8; 3]).unwrap();

        let mut grid = Grid::new(10, 10).unwrap();
        let err = load_from_path(&mut grid, &path).unwrap_err();
        assert!(matches!(
            err,
            StorageError::ShortRead {
                expected: 13,
                actual: 3
            }
        ));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_load_into_larger_grid_reads_prefix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.bin");

        let mut grid = Grid::new(8, 2).unwrap();
        grid.fill(true);
        save_to_path(&grid, &path).unwrap();

        let mut small = Grid::new(8, 1).unwrap();
        load_from_path(&mut small, &path).unwrap();
        assert_eq!(small.population(), 8);
    }
}
