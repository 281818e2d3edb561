use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, SpectrogramError};
use crate::spectral::matrix::SpectrogramMatrix;

/// Serialize the matrix as a bare array of rows, pretty-printed with two-space indents.
pub fn write_json(matrix: &SpectrogramMatrix, path: &Path) -> Result<()> {
    super::ensure_parent_dir(path)?;
    let file = std::fs::File::create(path).map_err(|e| SpectrogramError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, matrix.rows())
        .map_err(|e| SpectrogramError::io(path, e.into()))?;
    writer.flush().map_err(|e| SpectrogramError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_rectangular_array_of_rows() {
        let dir = std::env::temp_dir().join(format!("specgram-json-{}", std::process::id()));
        let path = dir.join("data").join("spectrogram.json");
        let matrix = SpectrogramMatrix::from_rows(
            vec![vec![-90.0, -12.5, 3.25], vec![-1.0, 0.0, -60.75]],
            3,
        );

        write_json(&matrix, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        let parsed: Vec<Vec<f64>> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, matrix.rows());
        assert!(text.starts_with("[\n  [\n    -90.0,"));
    }

    #[test]
    fn empty_matrix_is_empty_array() {
        let dir = std::env::temp_dir().join(format!("specgram-json-empty-{}", std::process::id()));
        let path = dir.join("empty.json");

        write_json(&SpectrogramMatrix::from_rows(Vec::new(), 512), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(text, "[]");
    }

    #[test]
    fn unwritable_path_is_io_failure() {
        let dir = std::env::temp_dir().join(format!("specgram-json-dir-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        // The target is an existing directory, so creating a file there fails.
        let err = write_json(&SpectrogramMatrix::default(), &dir).unwrap_err();
        std::fs::remove_dir_all(&dir).ok();

        assert!(matches!(err, SpectrogramError::Io { .. }));
    }
}
