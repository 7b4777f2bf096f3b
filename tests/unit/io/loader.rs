//! Tests for TIFF decoding and shape validation

#[cfg(test)]
mod tests {
    use crate::{write_gray8_tiff, write_gray16_tiff, write_rgb8_tiff};
    use multiplicity::AnalysisError;
    use multiplicity::io::loader::{decode_grid, load_grid, unpack_gray};
    use ndarray::array;
    use std::io::Cursor;
    use tempfile::TempDir;

    // Tests an 8-bit grayscale image loads as a height x width grid
    // Verified by swapping rows and columns when building the grid
    #[test]
    fn test_load_gray8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gray.tiff");
        write_gray8_tiff(&path, 3, 2, &[&[0, 1, 2, 3, 4, 255]]);

        let grid = load_grid(&path).unwrap();

        assert_eq!(grid, array![[0.0, 1.0, 2.0], [3.0, 4.0, 255.0]]);
    }

    // Tests 16-bit samples keep their full range
    // Verified by narrowing samples to 8 bits
    #[test]
    fn test_load_gray16() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deep.tiff");
        write_gray16_tiff(&path, 2, 1, &[1000, 65535]);

        let grid = load_grid(&path).unwrap();

        assert_eq!(grid, array![[1000.0, 65535.0]]);
    }

    // Tests a five page stack is rejected with its volumetric shape
    // Verified by decoding only the first page of a stack
    #[test]
    fn test_stack_rejected_with_shape() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stack.tiff");
        let page = vec![0u8; 4 * 3];
        let pages: Vec<&[u8]> = (0..5).map(|_| page.as_slice()).collect();
        write_gray8_tiff(&path, 4, 3, &pages);

        match load_grid(&path) {
            Err(AnalysisError::Shape { path: error_path, shape }) => {
                assert_eq!(error_path, path);
                assert_eq!(shape, vec![5, 3, 4]);
            }
            other => unreachable!("Expected Shape error, got {other:?}"),
        }
    }

    // Tests multi-channel pixels are rejected with a trailing samples axis
    // Verified by converting colour images to luminance
    #[test]
    fn test_rgb_rejected_with_shape() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("colour.tiff");
        write_rgb8_tiff(&path, 2, 1, &[1, 2, 3, 4, 5, 6]);

        match load_grid(&path) {
            Err(AnalysisError::Shape { shape, .. }) => assert_eq!(shape, vec![1, 2, 3]),
            other => unreachable!("Expected Shape error, got {other:?}"),
        }
    }

    // Tests the shape error message reports the tuple shape
    // Verified by printing the shape with debug formatting
    #[test]
    fn test_shape_error_message() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pair.tiff");
        write_gray8_tiff(&path, 1, 1, &[&[1], &[2]]);

        let message = load_grid(&path).unwrap_err().to_string();

        assert!(message.contains("(2, 1, 1)"), "{message}");
        assert!(message.contains("pair.tiff"), "{message}");
    }

    // Tests a missing file reports the path and the open operation
    // Verified by dropping the path from the error
    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.tiff");

        match load_grid(&path) {
            Err(AnalysisError::FileSystem {
                path: error_path,
                operation,
                ..
            }) => {
                assert_eq!(error_path, path);
                assert_eq!(operation, "open");
            }
            other => unreachable!("Expected FileSystem error, got {other:?}"),
        }
    }

    // Tests non-TIFF bytes fail in the decoder
    // Verified by returning an empty grid for unreadable data
    #[test]
    fn test_decode_garbage() {
        let result = decode_grid(Cursor::new(b"definitely not a tiff".to_vec()));

        assert!(matches!(result, Err(AnalysisError::TiffDecode { .. })));
    }

    // Tests 1-bit rows are unpacked most significant bit first
    // Verified by reading bits least significant first
    #[test]
    fn test_unpack_one_bit() {
        let values = unpack_gray(&[0b1010_0000, 0b0100_0000], 2, 3, 1);

        assert_eq!(values, vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
    }

    // Tests 4-bit rows are unpacked as nibbles with byte padding
    // Verified by ignoring row padding
    #[test]
    fn test_unpack_four_bit() {
        let values = unpack_gray(&[0xAB, 0xC0, 0x12, 0x30], 2, 3, 4);

        assert_eq!(values, vec![10.0, 11.0, 12.0, 1.0, 2.0, 3.0]);
    }
}
