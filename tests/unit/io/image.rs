//! Tests for PNG label map export

#[cfg(test)]
mod tests {
    use multiplicity::analysis::regions::label_grid;
    use multiplicity::io::image::{export_label_map, label_color, label_map_path};
    use ndarray::array;
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    // Tests background is black and neighbouring labels differ
    // Verified by using a constant colour for every label
    #[test]
    fn test_label_colors_distinct() {
        assert_eq!(label_color(0).0, [0, 0, 0]);

        let colors: HashSet<[u8; 3]> = (1..=12).map(|label| label_color(label).0).collect();
        assert_eq!(colors.len(), 12);
        assert!(!colors.contains(&[0, 0, 0]));
    }

    // Tests label map names derive from the input stem
    // Verified by keeping the input extension
    #[test]
    fn test_label_map_path() {
        let path = label_map_path(Path::new("out"), Path::new("/data/run/frame_01.tiff"));

        assert_eq!(path, PathBuf::from("out/frame_01_labels.png"));
    }

    // Tests export creates the directory and one pixel per cell
    // Verified by transposing the label image
    #[test]
    fn test_export_label_map() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("nested").join("map.png");
        let grid = array![[1u8, 0, 0], [0, 0, 1]];
        let regions = label_grid(&grid.view(), &1);

        export_label_map(&regions, &output_path).unwrap();

        let img = image::open(&output_path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0), &label_color(1));
        assert_eq!(img.get_pixel(1, 0), &label_color(0));
        assert_eq!(img.get_pixel(2, 1), &label_color(2));
    }
}
