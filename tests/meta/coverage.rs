//! Enforces the one-to-one mirror between `src/` files and `tests/unit/` files

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Module organization and entry points carry no logic of their own
    fn is_organizational(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    // Collects `.rs` files and directories below `base`, relative to it
    fn relative_paths(base: &Path) -> io::Result<BTreeSet<String>> {
        let mut paths = BTreeSet::new();
        let mut pending = vec![base.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                let relative = path
                    .strip_prefix(base)
                    .map_err(io::Error::other)?
                    .to_string_lossy()
                    .to_string();

                if path.is_dir() {
                    paths.insert(relative);
                    pending.push(path);
                } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                    paths.insert(relative);
                }
            }
        }

        Ok(paths)
    }

    fn format_missing(missing: &[&String], from: &str, to: &str) -> String {
        missing
            .iter()
            .map(|path| format!("  - {from}/{path} -> {to}/{path}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src_paths = relative_paths(Path::new(SRC_DIR)).unwrap();
        let unit_paths = relative_paths(Path::new(UNIT_DIR)).unwrap_or_default();

        let missing: Vec<_> = src_paths
            .iter()
            .filter(|path| !is_organizational(path) && !unit_paths.contains(*path))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit test counterparts:\n{}",
            format_missing(&missing, SRC_DIR, UNIT_DIR)
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src_paths = relative_paths(Path::new(SRC_DIR)).unwrap();
        let unit_paths = relative_paths(Path::new(UNIT_DIR)).unwrap_or_default();

        let orphaned: Vec<_> = unit_paths
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src_paths.contains(*path))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without source counterparts:\n{}",
            format_missing(&orphaned, UNIT_DIR, SRC_DIR)
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let mut without_tests = Vec::new();

        for relative in relative_paths(tests_dir).unwrap() {
            let path = tests_dir.join(&relative);
            if path.is_dir() || relative.ends_with("mod.rs") {
                continue;
            }
            let content = fs::read_to_string(&path).unwrap();
            if !content.contains("#[test]") {
                without_tests.push(format!("  - {}", path.display()));
            }
        }

        assert!(
            without_tests.is_empty(),
            "Test files without any #[test] function:\n{}",
            without_tests.join("\n")
        );
    }
}
