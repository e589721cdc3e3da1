//! Checks that the unit test tree mirrors the source tree

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Every `.rs` file below `dir`, sorted
    fn rust_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                files.extend(rust_files(&path)?);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    // Crate roots and module organization files carry no behavior of their own
    fn is_module_root(path: &Path) -> bool {
        matches!(
            path.file_name().and_then(|name| name.to_str()),
            Some("main.rs" | "lib.rs" | "mod.rs")
        )
    }

    fn modules_below(dir: &str) -> BTreeSet<PathBuf> {
        let base = Path::new(dir);
        assert!(base.is_dir(), "Missing directory {dir}");
        rust_files(base)
            .unwrap_or_default()
            .iter()
            .filter(|path| !is_module_root(path))
            .filter_map(|path| path.strip_prefix(base).ok().map(Path::to_path_buf))
            .collect()
    }

    fn report(header: &str, paths: &[&PathBuf]) -> String {
        let lines: Vec<String> = paths
            .iter()
            .map(|path| format!("  - {}", path.display()))
            .collect();
        format!("{header}:\n{}", lines.join("\n"))
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let tests = modules_below(UNIT_DIR);
        let missing: Vec<_> = modules_below(SRC_DIR)
            .iter()
            .filter(|path| !tests.contains(*path))
            .cloned()
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report(
                "Source files without a tests/unit counterpart",
                &missing.iter().collect::<Vec<_>>()
            )
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let sources = modules_below(SRC_DIR);
        let orphaned: Vec<_> = modules_below(UNIT_DIR)
            .iter()
            .filter(|path| !sources.contains(*path))
            .cloned()
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report(
                "Unit test files without a src counterpart",
                &orphaned.iter().collect::<Vec<_>>()
            )
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let files = rust_files(Path::new("tests")).unwrap_or_default();
        let empty: Vec<_> = files
            .iter()
            .filter(|path| !is_module_root(path))
            .filter(|path| {
                !fs::read_to_string(path).is_ok_and(|content| content.contains("#[test]"))
            })
            .collect();

        assert!(
            empty.is_empty(),
            "{}",
            report("Test files without any #[test] function", &empty)
        );
    }

    // File that must declare a module living in `dir`
    fn declaring_file(root: &Path, dir: &Path) -> PathBuf {
        if dir == root {
            root.join("main.rs")
        } else {
            dir.join("mod.rs")
        }
    }

    // Directory holding the declaration and the module name it must use
    fn declaration_site(path: &Path) -> Option<(&Path, &str)> {
        let parent = path.parent()?;
        match path.file_stem()?.to_str()? {
            "mod" => Some((parent.parent()?, parent.file_name()?.to_str()?)),
            stem => Some((parent, stem)),
        }
    }

    #[test]
    fn test_unit_files_are_declared() {
        let root = Path::new(UNIT_DIR);
        let files = rust_files(root).unwrap_or_default();
        let undeclared: Vec<_> = files
            .iter()
            .filter(|path| path.as_path() != root.join("main.rs"))
            .filter(|path| {
                declaration_site(path).is_none_or(|(dir, name)| {
                    !fs::read_to_string(declaring_file(root, dir))
                        .is_ok_and(|content| content.contains(&format!("mod {name};")))
                })
            })
            .collect();

        assert!(
            undeclared.is_empty(),
            "{}",
            report("Unit test files that are never compiled", &undeclared)
        );
    }
}
