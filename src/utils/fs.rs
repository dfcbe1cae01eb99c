use std::path::Path;

/// File extensions recognized as C/C++ sources or headers
pub static SOURCE_EXTENSIONS: [&str; 7] = ["cpp", "c", "cc", "cxx", "h", "hpp", "hxx"];

/// Returns true if the path exists and is a regular file
pub fn file_exists(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Returns true if the path exists and is a directory
pub fn is_dir(path: &str) -> bool {
    Path::new(path).is_dir()
}

/// Returns true if the file name carries a recognized C/C++ source or header extension
pub fn is_source_file(path: &str) -> bool {
    match Path::new(path).extension() {
        Some(ext) => match ext.to_str() {
            Some(ext) => SOURCE_EXTENSIONS.contains(&ext),
            None => false,
        },
        None => false,
    }
}

/// Returns true if the pattern contains a glob metacharacter
pub fn contains_glob_char(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Normalizes path separators to forward slashes
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Collects the recognized source files directly inside a directory
/// # Arguments
/// * `dir_path` - The directory to scan, one level only
pub fn find_source_files(dir_path: &str) -> Vec<String> {
    let mut source_files = Vec::new();
    let entries = match std::fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(_) => return source_files,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let path = match path.to_str() {
            Some(path) => normalize_separators(path),
            None => continue,
        };
        if is_source_file(&path) {
            source_files.push(path);
        }
    }
    source_files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn recognizes_source_extensions() {
        assert!(is_source_file("main.cpp"));
        assert!(is_source_file("src/lib.cc"));
        assert!(is_source_file("api.h"));
        assert!(!is_source_file("notes.txt"));
        assert!(!is_source_file("Makefile"));
    }

    #[test]
    fn detects_glob_metacharacters() {
        assert!(contains_glob_char("src/*.cpp"));
        assert!(contains_glob_char("file?.cc"));
        assert!(contains_glob_char("[ab].c"));
        assert!(!contains_glob_char("src/main.cpp"));
    }

    #[test]
    fn normalizes_backslashes() {
        assert_eq!(normalize_separators("src\\main.cpp"), "src/main.cpp");
        assert_eq!(normalize_separators("src/main.cpp"), "src/main.cpp");
    }

    #[test]
    fn finds_sources_one_level_deep() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.cpp")).unwrap();
        File::create(dir.path().join("b.txt")).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("c.cpp")).unwrap();

        let mut found = find_source_files(dir.path().to_str().unwrap());
        found.sort();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("a.cpp"));
    }
}
