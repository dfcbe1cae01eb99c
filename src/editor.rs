use once_cell::sync::Lazy;
use regex::Regex;

static CXX_STANDARD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"set\(CMAKE_CXX_STANDARD \d+\)").unwrap());
static EXECUTABLE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"add_executable\(([^):\n\s]+)").unwrap());
static LIBRARY_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"add_library\(([^):\n\s]+)").unwrap());

#[derive(Debug, PartialEq)]
/// Outcome of writing a target declaration into a document
pub enum TargetOutcome {
    /// An existing declaration block was found and merged into
    Merged,
    /// No declaration block was found, a new one was appended
    Appended,
}

#[derive(Debug, PartialEq)]
/// Outcome of upserting a singleton setting statement
pub enum SettingOutcome {
    /// An existing statement was replaced in place
    Replaced,
    /// No statement was found, a new block was appended
    Appended,
}

/// Merges source paths into the declaration block for a target, or appends a
/// new block when none exists.
///
/// Detection requires the name to be followed by whitespace, so a target
/// named `app` never matches a block named `application`. Only the canonical
/// shape emitted by this tool (name and opening parenthesis on their own
/// line) is merged into; a hand-edited single-line declaration is not
/// recognized and a fresh block is appended instead. When several blocks
/// carry the same name, only the first one is edited.
/// # Arguments
/// * `document` - The full CMakeLists text
/// * `name` - The target name
/// * `sources` - Source paths, already de-duplicated and separator-normalized
pub fn upsert_target(document: &str, name: &str, sources: &[String]) -> (String, TargetOutcome) {
    let probe = Regex::new(&format!(r"add_executable\({}\s", regex::escape(name))).unwrap();
    if probe.is_match(document) {
        let block = Regex::new(&format!(
            r"(add_executable\({}\n)([^)]+)(\))",
            regex::escape(name)
        ))
        .unwrap();
        if let Some(caps) = block.captures(document) {
            let mut entries: Vec<String> = caps[2]
                .lines()
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect();
            for source in sources {
                if !entries.iter().any(|existing| existing == source) {
                    entries.push(source.clone());
                }
            }
            let span = format!("    {}", entries.join("\n    "));
            let updated = block.replace(document, |caps: &regex::Captures| {
                format!("{}{}{}", &caps[1], span, &caps[3])
            });
            return (updated.into_owned(), TargetOutcome::Merged);
        }
    }

    let mut updated = String::from(document);
    updated.push_str("\nadd_executable(");
    updated.push_str(name);
    updated.push_str("\n    ");
    updated.push_str(&sources.join("\n    "));
    updated.push_str("\n)\n");
    (updated, TargetOutcome::Appended)
}

/// Replaces the C++ standard statement in place, or appends a standard block
/// when the document carries none.
pub fn upsert_cxx_standard(document: &str, standard: u32) -> (String, SettingOutcome) {
    let statement = format!("set(CMAKE_CXX_STANDARD {})", standard);
    if CXX_STANDARD_RE.is_match(document) {
        let updated = CXX_STANDARD_RE.replace(document, statement.as_str());
        (updated.into_owned(), SettingOutcome::Replaced)
    } else {
        let mut updated = String::from(document);
        updated.push_str("\n# C++ Standard\n");
        updated.push_str(&statement);
        updated.push_str("\nset(CMAKE_CXX_STANDARD_REQUIRED ON)\n");
        (updated, SettingOutcome::Appended)
    }
}

/// Returns true if the standard configuration bundle is already present.
/// Any one marker counts as the whole bundle being applied.
pub fn has_standard_config(document: &str) -> bool {
    document.contains("CMAKE_RUNTIME_OUTPUT_DIRECTORY")
        || document.contains("CMAKE_ARCHIVE_OUTPUT_DIRECTORY")
}

/// Appends the standard configuration bundle: output directories, include
/// path, testing enablement and an install rule for the declared executables.
pub fn append_standard_config(document: &str) -> String {
    let targets = executable_targets(document);

    let mut updated = String::from(document);
    updated.push_str("\n\n# Output directories\n");
    updated.push_str("set(CMAKE_RUNTIME_OUTPUT_DIRECTORY ${CMAKE_BINARY_DIR}/bin)\n");
    updated.push_str("set(CMAKE_ARCHIVE_OUTPUT_DIRECTORY ${CMAKE_BINARY_DIR}/lib)\n");
    updated.push_str("set(CMAKE_LIBRARY_OUTPUT_DIRECTORY ${CMAKE_BINARY_DIR}/lib)\n");
    updated.push_str("\n# Include directories\n");
    updated.push_str("include_directories(${CMAKE_CURRENT_SOURCE_DIR}/include)\n");
    updated.push_str("\n# Enable testing\n");
    updated.push_str("enable_testing()\n");
    updated.push_str("\n# Add install target\n");
    if targets.is_empty() {
        updated.push_str("# No targets found to install\n");
    } else {
        updated.push_str(&format!(
            "install(TARGETS {} DESTINATION bin)\n",
            targets.join(" ")
        ));
    }
    updated
}

/// Appends a commented subdirectory reference unless one is already present.
/// Returns None when the document already references the child.
pub fn ensure_subdirectory(document: &str, name: &str) -> Option<String> {
    let statement = format!("add_subdirectory({})", name);
    if document.contains(&statement) {
        return None;
    }
    let mut updated = String::from(document);
    updated.push_str(&format!("\n# Sub-project: {}\n{}\n", name, statement));
    Some(updated)
}

/// Appends a link statement between two targets unless one is already
/// present. Returns None when the document already links them.
pub fn ensure_link(document: &str, target: &str, library: &str) -> Option<String> {
    let statement = format!("target_link_libraries({} {})", target, library);
    if document.contains(&statement) {
        return None;
    }
    let mut updated = String::from(document);
    updated.push_str(&format!("\n{}\n", statement));
    Some(updated)
}

/// Returns the names of all declared executable targets, in document order
pub fn executable_targets(document: &str) -> Vec<String> {
    EXECUTABLE_NAME_RE
        .captures_iter(document)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Returns the names of all declared library targets, in document order
pub fn library_targets(document: &str) -> Vec<String> {
    LIBRARY_NAME_RE
        .captures_iter(document)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn appends_new_target_block() {
        let doc = "project(demo)\n";
        let (updated, outcome) = upsert_target(doc, "app", &strings(&["src/main.cpp"]));
        assert_eq!(outcome, TargetOutcome::Appended);
        assert_eq!(
            updated,
            "project(demo)\n\nadd_executable(app\n    src/main.cpp\n)\n"
        );
    }

    #[test]
    fn merges_into_existing_block_preserving_order() {
        let doc = "project(demo)\n\nadd_executable(app\n    main.cpp\n)\n";
        let (updated, outcome) =
            upsert_target(doc, "app", &strings(&["main.cpp", "utils.cpp"]));
        assert_eq!(outcome, TargetOutcome::Merged);
        assert!(updated.contains("add_executable(app\n    main.cpp\n    utils.cpp)"));
        assert_eq!(updated.matches("main.cpp").count(), 1);
    }

    #[test]
    fn merge_is_stable_once_normalized() {
        let doc = "add_executable(app\n    main.cpp\n)\n";
        let (once, _) = upsert_target(doc, "app", &strings(&["main.cpp"]));
        let (twice, _) = upsert_target(&once, "app", &strings(&["main.cpp"]));
        assert_eq!(once, twice);
    }

    #[test]
    fn target_names_match_on_word_boundaries() {
        let doc = "add_executable(application\n    other.cpp\n)\n";
        let (updated, outcome) = upsert_target(doc, "app", &strings(&["main.cpp"]));
        assert_eq!(outcome, TargetOutcome::Appended);
        assert!(updated.contains("add_executable(application\n    other.cpp\n)"));
        assert!(updated.contains("add_executable(app\n    main.cpp\n)"));
    }

    #[test]
    fn only_first_duplicate_block_is_merged() {
        let doc = "add_executable(app\n    a.cpp\n)\n\nadd_executable(app\n    b.cpp\n)\n";
        let (updated, outcome) = upsert_target(doc, "app", &strings(&["c.cpp"]));
        assert_eq!(outcome, TargetOutcome::Merged);
        assert!(updated.contains("add_executable(app\n    a.cpp\n    c.cpp)"));
        assert!(updated.contains("add_executable(app\n    b.cpp\n)"));
    }

    #[test]
    fn single_line_declarations_are_not_recognized() {
        // A hand-edited block with the sources on the declaration line is
        // invisible to the merge pattern; a fresh block gets appended.
        let doc = "add_executable(app main.cpp)\n";
        let (updated, outcome) = upsert_target(doc, "app", &strings(&["utils.cpp"]));
        assert_eq!(outcome, TargetOutcome::Appended);
        assert!(updated.contains("add_executable(app main.cpp)"));
        assert!(updated.contains("add_executable(app\n    utils.cpp\n)"));
    }

    #[test]
    fn replaces_cxx_standard_in_place() {
        let doc = "set(CMAKE_CXX_STANDARD 14)\nset(CMAKE_CXX_STANDARD_REQUIRED ON)\n";
        let (updated, outcome) = upsert_cxx_standard(doc, 17);
        assert_eq!(outcome, SettingOutcome::Replaced);
        assert_eq!(
            updated,
            "set(CMAKE_CXX_STANDARD 17)\nset(CMAKE_CXX_STANDARD_REQUIRED ON)\n"
        );
    }

    #[test]
    fn appends_cxx_standard_block_when_absent() {
        let doc = "project(demo)\n";
        let (updated, outcome) = upsert_cxx_standard(doc, 20);
        assert_eq!(outcome, SettingOutcome::Appended);
        assert!(updated.contains("# C++ Standard\nset(CMAKE_CXX_STANDARD 20)\n"));
        assert!(updated.contains("set(CMAKE_CXX_STANDARD_REQUIRED ON)\n"));
        assert_eq!(updated.matches("CMAKE_CXX_STANDARD ").count(), 1);
    }

    #[test]
    fn standard_config_markers_gate_the_bundle() {
        assert!(!has_standard_config("project(demo)\n"));
        assert!(has_standard_config(
            "set(CMAKE_RUNTIME_OUTPUT_DIRECTORY ${CMAKE_BINARY_DIR}/bin)\n"
        ));
        assert!(has_standard_config(
            "set(CMAKE_ARCHIVE_OUTPUT_DIRECTORY ${CMAKE_BINARY_DIR}/lib)\n"
        ));
    }

    #[test]
    fn standard_bundle_installs_declared_targets() {
        let doc = "add_executable(app\n    main.cpp\n)\n";
        let updated = append_standard_config(doc);
        assert!(updated.contains("install(TARGETS app DESTINATION bin)"));
        assert!(updated.contains("enable_testing()"));
        assert!(has_standard_config(&updated));
    }

    #[test]
    fn standard_bundle_without_targets_keeps_a_placeholder() {
        let updated = append_standard_config("project(demo)\n");
        assert!(updated.contains("# No targets found to install"));
        assert!(!updated.contains("install(TARGETS"));
    }

    #[test]
    fn subdirectory_reference_is_idempotent() {
        let doc = "project(demo)\n";
        let updated = ensure_subdirectory(doc, "engine").unwrap();
        assert!(updated.contains("# Sub-project: engine\nadd_subdirectory(engine)\n"));
        assert!(ensure_subdirectory(&updated, "engine").is_none());
    }

    #[test]
    fn link_statement_is_idempotent() {
        let doc = "add_executable(app\n    main.cpp\n)\n";
        let updated = ensure_link(doc, "app", "engine").unwrap();
        assert!(updated.contains("target_link_libraries(app engine)\n"));
        assert!(ensure_link(&updated, "app", "engine").is_none());
    }

    #[test]
    fn lists_targets_in_document_order() {
        let doc = "add_executable(app\n    main.cpp\n)\nadd_library(engine\n    engine.cpp\n)\nadd_executable(tool\n    tool.cpp\n)\n";
        assert_eq!(executable_targets(doc), strings(&["app", "tool"]));
        assert_eq!(library_targets(doc), strings(&["engine"]));
    }
}
