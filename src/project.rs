use crate::editor::{self, SettingOutcome, TargetOutcome};
use crate::global_config::GlobalConfig;
use crate::utils::fs::{
    contains_glob_char, file_exists, find_source_files, is_dir, is_source_file,
    normalize_separators,
};
use crate::utils::log::{log, LogLevel};

use directories::BaseDirs;
use itertools::Itertools;
use std::env;
use std::fs;
use std::path::Path;

static CMAKELISTS: &str = "CMakeLists.txt";

//Extensions probed for `qs add <target>` with no file arguments
static TARGET_EXTENSIONS: [&str; 4] = ["cpp", "cc", "c", "cxx"];

/// Initialises a new CMake project in the current directory
///
/// Refuses to run in the user's home directory and refuses to overwrite an
/// existing CMakeLists.txt. On success the skeleton document is written, a
/// starter main.cc is generated and a first target named after the project
/// is added.
pub fn init_project() {
    let current_dir = match env::current_dir() {
        Ok(current_dir) => current_dir,
        Err(why) => {
            log(
                LogLevel::Error,
                &format!("Could not get the current directory: {}", why),
            );
            return;
        }
    };
    if let Some(base_dirs) = BaseDirs::new() {
        if current_dir == base_dirs.home_dir() {
            log(
                LogLevel::Error,
                "Cannot initialize a CMake project in your home directory.",
            );
            log(
                LogLevel::Error,
                "Please create a new directory for your project and run 'qs init' there.",
            );
            return;
        }
    }

    if file_exists(CMAKELISTS) {
        log(
            LogLevel::Error,
            "CMakeLists.txt already exists. Run 'qs add' to add targets.",
        );
        return;
    }

    let project_name = project_name();
    let standard = GlobalConfig::load().get_default_standard();
    let content = format!(
        r#"cmake_minimum_required(VERSION 3.10)
project({})

set(CMAKE_CXX_STANDARD {})
set(CMAKE_CXX_STANDARD_REQUIRED ON)

# Compiler options
set(CMAKE_CXX_FLAGS "${{CMAKE_CXX_FLAGS}} -Wall -Wextra")

# Output directories
set(CMAKE_RUNTIME_OUTPUT_DIRECTORY ${{CMAKE_BINARY_DIR}}/bin)
set(CMAKE_ARCHIVE_OUTPUT_DIRECTORY ${{CMAKE_BINARY_DIR}}/lib)
set(CMAKE_LIBRARY_OUTPUT_DIRECTORY ${{CMAKE_BINARY_DIR}}/lib)

# Include directories
include_directories(${{CMAKE_CURRENT_SOURCE_DIR}}/include)

# Enable testing
enable_testing()
"#,
        project_name, standard
    );

    if let Err(why) = fs::write(CMAKELISTS, content) {
        log(
            LogLevel::Error,
            &format!("Could not create CMakeLists.txt: {}", why),
        );
        return;
    }
    log(
        LogLevel::Log,
        &format!("Initialized CMake project '{}'", project_name),
    );

    write_starter_source();
    add_target(&project_name, &["src/main.cc".to_string()]);
}

//Returns the project name derived from the current directory's base name
fn project_name() -> String {
    match env::current_dir() {
        Ok(dir) => dir
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("project")
            .to_string(),
        Err(_) => "project".to_string(),
    }
}

fn write_starter_source() {
    let source = r#"
#include <iostream>

int main() {
    std::cout << "Hello, World!" << std::endl;
    return 0;
}
"#;
    if !Path::new("src").exists() {
        if let Err(why) = fs::create_dir("src") {
            log(
                LogLevel::Error,
                &format!("Could not create src directory: {}", why),
            );
            return;
        }
    }
    if let Err(why) = fs::write("src/main.cc", source) {
        log(LogLevel::Error, &format!("Could not create main.cc: {}", why));
        return;
    }
    log(LogLevel::Log, "Initialized project with main.cc");
}

/// Adds an executable target to CMakeLists.txt, merging into the existing
/// declaration block when the target is already present
/// # Arguments
/// * `target_name` - The target name
/// * `source_args` - Files, glob patterns or directories from the command line
///
/// With no source arguments the target name is tried as a directory and then
/// as a bare source file name with the common C/C++ extensions.
pub fn add_target(target_name: &str, source_args: &[String]) {
    let document = match fs::read_to_string(CMAKELISTS) {
        Ok(document) => document,
        Err(_) => {
            log(
                LogLevel::Error,
                "CMakeLists.txt not found. Run 'qs init' first.",
            );
            return;
        }
    };

    let mut expanded: Vec<String> = Vec::new();
    if source_args.is_empty() {
        if is_dir(target_name) {
            expanded = find_source_files(target_name);
            if expanded.is_empty() {
                log(
                    LogLevel::Error,
                    &format!("No source files found in directory '{}'", target_name),
                );
                return;
            }
        } else {
            let mut main_file = None;
            for extension in TARGET_EXTENSIONS {
                let candidate = format!("{}.{}", target_name, extension);
                if file_exists(&candidate) {
                    main_file = Some(candidate);
                    break;
                }
            }
            match main_file {
                Some(main_file) => expanded.push(main_file),
                None => {
                    log(
                        LogLevel::Error,
                        &format!(
                            "No source file found for target '{}' (tried .cpp, .cc, .c, .cxx extensions)",
                            target_name
                        ),
                    );
                    return;
                }
            }
        }
    } else {
        for pattern in source_args {
            if contains_glob_char(pattern) {
                let paths = match glob::glob(pattern) {
                    Ok(paths) => paths,
                    Err(why) => {
                        log(
                            LogLevel::Warn,
                            &format!("Invalid glob pattern '{}': {}", pattern, why),
                        );
                        continue;
                    }
                };
                let matches: Vec<String> = paths
                    .filter_map(Result::ok)
                    .filter_map(|path| path.to_str().map(str::to_string))
                    .collect();
                if matches.is_empty() {
                    log(
                        LogLevel::Warn,
                        &format!("No files match pattern '{}'", pattern),
                    );
                    continue;
                }
                for matched in matches {
                    if is_source_file(&matched) {
                        expanded.push(matched);
                    }
                }
            } else if file_exists(pattern) {
                expanded.push(pattern.clone());
            } else if is_dir(pattern) {
                expanded.append(&mut find_source_files(pattern));
            } else {
                log(LogLevel::Warn, &format!("File '{}' not found", pattern));
            }
        }
    }

    if expanded.is_empty() {
        log(LogLevel::Error, "No source files found for target");
        return;
    }

    let sources: Vec<String> = expanded
        .iter()
        .map(|path| normalize_separators(path))
        .unique()
        .collect();

    let (document, outcome) = editor::upsert_target(&document, target_name, &sources);
    if let Err(why) = fs::write(CMAKELISTS, document) {
        log(
            LogLevel::Error,
            &format!("Could not update CMakeLists.txt: {}", why),
        );
        return;
    }
    match outcome {
        TargetOutcome::Merged => log(
            LogLevel::Log,
            &format!(
                "Updated existing target '{}' with {} additional source files",
                target_name,
                sources.len()
            ),
        ),
        TargetOutcome::Appended => log(
            LogLevel::Log,
            &format!(
                "Added executable target '{}' with {} source files",
                target_name,
                sources.len()
            ),
        ),
    }
}

/// Adds the standard CMake configuration bundle and optionally upserts the
/// C++ standard
/// # Arguments
/// * `cxx_standard` - A validated C++ standard, or None to leave it untouched
///
/// The bundle is skipped in full when any of its marker statements is
/// already present; the C++ standard upsert runs regardless.
pub fn add_standard_config(cxx_standard: Option<u32>) {
    if !file_exists(CMAKELISTS) {
        log(
            LogLevel::Error,
            "CMakeLists.txt not found. Run 'qs init' first.",
        );
        return;
    }
    let mut document = match fs::read_to_string(CMAKELISTS) {
        Ok(document) => document,
        Err(why) => {
            log(
                LogLevel::Error,
                &format!("Could not read CMakeLists.txt: {}", why),
            );
            return;
        }
    };

    let bundle_present = editor::has_standard_config(&document);

    if let Some(standard) = cxx_standard {
        let (updated, outcome) = editor::upsert_cxx_standard(&document, standard);
        document = updated;
        match outcome {
            SettingOutcome::Replaced => log(
                LogLevel::Log,
                &format!("Updated C++ standard to C++{}", standard),
            ),
            SettingOutcome::Appended => log(
                LogLevel::Log,
                &format!("Set C++ standard to C++{}", standard),
            ),
        }
    }

    if !bundle_present {
        document = editor::append_standard_config(&document);
        log(LogLevel::Log, "Added standard CMake configuration");
    } else {
        log(LogLevel::Log, "Standard CMake configuration already present");
    }

    if let Err(why) = fs::write(CMAKELISTS, document) {
        log(
            LogLevel::Error,
            &format!("Could not update CMakeLists.txt: {}", why),
        );
    }
}

/// Initialises a library sub-project and wires it into the parent document
/// # Arguments
/// * `name` - The subdirectory name, also used as the library target name
///
/// Creates the subdirectory layout, a library CMakeLists.txt and a starter
/// class, then ensures the parent references the subdirectory and links its
/// first executable target against the new library. Both parent statements
/// are idempotent.
pub fn init_sub_project(name: &str) {
    if name.trim().is_empty() {
        log(LogLevel::Error, "'init sub' requires a subdirectory name");
        return;
    }
    let mut parent = match fs::read_to_string(CMAKELISTS) {
        Ok(parent) => parent,
        Err(_) => {
            log(
                LogLevel::Error,
                "CMakeLists.txt not found. Run 'qs init' first.",
            );
            return;
        }
    };

    let child_dir = Path::new(name);
    for dir in [
        child_dir.to_path_buf(),
        child_dir.join("include"),
        child_dir.join("src"),
    ] {
        if !dir.exists() {
            if let Err(why) = fs::create_dir_all(&dir) {
                log(
                    LogLevel::Error,
                    &format!("Could not create directory {}: {}", dir.display(), why),
                );
                return;
            }
        }
    }

    let child_cmakelists = child_dir.join(CMAKELISTS);
    if child_cmakelists.exists() {
        log(
            LogLevel::Warn,
            &format!(
                "{} already exists, leaving it untouched",
                child_cmakelists.display()
            ),
        );
    } else if let Err(why) = fs::write(&child_cmakelists, child_document(name)) {
        log(
            LogLevel::Error,
            &format!("Could not create {}: {}", child_cmakelists.display(), why),
        );
        return;
    }

    write_starter_library(name);

    match editor::ensure_subdirectory(&parent, name) {
        Some(updated) => {
            parent = updated;
            log(
                LogLevel::Log,
                &format!("Added subdirectory '{}' to CMakeLists.txt", name),
            );
        }
        None => log(
            LogLevel::Log,
            &format!("Subdirectory '{}' already referenced in CMakeLists.txt", name),
        ),
    }

    let targets = editor::executable_targets(&parent);
    match targets.first() {
        Some(primary) => match editor::ensure_link(&parent, primary, name) {
            Some(updated) => {
                parent = updated;
                log(LogLevel::Log, &format!("Linked '{}' to '{}'", name, primary));
            }
            None => log(
                LogLevel::Log,
                &format!("'{}' already linked to '{}'", name, primary),
            ),
        },
        None => log(
            LogLevel::Warn,
            &format!("No executable target found to link '{}' against", name),
        ),
    }

    if let Err(why) = fs::write(CMAKELISTS, parent) {
        log(
            LogLevel::Error,
            &format!("Could not update CMakeLists.txt: {}", why),
        );
        return;
    }
    log(LogLevel::Log, &format!("Initialized sub-project '{}'", name));
}

//Library document for a sub-project: glob based source and header
//collection, public include path export and install rules
fn child_document(name: &str) -> String {
    let upper = guard_name(name);
    format!(
        r#"cmake_minimum_required(VERSION 3.10)
project({name})

# Collect sources and public headers
file(GLOB {upper}_SOURCES ${{CMAKE_CURRENT_SOURCE_DIR}}/src/*.cc ${{CMAKE_CURRENT_SOURCE_DIR}}/src/*.cpp ${{CMAKE_CURRENT_SOURCE_DIR}}/src/*.c)
file(GLOB {upper}_HEADERS ${{CMAKE_CURRENT_SOURCE_DIR}}/include/*.h ${{CMAKE_CURRENT_SOURCE_DIR}}/include/*.hpp)

add_library({name} STATIC ${{{upper}_SOURCES}})
target_include_directories({name} PUBLIC ${{CMAKE_CURRENT_SOURCE_DIR}}/include)

# Install rules
install(TARGETS {name} DESTINATION lib)
install(FILES ${{{upper}_HEADERS}} DESTINATION include)
"#
    )
}

fn write_starter_library(name: &str) {
    let class = class_name(name);
    let guard = format!("{}_H", guard_name(name));

    let header = format!(
        r#"#ifndef {guard}
#define {guard}

class {class} {{
public:
    void greet();
}};

#endif
"#
    );
    let source = format!(
        r#"#include "{name}.h"

#include <iostream>

void {class}::greet() {{
    std::cout << "Hello from sub-project {name}!" << std::endl;
}}
"#
    );

    let header_path = Path::new(name).join("include").join(format!("{}.h", name));
    if !header_path.exists() {
        if let Err(why) = fs::write(&header_path, header) {
            log(
                LogLevel::Error,
                &format!("Could not create {}: {}", header_path.display(), why),
            );
            return;
        }
    }
    let source_path = Path::new(name).join("src").join(format!("{}.cc", name));
    if !source_path.exists() {
        if let Err(why) = fs::write(&source_path, source) {
            log(
                LogLevel::Error,
                &format!("Could not create {}: {}", source_path.display(), why),
            );
        }
    }
}

//Upper cased identifier safe for include guards and CMake variables
fn guard_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

//Example class name for the starter header, first letter upper cased
fn class_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let mut chars = sanitized.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
