use crate::editor;
use crate::global_config::GlobalConfig;
use crate::utils::fs::file_exists;
use crate::utils::log::{log, LogLevel};

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

static CMAKELISTS: &str = "CMakeLists.txt";
static BUILD_DIR: &str = "build";
static DOC_URL: &str = "https://cmake.org/cmake/help/latest/index.html";

/// Creates the build directory and runs cmake and make inside it
///
/// The tool names come from the global config. Both children inherit the
/// terminal streams and a launch failure or non-zero exit aborts the build.
pub fn build_project() {
    if !file_exists(CMAKELISTS) {
        log(
            LogLevel::Error,
            "CMakeLists.txt not found in the current directory.",
        );
        log(LogLevel::Error, "Run 'qs init' to create a new CMake project.");
        return;
    }
    if !Path::new(BUILD_DIR).exists() {
        log(LogLevel::Log, "Creating build directory...");
        if let Err(why) = fs::create_dir(BUILD_DIR) {
            log(
                LogLevel::Error,
                &format!("Could not create build directory: {}", why),
            );
            return;
        }
    }

    let config = GlobalConfig::load();
    log(LogLevel::Log, "Running CMake...");
    if !run_tool(&config.get_cmake_command(), &[".."]) {
        return;
    }
    log(LogLevel::Log, "Running make...");
    if !run_tool(&config.get_make_command(), &[]) {
        return;
    }
    log(LogLevel::Log, "Build completed successfully!");
}

//Runs a build tool inside the build directory with inherited stdio
fn run_tool(program: &str, args: &[&str]) -> bool {
    let status = Command::new(program)
        .args(args)
        .current_dir(BUILD_DIR)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();
    match status {
        Ok(status) if status.success() => true,
        Ok(status) => {
            log(LogLevel::Error, &format!("{} exited with {}", program, status));
            false
        }
        Err(why) => {
            log(LogLevel::Error, &format!("Could not run {}: {}", program, why));
            false
        }
    }
}

/// Runs a built executable target from the build directory
/// # Arguments
/// * `target_name` - The target to run, or None to auto-detect one
///
/// With no target given, a single built executable is run directly and
/// several are listed so the user can pick one.
pub fn run_project(target_name: Option<String>) {
    if !Path::new(BUILD_DIR).exists() {
        log(LogLevel::Error, "build directory not found.");
        log(LogLevel::Error, "Run 'qs build' to build the project first.");
        return;
    }
    let executables_path = executables_path();

    let target_name = match target_name {
        Some(target_name) => target_name,
        None => {
            let executables = find_executables(&executables_path);
            if executables.is_empty() {
                log(
                    LogLevel::Error,
                    "No executable targets found in build directory.",
                );
                log(
                    LogLevel::Error,
                    "Specify a target name or build the project first with 'qs build'.",
                );
                return;
            } else if executables.len() == 1 {
                log(
                    LogLevel::Log,
                    &format!("Running target: {}", executables[0]),
                );
                executables[0].clone()
            } else {
                log(LogLevel::Log, "Multiple targets found:");
                for (i, executable) in executables.iter().enumerate() {
                    log(LogLevel::Log, &format!("  {}. {}", i + 1, executable));
                }
                log(LogLevel::Log, "Please specify a target name: qs run <target>");
                return;
            }
        }
    };

    let target_path = executables_path.join(&target_name);
    if !target_path.is_file() {
        log(
            LogLevel::Error,
            &format!("Target '{}' not found in build directory.", target_name),
        );
        return;
    }

    log(LogLevel::Log, &format!("Running {}...", target_name));
    let status = Command::new(&target_path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();
    match status {
        Ok(status) if status.success() => {}
        Ok(status) => log(LogLevel::Error, &format!("Target exited with {}", status)),
        Err(why) => log(LogLevel::Error, &format!("Error running target: {}", why)),
    }
}

/// Lists the targets declared in CMakeLists.txt and the built executables
pub fn list_targets() {
    if !file_exists(CMAKELISTS) {
        log(
            LogLevel::Error,
            "CMakeLists.txt not found in the current directory.",
        );
        log(LogLevel::Error, "Run 'qs init' to create a new CMake project.");
        return;
    }
    let document = match fs::read_to_string(CMAKELISTS) {
        Ok(document) => document,
        Err(why) => {
            log(
                LogLevel::Error,
                &format!("Could not read CMakeLists.txt: {}", why),
            );
            return;
        }
    };

    let executables = editor::executable_targets(&document);
    let libraries = editor::library_targets(&document);
    if executables.is_empty() && libraries.is_empty() {
        log(LogLevel::Log, "No targets found in CMakeLists.txt.");
        return;
    }

    log(LogLevel::Log, "Project targets:");
    if !executables.is_empty() {
        log(LogLevel::Log, "Executables:");
        for (i, name) in executables.iter().enumerate() {
            log(LogLevel::Log, &format!("  {}. {}", i + 1, name));
        }
    }
    if !libraries.is_empty() {
        log(LogLevel::Log, "Libraries:");
        for (i, name) in libraries.iter().enumerate() {
            log(LogLevel::Log, &format!("  {}. {}", i + 1, name));
        }
    }

    if Path::new(BUILD_DIR).exists() {
        let built = find_executables(&executables_path());
        if !built.is_empty() {
            log(LogLevel::Log, "Built executables:");
            for (i, name) in built.iter().enumerate() {
                log(LogLevel::Log, &format!("  {}. {}", i + 1, name));
            }
        }
    }
}

/// Opens the CMake documentation in the default browser
pub fn open_documentation() {
    log(
        LogLevel::Log,
        &format!("Opening CMake documentation: {}", DOC_URL),
    );

    #[cfg(target_os = "macos")]
    let (program, args) = ("open", vec![DOC_URL]);
    #[cfg(target_os = "windows")]
    let (program, args) = ("cmd", vec!["/c", "start", DOC_URL]);
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let (program, args) = ("xdg-open", vec![DOC_URL]);

    match Command::new(program).args(&args).status() {
        Ok(status) if status.success() => {}
        Ok(status) => {
            log(
                LogLevel::Error,
                &format!("Error opening documentation: {}", status),
            );
            log(
                LogLevel::Log,
                &format!("Please open the following URL manually: {}", DOC_URL),
            );
        }
        Err(why) => {
            log(
                LogLevel::Error,
                &format!("Error opening documentation: {}", why),
            );
            log(
                LogLevel::Log,
                &format!("Please open the following URL manually: {}", DOC_URL),
            );
        }
    }
}

//Built executables land in build/bin under the standard layout, with the
//build directory itself as the fallback
fn executables_path() -> PathBuf {
    let bin_dir = Path::new(BUILD_DIR).join("bin");
    if bin_dir.is_dir() {
        bin_dir
    } else {
        PathBuf::from(BUILD_DIR)
    }
}

//Collects executable files in a directory, skipping dotfiles and
//subdirectories
fn find_executables(dir: &Path) -> Vec<String> {
    let mut executables = Vec::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return executables,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let name = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if name.starts_with('.') {
            continue;
        }
        if is_executable(&path) {
            executables.push(name);
        }
    }
    executables
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match fs::metadata(path) {
        Ok(metadata) => metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.extension().map_or(false, |extension| extension == "exe")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn executable_bit_gates_the_scan() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let runnable = dir.path().join("app");
        let plain = dir.path().join("notes.txt");
        let hidden = dir.path().join(".cache");
        fs::write(&runnable, b"").unwrap();
        fs::write(&plain, b"").unwrap();
        fs::write(&hidden, b"").unwrap();
        fs::set_permissions(&runnable, fs::Permissions::from_mode(0o755)).unwrap();
        fs::set_permissions(&hidden, fs::Permissions::from_mode(0o755)).unwrap();

        let found = find_executables(dir.path());
        assert_eq!(found, vec!["app".to_string()]);
    }
}
