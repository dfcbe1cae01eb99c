use clap::{Parser, Subcommand};

/// qs - Quick Setup for CMake projects
#[derive(Parser, Debug)]
#[command(name = "qs")]
#[command(version, about = "Quick setup for CMake projects", long_about = None)]
#[command(
    after_help = "The log level can be set with the QS_LOG_LEVEL environment variable.\nValid values are: Debug, Info, Log, Warn, Error"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new CMake project in the current directory
    Init {
        #[command(subcommand)]
        command: Option<InitCommands>,
    },

    /// Add an executable target, merging into an existing declaration
    Add {
        /// The target name
        target: String,
        /// Source files, glob patterns like *.cpp, or directories
        files: Vec<String>,
    },

    /// Add standard CMake configuration with an optional C++ standard (11/14/17/20)
    Std {
        /// The C++ standard to set
        standard: Option<u32>,
    },

    /// Create the build directory and run cmake and make
    Build,

    /// Run a built executable target
    Run {
        /// The target to run, defaults to the only built executable
        target: Option<String>,
    },

    /// List all targets declared in the project
    List,

    /// Open the CMake documentation in the default browser
    Doc,

    /// Set a global default (default_standard, cmake_command, make_command)
    Config {
        /// The parameter to set
        parameter: String,
        /// The new value
        value: String,
    },

    /// Show version information
    Version,
}

/// Subcommands of `qs init`
#[derive(Subcommand, Debug)]
pub enum InitCommands {
    /// Create a subdirectory with its own CMakeLists.txt for a sub-project
    Sub {
        /// The sub-project name
        name: String,
    },
}
