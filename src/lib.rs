//! A quick setup tool for scaffolding and editing CMake C and C++ projects.
//!
//! The tool generates a CMakeLists.txt for a new project and then edits it
//! incrementally: targets are merged into their existing declaration blocks
//! instead of being duplicated, settings are replaced in place, and
//! sub-project references are only ever added once.
//!
//! # Installation
//! To install this tool, you need to have rust installed on your system.
//! ```text
//! cargo install qs_cmake
//! ```
//!
//! # Examples
//! ```text
//! qs init                  # scaffold a project in the current directory
//! qs add tool src/*.cc     # add or extend an executable target
//! qs std 17                # upsert the C++ standard
//! qs build                 # cmake .. && make inside ./build
//! qs run                   # run the built executable
//! ```
//!
//! # Sample generated CMakeLists.txt
//! ```cmake
//! cmake_minimum_required(VERSION 3.10)
//! project(demo)
//!
//! set(CMAKE_CXX_STANDARD 14)
//! set(CMAKE_CXX_STANDARD_REQUIRED ON)
//!
//! # Compiler options
//! set(CMAKE_CXX_FLAGS "${CMAKE_CXX_FLAGS} -Wall -Wextra")
//!
//! # Output directories
//! set(CMAKE_RUNTIME_OUTPUT_DIRECTORY ${CMAKE_BINARY_DIR}/bin)
//! set(CMAKE_ARCHIVE_OUTPUT_DIRECTORY ${CMAKE_BINARY_DIR}/lib)
//! set(CMAKE_LIBRARY_OUTPUT_DIRECTORY ${CMAKE_BINARY_DIR}/lib)
//!
//! # Include directories
//! include_directories(${CMAKE_CURRENT_SOURCE_DIR}/include)
//!
//! # Enable testing
//! enable_testing()
//!
//! add_executable(demo
//!     src/main.cc
//! )
//! ```
//!
//! The log level can be set with the `QS_LOG_LEVEL` environment variable.
//! Valid values are: Debug, Info, Log, Warn, Error

/// Contains the command line definitions
pub mod cli;
/// Contains the pattern based CMakeLists editor
pub mod editor;
/// Handles global config
pub mod global_config;
/// Contains code that scaffolds projects and targets
pub mod project;
/// Contains code that invokes cmake, make and built executables
pub mod runner;
/// Contains logger and filesystem probes
pub mod utils;
