/// Contains filesystem probes and path helpers
pub mod fs;
/// Contains the logger
pub mod log;
