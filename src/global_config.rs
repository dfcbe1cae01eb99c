use crate::utils::log::{log, LogLevel};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// C++ standards accepted by `std` and `config default_standard`
pub static VALID_STANDARDS: [u32; 4] = [11, 14, 17, 20];

enum ConfigParam {
    DefaultStandard(u32),
    CmakeCommand(String),
    MakeCommand(String),
}

fn set_config_param(param: ConfigParam, config_file: &PathBuf) {
    let mut global_conf = GlobalConfig::from_file(config_file);
    match param {
        ConfigParam::DefaultStandard(value) => {
            global_conf.default_standard = value;
        }
        ConfigParam::CmakeCommand(value) => {
            global_conf.cmake_command = value;
        }
        ConfigParam::MakeCommand(value) => {
            global_conf.make_command = value;
        }
    }

    if let Some(parent) = config_file.parent() {
        if let Err(why) = std::fs::create_dir_all(parent) {
            log(
                LogLevel::Error,
                &format!("Could not create config directory: {}", why),
            );
            return;
        }
    }
    let contents = toml::to_string(&global_conf).unwrap();
    if let Err(why) = std::fs::write(config_file, contents) {
        log(
            LogLevel::Error,
            &format!("Could not write config file: {}", why),
        );
    }
}

#[derive(Serialize, Deserialize)]
pub struct GlobalConfig {
    default_standard: u32,
    cmake_command: String,
    make_command: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            default_standard: 14,
            cmake_command: "cmake".to_string(),
            make_command: "make".to_string(),
        }
    }
}

impl GlobalConfig {
    /// Sets a single global default after validating it
    /// # Arguments
    /// * `parameter` - One of `default_standard`, `cmake_command`, `make_command`
    /// * `value` - The new value for the parameter
    pub fn set_defaults(parameter: &str, value: &str) {
        let config_file = match GlobalConfig::config_file() {
            Some(path) => path,
            None => {
                log(LogLevel::Error, "Could not resolve the user config directory");
                return;
            }
        };
        match parameter {
            "default_standard" => match value.parse::<u32>() {
                Ok(standard) if VALID_STANDARDS.contains(&standard) => {
                    set_config_param(ConfigParam::DefaultStandard(standard), &config_file);
                    log(LogLevel::Log, &format!("Set default_standard to {}", standard));
                }
                _ => {
                    log(
                        LogLevel::Error,
                        "Invalid standard. Valid values are: 11, 14, 17, 20",
                    );
                }
            },
            "cmake_command" => {
                if value.is_empty() {
                    log(LogLevel::Error, "cmake_command must not be empty");
                } else {
                    set_config_param(ConfigParam::CmakeCommand(value.to_string()), &config_file);
                    log(LogLevel::Log, &format!("Set cmake_command to {}", value));
                }
            }
            "make_command" => {
                if value.is_empty() {
                    log(LogLevel::Error, "make_command must not be empty");
                } else {
                    set_config_param(ConfigParam::MakeCommand(value.to_string()), &config_file);
                    log(LogLevel::Log, &format!("Set make_command to {}", value));
                }
            }
            _ => {
                log(
                    LogLevel::Error,
                    "Invalid parameter. See `qs config --help` for more info",
                );
            }
        }
    }

    /// Loads the global config, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load() -> Self {
        match GlobalConfig::config_file() {
            Some(path) if path.exists() => GlobalConfig::from_file(&path),
            _ => GlobalConfig::default(),
        }
    }

    fn config_file() -> Option<PathBuf> {
        ProjectDirs::from("", "", "qs").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn from_file(path: &PathBuf) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return GlobalConfig::default(),
        };
        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(why) => {
                log(
                    LogLevel::Warn,
                    &format!("Could not parse global config, using defaults: {}", why),
                );
                GlobalConfig::default()
            }
        }
    }

    pub fn get_default_standard(&self) -> u32 {
        self.default_standard
    }

    pub fn get_cmake_command(&self) -> String {
        self.cmake_command.clone()
    }

    pub fn get_make_command(&self) -> String {
        self.make_command.clone()
    }
}
