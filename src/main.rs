use clap::{CommandFactory, Parser};
use qs_cmake::cli::{Cli, Commands, InitCommands};
use qs_cmake::global_config::{GlobalConfig, VALID_STANDARDS};
use qs_cmake::utils::log::{log, LogLevel};
use qs_cmake::{project, runner};

fn main() {
    let cli = Cli::parse();

    let command = match cli.command {
        Some(command) => command,
        None => {
            Cli::command().print_help().ok();
            return;
        }
    };

    match command {
        Commands::Init { command } => match command {
            Some(InitCommands::Sub { name }) => project::init_sub_project(&name),
            None => project::init_project(),
        },
        Commands::Add { target, files } => project::add_target(&target, &files),
        Commands::Std { standard } => {
            let standard = match standard {
                Some(standard) if VALID_STANDARDS.contains(&standard) => Some(standard),
                Some(_) => {
                    log(LogLevel::Warn, "Invalid C++ standard, using default");
                    None
                }
                None => None,
            };
            project::add_standard_config(standard);
        }
        Commands::Build => runner::build_project(),
        Commands::Run { target } => runner::run_project(target),
        Commands::List => runner::list_targets(),
        Commands::Doc => runner::open_documentation(),
        Commands::Config { parameter, value } => GlobalConfig::set_defaults(&parameter, &value),
        Commands::Version => println!("qs version {}", env!("CARGO_PKG_VERSION")),
    }
}
