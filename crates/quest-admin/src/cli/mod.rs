/*
[INPUT]:  Subcommand arguments from main
[OUTPUT]: Interactive manifest init and wizard-driven commands
[POS]:    CLI module root
[UPDATE]: When adding CLI submodules
*/

pub mod commands;
pub mod init;

pub use commands::ConsoleNotifier;
