mod run_all;
mod run_one;

pub use run_all::run_all_command;
pub use run_one::run_one_command;
