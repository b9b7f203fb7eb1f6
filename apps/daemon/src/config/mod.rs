pub mod file;
pub mod supervisor;
pub mod watcher;

pub use file::ConfigFile;
pub use supervisor::{ConfigSupervisor, ServerDiff};
