//! 命令定义和实现

pub mod capture;
pub mod concat;
pub mod config;
pub mod convert;
pub mod info;
pub mod set;
pub mod stats;
pub mod window;

pub use capture::CaptureCommand;
pub use concat::ConcatCommand;
pub use config::ConfigCommand;
pub use convert::ConvertCommand;
pub use info::InfoCommand;
pub use set::SetCommand;
pub use stats::StatsCommand;
pub use window::WindowCommand;
