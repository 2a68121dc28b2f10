#![warn(unused_extern_crates)]

pub mod runtime;
pub mod syscall;
pub mod utils;

pub use runtime::{fibonacci, ExecutionError, Runtime};
pub use syscall::ExitStatus;
