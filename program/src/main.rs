//! Computes the 10th Fibonacci number and reports it as the process exit status.

use anyhow::Result;
use fibonacci_core::syscall::{halt, ExitStatus};
use fibonacci_core::utils::setup_logger;
use fibonacci_core::Runtime;

fn run() -> Result<ExitStatus> {
  let mut runtime = Runtime::fixture();
  let value = runtime.execute()?;
  tracing::info!(value, "computed");
  Ok(ExitStatus::from_value(value))
}

fn main() {
  setup_logger();

  match run() {
    Ok(status) => halt(status),
    Err(err) => {
      tracing::error!("execution failed: {err:?}");
      halt(ExitStatus::from_value(1))
    }
  }
}
