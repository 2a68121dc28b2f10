use std::fmt;

/// The status a process reports to its parent when it terminates.
///
/// The host channel only carries the low 8 bits, so any wider value is truncated on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitStatus(u8);

impl ExitStatus {
  pub const fn from_value(value: u32) -> Self {
    Self((value & 0xff) as u8)
  }

  pub const fn code(&self) -> u8 {
    self.0
  }
}

impl From<ExitStatus> for i32 {
  fn from(status: ExitStatus) -> Self {
    status.0 as i32
  }
}

impl fmt::Display for ExitStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Halts the process.
pub fn halt(status: ExitStatus) -> ! {
  tracing::info!("Halt with exit code {}", status);
  std::process::exit(status.into())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn small_values_pass_through() {
    assert_eq!(ExitStatus::from_value(0).code(), 0);
    assert_eq!(ExitStatus::from_value(55).code(), 55);
    assert_eq!(ExitStatus::from_value(255).code(), 255);
  }

  #[test]
  fn wide_values_keep_the_low_byte() {
    // F(14) = 377 = 0x179
    assert_eq!(ExitStatus::from_value(377).code(), 0x79);
    assert_eq!(ExitStatus::from_value(256).code(), 0);
    assert_eq!(ExitStatus::from_value(u32::MAX).code(), 0xff);
  }

  #[test]
  fn converts_to_process_code() {
    assert_eq!(i32::from(ExitStatus::from_value(55)), 55);
    assert_eq!(ExitStatus::from_value(55).to_string(), "55");
  }
}
