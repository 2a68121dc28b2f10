/// The Fibonacci term computed when nothing else is configured.
pub const DEFAULT_TARGET_INDEX: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FibonacciOpts {
  target_index: u32,
  max_steps: Option<u64>,
  record_trace: bool,
}

impl FibonacciOpts {
  pub fn new() -> Self {
    Self::default()
  }

  // Method to apply options
  pub fn with_options(mut self, opts: impl IntoIterator<Item = impl FnOnce(&mut Self)>) -> Self {
    for opt in opts {
      opt(&mut self);
    }
    self
  }

  pub fn target_index(&self) -> u32 {
    self.target_index
  }

  pub fn max_steps(&self) -> Option<u64> {
    self.max_steps
  }

  pub fn record_trace(&self) -> bool {
    self.record_trace
  }
}

impl Default for FibonacciOpts {
  fn default() -> Self {
    Self {
      target_index: DEFAULT_TARGET_INDEX,
      max_steps: None,
      record_trace: false,
    }
  }
}

// Functional option for the index of the term to compute
pub fn with_target_index(value: u32) -> impl FnOnce(&mut FibonacciOpts) {
  move |opts: &mut FibonacciOpts| {
    opts.target_index = value;
  }
}

// Functional option for bounding the number of loop iterations
pub fn with_max_steps(value: u64) -> impl FnOnce(&mut FibonacciOpts) {
  move |opts: &mut FibonacciOpts| {
    opts.max_steps = Some(value);
  }
}

// Functional option for keeping a per-iteration record
pub fn with_trace(value: bool) -> impl FnOnce(&mut FibonacciOpts) {
  move |opts: &mut FibonacciOpts| {
    opts.record_trace = value;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_to_the_tenth_term() {
    let opts = FibonacciOpts::new();
    assert_eq!(opts.target_index(), 10);
    assert_eq!(opts.max_steps(), None);
    assert!(!opts.record_trace());
  }

  #[test]
  fn options_are_applied_in_order() {
    let opts = FibonacciOpts::default().with_options(vec![
      with_target_index(3),
      with_target_index(7),
    ]);
    assert_eq!(opts.target_index(), 7);

    let opts = FibonacciOpts::default()
      .with_options(vec![with_max_steps(12)])
      .with_options(vec![with_trace(true)]);
    assert_eq!(opts.max_steps(), Some(12));
    assert!(opts.record_trace());
    assert_eq!(opts.target_index(), DEFAULT_TARGET_INDEX);
  }
}
