/// Position of the runtime in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  /// Accumulators not seeded yet.
  Init,
  /// Running the countdown loop.
  Looping,
  /// Countdown exhausted, final value not selected yet.
  Correcting,
  /// Final value selected. Terminal.
  Done,
}

/// Holds data describing the current state of a computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionState {
  /// The index of the term being computed.
  pub target_index: u32,

  /// Accumulator holding the result once the computation is done.
  pub a: u32,

  /// The other accumulator.
  pub b: u32,

  /// Remaining loop iterations.
  pub c: u32,

  /// Parity of `c` at the last check. `None` until the loop body has run once.
  pub d: Option<u32>,

  pub phase: Phase,

  /// The global clock keeps track of how many loop iterations have been executed.
  pub global_clk: u64,
}

impl ExecutionState {
  pub fn new(target_index: u32) -> Self {
    Self {
      target_index,
      a: 0,
      b: 0,
      c: 0,
      d: None,
      phase: Phase::Init,
      global_clk: 0,
    }
  }
}

/// Snapshot of the scalars right after one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRecord {
  pub clk: u64,
  /// Countdown value that drove this iteration.
  pub c: u32,
  pub d: u32,
  pub a: u32,
  pub b: u32,
}
