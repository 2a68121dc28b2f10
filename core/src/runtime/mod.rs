pub mod hooks;
mod state;

pub use state::*;

use thiserror::Error;

use crate::syscall::ExitStatus;
use crate::utils::FibonacciOpts;

/// A runtime computing one Fibonacci term (F(0) = 0, F(1) = 1) with an accumulator pair.
///
/// Each loop iteration checks the parity of the countdown `c`: on odd it adds `b` into `a`,
/// on even it adds `a` into `b`. After the countdown reaches zero, an even last parity selects
/// `b` as the result. The result is then read from `a`.
///
/// For the default configuration (index 10) this is the exact instruction shape of the fixture:
/// `a = 0`, `b = 1`, nine iterations, result 55.
pub struct Runtime {
  /// The state of the computation.
  pub state: ExecutionState,

  /// Max loop iterations for the runtime.
  pub max_steps: Option<u64>,

  /// Per-iteration snapshots, only filled when tracing was requested.
  record: Option<Vec<StepRecord>>,

  hook_registry: hooks::HookRegistry,
}

#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExecutionError {
  #[error("term {index} does not fit in 32 bits")]
  Overflow { index: u32 },
  #[error("step limit of {max_steps} exceeded")]
  StepLimitExceeded { max_steps: u64 },
  #[error("hook failed: {0}")]
  HookFailed(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
  DoneStep,
  Halted,
}

impl Runtime {
  pub fn new(opts: FibonacciOpts) -> Self {
    Self {
      state: ExecutionState::new(opts.target_index()),
      max_steps: opts.max_steps(),
      record: opts.record_trace().then(Vec::new),
      hook_registry: Default::default(),
    }
  }

  /// The fixed configuration: the 10th term.
  pub fn fixture() -> Self {
    Self::new(FibonacciOpts::default())
  }

  pub fn state(&self) -> &ExecutionState {
    &self.state
  }

  /// Iterations recorded so far. Empty unless tracing was requested.
  pub fn record(&self) -> &[StepRecord] {
    self.record.as_deref().unwrap_or_default()
  }

  /// The status to report once the computation is done.
  pub fn exit_status(&self) -> Option<ExitStatus> {
    (self.state.phase == Phase::Done).then(|| ExitStatus::from_value(self.state.a))
  }

  /// Register a new hook.
  /// Will fail if a hook is already registered under the given name.
  pub fn register_hook(
    &mut self,
    name: impl Into<String>,
    hook: Box<dyn hooks::Hook>,
  ) -> anyhow::Result<()> {
    self.hook_registry.register(name, hook)
  }

  /// Seed the accumulators so that the last write lands in `a`.
  ///
  /// The last iteration always runs with `c == 1` and writes `a`, and the writes alternate
  /// between `a` and `b`. An even index therefore starts from `(a, b) = (F(0), F(1))` and an
  /// odd one from `(F(1), F(0))`.
  fn initialize(&mut self) {
    let index = self.state.target_index;
    let (a, b) = if index % 2 == 0 { (0, 1) } else { (1, 0) };
    self.state.a = a;
    self.state.b = b;
    self.state.c = index.saturating_sub(1);
    self.state.d = None;
    self.state.global_clk = 0;
    tracing::debug!(index, a, b, c = self.state.c, "initialized");
    self.state.phase = Phase::Looping;
  }

  fn execute_step(&mut self) -> Result<(), ExecutionError> {
    if let Some(max_steps) = self.max_steps {
      if self.state.global_clk >= max_steps {
        tracing::debug!("out of steps");
        return Err(ExecutionError::StepLimitExceeded { max_steps });
      }
    }

    let overflow = ExecutionError::Overflow {
      index: self.state.target_index,
    };
    let c = self.state.c;
    let d = c & 1;
    if d == 1 {
      self.state.a = self.state.a.checked_add(self.state.b).ok_or(overflow)?;
    } else {
      self.state.b = self.state.b.checked_add(self.state.a).ok_or(overflow)?;
    }
    self.state.d = Some(d);
    self.state.c -= 1;
    self.state.global_clk += 1;

    let step = StepRecord {
      clk: self.state.global_clk,
      c,
      d,
      a: self.state.a,
      b: self.state.b,
    };
    self.trace_execution(step);
    if let Some(record) = self.record.as_mut() {
      record.push(step);
    }
    self.run_hooks(step)
  }

  fn run_hooks(&self, step: StepRecord) -> Result<(), ExecutionError> {
    for (name, hook) in self.hook_registry.iter() {
      hook
        .execute(hooks::HookEnv {
          state: &self.state,
          step,
        })
        .map_err(|err| {
          tracing::warn!(hook = name, %err, "hook failed");
          ExecutionError::HookFailed(format!("{name}: {err}"))
        })?;
    }
    Ok(())
  }

  fn correct(&mut self) {
    if self.state.d == Some(0) {
      self.state.a = self.state.b;
    }
    self.state.phase = Phase::Done;
  }

  /// Perform one state-machine transition.
  pub fn execute_cycle(&mut self) -> Result<Option<Event>, ExecutionError> {
    match self.state.phase {
      Phase::Init => {
        self.initialize();
        Ok(None)
      }
      Phase::Looping if self.state.c > 0 => {
        self.execute_step()?;
        Ok(Some(Event::DoneStep))
      }
      Phase::Looping => {
        tracing::debug!(d = ?self.state.d, "countdown exhausted");
        self.state.phase = Phase::Correcting;
        Ok(None)
      }
      Phase::Correcting => {
        self.correct();
        Ok(Some(Event::Halted))
      }
      Phase::Done => Ok(Some(Event::Halted)),
    }
  }

  /// Execute until done, returning the computed term.
  pub fn execute(&mut self) -> Result<u32, ExecutionError> {
    tracing::info!(index = self.state.target_index, "starting execution");
    // Loop until the computation finishes or an error occurs, whichever comes first
    loop {
      if Some(Event::Halted) == self.execute_cycle()? {
        break;
      }
    }
    tracing::info!(
      "finished execution global_clk = {} result = {}",
      self.state.global_clk,
      self.state.a
    );
    Ok(self.state.a)
  }

  fn trace_execution(&self, step: StepRecord) {
    tracing::trace!(
      clk = step.clk,
      c = step.c,
      d = step.d,
      a = step.a,
      b = step.b,
    );
  }
}

/// Compute F(`index`) in one go.
pub fn fibonacci(index: u32) -> Result<u32, ExecutionError> {
  let opts = FibonacciOpts::default().with_options(vec![crate::utils::with_target_index(index)]);
  Runtime::new(opts).execute()
}
