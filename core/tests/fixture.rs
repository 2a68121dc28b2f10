use std::cell::RefCell;
use std::rc::Rc;

use fibonacci_core::runtime::hooks::{Hook, HookEnv};
use fibonacci_core::runtime::Phase;
use fibonacci_core::utils::{with_target_index, with_trace, FibonacciOpts};
use fibonacci_core::{fibonacci, ExitStatus, Runtime};

/// Reference terms computed independently of the runtime.
fn terms(n: usize) -> Vec<u32> {
  let mut terms = vec![0, 1];
  while terms.len() < n {
    let next = terms[terms.len() - 1] + terms[terms.len() - 2];
    terms.push(next);
  }
  terms
}

fn are_consecutive(a: u32, b: u32, terms: &[u32]) -> bool {
  terms
    .windows(2)
    .any(|pair| (pair[0] == a && pair[1] == b) || (pair[0] == b && pair[1] == a))
}

struct InvariantHook {
  seen: Rc<RefCell<Vec<(u32, u32)>>>,
}

impl Hook for InvariantHook {
  fn execute(&self, env: HookEnv<'_>) -> anyhow::Result<()> {
    let terms = terms(20);
    anyhow::ensure!(
      are_consecutive(env.state.a, env.state.b, &terms),
      "a = {}, b = {} are not consecutive terms",
      env.state.a,
      env.state.b
    );
    self.seen.borrow_mut().push((env.state.a, env.state.b));
    Ok(())
  }
}

#[test]
fn fixture_reports_55() {
  let mut runtime = Runtime::fixture();
  assert_eq!(runtime.execute(), Ok(55));
  assert_eq!(runtime.state().phase, Phase::Done);
  assert_eq!(runtime.exit_status(), Some(ExitStatus::from_value(55)));
  assert_eq!(runtime.exit_status().map(|status| status.code()), Some(55));
}

#[test]
fn accumulators_stay_consecutive_after_every_iteration() {
  let seen = Rc::new(RefCell::new(Vec::new()));
  let mut runtime = Runtime::new(FibonacciOpts::default().with_options(vec![with_trace(true)]));
  runtime
    .register_hook("invariant", Box::new(InvariantHook { seen: seen.clone() }))
    .unwrap();

  assert_eq!(runtime.execute(), Ok(55));
  assert_eq!(seen.borrow().len(), 9);

  // After iteration i the newest term is F(i + 1).
  let terms = terms(12);
  for (i, step) in runtime.record().iter().enumerate() {
    let newest = if step.d == 1 { step.a } else { step.b };
    let older = if step.d == 1 { step.b } else { step.a };
    assert_eq!(newest, terms[i + 2], "iteration {}", i + 1);
    assert_eq!(older, terms[i + 1], "iteration {}", i + 1);
  }
  let last = runtime.record().last().unwrap();
  assert_eq!(last.a + last.b, terms[11]);
}

#[test]
fn repeated_runs_are_identical() {
  let first = fibonacci(10).unwrap();
  for _ in 0..5 {
    assert_eq!(fibonacci(10).unwrap(), first);
    assert_eq!(Runtime::fixture().execute(), Ok(first));
  }
}

#[test]
fn parameterized_index_seven() {
  let mut runtime = Runtime::new(FibonacciOpts::default().with_options(vec![with_target_index(7)]));
  assert_eq!(runtime.execute(), Ok(13));
  assert_eq!(runtime.exit_status(), Some(ExitStatus::from_value(13)));
  assert_eq!(runtime.state().global_clk, 6);
}

#[test]
fn parameterized_indices_match_reference() {
  let terms = terms(30);
  for (index, term) in terms.iter().enumerate() {
    assert_eq!(fibonacci(index as u32), Ok(*term), "index {index}");
  }
}
