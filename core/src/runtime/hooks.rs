use std::collections::BTreeMap;

use super::{ExecutionState, StepRecord};

/// An observer called after every loop iteration.
#[cfg_attr(test, mockall::automock)]
#[allow(clippy::needless_lifetimes)] // the lifetimes are needed by automock
pub trait Hook {
  fn execute<'r>(&self, env: HookEnv<'r>) -> anyhow::Result<()>;
}

/// A registry of hooks to call, indexed by name.
#[derive(Default)]
pub struct HookRegistry {
  /// Table of registered hooks. Hooks run in name order.
  table: BTreeMap<String, Box<dyn Hook>>,
}

impl HookRegistry {
  /// Create an empty registry.
  pub fn new() -> Self {
    Default::default()
  }

  /// Register a hook under a given name.
  /// Will fail if the name is empty or a hook is already registered under it.
  pub fn register(&mut self, name: impl Into<String>, hook: Box<dyn Hook>) -> anyhow::Result<()> {
    let name = name.into();
    anyhow::ensure!(!name.is_empty(), "hook name must not be empty");
    anyhow::ensure!(
      !self.table.contains_key(&name),
      "there is already a hook named {name} registered"
    );
    self.table.insert(name, hook);
    Ok(())
  }

  pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &dyn Hook)> {
    self
      .table
      .iter()
      .map(|(name, hook)| (name.as_str(), hook.as_ref()))
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }
}

/// Environment that a hook may read from.
pub struct HookEnv<'r> {
  pub state: &'r ExecutionState,
  pub step: StepRecord,
}
