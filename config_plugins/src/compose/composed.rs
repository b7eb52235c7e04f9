//! The runnable result of composing plugins.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::step::Step;
use crate::{
    ComposeError, ComposeResult, Context, IntoPluginError, Plugin, PluginOutcome, Structural,
};

/// A chain of plugins folded into a single plugin.
///
/// Cloning is cheap: the steps are shared, so one chain can serve several
/// independent runs.
pub struct ComposedPlugin<C, X = Context> {
    steps: Arc<[Step<C, X>]>,
}

impl<C, X> ComposedPlugin<C, X> {
    pub(crate) fn from_steps(steps: Vec<Step<C, X>>) -> Self {
        Self {
            steps: steps.into(),
        }
    }

    /// Number of steps in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` for the identity chain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Diagnostic names of every step, in order.
    pub fn plugin_names(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.steps.iter().map(Step::name)
    }

    /// Report every step that cannot be invoked without running the chain.
    ///
    /// # Errors
    ///
    /// Returns the single [`ComposeError::ContractViolation`] when exactly
    /// one step is unresolved, or an [`ComposeError::Aggregate`] listing all
    /// of them.
    pub fn check(&self) -> ComposeResult<()> {
        let violations = self
            .steps
            .iter()
            .enumerate()
            .filter(|(_, step)| !step.is_invocable())
            .map(|(index, step)| step.not_invocable(index));
        ComposeError::try_aggregate(violations).map_or(Ok(()), |err| Err(Arc::new(err)))
    }
}

impl<C: Structural, X> ComposedPlugin<C, X> {
    /// Thread `initial` through every plugin in order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns
    /// [`ComposeError::PluginFailed`] when the plugin reported an error, or
    /// [`ComposeError::ContractViolation`] when the step was not invocable or
    /// returned something other than a mapping. Later steps do not run.
    pub fn run(&self, initial: C, context: &X) -> ComposeResult<C> {
        let span = tracing::debug_span!("compose", plugins = self.steps.len());
        let _entered = span.enter();
        let mut config = initial;
        for (index, step) in self.steps.iter().enumerate() {
            config = step.invoke(index, config, context).map_err(|err| {
                tracing::error!(index, plugin = %step.name(), error = %err, "plugin chain aborted");
                Arc::new(err)
            })?;
        }
        Ok(config)
    }

    /// Run the chain starting from [`Structural::empty`], which is `{}` for
    /// [`serde_json::Value`].
    ///
    /// # Errors
    ///
    /// As for [`ComposedPlugin::run`].
    pub fn run_empty(&self, context: &X) -> ComposeResult<C>
    where
        C: Default,
    {
        self.run(C::empty(), context)
    }

    /// Run the chain with a default context.
    ///
    /// # Errors
    ///
    /// As for [`ComposedPlugin::run`].
    pub fn run_with_default_context(&self, initial: C) -> ComposeResult<C>
    where
        X: Default,
    {
        self.run(initial, &X::default())
    }
}

impl<C: Structural, X> Plugin<C, X> for ComposedPlugin<C, X> {
    fn apply(&self, config: C, context: &X) -> PluginOutcome<C> {
        self.run(config, context).into_plugin()
    }

    fn name(&self) -> Cow<'_, str> {
        let names: Vec<_> = self.plugin_names().collect();
        Cow::Owned(format!("composed({})", names.join(", ")))
    }
}

impl<C, X> Clone for ComposedPlugin<C, X> {
    fn clone(&self) -> Self {
        Self {
            steps: Arc::clone(&self.steps),
        }
    }
}

impl<C, X> fmt::Debug for ComposedPlugin<C, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedPlugin")
            .field("steps", &self.steps)
            .finish()
    }
}
