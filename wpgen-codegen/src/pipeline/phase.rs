//! Generation phase trait.

use eyre::Result;

use super::GenerationContext;

/// One step of the generation pipeline.
///
/// Phases run in order and communicate through the [`GenerationContext`].
/// Recoverable input problems go into `ctx.diagnostics`; an `Err` aborts
/// the run.
pub trait Phase: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn run(&self, ctx: &mut GenerationContext) -> Result<()>;
}
