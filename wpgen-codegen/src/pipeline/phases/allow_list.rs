//! Allow-list phase: compute the writable column set.

use eyre::Result;

use crate::{
    crud::AllowedColumnSet,
    pipeline::{GenerationContext, Phase},
};

pub struct AllowListPhase;

impl Phase for AllowListPhase {
    fn name(&self) -> &'static str {
        "allow-list"
    }

    fn description(&self) -> &'static str {
        "Compute the repository column allow-list"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let d = &ctx.descriptor;
        let allowed = AllowedColumnSet::build(&d.columns, d.add_timestamps);
        tracing::debug!(columns = ?allowed.to_vec(), "built allow-list");
        ctx.allowed = Some(allowed);
        Ok(())
    }
}
