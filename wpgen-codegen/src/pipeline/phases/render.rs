//! Render phase: template the plugin file.

use eyre::{OptionExt, Result};

use crate::{
    crud::PluginRenderer,
    pipeline::{GenerationContext, Phase},
};

pub struct RenderPhase;

impl Phase for RenderPhase {
    fn name(&self) -> &'static str {
        "render"
    }

    fn description(&self) -> &'static str {
        "Render the PHP plugin file"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let lines = ctx
            .column_lines
            .as_deref()
            .ok_or_eyre("column lines not set - did the ddl phase run?")?;
        let allowed = ctx
            .allowed
            .as_ref()
            .ok_or_eyre("allow-list not set - did the allow-list phase run?")?;

        let output = PluginRenderer::new(&ctx.descriptor, lines, allowed).render();
        tracing::debug!(bytes = output.len(), "rendered plugin");
        ctx.output = Some(output);
        Ok(())
    }
}
