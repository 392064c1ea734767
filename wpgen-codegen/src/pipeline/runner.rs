//! Pipeline orchestrator.

use eyre::Result;
use wpgen_manifest::EntityConfig;

use super::{
    GenerationContext, Phase,
    phases::{AllowListPhase, DdlPhase, NormalizePhase, RenderPhase},
};

/// Runs the built-in phases followed by any extra ones.
///
/// ```
/// use wpgen_codegen::crud::EntityDescriptor;
/// use wpgen_codegen::pipeline::{GenerationContext, Pipeline};
///
/// let ctx = GenerationContext::new(EntityDescriptor::new("ticket"), Vec::new());
/// let ctx = Pipeline::new().run(ctx).unwrap();
/// assert!(ctx.output.unwrap().starts_with("<?php\n"));
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { phases: Vec::new() }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Run normalize → ddl → allow-list → render, then the extra phases.
    pub fn run(&self, mut ctx: GenerationContext) -> Result<GenerationContext> {
        let builtin: [&dyn Phase; 4] = [&NormalizePhase, &DdlPhase, &AllowListPhase, &RenderPhase];

        for phase in builtin
            .into_iter()
            .chain(self.phases.iter().map(|p| p.as_ref()))
        {
            tracing::debug!(phase = phase.name(), "{}", phase.description());
            phase.run(&mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run the pipeline for a manifest entity.
    pub fn run_config(&self, config: &EntityConfig) -> Result<GenerationContext> {
        self.run(GenerationContext::from_config(config))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{crud::render, pipeline::Diagnostic};

    struct CountingPhase(Arc<AtomicUsize>);

    impl Phase for CountingPhase {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn description(&self) -> &'static str {
            "Count runs"
        }

        fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
            assert!(ctx.output.is_some(), "extra phases run after render");
            self.0.fetch_add(1, Ordering::SeqCst);
            ctx.add_diagnostic(Diagnostic::info("counting", "done"));
            Ok(())
        }
    }

    fn manifest(content: &str) -> wpgen_manifest::Manifest {
        content.parse().expect("Failed to parse test manifest")
    }

    #[test]
    fn test_pipeline_matches_direct_render() {
        let manifest = manifest(
            r#"
            [entity]
            name = "ticket"

            [[entity.columns]]
            name = "title"
            type = "VARCHAR(255)"
        "#,
        );

        let ctx = Pipeline::new().run_config(&manifest.entity).unwrap();
        let direct = render(&crate::crud::EntityDescriptor::from_config(&manifest.entity));

        assert_eq!(ctx.output.as_deref(), Some(direct.as_str()));
    }

    #[test]
    fn test_extra_phases_run_last() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new().phase(CountingPhase(count.clone()));

        let ctx = pipeline
            .run(GenerationContext::new(
                crate::crud::EntityDescriptor::new("ticket"),
                Vec::new(),
            ))
            .unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.diagnostics.len(), 1);
    }
}
