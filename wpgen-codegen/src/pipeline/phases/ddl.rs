//! DDL phase: build the `CREATE TABLE` column lines.

use eyre::Result;

use crate::{
    crud::column_lines,
    pipeline::{GenerationContext, Phase},
};

pub struct DdlPhase;

impl Phase for DdlPhase {
    fn name(&self) -> &'static str {
        "ddl"
    }

    fn description(&self) -> &'static str {
        "Build CREATE TABLE column definitions"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let d = &ctx.descriptor;
        let lines = column_lines(&d.columns, d.add_timestamps);
        tracing::debug!(lines = lines.len(), "built column definitions");
        ctx.column_lines = Some(lines);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crud::{EntityDescriptor, PRIMARY_KEY_LINE};

    #[test]
    fn test_sets_lines() {
        let mut ctx = GenerationContext::new(
            EntityDescriptor::new("ticket").with_timestamps(false),
            Vec::new(),
        );
        DdlPhase.run(&mut ctx).unwrap();
        assert_eq!(ctx.column_lines.as_deref(), Some(&[PRIMARY_KEY_LINE.to_string()][..]));
    }
}
