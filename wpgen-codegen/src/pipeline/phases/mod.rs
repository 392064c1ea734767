//! Built-in generation phases, in execution order.

mod allow_list;
mod ddl;
mod normalize;
mod render;

pub use allow_list::AllowListPhase;
pub use ddl::DdlPhase;
pub use normalize::NormalizePhase;
pub use render::RenderPhase;
