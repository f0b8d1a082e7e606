//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod run;

pub(crate) use render::RenderArgs;
pub(crate) use run::RunArgs;
