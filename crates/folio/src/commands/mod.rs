//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod schema;
pub(crate) mod serve;
pub(crate) mod validate;

pub(crate) use render::RenderArgs;
pub(crate) use schema::SchemaArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use validate::ValidateArgs;
