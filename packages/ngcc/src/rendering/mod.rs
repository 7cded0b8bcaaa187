//! Rendering
//!
//! Splices generated definitions and imports into the original text of a
//! module, drops the consumed decorator metadata, and maps the result back to
//! the original.

mod esm2015_renderer;
mod esm5_renderer;
mod renderer;
mod source_buffer;

pub use esm2015_renderer::Esm2015Renderer;
pub use esm5_renderer::Esm5Renderer;
pub use renderer::{
    get_decorators_to_remove, DecoratorRemoval, DecoratorRemovals, FileInfo, RenderResult,
    RenderStrategy, Renderer,
};
pub use source_buffer::SourceBuffer;
