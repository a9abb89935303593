//! Output module.
//!
//! Four interchangeable renderers turn the ordered lookup results into
//! text: a colorized tree, JSON, a short table and the raw WHOIS text.

mod json;
mod raw;
mod short;
mod style;
mod tree;

pub use json::JsonRenderer;
pub use raw::RawRenderer;
pub use short::ShortRenderer;
pub use tree::TreeRenderer;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::whois::WhoisResult;
use std::io::Write;

/// Renders an ordered list of lookup results.
pub trait Render {
    /// Write every result, in order, to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or serializing fails.
    fn render(&self, results: &[WhoisResult], out: &mut dyn Write) -> Result<()>;
}

/// Pick the renderer for an output format.
///
/// `use_colors` only affects the tree and raw renderers.
#[must_use]
pub fn get_renderer(format: OutputFormat, use_colors: bool) -> Box<dyn Render> {
    match format {
        OutputFormat::Terminal => Box::new(TreeRenderer::new(use_colors)),
        OutputFormat::Json => Box::new(JsonRenderer::new()),
        OutputFormat::Short => Box::new(ShortRenderer::new()),
        OutputFormat::Raw => Box::new(RawRenderer::new(use_colors)),
    }
}
