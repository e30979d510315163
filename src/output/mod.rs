mod svg;

pub use self::svg::SvgSink;

use crate::error::Result;
use crate::glyph::GlyphOutline;

/// Hand-off of compiled glyphs to whatever builds the font, one glyph at a
/// time.
pub trait GlyphSink {
    /// Accepts one glyph outline.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot store the glyph.
    fn add_glyph(&mut self, glyph: &GlyphOutline) -> Result<()>;
}

/// Keeps compiled glyphs in memory, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    glyphs: Vec<GlyphOutline>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn glyphs(&self) -> &[GlyphOutline] {
        &self.glyphs
    }

    #[must_use]
    pub fn into_glyphs(self) -> Vec<GlyphOutline> {
        self.glyphs
    }
}

impl GlyphSink for MemorySink {
    fn add_glyph(&mut self, glyph: &GlyphOutline) -> Result<()> {
        self.glyphs.push(glyph.clone());
        Ok(())
    }
}
