use std::path::{Path as FsPath, PathBuf};

use ::svg::node::element::path::Data;
use ::svg::node::element::Path as SvgPath;
use ::svg::Document;
use tracing::debug;

use crate::error::{OutputError, Result};
use crate::geometry::{Path, Segment, Shape};
use crate::glyph::GlyphOutline;
use crate::math::Point2;

use super::GlyphSink;

/// Writes each glyph as `<dir>/<name>.svg` for tools that import drawings.
///
/// The drawing is one filled `<path>` holding every contour, `width` is the
/// advance width and `height` the design size. Font y-up coordinates are
/// flipped into the drawing's y-down space.
#[derive(Debug, Clone)]
pub struct SvgSink {
    dir: PathBuf,
    design_size: f64,
    written: Vec<PathBuf>,
}

impl SvgSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, design_size: f64) -> Self {
        Self {
            dir: dir.into(),
            design_size,
            written: Vec::new(),
        }
    }

    /// Files written so far.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File a glyph is written to.
    ///
    /// Characters that are unsafe in file names use their code point
    /// instead, as do uppercase letters so that `A` and `a` stay apart on
    /// case-insensitive file systems.
    #[must_use]
    pub fn file_for(&self, codepoint: char) -> PathBuf {
        let name = if codepoint.is_alphanumeric() && !codepoint.is_uppercase() {
            codepoint.to_string()
        } else {
            format!("u{:04X}", u32::from(codepoint))
        };
        self.dir.join(format!("{name}.svg"))
    }

    /// Builds the drawing for one glyph.
    #[must_use]
    pub fn document(&self, glyph: &GlyphOutline) -> Document {
        let outline = SvgPath::new()
            .set("fill", "black")
            .set("fill-rule", "nonzero")
            .set("d", self.path_data(&glyph.shape));
        Document::new()
            .set("width", glyph.advance_width)
            .set("height", self.design_size)
            .set("viewBox", (0.0, 0.0, glyph.advance_width, self.design_size))
            .add(outline)
    }

    fn path_data(&self, shape: &Shape) -> Data {
        shape
            .paths
            .iter()
            .fold(Data::new(), |data, path| self.contour(data, path))
    }

    fn contour(&self, data: Data, path: &Path) -> Data {
        let flip = |p: Point2| (p.x, self.design_size - p.y);
        let mut data = data.move_to(flip(path.start));
        let mut at = path.start;
        for segment in &path.segments {
            data = match *segment {
                Segment::Line { to } => data.line_to(flip(at + to)),
                Segment::Cubic { ctrl1, ctrl2, to } => {
                    let (c1, c2, end) = (flip(at + ctrl1), flip(at + ctrl2), flip(at + to));
                    data.cubic_curve_to((c1.0, c1.1, c2.0, c2.1, end.0, end.1))
                }
            };
            at += segment.displacement();
        }
        if path.closed {
            data = data.close();
        }
        data
    }

    fn save(&self, file: &FsPath, document: &Document) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(OutputError::Io)?;
        ::svg::save(file, document).map_err(OutputError::Io)?;
        Ok(())
    }
}

impl GlyphSink for SvgSink {
    fn add_glyph(&mut self, glyph: &GlyphOutline) -> Result<()> {
        let file = self.file_for(glyph.codepoint);
        self.save(&file, &self.document(glyph))?;
        debug!(file = %file.display(), contours = glyph.shape.paths.len(), "wrote glyph drawing");
        self.written.push(file);
        Ok(())
    }
}
