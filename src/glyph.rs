use tracing::debug;

use crate::config::CompileConfig;
use crate::error::Result;
use crate::geometry::Shape;
use crate::operations::merge::merge_strokes;
use crate::operations::outline::StrokeOutline;
use crate::operations::structure::StructuralView;
use crate::skeleton::Skeleton;

/// A compiled glyph ready for an output sink.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphOutline {
    pub codepoint: char,
    pub advance_width: f64,
    pub shape: Shape,
}

/// Advance width for `ch`: half the design size below U+0080, else full.
#[must_use]
pub fn advance_width(ch: char, design_size: f64) -> f64 {
    if u32::from(ch) < 128 {
        design_size * 0.5
    } else {
        design_size
    }
}

/// Compiles one glyph skeleton into its outline.
///
/// Runs the merger, builds the structural view, offsets every centerline and
/// finally moves the result into the centre of the em square. Any failure is
/// tagged with the glyph so batch callers can report it and carry on.
///
/// # Errors
///
/// Returns `StrokeweldError::Glyph` wrapping the configuration, input or
/// outline error that stopped the glyph.
pub fn compile_glyph(
    codepoint: char,
    skeleton: &Skeleton,
    config: &CompileConfig,
) -> Result<GlyphOutline> {
    outline_skeleton(skeleton, config)
        .map(|shape| GlyphOutline {
            codepoint,
            advance_width: advance_width(codepoint, config.design_size),
            shape,
        })
        .map_err(|e| e.in_glyph(codepoint))
}

/// Parses a JSON skeleton record and compiles it.
///
/// # Errors
///
/// See [`compile_glyph`]; parse failures are tagged the same way.
pub fn compile_glyph_json(
    codepoint: char,
    json: &str,
    config: &CompileConfig,
) -> Result<GlyphOutline> {
    let skeleton = Skeleton::from_json(json).map_err(|e| e.in_glyph(codepoint))?;
    compile_glyph(codepoint, &skeleton, config)
}

fn outline_skeleton(skeleton: &Skeleton, config: &CompileConfig) -> Result<Shape> {
    config.validate()?;
    let style = config.stroke_style()?;
    let merged = merge_strokes(skeleton, config)?;
    let view = StructuralView::build(&merged.paths, &merged.index)?;
    let mut shape = StrokeOutline::new(&merged.paths, &merged.index, &view, style).execute()?;
    shape.translate(&config.centering_offset());
    debug!(
        strokes = skeleton.strokes.len(),
        centerlines = merged.paths.len(),
        contours = shape.paths.len(),
        "compiled glyph"
    );
    Ok(shape)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{OutlineError, StrokeweldError};
    use crate::skeleton::Stroke;
    use approx::assert_abs_diff_eq;

    fn init_tracing() {
        let filter = tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }

    /// Design size 1000 with the skeleton filling the whole em.
    fn config() -> CompileConfig {
        CompileConfig {
            design_size: 1000.0,
            stroke_width: 50.0,
            width_ratio: 1.0,
            merge_tolerance: None,
        }
    }

    /// "十": a horizontal bar crossed by a vertical one.
    fn cross() -> Skeleton {
        Skeleton::new(vec![
            Stroke::polyline(&[(0.1, 0.5), (0.9, 0.5)]),
            Stroke::polyline(&[(0.5, 0.1), (0.5, 0.9)]),
        ])
    }

    #[test]
    fn advance_width_follows_code_point_range() {
        assert_abs_diff_eq!(advance_width('A', 1024.0), 512.0);
        assert_abs_diff_eq!(advance_width('\u{7f}', 1024.0), 512.0);
        assert_abs_diff_eq!(advance_width('十', 1024.0), 1024.0);
    }

    #[test]
    fn cross_gives_two_contours() {
        init_tracing();
        let glyph = compile_glyph('十', &cross(), &config()).unwrap();
        assert_eq!(glyph.codepoint, '十');
        assert_abs_diff_eq!(glyph.advance_width, 1000.0);
        assert_eq!(glyph.shape.paths.len(), 2);
        assert!(glyph.shape.paths.iter().all(|p| p.closed));

        let (min, max) = glyph.shape.bounds().unwrap();
        assert_abs_diff_eq!(min.x, 75.0, epsilon = 1e-9);
        assert_abs_diff_eq!(max.x, 925.0, epsilon = 1e-9);
        assert_abs_diff_eq!(min.y, 75.0, epsilon = 1e-9);
        assert_abs_diff_eq!(max.y, 925.0, epsilon = 1e-9);
    }

    #[test]
    fn joined_strokes_become_one_contour() {
        init_tracing();
        // "L" drawn as two strokes sharing the corner.
        let skeleton = Skeleton::new(vec![
            Stroke::polyline(&[(0.2, 0.8), (0.2, 0.2)]),
            Stroke::polyline(&[(0.2, 0.2), (0.8, 0.2)]),
        ]);
        let glyph = compile_glyph('L', &skeleton, &config()).unwrap();
        assert_eq!(glyph.shape.paths.len(), 1);
        assert_abs_diff_eq!(glyph.advance_width, 500.0);
    }

    #[test]
    fn closed_loop_gives_outer_and_inner() {
        init_tracing();
        let skeleton = Skeleton::new(vec![Stroke::polyline(&[
            (0.2, 0.2),
            (0.8, 0.2),
            (0.8, 0.8),
            (0.2, 0.8),
            (0.2, 0.2),
        ])]);
        let glyph = compile_glyph('口', &skeleton, &config()).unwrap();
        assert_eq!(glyph.shape.paths.len(), 2);
        let (min, max) = glyph.shape.bounds().unwrap();
        assert_abs_diff_eq!(min.x, 175.0, epsilon = 1e-9);
        assert_abs_diff_eq!(max.y, 825.0, epsilon = 1e-9);
    }

    #[test]
    fn skeleton_is_centred_in_the_em() {
        let config = CompileConfig {
            width_ratio: 0.8,
            ..config()
        };
        let skeleton = Skeleton::new(vec![Stroke::polyline(&[(0.0, 0.5), (1.0, 0.5)])]);
        let glyph = compile_glyph('一', &skeleton, &config).unwrap();
        let (min, max) = glyph.shape.bounds().unwrap();
        // 800 units long, shifted by 100, extended by 25 at both ends.
        assert_abs_diff_eq!(min.x, 75.0, epsilon = 1e-9);
        assert_abs_diff_eq!(max.x, 925.0, epsilon = 1e-9);
    }

    #[test]
    fn outline_failures_name_the_glyph() {
        init_tracing();
        // The second leg is shorter than the stroke radius.
        let skeleton = Skeleton::new(vec![Stroke::polyline(&[
            (0.1, 0.5),
            (0.9, 0.5),
            (0.9, 0.51),
        ])]);
        let err = compile_glyph('x', &skeleton, &config()).unwrap_err();
        assert!(err.to_string().starts_with("glyph x:"));
        assert!(matches!(
            err.root(),
            StrokeweldError::Outline(OutlineError::UnresolvableJoin { path: 0, .. })
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CompileConfig {
            stroke_width: 0.0,
            ..config()
        };
        let err = compile_glyph('十', &cross(), &config).unwrap_err();
        assert!(matches!(err.root(), StrokeweldError::Input(_)));
    }

    #[test]
    fn json_record_compiles() {
        let json = r#"{ "scale": 1.0, "strokes": [
            { "points": [ { "x": 0.1, "y": 0.5 }, { "x": 0.9, "y": 0.5 } ] }
        ] }"#;
        let glyph = compile_glyph_json('一', json, &config()).unwrap();
        assert_eq!(glyph.shape.paths.len(), 1);
    }

    #[test]
    fn broken_json_is_tagged() {
        let err = compile_glyph_json('一', "{ \"strokes\": [ { } ] }", &config()).unwrap_err();
        assert!(matches!(err, StrokeweldError::Glyph { .. }));
        assert!(matches!(err.root(), StrokeweldError::Input(_)));
    }

    #[test]
    fn compiling_twice_is_bit_identical() {
        let skeleton = Skeleton::new(vec![
            Stroke::polyline(&[(0.2, 0.8), (0.2, 0.2)]),
            Stroke::polyline(&[(0.2, 0.2), (0.8, 0.2)]),
            Stroke::polyline(&[(0.5, 0.2), (0.5, 0.9)]),
            Stroke::polyline(&[(0.1, 0.6), (0.9, 0.6)]),
        ]);
        let first = compile_glyph('丑', &skeleton, &config()).unwrap();
        let second = compile_glyph('丑', &skeleton, &config()).unwrap();
        assert_eq!(first, second);
    }
}
