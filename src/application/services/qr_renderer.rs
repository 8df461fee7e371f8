//! SVG rendering of QR module matrices.
//!
//! Rendering is module-by-module: the three finder patterns are drawn as
//! 7×7 blocks of solid squares rather than consolidated glyphs, and every
//! other dark module becomes a dot.

use std::sync::Arc;

use crate::domain::qr_matrix::{EcLevel, ModuleMatrix, QrEncoder, QrError};

/// Error-correction level used for every rendered code.
pub const QR_EC_LEVEL: EcLevel = EcLevel::Quartile;
/// Quiet zone, in modules.
pub const QR_MARGIN: usize = 4;
/// Pixels per module in viewBox units.
pub const QR_CELL_SIZE: usize = 10;
/// Fixed display box, independent of matrix size.
pub const QR_DISPLAY_SIZE: usize = 256;

const FINDER_SIZE: usize = 7;
const BACKGROUND_COLOR: &str = "#ffffff";
const FINDER_COLOR: &str = "#000000";
const DOT_COLOR: &str = "#6a1a4c";

/// Canvas geometry derived from the matrix size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub margin: usize,
    pub cell_size: usize,
    pub total_size: usize,
}

impl Geometry {
    pub fn for_matrix(size: usize) -> Self {
        Self {
            margin: QR_MARGIN,
            cell_size: QR_CELL_SIZE,
            total_size: (size + 2 * QR_MARGIN) * QR_CELL_SIZE,
        }
    }
}

/// Returns `true` if (`row`, `col`) lies in the top-left, top-right, or
/// bottom-left 7×7 finder block. The bottom-right corner has none.
pub fn is_position_pattern(row: usize, col: usize, size: usize) -> bool {
    let top = row < FINDER_SIZE;
    let left = col < FINDER_SIZE;
    let right = col + FINDER_SIZE >= size;
    let bottom = row + FINDER_SIZE >= size;

    (top && left) || (top && right) || (bottom && left)
}

/// Renders a matrix as a standalone SVG document.
pub fn render_svg(matrix: &ModuleMatrix) -> String {
    let size = matrix.size();
    let geometry = Geometry::for_matrix(size);
    let total = geometry.total_size;
    let cell = geometry.cell_size;
    let radius = cell as f64 / 2.0;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {total} {total}" width="{QR_DISPLAY_SIZE}" height="{QR_DISPLAY_SIZE}">"#
    );
    svg.push_str(&format!(
        r#"<rect width="{total}" height="{total}" fill="{BACKGROUND_COLOR}"/>"#
    ));

    for (row, col) in matrix.dark_modules() {
        let x = (col + geometry.margin) * cell;
        let y = (row + geometry.margin) * cell;

        if is_position_pattern(row, col, size) {
            svg.push_str(&format!(
                r#"<rect x="{x}" y="{y}" width="{cell}" height="{cell}" fill="{FINDER_COLOR}"/>"#
            ));
        } else {
            let cx = x as f64 + radius;
            let cy = y as f64 + radius;
            svg.push_str(&format!(
                r#"<circle cx="{cx}" cy="{cy}" r="{radius}" fill="{DOT_COLOR}"/>"#
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Encodes a target URL and renders it as SVG.
pub struct QrRenderer {
    encoder: Arc<dyn QrEncoder>,
}

impl QrRenderer {
    pub fn new(encoder: Arc<dyn QrEncoder>) -> Self {
        Self { encoder }
    }

    /// Renders `target` at [`QR_EC_LEVEL`].
    ///
    /// # Errors
    ///
    /// Returns [`QrError`] if the encoder rejects the input (e.g. too long).
    pub fn render(&self, target: &str) -> Result<String, QrError> {
        let matrix = self.encoder.encode(target, QR_EC_LEVEL)?;
        Ok(render_svg(&matrix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::qr_matrix::MockQrEncoder;

    fn count(svg: &str, needle: &str) -> usize {
        svg.matches(needle).count()
    }

    #[test]
    fn test_geometry_total_size() {
        assert_eq!(Geometry::for_matrix(21).total_size, 290);
        assert_eq!(Geometry::for_matrix(25).total_size, 330);
    }

    #[test]
    fn test_canvas_dimension_declared() {
        let svg = render_svg(&ModuleMatrix::from_fn(21, |_, _| false));

        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 290 290" width="256" height="256">"#
        ));
        assert!(svg.contains(r##"<rect width="290" height="290" fill="#ffffff"/>"##));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_top_left_block_renders_as_squares() {
        let svg = render_svg(&ModuleMatrix::from_fn(21, |_, _| true));

        for row in 0..7 {
            for col in 0..7 {
                let x = (col + 4) * 10;
                let y = (row + 4) * 10;
                let rect = format!(
                    r##"<rect x="{x}" y="{y}" width="10" height="10" fill="#000000"/>"##
                );
                assert!(svg.contains(&rect), "missing square at ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_center_module_renders_as_circle() {
        let svg = render_svg(&ModuleMatrix::from_fn(21, |row, col| row == 10 && col == 10));

        assert!(svg.contains(r##"<circle cx="145" cy="145" r="5" fill="#6a1a4c"/>"##));
        assert_eq!(count(&svg, "<rect"), 1);
    }

    #[test]
    fn test_all_dark_counts() {
        let svg = render_svg(&ModuleMatrix::from_fn(21, |_, _| true));

        // Background plus three 7×7 finder blocks.
        assert_eq!(count(&svg, "<rect"), 1 + 3 * 49);
        assert_eq!(count(&svg, "<circle"), 21 * 21 - 3 * 49);
    }

    #[test]
    fn test_bottom_right_corner_has_no_finder() {
        let svg = render_svg(&ModuleMatrix::from_fn(21, |row, col| row == 20 && col == 20));

        assert!(svg.contains(r##"<circle cx="245" cy="245" r="5" fill="#6a1a4c"/>"##));
    }

    #[test]
    fn test_light_modules_are_not_drawn() {
        let svg = render_svg(&ModuleMatrix::from_fn(21, |_, _| false));

        assert_eq!(count(&svg, "<rect"), 1);
        assert_eq!(count(&svg, "<circle"), 0);
    }

    #[test]
    fn test_is_position_pattern_corners() {
        let size = 25;
        assert!(is_position_pattern(0, 0, size));
        assert!(is_position_pattern(6, 6, size));
        assert!(!is_position_pattern(7, 7, size));
        assert!(is_position_pattern(0, 18, size));
        assert!(!is_position_pattern(0, 17, size));
        assert!(is_position_pattern(18, 0, size));
        assert!(!is_position_pattern(24, 24, size));
        assert!(!is_position_pattern(12, 12, size));
    }

    #[test]
    fn test_renderer_uses_quartile_level() {
        let mut encoder = MockQrEncoder::new();
        encoder
            .expect_encode()
            .withf(|text, level| text == "https://example.com" && *level == EcLevel::Quartile)
            .times(1)
            .returning(|_, _| Ok(ModuleMatrix::from_fn(21, |_, _| false)));

        let svg = QrRenderer::new(Arc::new(encoder))
            .render("https://example.com")
            .unwrap();

        assert!(svg.contains(r#"viewBox="0 0 290 290""#));
    }

    #[test]
    fn test_renderer_propagates_encoder_error() {
        let mut encoder = MockQrEncoder::new();
        encoder
            .expect_encode()
            .returning(|_, _| Err(QrError::Encode("data too long".to_string())));

        let result = QrRenderer::new(Arc::new(encoder)).render("x");

        assert!(matches!(result, Err(QrError::Encode(_))));
    }
}
