//! Geometry primitives and the screen-to-document coordinate transform.
//!
//! Screen space is viewer-local pixels with the origin at the top-left and Y
//! growing downward. Document space is PDF points with the origin at the
//! bottom-left and Y growing upward. Everything here is pure: a drag is
//! re-derived from its two endpoints on every pointer event, never
//! accumulated.

/// A pointer position in viewer-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in viewer-local pixel coordinates.
///
/// `(x, y)` is always the top-left corner and `width`/`height` are always
/// non-negative, regardless of which direction the user dragged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-area rectangles cannot be applied as a crop.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Scales the rectangle uniformly about the viewport origin, tracking a
    /// viewport whose pixel size changed by `factor`.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Intrinsic page size in PDF points (bottom-left origin convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
}

impl PageGeometry {
    #[inline]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The visible-region box written into the page dictionary, in PDF points
/// with a bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Normalizes a drag gesture into a screen rectangle.
///
/// Handles all four drag directions: the result's corner is the per-axis
/// minimum of the two points and its size the absolute delta, so swapping
/// `anchor` and `current` yields the same rectangle.
pub fn normalize_drag(anchor: ScreenPoint, current: ScreenPoint) -> ScreenRect {
    ScreenRect {
        x: anchor.x.min(current.x),
        y: anchor.y.min(current.y),
        width: (current.x - anchor.x).abs(),
        height: (current.y - anchor.y).abs(),
    }
}

/// Converts a finalized screen rectangle into a document-space crop box.
///
/// `viewport_width` must be the pixel width of the currently rendered
/// preview. The uniform scale factor is `page.width / viewport_width`; the Y
/// origin flips from the screen rect's *bottom* edge because document Y
/// grows upward from the page bottom.
///
/// A degenerate input yields a degenerate (zero-area) box; rejecting that is
/// the confirm action's job, not this function's.
pub fn to_document_space(rect: ScreenRect, viewport_width: f32, page: PageGeometry) -> CropBox {
    let k = page.width / viewport_width;

    CropBox {
        x: rect.x * k,
        y: page.height - (rect.y + rect.height) * k,
        width: rect.width * k,
        height: rect.height * k,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < EPS, "expected {b}, got {a}");
    }

    #[test]
    fn drag_down_right() {
        let rect = normalize_drag(ScreenPoint::new(10.0, 20.0), ScreenPoint::new(110.0, 80.0));
        assert_eq!(rect, ScreenRect::new(10.0, 20.0, 100.0, 60.0));
    }

    #[test]
    fn drag_up_left() {
        let rect = normalize_drag(ScreenPoint::new(110.0, 80.0), ScreenPoint::new(10.0, 20.0));
        assert_eq!(rect, ScreenRect::new(10.0, 20.0, 100.0, 60.0));
    }

    #[test]
    fn drag_down_left() {
        let rect = normalize_drag(ScreenPoint::new(110.0, 20.0), ScreenPoint::new(10.0, 80.0));
        assert_eq!(rect, ScreenRect::new(10.0, 20.0, 100.0, 60.0));
    }

    #[test]
    fn drag_up_right() {
        let rect = normalize_drag(ScreenPoint::new(10.0, 80.0), ScreenPoint::new(110.0, 20.0));
        assert_eq!(rect, ScreenRect::new(10.0, 20.0, 100.0, 60.0));
    }

    #[test]
    fn drag_is_symmetric_under_endpoint_swap() {
        let a = ScreenPoint::new(37.5, 91.0);
        let c = ScreenPoint::new(12.0, 4.25);
        assert_eq!(normalize_drag(a, c), normalize_drag(c, a));
    }

    #[test]
    fn zero_drag_is_degenerate() {
        let p = ScreenPoint::new(50.0, 50.0);
        let rect = normalize_drag(p, p);
        assert!(rect.is_degenerate());
        assert_eq!(rect, ScreenRect::new(50.0, 50.0, 0.0, 0.0));
    }

    #[test]
    fn us_letter_round_trip() {
        // 612x792 page rendered into a 600 px wide viewport: k = 1.02.
        let page = PageGeometry::new(612.0, 792.0);
        let rect = ScreenRect::new(100.0, 100.0, 200.0, 150.0);

        let crop = to_document_space(rect, 600.0, page);

        assert_close(crop.x, 102.0);
        assert_close(crop.width, 204.0);
        assert_close(crop.height, 153.0);
        // 792 - (100 + 150) * 1.02 = 792 - 255
        assert_close(crop.y, 537.0);
    }

    #[test]
    fn full_viewport_selection_covers_page() {
        let page = PageGeometry::new(612.0, 792.0);
        let viewport_width = 306.0;
        let viewport_height = 396.0;
        let rect = ScreenRect::new(0.0, 0.0, viewport_width, viewport_height);

        let crop = to_document_space(rect, viewport_width, page);

        assert_close(crop.x, 0.0);
        assert_close(crop.y, 0.0);
        assert_close(crop.width, 612.0);
        assert_close(crop.height, 792.0);
    }

    #[test]
    fn scaled_rect_maps_to_the_same_document_box() {
        let page = PageGeometry::new(612.0, 792.0);
        let rect = ScreenRect::new(100.0, 100.0, 200.0, 150.0);

        let at_600 = to_document_space(rect, 600.0, page);
        let at_750 = to_document_space(rect.scaled(750.0 / 600.0), 750.0, page);

        assert_close(at_750.x, at_600.x);
        assert_close(at_750.y, at_600.y);
        assert_close(at_750.width, at_600.width);
        assert_close(at_750.height, at_600.height);
    }

    #[test]
    fn degenerate_rect_maps_to_degenerate_box() {
        let page = PageGeometry::new(612.0, 792.0);
        let crop = to_document_space(ScreenRect::new(10.0, 10.0, 0.0, 40.0), 600.0, page);
        assert_close(crop.width, 0.0);
        assert!(crop.height > 0.0);
    }
}
