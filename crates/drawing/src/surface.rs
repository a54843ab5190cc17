//! The drawing surface
//!
//! An RGBA raster that starts fully transparent. Strokes are painted
//! with round caps and joins; the eraser clears pixels back to
//! transparent. Stamps, text, and templates always paint with the
//! current color regardless of the active tool.

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use crate::glyphs;
use crate::input::PointerEvent;
use crate::tool::{self, Stamp, Template, Tool};
use crate::{DrawingError, Result};

/// File name offered when exporting a drawing
pub const DEFAULT_EXPORT_FILENAME: &str = "kid-math-drawing.png";

/// Radius of the circle stamp
const CIRCLE_RADIUS: f32 = 50.0;

/// Half the side of the square stamp and of the triangle's base
const HALF_EXTENT: f32 = 50.0;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

const NUMBERS_FONT_PX: u32 = 48;
const COUNTING_FONT_PX: u32 = 36;

/// How painted pixels change
#[derive(Debug, Clone, Copy, PartialEq)]
enum Ink {
    Color(Rgba<u8>),
    Clear,
}

/// Free-draw canvas with tools, stamps, templates, and export
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    image: RgbaImage,
    tool: Tool,
    color: Rgba<u8>,
    brush_size: u32,
    // Last point of the stroke in progress.
    cursor: Option<(f32, f32)>,
}

impl DrawingSurface {
    /// Create a transparent surface with a black 5 px brush
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DrawingError::InvalidSize { width, height });
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, TRANSPARENT),
            tool: Tool::Draw,
            color: Rgba([0, 0, 0, 255]),
            brush_size: tool::DEFAULT_BRUSH_SIZE,
            cursor: None,
        })
    }

    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The underlying raster
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Color of one pixel, if inside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Number of pixels that are not fully transparent
    pub fn painted_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] != 0).count()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// The active tool
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools; a stroke in progress keeps going with the new tool
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// The current color
    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    /// The current color as `#RRGGBB`
    pub fn color_hex(&self) -> String {
        let [r, g, b, _] = self.color.0;
        app_ui::rgb_to_hex(r, g, b)
    }

    /// Set the color from a `#RRGGBB` string; invalid strings change nothing
    pub fn set_color(&mut self, hex: &str) -> Result<()> {
        self.color = tool::parse_color(hex)?;
        Ok(())
    }

    /// Brush width in pixels
    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Set the brush width, clamped to 1..=20; returns the width applied
    pub fn set_brush_size(&mut self, size: u32) -> u32 {
        self.brush_size = tool::clamp_brush_size(size);
        self.brush_size
    }

    // =========================================================================
    // Strokes
    // =========================================================================

    /// Whether a stroke is in progress
    pub fn is_drawing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Feed one pointer event; returns whether any pixel was painted
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { x, y } => {
                self.pointer_down(x, y);
                false
            }
            PointerEvent::Move { x, y } => self.pointer_move(x, y),
            PointerEvent::Up | PointerEvent::Leave => {
                self.pointer_up();
                false
            }
        }
    }

    /// Begin a stroke; nothing is painted until the pointer moves
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.cursor = Some((x, y));
    }

    /// Extend the stroke in progress; returns false when not drawing
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let Some(from) = self.cursor else {
            return false;
        };
        let ink = match self.tool {
            Tool::Draw => Ink::Color(self.color),
            Tool::Eraser => Ink::Clear,
        };
        self.paint_segment(from, (x, y), self.brush_size as f32, ink);
        self.cursor = Some((x, y));
        true
    }

    /// End the stroke in progress
    pub fn pointer_up(&mut self) {
        self.cursor = None;
    }

    // =========================================================================
    // Stamps and Text
    // =========================================================================

    fn center(&self) -> (f32, f32) {
        (self.width() as f32 / 2.0, self.height() as f32 / 2.0)
    }

    /// Outline a shape at the center in the current color and width
    pub fn stamp(&mut self, stamp: Stamp) {
        let (cx, cy) = self.center();
        let width = self.brush_size as f32;
        let ink = Ink::Color(self.color);
        match stamp {
            Stamp::Circle => self.paint_ring((cx, cy), CIRCLE_RADIUS, width, ink),
            Stamp::Square => {
                let corners = [
                    (cx - HALF_EXTENT, cy - HALF_EXTENT),
                    (cx + HALF_EXTENT, cy - HALF_EXTENT),
                    (cx + HALF_EXTENT, cy + HALF_EXTENT),
                    (cx - HALF_EXTENT, cy + HALF_EXTENT),
                ];
                self.paint_closed_path(&corners, width, ink);
            }
            Stamp::Triangle => {
                let corners = [
                    (cx, cy - HALF_EXTENT),
                    (cx - HALF_EXTENT, cy + HALF_EXTENT),
                    (cx + HALF_EXTENT, cy + HALF_EXTENT),
                ];
                self.paint_closed_path(&corners, width, ink);
            }
        }
    }

    /// Write text at the center, sized three times the brush width
    ///
    /// Empty text is a no-op; returns whether anything was written.
    pub fn stamp_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let (cx, cy) = self.center();
        self.draw_text(text, cx, cy, self.brush_size * 3);
        true
    }

    /// Fill text horizontally centered on `x` with its baseline at `y`
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_px: u32) {
        let raster = glyphs::rasterize(text, font_px);
        let left = (x - raster.width as f32 / 2.0).round() as i64;
        let top = (y - raster.height as f32).round() as i64;
        let color = self.color;
        for (dx, dy) in raster.pixels {
            self.put(left + i64::from(dx), top + i64::from(dy), Ink::Color(color));
        }
    }

    // =========================================================================
    // Templates, Clear, Export
    // =========================================================================

    /// Clear the surface and draw a tracing template
    pub fn load_template(&mut self, template: Template) {
        self.clear();
        match template {
            Template::Numbers => {
                for i in 1..=5u32 {
                    let x = 150.0 + (i - 1) as f32 * 120.0;
                    self.draw_text(&i.to_string(), x, 300.0, NUMBERS_FONT_PX);
                }
            }
            Template::Shapes => {
                for stamp in Stamp::ALL {
                    self.stamp(stamp);
                }
            }
            Template::Counting => {
                self.draw_text("1 2 3 4 5", 400.0, 200.0, COUNTING_FONT_PX);
                self.draw_text("6 7 8 9 10", 400.0, 400.0, COUNTING_FONT_PX);
            }
        }
        tracing::debug!(?template, "Loaded drawing template");
    }

    /// Make every pixel transparent
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = TRANSPARENT;
        }
    }

    /// Encode the surface as PNG bytes
    pub fn export_png(&self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
            .map_err(|e| DrawingError::EncodeError(e.to_string()))?;
        Ok(output)
    }

    /// Write the PNG export to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.export_png()?;
        std::fs::write(path, &bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Exported drawing");
        Ok(())
    }

    /// Write the PNG export into a directory under the default file name
    pub fn save_default(&self, dir: impl AsRef<Path>) -> Result<std::path::PathBuf> {
        let path = dir.as_ref().join(DEFAULT_EXPORT_FILENAME);
        self.save(&path)?;
        Ok(path)
    }

    // =========================================================================
    // Rasterization
    // =========================================================================

    fn put(&mut self, x: i64, y: i64, ink: Ink) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        let value = match ink {
            Ink::Color(color) => color,
            Ink::Clear => TRANSPARENT,
        };
        self.image.put_pixel(x as u32, y as u32, value);
    }

    /// Paint every pixel whose center lies within the bounding box and
    /// satisfies `inside`
    fn paint_where(
        &mut self,
        (min_x, min_y): (f32, f32),
        (max_x, max_y): (f32, f32),
        ink: Ink,
        inside: impl Fn(f32, f32) -> bool,
    ) {
        let x0 = min_x.floor().max(0.0) as i64;
        let y0 = min_y.floor().max(0.0) as i64;
        let x1 = (max_x.ceil() as i64).min(i64::from(self.width()) - 1);
        let y1 = (max_y.ceil() as i64).min(i64::from(self.height()) - 1);
        for py in y0..=y1 {
            for px in x0..=x1 {
                if inside(px as f32 + 0.5, py as f32 + 0.5) {
                    self.put(px, py, ink);
                }
            }
        }
    }

    /// Thick segment with round caps
    fn paint_segment(&mut self, from: (f32, f32), to: (f32, f32), width: f32, ink: Ink) {
        let radius = width / 2.0;
        let min = (from.0.min(to.0) - radius, from.1.min(to.1) - radius);
        let max = (from.0.max(to.0) + radius, from.1.max(to.1) + radius);
        self.paint_where(min, max, ink, |x, y| {
            distance_to_segment((x, y), from, to) <= radius
        });
    }

    fn paint_closed_path(&mut self, corners: &[(f32, f32)], width: f32, ink: Ink) {
        for (i, &from) in corners.iter().enumerate() {
            let to = corners[(i + 1) % corners.len()];
            self.paint_segment(from, to, width, ink);
        }
    }

    fn paint_ring(&mut self, center: (f32, f32), radius: f32, width: f32, ink: Ink) {
        let half = width / 2.0;
        let reach = radius + half;
        let min = (center.0 - reach, center.1 - reach);
        let max = (center.0 + reach, center.1 + reach);
        self.paint_where(min, max, ink, |x, y| {
            let distance = ((x - center.0).powi(2) + (y - center.1).powi(2)).sqrt();
            (distance - radius).abs() <= half
        });
    }
}

fn distance_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn surface() -> DrawingSurface {
        DrawingSurface::new(800, 600).unwrap()
    }

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = surface();
        assert_eq!((surface.width(), surface.height()), (800, 600));
        assert_eq!(surface.painted_pixels(), 0);
        assert_eq!(surface.brush_size(), 5);
        assert_eq!(surface.color_hex(), "#000000");
        assert_eq!(surface.tool(), Tool::Draw);
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(
            DrawingSurface::new(0, 10),
            Err(DrawingError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_stroke_paints_between_points() {
        let mut surface = surface();
        surface.pointer_down(10.0, 10.0);
        assert_eq!(surface.painted_pixels(), 0);
        assert!(surface.pointer_move(50.0, 10.0));
        surface.pointer_up();

        assert_eq!(surface.pixel(30, 10), Some(BLACK));
        assert_eq!(surface.pixel(30, 20), Some(TRANSPARENT));
        assert!(!surface.is_drawing());
    }

    #[test]
    fn test_move_without_down_does_nothing() {
        let mut surface = surface();
        assert!(!surface.pointer_move(20.0, 20.0));
        assert_eq!(surface.painted_pixels(), 0);
    }

    #[test]
    fn test_leave_ends_stroke() {
        let mut surface = surface();
        surface.handle(PointerEvent::Down { x: 5.0, y: 5.0 });
        surface.handle(PointerEvent::Leave);
        assert!(!surface.handle(PointerEvent::Move { x: 40.0, y: 40.0 }));
    }

    #[test]
    fn test_brush_size_controls_width() {
        let mut surface = surface();
        assert_eq!(surface.set_brush_size(20), 20);
        surface.pointer_down(100.0, 100.0);
        surface.pointer_move(200.0, 100.0);
        assert_eq!(surface.pixel(150, 108), Some(BLACK));

        let mut thin = self::surface();
        thin.set_brush_size(0);
        assert_eq!(thin.brush_size(), 1);
        thin.pointer_down(100.0, 100.0);
        thin.pointer_move(200.0, 100.0);
        assert_eq!(thin.pixel(150, 108), Some(TRANSPARENT));
    }

    #[test]
    fn test_eraser_clears_to_transparent() {
        let mut surface = surface();
        surface.pointer_down(10.0, 50.0);
        surface.pointer_move(90.0, 50.0);
        surface.pointer_up();
        assert_eq!(surface.pixel(50, 50), Some(BLACK));

        surface.set_tool(Tool::Eraser);
        surface.set_brush_size(20);
        surface.pointer_down(0.0, 50.0);
        surface.pointer_move(100.0, 50.0);
        surface.pointer_up();
        assert_eq!(surface.painted_pixels(), 0);
    }

    #[test]
    fn test_set_color() {
        let mut surface = surface();
        surface.set_color("#FF0000").unwrap();
        assert!(surface.set_color("red").is_err());
        assert_eq!(surface.color_hex(), "#FF0000");

        surface.pointer_down(10.0, 10.0);
        surface.pointer_move(20.0, 10.0);
        assert_eq!(surface.pixel(15, 10), Some(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_circle_stamp() {
        let mut surface = surface();
        surface.stamp(Stamp::Circle);
        assert_eq!(surface.pixel(450, 300), Some(BLACK));
        assert_eq!(surface.pixel(400, 250), Some(BLACK));
        assert_eq!(surface.pixel(400, 300), Some(TRANSPARENT));
    }

    #[test]
    fn test_square_and_triangle_stamps() {
        let mut surface = surface();
        surface.stamp(Stamp::Square);
        assert_eq!(surface.pixel(350, 300), Some(BLACK));
        assert_eq!(surface.pixel(400, 250), Some(BLACK));
        assert_eq!(surface.pixel(400, 300), Some(TRANSPARENT));

        let mut surface = self::surface();
        surface.stamp(Stamp::Triangle);
        assert_eq!(surface.pixel(400, 250), Some(BLACK));
        assert_eq!(surface.pixel(400, 350), Some(BLACK));
        assert_eq!(surface.pixel(400, 300), Some(TRANSPARENT));
    }

    #[test]
    fn test_stamps_ignore_eraser() {
        let mut surface = surface();
        surface.set_tool(Tool::Eraser);
        surface.stamp(Stamp::Circle);
        assert!(surface.painted_pixels() > 0);
    }

    #[test]
    fn test_stamp_text() {
        let mut surface = surface();
        assert!(!surface.stamp_text(""));
        assert_eq!(surface.painted_pixels(), 0);

        assert!(surface.stamp_text("Hi"));
        assert!(surface.painted_pixels() > 0);
        // 15 px text is 7 rows tall and sits on the center baseline.
        let painted_rows: Vec<u32> = (0..600)
            .filter(|&y| (0..800).any(|x| surface.pixel(x, y) != Some(TRANSPARENT)))
            .collect();
        assert_eq!(painted_rows.first(), Some(&293));
        assert_eq!(painted_rows.last(), Some(&299));
    }

    #[test]
    fn test_numbers_template() {
        let mut surface = surface();
        surface.pointer_down(700.0, 50.0);
        surface.pointer_move(780.0, 50.0);
        surface.pointer_up();

        surface.load_template(Template::Numbers);
        // Previous stroke is gone.
        assert_eq!(surface.pixel(740, 50), Some(TRANSPARENT));
        // Bottom bar of the "1" centered on x = 150.
        assert_eq!(surface.pixel(150, 298), Some(BLACK));
        // Bottom bar of the "5" centered on x = 630.
        assert_eq!(surface.pixel(630, 298), Some(BLACK));
    }

    #[test]
    fn test_shapes_template() {
        let mut surface = surface();
        surface.load_template(Template::Shapes);
        assert_eq!(surface.pixel(450, 300), Some(BLACK));
        assert_eq!(surface.pixel(350, 300), Some(BLACK));
    }

    #[test]
    fn test_counting_template() {
        let mut surface = surface();
        surface.load_template(Template::Counting);
        let row_painted = |top: u32, bottom: u32| {
            (top..bottom).any(|y| (0..800).any(|x| surface.pixel(x, y) == Some(BLACK)))
        };
        assert!(row_painted(179, 200));
        assert!(row_painted(379, 400));
        assert!(!row_painted(250, 350));
    }

    #[test]
    fn test_clear() {
        let mut surface = surface();
        surface.stamp(Stamp::Square);
        surface.clear();
        assert_eq!(surface.painted_pixels(), 0);
    }

    #[test]
    fn test_export_png() {
        let mut surface = surface();
        surface.stamp(Stamp::Circle);
        let bytes = surface.export_png().unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (800, 600));
        assert_eq!(*decoded.get_pixel(450, 300), BLACK);
        assert_eq!(*decoded.get_pixel(0, 0), TRANSPARENT);
    }

    #[test]
    fn test_save_default() {
        let dir = tempfile::tempdir().unwrap();
        let surface = surface();
        let path = surface.save_default(dir.path()).unwrap();
        assert!(path.ends_with(DEFAULT_EXPORT_FILENAME));
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
