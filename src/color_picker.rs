use egui::{Color32, ColorImage, Pos2, Rect, Vec2, vec2};
use log::error;

use crate::error::PickError;

/// Returned by [`ColorSampler::pick`] when no real pixel could be read
pub const SENTINEL_COLOR: Color32 = Color32::WHITE;

/// Decoded RGBA pixels in texture space: pixel (0, 0) is the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    // Rows stored bottom to top
    pixels: Vec<Color32>,
}

impl ImageBuffer {
    /// Returns `None` if `pixels` doesn't hold exactly `width * height` entries.
    pub fn new(width: usize, height: usize, pixels: Vec<Color32>) -> Option<Self> {
        (width.checked_mul(height) == Some(pixels.len())).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> Color32) -> Self {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert a decoded image (top row first) into texture space.
    pub fn from_rgba_image(image: &image::RgbaImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        Self::from_fn(width, height, |x, y| {
            let [r, g, b, a] = image.get_pixel(x as u32, (height - 1 - y) as u32).0;
            Color32::from_rgba_unmultiplied(r, g, b, a)
        })
    }

    /// Top-row-first copy for uploading as an egui texture
    pub fn to_color_image(&self) -> ColorImage {
        let mut image = ColorImage::new([self.width, self.height], Color32::TRANSPARENT);
        for y in 0..self.height {
            let src = y * self.width;
            let dst = (self.height - 1 - y) * self.width;
            image.pixels[dst..dst + self.width].copy_from_slice(&self.pixels[src..src + self.width]);
        }
        image
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The whole texture as a crop rectangle
    pub fn full_rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(self.width as f32, self.height as f32))
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }
}

/// A widget's local coordinate space: origin at its centre, y up.
pub trait LocalSpace {
    /// `None` if the conversion isn't possible (e.g. the widget isn't laid out)
    fn screen_to_local(&self, screen_pos: Pos2) -> Option<Vec2>;

    /// Width and height of the widget in local units
    fn size(&self) -> Vec2;
}

/// [`LocalSpace`] for a widget occupying `rect` on screen (egui coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRectWidget {
    rect: Rect,
}

impl ScreenRectWidget {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

impl LocalSpace for ScreenRectWidget {
    fn screen_to_local(&self, screen_pos: Pos2) -> Option<Vec2> {
        if !self.rect.is_finite() || !self.rect.is_positive() || !screen_pos.is_finite() {
            return None;
        }
        let center = self.rect.center();
        Some(vec2(screen_pos.x - center.x, center.y - screen_pos.y))
    }

    fn size(&self) -> Vec2 {
        self.rect.size()
    }
}

/// An image bound to a picker widget, with the sub-rectangle of the texture
/// (in pixels, texture space) that the widget shows.
#[derive(Debug, Clone, Default)]
pub struct Swatch {
    pub image: Option<ImageBuffer>,
    pub crop: Option<Rect>,
}

impl Swatch {
    /// Show the whole image
    pub fn new(image: ImageBuffer) -> Self {
        let crop = Some(image.full_rect());
        Self {
            image: Some(image),
            crop,
        }
    }

    pub fn with_crop(mut self, crop: Rect) -> Self {
        self.crop = Some(crop);
        self
    }
}

/// Outcome of a colour pick. On failure `color` is the sentinel and
/// `diagnostic` says why.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPick {
    pub color: Color32,
    pub diagnostic: Option<PickError>,
}

impl ColorPick {
    pub fn is_fallback(&self) -> bool {
        self.diagnostic.is_some()
    }
}

/// Reads the colour under a click on an image swatch
#[derive(Debug, Clone, Copy)]
pub struct ColorSampler {
    sentinel: Color32,
}

impl Default for ColorSampler {
    fn default() -> Self {
        Self {
            sentinel: SENTINEL_COLOR,
        }
    }
}

impl ColorSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sentinel(&self) -> Color32 {
        self.sentinel
    }

    /// Never fails: problems are logged and reported in [`ColorPick::diagnostic`].
    pub fn pick(
        &self,
        click_screen_pos: Pos2,
        widget: &dyn LocalSpace,
        image: Option<&ImageBuffer>,
        crop: Option<Rect>,
    ) -> ColorPick {
        match self.try_pick(click_screen_pos, widget, image, crop) {
            Ok(color) => ColorPick {
                color,
                diagnostic: None,
            },
            Err(e) => {
                error!("Color pick failed: {}", e);
                ColorPick {
                    color: self.sentinel,
                    diagnostic: Some(e),
                }
            }
        }
    }

    pub fn pick_swatch(&self, click_screen_pos: Pos2, widget: &dyn LocalSpace, swatch: &Swatch) -> ColorPick {
        self.pick(click_screen_pos, widget, swatch.image.as_ref(), swatch.crop)
    }

    pub fn try_pick(
        &self,
        click_screen_pos: Pos2,
        widget: &dyn LocalSpace,
        image: Option<&ImageBuffer>,
        crop: Option<Rect>,
    ) -> Result<Color32, PickError> {
        let image = image.ok_or(PickError::MissingResource("image buffer"))?;
        let crop = crop.ok_or(PickError::MissingResource("crop rectangle"))?;
        let local = widget
            .screen_to_local(click_screen_pos)
            .ok_or(PickError::TransformFailure)?;
        sample_local(local, widget.size(), image, crop)
    }
}

/// Colour at a point in a widget's local space (centre origin, y up).
///
/// The point is normalised against the widget bounds, mapped into `crop` and
/// rounded half-up to a pixel. Points on or beyond the widget edge clamp to
/// the edge pixels of the crop.
pub fn sample_local(
    local: Vec2,
    widget_size: Vec2,
    image: &ImageBuffer,
    crop: Rect,
) -> Result<Color32, PickError> {
    if image.is_empty() {
        return Err(PickError::MissingResource("image pixels"));
    }
    if !crop.is_finite() || !crop.is_positive() {
        return Err(PickError::MissingResource("crop rectangle"));
    }

    let nx = inverse_lerp(-widget_size.x / 2.0, widget_size.x / 2.0, local.x);
    let ny = inverse_lerp(-widget_size.y / 2.0, widget_size.y / 2.0, local.y);

    let x = pixel_coord(crop.min.x, crop.width(), nx, image.width());
    let y = pixel_coord(crop.min.y, crop.height(), ny, image.height());
    let (Some(x), Some(y)) = (x, y) else {
        return Err(PickError::MissingResource("crop lies outside the image"));
    };

    image
        .get_pixel(x, y)
        .ok_or(PickError::MissingResource("image pixels"))
}

fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b || !value.is_finite() {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// Pixel index along one axis, limited to the crop and the texture
fn pixel_coord(start: f32, extent: f32, t: f32, texture_len: usize) -> Option<usize> {
    let lo = start.floor().max(0.0);
    let hi = ((start + extent).ceil() - 1.0).min(texture_len as f32 - 1.0);
    if hi < lo {
        return None;
    }
    let v = (start + extent * t + 0.5).floor();
    Some(v.clamp(lo, hi) as usize)
}
