//! Layered render surfaces backed by owned pixel buffers.
//!
//! # Layer Model
//!
//! Each instrument owns one [`LayerSurface`] holding two [`FrameLayer`]
//! buffers:
//!
//! | Layer     | Contents                         | Repainted when          |
//! |-----------|----------------------------------|-------------------------|
//! | static    | dial face, ticks, labels, frame  | config / size changes   |
//! | composite | static copy + needle/fill/digits | display value changes   |
//!
//! A dynamic repaint starts by copying the cached static buffer into the
//! composite, then paints the value-dependent elements on top. Presenting
//! blits the composite to the host display in one `fill_contiguous` call.
//!
//! # Pixel Scale
//!
//! Buffers are allocated at `logical * pixel_scale` physical pixels, with
//! the scale clamped to [`MAX_PIXEL_SCALE`] to bound memory (a 220x220
//! gauge at scale 2 is already 190 KiB per layer in Rgb565). Painters
//! always draw in logical coordinates; the `DrawTarget` impl expands each
//! logical pixel to a `scale x scale` block.
//!
//! # Resource Release
//!
//! [`LayerSurface::release`] frees both buffers. Each instrument owns an
//! independent surface, so a surface that outlives its instrument is a
//! real leak, not a style issue. `Drop` releases as a backstop.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};
use tracing::debug;

use crate::{colors::BLACK, config::MAX_PIXEL_SCALE, error::SetupError};

// =============================================================================
// FrameLayer
// =============================================================================

/// One owned pixel buffer, drawable through `embedded-graphics`.
///
/// Logical coordinates in, physical pixels stored. Out-of-bounds pixels
/// are discarded, matching the clipping behavior of hardware displays.
pub struct FrameLayer {
    buffer: Vec<Rgb565>,
    logical: Size,
    scale: u32,
}

impl FrameLayer {
    fn new(logical: Size, scale: u32) -> Self {
        let physical = (logical.width * scale * logical.height * scale) as usize;
        Self { buffer: vec![BLACK; physical], logical, scale }
    }

    /// Fill the whole layer with one color.
    pub fn clear_to(&mut self, color: Rgb565) {
        self.buffer.fill(color);
    }

    fn copy_from(&mut self, other: &FrameLayer) {
        debug_assert_eq!(self.buffer.len(), other.buffer.len());
        self.buffer.copy_from_slice(&other.buffer);
    }

    /// Physical pixel at a logical coordinate (top-left sample of the
    /// scale block). Used by presentation.
    #[inline]
    fn sample(&self, x: u32, y: u32) -> Rgb565 {
        let px = x * self.scale;
        let py = y * self.scale;
        self.buffer[(py * self.logical.width * self.scale + px) as usize]
    }
}

impl OriginDimensions for FrameLayer {
    fn size(&self) -> Size {
        self.logical
    }
}

impl DrawTarget for FrameLayer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let stride = self.logical.width * self.scale;
        for Pixel(point, color) in pixels {
            if point.x < 0
                || point.y < 0
                || point.x >= self.logical.width as i32
                || point.y >= self.logical.height as i32
            {
                continue;
            }
            let base_x = point.x as u32 * self.scale;
            let base_y = point.y as u32 * self.scale;
            for dy in 0..self.scale {
                let row = (base_y + dy) * stride + base_x;
                for dx in 0..self.scale {
                    self.buffer[(row + dx) as usize] = color;
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// LayerSurface
// =============================================================================

/// The pair of layers an instrument renders through.
pub struct LayerSurface {
    static_layer: FrameLayer,
    composite: FrameLayer,
    logical: Size,
    scale: u32,
    released: bool,
}

impl LayerSurface {
    /// Allocate both layers for a container of `logical` size.
    ///
    /// Fails on a zero-area container (there is no drawing context to
    /// create). The pixel scale clamps into `1..=MAX_PIXEL_SCALE`.
    pub fn new(logical: Size, pixel_scale: u32) -> Result<Self, SetupError> {
        if logical.width == 0 || logical.height == 0 {
            return Err(SetupError::EmptyContainer {
                width: logical.width,
                height: logical.height,
            });
        }
        let scale = pixel_scale.clamp(1, MAX_PIXEL_SCALE);
        debug!(width = logical.width, height = logical.height, scale, "allocating layer surface");
        Ok(Self {
            static_layer: FrameLayer::new(logical, scale),
            composite: FrameLayer::new(logical, scale),
            logical,
            scale,
            released: false,
        })
    }

    /// Logical size the painters see.
    #[inline]
    pub const fn logical_size(&self) -> Size {
        self.logical
    }

    /// Reallocate both layers for a new container size. The caller is
    /// responsible for redrawing both layers exactly once afterward; no
    /// drawing happens here, so a resize never renders against buffers of
    /// inconsistent size.
    pub fn resize(&mut self, logical: Size) -> Result<(), SetupError> {
        if logical.width == 0 || logical.height == 0 {
            return Err(SetupError::EmptyContainer {
                width: logical.width,
                height: logical.height,
            });
        }
        self.static_layer = FrameLayer::new(logical, self.scale);
        self.composite = FrameLayer::new(logical, self.scale);
        self.logical = logical;
        Ok(())
    }

    /// Repaint the cached static layer.
    pub fn draw_static(&mut self, painter: impl FnOnce(&mut FrameLayer)) {
        if self.released {
            return;
        }
        self.static_layer.clear_to(BLACK);
        painter(&mut self.static_layer);
    }

    /// Recomposite: copy the cached static layer, then paint the dynamic
    /// elements on top.
    pub fn draw_dynamic(&mut self, painter: impl FnOnce(&mut FrameLayer)) {
        if self.released {
            return;
        }
        self.composite.copy_from(&self.static_layer);
        painter(&mut self.composite);
    }

    /// Blit the composite to the host display with its top-left corner at
    /// `origin`.
    pub fn present<D>(&self, target: &mut D, origin: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.released {
            return Ok(());
        }
        let area = Rectangle::new(origin, self.logical);
        let composite = &self.composite;
        target.fill_contiguous(
            &area,
            (0..self.logical.height)
                .flat_map(move |y| (0..self.logical.width).map(move |x| composite.sample(x, y))),
        )
    }

    /// Free both pixel buffers. Further draw/present calls are no-ops.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.static_layer.buffer = Vec::new();
        self.composite.buffer = Vec::new();
        self.released = true;
        debug!("layer surface released");
    }
}

impl Drop for LayerSurface {
    fn drop(&mut self) {
        self.release();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
