//=========================================================================
// Rendering Contract
//=========================================================================
//
// Boundary between screens/transitions and whatever draws pixels.
//
// The screen system never talks to a GPU directly. Concrete transition
// effects and screen draw hooks go through `RenderBackend`, which a host
// implements for its graphics stack (or uses `RecordingRenderer` headless).
//
// Architecture:
//   ScreenManager<K, R: RenderBackend>
//     ├─ ScreenSlot::draw_internal(&mut dyn RenderBackend)
//     │     └─ begin_batch() … end_batch()
//     └─ Transition::draw(&mut dyn RenderBackend)
//           └─ TransitionEffect::draw → draw_texture()
//
//=========================================================================

//=== Module Declarations =================================================

mod recording;

//=== Public API ==========================================================

pub use recording::{DrawCommand, RecordingRenderer};

//=== Color ===============================================================

/// Linear RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Multiplies every channel by `factor` (premultiplied-alpha fade).
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a * factor,
        }
    }
}

//=== Geometry ============================================================

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Current drawable surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rectangle covering the whole viewport.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

//=== TextureId ===========================================================

/// Opaque handle to a texture owned by a [`RenderBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

//=== RenderBackend =======================================================

/// Drawing capabilities required by screens and transition effects.
///
/// Implementations are owned by the [`crate::core::screen::ScreenManager`]
/// and handed out as `&mut dyn RenderBackend` during draw dispatch. They
/// must be `Send` so the manager can live on the engine's logic thread.
pub trait RenderBackend: Send {
    /// Opens a batched draw pass.
    fn begin_batch(&mut self);

    /// Flushes and closes the current batched draw pass.
    fn end_batch(&mut self);

    /// Reports the current drawable size.
    fn viewport(&self) -> Viewport;

    /// Allocates a 1×1 texture filled with `color`.
    fn create_solid_texture(&mut self, color: Color) -> TextureId;

    /// Frees a texture previously returned by `create_solid_texture`.
    fn release_texture(&mut self, texture: TextureId);

    /// Draws `texture` stretched over `dest`, multiplied by `tint`.
    fn draw_texture(&mut self, texture: TextureId, dest: Rect, tint: Color);

    /// Called when the host surface changes size.
    ///
    /// Default implementation does nothing.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_multiplies_all_channels() {
        let color = Color::rgba(1.0, 0.5, 0.0, 1.0).scaled(0.5);
        assert_eq!(color, Color::rgba(0.5, 0.25, 0.0, 0.5));
    }

    #[test]
    fn viewport_bounds_start_at_origin() {
        assert_eq!(Viewport::new(800, 600).bounds(), Rect::new(0, 0, 800, 600));
    }
}
