//=========================================================================
// Recording Renderer
//=========================================================================
//
// Headless `RenderBackend` that records every call instead of drawing.
//
// Used by tests to assert draw order and texture lifetimes, and by hosts
// that want to run the screen system without a graphics device.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::warn;

//=== Internal Dependencies ===============================================

use super::{Color, Rect, RenderBackend, TextureId, Viewport};

//=== DrawCommand =========================================================

/// A single recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginBatch,
    EndBatch,
    DrawTexture {
        texture: TextureId,
        dest: Rect,
        tint: Color,
    },
    /// Free-form marker pushed by screen draw hooks.
    Marker(String),
}

//=== RecordingRenderer ===================================================

/// Backend that logs draw calls and tracks live textures.
#[derive(Debug)]
pub struct RecordingRenderer {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
    textures: HashMap<TextureId, Color>,
    next_texture: u64,
    released: usize,
}

impl RecordingRenderer {
    /// Creates a renderer reporting the given viewport size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            commands: Vec::new(),
            textures: HashMap::new(),
            next_texture: 1,
            released: 0,
        }
    }

    /// Records a marker so screen hooks can show up in the command log.
    pub fn mark(&mut self, label: impl Into<String>) {
        self.commands.push(DrawCommand::Marker(label.into()));
    }

    /// Commands recorded since the last [`RecordingRenderer::clear`].
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Labels of recorded markers, in order.
    pub fn markers(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Marker(label) => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Forgets recorded commands; textures are kept.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of textures allocated and not yet released.
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    /// Number of successful `release_texture` calls.
    pub fn released_textures(&self) -> usize {
        self.released
    }

    /// Fill color of a live texture.
    pub fn texture_color(&self, texture: TextureId) -> Option<Color> {
        self.textures.get(&texture).copied()
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl RenderBackend for RecordingRenderer {
    fn begin_batch(&mut self) {
        self.commands.push(DrawCommand::BeginBatch);
    }

    fn end_batch(&mut self) {
        self.commands.push(DrawCommand::EndBatch);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn create_solid_texture(&mut self, color: Color) -> TextureId {
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(id, color);
        id
    }

    fn release_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_some() {
            self.released += 1;
        } else {
            warn!("Release of unknown texture {:?} ignored", texture);
        }
    }

    fn draw_texture(&mut self, texture: TextureId, dest: Rect, tint: Color) {
        self.commands.push(DrawCommand::DrawTexture { texture, dest, tint });
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
