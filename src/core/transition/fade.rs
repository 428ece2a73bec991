//=========================================================================
// Fade Effect
//=========================================================================
//
// Full-screen color fade.
//
// Allocates a 1×1 white texture on setup and stretches it over the whole
// viewport, tinted with `color * progress`. The texture is released once.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{TransitionEffect, TransitionKind};
use crate::core::render::{Color, RenderBackend, TextureId};

//=== FadeEffect ==========================================================

/// Fades the whole viewport to or from a solid color.
#[derive(Debug)]
pub struct FadeEffect {
    color: Color,
    texture: Option<TextureId>,
}

impl FadeEffect {
    pub fn new(color: Color) -> Self {
        Self { color, texture: None }
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl TransitionEffect for FadeEffect {
    fn setup(&mut self, renderer: &mut dyn RenderBackend) {
        if self.texture.is_some() {
            debug!("Fade texture already allocated, skipping setup");
            return;
        }
        self.texture = Some(renderer.create_solid_texture(Color::WHITE));
    }

    fn draw(&self, progress: f32, renderer: &mut dyn RenderBackend) {
        let Some(texture) = self.texture else {
            warn!("Fade drawn before setup, skipping");
            return;
        };

        let bounds = renderer.viewport().bounds();
        renderer.draw_texture(texture, bounds, self.color.scaled(progress));
    }

    fn release(&mut self, renderer: &mut dyn RenderBackend) {
        if let Some(texture) = self.texture.take() {
            renderer.release_texture(texture);
        }
    }

    fn kind(&self) -> TransitionKind {
        TransitionKind::Fade
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
