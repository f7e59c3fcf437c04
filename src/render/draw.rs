use macroquad::prelude::*;

use crate::error::AnimationError;
use crate::player::AnimationSet;

impl<T> AnimationSet<T> {
    /// Texture parameters selecting the current frame, sized to one tile.
    pub fn draw_params(&self) -> Result<DrawTextureParams, AnimationError> {
        let src = self.visible_rect()?;
        Ok(DrawTextureParams {
            source: Some(src),
            dest_size: Some(vec2(src.w, src.h)),
            ..Default::default()
        })
    }

    /// Screen position for a sprite anchored at `(x, y)`, shifted by the
    /// active clip's draw offset.
    pub fn draw_position(&self, x: f32, y: f32) -> Result<Vec2, AnimationError> {
        Ok(vec2(x, y) + self.active_clip()?.offset_vec())
    }
}

impl AnimationSet<Texture2D> {
    /// Draws the current frame at `(x, y)`.
    pub fn draw(&self, x: f32, y: f32) -> Result<(), AnimationError> {
        self.draw_ex(x, y, WHITE, self.draw_params()?)
    }

    /// Draws the current frame with caller supplied tint and params. The
    /// frame's source rect always overrides `params.source`.
    pub fn draw_ex(
        &self,
        x: f32,
        y: f32,
        color: Color,
        params: DrawTextureParams,
    ) -> Result<(), AnimationError> {
        let pos = self.draw_position(x, y)?;
        let params = DrawTextureParams {
            source: Some(self.visible_rect()?),
            ..params
        };
        draw_texture_ex(self.texture(), pos.x, pos.y, color, params);
        Ok(())
    }
}

/// Draws `sets` in ascending layer order, each at its paired position.
/// Idle sets are skipped.
pub fn draw_layered(sets: &[(&AnimationSet<Texture2D>, Vec2)]) {
    let mut active: Vec<_> = sets
        .iter()
        .filter_map(|(set, pos)| set.active_clip().ok().map(|c| (c.layer(), *set, *pos)))
        .collect();
    active.sort_by_key(|(layer, _, _)| *layer);

    for (_, set, pos) in active {
        if let Err(e) = set.draw(pos.x, pos.y) {
            log::warn!("skipping sprite: {e}");
        }
    }
}
