//! Option button geometry and hit-testing
//!
//! Three horizontal bands stacked vertically. Edges follow the half-open
//! convention of [`Rect::contains`]: a press on the left or top edge pixel
//! hits, a press on the right or bottom edge pixel does not.

use glam::Vec2;

use crate::bank::OptionKey;
use crate::consts::*;
use crate::renderer::Rect;

/// Vertical centre of the band for `key`
pub fn option_center_y(key: OptionKey) -> f32 {
    OPTION_FIRST_Y + key.index() as f32 * OPTION_SPACING
}

/// Band occupied by the button for `key`
pub fn option_rect(key: OptionKey) -> Rect {
    Rect::new(
        OPTION_MARGIN_X,
        option_center_y(key) - OPTION_HALF_HEIGHT,
        VIEWPORT_WIDTH - 2.0 * OPTION_MARGIN_X,
        2.0 * OPTION_HALF_HEIGHT,
    )
}

/// Which option, if any, lies under `pos`
pub fn hit_test(pos: Vec2) -> Option<OptionKey> {
    OptionKey::ALL
        .into_iter()
        .find(|key| option_rect(*key).contains(pos))
}
