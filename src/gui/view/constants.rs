//! View constants (layout/sizing).

pub(crate) const WINDOW_W: f32 = 600.0;
pub(crate) const WINDOW_H: f32 = 300.0;

pub(crate) const PADDING: f32 = 12.0;
pub(crate) const ROW_SPACING: f32 = 10.0;

pub(crate) const BUTTON_SIZE: f32 = 40.0;
pub(crate) const GLYPH_TEXT: f32 = 18.0;

pub(crate) const VOLUME_SLIDER_W: f32 = 150.0;

pub(crate) const LABEL_TEXT: f32 = 16.0;
pub(crate) const SMALL_TEXT: f32 = 12.0;
