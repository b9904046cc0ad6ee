use std::collections::BTreeMap;

use crate::{
    foundation::core::{DISPLAY_HEIGHT, GColor8, GRect, RowBand},
    foundation::error::{WatchError, WatchResult},
    graphics::text::{FontKey, MAX_TEXT_SCALE, TextAlignment, TextOverflowMode, TextStyle},
};

/// Resource id the animation is looked up under unless configured otherwise.
pub const DEFAULT_ANIMATION_ID: &str = "ANIMATION";

/// Everything that describes one watchface, loadable from JSON.
///
/// Every field has a default, so `{}` describes the stock face: a black screen with
/// white `08:39` and the animation masked into rows 50..100.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaceConfig {
    /// Resource manifest: id -> path relative to the config file.
    pub resources: BTreeMap<String, String>,
    /// Resource id of the animation.
    pub animation: String,
    /// Text drawn over the background.
    pub clock_text: String,
    /// Background fill.
    pub background: GColor8,
    /// Text colour.
    pub text_color: GColor8,
    /// Box the text is laid out in.
    pub text_rect: GRect,
    /// Built-in font.
    pub font: FontKey,
    /// Glyph magnification.
    pub text_scale: u32,
    /// Overflow behaviour of the text run.
    pub overflow: TextOverflowMode,
    /// Horizontal alignment of the text run.
    pub alignment: TextAlignment,
    /// Rows merged with the animation frame.
    pub mask_band: RowBand,
    /// Delay before the first frame of each pass, in milliseconds.
    pub first_frame_delay_ms: u32,
}

impl Default for FaceConfig {
    fn default() -> Self {
        let text = TextStyle::default();
        Self {
            resources: BTreeMap::new(),
            animation: DEFAULT_ANIMATION_ID.to_string(),
            clock_text: "08:39".to_string(),
            background: GColor8::BLACK,
            text_color: GColor8::WHITE,
            text_rect: GRect::new(0, 50, 144, 118),
            font: text.font,
            text_scale: text.scale,
            overflow: text.overflow,
            alignment: text.alignment,
            mask_band: RowBand::default(),
            first_frame_delay_ms: 1,
        }
    }
}

impl FaceConfig {
    /// Parse JSON and validate the result.
    pub fn from_json_str(json: &str) -> WatchResult<Self> {
        let cfg: FaceConfig = serde_json::from_str(json)
            .map_err(|e| WatchError::validation(format!("face config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Text style assembled from the individual font fields.
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font: self.font,
            scale: self.text_scale,
            overflow: self.overflow,
            alignment: self.alignment,
        }
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> WatchResult<()> {
        for (id, path) in &self.resources {
            if id.trim().is_empty() {
                return Err(WatchError::validation("resource ids must be non-empty"));
            }
            validate_rel_source(path, &format!("resources.{id}"))?;
        }
        if !self.resources.is_empty() && !self.resources.contains_key(&self.animation) {
            return Err(WatchError::validation(format!(
                "animation '{}' is not listed in resources",
                self.animation
            )));
        }
        if self.text_scale == 0 || self.text_scale > MAX_TEXT_SCALE {
            return Err(WatchError::validation(format!(
                "text_scale must be in 1..={MAX_TEXT_SCALE}"
            )));
        }
        if self.text_rect.is_empty() {
            return Err(WatchError::validation("text_rect must have w>0 and h>0"));
        }
        if self.mask_band.start >= self.mask_band.end {
            return Err(WatchError::validation("mask_band start must be < end"));
        }
        if self.mask_band.end > DISPLAY_HEIGHT {
            return Err(WatchError::validation(format!(
                "mask_band end must be <= {DISPLAY_HEIGHT}"
            )));
        }
        Ok(())
    }
}

fn validate_rel_source(source: &str, field: &str) -> WatchResult<()> {
    if source.trim().is_empty() {
        return Err(WatchError::validation(format!("{field} must be non-empty")));
    }
    let s = source.replace('\\', "/");
    if s.starts_with('/') || s.chars().nth(1) == Some(':') {
        return Err(WatchError::validation(format!(
            "{field} must be a relative path"
        )));
    }
    if s.split('/').any(|part| part == "..") {
        return Err(WatchError::validation(format!(
            "{field} must not contain '..'"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/config/face.rs"]
mod tests;
