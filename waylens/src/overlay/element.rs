//! Renderer-facing output types.

use serde::{Deserialize, Serialize};

use crate::catalogue::Category;

/// Device viewport in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Position on screen in viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

/// Discrete element size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl std::fmt::Display for SizeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeClass::Small => write!(f, "small"),
            SizeClass::Medium => write!(f, "medium"),
            SizeClass::Large => write!(f, "large"),
        }
    }
}

/// Opaque style token; the renderer maps it to actual colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorHint {
    /// Go/continue (route guidance).
    Affirmative,
    /// Draws the eye (deals).
    Attention,
    /// Neutral brand styling (venues).
    Brand,
}

impl ColorHint {
    pub fn token(&self) -> &'static str {
        match self {
            ColorHint::Affirmative => "affirmative",
            ColorHint::Attention => "attention",
            ColorHint::Brand => "brand",
        }
    }
}

/// One annotated object for one frame.
///
/// A pure function of pose, object and settings; it has no identity beyond
/// the frame it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArElement {
    /// Mirrors the source object's id.
    pub id: String,
    pub category: Category,
    pub screen_position: ScreenPosition,
    pub distance_meters: f64,
    /// Bearing relative to the heading, `[-180, 180)`.
    pub relative_bearing_degrees: f64,
    pub size_class: SizeClass,
    pub priority: i32,
    pub color_hint: ColorHint,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_validity() {
        assert!(Viewport::new(1080.0, 1920.0).is_valid());
        assert!(Viewport::new(0.0, 0.0).is_valid());
        assert!(!Viewport::new(-1.0, 100.0).is_valid());
        assert!(!Viewport::new(f64::NAN, 100.0).is_valid());
    }

    #[test]
    fn test_color_tokens_match_serialized_form() {
        for hint in [ColorHint::Affirmative, ColorHint::Attention, ColorHint::Brand] {
            let json = serde_json::to_string(&hint).unwrap();
            assert_eq!(json, format!("\"{}\"", hint.token()));
        }
    }
}
