use bevy::prelude::*;
use constants::overlay::{IFRAME_PADDING, SCREEN_HEIGHT, SCREEN_POSITION, SCREEN_TILT_DEGREES, SCREEN_WIDTH};

/// Position, rotation and pixel size of the monitor surface.
///
/// The DOM object and the occlusion plane are both derived from this one value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    pub position: Vec3,
    pub rotation: Quat,
    pub size: Vec2,
}

impl OverlayPlacement {
    pub fn monitor() -> Self {
        Self {
            position: Vec3::from_array(SCREEN_POSITION),
            rotation: Quat::from_rotation_x(SCREEN_TILT_DEGREES.to_radians()),
            size: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: self.rotation,
            scale: Vec3::ONE,
        }
    }

    /// Inline styles of the iframe filling the surface; the padding sits
    /// inside the surface size.
    pub fn iframe_styles(&self) -> Vec<(&'static str, String)> {
        vec![
            ("width", format!("{}px", self.size.x)),
            ("height", format!("{}px", self.size.y)),
            ("padding", format!("{}px", IFRAME_PADDING)),
            ("box-sizing", "border-box".to_owned()),
            ("border", "0".to_owned()),
            ("background", "black".to_owned()),
            ("opacity", "1".to_owned()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(styles: &[(&'static str, String)], property: &str) -> Option<String> {
        styles
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.clone())
    }

    #[test]
    fn iframe_fills_the_surface_with_full_padding() {
        let styles = OverlayPlacement::monitor().iframe_styles();
        assert_eq!(style(&styles, "width").as_deref(), Some("1280px"));
        assert_eq!(style(&styles, "height").as_deref(), Some("1024px"));
        assert_eq!(style(&styles, "padding").as_deref(), Some("32px"));
        assert_eq!(style(&styles, "box-sizing").as_deref(), Some("border-box"));
    }
}
