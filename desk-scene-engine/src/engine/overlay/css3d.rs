use bevy::prelude::*;

/// Styles applied to the CSS layer for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CssLayerStyles {
    /// `perspective` of the viewer element, in px.
    pub perspective: f32,
    /// `transform` of the camera element.
    pub camera: String,
    /// `transform` of the object element.
    pub object: String,
}

fn epsilon(value: f32) -> f32 {
    if value.abs() < 1e-10 { 0.0 } else { value }
}

fn matrix3d(elements: [f32; 16]) -> String {
    let values: Vec<String> = elements
        .iter()
        .map(|value| epsilon(*value).to_string())
        .collect();
    format!("matrix3d({})", values.join(","))
}

/// Distance from the eye to the projection plane in CSS pixels.
pub fn css_perspective(clip_from_view: &Mat4, viewport_height: f32) -> f32 {
    clip_from_view.y_axis.y * viewport_height * 0.5
}

/// The view matrix with Y flipped into CSS's downward axis.
pub fn camera_css_matrix(view_from_world: &Mat4) -> String {
    let e = view_from_world.to_cols_array();
    matrix3d([
        e[0], -e[1], e[2], e[3], e[4], -e[5], e[6], e[7], e[8], -e[9], e[10], e[11], e[12], -e[13],
        e[14], e[15],
    ])
}

/// The object's world matrix with its Y basis flipped.
pub fn object_css_matrix(world_from_local: &Mat4) -> String {
    let e = world_from_local.to_cols_array();
    matrix3d([
        e[0], e[1], e[2], e[3], -e[4], -e[5], -e[6], -e[7], e[8], e[9], e[10], e[11], e[12], e[13],
        e[14], e[15],
    ])
}

pub fn layer_styles(
    world_from_camera: &Mat4,
    clip_from_view: &Mat4,
    viewport: Vec2,
    world_from_object: &Mat4,
) -> CssLayerStyles {
    let perspective = css_perspective(clip_from_view, viewport.y);
    let view_from_world = world_from_camera.inverse();

    CssLayerStyles {
        perspective,
        camera: format!(
            "translateZ({}px) {} translate({}px,{}px)",
            perspective,
            camera_css_matrix(&view_from_world),
            viewport.x * 0.5,
            viewport.y * 0.5
        ),
        object: format!(
            "translate(-50%,-50%) {}",
            object_css_matrix(world_from_object)
        ),
    }
}
