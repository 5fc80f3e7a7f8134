use bevy::prelude::*;
use constants::overlay::{
    CANVAS_SELECTOR, CSS_LAYER_ELEMENT_ID, IFRAME_CLASS, IFRAME_ELEMENT_ID, IFRAME_HEIGHT,
    IFRAME_TITLE, IFRAME_WIDTH, SCREEN_BACKGROUND,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlIFrameElement};

use crate::engine::core::runtime_config::RuntimeConfig;
use crate::engine::overlay::css3d::CssLayerStyles;
use crate::engine::overlay::placement::OverlayPlacement;
use crate::rpc::surface_bridge::{SurfaceEventQueue, register_host_listeners, register_message_listener};

/// Elements of the CSS 3D layer, kept for per-frame style updates.
pub struct OverlayDom {
    viewer: HtmlElement,
    camera: HtmlElement,
    object: HtmlElement,
}

impl OverlayDom {
    pub fn apply(&self, styles: &CssLayerStyles) -> Result<(), JsValue> {
        self.viewer
            .style()
            .set_property("perspective", &format!("{}px", styles.perspective))?;
        self.camera.style().set_property("transform", &styles.camera)?;
        self.object.style().set_property("transform", &styles.object)?;
        Ok(())
    }
}

fn create_html(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)
}

fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = element.style();
    for (property, value) in styles {
        style.set_property(property, value)?;
    }
    Ok(())
}

fn create_iframe(document: &Document, placement: &OverlayPlacement, url: &str) -> Result<HtmlIFrameElement, JsValue> {
    let iframe = document
        .create_element("iframe")?
        .dyn_into::<HtmlIFrameElement>()
        .map_err(JsValue::from)?;

    iframe.set_src(url);
    iframe.set_id(IFRAME_ELEMENT_ID);
    iframe.set_title(IFRAME_TITLE);
    iframe.set_class_name(IFRAME_CLASS);

    let styles = placement.iframe_styles();
    let styles: Vec<(&str, &str)> = styles
        .iter()
        .map(|(property, value)| (*property, value.as_str()))
        .collect();
    set_styles(&iframe, &styles)?;
    Ok(iframe)
}

/// Builds the CSS layer behind the canvas and wires its event listeners.
pub fn build_overlay_dom(
    placement: &OverlayPlacement,
    config: &RuntimeConfig,
    queue: &SurfaceEventQueue,
) -> Result<OverlayDom, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let viewer = create_html(&document, "div")?;
    viewer.set_id(CSS_LAYER_ELEMENT_ID);
    set_styles(
        &viewer,
        &[
            ("position", "absolute"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("overflow", "hidden"),
            ("z-index", "0"),
        ],
    )?;

    let camera = create_html(&document, "div")?;
    set_styles(
        &camera,
        &[
            ("width", "100%"),
            ("height", "100%"),
            ("transform-style", "preserve-3d"),
            ("pointer-events", "none"),
        ],
    )?;

    let object = create_html(&document, "div")?;
    let width = format!("{}px", placement.size.x);
    let height = format!("{}px", placement.size.y);
    set_styles(
        &object,
        &[
            ("position", "absolute"),
            ("width", width.as_str()),
            ("height", height.as_str()),
            ("background", SCREEN_BACKGROUND),
            ("pointer-events", "auto"),
        ],
    )?;

    let iframe = create_iframe(&document, placement, config.embedded_document_url())?;
    object.append_child(&iframe)?;
    camera.append_child(&object)?;
    viewer.append_child(&camera)?;
    body.insert_before(&viewer, body.first_child().as_ref())?;

    // The canvas stays on top for drawing but lets pointer input reach the document.
    if let Some(canvas) = document
        .query_selector(CANVAS_SELECTOR)?
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    {
        set_styles(
            &canvas,
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("left", "0"),
                ("z-index", "1"),
                ("pointer-events", "none"),
            ],
        )?;
    } else {
        warn!("Canvas {} not found, overlay may be hidden", CANVAS_SELECTOR);
    }

    register_host_listeners(&document, queue)?;
    register_message_listener(
        &window,
        &iframe,
        Vec2::new(IFRAME_WIDTH, IFRAME_HEIGHT),
        queue,
    )?;

    Ok(OverlayDom {
        viewer,
        camera,
        object,
    })
}
