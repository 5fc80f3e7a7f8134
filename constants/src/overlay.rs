/// Authored pixel size of the monitor surface.
pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 1024.0;

/// Padding between the monitor surface edge and the embedded document.
pub const IFRAME_PADDING: f32 = 32.0;

/// Virtual size of the embedded document used for coordinate remapping.
pub const IFRAME_WIDTH: f32 = SCREEN_WIDTH - IFRAME_PADDING;
pub const IFRAME_HEIGHT: f32 = SCREEN_HEIGHT - IFRAME_PADDING;

/// Monitor surface placement in world units.
pub const SCREEN_POSITION: [f32; 3] = [0.0, 950.0, 255.0];

/// Monitor tilt around X, in degrees.
pub const SCREEN_TILT_DEGREES: f32 = -3.0;

pub const SCREEN_BACKGROUND: &str = "#1d2e2f";

pub const IFRAME_ELEMENT_ID: &str = "computer-screen";
pub const IFRAME_TITLE: &str = "HeffernanOS";
pub const IFRAME_CLASS: &str = "jitter";

pub const EMBEDDED_DOCUMENT_URL: &str = "https://antoninpicard-inner.vercel.app/";
pub const EMBEDDED_DEV_DOCUMENT_URL: &str = "http://localhost:3000/";

/// Id of the element hosting the CSS 3D layer behind the canvas.
pub const CSS_LAYER_ELEMENT_ID: &str = "css";

/// Id of the canvas bevy renders into.
pub const CANVAS_SELECTOR: &str = "#bevy";
