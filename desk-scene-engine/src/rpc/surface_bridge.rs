use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use serde::Deserialize;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, HtmlIFrameElement, MessageEvent, MouseEvent, Window};

/// Message posted by the embedded document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmbeddedMessage {
    Mousemove {
        #[serde(rename = "clientX", default)]
        client_x: f32,
        #[serde(rename = "clientY", default)]
        client_y: f32,
    },
    Mousedown,
    Mouseup,
    Keydown {
        #[serde(default)]
        key: String,
    },
    Keyup {
        #[serde(default)]
        key: String,
    },
}

/// `None` for malformed JSON and unknown message types.
pub fn parse_embedded_message(raw: &str) -> Option<EmbeddedMessage> {
    serde_json::from_str(raw).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOrigin {
    Host,
    EmbeddedSurface,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEventKind {
    /// Pointer position in host client coordinates.
    PointerMove { position: Vec2 },
    PointerDown,
    PointerUp,
    KeyDown { key: String },
    KeyUp { key: String },
}

/// Pointer or keyboard activity, already in host coordinates.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SurfaceEvent {
    pub origin: EventOrigin,
    pub kind: SurfaceEventKind,
}

/// Where the embedded document is currently drawn on the host page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub origin: Vec2,
    pub size: Vec2,
}

/// Maps a point in the embedded document's virtual pixels onto the host page.
pub fn remap_to_host(local: Vec2, rendered: &SurfaceRect, virtual_size: Vec2) -> Vec2 {
    (local * (rendered.size / virtual_size) + rendered.origin).round()
}

impl SurfaceEvent {
    pub fn host(kind: SurfaceEventKind) -> Self {
        Self {
            origin: EventOrigin::Host,
            kind,
        }
    }

    pub fn from_embedded(message: EmbeddedMessage, rendered: &SurfaceRect, virtual_size: Vec2) -> Self {
        let kind = match message {
            EmbeddedMessage::Mousemove { client_x, client_y } => SurfaceEventKind::PointerMove {
                position: remap_to_host(Vec2::new(client_x, client_y), rendered, virtual_size),
            },
            EmbeddedMessage::Mousedown => SurfaceEventKind::PointerDown,
            EmbeddedMessage::Mouseup => SurfaceEventKind::PointerUp,
            EmbeddedMessage::Keydown { key } => SurfaceEventKind::KeyDown { key },
            EmbeddedMessage::Keyup { key } => SurfaceEventKind::KeyUp { key },
        };
        Self {
            origin: EventOrigin::EmbeddedSurface,
            kind,
        }
    }
}

/// Thread-safe queue filled by DOM callbacks and drained once per frame.
#[derive(Resource, Clone, Default)]
pub struct SurfaceEventQueue(Arc<Mutex<Vec<SurfaceEvent>>>);

impl SurfaceEventQueue {
    pub fn push(&self, event: SurfaceEvent) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(event);
        }
    }

    pub fn drain(&self) -> Vec<SurfaceEvent> {
        self.0
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }
}

pub struct SurfaceBridgePlugin;

impl Plugin for SurfaceBridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceEventQueue>()
            .add_event::<SurfaceEvent>()
            .add_systems(PreUpdate, forward_surface_events);

        #[cfg(not(target_arch = "wasm32"))]
        app.add_systems(PreUpdate, forward_native_pointer.before(forward_surface_events));
    }
}

pub fn forward_surface_events(
    queue: Res<SurfaceEventQueue>,
    mut surface_events: EventWriter<SurfaceEvent>,
) {
    for event in queue.drain() {
        surface_events.write(event);
    }
}

/// Natively there is no embedded document; window input is host input.
#[cfg(not(target_arch = "wasm32"))]
fn forward_native_pointer(
    mut cursor_moves: EventReader<bevy::window::CursorMoved>,
    mut buttons: EventReader<bevy::input::mouse::MouseButtonInput>,
    queue: Res<SurfaceEventQueue>,
) {
    for moved in cursor_moves.read() {
        queue.push(SurfaceEvent::host(SurfaceEventKind::PointerMove {
            position: moved.position,
        }));
    }
    for button in buttons.read() {
        queue.push(SurfaceEvent::host(if button.state.is_pressed() {
            SurfaceEventKind::PointerDown
        } else {
            SurfaceEventKind::PointerUp
        }));
    }
}

/// Forwards the host page's own pointer activity.
#[cfg(target_arch = "wasm32")]
pub fn register_host_listeners(document: &Document, queue: &SurfaceEventQueue) -> Result<(), JsValue> {
    let move_queue = queue.clone();
    let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
        move_queue.push(SurfaceEvent::host(SurfaceEventKind::PointerMove {
            position: Vec2::new(event.client_x() as f32, event.client_y() as f32),
        }));
    }) as Box<dyn FnMut(MouseEvent)>);

    let down_queue = queue.clone();
    let on_down = Closure::wrap(Box::new(move |_event: MouseEvent| {
        down_queue.push(SurfaceEvent::host(SurfaceEventKind::PointerDown));
    }) as Box<dyn FnMut(MouseEvent)>);

    let up_queue = queue.clone();
    let on_up = Closure::wrap(Box::new(move |_event: MouseEvent| {
        up_queue.push(SurfaceEvent::host(SurfaceEventKind::PointerUp));
    }) as Box<dyn FnMut(MouseEvent)>);

    document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    document.add_event_listener_with_callback("mousedown", on_down.as_ref().unchecked_ref())?;
    document.add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref())?;

    // Listeners live as long as the page.
    on_move.forget();
    on_down.forget();
    on_up.forget();
    Ok(())
}

/// Forwards messages posted by the embedded document, remapped against the
/// iframe's live on-screen rectangle.
#[cfg(target_arch = "wasm32")]
pub fn register_message_listener(
    window: &Window,
    iframe: &HtmlIFrameElement,
    virtual_size: Vec2,
    queue: &SurfaceEventQueue,
) -> Result<(), JsValue> {
    let queue = queue.clone();
    let iframe = iframe.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        let data = event.data();
        let raw = match data.as_string() {
            Some(raw) => raw,
            None => match js_sys::JSON::stringify(&data) {
                Ok(raw) => String::from(raw),
                Err(_) => return,
            },
        };

        let Some(message) = parse_embedded_message(&raw) else {
            return;
        };
        let bounds = iframe.get_bounding_client_rect();
        let rendered = SurfaceRect {
            origin: Vec2::new(bounds.left() as f32, bounds.top() as f32),
            size: Vec2::new(bounds.width() as f32, bounds.height() as f32),
        };
        queue.push(SurfaceEvent::from_embedded(message, &rendered, virtual_size));
    }) as Box<dyn FnMut(MessageEvent)>);

    window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
