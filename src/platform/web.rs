//! Browser host
//!
//! Listens on the window for `resize` and `mousemove`, schedules frames with
//! `requestAnimationFrame`, and draws to a canvas' 2D context. Callbacks
//! reach the engine through a `Weak`, so a dropped background can't be
//! revived by a late event.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, Window};

use super::{FrameHandle, Host};
use crate::engine::Engine;
use crate::error::{FieldError, Result};
use crate::renderer::CanvasSurface;
use crate::settings::FieldSettings;
use crate::sim::FieldState;

type SharedEngine = Rc<RefCell<Engine<WebHost>>>;
type WeakEngine = Weak<RefCell<Engine<WebHost>>>;

/// Host backed by the browser window and a canvas element
pub struct WebHost {
    window: Window,
    canvas: HtmlCanvasElement,
    surface: Option<CanvasSurface>,
    engine: WeakEngine,
    on_resize: Option<Closure<dyn FnMut(Event)>>,
    on_mouse_move: Option<Closure<dyn FnMut(MouseEvent)>>,
    on_frame: Option<Closure<dyn FnMut(f64)>>,
}

impl WebHost {
    fn new(
        window: Window,
        canvas: HtmlCanvasElement,
        surface: Option<CanvasSurface>,
        engine: WeakEngine,
    ) -> Self {
        Self {
            window,
            canvas,
            surface,
            engine,
            on_resize: None,
            on_mouse_move: None,
            on_frame: None,
        }
    }

    /// Run `f` against the engine if it is still alive and not mid-callback
    fn with_engine(engine: &WeakEngine, f: impl FnOnce(&mut Engine<WebHost>)) {
        if let Some(engine) = engine.upgrade() {
            match engine.try_borrow_mut() {
                Ok(mut engine) => f(&mut engine),
                Err(_) => log::warn!("Particle field busy, dropping event"),
            }
        }
    }
}

impl Host for WebHost {
    type Surface = CanvasSurface;

    fn viewport_size(&self) -> (u32, u32) {
        let dimension = |v: std::result::Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
        };
        (
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn surface(&mut self) -> Option<&mut CanvasSurface> {
        self.surface.as_mut()
    }

    fn resize_surface(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn add_listeners(&mut self) {
        if self.on_resize.is_some() || self.on_mouse_move.is_some() {
            return;
        }

        let engine = self.engine.clone();
        let on_resize = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            WebHost::with_engine(&engine, |e| e.handle_resize());
        });
        let _ = self
            .window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

        let engine = self.engine.clone();
        let on_mouse_move = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            // Same clock as the requestAnimationFrame timestamp
            let now = event.time_stamp();
            let (x, y) = (event.client_x() as f32, event.client_y() as f32);
            WebHost::with_engine(&engine, |e| e.handle_pointer_move(x, y, now));
        });
        let _ = self.window.add_event_listener_with_callback(
            "mousemove",
            on_mouse_move.as_ref().unchecked_ref(),
        );

        self.on_resize = Some(on_resize);
        self.on_mouse_move = Some(on_mouse_move);
    }

    fn remove_listeners(&mut self) {
        if let Some(on_resize) = self.on_resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        }
        if let Some(on_mouse_move) = self.on_mouse_move.take() {
            let _ = self.window.remove_event_listener_with_callback(
                "mousemove",
                on_mouse_move.as_ref().unchecked_ref(),
            );
        }
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        // One closure, re-registered every frame
        let engine = self.engine.clone();
        let on_frame = self.on_frame.get_or_insert_with(|| {
            Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                WebHost::with_engine(&engine, |e| e.frame(time));
            })
        });

        match self
            .window
            .request_animation_frame(on_frame.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, frame: FrameHandle) {
        let _ = self.window.cancel_animation_frame(frame.0);
        self.on_frame = None;
    }
}

/// Look up the 2D context of `canvas`
fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(FieldError::NoContext)
}

/// Style the canvas as a fixed, full-viewport layer behind the page that
/// never takes pointer events
fn style_as_background(canvas: &HtmlCanvasElement, opacity: f32) {
    let style = canvas.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("inset", "0");
    let _ = style.set_property("z-index", "0");
    let _ = style.set_property("pointer-events", "none");
    let _ = style.set_property("opacity", &opacity.to_string());
}

/// Animated particle background mounted on a canvas
///
/// Detaches when dropped (or freed from JS).
#[wasm_bindgen]
pub struct ParticleBackground {
    engine: SharedEngine,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Mount on the canvas with id `canvas_id` using stored or default
    /// settings
    pub fn mount(canvas_id: &str) -> std::result::Result<ParticleBackground, JsValue> {
        Self::mount_with(canvas_id, FieldSettings::load())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Stop the animation and remove all listeners
    pub fn detach(&self) {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.detach(),
            Err(_) => log::warn!("Particle field busy, detach skipped"),
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.engine.borrow().is_running()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.engine.borrow().field().particles.len()
    }
}

impl ParticleBackground {
    /// Mount with explicit settings
    ///
    /// A missing canvas is an error. A canvas without a 2D context mounts
    /// but never starts, leaving the page without a background.
    pub fn mount_with(canvas_id: &str, settings: FieldSettings) -> Result<Self> {
        let opacity = settings.canvas_opacity;
        let field = FieldState::new(settings, js_sys::Date::now() as u64)?;

        let window = web_sys::window().ok_or(FieldError::NoWindow)?;
        let document = window.document().ok_or(FieldError::NoDocument)?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| FieldError::CanvasNotFound(canvas_id.to_string()))?;

        let surface = match context_2d(&canvas) {
            Ok(ctx) => Some(CanvasSurface::new(ctx)),
            Err(e) => {
                log::warn!("{}, background disabled", e);
                None
            }
        };
        style_as_background(&canvas, opacity);

        let engine = Rc::new_cyclic(|weak: &WeakEngine| {
            let host = WebHost::new(window, canvas, surface, weak.clone());
            RefCell::new(Engine::with_field(host, field))
        });
        if !engine.borrow_mut().attach() {
            log::warn!("Particle background mounted on #{} but inactive", canvas_id);
        }

        Ok(Self { engine })
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.detach();
    }
}
