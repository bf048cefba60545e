// Browser side: a Canvas2D `Surface`, a window-backed `SurfaceHost`, and the `Backdrop`
// type exported to JavaScript.

use crate::color::Color;
use crate::engine::{Engine, EngineConfig, EngineState};
use crate::error::{EngineError, Result};
use crate::host::{FrameToken, SurfaceHost, Unsubscribe};
use crate::renderer::Surface;
use crate::viewport::TierParams;
use js_sys::Function;
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

// Fixed full-viewport layer behind the page that never takes pointer events
const BACKDROP_STYLE: [(&str, &str); 8] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("z-index", "0"),
    ("pointer-events", "none"),
    ("background", "#000"),
];

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

fn draw_error(err: JsValue) -> EngineError {
    EngineError::Draw(format!("{:?}", err))
}

fn unavailable(reason: &str) -> EngineError {
    EngineError::SurfaceUnavailable(reason.to_owned())
}

fn as_function(closure: &Closure<dyn FnMut()>) -> &Function {
    closure.as_ref().unchecked_ref()
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<CanvasSurface> {
        let context = canvas
            .get_context("2d")
            .map_err(|err| EngineError::SurfaceUnavailable(format!("{:?}", err)))?
            .ok_or_else(|| unavailable("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| unavailable("context is not a CanvasRenderingContext2d"))?;
        Ok(CanvasSurface { canvas, context })
    }

    pub fn apply_backdrop_style(&self) -> Result<()> {
        let style = self.canvas.style();
        for (name, value) in BACKDROP_STYLE.iter() {
            style
                .set_property(name, value)
                .map_err(|err| EngineError::SurfaceUnavailable(format!("{:?}", err)))?;
        }
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    #[allow(deprecated)]
    fn fill_background(&mut self, width: f64, height: f64, color: Color) -> Result<()> {
        self.context.set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.fill_rect(0.0, 0.0, width, height);
        Ok(())
    }

    #[allow(deprecated)]
    fn fill_dot(&mut self, center: Vector2<f64>, radius: f64, color: Color) -> Result<()> {
        self.context.set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.begin_path();
        self.context
            .arc(center[0], center[1], radius, 0.0, PI * 2.0)
            .map_err(draw_error)?;
        self.context.fill();
        Ok(())
    }

    #[allow(deprecated)]
    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
    ) -> Result<()> {
        self.context.set_line_width(width);
        self.context.set_stroke_style(&JsValue::from_str(&color.to_css()));
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
        Ok(())
    }
}

fn inner_size(window: &Window) -> (u32, u32) {
    let read = |value: std::result::Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (read(window.inner_width()), read(window.inner_height()))
}

// Holds one persistent requestAnimationFrame closure; each scheduled callback is parked
// in `next_frame` until the browser calls it. The engine never has more than one frame
// outstanding.
pub struct WindowHost {
    window: Window,
    next_frame: Rc<RefCell<Option<Box<dyn FnOnce()>>>>,
    on_frame: Closure<dyn FnMut()>,
}

impl WindowHost {
    pub fn new() -> Result<WindowHost> {
        let window = web_sys::window().ok_or(EngineError::HostUnavailable("no global `window`"))?;
        let next_frame: Rc<RefCell<Option<Box<dyn FnOnce()>>>> = Rc::new(RefCell::new(None));
        let slot = next_frame.clone();
        let on_frame = Closure::wrap(Box::new(move || {
            let callback = slot.borrow_mut().take();
            if let Some(callback) = callback {
                callback();
            }
        }) as Box<dyn FnMut()>);
        Ok(WindowHost {
            window,
            next_frame,
            on_frame,
        })
    }
}

impl SurfaceHost for WindowHost {
    fn size(&self) -> (u32, u32) {
        inner_size(&self.window)
    }

    fn on_resize(&self, mut callback: Box<dyn FnMut(u32, u32)>) -> Unsubscribe {
        let window = self.window.clone();
        let listener = Closure::wrap(Box::new(move || {
            let (width, height) = inner_size(&window);
            callback(width, height);
        }) as Box<dyn FnMut()>);
        if let Err(err) = self
            .window
            .add_event_listener_with_callback("resize", as_function(&listener))
        {
            log::warn!("could not listen for resize: {:?}", err);
        }

        let window = self.window.clone();
        Box::new(move || {
            if let Err(err) =
                window.remove_event_listener_with_callback("resize", as_function(&listener))
            {
                log::warn!("could not stop listening for resize: {:?}", err);
            }
        })
    }

    fn schedule_next_frame(&self, callback: Box<dyn FnOnce()>) -> Result<FrameToken> {
        *self.next_frame.borrow_mut() = Some(callback);
        match self.window.request_animation_frame(as_function(&self.on_frame)) {
            Ok(id) => Ok(FrameToken(id)),
            Err(err) => {
                self.next_frame.borrow_mut().take();
                Err(EngineError::Schedule(format!("{:?}", err)))
            }
        }
    }

    fn cancel_frame(&self, token: FrameToken) {
        if let Err(err) = self.window.cancel_animation_frame(token.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", err);
        }
        self.next_frame.borrow_mut().take();
    }
}

/// The animated network backdrop, as seen from JavaScript.
///
/// ```js
/// const backdrop = new Backdrop();
/// backdrop.mount_by_id("backdrop");
/// // later
/// backdrop.unmount();
/// ```
#[wasm_bindgen]
pub struct Backdrop {
    config: EngineConfig,
    mounted: bool,
    engine: Option<Engine<WindowHost, CanvasSurface>>,
}

impl Default for Backdrop {
    fn default() -> Self {
        Backdrop::new()
    }
}

#[wasm_bindgen]
impl Backdrop {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Backdrop {
        Backdrop {
            config: EngineConfig::default(),
            mounted: false,
            engine: None,
        }
    }

    /// Only affects a later `mount`.
    pub fn set_breakpoint(&mut self, width: f64) {
        self.config.tiers.breakpoint = width;
    }

    /// Only affects a later `mount`.
    pub fn set_tier(&mut self, compact: bool, particle_count: u32, connection_threshold: f64) {
        let params = TierParams {
            particle_count: particle_count as usize,
            connection_threshold,
        };
        if compact {
            self.config.tiers.compact = params;
        } else {
            self.config.tiers.full = params;
        }
    }

    // Never throws: a backdrop that can't start just stays blank
    pub fn mount(&mut self, canvas: HtmlCanvasElement) {
        if self.mounted {
            log::warn!("{}", EngineError::AlreadyMounted);
            return;
        }
        self.mounted = true;
        match self.start(canvas) {
            Ok(engine) => self.engine = Some(engine),
            Err(err) => log::warn!("backdrop disabled: {}", err),
        }
    }

    pub fn mount_by_id(&mut self, id: &str) {
        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(id))
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok());
        match canvas {
            Some(canvas) => self.mount(canvas),
            None => {
                self.mounted = true;
                log::warn!(
                    "backdrop disabled: {}",
                    EngineError::SurfaceUnavailable(format!("no canvas with id `{}`", id))
                );
            }
        }
    }

    pub fn unmount(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.unmount();
        }
    }

    pub fn is_running(&self) -> bool {
        self.engine
            .as_ref()
            .map_or(false, |engine| engine.state() == EngineState::Running)
    }

    pub fn particle_count(&self) -> u32 {
        self.engine
            .as_ref()
            .and_then(|engine| engine.parameters())
            .map_or(0, |params| params.particle_count as u32)
    }

    pub fn connection_threshold(&self) -> f64 {
        self.engine
            .as_ref()
            .and_then(|engine| engine.parameters())
            .map_or(0.0, |params| params.connection_threshold)
    }
}

impl Backdrop {
    fn start(&self, canvas: HtmlCanvasElement) -> Result<Engine<WindowHost, CanvasSurface>> {
        let host = WindowHost::new()?;
        let surface = CanvasSurface::from_canvas(canvas)?;
        if let Err(err) = surface.apply_backdrop_style() {
            log::warn!("could not style backdrop canvas: {}", err);
        }
        start_engine(host, surface, self.config)
    }
}

// Kept generic over the host and surface so the failure path runs without a browser
fn start_engine<H: SurfaceHost + 'static, S: Surface + 'static>(
    host: H,
    surface: S,
    config: EngineConfig,
) -> Result<Engine<H, S>> {
    let mut engine = Engine::new(host, config);
    engine.mount(surface)?;
    Ok(engine)
}
