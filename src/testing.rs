// Test doubles: a host driven by hand and a surface that records draw calls

use crate::color::Color;
use crate::error::{EngineError, Result};
use crate::host::{FrameToken, SurfaceHost, Unsubscribe};
use crate::renderer::Surface;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use vecmath::Vector2;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default)]
struct FakeState {
    size: Cell<(u32, u32)>,
    next_id: Cell<i32>,
    frames: RefCell<Vec<(FrameToken, Box<dyn FnOnce()>)>>,
    listeners: RefCell<Vec<(i32, Box<dyn FnMut(u32, u32)>)>>,
    cancels: Cell<usize>,
    unsubscribes: Cell<usize>,
    ignore_cancel: Cell<bool>,
    schedules_left: Cell<Option<usize>>,
    removed: RefCell<Vec<i32>>,
}

impl FakeState {
    fn next_id(&self) -> i32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

/// Clones share state, so a test keeps one handle while the engine owns another.
#[derive(Clone, Default)]
pub struct FakeHost {
    state: Rc<FakeState>,
}

impl FakeHost {
    pub fn new(width: u32, height: u32) -> FakeHost {
        let host = FakeHost::default();
        host.state.size.set((width, height));
        host
    }

    // Cancelled frames still fire, like a callback already queued by the browser
    pub fn ignoring_cancel(self) -> FakeHost {
        self.state.ignore_cancel.set(true);
        self
    }

    // Only the first `count` schedule requests succeed
    pub fn scheduling_only(self, count: usize) -> FakeHost {
        self.state.schedules_left.set(Some(count));
        self
    }

    /// Fires every frame callback pending right now; returns how many ran.
    pub fn fire_frame(&self) -> usize {
        let pending = std::mem::take(&mut *self.state.frames.borrow_mut());
        let fired = pending.len();
        for (_, callback) in pending {
            callback();
        }
        fired
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.state.size.set((width, height));
        let mut listeners = std::mem::take(&mut *self.state.listeners.borrow_mut());
        for (_, callback) in listeners.iter_mut() {
            callback(width, height);
        }
        // Listeners may unsubscribe while being called
        let removed = self.state.removed.borrow();
        listeners.retain(|(id, _)| !removed.contains(id));
        let mut slot = self.state.listeners.borrow_mut();
        listeners.append(&mut *slot);
        *slot = listeners;
    }

    pub fn pending_frames(&self) -> usize {
        self.state.frames.borrow().len()
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    pub fn cancels(&self) -> usize {
        self.state.cancels.get()
    }

    pub fn unsubscribes(&self) -> usize {
        self.state.unsubscribes.get()
    }
}

impl SurfaceHost for FakeHost {
    fn size(&self) -> (u32, u32) {
        self.state.size.get()
    }

    fn on_resize(&self, callback: Box<dyn FnMut(u32, u32)>) -> Unsubscribe {
        let id = self.state.next_id();
        self.state.listeners.borrow_mut().push((id, callback));
        let weak: Weak<FakeState> = Rc::downgrade(&self.state);
        Box::new(move || {
            if let Some(state) = weak.upgrade() {
                state.listeners.borrow_mut().retain(|(other, _)| *other != id);
                state.removed.borrow_mut().push(id);
                state.unsubscribes.set(state.unsubscribes.get() + 1);
            }
        })
    }

    fn schedule_next_frame(&self, callback: Box<dyn FnOnce()>) -> Result<FrameToken> {
        if let Some(left) = self.state.schedules_left.get() {
            if left == 0 {
                return Err(EngineError::Schedule("fake host out of frames".to_owned()));
            }
            self.state.schedules_left.set(Some(left - 1));
        }
        let token = FrameToken(self.state.next_id());
        self.state.frames.borrow_mut().push((token, callback));
        Ok(token)
    }

    fn cancel_frame(&self, token: FrameToken) {
        self.state.cancels.set(self.state.cancels.get() + 1);
        if !self.state.ignore_cancel.get() {
            self.state.frames.borrow_mut().retain(|(other, _)| *other != token);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Background {
        width: f64,
        height: f64,
        color: Color,
    },
    Dot {
        center: Vector2<f64>,
        radius: f64,
        color: Color,
    },
    Line {
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
    },
}

#[derive(Default)]
pub struct RecordingSurface {
    pub size: (u32, u32),
    pub commands: Vec<DrawCommand>,
    pub backgrounds: usize,
    fail: bool,
}

impl RecordingSurface {
    pub fn failing() -> RecordingSurface {
        RecordingSurface {
            fail: true,
            ..RecordingSurface::default()
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
    }

    fn record(&mut self, cmd: DrawCommand) -> Result<()> {
        if self.fail {
            return Err(EngineError::Draw("recording surface set to fail".to_owned()));
        }
        self.commands.push(cmd);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn fill_background(&mut self, width: f64, height: f64, color: Color) -> Result<()> {
        self.backgrounds += 1;
        self.record(DrawCommand::Background {
            width,
            height,
            color,
        })
    }

    fn fill_dot(&mut self, center: Vector2<f64>, radius: f64, color: Color) -> Result<()> {
        self.record(DrawCommand::Dot {
            center,
            radius,
            color,
        })
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
    ) -> Result<()> {
        self.record(DrawCommand::Line {
            from,
            to,
            width,
            color,
        })
    }
}

// Lets a test keep looking at a surface after handing it to an engine
impl Surface for Rc<RefCell<RecordingSurface>> {
    fn resize(&mut self, width: u32, height: u32) {
        self.borrow_mut().resize(width, height);
    }

    fn fill_background(&mut self, width: f64, height: f64, color: Color) -> Result<()> {
        self.borrow_mut().fill_background(width, height, color)
    }

    fn fill_dot(&mut self, center: Vector2<f64>, radius: f64, color: Color) -> Result<()> {
        self.borrow_mut().fill_dot(center, radius, color)
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
    ) -> Result<()> {
        self.borrow_mut().stroke_line(from, to, width, color)
    }
}
