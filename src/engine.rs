// Render loop driver. Owns the particles and the surface, and runs
// "simulate -> render -> reschedule" once per display refresh until unmounted.
//
// State lives in an `Rc<RefCell<..>>` so the frame and resize callbacks handed to the host
// can reach it. Those callbacks only hold `Weak` references; dropping the engine (or
// unmounting it) is enough to end the loop.

use crate::error::{EngineError, Result};
use crate::host::{FrameToken, SurfaceHost, Unsubscribe};
use crate::particle::{self, Particle};
use crate::renderer::{self, RenderStats, RenderStyle, Surface};
use crate::simulation;
use crate::utils::Timer;
use crate::viewport::{self, SimulationParameters, TierTable, Viewport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EngineConfig {
    pub tiers: TierTable,
    pub style: RenderStyle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineState {
    Unmounted,
    /// Mounted on a zero-sized surface; seeding waits for the first non-zero resize.
    WaitingForSize,
    Running,
    Stopped,
}

struct Inner<S> {
    state: EngineState,
    config: EngineConfig,
    rng: StdRng,
    viewport: Viewport,
    params: Option<SimulationParameters>,
    particles: Vec<Particle>,
    surface: Option<S>,
    pending_frame: Option<FrameToken>,
    unsubscribe: Option<Unsubscribe>,
    ticks: u64,
    last_frame: RenderStats,
}

impl<S: Surface> Inner<S> {
    // Tiering and seeding, done exactly once per mount
    fn start(&mut self) {
        let Viewport { width, height } = self.viewport;
        let params = viewport::initialize(width, height, &self.config.tiers);
        log::debug!(
            "{:?} tier for width {}: {} particles, threshold {}",
            params.tier,
            width,
            params.particle_count,
            params.connection_threshold
        );
        self.particles = particle::seed(&mut self.rng, params.particle_count, width, height);
        self.params = Some(params);
        self.state = EngineState::Running;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
        }
    }

    fn step(&mut self) {
        let _timer = Timer::new("Engine::tick");
        let Viewport { width, height } = self.viewport;
        self.ticks += 1;
        if self.viewport.is_empty() {
            return;
        }
        let threshold = match self.params {
            Some(params) => params.connection_threshold,
            None => return,
        };
        simulation::advance(&mut self.particles, width, height);
        if let Some(surface) = self.surface.as_mut() {
            match renderer::render(
                surface,
                &self.particles,
                threshold,
                &self.config.style,
                width,
                height,
            ) {
                Ok(stats) => self.last_frame = stats,
                Err(err) => log::warn!("frame {} not drawn: {}", self.ticks, err),
            }
        }
    }
}

pub struct Engine<H: SurfaceHost + 'static, S: Surface + 'static> {
    host: Rc<H>,
    inner: Rc<RefCell<Inner<S>>>,
}

impl<H: SurfaceHost + 'static, S: Surface + 'static> Engine<H, S> {
    pub fn new(host: H, config: EngineConfig) -> Self {
        Engine::with_rng(host, config, StdRng::from_entropy())
    }

    /// Same as `new` but with reproducible seeding.
    pub fn with_seed(host: H, config: EngineConfig, seed: u64) -> Self {
        Engine::with_rng(host, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(host: H, config: EngineConfig, rng: StdRng) -> Self {
        Engine {
            host: Rc::new(host),
            inner: Rc::new(RefCell::new(Inner {
                state: EngineState::Unmounted,
                config,
                rng,
                viewport: Viewport::default(),
                params: None,
                particles: Vec::new(),
                surface: None,
                pending_frame: None,
                unsubscribe: None,
                ticks: 0,
                last_frame: RenderStats::default(),
            })),
        }
    }

    /// Starts the loop on `surface`. An engine mounts at most once; a rejected call leaves
    /// `surface` untouched.
    pub fn mount(&mut self, mut surface: S) -> Result<()> {
        match self.state() {
            EngineState::Unmounted => {}
            EngineState::Stopped => return Err(EngineError::Stopped),
            EngineState::WaitingForSize | EngineState::Running => {
                return Err(EngineError::AlreadyMounted)
            }
        }

        let (width, height) = self.host.size();
        surface.resize(width, height);
        let running = {
            let mut inner = self.inner.borrow_mut();
            inner.surface = Some(surface);
            inner.viewport = Viewport::new(width, height);
            if inner.viewport.is_empty() {
                log::info!("surface is {}x{}, waiting for a resize", width, height);
                inner.state = EngineState::WaitingForSize;
                false
            } else {
                inner.start();
                log::info!("mounted on a {}x{} surface", width, height);
                true
            }
        };

        let unsubscribe = self.host.on_resize(Box::new(resize_handler(
            Rc::downgrade(&self.host),
            Rc::downgrade(&self.inner),
        )));
        self.inner.borrow_mut().unsubscribe = Some(unsubscribe);

        if running {
            if let Err(err) = schedule_tick(&self.host, &self.inner) {
                stop(&*self.host, &*self.inner);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Stops the loop and releases the host subscriptions. Safe to call repeatedly, and
    /// before `mount`.
    pub fn unmount(&mut self) {
        stop(&*self.host, &*self.inner);
    }

    pub fn state(&self) -> EngineState {
        self.inner.borrow().state
    }

    pub fn parameters(&self) -> Option<SimulationParameters> {
        self.inner.borrow().params
    }

    pub fn particle_count(&self) -> usize {
        self.inner.borrow().particles.len()
    }

    pub fn particles(&self) -> Vec<Particle> {
        self.inner.borrow().particles.clone()
    }

    pub fn viewport(&self) -> Viewport {
        self.inner.borrow().viewport
    }

    pub fn ticks(&self) -> u64 {
        self.inner.borrow().ticks
    }

    pub fn last_frame(&self) -> RenderStats {
        self.inner.borrow().last_frame
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.inner.borrow().surface.as_ref().map(f)
    }
}

impl<H: SurfaceHost + 'static, S: Surface + 'static> Drop for Engine<H, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn resize_handler<H: SurfaceHost + 'static, S: Surface + 'static>(
    host: Weak<H>,
    inner: Weak<RefCell<Inner<S>>>,
) -> impl FnMut(u32, u32) {
    move |width, height| {
        let inner = match inner.upgrade() {
            Some(inner) => inner,
            None => return,
        };
        let started = {
            let mut state = inner.borrow_mut();
            match state.state {
                EngineState::Running => {
                    state.resize(width, height);
                    false
                }
                EngineState::WaitingForSize => {
                    state.resize(width, height);
                    if state.viewport.is_empty() {
                        false
                    } else {
                        state.start();
                        log::info!("started on a {}x{} surface", width, height);
                        true
                    }
                }
                EngineState::Unmounted | EngineState::Stopped => false,
            }
        };
        if started {
            if let Some(host) = host.upgrade() {
                keep_ticking(&host, &inner);
            }
        }
    }
}

fn schedule_tick<H: SurfaceHost + 'static, S: Surface + 'static>(
    host: &Rc<H>,
    inner: &Rc<RefCell<Inner<S>>>,
) -> Result<()> {
    let weak_host = Rc::downgrade(host);
    let weak_inner = Rc::downgrade(inner);
    let token = host.schedule_next_frame(Box::new(move || {
        if let (Some(host), Some(inner)) = (weak_host.upgrade(), weak_inner.upgrade()) {
            tick(&host, &inner);
        }
    }))?;
    inner.borrow_mut().pending_frame = Some(token);
    Ok(())
}

// A loop that can't get its next frame is over
fn keep_ticking<H: SurfaceHost + 'static, S: Surface + 'static>(
    host: &Rc<H>,
    inner: &Rc<RefCell<Inner<S>>>,
) {
    if let Err(err) = schedule_tick(host, inner) {
        log::warn!("stopping: {}", err);
        stop(&**host, &**inner);
    }
}

fn tick<H: SurfaceHost + 'static, S: Surface + 'static>(
    host: &Rc<H>,
    inner: &Rc<RefCell<Inner<S>>>,
) {
    {
        let mut state = inner.borrow_mut();
        state.pending_frame = None;
        if state.state != EngineState::Running {
            return;
        }
        state.step();
    }
    keep_ticking(host, inner);
}

fn stop<H: SurfaceHost, S>(host: &H, inner: &RefCell<Inner<S>>) {
    let (pending, unsubscribe) = {
        let mut inner = inner.borrow_mut();
        if inner.state == EngineState::Stopped {
            return;
        }
        let was_mounted = inner.state != EngineState::Unmounted;
        inner.state = EngineState::Stopped;
        inner.particles.clear();
        if was_mounted {
            log::info!("unmounted after {} ticks", inner.ticks);
        }
        (inner.pending_frame.take(), inner.unsubscribe.take())
    };
    if let Some(token) = pending {
        host.cancel_frame(token);
    }
    if let Some(unsubscribe) = unsubscribe {
        unsubscribe();
    }
}
