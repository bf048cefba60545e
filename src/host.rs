//! The environment the engine runs in: surface size, resize notifications and
//! display-refresh scheduling. The browser implementation lives in `web`.

use crate::error::Result;

/// Handle returned by `schedule_next_frame`, accepted by `cancel_frame`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(pub i32);

/// Removes the resize listener it was returned for. Consumed on use, so it runs at most once.
pub type Unsubscribe = Box<dyn FnOnce()>;

pub trait SurfaceHost {
    /// Current size of the area the surface should fill, in pixels.
    fn size(&self) -> (u32, u32);

    /// Registers `callback` to be called with the new size after every resize.
    fn on_resize(&self, callback: Box<dyn FnMut(u32, u32)>) -> Unsubscribe;

    /// Runs `callback` once, before the next repaint. On error the callback is dropped
    /// and never runs.
    fn schedule_next_frame(&self, callback: Box<dyn FnOnce()>) -> Result<FrameToken>;

    fn cancel_frame(&self, token: FrameToken);
}
