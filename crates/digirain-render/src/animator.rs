//! Run state and frame scheduling.
//!
//! The host calls [`FrameLoop::fire`] once per display refresh. A frame only
//! runs if one was requested, which mirrors a browser's animation-frame
//! callback: the renderer requests the next frame at the end of each one.

/// Animator run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimatorState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// Identifies a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Single-slot frame scheduler.
///
/// A new request replaces whatever was pending, so at most one loop exists.
#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<FrameHandle>,
    next_id: u64,
}

impl FrameLoop {
    /// Request a frame on the next refresh.
    pub fn request(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    /// Withdraw `handle` if it is still the pending request.
    pub fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    /// Consume the pending request, if any.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}
