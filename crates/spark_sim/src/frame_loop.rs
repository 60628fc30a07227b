/// Lifecycle of the repeating frame task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Created but never started
    Idle,
    /// Exactly one frame request is outstanding
    Pending(u64),
    /// A frame is executing; its successor has not been requested yet
    Running(u64),
    /// No further frames will run
    Cancelled,
}

/// Cancellable repeating task driving the field.
///
/// Each frame consumes the single outstanding request and, when it finishes,
/// requests its successor. `cancel` is observed before the next frame starts.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: LoopState,
    next_id: u64,
    frames_run: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            next_id: 0,
            frames_run: 0,
        }
    }

    /// Request the first frame. Returns false if already started or cancelled.
    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Idle {
            return false;
        }
        self.state = LoopState::Pending(self.issue());
        true
    }

    /// Take the outstanding request, if any
    pub fn begin_frame(&mut self) -> Option<u64> {
        match self.state {
            LoopState::Pending(id) => {
                self.state = LoopState::Running(id);
                Some(id)
            }
            _ => None,
        }
    }

    /// Finish the running frame and request the next one
    pub fn reschedule(&mut self) {
        if let LoopState::Running(_) = self.state {
            self.frames_run += 1;
            self.state = LoopState::Pending(self.issue());
        }
    }

    /// Stop the loop. Returns false if it was already cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.state == LoopState::Cancelled {
            return false;
        }
        self.state = LoopState::Cancelled;
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == LoopState::Cancelled
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames that ran to completion
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    fn issue(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
