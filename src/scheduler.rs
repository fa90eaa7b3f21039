//! Frame scheduling against a display refresh.
//!
//! The scheduler never runs work itself. It asks a [`RefreshSource`] for the
//! next refresh and remembers the ticket of that request; when the refresh
//! arrives the host calls [`FrameScheduler::begin_frame`], which only yields
//! a ticket if one is still pending. Teardown drops the pending ticket, so a
//! refresh that was already requested finds nothing to run.

use log::{debug, trace};

/// Something that can be asked to deliver one more display refresh.
pub trait RefreshSource {
    fn request_refresh(&self);
}

impl RefreshSource for winit::window::Window {
    fn request_refresh(&self) {
        self.request_redraw();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// Identifies one scheduled frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTicket(u64);

impl FrameTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct FrameScheduler {
    state: SchedulerState,
    pending: Option<FrameTicket>,
    next_ticket: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Stopped,
            pending: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }

    /// Moves to `Running` and schedules the first frame. Starting a running
    /// scheduler does nothing.
    pub fn start<S: RefreshSource + ?Sized>(&mut self, source: &S) {
        if self.is_running() {
            return;
        }

        self.state = SchedulerState::Running;
        self.schedule(source);
        debug!("Frame scheduler started");
    }

    /// Claims the pending frame, if any. Returns `None` for refreshes that
    /// were not requested by this scheduler or arrive after teardown.
    pub fn begin_frame(&mut self) -> Option<FrameTicket> {
        if !self.is_running() {
            return None;
        }

        let ticket = self.pending.take()?;
        trace!("Frame {} begins", ticket.0);
        Some(ticket)
    }

    /// Schedules the frame after `ticket` unless the scheduler was torn down
    /// while it ran.
    pub fn end_frame<S: RefreshSource + ?Sized>(&mut self, ticket: FrameTicket, source: &S) {
        trace!("Frame {} ends", ticket.0);

        if self.is_running() && self.pending.is_none() {
            self.schedule(source);
        }
    }

    /// Stops the scheduler and cancels the pending frame. Returns whether a
    /// frame was actually cancelled; calling it again is harmless.
    pub fn teardown(&mut self) -> bool {
        let cancelled = self.pending.take();
        let was_running = self.is_running();
        self.state = SchedulerState::Stopped;

        if was_running {
            debug!(
                "Frame scheduler stopped (cancelled frame: {:?})",
                cancelled.map(|t| t.0)
            );
        }

        cancelled.is_some()
    }

    fn schedule<S: RefreshSource + ?Sized>(&mut self, source: &S) {
        let ticket = FrameTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);
        source.request_refresh();
    }
}
