use vista_core::{ElementId, PageHost, Rect, SnapConfig, StageError, TimerId, Timers};

use crate::stage::StageTask;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SnapState {
    /// Quiescence check waiting for scrolling to pause.
    pub pending_timer: Option<TimerId>,
    /// Set from a corrective scroll until its cooldown elapses.
    pub suppressed: bool,
}

/// Signed distance from the viewport's vertical center to the section's.
/// Positive when the section sits below center.
pub fn distance_to_center(section: Rect, viewport_height: f32) -> f32 {
    section.center_y() - viewport_height / 2.0
}

/// Eases one section to the middle of the viewport once scrolling pauses
/// near it.
pub struct SnapCoordinator {
    section: ElementId,
    config: SnapConfig,
    state: SnapState,
}

impl SnapCoordinator {
    pub fn mount(
        host: &dyn PageHost,
        selector: &str,
        config: &SnapConfig,
    ) -> Result<Self, StageError> {
        config.validate()?;
        let section = host.query(selector).ok_or_else(|| StageError::missing(selector))?;
        Ok(Self {
            section,
            config: config.clone(),
            state: SnapState::default(),
        })
    }

    pub fn state(&self) -> SnapState {
        self.state
    }

    /// Every scroll restarts the quiescence countdown, unless a corrective
    /// scroll is still settling.
    pub fn on_scroll(&mut self, timers: &mut Timers<StageTask>) {
        if self.state.suppressed {
            return;
        }
        let id = timers.debounce(self.config.debounce(), StageTask::SnapQuiescence);
        self.state.pending_timer = Some(id);
    }

    /// Scrolling has paused. Returns the corrective distance if one was issued.
    pub fn on_quiescence(
        &mut self,
        host: &mut dyn PageHost,
        timers: &mut Timers<StageTask>,
    ) -> Option<f32> {
        self.state.pending_timer = None;
        if self.state.suppressed {
            return None;
        }

        let viewport_height = host.viewport().height;
        let distance = distance_to_center(host.bounds(self.section), viewport_height);
        if distance.abs() >= viewport_height / self.config.band_divisor {
            return None;
        }

        self.state.suppressed = true;
        host.scroll_by(distance, self.config.behavior);
        timers.schedule(self.config.cooldown(), StageTask::SnapCooldown);
        log::debug!("snapping section by {distance:.1}px");
        Some(distance)
    }

    pub fn on_cooldown_elapsed(&mut self) {
        self.state.suppressed = false;
    }

    pub fn teardown(&mut self, timers: &mut Timers<StageTask>) {
        if let Some(id) = self.state.pending_timer.take() {
            timers.cancel(id);
        }
    }
}
