use std::sync::Arc;

use bitflags::bitflags;
use vista_core::{Clock, PageEvent, PageHost, StageConfig, StageError, Timers};
use web_time::Instant;

use crate::entrance::EntranceSequencer;
use crate::parallax::ParallaxLayer;
use crate::pointer::PointerFollower;
use crate::snap::{SnapCoordinator, SnapState};
use crate::view_mode::{ViewMode, ViewModeSwitch};

/// Scheduled work owned by the stage. Each value is also its own debounce key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageTask {
    SnapQuiescence,
    SnapCooldown,
}

bitflags! {
    /// Components that found their elements at mount.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Components: u8 {
        const POINTER = 1 << 0;
        const GALLERY = 1 << 1;
        const SNAP = 1 << 2;
        const ENTRANCE = 1 << 3;
        const PARALLAX = 1 << 4;
    }
}

fn enable<T>(name: &str, mounted: Result<T, StageError>) -> Option<T> {
    match mounted {
        Ok(component) => {
            log::debug!("{name}: mounted");
            Some(component)
        }
        Err(err) => {
            log::info!("{name}: disabled ({err})");
            None
        }
    }
}

/// One page's orchestrator. Owns the host and every component; the page
/// feeds it events and calls [`Stage::tick`] each frame.
pub struct Stage<H: PageHost> {
    host: H,
    timers: Timers<StageTask>,
    gallery: Option<ViewModeSwitch>,
    snap: Option<SnapCoordinator>,
    entrance: Option<EntranceSequencer>,
    pointer: Option<PointerFollower>,
    parallax: Option<ParallaxLayer>,
}

impl<H: PageHost> Stage<H> {
    /// Build every component against the laid-out page. Components whose
    /// elements are missing stay disabled for the page's lifetime.
    pub fn mount(mut host: H, config: &StageConfig, clock: Arc<dyn Clock>) -> Self {
        let sel = &config.selectors;
        let pointer = enable(
            "pointer follower",
            PointerFollower::mount(&host, &sel.cursor, &sel.interactive, &config.pointer),
        );
        let gallery = enable(
            "gallery",
            ViewModeSwitch::mount(&mut host, sel, &config.pin, &config.layout),
        );
        let snap = enable(
            "snap coordinator",
            SnapCoordinator::mount(&host, &sel.snap_section, &config.snap),
        );
        let parallax = enable(
            "parallax",
            ParallaxLayer::mount(
                &mut host,
                &sel.parallax_layer,
                &sel.parallax_container,
                &config.parallax,
            ),
        );
        let entrance = enable(
            "entrance sequencer",
            EntranceSequencer::mount(&host, &config.cues),
        );

        let stage = Self {
            host,
            timers: Timers::new(clock),
            gallery,
            snap,
            entrance,
            pointer,
            parallax,
        };
        log::info!("stage mounted: {:?}", stage.enabled());
        stage
    }

    pub fn enabled(&self) -> Components {
        let mut on = Components::empty();
        on.set(Components::POINTER, self.pointer.is_some());
        on.set(Components::GALLERY, self.gallery.is_some());
        on.set(Components::SNAP, self.snap.is_some());
        on.set(Components::ENTRANCE, self.entrance.is_some());
        on.set(Components::PARALLAX, self.parallax.is_some());
        on
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn mode(&self) -> Option<&ViewMode> {
        self.gallery.as_ref().map(ViewModeSwitch::mode)
    }

    pub fn gallery(&self) -> Option<&ViewModeSwitch> {
        self.gallery.as_ref()
    }

    pub fn snap_state(&self) -> Option<SnapState> {
        self.snap.as_ref().map(SnapCoordinator::state)
    }

    pub fn entrance(&self) -> Option<&EntranceSequencer> {
        self.entrance.as_ref()
    }

    pub fn pointer(&self) -> Option<&PointerFollower> {
        self.pointer.as_ref()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// When the earliest pending timer comes due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_due()
    }

    /// Switch the work section between the continuous gallery (`"all"`) and
    /// a category grid.
    pub fn select_filter(&mut self, id: &str) -> Option<&ViewMode> {
        let Some(gallery) = self.gallery.as_mut() else {
            log::debug!("select_filter(`{id}`) ignored: gallery disabled");
            return None;
        };
        Some(gallery.select_filter(id, &mut self.host))
    }

    pub fn handle(&mut self, event: PageEvent) {
        let host: &mut dyn PageHost = &mut self.host;
        match event {
            PageEvent::Load => {
                if let Some(entrance) = self.entrance.as_mut() {
                    entrance.on_load(host);
                }
            }
            PageEvent::Scroll => {
                if let Some(snap) = self.snap.as_mut() {
                    snap.on_scroll(&mut self.timers);
                }
                if let Some(entrance) = self.entrance.as_mut() {
                    entrance.on_scroll(host);
                }
            }
            PageEvent::Resize => {
                if let Some(gallery) = self.gallery.as_ref() {
                    gallery.on_resize(host);
                }
            }
            PageEvent::PointerMove(pos) => {
                if let Some(pointer) = self.pointer.as_mut() {
                    pointer.on_move(pos, host);
                }
            }
            PageEvent::PointerEnter(el) => {
                if let Some(pointer) = self.pointer.as_mut() {
                    pointer.on_enter(el, host);
                }
            }
            PageEvent::PointerLeave(el) => {
                if let Some(pointer) = self.pointer.as_mut() {
                    pointer.on_leave(el, host);
                }
            }
            PageEvent::Click(el) => {
                let id = self
                    .gallery
                    .as_ref()
                    .and_then(|g| g.filter_for_control(el))
                    .map(str::to_owned);
                if let Some(id) = id {
                    self.select_filter(&id);
                }
            }
            PageEvent::Progress { binding, progress } => {
                let handled = self
                    .gallery
                    .as_ref()
                    .and_then(|g| g.on_progress(binding, progress, host))
                    .is_some();
                if !handled {
                    if let Some(parallax) = self.parallax.as_ref() {
                        parallax.on_progress(binding, progress, host);
                    }
                }
            }
        }
    }

    /// Run every timer that has come due. Returns how many ran.
    pub fn tick(&mut self) -> usize {
        let due = self.timers.poll();
        for &task in &due {
            match task {
                StageTask::SnapQuiescence => {
                    if let Some(snap) = self.snap.as_mut() {
                        snap.on_quiescence(&mut self.host, &mut self.timers);
                    }
                }
                StageTask::SnapCooldown => {
                    if let Some(snap) = self.snap.as_mut() {
                        snap.on_cooldown_elapsed();
                    }
                }
            }
        }
        due.len()
    }

    /// Release every binding and drop pending timers; hands the host back.
    pub fn teardown(mut self) -> H {
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.teardown(&mut self.host);
        }
        if let Some(parallax) = self.parallax.as_mut() {
            parallax.release(&mut self.host);
        }
        if let Some(snap) = self.snap.as_mut() {
            snap.teardown(&mut self.timers);
        }
        self.timers.clear();
        log::debug!("stage torn down");
        self.host
    }
}
