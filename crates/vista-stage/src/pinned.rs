//! Pinned horizontal gallery.
//!
//! While the page scrolls through the gallery's trigger range, the gallery
//! stays pinned and its track slides left. The range is exactly one content
//! width long, so the track's horizontal travel (`content - viewport`) is
//! consumed exactly as the range ends.

use vista_core::{
    BindingHandle, ElementId, PageHost, PinConfig, Scrub, StyleProp, Trigger, TriggerEnd,
    TriggerStart,
};
use web_time::Duration;

use crate::metrics::{TrackMetrics, TrackSize};

/// A live scroll-observer registration. Releasing twice is harmless.
#[derive(Debug, Default)]
pub struct Binding {
    handle: Option<BindingHandle>,
}

impl Binding {
    pub fn handle(&self) -> Option<BindingHandle> {
        self.handle
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// Unregister and unpin. Returns false if already released.
    pub fn release(&mut self, host: &mut dyn PageHost) -> bool {
        match self.handle.take() {
            Some(handle) => {
                host.release(handle);
                true
            }
            None => false,
        }
    }
}

pub struct PinnedScroller {
    region: ElementId,
    track: ElementId,
    start: TriggerStart,
    scrub: Scrub,
}

impl PinnedScroller {
    pub fn new(region: ElementId, track: ElementId, pin: &PinConfig) -> Self {
        let scrub = if pin.scrub_ms == 0 {
            Scrub::Locked
        } else {
            Scrub::Smoothed(Duration::from_millis(pin.scrub_ms))
        };
        Self {
            region,
            track,
            start: pin.start,
            scrub,
        }
    }

    /// Register the pinned range over the region. The range length is the
    /// metrics' content-width signal, so later re-measurements move the end.
    pub fn activate(&self, metrics: &TrackMetrics, host: &mut dyn PageHost) -> Binding {
        let handle = host.observe(Trigger {
            region: self.region,
            start: self.start,
            end: TriggerEnd::After(metrics.content_width()),
            pin: true,
            scrub: self.scrub,
        });
        log::debug!("gallery pinned ({handle:?})");
        Binding {
            handle: Some(handle),
        }
    }

    /// Translate the track for `progress` and return the offset applied.
    pub fn apply(&self, size: TrackSize, progress: f32, host: &mut dyn PageHost) -> f32 {
        let offset = size.offset_at(progress);
        host.set_style(self.track, StyleProp::X, offset);
        offset
    }
}

/// The gallery track: its measurements, its scroller, and the binding that
/// exists only while the gallery is shown continuously.
pub struct Track {
    metrics: TrackMetrics,
    scroller: PinnedScroller,
    binding: Binding,
}

impl Track {
    pub fn new(
        region: ElementId,
        track: ElementId,
        pin: &PinConfig,
        host: &mut dyn PageHost,
    ) -> Self {
        Self {
            metrics: TrackMetrics::new(track, &*host),
            scroller: PinnedScroller::new(region, track, pin),
            binding: Binding::default(),
        }
    }

    pub fn size(&self) -> TrackSize {
        self.metrics.current()
    }

    pub fn is_pinned(&self) -> bool {
        self.binding.is_live()
    }

    pub fn binding(&self) -> Option<BindingHandle> {
        self.binding.handle()
    }

    /// Measure again from the host. Widths read while the gallery was hidden
    /// or its content was swapped are stale once it is shown.
    pub fn remeasure(&self, host: &dyn PageHost) -> TrackSize {
        self.metrics.measure(host)
    }

    /// Create the binding unless one is already live.
    pub fn pin(&mut self, host: &mut dyn PageHost) -> bool {
        if self.binding.is_live() {
            return false;
        }
        self.binding = self.scroller.activate(&self.metrics, host);
        true
    }

    pub fn unpin(&mut self, host: &mut dyn PageHost) -> bool {
        self.binding.release(host)
    }

    /// Apply progress reported for `binding`. Ignores other bindings.
    pub fn on_progress(
        &self,
        binding: BindingHandle,
        progress: f32,
        host: &mut dyn PageHost,
    ) -> Option<f32> {
        if self.binding.handle() != Some(binding) {
            return None;
        }
        Some(self.scroller.apply(self.metrics.current(), progress, host))
    }

    pub fn on_resize(&self, host: &mut dyn PageHost) -> TrackSize {
        self.metrics.on_resize(host)
    }
}
