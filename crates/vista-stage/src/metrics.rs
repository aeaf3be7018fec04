use vista_core::{ElementId, PageHost, Signal, ViewTree, signal};

/// One measurement of the gallery track against the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackSize {
    pub content_width: f32,
    pub viewport_width: f32,
}

impl TrackSize {
    /// Horizontal distance the track must travel to reveal its last pixel.
    /// Zero when the content fits.
    pub fn overflow(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Track translation at `progress` through the pinned range.
    pub fn offset_at(&self, progress: f32) -> f32 {
        let travel = -self.overflow() * progress.clamp(0.0, 1.0);
        // keep a fitted track at +0.0 rather than -0.0
        if travel == 0.0 { 0.0 } else { travel }
    }
}

/// Live widths of the gallery track. Both are signals so a scroll-observer
/// range defined in terms of the content width re-reads it on refresh.
pub struct TrackMetrics {
    track: ElementId,
    content_width: Signal<f32>,
    viewport_width: Signal<f32>,
}

impl TrackMetrics {
    pub fn new<V: ViewTree + ?Sized>(track: ElementId, view: &V) -> Self {
        let metrics = Self {
            track,
            content_width: signal(0.0),
            viewport_width: signal(0.0),
        };
        metrics.measure(view);
        metrics
    }

    pub fn track(&self) -> ElementId {
        self.track
    }

    /// Re-read both widths from the view tree.
    pub fn measure<V: ViewTree + ?Sized>(&self, view: &V) -> TrackSize {
        if self.content_width.set(view.scroll_width(self.track)) {
            log::trace!("track content width now {}", self.content_width.get());
        }
        self.viewport_width.set(view.viewport().width);
        self.current()
    }

    pub fn current(&self) -> TrackSize {
        TrackSize {
            content_width: self.content_width.get(),
            viewport_width: self.viewport_width.get(),
        }
    }

    pub fn content_width(&self) -> Signal<f32> {
        self.content_width.clone()
    }

    /// Re-measure, then have the scroll observer recompute pin offsets that
    /// depend on the content width.
    pub fn on_resize(&self, host: &mut dyn PageHost) -> TrackSize {
        let size = self.measure(&*host);
        host.refresh_geometry();
        log::debug!(
            "track re-measured: content {}px, viewport {}px",
            size.content_width,
            size.viewport_width
        );
        size
    }
}
