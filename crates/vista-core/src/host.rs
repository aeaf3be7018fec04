//! Seams to the page the orchestrator runs inside.
//!
//! The orchestrator never touches a document directly. It talks to three
//! collaborators, usually all implemented by the same host object:
//!
//! - [`ViewTree`]: element lookup, style flags, geometry, window scrolling.
//! - [`AnimationEngine`]: tweens numeric style properties over time.
//! - [`ScrollObserver`]: maps vertical scroll onto a trigger region's
//!   progress and optionally pins the region while that progress advances.
//!
//! Progress computed by the scroll observer flows back into the orchestrator
//! as [`PageEvent::Progress`](crate::PageEvent::Progress) carrying the
//! [`BindingHandle`] returned by [`ScrollObserver::observe`].

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::animation::AnimationSpec;
use crate::geometry::{Rect, Size};
use crate::signal::Signal;

/// Opaque reference to an element owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Opaque reference to a live scroll-observer registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BindingHandle(pub u64);

/// Numeric style properties the orchestrator animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleProp {
    /// Horizontal translation in px.
    X,
    /// Vertical translation in px.
    Y,
    /// Vertical translation as a percentage of the element's own height.
    YPercent,
    Opacity,
    Scale,
}

impl StyleProp {
    /// Value the property rests at when nothing overrides it.
    pub fn natural(self) -> f32 {
        match self {
            StyleProp::Opacity | StyleProp::Scale => 1.0,
            StyleProp::X | StyleProp::Y | StyleProp::YPercent => 0.0,
        }
    }
}

/// Minimum-height hint for a section whose content is being swapped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinHeight {
    Auto,
    /// Percentage of the viewport height.
    Vh(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

pub trait ViewTree {
    /// First element matching `selector`. Comma-separated lists match any.
    fn query(&self, selector: &str) -> Option<ElementId>;
    /// All matches, in document order.
    fn query_all(&self, selector: &str) -> Vec<ElementId>;
    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;
    fn set_flag(&mut self, el: ElementId, flag: &str, on: bool);
    fn set_visible(&mut self, el: ElementId, visible: bool);
    fn set_min_height(&mut self, el: ElementId, hint: MinHeight);
    fn set_style(&mut self, el: ElementId, prop: StyleProp, value: f32);
    /// Bounds relative to the viewport.
    fn bounds(&self, el: ElementId) -> Rect;
    /// Intrinsic width of the element's content, overflow included.
    fn scroll_width(&self, el: ElementId) -> f32;
    fn viewport(&self) -> Size;
    fn scroll_by(&mut self, dy: f32, behavior: ScrollBehavior);
}

pub trait AnimationEngine {
    /// Animate `props` from their current values to the given ones.
    fn tween(&mut self, target: ElementId, props: &[(StyleProp, f32)], spec: AnimationSpec);

    /// Jump `start` onto the element, then animate back to the natural values.
    fn from_state(&mut self, target: ElementId, start: &[(StyleProp, f32)], spec: AnimationSpec);

    /// `from_state` over several targets, each delayed `each` more than the last.
    fn stagger_from(
        &mut self,
        targets: &[ElementId],
        start: &[(StyleProp, f32)],
        spec: AnimationSpec,
        each: Duration,
    ) {
        let mut offset = Duration::ZERO;
        for &target in targets {
            self.from_state(target, start, spec.delayed(offset));
            offset += each;
        }
    }
}

/// Where a trigger range begins: the point `element` of the way down the
/// region meets the point `viewport` of the way down the viewport.
/// `"top 80%"` is `{ element: 0.0, viewport: 0.8 }`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerStart {
    pub element: f32,
    pub viewport: f32,
}

impl TriggerStart {
    /// Region top reaches the viewport bottom.
    pub const ENTER: TriggerStart = TriggerStart {
        element: 0.0,
        viewport: 1.0,
    };

    /// Whether a region with viewport-relative `bounds` has reached this start.
    pub fn reached(&self, bounds: Rect, viewport_height: f32) -> bool {
        bounds.y_at(self.element) <= viewport_height * self.viewport
    }
}

#[derive(Clone, Debug)]
pub enum TriggerEnd {
    /// Range lasts this many px of scroll past the start. Re-read on every
    /// geometry refresh.
    After(Signal<f32>),
    /// Range ends when the region's bottom leaves the top of the viewport.
    RegionExit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scrub {
    /// Progress tracks the scroll position exactly.
    Locked,
    /// Progress catches up with the scroll position over this long.
    Smoothed(Duration),
}

#[derive(Clone, Debug)]
pub struct Trigger {
    pub region: ElementId,
    pub start: TriggerStart,
    pub end: TriggerEnd,
    pub pin: bool,
    pub scrub: Scrub,
}

pub trait ScrollObserver {
    fn observe(&mut self, trigger: Trigger) -> BindingHandle;
    /// Unregister and unpin. Releasing an unknown handle is a no-op.
    fn release(&mut self, handle: BindingHandle);
    /// Recompute start/end offsets of every live binding.
    fn refresh_geometry(&mut self);
}

/// Everything the orchestrator needs from its host.
pub trait PageHost: ViewTree + AnimationEngine + ScrollObserver {}
impl<T: ViewTree + AnimationEngine + ScrollObserver> PageHost for T {}
