//! In-memory page host for tests and headless demos.
//!
//! `FakePage` implements all three host seams over a flat element list. It
//! keeps a log of every call the orchestrator makes ([`HostCall`]) and runs
//! tweens through [`AnimatedValue`] against a [`ManualClock`], so a test can
//! advance time and read back where a property has got to.
//!
//! Selectors are matched literally: an element answers to the exact selector
//! strings it was registered with. Comma lists match any member. Pinning is
//! recorded but does not shift layout.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::animation::{AnimatedValue, AnimationSpec, Clock, ManualClock};
use crate::event::PageEvent;
use crate::geometry::{Rect, Size, Vec2};
use crate::host::{
    AnimationEngine, BindingHandle, ElementId, MinHeight, ScrollBehavior, ScrollObserver,
    StyleProp, Trigger, TriggerEnd, ViewTree,
};

#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    Flag {
        el: ElementId,
        flag: String,
        on: bool,
    },
    Visible {
        el: ElementId,
        visible: bool,
    },
    MinHeight {
        el: ElementId,
        hint: MinHeight,
    },
    Style {
        el: ElementId,
        prop: StyleProp,
        value: f32,
    },
    ScrollBy {
        dy: f32,
        behavior: ScrollBehavior,
    },
    Tween {
        target: ElementId,
        props: Vec<(StyleProp, f32)>,
        spec: AnimationSpec,
    },
    FromState {
        target: ElementId,
        start: Vec<(StyleProp, f32)>,
        spec: AnimationSpec,
    },
    Observe {
        handle: BindingHandle,
        region: ElementId,
        pin: bool,
    },
    Release(BindingHandle),
    Refresh,
}

struct FakeElement {
    selectors: Vec<String>,
    attrs: HashMap<String, String>,
    flags: BTreeSet<String>,
    visible: bool,
    min_height: Option<MinHeight>,
    /// Document coordinates.
    rect: Rect,
    scroll_width: f32,
}

pub struct FakePage {
    clock: ManualClock,
    viewport: Size,
    scroll_y: f32,
    elements: Vec<FakeElement>,
    bindings: BTreeMap<u64, Trigger>,
    next_binding: u64,
    styles: HashMap<(ElementId, StyleProp), AnimatedValue<f32>>,
    hovered: BTreeSet<ElementId>,
    calls: Vec<HostCall>,
}

impl FakePage {
    pub fn new(viewport: Size, clock: ManualClock) -> Self {
        Self {
            clock,
            viewport,
            scroll_y: 0.0,
            elements: Vec::new(),
            bindings: BTreeMap::new(),
            next_binding: 1,
            styles: HashMap::new(),
            hovered: BTreeSet::new(),
            calls: Vec::new(),
        }
    }

    /// Add an element answering to `selectors`, at `rect` in document space.
    pub fn add(&mut self, selectors: &[&str], rect: Rect) -> ElementId {
        let id = ElementId(self.elements.len() as u64);
        self.elements.push(FakeElement {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            attrs: HashMap::new(),
            flags: BTreeSet::new(),
            visible: true,
            min_height: None,
            rect,
            scroll_width: rect.w,
        });
        id
    }

    pub fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(el) {
            e.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn set_scroll_width(&mut self, el: ElementId, width: f32) {
        if let Some(e) = self.element_mut(el) {
            e.scroll_width = width;
        }
    }

    /// Resize the window. Returns the event the page would emit.
    pub fn resize(&mut self, viewport: Size) -> Vec<PageEvent> {
        self.viewport = viewport;
        vec![PageEvent::Resize]
    }

    /// Jump the scroll position, returning the scroll event followed by a
    /// progress event for every live binding.
    pub fn scroll_to(&mut self, y: f32) -> Vec<PageEvent> {
        self.scroll_y = y.max(0.0);
        let mut events = vec![PageEvent::Scroll];
        for &key in self.bindings.keys() {
            let binding = BindingHandle(key);
            if let Some(progress) = self.progress(binding) {
                events.push(PageEvent::Progress { binding, progress });
            }
        }
        events
    }

    /// Move the pointer, returning the move plus any enter/leave transitions.
    pub fn move_pointer(&mut self, pos: Vec2) -> Vec<PageEvent> {
        let mut events = vec![PageEvent::PointerMove(pos)];
        let under: BTreeSet<ElementId> = (0..self.elements.len())
            .map(|i| ElementId(i as u64))
            .filter(|&el| self.bounds(el).contains(pos))
            .collect();
        for &el in self.hovered.difference(&under) {
            events.push(PageEvent::PointerLeave(el));
        }
        for &el in under.difference(&self.hovered) {
            events.push(PageEvent::PointerEnter(el));
        }
        self.hovered = under;
        events
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Fraction of `binding`'s range consumed at the current scroll position.
    pub fn progress(&self, binding: BindingHandle) -> Option<f32> {
        let trigger = self.bindings.get(&binding.0)?;
        let region = self.element(trigger.region)?.rect;
        let begin = region.y_at(trigger.start.element) - self.viewport.height * trigger.start.viewport;
        let end = match &trigger.end {
            TriggerEnd::After(length) => begin + length.get(),
            TriggerEnd::RegionExit => region.bottom(),
        };
        let span = end - begin;
        if span <= 0.0 {
            return Some(if self.scroll_y >= begin { 1.0 } else { 0.0 });
        }
        Some(((self.scroll_y - begin) / span).clamp(0.0, 1.0))
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn flag(&self, el: ElementId, flag: &str) -> bool {
        self.element(el).is_some_and(|e| e.flags.contains(flag))
    }

    pub fn is_visible(&self, el: ElementId) -> bool {
        self.element(el).is_some_and(|e| e.visible)
    }

    pub fn min_height(&self, el: ElementId) -> Option<MinHeight> {
        self.element(el).and_then(|e| e.min_height)
    }

    pub fn live_bindings(&self) -> usize {
        self.bindings.len()
    }

    pub fn pinned_bindings(&self) -> usize {
        self.bindings.values().filter(|t| t.pin).count()
    }

    pub fn trigger(&self, binding: BindingHandle) -> Option<&Trigger> {
        self.bindings.get(&binding.0)
    }

    /// Current value of an animated or directly set property.
    pub fn style(&mut self, el: ElementId, prop: StyleProp) -> f32 {
        let now = self.clock.now();
        match self.styles.get_mut(&(el, prop)) {
            Some(v) => {
                v.update(now);
                *v.get()
            }
            None => prop.natural(),
        }
    }

    fn element(&self, el: ElementId) -> Option<&FakeElement> {
        self.elements.get(el.0 as usize)
    }

    fn element_mut(&mut self, el: ElementId) -> Option<&mut FakeElement> {
        self.elements.get_mut(el.0 as usize)
    }

    fn animated(&mut self, el: ElementId, prop: StyleProp) -> &mut AnimatedValue<f32> {
        self.styles
            .entry((el, prop))
            .or_insert_with(|| AnimatedValue::new(prop.natural(), AnimationSpec::default()))
    }
}

impl ViewTree for FakePage {
    fn query(&self, selector: &str) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        let wanted: Vec<&str> = selector.split(',').map(str::trim).collect();
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.selectors.iter().any(|s| wanted.contains(&s.as_str())))
            .map(|(i, _)| ElementId(i as u64))
            .collect()
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.element(el)?.attrs.get(name).cloned()
    }

    fn set_flag(&mut self, el: ElementId, flag: &str, on: bool) {
        if let Some(e) = self.element_mut(el) {
            if on {
                e.flags.insert(flag.to_string());
            } else {
                e.flags.remove(flag);
            }
        }
        self.calls.push(HostCall::Flag {
            el,
            flag: flag.to_string(),
            on,
        });
    }

    fn set_visible(&mut self, el: ElementId, visible: bool) {
        if let Some(e) = self.element_mut(el) {
            e.visible = visible;
        }
        self.calls.push(HostCall::Visible { el, visible });
    }

    fn set_min_height(&mut self, el: ElementId, hint: MinHeight) {
        if let Some(e) = self.element_mut(el) {
            e.min_height = Some(hint);
        }
        self.calls.push(HostCall::MinHeight { el, hint });
    }

    fn set_style(&mut self, el: ElementId, prop: StyleProp, value: f32) {
        self.styles
            .insert((el, prop), AnimatedValue::new(value, AnimationSpec::default()));
        self.calls.push(HostCall::Style { el, prop, value });
    }

    fn bounds(&self, el: ElementId) -> Rect {
        self.element(el)
            .map(|e| e.rect.translate_y(-self.scroll_y))
            .unwrap_or_default()
    }

    fn scroll_width(&self, el: ElementId) -> f32 {
        self.element(el).map(|e| e.scroll_width).unwrap_or_default()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn scroll_by(&mut self, dy: f32, behavior: ScrollBehavior) {
        self.scroll_y = (self.scroll_y + dy).max(0.0);
        self.calls.push(HostCall::ScrollBy { dy, behavior });
    }
}

impl AnimationEngine for FakePage {
    fn tween(&mut self, target: ElementId, props: &[(StyleProp, f32)], spec: AnimationSpec) {
        let now = self.clock.now();
        for &(prop, value) in props {
            self.animated(target, prop).set_target(value, spec, now);
        }
        self.calls.push(HostCall::Tween {
            target,
            props: props.to_vec(),
            spec,
        });
    }

    fn from_state(&mut self, target: ElementId, start: &[(StyleProp, f32)], spec: AnimationSpec) {
        let now = self.clock.now();
        for &(prop, value) in start {
            self.animated(target, prop)
                .animate_from(value, prop.natural(), spec, now);
        }
        self.calls.push(HostCall::FromState {
            target,
            start: start.to_vec(),
            spec,
        });
    }
}

impl ScrollObserver for FakePage {
    fn observe(&mut self, trigger: Trigger) -> BindingHandle {
        let handle = BindingHandle(self.next_binding);
        self.next_binding += 1;
        self.calls.push(HostCall::Observe {
            handle,
            region: trigger.region,
            pin: trigger.pin,
        });
        self.bindings.insert(handle.0, trigger);
        handle
    }

    fn release(&mut self, handle: BindingHandle) {
        if self.bindings.remove(&handle.0).is_some() {
            self.calls.push(HostCall::Release(handle));
        }
    }

    fn refresh_geometry(&mut self) {
        self.calls.push(HostCall::Refresh);
    }
}

/// Element ids of the page built by [`portfolio_page`].
#[derive(Clone, Debug)]
pub struct PortfolioPage {
    pub cursor: ElementId,
    pub nav_link: ElementId,
    pub cta_button: ElementId,
    pub container: ElementId,
    pub parallax_layer: ElementId,
    pub hero_lines: Vec<ElementId>,
    pub hero_subtitle: ElementId,
    pub about: ElementId,
    pub about_image: ElementId,
    pub about_content: ElementId,
    pub work: ElementId,
    pub gallery: ElementId,
    pub track: ElementId,
    pub filter_all: ElementId,
    pub filter_branding: ElementId,
    pub filter_web: ElementId,
    /// Declares `data-filter="print"` but the page has no print grid.
    pub filter_print: ElementId,
    pub branding_grid: ElementId,
    pub web_grid: ElementId,
    pub editorial: ElementId,
    pub contact: ElementId,
    pub contact_forms: Vec<ElementId>,
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect { x, y, w, h }
}

fn filter(page: &mut FakePage, id: &str, x: f32) -> ElementId {
    let el = page.add(&[".filter", "button"], rect(x, 2020.0, 100.0, 40.0));
    page.set_attribute(el, "data-filter", id);
    el
}

/// A 1000x900 viewport over the portfolio markup, gallery track 3000px wide.
pub fn portfolio_page(clock: ManualClock) -> (FakePage, PortfolioPage) {
    let mut page = FakePage::new(
        Size {
            width: 1000.0,
            height: 900.0,
        },
        clock,
    );

    let cursor = page.add(&[".cursor"], rect(0.0, 0.0, 20.0, 20.0));
    let container = page.add(&[".container"], rect(0.0, 0.0, 1000.0, 6000.0));
    let parallax_layer = page.add(&[".parallax-layer"], rect(0.0, 0.0, 1000.0, 900.0));
    let nav_link = page.add(&["a"], rect(40.0, 20.0, 100.0, 40.0));
    let hero_lines = (0..3)
        .map(|i| page.add(&[".hero-title .line"], rect(100.0, 200.0 + 60.0 * i as f32, 800.0, 60.0)))
        .collect();
    let hero_subtitle = page.add(&[".hero-subtitle"], rect(100.0, 420.0, 800.0, 40.0));
    let cta_button = page.add(&["button"], rect(100.0, 500.0, 160.0, 48.0));

    let about = page.add(&[".about"], rect(0.0, 1200.0, 1000.0, 600.0));
    let about_image = page.add(&[".about-image"], rect(0.0, 1250.0, 480.0, 500.0));
    let about_content = page.add(&[".about-content"], rect(520.0, 1250.0, 480.0, 500.0));

    let work = page.add(&[".work"], rect(0.0, 2000.0, 1000.0, 1400.0));
    let filter_all = filter(&mut page, "all", 100.0);
    let filter_branding = filter(&mut page, "branding", 220.0);
    let filter_web = filter(&mut page, "web", 340.0);
    let filter_print = filter(&mut page, "print", 460.0);
    let gallery = page.add(&[".work-gallery"], rect(0.0, 2100.0, 1000.0, 900.0));
    let track = page.add(&[".gallery-track"], rect(0.0, 2100.0, 1000.0, 900.0));
    page.set_scroll_width(track, 3000.0);
    let branding_grid = page.add(
        &[".grid-category", ".branding-grid"],
        rect(0.0, 2100.0, 1000.0, 1200.0),
    );
    let web_grid = page.add(
        &[".grid-category", ".web-grid"],
        rect(0.0, 2100.0, 1000.0, 1200.0),
    );

    let editorial = page.add(&[".editorial-feature"], rect(0.0, 3600.0, 1000.0, 600.0));
    let contact = page.add(&[".contact"], rect(0.0, 4400.0, 1000.0, 800.0));
    let contact_forms = (0..2)
        .map(|i| page.add(&[".contact-form"], rect(100.0, 4500.0 + 300.0 * i as f32, 800.0, 260.0)))
        .collect();

    let ids = PortfolioPage {
        cursor,
        nav_link,
        cta_button,
        container,
        parallax_layer,
        hero_lines,
        hero_subtitle,
        about,
        about_image,
        about_content,
        work,
        gallery,
        track,
        filter_all,
        filter_branding,
        filter_web,
        filter_print,
        branding_grid,
        web_grid,
        editorial,
        contact,
        contact_forms,
    };
    (page, ids)
}
