//! Drives a stage over the in-memory portfolio page with a fixed script of
//! loads, scrolls, pointer moves, filter clicks, and a resize.
//!
//! Run with `RUST_LOG=debug` to see each component react. An optional first
//! argument names a JSON file overriding the default stage configuration.

use std::sync::Arc;

use anyhow::Context;
use vista_core::testing::{FakePage, HostCall, portfolio_page};
use vista_core::{Clock, ManualClock, PageEvent, Size, StageConfig, StyleProp, Vec2};
use vista_stage::Stage;
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn load_config() -> anyhow::Result<StageConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(StageConfig::default());
    };
    let src = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    StageConfig::from_json(&src).with_context(|| format!("parsing {path}"))
}

fn feed(stage: &mut Stage<FakePage>, events: Vec<PageEvent>) {
    for event in events {
        stage.handle(event);
    }
}

/// Advance the clock frame by frame, running due timers as a page would.
fn run_for(clock: &ManualClock, stage: &mut Stage<FakePage>, total: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        clock.advance(FRAME);
        elapsed += FRAME;
        stage.tick();
    }
}

/// Jump the clock from deadline to deadline until no timer is pending.
fn drain_timers(clock: &ManualClock, stage: &mut Stage<FakePage>) {
    while let Some(due) = stage.next_deadline() {
        let now = clock.now();
        if due > now {
            clock.advance(due - now);
        }
        let ran = stage.tick();
        log::debug!("{ran} timer(s) ran, {} pending", stage.pending_timers());
    }
}

fn scroll_to(clock: &ManualClock, stage: &mut Stage<FakePage>, y: f32) {
    let events = stage.host_mut().scroll_to(y);
    feed(stage, events);
    run_for(clock, stage, Duration::from_millis(200));
    log::info!("scrolled to {y}, settled at {}", stage.host().scroll_y());
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    let clock = ManualClock::default();
    let (page, ids) = portfolio_page(clock.clone());
    let mut stage = Stage::mount(page, &config, Arc::new(clock.clone()));
    log::info!("enabled components: {:?}", stage.enabled());

    stage.handle(PageEvent::Load);

    let events = stage.host_mut().move_pointer(Vec2 { x: 80.0, y: 40.0 });
    feed(&mut stage, events);
    run_for(&clock, &mut stage, Duration::from_millis(300));
    log::info!(
        "cursor at ({}, {}) scale {}",
        stage.host_mut().style(ids.cursor, StyleProp::X),
        stage.host_mut().style(ids.cursor, StyleProp::Y),
        stage.host_mut().style(ids.cursor, StyleProp::Scale),
    );

    for y in [600.0, 2100.0, 2850.0, 3600.0] {
        scroll_to(&clock, &mut stage, y);
        log::info!(
            "track offset {}",
            stage.host_mut().style(ids.track, StyleProp::X)
        );
    }

    // Lands 250px short of the editorial feature's center.
    scroll_to(&clock, &mut stage, 3200.0);
    drain_timers(&clock, &mut stage);

    for id in ["branding", "web", "print", "all"] {
        log::info!("filter `{id}` -> {:?}", stage.select_filter(id));
    }
    if let Some(control) = stage
        .gallery()
        .and_then(|g| g.filters().iter().find(|f| f.id == "branding"))
        .map(|f| f.control)
    {
        stage.handle(PageEvent::Click(control));
        log::info!("clicked branding control -> {:?}", stage.mode());
    }
    stage.select_filter("all");

    let events = stage.host_mut().resize(Size {
        width: 1200.0,
        height: 900.0,
    });
    feed(&mut stage, events);
    scroll_to(&clock, &mut stage, 3600.0);
    log::info!(
        "track offset after resize {}",
        stage.host_mut().style(ids.track, StyleProp::X)
    );

    let page = stage.teardown();
    let snaps = page.count(|c| matches!(c, HostCall::ScrollBy { .. }));
    log::info!(
        "done: {} host calls, {snaps} corrective scrolls, {} live bindings",
        page.calls().len(),
        page.live_bindings()
    );
    Ok(())
}
