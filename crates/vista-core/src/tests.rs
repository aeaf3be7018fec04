#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::animation::*;
    use crate::config::*;
    use crate::error::StageError;
    use crate::event::PageEvent;
    use crate::geometry::*;
    use crate::host::*;
    use crate::signal::*;
    use crate::testing::*;
    use crate::timer::Timers;
    use web_time::{Duration, Instant};

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Task {
        Quiet,
        Cool,
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        assert!(sig.set(100));
        assert_eq!(sig.get(), 100);
        assert!(!sig.set(100));
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0.0f32);
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        sig.subscribe(move |v| seen_clone.borrow_mut().push(*v));

        sig.set(1200.0);
        sig.set(1200.0);
        sig.set(1000.0);
        assert_eq!(*seen.borrow(), vec![1200.0, 1000.0]);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
        assert_eq!(rect.center_y(), 35.0);
        assert_eq!(rect.y_at(0.7), 45.0);
    }

    #[test]
    fn test_trigger_start_reached() {
        let top_80 = TriggerStart {
            element: 0.0,
            viewport: 0.8,
        };
        let region = Rect {
            x: 0.0,
            y: 800.0,
            w: 100.0,
            h: 400.0,
        };
        assert!(!top_80.reached(region, 900.0));
        assert!(top_80.reached(region.translate_y(-100.0), 900.0));
    }

    #[test]
    fn test_animation_deterministic() {
        let t0 = Instant::now();
        let spec = AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear);
        let mut a = AnimatedValue::new(0.0f32, spec);
        a.set_target(10.0, spec, t0);

        assert!(a.update(t0 + Duration::from_millis(250)));
        assert!((*a.get() - 2.5).abs() < 0.01);
        assert!(a.is_animating());

        let cont = a.update(t0 + Duration::from_millis(1000));
        assert!(!cont);
        assert!(!a.is_animating());
        assert!((*a.get() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_animation_delay_holds_start_value() {
        let t0 = Instant::now();
        let spec = AnimationSpec::tween(Duration::from_millis(100), Easing::Linear)
            .delayed(Duration::from_millis(500));
        let mut a = AnimatedValue::new(0.0f32, spec);
        a.animate_from(100.0, 0.0, spec, t0);

        assert!(a.update(t0 + Duration::from_millis(400)));
        assert_eq!(*a.get(), 100.0);
        assert!(!a.update(t0 + Duration::from_millis(600)));
        assert_eq!(*a.get(), 0.0);
    }

    #[test]
    fn test_power3_out_endpoints() {
        assert_eq!(Easing::Power3Out.interpolate(0.0), 0.0);
        assert_eq!(Easing::Power3Out.interpolate(1.0), 1.0);
        assert!(Easing::Power3Out.interpolate(0.5) > 0.5);
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::default();
        let other = clock.clone();
        let t0 = other.now();
        clock.advance(Duration::from_millis(40));
        assert_eq!(other.now() - t0, Duration::from_millis(40));
    }

    #[test]
    fn test_timers_debounce_replaces_pending() {
        let clock = ManualClock::default();
        let mut timers = Timers::new(Arc::new(clock.clone()));

        let first = timers.debounce(Duration::from_millis(100), Task::Quiet);
        clock.advance(Duration::from_millis(60));
        let second = timers.debounce(Duration::from_millis(100), Task::Quiet);
        assert_ne!(first, second);
        assert_eq!(timers.len(), 1);
        assert!(!timers.cancel(first));

        clock.advance(Duration::from_millis(60));
        assert!(timers.poll().is_empty());

        clock.advance(Duration::from_millis(40));
        assert_eq!(timers.poll(), vec![Task::Quiet]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_timers_debounce_leaves_other_keys() {
        let clock = ManualClock::default();
        let mut timers = Timers::new(Arc::new(clock.clone()));
        timers.schedule(Duration::from_millis(500), Task::Cool);
        timers.debounce(Duration::from_millis(100), Task::Quiet);
        timers.debounce(Duration::from_millis(100), Task::Quiet);
        assert_eq!(timers.len(), 2);
    }

    #[test]
    fn test_timers_poll_in_deadline_order() {
        let clock = ManualClock::default();
        let mut timers = Timers::new(Arc::new(clock.clone()));
        timers.schedule(Duration::from_millis(300), Task::Cool);
        timers.schedule(Duration::from_millis(100), Task::Quiet);
        assert_eq!(
            timers.next_due(),
            Some(clock.now() + Duration::from_millis(100))
        );

        clock.advance(Duration::from_millis(500));
        assert_eq!(timers.poll(), vec![Task::Quiet, Task::Cool]);
    }

    #[test]
    fn test_timers_cancel() {
        let clock = ManualClock::default();
        let mut timers = Timers::new(Arc::new(clock.clone()));
        let id = timers.schedule(Duration::from_millis(10), Task::Quiet);
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        clock.advance(Duration::from_millis(20));
        assert!(timers.poll().is_empty());
    }

    #[test]
    fn test_config_defaults_match_portfolio() {
        let cfg = StageConfig::default();
        assert_eq!(cfg.snap.debounce(), Duration::from_millis(100));
        assert_eq!(cfg.snap.cooldown(), Duration::from_millis(1000));
        assert_eq!(cfg.selectors.grid_for("branding"), ".branding-grid");
        assert_eq!(cfg.layout.filtered_min_height, MinHeight::Vh(150.0));
        assert_eq!(cfg.cues.len(), 5);
    }

    #[test]
    fn test_config_partial_json_keeps_defaults() {
        let cfg = StageConfig::from_json(
            r#"{
                "snap": { "cooldown_ms": 400 },
                "cues": [
                    { "targets": ".card", "trigger": { "on": "load" }, "from": [["opacity", 0.0]] }
                ]
            }"#,
        )
        .expect("config parses");
        assert_eq!(cfg.snap.cooldown_ms, 400);
        assert_eq!(cfg.snap.debounce_ms, 100);
        assert_eq!(cfg.selectors.track, ".gallery-track");
        assert_eq!(cfg.cues.len(), 1);
        assert_eq!(cfg.cues[0].duration_ms, 1000);
        assert_eq!(cfg.cues[0].trigger, CueTriggerConfig::Load);
    }

    #[test]
    fn test_config_rejects_garbage() {
        let err = StageConfig::from_json("{ \"snap\": 3 }").unwrap_err();
        assert!(matches!(err, StageError::Config(_)));
    }

    #[test]
    fn test_config_rejects_non_positive_snap_band() {
        for src in [
            r#"{ "snap": { "band_divisor": 0 } }"#,
            r#"{ "snap": { "band_divisor": -2.5 } }"#,
        ] {
            let err = StageConfig::from_json(src).unwrap_err();
            assert!(
                matches!(err, StageError::OutOfRange { field: "snap.band_divisor", .. }),
                "{src} gave {err}"
            );
        }
    }

    #[test]
    fn test_config_reads_snap_behavior() {
        let cfg = StageConfig::from_json(r#"{ "snap": { "behavior": "instant", "band_divisor": 4 } }"#)
            .expect("config parses");
        assert_eq!(cfg.snap.behavior, ScrollBehavior::Instant);
        assert_eq!(cfg.snap.band_divisor, 4.0);
        assert_eq!(StageConfig::default().snap.behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn test_fake_page_query_comma_list() {
        let (page, ids) = portfolio_page(ManualClock::default());
        let interactive = page.query_all("a, button");
        assert!(interactive.contains(&ids.nav_link));
        assert!(interactive.contains(&ids.cta_button));
        assert!(interactive.contains(&ids.filter_web));
        assert_eq!(page.query(".branding-grid"), Some(ids.branding_grid));
        assert_eq!(page.query(".print-grid"), None);
    }

    #[test]
    fn test_fake_page_progress_follows_length_signal() {
        let (mut page, ids) = portfolio_page(ManualClock::default());
        let length = signal(1000.0f32);
        let handle = page.observe(Trigger {
            region: ids.gallery,
            start: TriggerStart {
                element: 0.0,
                viewport: 0.0,
            },
            end: TriggerEnd::After(length.clone()),
            pin: true,
            scrub: Scrub::Locked,
        });

        let events = page.scroll_to(2600.0);
        assert_eq!(
            events,
            vec![
                PageEvent::Scroll,
                PageEvent::Progress {
                    binding: handle,
                    progress: 0.5
                }
            ]
        );

        length.set(2000.0);
        assert_eq!(page.progress(handle), Some(0.25));

        page.release(handle);
        page.release(handle);
        assert_eq!(page.live_bindings(), 0);
        assert_eq!(page.count(|c| matches!(c, HostCall::Release(_))), 1);
    }

    #[test]
    fn test_fake_page_tween_interpolates() {
        let clock = ManualClock::default();
        let (mut page, ids) = portfolio_page(clock.clone());
        let spec = AnimationSpec::tween(Duration::from_millis(200), Easing::Linear);
        page.tween(ids.cursor, &[(StyleProp::X, 400.0)], spec);

        clock.advance(Duration::from_millis(100));
        assert!((page.style(ids.cursor, StyleProp::X) - 200.0).abs() < 0.01);
        clock.advance(Duration::from_millis(100));
        assert_eq!(page.style(ids.cursor, StyleProp::X), 400.0);
    }

    #[test]
    fn test_fake_page_pointer_enter_leave() {
        let (mut page, ids) = portfolio_page(ManualClock::default());
        let events = page.move_pointer(Vec2 { x: 60.0, y: 30.0 });
        assert!(events.contains(&PageEvent::PointerEnter(ids.nav_link)));

        let events = page.move_pointer(Vec2 { x: 600.0, y: 30.0 });
        assert!(events.contains(&PageEvent::PointerLeave(ids.nav_link)));
    }
}
