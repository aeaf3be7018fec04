//! One-shot entrance animations.
//!
//! Each cue plays its `from` state back to rest on its targets the first
//! time its trigger is satisfied, and never again for the page's lifetime.
//! Load cues play in declaration order when the page reports `Load`;
//! viewport cues play as their regions cross the configured line.

use smallvec::SmallVec;
use vista_core::{
    AnimationSpec, CueConfig, CueTriggerConfig, ElementId, PageHost, StageError, StyleProp,
    TriggerStart,
};
use web_time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CueTrigger {
    Load,
    Viewport {
        region: ElementId,
        start: TriggerStart,
    },
}

#[derive(Clone, Debug)]
pub struct AnimationCue {
    pub targets: SmallVec<[ElementId; 4]>,
    pub trigger: CueTrigger,
    pub fired: bool,
    from: SmallVec<[(StyleProp, f32); 2]>,
    spec: AnimationSpec,
    stagger: Duration,
}

impl AnimationCue {
    fn play(&mut self, host: &mut dyn PageHost) {
        if self.stagger.is_zero() {
            for &target in &self.targets {
                host.from_state(target, &self.from, self.spec);
            }
        } else {
            host.stagger_from(&self.targets, &self.from, self.spec, self.stagger);
        }
        self.fired = true;
    }
}

pub struct EntranceSequencer {
    cues: Vec<AnimationCue>,
}

impl EntranceSequencer {
    /// Resolve every declared cue against the page. Cues whose targets or
    /// region are absent are dropped; the sequencer itself is only missing
    /// when none survive.
    pub fn mount(host: &dyn PageHost, declared: &[CueConfig]) -> Result<Self, StageError> {
        let mut cues = Vec::with_capacity(declared.len());
        for cue in declared {
            let targets: SmallVec<[ElementId; 4]> = host.query_all(&cue.targets).into_iter().collect();
            if targets.is_empty() {
                log::debug!("entrance cue skipped: nothing matches `{}`", cue.targets);
                continue;
            }
            let trigger = match &cue.trigger {
                CueTriggerConfig::Load => CueTrigger::Load,
                CueTriggerConfig::Viewport { region, start } => match host.query(region) {
                    Some(region) => CueTrigger::Viewport {
                        region,
                        start: *start,
                    },
                    None => {
                        log::debug!("entrance cue skipped: no region `{region}`");
                        continue;
                    }
                },
            };
            cues.push(AnimationCue {
                targets,
                trigger,
                fired: false,
                from: cue.from.iter().copied().collect(),
                spec: cue.spec(),
                stagger: cue.stagger(),
            });
        }

        if cues.is_empty() {
            return Err(StageError::missing(
                declared
                    .iter()
                    .map(|c| c.targets.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ));
        }
        Ok(Self { cues })
    }

    pub fn cues(&self) -> &[AnimationCue] {
        &self.cues
    }

    /// Play load cues in declaration order, then any viewport cue whose
    /// region is already past its line. Returns how many cues played.
    pub fn on_load(&mut self, host: &mut dyn PageHost) -> usize {
        let mut played = 0;
        for cue in self.cues.iter_mut() {
            if cue.trigger == CueTrigger::Load && !cue.fired {
                cue.play(host);
                played += 1;
            }
        }
        played + self.on_scroll(host)
    }

    pub fn on_scroll(&mut self, host: &mut dyn PageHost) -> usize {
        let viewport_height = host.viewport().height;
        let mut played = 0;
        for cue in self.cues.iter_mut().filter(|c| !c.fired) {
            let CueTrigger::Viewport { region, start } = cue.trigger else {
                continue;
            };
            if start.reached(host.bounds(region), viewport_height) {
                cue.play(host);
                played += 1;
            }
        }
        played
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::testing::{FakePage, HostCall, PortfolioPage, portfolio_page};
    use vista_core::{ManualClock, StageConfig};

    fn mounted() -> (FakePage, PortfolioPage, EntranceSequencer) {
        let cfg = StageConfig::default();
        let (page, ids) = portfolio_page(ManualClock::default());
        let seq = EntranceSequencer::mount(&page, &cfg.cues).expect("portfolio cues resolve");
        (page, ids, seq)
    }

    fn plays_on(page: &FakePage, el: ElementId) -> usize {
        page.count(|c| matches!(c, HostCall::FromState { target, .. } if *target == el))
    }

    fn delay_of(page: &FakePage, el: ElementId) -> Option<Duration> {
        page.calls().iter().find_map(|c| match c {
            HostCall::FromState { target, spec, .. } if *target == el => Some(spec.delay),
            _ => None,
        })
    }

    #[test]
    fn test_load_cues_stagger_in_order() {
        let (mut page, ids, mut seq) = mounted();
        assert_eq!(seq.on_load(&mut page), 2);

        let delays: Vec<_> = ids.hero_lines.iter().map(|&l| delay_of(&page, l)).collect();
        assert_eq!(
            delays,
            vec![
                Some(Duration::ZERO),
                Some(Duration::from_millis(100)),
                Some(Duration::from_millis(200)),
            ]
        );
        assert_eq!(
            delay_of(&page, ids.hero_subtitle),
            Some(Duration::from_millis(500))
        );
        assert_eq!(plays_on(&page, ids.about_image), 0);
    }

    #[test]
    fn test_load_is_one_shot() {
        let (mut page, ids, mut seq) = mounted();
        seq.on_load(&mut page);
        assert_eq!(seq.on_load(&mut page), 0);
        assert_eq!(plays_on(&page, ids.hero_subtitle), 1);
    }

    #[test]
    fn test_viewport_cue_fires_once_across_crossings() {
        let (mut page, ids, mut seq) = mounted();
        seq.on_load(&mut page);

        // `.about` top is at 1200; its line (80% of 900) is crossed at 480.
        for y in [0.0, 300.0, 600.0, 900.0, 300.0, 0.0, 600.0, 900.0] {
            page.scroll_to(y);
            seq.on_scroll(&mut page);
        }

        assert_eq!(plays_on(&page, ids.about_image), 1);
        assert_eq!(plays_on(&page, ids.about_content), 1);
        let about = seq
            .cues()
            .iter()
            .find(|c| c.targets.contains(&ids.about_image))
            .expect("about cue exists");
        assert!(about.fired);
        assert_eq!(plays_on(&page, ids.contact_forms[0]), 0);
    }

    #[test]
    fn test_viewport_cue_already_visible_at_load() {
        let (mut page, ids, mut seq) = mounted();
        page.scroll_to(4000.0);
        seq.on_load(&mut page);
        assert_eq!(plays_on(&page, ids.about_image), 1);
        assert_eq!(plays_on(&page, ids.contact_forms[1]), 1);
    }

    #[test]
    fn test_from_state_returns_to_rest() {
        let clock = ManualClock::default();
        let cfg = StageConfig::default();
        let (mut page, ids) = portfolio_page(clock.clone());
        let mut seq = EntranceSequencer::mount(&page, &cfg.cues).expect("cues resolve");
        seq.on_load(&mut page);

        assert_eq!(page.style(ids.hero_subtitle, StyleProp::Opacity), 0.0);
        clock.advance(Duration::from_millis(1500));
        assert_eq!(page.style(ids.hero_subtitle, StyleProp::Opacity), 1.0);
        assert_eq!(page.style(ids.hero_lines[0], StyleProp::YPercent), 0.0);
    }

    #[test]
    fn test_unmatched_cues_are_dropped() {
        let (page, _) = portfolio_page(ManualClock::default());
        let mut declared = CueConfig::portfolio();
        declared[0].targets = ".missing".into();
        let seq = EntranceSequencer::mount(&page, &declared).expect("others resolve");
        assert_eq!(seq.cues().len(), 4);

        let none = vec![CueConfig {
            targets: ".missing".into(),
            ..declared[1].clone()
        }];
        assert!(matches!(
            EntranceSequencer::mount(&page, &none),
            Err(StageError::MissingElement { .. })
        ));
    }
}
