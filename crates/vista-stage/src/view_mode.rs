//! Gallery view modes.
//!
//! The work section shows either the continuous pinned gallery or one
//! category grid, never both. Filter controls are read once from markup; the
//! control whose id was last selected carries the active flag.

use smallvec::SmallVec;
use vista_core::{
    BindingHandle, ElementId, LayoutConfig, MinHeight, PageHost, PinConfig, Selectors,
    StageError,
};

use crate::metrics::TrackSize;
use crate::pinned::Track;

/// Filter id that selects the continuous gallery.
pub const ALL: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Continuous,
    Filtered(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterTarget {
    Continuous,
    Grid(ElementId),
    /// The page declares the control but has no grid for it.
    Missing,
}

#[derive(Clone, Debug)]
pub struct Filter {
    pub id: String,
    pub control: ElementId,
    pub target: FilterTarget,
    pub active: bool,
}

pub struct ViewModeSwitch {
    filters: SmallVec<[Filter; 6]>,
    grids: SmallVec<[ElementId; 6]>,
    gallery: Option<ElementId>,
    section: Option<ElementId>,
    track: Option<Track>,
    mode: ViewMode,
    active_flag: String,
    layout: LayoutConfig,
}

impl ViewModeSwitch {
    /// Read filter controls and grids from the page and pin the gallery.
    /// Fails only when the page has neither a gallery track nor filters.
    pub fn mount(
        host: &mut dyn PageHost,
        selectors: &Selectors,
        pin: &PinConfig,
        layout: &LayoutConfig,
    ) -> Result<Self, StageError> {
        let gallery = host.query(&selectors.gallery);
        let track = match (gallery, host.query(&selectors.track)) {
            (Some(region), Some(track)) => Some(Track::new(region, track, pin, host)),
            _ => None,
        };

        let mut filters = SmallVec::new();
        for control in host.query_all(&selectors.filters) {
            let Some(id) = host.attribute(control, &selectors.filter_attribute) else {
                log::debug!("filter control {control:?} has no {}", selectors.filter_attribute);
                continue;
            };
            let target = if id == ALL {
                FilterTarget::Continuous
            } else {
                host.query(&selectors.grid_for(&id))
                    .map_or(FilterTarget::Missing, FilterTarget::Grid)
            };
            filters.push(Filter {
                id,
                control,
                target,
                active: false,
            });
        }

        if track.is_none() && filters.is_empty() {
            return Err(StageError::missing(format!(
                "{}, {}",
                selectors.track, selectors.filters
            )));
        }

        let mut switch = Self {
            filters,
            grids: host.query_all(&selectors.grids).into_iter().collect(),
            gallery,
            section: host.query(&selectors.section),
            track,
            mode: ViewMode::Continuous,
            active_flag: selectors.active_flag.clone(),
            layout: layout.clone(),
        };
        if let Some(track) = switch.track.as_mut() {
            track.pin(host);
        }
        Ok(switch)
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn active_filter(&self) -> Option<&Filter> {
        self.filters.iter().find(|f| f.active)
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    pub fn is_pinned(&self) -> bool {
        self.track.as_ref().is_some_and(Track::is_pinned)
    }

    /// Filter id declared by a control, if `el` is one.
    pub fn filter_for_control(&self, el: ElementId) -> Option<&str> {
        self.filters
            .iter()
            .find(|f| f.control == el)
            .map(|f| f.id.as_str())
    }

    pub fn select_filter(&mut self, id: &str, host: &mut dyn PageHost) -> &ViewMode {
        self.mark_active(id, host);

        if id == ALL {
            self.show_continuous(host);
        } else {
            self.show_grid(id, host);
        }
        &self.mode
    }

    fn mark_active(&mut self, id: &str, host: &mut dyn PageHost) {
        let mut claimed = false;
        for filter in self.filters.iter_mut() {
            let on = !claimed && filter.id == id;
            claimed |= on;
            filter.active = on;
            host.set_flag(filter.control, &self.active_flag, on);
        }
    }

    fn show_continuous(&mut self, host: &mut dyn PageHost) {
        if self.mode == ViewMode::Continuous && (self.track.is_none() || self.is_pinned()) {
            return;
        }
        if let Some(gallery) = self.gallery {
            host.set_visible(gallery, true);
        }
        self.hide_grids(host);
        self.set_min_height(self.layout.continuous_min_height, host);
        if let Some(track) = self.track.as_mut() {
            let size = track.remeasure(&*host);
            log::debug!(
                "gallery shown: content {}px, viewport {}px",
                size.content_width,
                size.viewport_width
            );
            track.pin(host);
            host.refresh_geometry();
        }
        self.mode = ViewMode::Continuous;
        log::debug!("view mode: continuous");
    }

    fn show_grid(&mut self, id: &str, host: &mut dyn PageHost) {
        self.hide_grids(host);
        match self.filters.iter().find(|f| f.id == id).map(|f| f.target) {
            Some(FilterTarget::Grid(grid)) => host.set_flag(grid, &self.active_flag, true),
            _ => log::warn!(
                "{}",
                StageError::InvalidFilterTarget {
                    filter: id.to_string()
                }
            ),
        }
        if let Some(gallery) = self.gallery {
            host.set_visible(gallery, false);
        }
        self.set_min_height(self.layout.filtered_min_height, host);
        if let Some(track) = self.track.as_mut() {
            track.unpin(host);
        }
        if self.mode != ViewMode::Filtered(id.to_string()) {
            log::debug!("view mode: filtered `{id}`");
        }
        self.mode = ViewMode::Filtered(id.to_string());
    }

    fn hide_grids(&self, host: &mut dyn PageHost) {
        for &grid in &self.grids {
            host.set_flag(grid, &self.active_flag, false);
        }
    }

    fn set_min_height(&self, hint: MinHeight, host: &mut dyn PageHost) {
        if let Some(section) = self.section {
            host.set_min_height(section, hint);
        }
    }

    pub fn on_progress(
        &self,
        binding: BindingHandle,
        progress: f32,
        host: &mut dyn PageHost,
    ) -> Option<f32> {
        self.track.as_ref()?.on_progress(binding, progress, host)
    }

    /// Re-measure the track in either mode; never changes the mode.
    pub fn on_resize(&self, host: &mut dyn PageHost) -> Option<TrackSize> {
        self.track.as_ref().map(|t| t.on_resize(host))
    }

    pub fn teardown(&mut self, host: &mut dyn PageHost) {
        if let Some(track) = self.track.as_mut() {
            track.unpin(host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::testing::{FakePage, HostCall, PortfolioPage, portfolio_page};
    use vista_core::{ManualClock, StageConfig};

    fn mounted() -> (FakePage, PortfolioPage, ViewModeSwitch) {
        let cfg = StageConfig::default();
        let (mut page, ids) = portfolio_page(ManualClock::default());
        let switch = ViewModeSwitch::mount(&mut page, &cfg.selectors, &cfg.pin, &cfg.layout)
            .expect("portfolio page has a gallery");
        (page, ids, switch)
    }

    fn active_count(switch: &ViewModeSwitch) -> usize {
        switch.filters().iter().filter(|f| f.active).count()
    }

    #[test]
    fn test_mount_reads_filters_and_pins() {
        let (page, ids, switch) = mounted();
        assert_eq!(switch.mode(), &ViewMode::Continuous);
        assert!(switch.is_pinned());
        assert_eq!(page.pinned_bindings(), 1);

        let targets: Vec<_> = switch.filters().iter().map(|f| (f.id.as_str(), f.target)).collect();
        assert_eq!(
            targets,
            vec![
                ("all", FilterTarget::Continuous),
                ("branding", FilterTarget::Grid(ids.branding_grid)),
                ("web", FilterTarget::Grid(ids.web_grid)),
                ("print", FilterTarget::Missing),
            ]
        );
        assert_eq!(switch.filter_for_control(ids.filter_web), Some("web"));
        assert_eq!(switch.filter_for_control(ids.track), None);
    }

    #[test]
    fn test_select_grid_releases_binding() {
        let (mut page, ids, mut switch) = mounted();
        let mode = switch.select_filter("branding", &mut page).clone();

        assert_eq!(mode, ViewMode::Filtered("branding".into()));
        assert!(!switch.is_pinned());
        assert_eq!(page.live_bindings(), 0);
        assert!(page.flag(ids.branding_grid, "active"));
        assert!(!page.flag(ids.web_grid, "active"));
        assert!(!page.is_visible(ids.gallery));
        assert!(page.flag(ids.filter_branding, "active"));
        assert_eq!(page.min_height(ids.work), Some(MinHeight::Vh(150.0)));
        assert_eq!(active_count(&switch), 1);
    }

    #[test]
    fn test_switch_between_grids() {
        let (mut page, ids, mut switch) = mounted();
        switch.select_filter("branding", &mut page);
        switch.select_filter("web", &mut page);

        assert!(!page.flag(ids.branding_grid, "active"));
        assert!(page.flag(ids.web_grid, "active"));
        assert!(!page.flag(ids.filter_branding, "active"));
        assert!(page.flag(ids.filter_web, "active"));
        assert_eq!(active_count(&switch), 1);
    }

    #[test]
    fn test_all_restores_continuous() {
        let (mut page, ids, mut switch) = mounted();
        switch.select_filter("web", &mut page);
        page.take_calls();

        switch.select_filter(ALL, &mut page);
        assert_eq!(switch.mode(), &ViewMode::Continuous);
        assert!(switch.is_pinned());
        assert_eq!(page.live_bindings(), 1);
        assert!(page.is_visible(ids.gallery));
        assert!(!page.flag(ids.web_grid, "active"));
        assert!(page.flag(ids.filter_all, "active"));
        assert_eq!(page.min_height(ids.work), Some(MinHeight::Auto));
        assert_eq!(page.count(|c| *c == HostCall::Refresh), 1);
    }

    #[test]
    fn test_all_measures_content_changed_while_filtered() {
        let (mut page, ids, mut switch) = mounted();
        switch.select_filter("web", &mut page);
        page.set_scroll_width(ids.track, 4000.0);

        switch.select_filter(ALL, &mut page);
        let track = switch.track().expect("track mounted");
        assert_eq!(track.size().content_width, 4000.0);
        let handle = track.binding().expect("binding is live");
        assert_eq!(switch.on_progress(handle, 1.0, &mut page), Some(-3000.0));
    }

    #[test]
    fn test_all_recovers_from_resize_while_hidden() {
        let (mut page, ids, mut switch) = mounted();
        switch.select_filter("branding", &mut page);
        // A hidden gallery lays out with no width.
        page.set_scroll_width(ids.track, 0.0);
        page.resize(vista_core::Size {
            width: 1200.0,
            height: 900.0,
        });
        let hidden = switch.on_resize(&mut page).expect("track mounted");
        assert_eq!(hidden.content_width, 0.0);

        page.set_scroll_width(ids.track, 3000.0);
        switch.select_filter(ALL, &mut page);
        let track = switch.track().expect("track mounted");
        assert_eq!(track.size().content_width, 3000.0);
        assert_eq!(track.size().viewport_width, 1200.0);
        let handle = track.binding().expect("binding is live");
        match &page.trigger(handle).expect("observer knows the binding").end {
            vista_core::TriggerEnd::After(length) => assert_eq!(length.get(), 3000.0),
            other => panic!("unexpected end {other:?}"),
        }
        assert_eq!(switch.on_progress(handle, 1.0, &mut page), Some(-1800.0));
    }

    #[test]
    fn test_select_all_twice_is_idempotent() {
        let (mut page, ids, mut switch) = mounted();
        switch.select_filter("web", &mut page);
        switch.select_filter(ALL, &mut page);
        let binding = switch.track().and_then(Track::binding);
        page.take_calls();

        switch.select_filter(ALL, &mut page);
        assert_eq!(switch.track().and_then(Track::binding), binding);
        assert_eq!(page.live_bindings(), 1);
        assert_eq!(page.count(|c| matches!(c, HostCall::Observe { .. })), 0);
        assert_eq!(page.count(|c| *c == HostCall::Refresh), 0);
        assert!(page.flag(ids.filter_all, "active"));
    }

    #[test]
    fn test_same_grid_twice_is_idempotent() {
        let (mut page, ids, mut switch) = mounted();
        switch.select_filter("web", &mut page);
        switch.select_filter("web", &mut page);
        assert_eq!(switch.mode(), &ViewMode::Filtered("web".into()));
        assert!(page.flag(ids.web_grid, "active"));
        assert_eq!(page.count(|c| matches!(c, HostCall::Release(_))), 1);
        assert_eq!(active_count(&switch), 1);
    }

    #[test]
    fn test_unknown_target_still_hides_gallery() {
        let (mut page, ids, mut switch) = mounted();
        switch.select_filter("print", &mut page);

        assert_eq!(switch.mode(), &ViewMode::Filtered("print".into()));
        assert!(!page.is_visible(ids.gallery));
        assert!(!switch.is_pinned());
        assert!(!page.flag(ids.branding_grid, "active"));
        assert!(!page.flag(ids.web_grid, "active"));

        switch.select_filter("nonsense", &mut page);
        assert_eq!(active_count(&switch), 0);
        assert_eq!(switch.mode(), &ViewMode::Filtered("nonsense".into()));
    }

    #[test]
    fn test_mutual_exclusion_over_sequence() {
        let (mut page, ids, mut switch) = mounted();
        for id in ["web", "all", "branding", "branding", "print", "all", "all", "web"] {
            switch.select_filter(id, &mut page);
            assert!(active_count(&switch) <= 1);
            let grids_on = [ids.branding_grid, ids.web_grid]
                .iter()
                .filter(|&&g| page.flag(g, "active"))
                .count();
            match switch.mode() {
                ViewMode::Continuous => {
                    assert!(switch.is_pinned());
                    assert_eq!(grids_on, 0);
                    assert_eq!(page.live_bindings(), 1);
                }
                ViewMode::Filtered(_) => {
                    assert!(!switch.is_pinned());
                    assert!(grids_on <= 1);
                    assert_eq!(page.live_bindings(), 0);
                }
            }
        }
    }

    #[test]
    fn test_mount_without_gallery_or_filters_fails() {
        let cfg = StageConfig::default();
        let mut page = FakePage::new(
            vista_core::Size {
                width: 800.0,
                height: 600.0,
            },
            ManualClock::default(),
        );
        let err = ViewModeSwitch::mount(&mut page, &cfg.selectors, &cfg.pin, &cfg.layout);
        assert!(matches!(err, Err(StageError::MissingElement { .. })));
    }
}
