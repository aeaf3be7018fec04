//! # Scroll-reactive stage
//!
//! `vista-stage` coordinates the moving parts of a long-scroll portfolio
//! page. A [`Stage`] owns one instance of each component and routes a single
//! stream of [`PageEvent`](vista_core::PageEvent)s to them:
//!
//! - [`pinned`]: pins the gallery and slides its track sideways while the
//!   page scrolls through it. Range and travel come from [`metrics`].
//! - [`view_mode`]: filter controls switch between that gallery and
//!   discrete category grids, creating and releasing the pin binding.
//! - [`snap`]: eases one section to viewport center after scrolling pauses.
//! - [`entrance`]: one-shot reveal animations on load or viewport entry.
//! - [`pointer`]: a trailing cursor proxy that grows over links.
//! - [`parallax`]: a background layer drifting with scroll.
//!
//! A component whose elements are absent is disabled at mount and logged,
//! never retried. Nothing here is fatal to the page.
//!
//! ```rust
//! use std::sync::Arc;
//! use vista_core::{ManualClock, PageEvent, StageConfig, testing::portfolio_page};
//! use vista_stage::{Components, Stage, ViewMode};
//!
//! let clock = ManualClock::default();
//! let (page, ids) = portfolio_page(clock.clone());
//! let mut stage = Stage::mount(page, &StageConfig::default(), Arc::new(clock));
//! assert!(stage.enabled().contains(Components::GALLERY | Components::SNAP));
//!
//! stage.handle(PageEvent::Load);
//! stage.handle(PageEvent::Click(ids.filter_web));
//! assert_eq!(stage.mode(), Some(&ViewMode::Filtered("web".into())));
//!
//! let page = stage.teardown();
//! assert_eq!(page.live_bindings(), 0);
//! ```

pub mod entrance;
pub mod metrics;
pub mod parallax;
pub mod pinned;
pub mod pointer;
pub mod snap;
pub mod stage;
pub mod view_mode;

pub use entrance::{AnimationCue, CueTrigger, EntranceSequencer};
pub use metrics::{TrackMetrics, TrackSize};
pub use parallax::ParallaxLayer;
pub use pinned::{Binding, PinnedScroller, Track};
pub use pointer::{PointerFollower, PointerProxy};
pub use snap::{SnapCoordinator, SnapState, distance_to_center};
pub use stage::{Components, Stage, StageTask};
pub use view_mode::{ALL, Filter, FilterTarget, ViewMode, ViewModeSwitch};
