//! # Host seams, events, and time
//!
//! `vista-core` is the vocabulary shared by the orchestrator and whatever
//! page hosts it. It has no opinion about what the page looks like.
//!
//! - [`ViewTree`], [`AnimationEngine`], [`ScrollObserver`]: what the
//!   orchestrator needs from the host. [`PageHost`] bundles all three.
//! - [`PageEvent`]: the single typed event stream the host feeds in.
//! - [`Timers`]: cancellable, debounce-aware scheduled tasks over a
//!   [`Clock`].
//! - [`StageConfig`]: selectors and pacing, loadable from JSON.
//!
//! ## Driving time
//!
//! Nothing reads the wall clock directly. Hosts install [`SystemClock`];
//! tests use [`ManualClock`] and advance it:
//!
//! ```rust
//! use std::sync::Arc;
//! use vista_core::*;
//! use web_time::Duration;
//!
//! #[derive(Clone, Copy, PartialEq, Debug)]
//! enum Task { Settle }
//!
//! let clock = ManualClock::default();
//! let mut timers = Timers::new(Arc::new(clock.clone()));
//! timers.debounce(Duration::from_millis(100), Task::Settle);
//! timers.debounce(Duration::from_millis(100), Task::Settle);
//! assert_eq!(timers.len(), 1);
//!
//! clock.advance(Duration::from_millis(100));
//! assert_eq!(timers.poll(), vec![Task::Settle]);
//! ```
//!
//! ## Shared measurements
//!
//! A [`Signal`] is a cloneable handle to a value. The orchestrator hands the
//! scroll observer a signal holding the gallery width, so a trigger range
//! defined as "one content width long" follows later re-measurements:
//!
//! ```rust
//! use vista_core::*;
//!
//! let width = signal(3000.0f32);
//! let seen_by_observer = width.clone();
//! width.set(3600.0);
//! assert_eq!(seen_by_observer.get(), 3600.0);
//! ```

pub mod animation;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod signal;
pub mod testing;
pub mod tests;
pub mod timer;

pub use animation::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use geometry::*;
pub use host::*;
pub use signal::*;
pub use timer::*;
