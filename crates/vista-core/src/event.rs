use crate::geometry::Vec2;
use crate::host::{BindingHandle, ElementId};

/// Everything the page feeds into the orchestrator, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// Initial layout is ready and every component is mounted.
    Load,
    Scroll,
    Resize,
    PointerMove(Vec2),
    PointerEnter(ElementId),
    PointerLeave(ElementId),
    Click(ElementId),
    /// A scroll-observer binding advanced. `progress` is in [0, 1].
    Progress {
        binding: BindingHandle,
        progress: f32,
    },
}
