use std::collections::HashSet;

use vista_core::{ElementId, PageHost, PointerConfig, StageError, StyleProp, Vec2};

/// Where the cursor proxy is heading. The animation engine carries it there
/// over the follow duration, which is what makes it trail the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerProxy {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

pub struct PointerFollower {
    cursor: ElementId,
    interactive: HashSet<ElementId>,
    config: PointerConfig,
    proxy: PointerProxy,
}

impl PointerFollower {
    pub fn mount(
        host: &dyn PageHost,
        cursor: &str,
        interactive: &str,
        config: &PointerConfig,
    ) -> Result<Self, StageError> {
        let cursor = host.query(cursor).ok_or_else(|| StageError::missing(cursor))?;
        Ok(Self {
            cursor,
            interactive: host.query_all(interactive).into_iter().collect(),
            config: config.clone(),
            proxy: PointerProxy {
                x: 0.0,
                y: 0.0,
                scale: config.rest_scale,
            },
        })
    }

    pub fn proxy(&self) -> PointerProxy {
        self.proxy
    }

    pub fn on_move(&mut self, pos: Vec2, host: &mut dyn PageHost) {
        self.proxy.x = pos.x;
        self.proxy.y = pos.y;
        host.tween(
            self.cursor,
            &[(StyleProp::X, pos.x), (StyleProp::Y, pos.y)],
            self.config.spec(),
        );
    }

    /// Returns false when `el` is not an interactive element.
    pub fn on_enter(&mut self, el: ElementId, host: &mut dyn PageHost) -> bool {
        self.rescale(el, self.config.hover_scale, host)
    }

    pub fn on_leave(&mut self, el: ElementId, host: &mut dyn PageHost) -> bool {
        self.rescale(el, self.config.rest_scale, host)
    }

    fn rescale(&mut self, el: ElementId, scale: f32, host: &mut dyn PageHost) -> bool {
        if !self.interactive.contains(&el) {
            return false;
        }
        self.proxy.scale = scale;
        host.tween(self.cursor, &[(StyleProp::Scale, scale)], self.config.spec());
        true
    }
}
