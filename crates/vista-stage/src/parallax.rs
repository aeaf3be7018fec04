use vista_core::{
    BindingHandle, ElementId, PageHost, ParallaxConfig, Scrub, StageError, StyleProp, Trigger,
    TriggerEnd, TriggerStart,
};

/// Background layer drifting down at a fraction of scroll speed while its
/// container passes through the viewport.
pub struct ParallaxLayer {
    layer: ElementId,
    travel_percent: f32,
    binding: Option<BindingHandle>,
}

impl ParallaxLayer {
    pub fn mount(
        host: &mut dyn PageHost,
        layer: &str,
        container: &str,
        config: &ParallaxConfig,
    ) -> Result<Self, StageError> {
        let layer_el = host.query(layer).ok_or_else(|| StageError::missing(layer))?;
        let region = host
            .query(container)
            .ok_or_else(|| StageError::missing(container))?;
        let binding = host.observe(Trigger {
            region,
            start: TriggerStart::ENTER,
            end: TriggerEnd::RegionExit,
            pin: false,
            scrub: Scrub::Locked,
        });
        Ok(Self {
            layer: layer_el,
            travel_percent: config.travel_percent,
            binding: Some(binding),
        })
    }

    pub fn on_progress(
        &self,
        binding: BindingHandle,
        progress: f32,
        host: &mut dyn PageHost,
    ) -> Option<f32> {
        if self.binding != Some(binding) {
            return None;
        }
        let shift = self.travel_percent * progress.clamp(0.0, 1.0);
        host.set_style(self.layer, StyleProp::YPercent, shift);
        Some(shift)
    }

    pub fn release(&mut self, host: &mut dyn PageHost) {
        if let Some(binding) = self.binding.take() {
            host.release(binding);
        }
    }
}
