//! Production subsystem — continuous, rate-based resource accrual.
//!
//! Every tick, for each (building → resource) link:
//!   resource += building.production_rate * delta_seconds
//!
//! No rounding; fractions accumulate in the store. A link whose building
//! does not exist contributes nothing. Negative rates are applied as-is.

use crate::{
    config::ProductionLink,
    error::SimResult,
    state::GameState,
    subsystem::SimSubsystem,
};
use std::time::Duration;

pub struct ProductionSubsystem {
    links: Vec<ProductionLink>,
}

impl ProductionSubsystem {
    pub fn new(links: Vec<ProductionLink>) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &[ProductionLink] {
        &self.links
    }
}

impl Default for ProductionSubsystem {
    fn default() -> Self {
        Self::new(ProductionLink::defaults())
    }
}

impl SimSubsystem for ProductionSubsystem {
    fn name(&self) -> &'static str { "production" }

    fn process(&mut self, state: &mut GameState, delta: Duration) -> SimResult<()> {
        let seconds = delta.as_secs_f64();

        for link in &self.links {
            let rate = state
                .building(&link.building)
                .map_or(0.0, |b| b.production_rate);
            let total = state.add_resource(&link.resource, rate * seconds);
            log::debug!(
                "production: {} -> {} +{:.4} (total {total:.4})",
                link.building,
                link.resource,
                rate * seconds
            );
        }
        Ok(())
    }
}
