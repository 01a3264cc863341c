//! Charge-ability cache
//!
//! Records abilities known to have more than one charge. Entries are only
//! added while charge counts are plainly readable, so the cache still answers
//! once the host starts redacting counts. Loadout changes clear it wholesale.

use hashbrown::HashSet;

use crate::host::{AbilityId, SpellApi, guarded};

#[derive(Debug, Clone, Default)]
pub struct ChargeTracker {
    known: HashSet<AbilityId>,
}

impl ChargeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the ability was not known before.
    pub fn record(&mut self, ability: AbilityId) -> bool {
        self.known.insert(ability)
    }

    pub fn is_known(&self, ability: AbilityId) -> bool {
        self.known.contains(&ability)
    }

    pub fn clear(&mut self) {
        if !self.known.is_empty() {
            tracing::debug!(count = self.known.len(), "clearing charge cache");
        }
        self.known.clear();
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Read the ability's charge counts and record it when it has more than
    /// one charge. Returns `(current, maximum)` when both were plain.
    pub fn observe<A: SpellApi + ?Sized>(
        &mut self,
        api: &A,
        ability: AbilityId,
    ) -> Option<(u32, u32)> {
        let info = guarded("charge_info", api.charge_info(ability)).flatten()?;
        let (current, maximum) = info.readable()?;
        if maximum > 1 && self.record(ability) {
            tracing::trace!(ability, maximum, "recorded charge ability");
        }
        Some((current, maximum))
    }

    /// Walk the whole loadout. Returns how many abilities are known afterwards.
    pub fn prescan<A: SpellApi + ?Sized>(&mut self, api: &A) -> usize {
        let abilities = guarded("known_abilities", api.known_abilities()).unwrap_or_default();
        for ability in &abilities {
            self.observe(api, *ability);
        }
        tracing::debug!(
            scanned = abilities.len(),
            known = self.known.len(),
            "charge pre-scan finished"
        );
        self.known.len()
    }
}
