use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// The fixed set of bundle slots a quote recognizes, in canonical render
/// order. Both storage slots draw from the single `storage` catalog category
/// and are filled as a group during text matching.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Slot {
    Host,
    Memory,
    StoragePrimary,
    StorageSecondary,
    Gpu,
    Psu,
    Monitor,
}

impl Slot {
    pub const ALL: [Slot; 7] = [
        Slot::Host,
        Slot::Memory,
        Slot::StoragePrimary,
        Slot::StorageSecondary,
        Slot::Gpu,
        Slot::Psu,
        Slot::Monitor,
    ];

    /// Slots that participate in budget optimization. The secondary storage
    /// slot is excluded; it only fills from explicit text matches.
    pub const SEARCHED: [Slot; 6] =
        [Slot::Host, Slot::Memory, Slot::StoragePrimary, Slot::Gpu, Slot::Psu, Slot::Monitor];

    pub fn category(self) -> &'static str {
        match self {
            Slot::Host => "host",
            Slot::Memory => "memory",
            Slot::StoragePrimary | Slot::StorageSecondary => "storage",
            Slot::Gpu => "gpu",
            Slot::Psu => "psu",
            Slot::Monitor => "monitor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::Host => "host",
            Slot::Memory => "memory",
            Slot::StoragePrimary => "storage",
            Slot::StorageSecondary => "storage2",
            Slot::Gpu => "gpu",
            Slot::Psu => "psu",
            Slot::Monitor => "monitor",
        }
    }

    /// Slots fed by a catalog category, in group fill order. Empty for
    /// categories outside the fixed slot set.
    pub fn slots_for_category(category: &str) -> &'static [Slot] {
        match category {
            "host" => &[Slot::Host],
            "memory" => &[Slot::Memory],
            "storage" => &[Slot::StoragePrimary, Slot::StorageSecondary],
            "gpu" => &[Slot::Gpu],
            "psu" => &[Slot::Psu],
            "monitor" => &[Slot::Monitor],
            _ => &[],
        }
    }

    pub fn default_quantity(self) -> u32 {
        match self {
            Slot::StorageSecondary => 0,
            _ => 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotChoice {
    pub model: Option<String>,
    pub quantity: u32,
}

impl SlotChoice {
    /// A slot contributes to cost and rendering only when it has a model and
    /// a positive quantity.
    pub fn is_filled(&self) -> bool {
        self.model.as_deref().is_some_and(|model| !model.is_empty()) && self.quantity > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    choices: BTreeMap<Slot, SlotChoice>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::initial()
    }
}

impl Selection {
    pub fn initial() -> Self {
        let choices = Slot::ALL
            .into_iter()
            .map(|slot| (slot, SlotChoice { model: None, quantity: slot.default_quantity() }))
            .collect();
        Self { choices }
    }

    pub fn choice(&self, slot: Slot) -> &SlotChoice {
        // A deserialized selection may lack a slot entry; treat it as empty.
        static EMPTY: SlotChoice = SlotChoice { model: None, quantity: 0 };
        self.choices.get(&slot).unwrap_or(&EMPTY)
    }

    pub fn set_model(&mut self, slot: Slot, model: impl Into<String>) {
        let choice = self.choices.entry(slot).or_default();
        let model = model.into();
        choice.model = if model.is_empty() { None } else { Some(model) };
    }

    pub fn set_quantity(&mut self, slot: Slot, quantity: u32) {
        self.choices.entry(slot).or_default().quantity = quantity;
    }

    /// Restores a single slot to its initial state.
    pub fn clear_slot(&mut self, slot: Slot) {
        self.choices
            .insert(slot, SlotChoice { model: None, quantity: slot.default_quantity() });
    }

    /// Slots that contribute to cost and rendering, in canonical order.
    pub fn filled(&self) -> impl Iterator<Item = (Slot, &SlotChoice)> {
        self.choices
            .iter()
            .filter(|(_, choice)| choice.is_filled())
            .map(|(slot, choice)| (*slot, choice))
    }

    /// True when no slot carries a model at all, the matcher's signal for
    /// unresolvable input.
    pub fn is_unresolved(&self) -> bool {
        self.choices.values().all(|choice| choice.model.is_none())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomItem {
    pub id: Uuid,
    pub category: String,
    pub model: String,
    pub cost: Decimal,
    pub quantity: u32,
}

impl CustomItem {
    /// Boundary validation: malformed custom items never enter cost
    /// accumulation.
    pub fn new(
        category: impl Into<String>,
        model: impl Into<String>,
        cost: Decimal,
        quantity: u32,
    ) -> Result<Self, DomainError> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(DomainError::InvalidCustomItem { reason: "model is required".to_string() });
        }
        if cost <= Decimal::ZERO {
            return Err(DomainError::InvalidCustomItem {
                reason: format!("cost must be positive, got {cost}"),
            });
        }
        if quantity == 0 {
            return Err(DomainError::InvalidCustomItem {
                reason: "quantity must be positive".to_string(),
            });
        }

        Ok(Self { id: Uuid::new_v4(), category: category.into(), model, cost, quantity })
    }

    pub fn is_billable(&self) -> bool {
        !self.model.is_empty() && self.quantity > 0
    }
}

/// Splits the combined `model,cost` entry field used by the quick-add row.
/// A missing cost part parses to zero and is rejected downstream.
pub fn parse_custom_entry(entry: &str) -> (String, Decimal) {
    let mut parts = entry.splitn(2, [',', '，']);
    let model = parts.next().unwrap_or_default().trim().to_string();
    let cost = parts
        .next()
        .and_then(|raw| raw.trim().parse::<Decimal>().ok())
        .unwrap_or(Decimal::ZERO);
    (model, cost)
}
