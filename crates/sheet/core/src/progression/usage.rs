//! Option usage counting.

use std::collections::BTreeMap;

use crate::catalog::CatalogOracle;
use crate::character::{Character, Slot};
use crate::config::RulesConfig;
use crate::ids::OptionId;

/// Option id → times taken.
pub type UsageCounts = BTreeMap<OptionId, u32>;

/// Which slots one occurrence of an option occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Span {
    Single(Slot),
    /// A two-slot option mirrored across A and B.
    Both,
}

/// One taking of an option at one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occurrence {
    pub level: u8,
    pub span: Span,
    pub option_id: OptionId,
}

impl Occurrence {
    /// The slot reported for this occurrence, `None` for a mirrored pair.
    pub fn slot(&self) -> Option<Slot> {
        match self.span {
            Span::Single(slot) => Some(slot),
            Span::Both => None,
        }
    }
}

/// Every option occurrence up to the current level, oldest first.
///
/// A two-slot option present in both slots of one level is a single
/// occurrence. Unknown option ids are still listed.
pub fn occurrences<C>(character: &Character, catalog: &C) -> Vec<Occurrence>
where
    C: CatalogOracle + ?Sized,
{
    let mut found = Vec::new();
    let levels = character
        .level_up_choices
        .range(..=character.level)
        .filter(|(level, _)| **level >= RulesConfig::FIRST_LEVEL_UP);
    for (level, slots) in levels {
        let (a, b) = (&slots.a.option_id, &slots.b.option_id);
        if let (Some(a), Some(b)) = (a, b) {
            let two_slot = catalog
                .level_up_option(a)
                .is_some_and(|option| option.costs_two_slots);
            if a == b && two_slot {
                found.push(Occurrence {
                    level: *level,
                    span: Span::Both,
                    option_id: a.clone(),
                });
                continue;
            }
        }
        for (slot, option_id) in [(Slot::A, a), (Slot::B, b)] {
            if let Some(option_id) = option_id {
                found.push(Occurrence {
                    level: *level,
                    span: Span::Single(slot),
                    option_id: option_id.clone(),
                });
            }
        }
    }
    found
}

/// Usage count per option id, for remaining-uses displays.
pub fn option_usage<C>(character: &Character, catalog: &C) -> UsageCounts
where
    C: CatalogOracle + ?Sized,
{
    let mut usage = UsageCounts::new();
    for occurrence in occurrences(character, catalog) {
        *usage.entry(occurrence.option_id).or_default() += 1;
    }
    usage
}
