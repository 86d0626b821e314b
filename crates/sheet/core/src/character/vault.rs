//! Domain-card vault derivation.
//!
//! The vault is never edited directly: it is rebuilt from the starting cards,
//! the per-level reward cards and any card chosen through a level-up option.

use super::{Character, Slot};
use crate::ids::DomainCardId;

/// Where a vault card was acquired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardOrigin {
    /// Picked at character creation.
    Starting,
    /// The card granted for reaching a level.
    LevelReward(u8),
    /// Chosen through a domain-card level-up option.
    Choice { level: u8, slot: Slot },
}

impl CardOrigin {
    /// Level at which the card was acquired.
    pub fn level(&self) -> u8 {
        match self {
            Self::Starting => 1,
            Self::LevelReward(level) | Self::Choice { level, .. } => *level,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultEntry<'a> {
    pub card: &'a DomainCardId,
    pub origin: CardOrigin,
}

impl Character {
    /// Every card acquisition up to the current level, duplicates included,
    /// in acquisition order.
    pub fn card_acquisitions(&self) -> Vec<VaultEntry<'_>> {
        let mut entries: Vec<VaultEntry<'_>> = self
            .starting_domain_cards
            .iter()
            .map(|card| VaultEntry {
                card,
                origin: CardOrigin::Starting,
            })
            .collect();

        for level in 2..=self.level {
            if let Some(card) = self.level_up_domain_cards.get(&level) {
                entries.push(VaultEntry {
                    card,
                    origin: CardOrigin::LevelReward(level),
                });
            }
            if let Some(slots) = self.level_up_choices.get(&level) {
                for slot in [Slot::A, Slot::B] {
                    if let Some(card) = &slots.get(slot).selected_domain_card {
                        entries.push(VaultEntry {
                            card,
                            origin: CardOrigin::Choice { level, slot },
                        });
                    }
                }
            }
        }

        entries
    }

    /// Acquired cards deduplicated by identity, first acquisition kept.
    pub fn vault(&self) -> Vec<VaultEntry<'_>> {
        let mut vault: Vec<VaultEntry<'_>> = Vec::new();
        for entry in self.card_acquisitions() {
            if !vault.iter().any(|kept| kept.card == entry.card) {
                vault.push(entry);
            }
        }
        vault
    }

    /// Loadout cards, skipping indices that fall outside the vault and
    /// repeats of an index already listed.
    pub fn loadout_cards(&self) -> Vec<&DomainCardId> {
        let vault = self.vault();
        let mut cards: Vec<&DomainCardId> = Vec::new();
        for (position, index) in self.loadout.iter().enumerate() {
            if self.loadout[..position].contains(index) {
                continue;
            }
            if let Some(entry) = vault.get(*index) {
                cards.push(entry.card);
            }
        }
        cards
    }

    /// Owned card ids of [`Self::vault`], in vault order.
    pub fn vault_cards(&self) -> Vec<DomainCardId> {
        self.vault()
            .into_iter()
            .map(|entry| entry.card.clone())
            .collect()
    }

    /// Re-points loadout indices at the cards they named when the vault was
    /// `before`. Entries whose card left the vault are dropped; indices that
    /// were already outside `before` are kept as they are.
    pub fn remap_loadout(&mut self, before: &[DomainCardId]) {
        let after = self.vault_cards();
        let remapped: Vec<usize> = self
            .loadout
            .iter()
            .filter_map(|&index| match before.get(index) {
                Some(card) => after.iter().position(|kept| kept == card),
                None => Some(index),
            })
            .collect();
        if remapped != self.loadout {
            tracing::debug!(before = ?self.loadout, after = ?remapped, "loadout remapped");
            self.loadout = remapped;
        }
    }
}
