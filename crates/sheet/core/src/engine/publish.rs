//! Derived-state publishing.

use super::SheetEngine;
use super::edit::Edit;
use super::errors::EngineError;
use crate::character::Character;
use crate::progression::{UsageCounts, Violation};
use crate::stats::{DerivedStats, ResolveError};

/// What the presentation layer reads after every edit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Published {
    /// Bumped once per accepted edit; 0 for the opened record.
    pub revision: u64,
    pub derived: DerivedStats,
    /// Option id → times taken, for remaining-uses affordances.
    pub usage: UsageCounts,
    /// Repairs triggered by the edit that produced this revision.
    pub repairs: Vec<Violation>,
}

/// Receiver of published snapshots.
pub trait SnapshotSink {
    fn publish(&mut self, snapshot: &Published);
}

impl<F> SnapshotSink for F
where
    F: FnMut(&Published),
{
    fn publish(&mut self, snapshot: &Published) {
        self(snapshot)
    }
}

/// Single-writer edit session over one character.
///
/// A rejected edit leaves the session exactly as it was; nothing is
/// published for it.
pub struct SheetSession<'a> {
    engine: SheetEngine<'a>,
    character: Character,
    latest: Published,
    sinks: Vec<Box<dyn SnapshotSink + 'a>>,
}

impl<'a> SheetSession<'a> {
    /// Repairs and resolves `character`, publishing revision 0.
    pub fn open(engine: SheetEngine<'a>, mut character: Character) -> Result<Self, ResolveError> {
        let repairs = engine.recompute(&mut character)?;
        let latest = Published {
            revision: 0,
            derived: character.derived_stats().clone(),
            usage: engine.usage(&character),
            repairs,
        };
        Ok(Self {
            engine,
            character,
            latest,
            sinks: Vec::new(),
        })
    }

    pub fn apply(&mut self, edit: Edit) -> Result<&Published, EngineError> {
        let outcome = self.engine.apply_edit(&self.character, edit)?;
        self.character = outcome.character;
        self.latest = Published {
            revision: self.latest.revision + 1,
            derived: self.character.derived_stats().clone(),
            usage: self.engine.usage(&self.character),
            repairs: outcome.repairs,
        };

        tracing::info!(
            character = %self.character.name,
            revision = self.latest.revision,
            repairs = self.latest.repairs.len(),
            "published snapshot"
        );
        for sink in &mut self.sinks {
            sink.publish(&self.latest);
        }
        Ok(&self.latest)
    }

    /// Registers `sink` and hands it the current snapshot straight away.
    pub fn subscribe(&mut self, sink: impl SnapshotSink + 'a) {
        let mut sink: Box<dyn SnapshotSink + 'a> = Box::new(sink);
        sink.publish(&self.latest);
        self.sinks.push(sink);
    }

    pub fn snapshot(&self) -> &Published {
        &self.latest
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn into_character(self) -> Character {
        self.character
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::character::Slot;
    use crate::config::RulesConfig;
    use crate::ids::OptionId;
    use crate::testing::{fixture_catalog, guardian};

    #[test]
    fn every_accepted_edit_is_published_once() {
        let catalog = fixture_catalog();
        let rules = RulesConfig::default();
        let engine = SheetEngine::new(&catalog, &rules);
        let seen = RefCell::new(Vec::new());

        let mut session = SheetSession::open(engine, guardian("Rhea")).expect("open");
        session.subscribe(|snapshot: &Published| seen.borrow_mut().push(snapshot.revision));

        session.apply(Edit::SetLevel(2)).expect("level");
        session
            .apply(Edit::SelectOption {
                level: 2,
                slot: Slot::A,
                option_id: Some("hp_slot".into()),
            })
            .expect("select");
        let rejected = session.apply(Edit::SetLevel(0));
        assert!(rejected.is_err());

        drop(session);
        assert_eq!(seen.into_inner(), vec![0, 1, 2]);
    }

    #[test]
    fn snapshot_carries_usage_counts() {
        let catalog = fixture_catalog();
        let rules = RulesConfig::default();
        let engine = SheetEngine::new(&catalog, &rules);
        let mut session = SheetSession::open(engine, guardian("Rhea")).expect("open");
        session.apply(Edit::SetLevel(3)).expect("level");
        for level in [2, 3] {
            session
                .apply(Edit::SelectOption {
                    level,
                    slot: Slot::B,
                    option_id: Some("hp_slot".into()),
                })
                .expect("select");
        }
        let snapshot = session.snapshot();
        assert_eq!(snapshot.revision, 3);
        assert_eq!(snapshot.usage.get(&OptionId::from("hp_slot")), Some(&2));
        assert_eq!(snapshot.derived.max_hp, 9);
    }

    #[test]
    fn rejected_edit_leaves_the_session_unchanged() {
        let catalog = fixture_catalog();
        let rules = RulesConfig::default();
        let engine = SheetEngine::new(&catalog, &rules);
        let mut session = SheetSession::open(engine, guardian("Rhea")).expect("open");
        let before = session.character().clone();
        let err = session
            .apply(Edit::SelectExperiences {
                level: 4,
                slot: Slot::A,
                indices: vec![0],
            })
            .expect_err("level not reached");
        assert!(matches!(err, EngineError::Edit(_)));
        assert_eq!(session.character(), &before);
        assert_eq!(session.snapshot().revision, 0);
        assert_eq!(session.into_character(), before);
    }
}
