//! Modifier resolution.
//!
//! Collects the modifiers of every active source in [`SourceTier`] order,
//! filters them by their conditions, and folds them per target in
//! dependency order (traits, proficiency, everything else):
//!
//! 1. the last applicable `base` wins, otherwise the stat default;
//! 2. implicit level bonuses (tier achievements, thresholds + level);
//! 3. every applicable `bonus` is summed on top;
//! 4. the result is clamped to the target's [`StatBounds`].

use super::derived::{DerivedStats, StatBounds};
use super::evaluate::{CharacterSnapshot, all_hold};
use super::source::{SourceTier, SourcedModifier};
use crate::catalog::{CatalogOracle, OptionKind};
use crate::character::{Character, Slot, SubclassTier};
use crate::config::RulesConfig;
use crate::error::{ErrorSeverity, SheetError};
use crate::model::{Behaviour, Modifier, ModifierKind, StatTarget};

/// Fatal resolution failures.
///
/// A structurally valid character never produces one of these; they point at
/// a record that skipped repair or at a catalog missing entries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown {table} '{id}'")]
    UnknownReference { table: &'static str, id: String },

    #[error("arithmetic overflow while resolving {target}")]
    Overflow { target: String },
}

impl ResolveError {
    pub(crate) fn unknown(table: &'static str, id: impl ToString) -> Self {
        Self::UnknownReference {
            table,
            id: id.to_string(),
        }
    }

    fn overflow(target: StatTarget) -> Self {
        Self::Overflow {
            target: target.key(),
        }
    }
}

impl SheetError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownReference { .. } => "RESOLVE_UNKNOWN_REFERENCE",
            Self::Overflow { .. } => "RESOLVE_OVERFLOW",
        }
    }
}

/// Resolves the derived stats of `character`.
///
/// Pure: the same character, catalog and rules always give the same result.
pub fn resolve<C>(
    character: &Character,
    catalog: &C,
    rules: &RulesConfig,
) -> Result<DerivedStats, ResolveError>
where
    C: CatalogOracle + ?Sized,
{
    let snapshot = CharacterSnapshot::capture(character, catalog)?;
    let sources = active_modifiers(character, catalog)?;
    let applicable: Vec<&Modifier> = sources
        .iter()
        .map(|sourced| sourced.modifier.as_ref())
        .filter(|modifier| all_hold(modifier.conditions(), &snapshot))
        .collect();

    let mut derived = DerivedStats::default();
    for target in StatTarget::resolution_order() {
        let value = resolve_target(target, &applicable, character, rules, &derived)?;
        tracing::trace!(target = %target, value, "resolved stat");
        derived.set(target, value);
    }

    for (_, _, choice) in character.active_choices() {
        let Some(option_id) = &choice.option_id else {
            continue;
        };
        if catalog.option_kind(option_id) != Some(OptionKind::ExperienceBonus) {
            continue;
        }
        for index in &choice.selected_experiences {
            *derived.experience_bonuses.entry(*index).or_default() += 1;
        }
    }

    Ok(derived)
}

fn resolve_target(
    target: StatTarget,
    applicable: &[&Modifier],
    character: &Character,
    rules: &RulesConfig,
    resolved: &DerivedStats,
) -> Result<i32, ResolveError> {
    let on_target = || applicable.iter().filter(move |m| m.target() == target);

    let base = match on_target()
        .filter(|m| m.behaviour() == Behaviour::Base)
        .last()
    {
        Some(modifier) => contribution(modifier, character, resolved)?,
        None => default_base(target, character, rules),
    };

    let mut value =
        implicit_bonus(target, character, rules, base).ok_or_else(|| ResolveError::overflow(target))?;
    for modifier in on_target().filter(|m| m.behaviour() == Behaviour::Bonus) {
        value = value
            .checked_add(contribution(modifier, character, resolved)?)
            .ok_or_else(|| ResolveError::overflow(target))?;
    }

    Ok(StatBounds::for_target(target).clamp(value))
}

/// Base value plus the fixed level-driven bonuses, `None` on overflow.
fn implicit_bonus(
    target: StatTarget,
    character: &Character,
    rules: &RulesConfig,
    base: i32,
) -> Option<i32> {
    let (proficiency, experiences) = rules.achievements_at(character.level);
    let level = i32::from(character.level);
    match target {
        StatTarget::Proficiency => base.checked_add(proficiency),
        StatTarget::MaxExperiences => base.checked_add(experiences),
        StatTarget::MajorDamageThreshold | StatTarget::SevereDamageThreshold
            if rules.thresholds_include_level =>
        {
            base.checked_add(level)
        }
        _ => Some(base),
    }
}

fn default_base(target: StatTarget, character: &Character, rules: &RulesConfig) -> i32 {
    match target {
        StatTarget::Trait(kind) => character.base_stats.traits.get(kind),
        StatTarget::Proficiency => character.base_stats.proficiency,
        StatTarget::MaxExperiences => character.base_stats.max_experiences,
        other => rules.defaults.get(other).unwrap_or_default(),
    }
}

fn contribution(
    modifier: &Modifier,
    character: &Character,
    resolved: &DerivedStats,
) -> Result<i32, ResolveError> {
    let target = modifier.target();
    let value = match modifier.kind() {
        ModifierKind::Flat { value } => Some(*value),
        ModifierKind::DerivedFromTrait {
            trait_kind,
            multiplier,
        } => resolved.traits.get(*trait_kind).checked_mul(*multiplier),
        ModifierKind::DerivedFromProficiency { multiplier } => {
            resolved.proficiency.checked_mul(*multiplier)
        }
        ModifierKind::DerivedFromLevel { multiplier } => {
            i32::from(character.level).checked_mul(*multiplier)
        }
    };
    value.ok_or_else(|| ResolveError::overflow(target))
}

/// Modifiers of every source active on `character`, in priority order.
///
/// Conditions are not evaluated here. Unknown catalog ids are an error.
pub fn active_modifiers<'a, C>(
    character: &'a Character,
    catalog: &'a C,
) -> Result<Vec<SourcedModifier<'a>>, ResolveError>
where
    C: CatalogOracle + ?Sized,
{
    let mut sources = Vec::new();
    let mut extend = |tier: SourceTier, modifiers: &'a [Modifier]| {
        sources.extend(
            modifiers
                .iter()
                .map(|modifier| SourcedModifier::borrowed(tier, modifier)),
        );
    };

    // class: primary only, the secondary class contributes through its subclass
    if let Some(id) = &character.primary_class {
        let class = catalog
            .class(id)
            .ok_or_else(|| ResolveError::unknown("class", id))?;
        extend(SourceTier::Class, &class.modifiers);
    }

    // subclass
    let mut primary_upgrades = Vec::new();
    let mut secondary_upgrades = Vec::new();
    for (_, _, choice) in character.active_choices() {
        let (Some(option_id), Some(tier)) = (&choice.option_id, choice.selected_subclass_upgrade)
        else {
            continue;
        };
        match catalog.option_kind(option_id) {
            Some(OptionKind::SubclassUpgrade) => primary_upgrades.push(tier),
            Some(OptionKind::SecondarySubclassUpgrade) => secondary_upgrades.push(tier),
            _ => {}
        }
    }
    for (subclass_id, upgrades) in [
        (&character.primary_subclass, primary_upgrades),
        (&character.secondary_subclass, secondary_upgrades),
    ] {
        let Some(id) = subclass_id else {
            continue;
        };
        let subclass = catalog
            .subclass(id)
            .ok_or_else(|| ResolveError::unknown("subclass", id))?;
        extend(
            SourceTier::Subclass,
            subclass.features(SubclassTier::Foundation),
        );
        for tier in upgrades {
            if tier != SubclassTier::Foundation {
                extend(SourceTier::Subclass, subclass.features(tier));
            }
        }
    }

    // equipment
    let equipment = &character.equipment;
    for id in [&equipment.primary_weapon, &equipment.secondary_weapon]
        .into_iter()
        .flatten()
    {
        let weapon = catalog
            .weapon(id)
            .ok_or_else(|| ResolveError::unknown("weapon", id))?;
        extend(SourceTier::Equipment, &weapon.modifiers);
    }
    if let Some(id) = &equipment.armor {
        let armor = catalog
            .armor(id)
            .ok_or_else(|| ResolveError::unknown("armor", id))?;
        extend(SourceTier::Equipment, &armor.modifiers);
    }

    // domain cards: loadout only
    for id in character.loadout_cards() {
        let card = catalog
            .domain_card(id)
            .ok_or_else(|| ResolveError::unknown("domain card", id))?;
        extend(SourceTier::DomainCard, &card.modifiers);
    }

    // level-up choices; a mirrored two-slot pair contributes once
    let mut marks = Vec::new();
    for (level, slot, choice) in character.active_choices() {
        let Some(option_id) = &choice.option_id else {
            continue;
        };
        let option = catalog
            .level_up_option(option_id)
            .ok_or_else(|| ResolveError::unknown("level-up option", option_id))?;
        if option.costs_two_slots && slot == Slot::B {
            let mirrored = character
                .choice(level, Slot::A)
                .is_some_and(|a| a.option_id.as_ref() == Some(option_id));
            if mirrored {
                continue;
            }
        }
        extend(SourceTier::LevelUp, &option.modifiers);
        if option.kind == OptionKind::TraitIncrease {
            marks.extend(choice.marked_traits.iter().flatten().copied());
        }
    }

    // trait marks are plain level-up bonuses
    sources.extend(marks.into_iter().map(|kind| {
        SourcedModifier::owned(
            SourceTier::LevelUp,
            Modifier::flat_bonus(StatTarget::Trait(kind), 1),
        )
    }));

    // additional
    for id in &character.additional_modifier_ids {
        let loot = catalog
            .loot(id)
            .ok_or_else(|| ResolveError::unknown("loot", id))?;
        sources.extend(
            loot.modifiers
                .iter()
                .map(|modifier| SourcedModifier::borrowed(SourceTier::Additional, modifier)),
        );
    }

    Ok(sources)
}
