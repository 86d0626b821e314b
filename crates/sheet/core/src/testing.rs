//! Shared fixtures for unit tests.

use crate::catalog::{
    ArmorDef, Catalog, ClassDef, DomainCardDef, LevelUpOptionDef, LootDef, OptionKind,
    SubclassDef, WeaponCategory, WeaponDef,
};
use crate::character::Character;
use crate::ids::DomainId;
use crate::model::{Behaviour, Condition, Modifier, ModifierKind, StatTarget};
use crate::progression::Tier;

fn class(id: &str, domains: [&str; 2], modifiers: Vec<Modifier>) -> ClassDef {
    ClassDef {
        id: id.into(),
        name: id.to_owned(),
        domains: domains.into_iter().map(DomainId::from).collect(),
        modifiers,
    }
}

fn subclass(id: &str, class_id: &str, foundation: Vec<Modifier>) -> SubclassDef {
    SubclassDef {
        id: id.into(),
        class_id: class_id.into(),
        name: id.to_owned(),
        foundation,
        specialization: vec![Modifier::flat_bonus(StatTarget::MajorDamageThreshold, 1)],
        mastery: vec![Modifier::flat_bonus(StatTarget::SevereDamageThreshold, 2)],
    }
}

fn card(id: &str, domain: &str, level_requirement: u8) -> DomainCardDef {
    DomainCardDef {
        id: id.into(),
        domain_id: domain.into(),
        name: id.to_owned(),
        level_requirement,
        modifiers: Vec::new(),
    }
}

fn weapon(id: &str, category: WeaponCategory, level_requirement: u8, burden: u8) -> WeaponDef {
    WeaponDef {
        id: id.into(),
        name: id.to_owned(),
        category,
        level_requirement,
        burden,
        modifiers: Vec::new(),
    }
}

fn armor(id: &str, level_requirement: u8, thresholds: (i32, i32), slots: i32) -> ArmorDef {
    ArmorDef {
        id: id.into(),
        name: id.to_owned(),
        level_requirement,
        modifiers: vec![
            Modifier::flat_base(StatTarget::MajorDamageThreshold, thresholds.0),
            Modifier::flat_base(StatTarget::SevereDamageThreshold, thresholds.1),
            Modifier::flat_base(StatTarget::MaxArmor, slots),
        ],
    }
}

fn loot(id: &str, modifiers: Vec<Modifier>) -> LootDef {
    LootDef {
        id: id.into(),
        name: id.to_owned(),
        modifiers,
    }
}

fn option(
    id: &str,
    kind: OptionKind,
    tier: Tier,
    max_usage: u8,
    modifiers: Vec<Modifier>,
) -> LevelUpOptionDef {
    LevelUpOptionDef {
        id: id.into(),
        name: id.to_owned(),
        kind,
        tier,
        max_usage,
        costs_two_slots: false,
        modifiers,
    }
}

fn two_slot(mut option: LevelUpOptionDef) -> LevelUpOptionDef {
    option.costs_two_slots = true;
    option
}

/// Small catalog covering two classes, four domains and every option kind.
pub(crate) fn fixture_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    catalog
        .insert_class(class(
            "guardian",
            ["valor", "blade"],
            vec![
                Modifier::flat_base(StatTarget::Evasion, 9),
                Modifier::flat_base(StatTarget::MaxHp, 7),
            ],
        ))
        .expect("guardian");
    catalog
        .insert_class(class(
            "wizard",
            ["codex", "splendor"],
            vec![
                Modifier::flat_base(StatTarget::Evasion, 11),
                Modifier::flat_base(StatTarget::MaxHp, 5),
            ],
        ))
        .expect("wizard");

    catalog
        .insert_subclass(subclass(
            "stalwart",
            "guardian",
            vec![Modifier::flat_bonus(StatTarget::MaxStress, 1)],
        ))
        .expect("stalwart");
    catalog
        .insert_subclass(subclass("school_of_war", "wizard", Vec::new()))
        .expect("school_of_war");

    for def in [
        card("get_back_up", "valor", 1),
        card("bare_bones", "valor", 1),
        card("i_am_your_shield", "valor", 1),
        card("rage_up", "blade", 3),
        card("book_of_ava", "codex", 1),
        card("book_of_exota", "codex", 6),
    ] {
        catalog.insert_domain_card(def).expect("card");
    }

    for def in [
        weapon("broadsword", WeaponCategory::Primary, 1, 1),
        weapon("greatsword", WeaponCategory::Primary, 1, 2),
        weapon("round_shield", WeaponCategory::Secondary, 1, 1),
    ] {
        catalog.insert_weapon(def).expect("weapon");
    }

    catalog
        .insert_armor(armor("gambeson", 1, (5, 11), 3))
        .expect("gambeson");
    catalog
        .insert_armor(armor("full_plate", 5, (8, 17), 4))
        .expect("full_plate");

    let veterans_token = Modifier::new(
        Behaviour::Bonus,
        ModifierKind::DerivedFromProficiency { multiplier: 1 },
        StatTarget::MaxHp,
        Vec::new(),
    )
    .expect("proficiency onto max hp");
    let warding_ring = Modifier::flat_bonus(StatTarget::Evasion, 1)
        .when(Condition::armor_equipped(true))
        .expect("armor condition");
    for def in [
        loot("veterans_token", vec![veterans_token]),
        loot("hope_charm", vec![Modifier::flat_base(StatTarget::MaxHope, 7)]),
        loot("hope_idol", vec![Modifier::flat_base(StatTarget::MaxHope, 8)]),
        loot("warding_ring", vec![warding_ring]),
    ] {
        catalog.insert_loot(def).expect("loot");
    }

    for def in [
        option("trait_increase", OptionKind::TraitIncrease, Tier::Two, 6, Vec::new()),
        option(
            "hp_slot",
            OptionKind::HitPointSlot,
            Tier::Two,
            2,
            vec![Modifier::flat_bonus(StatTarget::MaxHp, 1)],
        ),
        option(
            "stress_slot",
            OptionKind::StressSlot,
            Tier::Two,
            3,
            vec![Modifier::flat_bonus(StatTarget::MaxStress, 1)],
        ),
        option("experience_bonus", OptionKind::ExperienceBonus, Tier::Two, 3, Vec::new()),
        option("domain_card", OptionKind::DomainCard, Tier::Two, 3, Vec::new()),
        option(
            "evasion_plus_1",
            OptionKind::Evasion,
            Tier::Two,
            2,
            vec![Modifier::flat_bonus(StatTarget::Evasion, 1)],
        ),
        option(
            "proficiency_plus_1",
            OptionKind::Proficiency,
            Tier::Two,
            2,
            vec![Modifier::flat_bonus(StatTarget::Proficiency, 1)],
        ),
        option(
            "hope_surge",
            OptionKind::Other,
            Tier::Three,
            1,
            vec![Modifier::flat_bonus(StatTarget::MaxHope, 1)],
        ),
        two_slot(option(
            "hardened_veteran",
            OptionKind::Other,
            Tier::Two,
            1,
            vec![Modifier::flat_bonus(StatTarget::MaxHp, 2)],
        )),
        two_slot(option("multiclass", OptionKind::Multiclass, Tier::Three, 1, Vec::new())),
        option("subclass_upgrade", OptionKind::SubclassUpgrade, Tier::Three, 2, Vec::new()),
        option(
            "secondary_subclass_upgrade",
            OptionKind::SecondarySubclassUpgrade,
            Tier::Four,
            1,
            Vec::new(),
        ),
    ] {
        catalog.insert_option(def).expect("option");
    }

    catalog
}

/// Level-1 guardian with the stalwart subclass and nothing else selected.
pub(crate) fn guardian(name: &str) -> Character {
    let mut character = Character::new(name);
    character.primary_class = Some("guardian".into());
    character.primary_subclass = Some("stalwart".into());
    character
}

#[test]
fn fixture_catalog_is_internally_consistent() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.validate_references(), Ok(()));
    assert_eq!(catalog.class_count(), 2);
}
