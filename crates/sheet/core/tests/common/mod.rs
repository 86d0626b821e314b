//! Content shared by the integration suites.
#![allow(dead_code)]

use sheet_core::{
    ArmorDef, Catalog, Character, ClassDef, Condition, DomainCardDef, LevelUpOptionDef, LootDef,
    Modifier, OptionKind, StatTarget, SubclassDef, Tier, WeaponCategory, WeaponDef,
};

pub fn option(id: &str, kind: OptionKind, tier: Tier, max_usage: u8) -> LevelUpOptionDef {
    LevelUpOptionDef {
        id: id.into(),
        name: id.to_owned(),
        kind,
        tier,
        max_usage,
        costs_two_slots: false,
        modifiers: Vec::new(),
    }
}

pub fn catalog() -> Catalog {
    let mut catalog = Catalog::new();

    for (id, domains, evasion, hp) in [
        ("guardian", ["valor", "blade"], 9, 7),
        ("wizard", ["codex", "splendor"], 11, 5),
    ] {
        catalog
            .insert_class(ClassDef {
                id: id.into(),
                name: id.to_owned(),
                domains: domains.into_iter().map(Into::into).collect(),
                modifiers: vec![
                    Modifier::flat_base(StatTarget::Evasion, evasion),
                    Modifier::flat_base(StatTarget::MaxHp, hp),
                ],
            })
            .expect("class");
    }
    for (id, class_id) in [("stalwart", "guardian"), ("school_of_knowledge", "wizard")] {
        catalog
            .insert_subclass(SubclassDef {
                id: id.into(),
                class_id: class_id.into(),
                name: id.to_owned(),
                foundation: Vec::new(),
                specialization: Vec::new(),
                mastery: Vec::new(),
            })
            .expect("subclass");
    }

    for (id, domain, level) in [
        ("get_back_up", "valor", 1),
        ("bare_bones", "valor", 1),
        ("book_of_ava", "codex", 1),
        ("book_of_exota", "codex", 6),
    ] {
        catalog
            .insert_domain_card(DomainCardDef {
                id: id.into(),
                domain_id: domain.into(),
                name: id.to_owned(),
                level_requirement: level,
                modifiers: Vec::new(),
            })
            .expect("card");
    }

    catalog
        .insert_weapon(WeaponDef {
            id: "broadsword".into(),
            name: "Broadsword".into(),
            category: WeaponCategory::Primary,
            level_requirement: 1,
            burden: 1,
            modifiers: Vec::new(),
        })
        .expect("weapon");
    catalog
        .insert_armor(ArmorDef {
            id: "chainmail".into(),
            name: "Chainmail".into(),
            level_requirement: 1,
            modifiers: vec![Modifier::flat_base(StatTarget::MaxArmor, 4)],
        })
        .expect("armor");

    // applies only in tier 2 with armor on
    let bulwark = Modifier::flat_bonus(StatTarget::Evasion, 2)
        .when(Condition::level(2, 4).expect("level range"))
        .and_then(|modifier| modifier.when(Condition::armor_equipped(true)))
        .expect("bulwark");
    catalog
        .insert_loot(LootDef {
            id: "bulwark_charm".into(),
            name: "Bulwark Charm".into(),
            modifiers: vec![bulwark],
        })
        .expect("loot");

    let mut hp_slot = option("hp_slot", OptionKind::HitPointSlot, Tier::Two, 2);
    hp_slot.modifiers = vec![Modifier::flat_bonus(StatTarget::MaxHp, 1)];
    let mut proficiency = option("proficiency_plus_1", OptionKind::Proficiency, Tier::Two, 2);
    proficiency.modifiers = vec![Modifier::flat_bonus(StatTarget::Proficiency, 1)];
    let mut hope = option("hope_surge", OptionKind::Other, Tier::Three, 1);
    hope.modifiers = vec![Modifier::flat_bonus(StatTarget::MaxHope, 1)];
    let mut multiclass = option("multiclass", OptionKind::Multiclass, Tier::Three, 1);
    multiclass.costs_two_slots = true;

    for def in [
        option("trait_increase", OptionKind::TraitIncrease, Tier::Two, 6),
        hp_slot,
        option("stress_slot", OptionKind::StressSlot, Tier::Two, 3),
        option("domain_card", OptionKind::DomainCard, Tier::Two, 3),
        option("experience_bonus", OptionKind::ExperienceBonus, Tier::Two, 3),
        proficiency,
        hope,
        multiclass,
        option("subclass_upgrade", OptionKind::SubclassUpgrade, Tier::Three, 2),
    ] {
        catalog.insert_option(def).expect("option");
    }

    catalog.validate_references().expect("consistent fixture");
    catalog
}

pub fn character(name: &str, class: &str, subclass: &str, level: u8) -> Character {
    let mut character = Character::new(name);
    character.primary_class = Some(class.into());
    character.primary_subclass = Some(subclass.into());
    character.level = level;
    character
}
