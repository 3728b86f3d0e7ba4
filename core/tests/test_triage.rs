//! Triage classification tests
//!
//! Mobility-only partitioning, idempotence, and the stable-ordering
//! guarantee responders rely on for radio handoffs.

use crisis_coordination_core::{
    Coordinator, CoordinatorConfig, CountdownStep, MedicalPriority, MobilityStatus, Resident,
    Responder, StaticRoster,
};

fn resident(id: &str, mobility: MobilityStatus) -> Resident {
    Resident::new(
        id.to_string(),
        format!("Resident {}", id),
        "101".to_string(),
        "East Wing".to_string(),
        mobility,
        MedicalPriority::Stable,
    )
}

fn active_engine(residents: Vec<Resident>, responders: Vec<Responder>) -> Coordinator {
    let source = StaticRoster::new(residents, responders);
    let mut engine = Coordinator::new(CoordinatorConfig::default(), Box::new(source)).unwrap();
    engine.activate().unwrap();
    while engine.tick().unwrap() != CountdownStep::Elapsed {}
    engine
}

#[test]
fn test_three_way_partition() {
    let engine = active_engine(
        vec![
            resident("1", MobilityStatus::Bedridden),
            resident("2", MobilityStatus::Wheelchair),
            resident("3", MobilityStatus::Ambulatory),
        ],
        vec![],
    );

    let partition = engine.classify().unwrap();
    assert_eq!(partition.critical(), ["1"]);
    assert_eq!(partition.urgent(), ["2"]);
    assert_eq!(partition.mobile(), ["3"]);
}

#[test]
fn test_classify_is_idempotent_across_calls() {
    let engine = active_engine(
        vec![
            resident("1", MobilityStatus::Bedridden),
            resident("2", MobilityStatus::Wheelchair),
        ],
        vec![],
    );

    let first = engine.classify().unwrap().clone();
    for _ in 0..5 {
        assert_eq!(engine.classify().unwrap(), &first);
    }
}

#[test]
fn test_positions_survive_status_changes() {
    let mut engine = active_engine(
        vec![
            resident("a", MobilityStatus::Bedridden),
            resident("b", MobilityStatus::Bedridden),
            resident("c", MobilityStatus::Bedridden),
        ],
        vec![Responder::new(
            "s1".to_string(),
            "Nurse One".to_string(),
            "Nurse".to_string(),
            "East Wing".to_string(),
        )],
    );
    let before = engine.classify().unwrap().clone();
    assert_eq!(before.critical(), ["a", "b", "c"]);

    // Evacuate the middle of the list; positions must not shift.
    engine.assign("b", "s1").unwrap();
    engine.complete("b").unwrap();

    let after = engine.classify().unwrap();
    assert_eq!(after, &before);
    assert_eq!(after.critical(), ["a", "b", "c"]);
    assert_eq!(
        after.tier_of("b"),
        Some(crisis_coordination_core::TriageTier::Critical)
    );
}

#[test]
fn test_directory_order_preserved_within_tier() {
    let engine = active_engine(
        vec![
            resident("z", MobilityStatus::Wheelchair),
            resident("a", MobilityStatus::Wheelchair),
            resident("m", MobilityStatus::Wheelchair),
        ],
        vec![],
    );
    // Directory order, not alphabetical.
    assert_eq!(engine.classify().unwrap().urgent(), ["z", "a", "m"]);
}

#[test]
fn test_bedridden_outranks_critical_wheelchair() {
    let stable_bedridden = Resident::new(
        "1".to_string(),
        "A".to_string(),
        "101".to_string(),
        "East Wing".to_string(),
        MobilityStatus::Bedridden,
        MedicalPriority::Stable,
    );
    let critical_wheelchair = Resident::new(
        "2".to_string(),
        "B".to_string(),
        "102".to_string(),
        "East Wing".to_string(),
        MobilityStatus::Wheelchair,
        MedicalPriority::Critical,
    );

    let engine = active_engine(vec![stable_bedridden, critical_wheelchair], vec![]);
    let partition = engine.classify().unwrap();
    // Evacuation order is mobility-only; medical priority routes
    // hospitals, not triage tiers.
    assert_eq!(partition.critical(), ["1"]);
    assert_eq!(partition.urgent(), ["2"]);
}

#[test]
fn test_classify_unavailable_before_active() {
    let source = StaticRoster::new(vec![resident("1", MobilityStatus::Bedridden)], vec![]);
    let mut engine = Coordinator::new(CoordinatorConfig::default(), Box::new(source)).unwrap();
    assert!(engine.classify().is_err());

    engine.activate().unwrap();
    assert!(engine.classify().is_err());
}
