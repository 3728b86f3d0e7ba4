//! Evacuation drill runner
//!
//! Drives a complete crisis session against a fixed drill roster and
//! prints each stage as JSON, exercising the full engine surface:
//! activation countdown, triage, automatic and manual assignment,
//! completion, checklist, hospital routing, deactivation, and the
//! journal.

use crisis_coordination_core::{
    ChecklistManager, Coordinator, CoordinatorConfig, CountdownStep, HospitalDestination,
    MedicalPriority, MobilityStatus, Resident, Responder, RosterSource, StaticRoster,
};
use std::error::Error;

fn drill_roster() -> StaticRoster {
    let residents = vec![
        // Bedridden (critical tier)
        resident("1", "Abdullah Al-Malki", "101", "East Wing", MobilityStatus::Bedridden, MedicalPriority::Critical),
        resident("2", "Fatima Al-Ghamdi", "102", "East Wing", MobilityStatus::Bedridden, MedicalPriority::Critical),
        resident("3", "Mohammed Al-Zahrani", "105", "West Wing", MobilityStatus::Bedridden, MedicalPriority::Stable),
        // Wheelchair
        resident("4", "Noura Al-Omari", "201", "North Wing", MobilityStatus::Wheelchair, MedicalPriority::Stable),
        resident("5", "Saeed Al-Qahtani", "202", "North Wing", MobilityStatus::Wheelchair, MedicalPriority::Stable),
        // Ambulatory
        resident("6", "Khalid Al-Shehri", "301", "South Wing", MobilityStatus::Ambulatory, MedicalPriority::Stable),
        resident("7", "Mariam Al-Bishi", "302", "South Wing", MobilityStatus::Ambulatory, MedicalPriority::Stable),
    ];
    let responders = vec![
        Responder::new("s1".into(), "Ahmed Al-Shehri".into(), "Nurse".into(), "East Wing".into()),
        Responder::new("s2".into(), "Sara Al-Malki".into(), "Nurse".into(), "West Wing".into()),
        Responder::new("s3".into(), "Ali Al-Ghamdi".into(), "Emergency specialist".into(), "Ground floor".into()),
        Responder::new("s4".into(), "Mona Al-Qahtani".into(), "Nursing assistant".into(), "North Wing".into()),
    ];
    StaticRoster::new(residents, responders)
}

fn resident(
    id: &str,
    name: &str,
    room: &str,
    wing: &str,
    mobility: MobilityStatus,
    priority: MedicalPriority,
) -> Resident {
    Resident::new(
        id.into(),
        name.into(),
        room.into(),
        wing.into(),
        mobility,
        priority,
    )
}

fn drill_config() -> CoordinatorConfig {
    CoordinatorConfig {
        hospitals: vec![
            HospitalDestination::new(
                "King Fahd Hospital".into(),
                MedicalPriority::Critical,
                "177222222".into(),
                10,
            ),
            HospitalDestination::new(
                "Al-Mandab General Hospital".into(),
                MedicalPriority::Stable,
                "177333333".into(),
                8,
            ),
        ],
        ..CoordinatorConfig::default()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut engine = Coordinator::new(drill_config(), Box::new(drill_roster()))?;

    println!("== activation ==");
    engine.activate()?;
    loop {
        match engine.tick()? {
            CountdownStep::Ticking { remaining } => println!("countdown: {}", remaining),
            CountdownStep::Elapsed => break,
        }
    }

    println!("\n== triage ==");
    println!("{}", serde_json::to_string_pretty(engine.classify()?)?);

    println!("\n== hospital routing ==");
    for tier in [MedicalPriority::Critical, MedicalPriority::Stable] {
        let destination = engine.route_for(tier)?;
        println!(
            "{:?} -> {} ({} min, {})",
            tier, destination.name, destination.eta_minutes, destination.phone
        );
    }

    println!("\n== automatic assignment ==");
    for assignment in engine.auto_assign()? {
        println!(
            "{} -> {} ({})",
            assignment.responder_id, assignment.resident_id, assignment.task
        );
    }

    println!("\n== responder actions ==");
    engine.complete("1")?;
    engine.complete("6")?;
    engine.complete("7")?;
    // A conflicting claim is rejected, not queued.
    if let Err(err) = engine.assign("2", "s1") {
        println!("rejected: {}", err);
    }
    engine.release("s2")?;
    println!("abandoned tasks: {:?}", engine.abandoned());

    engine.toggle_checklist("backup-generator")?;
    engine.toggle_checklist("civil-defense")?;

    println!("\n== progress ==");
    println!("{}", serde_json::to_string_pretty(&engine.progress()?)?);

    println!("\n== journal replay check ==");
    let journal = engine.journal()?;
    let replayed = journal.replay(
        drill_roster().fetch(),
        ChecklistManager::new(ChecklistManager::default_items()),
    )?;
    println!(
        "replayed {} events; completed {} of {}",
        journal.events.len(),
        crisis_coordination_core::tracker::progress_summary(&replayed.roster).completed,
        replayed.roster.num_residents(),
    );

    println!("\n== deactivation ==");
    let terminated = engine.deactivate(false)?;
    println!("unconfirmed request ignored: terminated = {}", terminated);
    let terminated = engine.deactivate(true)?;
    println!("confirmed: terminated = {}", terminated);

    println!("\n== final snapshot ==");
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);

    Ok(())
}
