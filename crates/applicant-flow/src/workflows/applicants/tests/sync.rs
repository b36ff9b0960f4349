use super::common::*;
use crate::workflows::applicants::domain::{ExperienceEntry, ProfileDocument};
use crate::workflows::applicants::repository::{fields, FieldFilter, RecordStore, Table};
use crate::workflows::applicants::sync::{
    clear_experience, insert_experience, sync_children, UpsertOutcome,
};

fn singleton_fields(store: &MemoryStore, table: Table) -> Vec<(String, f64, String)> {
    store
        .all(table, None)
        .expect("list")
        .into_iter()
        .map(|record| {
            (
                record.text(fields::FULL_NAME),
                record.number(fields::PREFERRED_RATE),
                record.text(fields::CURRENCY),
            )
        })
        .collect()
}

#[test]
fn first_sync_creates_singletons_and_list() {
    let store = MemoryStore::default();
    let applicant = seed_applicant(&store, "A001");

    let report = sync_children(&store, &applicant_id(), &applicant, &sample_document())
        .expect("sync succeeds");

    assert_eq!(report.personal, UpsertOutcome::Created);
    assert_eq!(report.salary, UpsertOutcome::Created);
    assert_eq!(report.experience_removed, 0);
    assert_eq!(report.experience_created, 1);

    let personal = store
        .first(Table::PersonalDetails, &FieldFilter::applicant(&applicant_id()))
        .expect("fetch")
        .expect("personal created");
    assert_eq!(personal.text(fields::FULL_NAME), "A");
    assert_eq!(personal.text(fields::LOCATION), "Germany");
}

#[test]
fn second_sync_updates_singletons_in_place() {
    let store = MemoryStore::default();
    let applicant = seed_applicant(&store, "A001");
    let document = sample_document();

    sync_children(&store, &applicant_id(), &applicant, &document).expect("first sync");
    let first_personal = store
        .first(Table::PersonalDetails, &FieldFilter::applicant(&applicant_id()))
        .expect("fetch")
        .expect("present");

    let report =
        sync_children(&store, &applicant_id(), &applicant, &document).expect("second sync");
    assert_eq!(report.personal, UpsertOutcome::Updated);
    assert_eq!(report.salary, UpsertOutcome::Updated);

    let second_personal = store
        .first(Table::PersonalDetails, &FieldFilter::applicant(&applicant_id()))
        .expect("fetch")
        .expect("present");
    // Singleton keeps its storage identity across syncs.
    assert_eq!(first_personal.id, second_personal.id);
    assert_eq!(store.all(Table::PersonalDetails, None).expect("list").len(), 1);
    assert_eq!(store.all(Table::SalaryPreferences, None).expect("list").len(), 1);
}

#[test]
fn sync_is_idempotent_in_field_content() {
    let store = MemoryStore::default();
    let applicant = seed_applicant(&store, "A001");
    let document = sample_document();

    sync_children(&store, &applicant_id(), &applicant, &document).expect("first sync");
    let after_first = singleton_fields(&store, Table::PersonalDetails);
    let experience_first: Vec<String> = store
        .all(Table::WorkExperience, None)
        .expect("list")
        .into_iter()
        .map(|record| record.text(fields::COMPANY))
        .collect();

    sync_children(&store, &applicant_id(), &applicant, &document).expect("second sync");
    assert_eq!(singleton_fields(&store, Table::PersonalDetails), after_first);
    let experience_second: Vec<String> = store
        .all(Table::WorkExperience, None)
        .expect("list")
        .into_iter()
        .map(|record| record.text(fields::COMPANY))
        .collect();
    assert_eq!(experience_second, experience_first);
}

#[test]
fn list_replace_churns_storage_identities() {
    let store = MemoryStore::default();
    let applicant = seed_applicant(&store, "A001");
    let document = sample_document();

    sync_children(&store, &applicant_id(), &applicant, &document).expect("first sync");
    let first_ids: Vec<_> = store
        .all(Table::WorkExperience, None)
        .expect("list")
        .into_iter()
        .map(|record| record.id)
        .collect();

    let report =
        sync_children(&store, &applicant_id(), &applicant, &document).expect("second sync");
    assert_eq!(report.experience_removed, 1);
    assert_eq!(report.experience_created, 1);

    let second_ids: Vec<_> = store
        .all(Table::WorkExperience, None)
        .expect("list")
        .into_iter()
        .map(|record| record.id)
        .collect();
    assert_eq!(second_ids.len(), first_ids.len());
    assert!(first_ids.iter().all(|id| !second_ids.contains(id)));
}

#[test]
fn replacement_window_is_observable_between_phases() {
    let store = MemoryStore::default();
    let applicant = seed_applicant(&store, "A001");
    let document = sample_document();
    sync_children(&store, &applicant_id(), &applicant, &document).expect("initial sync");

    // First phase alone leaves zero experience records for the applicant.
    let removed = clear_experience(&store, &applicant_id()).expect("clear phase");
    assert_eq!(removed, 1);
    assert!(store
        .all(Table::WorkExperience, Some(&FieldFilter::applicant(&applicant_id())))
        .expect("list")
        .is_empty());

    let created =
        insert_experience(&store, &applicant, &document.experience).expect("insert phase");
    assert_eq!(created, 1);
    assert_eq!(
        store
            .all(Table::WorkExperience, Some(&FieldFilter::applicant(&applicant_id())))
            .expect("list")
            .len(),
        1
    );
}

#[test]
fn upsert_overwrites_fields_absent_from_document() {
    let store = MemoryStore::default();
    let applicant = seed_applicant(&store, "A001");
    seed_children(&store, &applicant);

    // Document with an empty personal section resets every tracked field.
    let document = ProfileDocument {
        experience: vec![ExperienceEntry::default()],
        ..ProfileDocument::default()
    };
    sync_children(&store, &applicant_id(), &applicant, &document).expect("sync");

    let personal = store
        .first(Table::PersonalDetails, &FieldFilter::applicant(&applicant_id()))
        .expect("fetch")
        .expect("present");
    assert_eq!(personal.text(fields::FULL_NAME), "");
    assert_eq!(personal.text(fields::LOCATION), "");

    let salary = store
        .first(Table::SalaryPreferences, &FieldFilter::applicant(&applicant_id()))
        .expect("fetch")
        .expect("present");
    assert_eq!(salary.number(fields::PREFERRED_RATE), 0.0);
    assert_eq!(salary.text(fields::CURRENCY), "");
}

#[test]
fn sync_respects_empty_experience_list() {
    let store = MemoryStore::default();
    let applicant = seed_applicant(&store, "A001");
    seed_children(&store, &applicant);

    let document = ProfileDocument::default();
    let report = sync_children(&store, &applicant_id(), &applicant, &document).expect("sync");

    assert_eq!(report.experience_removed, 1);
    assert_eq!(report.experience_created, 0);
    assert!(store
        .all(Table::WorkExperience, Some(&FieldFilter::applicant(&applicant_id())))
        .expect("list")
        .is_empty());
}
