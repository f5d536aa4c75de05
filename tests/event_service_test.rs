//! Event service behaviour over the in-memory store

mod helpers;

use assert_matches::assert_matches;
use event_planner::database::memory::{
    EVENT_ATTACH_LOGISTICS, EVENT_FIND_BY_DESCRIPTION, EVENT_FIND_BY_PARTICIPANT,
    EVENT_FIND_BY_START_DATE, EVENT_SAVE, LOGISTICS_SAVE, PARTICIPANT_FIND_BY_ID, PARTICIPANT_SAVE,
};
use event_planner::models::Role;
use event_planner::{EventPlannerError, OrganizerFilter};
use helpers::*;

#[tokio::test]
async fn test_add_participant_returns_saved_value() {
    let fx = MemoryFixture::new();
    let participant = create_test_participant("Mansour", "Yasmine", Role::Entertainer);

    let saved = fx.service.add_participant(participant.clone()).await.unwrap();

    assert_eq!(saved.id, 1);
    assert_eq!(saved.name, participant.name);
    assert_eq!(saved.role, Role::Entertainer);
    assert_eq!(fx.store.calls(PARTICIPANT_SAVE), 1);
    assert_eq!(fx.store.participant(1).unwrap(), saved);
}

#[tokio::test]
async fn test_add_participant_with_events_round_trips() {
    let fx = MemoryFixture::new();
    let gala = fx.event(create_test_event("Gala", 3, 3)).await;
    let brunch = fx.event(create_test_event("Brunch", 7, 7)).await;
    fx.ready();

    let mut participant = create_test_participant("Sassi", "Hela", Role::Server);
    participant.events.insert(gala.id);
    participant.events.insert(brunch.id);
    let saved = fx.service.add_participant(participant.clone()).await.unwrap();

    assert_eq!(saved.events, participant.events);
    assert_eq!(fx.store.participant(saved.id).unwrap(), saved);
    assert!(fx.store.event(gala.id).unwrap().participants.contains(&saved.id));
    assert!(fx.store.event(brunch.id).unwrap().participants.contains(&saved.id));
}

#[tokio::test]
async fn test_assigned_participant_sees_the_event() {
    let fx = MemoryFixture::new();
    let participant = fx.participant(create_test_participant("Haddad", "Omar", Role::Guest)).await;
    fx.ready();

    let event = fx
        .service
        .assign_participant(create_test_event("Book fair", 4, 6), participant.id)
        .await
        .unwrap();

    assert_ne!(event.id, 0);
    assert!(fx.store.participant(participant.id).unwrap().attends(event.id));
    assert_eq!(fx.store.calls(EVENT_SAVE), 1);
    assert_eq!(fx.store.calls(PARTICIPANT_FIND_BY_ID), 1);
}

#[tokio::test]
async fn test_assigning_unknown_participant_leaves_nothing_behind() {
    let fx = MemoryFixture::new();
    let other = fx.participant(create_test_participant("Haddad", "Omar", Role::Guest)).await;
    let event = fx.event(create_test_event("Book fair", 4, 6)).await;
    fx.ready();

    let result = fx.service.assign_participant(event.clone(), 77).await;

    assert_matches!(result, Err(EventPlannerError::ParticipantNotFound { participant_id: 77 }));
    assert_eq!(fx.store.calls(EVENT_SAVE), 0);
    assert_eq!(fx.store.event(event.id).unwrap(), event);
    assert!(fx.store.participant(other.id).unwrap().events.is_empty());
}

#[tokio::test]
async fn test_assigning_keeps_existing_participants() {
    let fx = MemoryFixture::new();
    let first = fx.participant(create_test_participant("Jebali", "Nour", Role::Server)).await;
    let second = fx.participant(create_test_participant("Karoui", "Rami", Role::Guest)).await;

    let event = fx.service.assign_participant(create_test_event("Brunch", 7, 7), first.id).await.unwrap();
    let event = fx.service.assign_participant(event, second.id).await.unwrap();

    assert_eq!(event.participants.len(), 2);
    assert!(fx.store.participant(first.id).unwrap().attends(event.id));
    assert!(fx.store.participant(second.id).unwrap().attends(event.id));
}

#[tokio::test]
async fn test_listed_participants_saved_with_one_event_write() {
    let fx = MemoryFixture::new();
    let mut event = create_test_event("Marathon", 14, 14);
    for i in 0..5 {
        let participant = fx
            .participant(create_test_participant("Runner", &format!("No{}", i), Role::Guest))
            .await;
        event.participants.insert(participant.id);
    }
    event.participants.insert(1000);
    fx.ready();

    let saved = fx.service.assign_participants(event).await.unwrap();

    assert_eq!(saved.participants.len(), 5);
    assert!(!saved.participants.contains(&1000));
    assert_eq!(fx.store.calls(PARTICIPANT_FIND_BY_ID), 6);
    assert_eq!(fx.store.calls(EVENT_SAVE), 1);
    for participant_id in &saved.participants {
        assert!(fx.store.participant(*participant_id).unwrap().attends(saved.id));
    }
}

#[tokio::test]
async fn test_assign_participants_with_empty_set() {
    let fx = MemoryFixture::new();

    let saved = fx.service.assign_participants(create_test_event("Quiet night", 2, 2)).await.unwrap();

    assert!(saved.participants.is_empty());
    assert_eq!(fx.store.calls(PARTICIPANT_FIND_BY_ID), 0);
    assert_eq!(fx.store.calls(EVENT_SAVE), 1);
}

#[tokio::test]
async fn test_logistics_attached_to_event_by_description() {
    let fx = MemoryFixture::new();
    let event = fx.event(create_test_event("Test Event", 1, 2)).await;
    fx.ready();

    let saved = fx
        .service
        .assign_logistics(reserved("Speakers", 60.0, 4), "Test Event")
        .await
        .unwrap();

    let stored = fx.store.event(event.id).unwrap();
    assert!(stored.logistics.contains(&saved));
    assert_eq!(fx.store.calls(EVENT_FIND_BY_DESCRIPTION), 1);
    assert_eq!(fx.store.calls(LOGISTICS_SAVE), 1);
    assert_eq!(fx.store.calls(EVENT_ATTACH_LOGISTICS), 1);
    assert_eq!(fx.store.calls(EVENT_SAVE), 0);
}

#[tokio::test]
async fn test_description_match_is_exact() {
    let fx = MemoryFixture::new();
    let event = fx.event(create_test_event("Test Event", 1, 2)).await;
    fx.ready();

    let saved = fx
        .service
        .assign_logistics(reserved("Speakers", 60.0, 4), "test event")
        .await
        .unwrap();

    assert!(fx.store.logistics_item(saved.id).is_some());
    assert!(fx.store.event(event.id).unwrap().logistics.is_empty());
    assert_eq!(fx.store.calls(LOGISTICS_SAVE), 1);
    assert_eq!(fx.store.calls(EVENT_ATTACH_LOGISTICS), 0);
}

#[tokio::test]
async fn test_reserved_logistics_window() {
    let fx = MemoryFixture::new();

    let mut before = create_test_event("Before", 1, 3);
    before.logistics.push(reserved("Early tent", 10.0, 1));
    fx.event(before).await;

    let mut on_start = create_test_event("On start", 5, 6);
    on_start.logistics.push(reserved("Stage", 500.0, 1));
    on_start.logistics.push(unreserved("Backup stage", 500.0, 1));
    fx.event(on_start).await;

    let mut on_end = create_test_event("On end", 10, 12);
    on_end.logistics.push(reserved("Lights", 20.0, 10));
    fx.event(on_end).await;

    let mut after = create_test_event("After", 11, 11);
    after.logistics.push(reserved("Late tent", 10.0, 1));
    fx.event(after).await;
    fx.ready();

    let result = fx
        .service
        .reserved_logistics_between(date(2024, 12, 5), date(2024, 12, 10))
        .await
        .unwrap();

    let mut names: Vec<&str> = result.iter().map(|item| item.description.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Lights", "Stage"]);
    assert!(result.iter().all(|item| item.reserved));
    assert_eq!(fx.store.calls(EVENT_FIND_BY_START_DATE), 1);
}

#[tokio::test]
async fn test_reserved_logistics_empty_window() {
    let fx = MemoryFixture::new();
    let mut event = create_test_event("Fair", 20, 21);
    event.logistics.push(reserved("Booth", 100.0, 1));
    fx.event(event).await;

    let result = fx
        .service
        .reserved_logistics_between(date(2025, 1, 1), date(2025, 1, 31))
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_calculate_cost_for_default_organizer() {
    let fx = MemoryFixture::new();
    let organizer = fx.participant(default_organizer()).await;

    let mut event = create_test_event("Test Event", 1, 2);
    event.participants.insert(organizer.id);
    event.logistics.push(reserved("Catering", 100.0, 2));
    event.logistics.push(unreserved("Fireworks", 1000.0, 1));
    let event = fx.event(event).await;
    fx.ready();

    fx.service.calculate_cost().await.unwrap();

    assert_eq!(fx.store.calls(EVENT_FIND_BY_PARTICIPANT), 1);
    assert_eq!(fx.store.calls(EVENT_SAVE), 1);
    assert_eq!(fx.store.event(event.id).unwrap().cost, 200.0);
}

#[tokio::test]
async fn test_calculate_cost_ignores_other_roles() {
    let fx = MemoryFixture::new();
    let guest = fx.participant(create_test_participant("Tounsi", "Ahmed", Role::Guest)).await;

    let mut event = create_test_event("Guest only", 1, 2);
    event.participants.insert(guest.id);
    event.logistics.push(reserved("Catering", 100.0, 2));
    let event = fx.event(event).await;
    fx.ready();

    fx.service.calculate_cost().await.unwrap();

    assert_eq!(fx.store.calls(EVENT_SAVE), 0);
    assert_eq!(fx.store.event(event.id).unwrap().cost, 0.0);
}

#[tokio::test]
async fn test_calculate_cost_overwrites_stale_cost() {
    let fx = MemoryFixture::new();
    let organizer = fx.participant(create_test_participant("Gharbi", "Leila", Role::Organizer)).await;

    let mut first = create_test_event("Conference", 3, 4);
    first.participants.insert(organizer.id);
    first.cost = 9999.0;
    first.logistics.push(reserved("Badges", 1.5, 200));
    let first = fx.event(first).await;

    let mut second = create_test_event("Afterparty", 4, 4);
    second.participants.insert(organizer.id);
    second.cost = 50.0;
    let second = fx.event(second).await;
    fx.ready();

    let service = fx
        .service
        .clone()
        .with_organizer(OrganizerFilter::new("Gharbi", "Leila", Role::Organizer));
    service.calculate_cost().await.unwrap();

    assert_eq!(fx.store.calls(EVENT_SAVE), 2);
    assert_eq!(fx.store.event(first.id).unwrap().cost, 300.0);
    assert_eq!(fx.store.event(second.id).unwrap().cost, 0.0);
}

#[tokio::test]
async fn test_persistence_failures_propagate() {
    let fx = MemoryFixture::new();
    let participant = fx.participant(default_organizer()).await;
    fx.store.set_fail_saves(true);

    assert_matches!(
        fx.service.assign_participant(create_test_event("Doomed", 1, 1), participant.id).await,
        Err(EventPlannerError::Storage(_))
    );
    assert_matches!(
        fx.service.assign_logistics(reserved("Doomed", 1.0, 1), "Doomed").await,
        Err(EventPlannerError::Storage(_))
    );
    assert_eq!(fx.store.event_count(), 0);
}
