//! End-to-end member lifecycle tests against the in-memory engine

use idcard_server::activity::{ActivityKind, ActivityStorage};
use idcard_server::db::models::{Designation, MemberCreate, MemberFilter};
use idcard_server::db::open_memory;
use idcard_server::db::repository::{CounterRepository, MemberRepository};

fn jane() -> MemberCreate {
    MemberCreate {
        full_name: "Jane Doe".to_string(),
        designation: Designation::Volunteer,
        joining_date: "2024-01-15".to_string(),
        contact_number: "+15551234567".to_string(),
        blood_group: None,
        emergency_contact_name: None,
        emergency_contact_number: None,
        photo_url: None,
    }
}

/// Assert a badge code has the `PREFIX-YYYY-NNN+` shape
fn assert_code_shape(code: &str, prefix: &str, year: i32) {
    let parts: Vec<&str> = code.split('-').collect();
    assert_eq!(parts.len(), 3, "unexpected code shape: {code}");
    assert_eq!(parts[0], prefix);
    assert_eq!(parts[1], year.to_string());
    assert!(parts[2].len() >= 3, "sequence not zero-padded: {code}");
    assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn first_two_members_of_a_year_get_001_and_002() {
    let db = open_memory().await.unwrap();
    let counters = CounterRepository::new(db.clone());
    let members = MemberRepository::new(db);

    let first_code = counters.next_member_id("ORG", 2024).await.unwrap();
    let first = members.create(jane(), first_code).await.unwrap();
    assert_eq!(first.member_id, "ORG-2024-001");
    assert!(first.is_active);

    let second_code = counters.next_member_id("ORG", 2024).await.unwrap();
    let second = members
        .create(
            MemberCreate {
                full_name: "John Roe".to_string(),
                ..jane()
            },
            second_code,
        )
        .await
        .unwrap();
    assert_eq!(second.member_id, "ORG-2024-002");
}

#[tokio::test]
async fn issued_codes_are_distinct_and_strictly_increasing() {
    let db = open_memory().await.unwrap();
    let counters = CounterRepository::new(db.clone());
    let members = MemberRepository::new(db);

    let mut codes = Vec::new();
    for i in 0..8 {
        let code = counters.next_member_id("ORG", 2024).await.unwrap();
        assert_code_shape(&code, "ORG", 2024);
        members
            .create(
                MemberCreate {
                    full_name: format!("Member {i}"),
                    ..jane()
                },
                code.clone(),
            )
            .await
            .unwrap();
        codes.push(code);
    }

    let seqs: Vec<i64> = codes
        .iter()
        .map(|c| c.rsplit('-').next().unwrap().parse().unwrap())
        .collect();
    assert!(seqs.windows(2).all(|w| w[0] < w[1]), "not increasing: {seqs:?}");
}

#[tokio::test]
async fn members_list_newest_first() {
    let db = open_memory().await.unwrap();
    let counters = CounterRepository::new(db.clone());
    let members = MemberRepository::new(db);

    for name in ["First", "Second", "Third"] {
        let code = counters.next_member_id("ORG", 2024).await.unwrap();
        members
            .create(
                MemberCreate {
                    full_name: name.to_string(),
                    ..jane()
                },
                code,
            )
            .await
            .unwrap();
        // Force distinct created_at millis
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let listed = members.list(MemberFilter::default()).await.unwrap();
    let names: Vec<&str> = listed.iter().map(|m| m.full_name.as_str()).collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn deleting_missing_member_writes_no_activity_event() {
    let db = open_memory().await.unwrap();
    let members = MemberRepository::new(db.clone());
    let storage = ActivityStorage::new(db);

    let result = members.delete("member:missing").await;
    assert!(result.is_err());

    let events = storage.list_recent(Some(25)).await.unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn delete_then_lookup_is_gone() {
    let db = open_memory().await.unwrap();
    let counters = CounterRepository::new(db.clone());
    let members = MemberRepository::new(db.clone());
    let storage = ActivityStorage::new(db);

    let code = counters.next_member_id("ORG", 2024).await.unwrap();
    let member = members.create(jane(), code).await.unwrap();
    let id = member.id.clone().unwrap().to_string();

    let removed = members.delete(&id).await.unwrap();
    assert_eq!(removed.member_id, member.member_id);
    assert!(members.find_by_id(&id).await.unwrap().is_none());

    // The handler records the deletion; storage-level append mirrors it
    storage
        .append(
            idcard_server::activity::ActivityRequest::new(ActivityKind::MemberDeleted)
                .subject(removed.member_id, removed.full_name),
        )
        .await
        .unwrap();
    let events = storage.list_recent(None).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, ActivityKind::MemberDeleted);
    assert_eq!(events[0].subject_name.as_deref(), Some("Jane Doe"));
}
