//! End-to-end lifecycle scenarios: session → manager → in-memory custody API.
//!
//! These tests wire the manager to `NullCustodyApi`, so every check runs
//! against state that was actually written and re-read through the API
//! contract, not against hand-built snapshots.

use custody_api::{ApiError, CustodyApi};
use custody_lifecycle::{
    AccessRequestForm, EvidenceSubmission, LifecycleError, LifecycleManager, Session, Stat,
};
use custody_nullables::{ApiCall, NullClock, NullCustodyApi};
use custody_types::{
    AccessRequest, Actor, BlockchainStatus, ContentHash, Decision, DecisionBody, EvidenceRecord,
    RequestStatus, RequestType, Role,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn manager() -> LifecycleManager<NullCustodyApi> {
    LifecycleManager::with_clock(NullCustodyApi::new(), NullClock::default())
}

fn actor(id: &str, role: &str) -> Actor {
    Session::login(id, role, None).unwrap().actor().clone()
}

fn submission(case_id: &str, filename: &str) -> EvidenceSubmission {
    EvidenceSubmission {
        case_id: Some(case_id.into()),
        description: Some(format!("{filename} for {case_id}")),
        original_filename: Some(filename.into()),
        hash: Some(ContentHash::of_bytes(filename.as_bytes()).to_string()),
        file_size: Some(2048),
        mime_type: Some("application/pdf".into()),
        location: Some("Evidence locker".into()),
        ipfs_cid: None,
        tags: Some("test, sample".into()),
    }
}

fn access_form(evidence: &EvidenceRecord, reason: &str) -> AccessRequestForm {
    AccessRequestForm {
        evidence_id: Some(evidence.id.clone()),
        case_id: Some(evidence.case_id.clone()),
        reason: Some(reason.into()),
        justification: None,
        request_type: Some(RequestType::Analysis),
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn investigator_approves_request_then_cannot_decide_again() {
    let mut m = manager();
    let investigator = actor("investigator1", "investigator");
    let analyst = actor("analyst1", "analyst");

    let e1 = m
        .submit_evidence(&investigator, submission("CASE-2024-001", "scene.jpg"))
        .await
        .unwrap();
    assert_eq!(e1.blockchain_status, BlockchainStatus::Pending);
    assert_eq!(e1.uploaded_by, *investigator.id());

    let r1 = m
        .request_access(&analyst, access_form(&e1, "Trial prep"))
        .await
        .unwrap();
    assert_eq!(r1.status, RequestStatus::Pending);
    assert_eq!(r1.requested_by, *analyst.id());

    m.api().clock().advance(3600);
    let approved = m
        .decide(&investigator, &r1.id, Decision::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, RequestStatus::Approved);
    assert_eq!(approved.approved_by.as_ref(), Some(investigator.id()));
    assert!(approved.approval_timestamp.is_some());

    let err = m
        .decide(&investigator, &r1.id, Decision::Denied)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::InvalidState {
            status: RequestStatus::Approved,
            ..
        }
    ));
    assert_eq!(
        m.api().request(&r1.id).unwrap().status,
        RequestStatus::Approved
    );
}

#[tokio::test]
async fn analyst_cannot_decide() {
    let mut m = manager();
    let investigator = actor("investigator1", "investigator");
    let analyst = actor("analyst1", "analyst");
    let e1 = m
        .submit_evidence(&investigator, submission("CASE-1", "a.pdf"))
        .await
        .unwrap();
    let r1 = m
        .request_access(&analyst, access_form(&e1, "Trial prep"))
        .await
        .unwrap();

    let err = m.decide(&analyst, &r1.id, Decision::Approved).await.unwrap_err();
    assert!(matches!(err, LifecycleError::Permission { role: Role::Analyst, .. }));
    assert!(err.is_recoverable());
    assert!(m.api().request(&r1.id).unwrap().is_pending());
}

#[tokio::test]
async fn analyst_cannot_submit_evidence() {
    let mut m = manager();
    let analyst = actor("analyst1", "analyst");

    let err = m
        .submit_evidence(&analyst, submission("CASE-1", "a.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Permission { .. }));
    assert_eq!(m.api().mutation_count(), 0);
}

#[tokio::test]
async fn only_investigators_and_admins_submit_evidence() {
    let mut m = manager();
    for (id, role, allowed) in [
        ("investigator1", "investigator", true),
        ("admin", "admin", true),
        ("prosecutor1", "prosecutor", false),
        ("judge1", "judge", false),
    ] {
        let result = m
            .submit_evidence(&actor(id, role), submission("CASE-1", &format!("{id}.pdf")))
            .await;
        assert_eq!(result.is_ok(), allowed, "{role}");
    }
}

#[tokio::test]
async fn empty_reason_is_rejected_without_calling_api() {
    let mut m = manager();
    let investigator = actor("investigator1", "investigator");
    let analyst = actor("analyst1", "analyst");
    let e1 = m
        .submit_evidence(&investigator, submission("CASE-1", "a.pdf"))
        .await
        .unwrap();
    let before = m.api().mutation_count();

    let err = m
        .request_access(&analyst, access_form(&e1, ""))
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Validation(_)));
    assert_eq!(m.api().mutation_count(), before);
}

#[tokio::test]
async fn invalid_hash_is_validation_error() {
    let mut m = manager();
    let investigator = actor("investigator1", "investigator");
    let err = m
        .submit_evidence(
            &investigator,
            EvidenceSubmission {
                hash: Some("QmTestCID".into()),
                ..submission("CASE-1", "a.pdf")
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Validation(_)));
}

#[tokio::test]
async fn decided_requests_reject_every_role() {
    let mut m = manager();
    let investigator = actor("investigator1", "investigator");
    let analyst = actor("analyst1", "analyst");
    let judge = actor("judge1", "judge");
    let e1 = m
        .submit_evidence(&investigator, submission("CASE-1", "a.pdf"))
        .await
        .unwrap();
    let approved = m
        .request_access(&analyst, access_form(&e1, "one"))
        .await
        .unwrap();
    let denied = m
        .request_access(&analyst, access_form(&e1, "two"))
        .await
        .unwrap();
    m.decide(&judge, &approved.id, Decision::Approved).await.unwrap();
    m.decide(&judge, &denied.id, Decision::Denied).await.unwrap();

    for role in Role::ALL {
        let someone = actor(&format!("{role}-x"), role.as_str());
        for id in [&approved.id, &denied.id] {
            for decision in [Decision::Approved, Decision::Denied] {
                let err = m.decide(&someone, id, decision).await.unwrap_err();
                assert!(
                    matches!(err, LifecycleError::InvalidState { .. }),
                    "{role} got {err:?}"
                );
            }
        }
    }
}

#[tokio::test]
async fn investigator_limited_to_own_evidence() {
    let mut m = manager();
    let inv1 = actor("investigator1", "investigator");
    let inv2 = actor("investigator2", "investigator");
    let analyst = actor("analyst1", "analyst");
    let e2 = m
        .submit_evidence(&inv2, submission("CASE-2", "b.pdf"))
        .await
        .unwrap();
    let r = m
        .request_access(&analyst, access_form(&e2, "Lab work"))
        .await
        .unwrap();

    let err = m.decide(&inv1, &r.id, Decision::Approved).await.unwrap_err();
    assert!(matches!(err, LifecycleError::Permission { .. }));

    let decided = m.decide(&inv2, &r.id, Decision::Denied).await.unwrap();
    assert_eq!(decided.status, RequestStatus::Denied);
}

#[tokio::test]
async fn case_only_requests_fall_to_oversight_roles() {
    let mut m = manager();
    let investigator = actor("investigator1", "investigator");
    let analyst = actor("analyst1", "analyst");
    let prosecutor = actor("prosecutor1", "prosecutor");
    m.submit_evidence(&investigator, submission("CASE-7", "c.pdf"))
        .await
        .unwrap();

    let r = m
        .request_access(
            &analyst,
            AccessRequestForm {
                case_id: Some("CASE-7".into()),
                reason: Some("Report".into()),
                request_type: Some(RequestType::Report),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(m.visible_requests(&investigator).is_empty());
    let err = m
        .decide(&investigator, &r.id, Decision::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Permission { .. }));

    let decided = m.decide(&prosecutor, &r.id, Decision::Approved).await.unwrap();
    assert_eq!(decided.status, RequestStatus::Approved);
}

#[tokio::test]
async fn decision_made_elsewhere_is_seen_before_applying() {
    let mut m = manager();
    let investigator = actor("investigator1", "investigator");
    let analyst = actor("analyst1", "analyst");
    let e1 = m
        .submit_evidence(&investigator, submission("CASE-1", "a.pdf"))
        .await
        .unwrap();
    let r1 = m
        .request_access(&analyst, access_form(&e1, "Trial prep"))
        .await
        .unwrap();
    assert!(m.snapshot().request_by_id(&r1.id).unwrap().is_pending());

    // A judge in another session denies it; our snapshot still says pending.
    m.api()
        .decide_access_request(
            &r1.id,
            Decision::Denied,
            &DecisionBody {
                approved_by: "judge1".into(),
            },
        )
        .await
        .unwrap();

    let err = m
        .decide(&investigator, &r1.id, Decision::Approved)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::InvalidState {
            status: RequestStatus::Denied,
            ..
        }
    ));
    let decisions = m
        .api()
        .calls()
        .into_iter()
        .filter(|c| matches!(c, ApiCall::Decide { .. }))
        .count();
    assert_eq!(decisions, 1);
}

#[tokio::test]
async fn unknown_request_is_reported() {
    let mut m = manager();
    let judge = actor("judge1", "judge");
    let err = m
        .decide(&judge, &"req-404".into(), Decision::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::RequestNotFound(_)));
}

#[tokio::test]
async fn transport_failure_propagates_without_retry() {
    let mut m = manager();
    let investigator = actor("investigator1", "investigator");
    m.api().fail_next(ApiError::Status {
        status: 500,
        message: "Internal Server Error".into(),
    });

    let err = m
        .submit_evidence(&investigator, submission("CASE-1", "a.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Transport(ApiError::Status { status: 500, .. })));
    assert_eq!(m.api().mutation_count(), 1);
    assert!(m.snapshot().evidence.is_empty());
}

#[tokio::test]
async fn refresh_failure_after_write_is_reported_as_stale() {
    let mut m = manager();
    let investigator = actor("investigator1", "investigator");
    m.api()
        .fail_next_read(ApiError::Unreachable("connection reset".into()));

    let err = m
        .submit_evidence(&investigator, submission("CASE-1", "a.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::StaleSnapshot(_)));

    // The record was stored; the next refresh picks it up.
    m.refresh().await.unwrap();
    assert_eq!(m.snapshot().evidence.len(), 1);
}

#[tokio::test]
async fn mutations_refetch_snapshot() {
    let mut m = manager();
    let investigator = actor("investigator1", "investigator");
    let analyst = actor("analyst1", "analyst");

    let e1 = m
        .submit_evidence(&investigator, submission("CASE-1", "a.pdf"))
        .await
        .unwrap();
    assert_eq!(m.snapshot().evidence_by_id(&e1.id), Some(&e1));

    let r1 = m
        .request_access(&analyst, access_form(&e1, "Trial prep"))
        .await
        .unwrap();
    assert_eq!(m.snapshot().request_by_id(&r1.id), Some(&r1));

    let calls = m.api().calls();
    assert!(matches!(calls[0], ApiCall::CreateEvidence(_)));
    assert_eq!(
        calls[1..3],
        [ApiCall::ListEvidence, ApiCall::ListAccessRequests]
    );
    assert!(matches!(calls[3], ApiCall::CreateAccessRequest(_)));
}

#[tokio::test]
async fn visible_requests_follow_role_scope() {
    let mut m = manager();
    let inv1 = actor("investigator1", "investigator");
    let inv2 = actor("investigator2", "investigator");
    let analyst1 = actor("analyst1", "analyst");
    let analyst2 = actor("analyst2", "analyst");
    let admin = actor("admin", "admin");

    let e1 = m.submit_evidence(&inv1, submission("CASE-1", "a.pdf")).await.unwrap();
    let e2 = m.submit_evidence(&inv2, submission("CASE-2", "b.pdf")).await.unwrap();
    let r1 = m.request_access(&analyst1, access_form(&e1, "x")).await.unwrap();
    let r2 = m.request_access(&analyst2, access_form(&e2, "y")).await.unwrap();
    let r3 = m.request_access(&analyst1, access_form(&e2, "z")).await.unwrap();

    let ids = |list: Vec<&AccessRequest>| {
        list.into_iter().map(|r| r.id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids(m.visible_requests(&inv1)), vec![r1.id.clone()]);
    assert_eq!(ids(m.visible_requests(&inv2)), vec![r2.id.clone(), r3.id.clone()]);
    assert_eq!(ids(m.visible_requests(&analyst1)), vec![r1.id.clone(), r3.id.clone()]);
    assert_eq!(ids(m.visible_requests(&admin)), vec![r1.id, r2.id, r3.id]);

    let annotated = m.visible_requests_with_evidence(&analyst2);
    assert_eq!(annotated.len(), 1);
    assert_eq!(annotated[0].evidence_filename(), Some("b.pdf"));
}

#[tokio::test]
async fn dashboard_stats_per_role() {
    let mut m = manager();
    let inv = actor("investigator1", "investigator");
    let analyst = actor("analyst1", "analyst");
    let prosecutor = actor("prosecutor1", "prosecutor");
    let judge = actor("judge1", "judge");
    let admin = actor("admin", "admin");

    let e1 = m.submit_evidence(&inv, submission("CASE-1", "a.pdf")).await.unwrap();
    let e2 = m.submit_evidence(&admin, submission("CASE-1", "b.pdf")).await.unwrap();
    let r1 = m.request_access(&analyst, access_form(&e1, "x")).await.unwrap();
    m.request_access(&analyst, access_form(&e1, "y")).await.unwrap();
    m.request_access(&analyst, access_form(&e2, "z")).await.unwrap();
    m.decide(&inv, &r1.id, Decision::Approved).await.unwrap();
    m.api()
        .set_blockchain_status(&e1.id, BlockchainStatus::Confirmed);
    m.refresh().await.unwrap();

    let values = |stats: Vec<Stat>| stats.into_iter().map(|s| s.value).collect::<Vec<_>>();
    assert_eq!(values(m.stats(&inv)), vec![1, 1, 1]);
    assert_eq!(values(m.stats(&analyst)), vec![2, 3, 1]);
    assert_eq!(values(m.stats(&prosecutor)), vec![2, 2, 1]);
    assert_eq!(values(m.stats(&judge)), vec![2, 2, 3]);
    assert_eq!(values(m.stats(&admin)), vec![2, 2, 1]);

    let labels: Vec<_> = m.stats(&inv).into_iter().map(|s| s.label).collect();
    assert_eq!(labels, vec!["My Evidence", "Access Requests", "Blockchain Confirmed"]);
    let labels: Vec<_> = m.stats(&prosecutor).into_iter().map(|s| s.label).collect();
    assert_eq!(labels, vec!["Total Evidence", "Pending Requests", "Approved Requests"]);
}

#[tokio::test]
async fn client_clock_stamps_evidence() {
    let clock = NullClock::new(1_714_564_800);
    let mut m = LifecycleManager::with_clock(NullCustodyApi::new(), clock);
    let investigator = actor("investigator1", "investigator");
    let record = m
        .submit_evidence(&investigator, submission("CASE-1", "a.pdf"))
        .await
        .unwrap();
    assert_eq!(record.timestamp.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    assert_eq!(record.tags, vec!["test".to_string(), "sample".to_string()]);
}

#[tokio::test]
async fn stored_record_without_valid_hash_does_not_block_decisions() {
    let mut m = manager();
    let investigator = actor("investigator1", "investigator");
    let analyst = actor("analyst1", "analyst");
    let judge = actor("judge1", "judge");
    let e1 = m
        .submit_evidence(&investigator, submission("CASE-1", "a.pdf"))
        .await
        .unwrap();
    m.api().seed_evidence(EvidenceRecord {
        id: "ev-legacy".into(),
        hash: String::new(),
        original_filename: "legacy.pdf".into(),
        ..e1.clone()
    });
    let r1 = m
        .request_access(&analyst, access_form(&e1, "Trial prep"))
        .await
        .unwrap();

    let decided = m.decide(&judge, &r1.id, Decision::Approved).await.unwrap();
    assert_eq!(decided.status, RequestStatus::Approved);
    assert_eq!(m.snapshot().evidence.len(), 2);
}
