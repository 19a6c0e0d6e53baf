//! Role-specific dashboard counters.

use crate::snapshot::Snapshot;
use custody_types::{Actor, RequestStatus, Role};
use serde::Serialize;

/// A labelled counter shown on an actor's dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: usize,
}

fn stat(label: &'static str, value: usize) -> Stat {
    Stat { label, value }
}

fn count_status<'a>(
    requests: impl IntoIterator<Item = &'a custody_types::AccessRequest>,
    status: RequestStatus,
) -> usize {
    requests.into_iter().filter(|r| r.status == status).count()
}

/// Counters for `actor`'s dashboard, computed over `snapshot`.
pub fn dashboard_stats(actor: &Actor, snapshot: &Snapshot) -> Vec<Stat> {
    let evidence = &snapshot.evidence;
    let requests = &snapshot.requests;
    match actor.role() {
        Role::Investigator => {
            let mine: Vec<_> = evidence
                .iter()
                .filter(|e| &e.uploaded_by == actor.id())
                .collect();
            let pending_on_mine = requests
                .iter()
                .filter(|r| r.is_pending())
                .filter(|r| {
                    r.evidence_id
                        .as_ref()
                        .is_some_and(|id| mine.iter().any(|e| &e.id == id))
                })
                .count();
            vec![
                stat("My Evidence", mine.len()),
                stat("Access Requests", pending_on_mine),
                stat(
                    "Blockchain Confirmed",
                    mine.iter().filter(|e| e.is_confirmed()).count(),
                ),
            ]
        }
        Role::Analyst => {
            let mine: Vec<_> = requests
                .iter()
                .filter(|r| &r.requested_by == actor.id())
                .collect();
            vec![
                stat("Available Evidence", evidence.len()),
                stat("My Requests", mine.len()),
                stat(
                    "Approved Access",
                    count_status(mine.iter().copied(), RequestStatus::Approved),
                ),
            ]
        }
        Role::Prosecutor => vec![
            stat("Total Evidence", evidence.len()),
            stat("Pending Requests", count_status(requests, RequestStatus::Pending)),
            stat("Approved Requests", count_status(requests, RequestStatus::Approved)),
        ],
        Role::Judge => vec![
            stat("Total Evidence", evidence.len()),
            stat("Pending Review", count_status(requests, RequestStatus::Pending)),
            stat("Total Requests", requests.len()),
        ],
        Role::Admin => vec![
            stat("System Evidence", evidence.len()),
            stat("Pending Requests", count_status(requests, RequestStatus::Pending)),
            stat(
                "Blockchain Confirmed",
                evidence.iter().filter(|e| e.is_confirmed()).count(),
            ),
        ],
    }
}
