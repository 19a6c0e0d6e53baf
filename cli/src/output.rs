//! Plain-text tables for terminal output. `--json` bypasses these.

use custody_lifecycle::{Stat, VisibleRequest};
use custody_policy::Capabilities;
use custody_types::{Actor, EvidenceRecord};
use std::fmt::Write;

pub fn evidence_table(records: &[&EvidenceRecord]) -> String {
    if records.is_empty() {
        return "no evidence\n".to_string();
    }
    let mut out = format!(
        "{:<10} {:<16} {:<24} {:<10} {:<16} {}\n",
        "ID", "CASE", "FILE", "CHAIN", "UPLOADED BY", "HASH"
    );
    for e in records {
        let _ = writeln!(
            out,
            "{:<10} {:<16} {:<24} {:<10} {:<16} {}",
            e.id,
            e.case_id,
            e.original_filename,
            e.blockchain_status,
            e.uploaded_by,
            e.hash.get(..16).unwrap_or(e.hash.as_str()),
        );
    }
    out
}

pub fn request_table(requests: &[VisibleRequest<'_>]) -> String {
    if requests.is_empty() {
        return "no access requests\n".to_string();
    }
    let mut out = format!(
        "{:<10} {:<24} {:<16} {:<10} {:<9} {}\n",
        "ID", "TARGET", "REQUESTED BY", "TYPE", "STATUS", "REASON"
    );
    for v in requests {
        let r = v.request;
        let target = match (v.evidence_filename(), &r.evidence_id, &r.case_id) {
            (Some(file), _, _) => file.to_string(),
            (None, Some(id), _) => id.to_string(),
            (None, None, Some(case)) => format!("case {case}"),
            (None, None, None) => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<10} {:<24} {:<16} {:<10} {:<9} {}",
            r.id, target, r.requested_by, r.request_type, r.status, r.reason
        );
    }
    out
}

pub fn stats_table(stats: &[Stat]) -> String {
    let mut out = String::new();
    for s in stats {
        let _ = writeln!(out, "{:<22} {}", s.label, s.value);
    }
    out
}

pub fn whoami(actor: &Actor, caps: Capabilities) -> String {
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    format!(
        "{} ({}) as {}\n  submit evidence:        {}\n  view all requests:      {}\n  approve own evidence:   {}\n  approve any request:    {}\n",
        actor.display_name(),
        actor.id(),
        actor.role(),
        yes_no(caps.can_submit_evidence),
        yes_no(caps.can_view_all_requests),
        yes_no(caps.can_approve_own_evidence_requests),
        yes_no(caps.can_approve_any_request),
    )
}
