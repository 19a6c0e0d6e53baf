//! The lifecycle manager: the only component that mutates evidence records
//! and access requests.

use crate::error::LifecycleError;
use crate::forms::{AccessRequestForm, EvidenceSubmission};
use crate::snapshot::Snapshot;
use crate::stats::{dashboard_stats, Stat};
use crate::visibility::{list_visible_requests, visible_with_evidence, VisibleRequest};
use custody_api::CustodyApi;
use custody_policy::{may_decide, may_submit_evidence};
use custody_types::{
    AccessRequest, Actor, Clock, Decision, DecisionBody, EvidenceRecord, RequestId, SystemClock,
};

/// Drives evidence submission, access requests and decisions against a
/// [`CustodyApi`], and keeps the snapshot those operations are checked against.
///
/// Operations take `&mut self`: one actor, one operation at a time.
pub struct LifecycleManager<A> {
    api: A,
    clock: Box<dyn Clock>,
    snapshot: Snapshot,
}

impl<A: CustodyApi> LifecycleManager<A> {
    pub fn new(api: A) -> Self {
        Self::with_clock(api, SystemClock)
    }

    pub fn with_clock(api: A, clock: impl Clock + 'static) -> Self {
        Self {
            api,
            clock: Box::new(clock),
            snapshot: Snapshot::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// The collections as of the last successful refresh.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Replace the snapshot with the API's current collections.
    ///
    /// The old snapshot is kept if either fetch fails.
    pub async fn refresh(&mut self) -> Result<&Snapshot, LifecycleError> {
        let evidence = self.api.list_evidence().await?;
        let requests = self.api.list_access_requests().await?;
        tracing::debug!(
            evidence = evidence.len(),
            requests = requests.len(),
            "snapshot refreshed"
        );
        self.snapshot = Snapshot::new(evidence, requests);
        Ok(&self.snapshot)
    }

    /// Refetch after a mutation that the API already accepted.
    async fn refresh_after_mutation(&mut self) -> Result<(), LifecycleError> {
        match self.refresh().await {
            Ok(_) => Ok(()),
            Err(LifecycleError::Transport(e)) => Err(LifecycleError::StaleSnapshot(e)),
            Err(other) => Err(other),
        }
    }

    /// Create an evidence record uploaded by `actor`.
    ///
    /// Returns the stored record with its server id and `pending` chain status.
    pub async fn submit_evidence(
        &mut self,
        actor: &Actor,
        submission: EvidenceSubmission,
    ) -> Result<EvidenceRecord, LifecycleError> {
        if !may_submit_evidence(actor.role()) {
            tracing::warn!(actor = %actor.id(), role = %actor.role(), "evidence submission refused");
            return Err(LifecycleError::Permission {
                actor: actor.id().clone(),
                role: actor.role(),
                action: "submit evidence",
            });
        }
        let body = submission.validate(actor.id(), self.clock.now())?;
        let record = self.api.create_evidence(&body).await?;
        tracing::info!(
            actor = %actor.id(),
            evidence = %record.id,
            case = %record.case_id,
            "evidence submitted"
        );
        self.refresh_after_mutation().await?;
        Ok(record)
    }

    /// Create a `pending` access request on behalf of `actor`.
    ///
    /// Any role may request access.
    pub async fn request_access(
        &mut self,
        actor: &Actor,
        form: AccessRequestForm,
    ) -> Result<AccessRequest, LifecycleError> {
        let body = form.validate(actor.id())?;
        let request = self.api.create_access_request(&body).await?;
        tracing::info!(
            actor = %actor.id(),
            request = %request.id,
            kind = %request.request_type,
            "access requested"
        );
        self.refresh_after_mutation().await?;
        Ok(request)
    }

    /// Requests in the current snapshot that `actor` may see, in server order.
    pub fn visible_requests(&self, actor: &Actor) -> Vec<&AccessRequest> {
        list_visible_requests(actor, &self.snapshot.requests, &self.snapshot.evidence)
    }

    /// Visible requests with their referenced evidence attached.
    pub fn visible_requests_with_evidence(&self, actor: &Actor) -> Vec<VisibleRequest<'_>> {
        visible_with_evidence(actor, &self.snapshot.requests, &self.snapshot.evidence)
    }

    /// Dashboard counters for `actor` over the current snapshot.
    pub fn stats(&self, actor: &Actor) -> Vec<Stat> {
        dashboard_stats(actor, &self.snapshot)
    }

    /// Approve or deny a pending request.
    ///
    /// The request's status is re-read from the API before anything else, so a
    /// request decided elsewhere is reported as [`LifecycleError::InvalidState`]
    /// whatever the actor's role. Returns the request as stored after the
    /// decision, including the server-set approval timestamp.
    pub async fn decide(
        &mut self,
        actor: &Actor,
        request_id: &RequestId,
        decision: Decision,
    ) -> Result<AccessRequest, LifecycleError> {
        self.refresh().await?;

        let request = self
            .snapshot
            .request_by_id(request_id)
            .ok_or_else(|| LifecycleError::RequestNotFound(request_id.clone()))?;

        if !request.is_pending() {
            tracing::warn!(
                actor = %actor.id(),
                request = %request_id,
                status = %request.status,
                "access request already decided"
            );
            return Err(LifecycleError::InvalidState {
                id: request_id.clone(),
                status: request.status,
            });
        }

        if !may_decide(actor, self.snapshot.evidence_owner(request)) {
            tracing::warn!(
                actor = %actor.id(),
                role = %actor.role(),
                request = %request_id,
                "decision refused"
            );
            return Err(LifecycleError::Permission {
                actor: actor.id().clone(),
                role: actor.role(),
                action: match decision {
                    Decision::Approved => "approve this access request",
                    Decision::Denied => "deny this access request",
                },
            });
        }

        let body = DecisionBody {
            approved_by: actor.id().clone(),
        };
        self.api
            .decide_access_request(request_id, decision, &body)
            .await?;
        tracing::info!(
            actor = %actor.id(),
            request = %request_id,
            %decision,
            "access request decided"
        );

        self.refresh_after_mutation().await?;
        self.snapshot
            .request_by_id(request_id)
            .cloned()
            .ok_or_else(|| LifecycleError::RequestNotFound(request_id.clone()))
    }
}
