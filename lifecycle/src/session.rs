//! Session-scoped actor.

use crate::error::LifecycleError;
use custody_policy::Capabilities;
use custody_types::{Actor, Role};

/// A logged-in actor together with the capabilities resolved for its role.
///
/// The role is resolved once at login and cannot change for the lifetime of
/// the session. Logging out consumes the session.
#[derive(Clone, Debug)]
pub struct Session {
    actor: Actor,
    capabilities: Capabilities,
}

impl Session {
    /// Start a session for an actor whose role is given by wire name.
    pub fn login(
        id: &str,
        role: &str,
        display_name: Option<&str>,
    ) -> Result<Self, LifecycleError> {
        let (role, capabilities) = custody_policy::resolve(role)?;
        let display_name = display_name.unwrap_or(id);
        tracing::info!(actor = id, %role, "session started");
        Ok(Self {
            actor: Actor::new(id, role, display_name),
            capabilities,
        })
    }

    /// Start a session for an already-typed role.
    pub fn for_actor(actor: Actor) -> Self {
        let capabilities = custody_policy::capabilities_for(actor.role());
        Self {
            actor,
            capabilities,
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn role(&self) -> Role {
        self.actor.role()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// End the session. The actor is dropped with it.
    pub fn logout(self) {
        tracing::info!(actor = %self.actor.id(), "session ended");
    }
}
