use crate::foundation::core::Point;
use crate::foundation::error::{GlowError, GlowResult};
use crate::session::config::{RegistryOpts, StyleConfig};
use crate::session::path_session::{OwnerId, PathSession, SessionId, SessionState};

/// Owns every live session, in creation order, under a hard capacity cap.
#[derive(Debug)]
pub struct Registry {
    opts: RegistryOpts,
    sessions: Vec<PathSession>,
    next_id: u64,
}

impl Registry {
    /// Create an empty registry. A zero cap is raised to 1.
    pub fn new(opts: RegistryOpts) -> Self {
        let opts = RegistryOpts {
            max_sessions: opts.max_sessions.max(1),
        };
        Self {
            opts,
            sessions: Vec::with_capacity(opts.max_sessions),
            next_id: 1,
        }
    }

    /// Hard cap on live sessions.
    pub fn capacity(&self) -> usize {
        self.opts.max_sessions
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Return `true` when no session is live.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Live sessions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PathSession> {
        self.sessions.iter()
    }

    /// Look up a live session.
    pub fn get(&self, id: SessionId) -> Option<&PathSession> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    /// State of a live session, `None` once destroyed.
    pub fn state(&self, id: SessionId) -> Option<SessionState> {
        self.get(id).map(PathSession::state)
    }

    /// Start tracking `owner`.
    ///
    /// An owner that already has an active session gets that session back. Otherwise a new
    /// session is admitted, evicting the oldest fading session (or, failing that, the oldest
    /// session) when the registry is full.
    pub fn begin_session(&mut self, owner: OwnerId, style: StyleConfig) -> GlowResult<SessionId> {
        style.validate()?;
        if let Some(existing) = self
            .sessions
            .iter()
            .find(|s| s.owner() == owner && !s.is_fading())
        {
            tracing::trace!(owner = owner.0, session = existing.id().0, "session already active");
            return Ok(existing.id());
        }

        if self.sessions.len() >= self.opts.max_sessions {
            let victim = self
                .sessions
                .iter()
                .position(PathSession::is_fading)
                .unwrap_or(0);
            let evicted = self.sessions.remove(victim);
            tracing::debug!(
                session = evicted.id().0,
                owner = evicted.owner().0,
                fading = evicted.is_fading(),
                "session evicted at capacity"
            );
        }

        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.sessions.push(PathSession::new(id, owner, style));
        tracing::trace!(owner = owner.0, session = id.0, "session started");
        Ok(id)
    }

    /// Feed this tick's anchor to a session. Fading sessions ignore it.
    pub fn update_session(
        &mut self,
        id: SessionId,
        position: Point,
        heading: f64,
    ) -> GlowResult<()> {
        self.get_mut(id)?.update(position, heading);
        Ok(())
    }

    /// Move a session to `Fading`.
    pub fn end_session(&mut self, id: SessionId) -> GlowResult<()> {
        let session = self.get_mut(id)?;
        session.end();
        tracing::trace!(session = id.0, "session fading");
        Ok(())
    }

    /// Advance ages and fade timers, then drop sessions whose fade has finished.
    pub fn tick(&mut self) {
        self.sessions.retain_mut(|s| {
            let alive = s.tick();
            if !alive {
                tracing::trace!(session = s.id().0, "session destroyed");
            }
            alive
        });
    }

    fn get_mut(&mut self, id: SessionId) -> GlowResult<&mut PathSession> {
        self.sessions
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or(GlowError::UnknownSession(id.0))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryOpts::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/registry.rs"]
mod tests;
