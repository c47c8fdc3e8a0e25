use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::GlowResult;
use crate::path::control::{PointHistory, Sample, segment_points};
use crate::session::config::{PathSource, StyleConfig};

/// Stable identifier of the logical effect instance that drives a session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct OwnerId(pub u64);

/// Registry-assigned session handle. Never reused within one registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

/// Lifecycle state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Receiving anchor updates.
    Active,
    /// Ended; removed once `remaining` reaches 0 or the points run out.
    Fading {
        /// Ticks left before removal.
        remaining: u32,
    },
}

/// One tracked beam, trail or ribbon.
#[derive(Clone, Debug)]
pub struct PathSession {
    id: SessionId,
    owner: OwnerId,
    style: StyleConfig,
    history: PointHistory,
    age_ticks: u64,
    state: SessionState,
}

impl PathSession {
    pub(crate) fn new(id: SessionId, owner: OwnerId, style: StyleConfig) -> Self {
        let history = PointHistory::new(style.max_points);
        Self {
            id,
            owner,
            style,
            history,
            age_ticks: 0,
            state: SessionState::Active,
        }
    }

    /// Session handle.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Owning effect instance.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Style fixed at creation.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Ticks since creation.
    pub fn age_ticks(&self) -> u64 {
        self.age_ticks
    }

    /// Raw anchor history.
    pub fn history(&self) -> &PointHistory {
        &self.history
    }

    /// Return `true` after `end_session`.
    pub fn is_fading(&self) -> bool {
        matches!(self.state, SessionState::Fading { .. })
    }

    /// Record an anchor sample. Fading sessions ignore updates.
    ///
    /// Returns `true` when a new sample was appended.
    pub(crate) fn update(&mut self, position: Point, heading: f64) -> bool {
        if self.is_fading() {
            return false;
        }
        self.history
            .push_if_moved(Sample { position, heading }, self.style.min_move)
    }

    /// Switch to `Fading`. Ending an already fading session keeps its timer.
    pub(crate) fn end(&mut self) {
        if !self.is_fading() {
            self.state = SessionState::Fading {
                remaining: self.style.fade_ticks,
            };
        }
    }

    /// Advance one logic tick. Returns `false` once the session should be destroyed.
    pub(crate) fn tick(&mut self) -> bool {
        self.age_ticks += 1;
        match &mut self.state {
            SessionState::Active => true,
            SessionState::Fading { remaining } => {
                *remaining = remaining.saturating_sub(1);
                if self.style.source == PathSource::History {
                    self.history.retire_oldest();
                }
                *remaining > 0 && !self.history.is_empty()
            }
        }
    }

    /// Remaining fade as a fraction in `[0, 1]`; 1 while active.
    pub fn fade_fraction(&self) -> f64 {
        match self.state {
            SessionState::Active => 1.0,
            SessionState::Fading { remaining } => {
                if self.style.fade_ticks == 0 {
                    0.0
                } else {
                    (f64::from(remaining) / f64::from(self.style.fade_ticks)).clamp(0.0, 1.0)
                }
            }
        }
    }

    /// Write this session's control points into `out`.
    ///
    /// History trails are emitted newest first. Beams run from the newest anchor along its
    /// heading and shrink with the fade fraction.
    pub fn control_points_into(&self, out: &mut Vec<Point>) -> GlowResult<()> {
        match self.style.source {
            PathSource::History => {
                self.history.positions_into(out);
                Ok(())
            }
            PathSource::Beam { length } => {
                out.clear();
                let Some(anchor) = self.history.newest() else {
                    return Ok(());
                };
                let end = anchor.position
                    + Vec2::from_angle(anchor.heading) * (length * self.fade_fraction());
                segment_points(anchor.position, end, self.style.max_points, out)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/path_session.rs"]
mod tests;
