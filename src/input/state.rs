// Action state queries

use super::action::{ActionType, BoundSource, Latched};
use super::hardware::{Hand, InputSnapshot, Time};
use super::info::{ActionStateGetInfo, Tagged};
use super::manager::{ActionQuery, ActionRuntime, SessionHandle};
use super::XrResult;
use glam::Vec2;
use log::trace;

/// Value above which a float source reads as pressed
pub const PRESS_THRESHOLD: f32 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionStateBoolean {
    pub current_state: bool,
    pub changed_since_last_sync: bool,
    pub last_change_time: Time,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionStateFloat {
    pub current_state: f32,
    pub changed_since_last_sync: bool,
    pub last_change_time: Time,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionStateVector2f {
    pub current_state: Vec2,
    pub changed_since_last_sync: bool,
    pub last_change_time: Time,
    pub is_active: bool,
}

/// Pose actions only report activity; the pose itself comes from tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionStatePose {
    pub is_active: bool,
}

impl BoundSource {
    pub fn read_bool(&self, snapshot: &InputSnapshot, hand: Hand) -> Option<bool> {
        match *self {
            BoundSource::Button { field, mask } => Some(field.read(snapshot, hand).intersects(mask)),
            BoundSource::Float(field) => Some(field.read(snapshot, hand) > PRESS_THRESHOLD),
            BoundSource::Vector2 { .. } => None,
        }
    }

    /// Float fields first, then buttons as 0/1, then one axis of a 2-axis field
    pub fn read_float(&self, snapshot: &InputSnapshot, hand: Hand) -> Option<f32> {
        match *self {
            BoundSource::Float(field) => Some(field.read(snapshot, hand)),
            BoundSource::Button { field, mask } => {
                let pressed = field.read(snapshot, hand).intersects(mask);
                Some(if pressed { 1.0 } else { 0.0 })
            }
            BoundSource::Vector2 {
                field,
                component: Some(axis),
            } => Some(axis.pick(field.read(snapshot, hand))),
            BoundSource::Vector2 { component: None, .. } => None,
        }
    }

    pub fn read_vector2(&self, snapshot: &InputSnapshot, hand: Hand) -> Option<Vec2> {
        match *self {
            BoundSource::Vector2 { field, .. } => Some(field.read(snapshot, hand)),
            _ => None,
        }
    }
}

impl ActionQuery<'_> {
    /// Read the live value through `read`, or `None` when the action is inactive
    fn sample<T>(&self, read: impl Fn(&BoundSource, &InputSnapshot, Hand) -> Option<T>) -> Option<T> {
        if !self.live {
            return None;
        }
        let hand = self.hand?;
        let source = self.action.binding.source.as_ref()?;
        read(source, self.snapshot, hand)
    }
}

/// Latch the freshly computed value (or keep the cached one while inactive)
fn latch<T: Copy + PartialEq>(
    latched: &mut Latched<T>,
    sampled: Option<T>,
    now: Time,
) -> (T, bool, Time, bool) {
    let is_active = sampled.is_some();
    let value = sampled.unwrap_or(latched.value);
    let outcome = latched.latch(value, now);
    (value, outcome.changed, outcome.last_change_time, is_active)
}

impl<B> ActionRuntime<B> {
    fn query(
        &mut self,
        session: SessionHandle,
        info: &ActionStateGetInfo,
        expected: ActionType,
    ) -> XrResult<ActionQuery<'_>> {
        info.validate()?;
        self.begin_query(session, info.action, info.subaction_path, expected)
    }

    /// Current state of a boolean action
    ///
    /// Every query latches the value it reports, so asking twice without a sync
    /// in between reports no change the second time.
    pub fn get_action_state_boolean(
        &mut self,
        session: SessionHandle,
        info: &ActionStateGetInfo,
    ) -> XrResult<ActionStateBoolean> {
        let query = self.query(session, info, ActionType::Boolean)?;
        let sampled = query.sample(BoundSource::read_bool);
        let now = query.snapshot.timestamp();
        let (current_state, changed_since_last_sync, last_change_time, is_active) =
            latch(&mut query.action.last_bool, sampled, now);

        trace!(
            "{}: {} (active: {}, changed: {})",
            query.action.name,
            current_state,
            is_active,
            changed_since_last_sync
        );
        Ok(ActionStateBoolean {
            current_state,
            changed_since_last_sync,
            last_change_time,
            is_active,
        })
    }

    pub fn get_action_state_float(
        &mut self,
        session: SessionHandle,
        info: &ActionStateGetInfo,
    ) -> XrResult<ActionStateFloat> {
        let query = self.query(session, info, ActionType::Float)?;
        let sampled = query.sample(BoundSource::read_float);
        let now = query.snapshot.timestamp();
        let (current_state, changed_since_last_sync, last_change_time, is_active) =
            latch(&mut query.action.last_float, sampled, now);

        trace!(
            "{}: {} (active: {}, changed: {})",
            query.action.name,
            current_state,
            is_active,
            changed_since_last_sync
        );
        Ok(ActionStateFloat {
            current_state,
            changed_since_last_sync,
            last_change_time,
            is_active,
        })
    }

    pub fn get_action_state_vector2f(
        &mut self,
        session: SessionHandle,
        info: &ActionStateGetInfo,
    ) -> XrResult<ActionStateVector2f> {
        let query = self.query(session, info, ActionType::Vector2f)?;
        let sampled = query.sample(BoundSource::read_vector2);
        let now = query.snapshot.timestamp();
        let (current_state, changed_since_last_sync, last_change_time, is_active) =
            latch(&mut query.action.last_vector2, sampled, now);

        trace!(
            "{}: {:?} (active: {}, changed: {})",
            query.action.name,
            current_state,
            is_active,
            changed_since_last_sync
        );
        Ok(ActionStateVector2f {
            current_state,
            changed_since_last_sync,
            last_change_time,
            is_active,
        })
    }

    /// Whether a pose action is bound to a present controller
    pub fn get_action_state_pose(
        &mut self,
        session: SessionHandle,
        info: &ActionStateGetInfo,
    ) -> XrResult<ActionStatePose> {
        let query = self.query(session, info, ActionType::Pose)?;
        Ok(ActionStatePose {
            is_active: query.live,
        })
    }
}
