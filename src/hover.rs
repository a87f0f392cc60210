// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Hover focus state machine.
//!
//! Tracks which pose or joint the pointer is over, independent of any
//! drawing surface. The host wires its own pointer handling to the
//! `on_*` callbacks; all transitions are synchronous, with no timers.
//!
//! Transition table:
//!
//! | Event | From | To |
//! |---|---|---|
//! | `on_pose_enter(p)` | `Idle` / `PoseHover(_)` | `PoseHover(p)` |
//! | `on_pose_leave(p)` | `PoseHover(p)` / `JointHover(p, _)` | `Idle` |
//! | `on_joint_enter(p, j)` | any | `JointHover(p, j)` |
//! | `on_joint_leave(p, j)` | `JointHover(p, j)`, group still hovered | `PoseHover(p)` |
//! | `on_joint_leave(p, j)` | `JointHover(p, j)`, group not hovered | `Idle` |
//! | `reset()` | any | `Idle` |

/// Current hover focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Nothing hovered.
    #[default]
    Idle,
    /// A pose group is hovered, but no specific joint.
    Pose(usize),
    /// One joint marker is hovered; its pose counts as hovered too.
    Joint {
        /// Pose index of the hovered joint.
        pose: usize,
        /// Canonical joint index.
        joint: usize,
    },
}

impl Focus {
    /// Whether this focus covers the given pose, for box/edge emphasis.
    #[must_use]
    pub fn covers_pose(&self, pose_index: usize) -> bool {
        match *self {
            Self::Idle => false,
            Self::Pose(p) | Self::Joint { pose: p, .. } => p == pose_index,
        }
    }

    /// The hovered joint on the given pose, if any.
    #[must_use]
    pub fn joint_on(&self, pose_index: usize) -> Option<usize> {
        match *self {
            Self::Joint { pose, joint } if pose == pose_index => Some(joint),
            _ => None,
        }
    }
}

/// Pointer-driven hover state for one interactive view.
///
/// Ephemeral and UI-local; [`HoverState::reset`] must be called whenever
/// the active image or detection set changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoverState {
    focus: Focus,
    /// The pose group currently under the pointer, tracked so a joint
    /// leave can fall back to the enclosing group.
    pose_under_pointer: Option<usize>,
}

impl HoverState {
    /// Create a new state in `Idle`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current focus.
    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Pointer entered a pose group.
    pub fn on_pose_enter(&mut self, pose_index: usize) {
        self.pose_under_pointer = Some(pose_index);
        if !matches!(self.focus, Focus::Joint { .. }) {
            self.focus = Focus::Pose(pose_index);
        }
    }

    /// Pointer left a pose group.
    pub fn on_pose_leave(&mut self, pose_index: usize) {
        if self.pose_under_pointer == Some(pose_index) {
            self.pose_under_pointer = None;
        }
        if self.focus.covers_pose(pose_index) {
            self.focus = Focus::Idle;
        }
    }

    /// Pointer entered a joint marker.
    pub fn on_joint_enter(&mut self, pose_index: usize, joint_index: usize) {
        self.focus = Focus::Joint {
            pose: pose_index,
            joint: joint_index,
        };
    }

    /// Pointer left a joint marker.
    ///
    /// Reverts to the enclosing pose group when it is still under the
    /// pointer, otherwise to `Idle`.
    pub fn on_joint_leave(&mut self, pose_index: usize, joint_index: usize) {
        if self.focus
            == (Focus::Joint {
                pose: pose_index,
                joint: joint_index,
            })
        {
            self.focus = match self.pose_under_pointer {
                Some(p) => Focus::Pose(p),
                None => Focus::Idle,
            };
        }
    }

    /// Force `Idle`; called on every image or detection change.
    pub fn reset(&mut self) {
        self.focus = Focus::Idle;
        self.pose_under_pointer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_toggle() {
        let mut state = HoverState::new();
        assert_eq!(state.focus(), Focus::Idle);
        state.on_pose_enter(1);
        assert_eq!(state.focus(), Focus::Pose(1));
        state.on_pose_leave(1);
        assert_eq!(state.focus(), Focus::Idle);
    }

    #[test]
    fn test_joint_leave_without_group() {
        let mut state = HoverState::new();
        state.on_joint_enter(2, 10);
        assert_eq!(state.focus(), Focus::Joint { pose: 2, joint: 10 });
        state.on_joint_leave(2, 10);
        assert_eq!(state.focus(), Focus::Idle);
    }

    #[test]
    fn test_joint_leave_falls_back_to_group() {
        let mut state = HoverState::new();
        state.on_pose_enter(0);
        state.on_joint_enter(0, 9);
        state.on_joint_leave(0, 9);
        assert_eq!(state.focus(), Focus::Pose(0));
    }

    #[test]
    fn test_pose_leave_clears_joint_focus() {
        let mut state = HoverState::new();
        state.on_pose_enter(1);
        state.on_joint_enter(1, 4);
        state.on_pose_leave(1);
        assert_eq!(state.focus(), Focus::Idle);
    }

    #[test]
    fn test_stale_joint_leave_ignored() {
        let mut state = HoverState::new();
        state.on_joint_enter(0, 3);
        state.on_joint_enter(0, 4);
        // Late leave for the previous joint must not clobber the focus.
        state.on_joint_leave(0, 3);
        assert_eq!(state.focus(), Focus::Joint { pose: 0, joint: 4 });
    }

    #[test]
    fn test_reset_forces_idle() {
        let mut state = HoverState::new();
        state.on_pose_enter(2);
        state.on_joint_enter(2, 10);
        state.reset();
        assert_eq!(state.focus(), Focus::Idle);
        // A joint leave arriving after reset stays idle.
        state.on_joint_leave(2, 10);
        assert_eq!(state.focus(), Focus::Idle);
    }

    #[test]
    fn test_covers_pose() {
        assert!(Focus::Pose(1).covers_pose(1));
        assert!(Focus::Joint { pose: 1, joint: 0 }.covers_pose(1));
        assert!(!Focus::Joint { pose: 1, joint: 0 }.covers_pose(2));
        assert!(!Focus::Idle.covers_pose(0));
    }
}
