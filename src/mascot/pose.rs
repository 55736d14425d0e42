//! Pose Driver: per-frame animation parameters for the mascot renderer.
//!
//! Converts the current mood, animation time and pointer position into the
//! handful of transforms the 3D character needs. Pure and cheap: meant to
//! be called once per rendered frame.

use serde::Serialize;

use super::mood::Mood;
use super::pointer::PointerPosition;

pub const BODY_COLOR: &str = "#F97316";
pub const BODY_HIGHLIGHT_COLOR: &str = "#FF8C42";

/// Max pupil travel from the eye centre.
const PUPIL_RANGE: f32 = 0.08;
const ARM_REST_LEFT: f32 = -0.3;
const ARM_REST_RIGHT: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EyeState {
    /// Eyes open; pupils follow the pointer.
    Open { pupil_x: f32, pupil_y: f32 },
    /// Drawn as a flat line.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MouthShape {
    Smile,
    Laugh,
    /// Small round mouth while asleep.
    Small,
    Yawn,
}

/// A single frame of character transforms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pose {
    pub mood: Mood,
    /// Vertical offset of the whole character.
    pub offset_y: f32,
    /// Rotation around the view axis (head tilt).
    pub roll: f32,
    /// Rotation around the vertical axis (turning to look around).
    pub yaw: f32,
    /// Body scale `[x, y]`.
    pub body_scale: [f32; 2],
    pub left_arm: f32,
    pub right_arm: f32,
    pub eyes: EyeState,
    pub mouth: MouthShape,
    /// Floating "zzz" next to the head.
    pub show_zzz: bool,
    pub highlighted: bool,
    pub body_color: &'static str,
}

/// Compute the pose for `mood` at animation time `t` (seconds).
pub fn compute_pose(mood: Mood, t: f32, pointer: PointerPosition, hovered: bool) -> Pose {
    let mut pose = Pose {
        mood,
        offset_y: 0.0,
        roll: 0.0,
        yaw: 0.0,
        body_scale: [1.0, 1.0],
        left_arm: ARM_REST_LEFT,
        right_arm: ARM_REST_RIGHT,
        eyes: EyeState::Closed,
        mouth: MouthShape::Smile,
        show_zzz: false,
        highlighted: hovered,
        body_color: if hovered {
            BODY_HIGHLIGHT_COLOR
        } else {
            BODY_COLOR
        },
    };

    match mood {
        Mood::Idle | Mood::Blink => {
            pose.offset_y = (t * 2.0).sin() * 0.05;
            if mood == Mood::Idle {
                pose.roll = (t * 1.5).sin() * 0.03;
            }
        }
        Mood::Happy => {
            pose.offset_y = (t * 4.0).sin().abs() * 0.15;
            pose.roll = (t * 6.0).sin() * 0.08;
            pose.mouth = MouthShape::Laugh;
        }
        Mood::Sleep => {
            // Slow breathing with a dozing tilt
            pose.offset_y = (t * 0.8).sin() * 0.02;
            pose.body_scale = [1.0 + t.sin() * 0.03, 1.0 - t.sin() * 0.02];
            pose.roll = 0.1 + (t * 0.5).sin() * 0.02;
            pose.mouth = MouthShape::Small;
            pose.show_zzz = true;
        }
        Mood::Wave => {
            pose.right_arm = (t * 8.0).sin() * 0.5 + 0.8;
        }
        Mood::LookAround => {
            pose.yaw = (t * 1.2).sin() * 0.5;
            pose.offset_y = 0.05 + (t * 2.0).sin() * 0.03;
        }
        Mood::Stretch => {
            let reach = (t * 2.0).sin();
            pose.body_scale = [1.0, 1.0 + reach * 0.15];
            pose.left_arm = -1.2 + reach * 0.2;
            pose.right_arm = 1.2 + reach * 0.2;
            pose.offset_y = 0.1;
            pose.mouth = MouthShape::Yawn;
        }
    }

    if !mood.eyes_closed() {
        pose.eyes = EyeState::Open {
            pupil_x: pointer.x * PUPIL_RANGE,
            pupil_y: pointer.y * PUPIL_RANGE * 0.5,
        };
    }

    pose
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eyes_closed_only_when_sleeping_or_blinking() {
        for mood in Mood::ALL {
            let pose = compute_pose(mood, 1.0, PointerPosition::CENTER, false);
            let closed = matches!(pose.eyes, EyeState::Closed);
            assert_eq!(closed, mood.eyes_closed(), "mood {}", mood);
        }
    }

    #[test]
    fn pupils_follow_pointer() {
        let pose = compute_pose(Mood::Idle, 0.0, PointerPosition::new(1.0, -1.0), false);
        match pose.eyes {
            EyeState::Open { pupil_x, pupil_y } => {
                assert!((pupil_x - 0.08).abs() < 1e-6, "got {}", pupil_x);
                assert!((pupil_y + 0.04).abs() < 1e-6, "got {}", pupil_y);
            }
            EyeState::Closed => panic!("idle eyes should be open"),
        }
    }

    #[test]
    fn happy_bounces_above_ground() {
        for i in 0..50 {
            let pose = compute_pose(Mood::Happy, i as f32 * 0.1, PointerPosition::CENTER, false);
            assert!(pose.offset_y >= 0.0 && pose.offset_y <= 0.15);
            assert_eq!(pose.mouth, MouthShape::Laugh);
        }
    }

    #[test]
    fn stretch_raises_both_arms() {
        let pose = compute_pose(Mood::Stretch, 0.3, PointerPosition::CENTER, false);
        assert!(pose.left_arm < -0.9, "left arm {}", pose.left_arm);
        assert!(pose.right_arm > 0.9, "right arm {}", pose.right_arm);
        assert_eq!(pose.offset_y, 0.1);
        assert_eq!(pose.mouth, MouthShape::Yawn);
    }

    #[test]
    fn sleep_shows_zzz_and_leans() {
        let pose = compute_pose(Mood::Sleep, 0.0, PointerPosition::CENTER, false);
        assert!(pose.show_zzz);
        assert!((pose.roll - 0.1).abs() < 1e-6);
        assert_eq!(pose.mouth, MouthShape::Small);
    }

    #[test]
    fn only_look_around_turns_the_head() {
        for mood in Mood::ALL {
            let pose = compute_pose(mood, 1.0, PointerPosition::CENTER, false);
            if mood == Mood::LookAround {
                assert!(pose.yaw.abs() > 0.0);
            } else {
                assert_eq!(pose.yaw, 0.0, "mood {}", mood);
            }
        }
    }

    #[test]
    fn arms_rest_unless_waving_or_stretching() {
        let pose = compute_pose(Mood::Idle, 2.0, PointerPosition::CENTER, false);
        assert_eq!(pose.left_arm, -0.3);
        assert_eq!(pose.right_arm, 0.3);

        let wave = compute_pose(Mood::Wave, 2.0, PointerPosition::CENTER, false);
        assert!(wave.right_arm >= 0.3 && wave.right_arm <= 1.3);
        assert_eq!(wave.left_arm, -0.3);
    }

    #[test]
    fn hover_switches_body_color() {
        let plain = compute_pose(Mood::Idle, 0.0, PointerPosition::CENTER, false);
        let hovered = compute_pose(Mood::Idle, 0.0, PointerPosition::CENTER, true);
        assert_eq!(plain.body_color, BODY_COLOR);
        assert_eq!(hovered.body_color, BODY_HIGHLIGHT_COLOR);
        assert!(hovered.highlighted);
    }
}
