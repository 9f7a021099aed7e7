//! Character poses.
//!
//! A pose assigns each body part a pitch (forward/backward tilt around X)
//! and a roll (sideways lean around Z) in degrees, applied around the
//! part's joint pivot by the mesh builder.

/// Rotation of a single body part around its joint, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartPose {
    /// Pitch around the X axis (positive = forward tilt).
    pub pitch: f32,
    /// Roll around the Z axis (positive = sideways lean).
    pub roll: f32,
}

impl PartPose {
    pub fn new(pitch: f32, roll: f32) -> Self {
        Self { pitch, roll }
    }

    /// True when both angles are zero and rotation can be skipped.
    pub fn is_identity(&self) -> bool {
        self.pitch == 0.0 && self.roll == 0.0
    }
}

/// A full-body pose.
#[derive(Debug, Clone, Default)]
pub struct Pose {
    pub name: String,
    pub head: PartPose,
    pub body: PartPose,
    pub right_arm: PartPose,
    pub left_arm: PartPose,
    pub right_leg: PartPose,
    pub left_leg: PartPose,
}

/// The built-in pose library.
pub fn builtin_poses() -> Vec<Pose> {
    vec![
        Pose {
            name: "standing".to_string(),
            ..Default::default()
        },
        Pose {
            name: "walking".to_string(),
            right_arm: PartPose::new(30.0, 0.0),
            left_arm: PartPose::new(-30.0, 0.0),
            right_leg: PartPose::new(-25.0, 0.0),
            left_leg: PartPose::new(25.0, 0.0),
            ..Default::default()
        },
        Pose {
            name: "running".to_string(),
            head: PartPose::new(-5.0, 0.0),
            body: PartPose::new(5.0, 0.0),
            right_arm: PartPose::new(50.0, 0.0),
            left_arm: PartPose::new(-50.0, 0.0),
            right_leg: PartPose::new(-45.0, 0.0),
            left_leg: PartPose::new(45.0, 0.0),
        },
        Pose {
            name: "waving".to_string(),
            head: PartPose::new(5.0, 0.0),
            right_arm: PartPose::new(-140.0, -20.0),
            ..Default::default()
        },
        Pose {
            name: "sitting".to_string(),
            right_arm: PartPose::new(-10.0, 0.0),
            left_arm: PartPose::new(-10.0, 0.0),
            right_leg: PartPose::new(-90.0, 0.0),
            left_leg: PartPose::new(-90.0, 0.0),
            ..Default::default()
        },
        Pose {
            name: "fighting".to_string(),
            head: PartPose::new(-10.0, 0.0),
            body: PartPose::new(5.0, 0.0),
            right_arm: PartPose::new(-90.0, 10.0),
            left_arm: PartPose::new(20.0, -10.0),
            right_leg: PartPose::new(-15.0, 0.0),
            left_leg: PartPose::new(20.0, 0.0),
        },
    ]
}

/// Look up a built-in pose by name, case-insensitively.
pub fn find_pose(name: &str) -> Option<Pose> {
    builtin_poses()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}
