//! Conversion of positions and orientations between the world-coordinate conventions of the
//! dataset-producing engines and the z-up physics engine.
//!
//! Every convention is related to the z-up convention by a fixed signed permutation (see
//! `FrameConvention::axis_swap_to_z_up`), so the swap for any (source, target) pair is
//! `S_target^T * S_source`.  Positions are mapped by `S`; rotation matrices are conjugated,
//! `S * M * S^T`.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::{Serialize, Deserialize};
use strum_macros::{Display, EnumIter, EnumString};
use crate::utils::utils_errors::{check_finite, SceneError};
use crate::utils::utils_se3::axis_swap::AxisSwap;
use crate::utils::utils_se3::euler_axis_order::{EulerAxisOrder, RotationAxis};
use crate::utils::utils_se3::ordered_quaternion::{OrderedQuaternion, ScalarOrder};
use crate::utils::utils_se3::quaternion_algebra::QuaternionAlgebra;

/// A world-coordinate convention together with the raw quaternion layout its tools emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display)]
pub enum FrameConvention {
    /// Habitat / ReplicaCAD: X right, Y up, Z toward the viewer.  Scalar-first quaternions.
    #[strum(to_string = "habitat", serialize = "replicacad")]
    HabitatYUp,
    /// Unity / AI2-THOR / ProcTHOR: X right, Y up, Z forward, left-handed.  Scalar-last quaternions.
    #[strum(to_string = "unity", serialize = "procthor", serialize = "ai2thor")]
    UnityYUp,
    /// The physics engine: X right, Y forward, Z up.  Scalar-first quaternions.
    #[strum(to_string = "genesis", serialize = "z-up")]
    GenesisZUp
}
impl FrameConvention {
    pub fn scalar_order(&self) -> ScalarOrder {
        match self {
            FrameConvention::HabitatYUp => { ScalarOrder::ScalarFirst }
            FrameConvention::UnityYUp => { ScalarOrder::ScalarLast }
            FrameConvention::GenesisZUp => { ScalarOrder::ScalarFirst }
        }
    }
    pub fn up_axis(&self) -> RotationAxis {
        match self {
            FrameConvention::HabitatYUp => { RotationAxis::Y }
            FrameConvention::UnityYUp => { RotationAxis::Y }
            FrameConvention::GenesisZUp => { RotationAxis::Z }
        }
    }
    pub fn is_right_handed(&self) -> bool {
        self.axis_swap_to_z_up().is_proper()
    }
    /// The swap taking coordinates in this convention to `GenesisZUp`.
    pub fn axis_swap_to_z_up(&self) -> AxisSwap {
        match self {
            FrameConvention::HabitatYUp => { AxisSwap::new_habitat_y_up_to_z_up() }
            FrameConvention::UnityYUp => { AxisSwap::new_unity_y_up_to_z_up() }
            FrameConvention::GenesisZUp => { AxisSwap::identity() }
        }
    }
}

/// A position and orientation expressed in one convention.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConvertedPose {
    pub position: Vector3<f64>,
    pub orientation: OrderedQuaternion
}

/// Fixed mapping from a source convention to a target convention.  Every pair is supported;
/// Habitat to Unity is (x, y, z) -> (x, y, -z).  Stateless after construction, so a single
/// instance can be shared freely across threads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameConversion {
    source: FrameConvention,
    target: FrameConvention,
    axis_swap: AxisSwap,
    offset: Vector3<f64>
}
impl FrameConversion {
    pub fn new(source: FrameConvention, target: FrameConvention) -> Self {
        let axis_swap = source.axis_swap_to_z_up().then(&target.axis_swap_to_z_up().transpose());
        Self { source, target, axis_swap, offset: Vector3::zeros() }
    }
    /// (x, y, z) -> (x, -z, y).
    pub fn new_habitat_to_genesis() -> Self {
        Self::new(FrameConvention::HabitatYUp, FrameConvention::GenesisZUp)
    }
    /// (x, y, z) -> (x, z, y), with rotations about the vertical axis changing sign.
    pub fn new_unity_to_genesis() -> Self {
        Self::new(FrameConvention::UnityYUp, FrameConvention::GenesisZUp)
    }
    /// Adds `height` along the target's up axis after every position conversion.
    pub fn with_vertical_offset(self, height: f64) -> Self {
        let up = self.target.up_axis().unit_vector().into_inner();
        self.with_offset(up * height)
    }
    /// Adds `offset`, a target-frame vector, after every position conversion.
    pub fn with_offset(mut self, offset: Vector3<f64>) -> Self {
        self.offset = offset;
        self
    }
    pub fn source(&self) -> FrameConvention {
        self.source
    }
    pub fn target(&self) -> FrameConvention {
        self.target
    }
    pub fn axis_swap(&self) -> &AxisSwap {
        &self.axis_swap
    }
    pub fn offset(&self) -> &Vector3<f64> {
        &self.offset
    }
    /// The conversion from target back to source.
    pub fn inverse(&self) -> FrameConversion {
        let axis_swap = self.axis_swap.transpose();
        let offset = -axis_swap.apply_to_vector(&self.offset);
        Self { source: self.target, target: self.source, axis_swap, offset }
    }
    /// Maps a source-frame position into the target frame.
    ///
    /// ## Example
    /// ```
    /// use nalgebra::Vector3;
    /// use scene_porter::frame_conversion::FrameConversion;
    /// let c = FrameConversion::new_habitat_to_genesis();
    /// let p = c.convert_position(&Vector3::new(1.0, 2.0, 3.0)).unwrap();
    /// assert_eq!(p, Vector3::new(1.0, -3.0, 2.0));
    /// ```
    pub fn convert_position(&self, position: &Vector3<f64>) -> Result<Vector3<f64>, SceneError> {
        check_finite("position", position.as_slice(), file!(), line!())?;
        Ok(self.axis_swap.apply_to_vector(position) + self.offset)
    }
    pub fn convert_position_components(&self, position: [f64; 3]) -> Result<[f64; 3], SceneError> {
        let p = self.convert_position(&Vector3::new(position[0], position[1], position[2]))?;
        Ok([p[0], p[1], p[2]])
    }
    /// Conjugates the rotation by the axis swap.  The result is renormalized; its sign is not
    /// canonicalized.
    pub fn convert_rotation(&self, rotation: &UnitQuaternion<f64>) -> Result<UnitQuaternion<f64>, SceneError> {
        let q = QuaternionAlgebra::normalize(rotation.quaternion())?;
        let m = self.axis_swap.conjugate_rotation(&q.to_rotation_matrix());
        let out = UnitQuaternion::from_rotation_matrix(&m);
        return QuaternionAlgebra::normalize(out.quaternion());
    }
    /// Converts a tagged source-frame quaternion, emitting it in the target convention's scalar
    /// order.
    pub fn convert_orientation(&self, orientation: &OrderedQuaternion) -> Result<OrderedQuaternion, SceneError> {
        let q = orientation.to_unit_quaternion()?;
        let out = self.convert_rotation(&q)?;
        Ok(OrderedQuaternion::new_from_unit_quaternion(&out, self.target.scalar_order()))
    }
    /// Builds the source rotation from Euler angles in degrees (x, y, z composed in `axis_order`),
    /// then converts it.
    pub fn convert_euler_degrees(&self, x: f64, y: f64, z: f64, axis_order: &EulerAxisOrder) -> Result<OrderedQuaternion, SceneError> {
        let q = QuaternionAlgebra::euler_to_quaternion(x, y, z, axis_order, true)?;
        let out = self.convert_rotation(&q)?;
        Ok(OrderedQuaternion::new_from_unit_quaternion(&out, self.target.scalar_order()))
    }
    pub fn convert_pose(&self, position: &Vector3<f64>, orientation: &OrderedQuaternion) -> Result<ConvertedPose, SceneError> {
        Ok(ConvertedPose {
            position: self.convert_position(position)?,
            orientation: self.convert_orientation(orientation)?
        })
    }
    /// The target-frame orientation of an object that had no rotation in the source frame.
    pub fn identity_orientation(&self) -> OrderedQuaternion {
        OrderedQuaternion::new_from_quaternion(&Quaternion::identity(), self.target.scalar_order())
    }
}
