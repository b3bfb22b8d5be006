use nalgebra::Vector3;
use serde::{Serialize, Deserialize};
use crate::utils::utils_errors::SceneError;
use crate::utils::utils_se3::euler_axis_order::EulerAxisOrder;
use crate::utils::utils_se3::ordered_quaternion::{OrderedQuaternion, ScalarOrder};
use crate::utils::utils_se3::quaternion_algebra::QuaternionAlgebra;

/// A position as written by a dataset: either `{"x":..,"y":..,"z":..}` or `[x, y, z]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetVector3 {
    Array([f64; 3]),
    Object { x: f64, y: f64, z: f64 }
}
impl DatasetVector3 {
    pub fn to_vector3(&self) -> Vector3<f64> {
        match self {
            DatasetVector3::Array(a) => { Vector3::new(a[0], a[1], a[2]) }
            DatasetVector3::Object { x, y, z } => { Vector3::new(*x, *y, *z) }
        }
    }
}

/// A rotation as written by a dataset.  Arrays are tried first, so a bare 4-array is never read
/// positionally as a `{w,x,y,z}` object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetRotation {
    /// Four components in the dataset's declared scalar order.
    Components([f64; 4]),
    /// Named components; the order is explicit.
    QuaternionObject { w: f64, x: f64, y: f64, z: f64 },
    /// Euler angles in degrees, composed in the dataset's declared intrinsic order.
    EulerDegrees { x: f64, y: f64, z: f64 }
}
impl DatasetRotation {
    /// The rotation in the dataset's own frame.
    pub fn to_ordered_quaternion(&self, layout: &DatasetRotationLayout) -> Result<OrderedQuaternion, SceneError> {
        return match self {
            DatasetRotation::Components(c) => {
                Ok(OrderedQuaternion::new(*c, layout.array_scalar_order))
            }
            DatasetRotation::QuaternionObject { w, x, y, z } => {
                Ok(OrderedQuaternion::new_scalar_first(*w, *x, *y, *z))
            }
            DatasetRotation::EulerDegrees { x, y, z } => {
                let q = QuaternionAlgebra::euler_to_quaternion(*x, *y, *z, &layout.euler_axis_order, true)?;
                Ok(OrderedQuaternion::new_from_unit_quaternion(&q, layout.array_scalar_order))
            }
        }
    }
}

/// How a dataset lays out the rotation literals that do not name their own components.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetRotationLayout {
    pub array_scalar_order: ScalarOrder,
    pub euler_axis_order: EulerAxisOrder
}
impl DatasetRotationLayout {
    /// ReplicaCAD scene instances store rotations as `[w, x, y, z]`.
    pub fn new_replicacad() -> Self {
        Self { array_scalar_order: ScalarOrder::ScalarFirst, euler_axis_order: EulerAxisOrder::zyx() }
    }
    /// ProcTHOR houses store Unity Euler angles in degrees.
    pub fn new_procthor() -> Self {
        Self { array_scalar_order: ScalarOrder::ScalarLast, euler_axis_order: EulerAxisOrder::unity() }
    }
}

/// A scale as written by a dataset: uniform or per axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetScale {
    Uniform(f64),
    PerAxis(DatasetVector3)
}
impl DatasetScale {
    pub fn to_vector3(&self) -> Vector3<f64> {
        match self {
            DatasetScale::Uniform(s) => { Vector3::new(*s, *s, *s) }
            DatasetScale::PerAxis(v) => { v.to_vector3() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_in_both_shapes() {
        let a: DatasetVector3 = serde_json::from_str("[1.0, 2.0, 3.0]").unwrap();
        let b: DatasetVector3 = serde_json::from_str("{\"x\": 1.0, \"y\": 2.0, \"z\": 3.0}").unwrap();
        assert_eq!(a.to_vector3(), b.to_vector3());
    }

    #[test]
    fn rotation_shapes_are_told_apart() {
        let r: DatasetRotation = serde_json::from_str("[0.5, 0.5, 0.5, 0.5]").unwrap();
        assert!(matches!(r, DatasetRotation::Components(_)));
        let r: DatasetRotation = serde_json::from_str("{\"x\": 0.0, \"y\": 0.0, \"z\": 0.0, \"w\": 1.0}").unwrap();
        assert!(matches!(r, DatasetRotation::QuaternionObject { .. }));
        let r: DatasetRotation = serde_json::from_str("{\"x\": 0.0, \"y\": 90.0, \"z\": 0.0}").unwrap();
        assert!(matches!(r, DatasetRotation::EulerDegrees { .. }));
        assert!(serde_json::from_str::<DatasetRotation>("[1.0, 2.0]").is_err());
    }

    #[test]
    fn array_rotations_follow_the_layout() {
        let r = DatasetRotation::Components([0.9, 0.1, 0.2, 0.3]);
        let replica = r.to_ordered_quaternion(&DatasetRotationLayout::new_replicacad()).unwrap();
        assert_eq!(replica.w(), 0.9);
        let procthor = r.to_ordered_quaternion(&DatasetRotationLayout::new_procthor()).unwrap();
        assert_eq!(procthor.w(), 0.3);
    }

    #[test]
    fn named_components_ignore_the_layout() {
        let r = DatasetRotation::QuaternionObject { w: 0.9, x: 0.1, y: 0.2, z: 0.3 };
        for layout in [DatasetRotationLayout::new_replicacad(), DatasetRotationLayout::new_procthor()] {
            let q = r.to_ordered_quaternion(&layout).unwrap();
            assert_eq!((q.w(), q.x(), q.y(), q.z()), (0.9, 0.1, 0.2, 0.3));
        }
    }

    #[test]
    fn scales_expand_to_three_axes() {
        let s: DatasetScale = serde_json::from_str("2.0").unwrap();
        assert_eq!(s.to_vector3(), Vector3::new(2.0, 2.0, 2.0));
        let s: DatasetScale = serde_json::from_str("{\"x\": 1.0, \"y\": 2.0, \"z\": 3.0}").unwrap();
        assert_eq!(s.to_vector3(), Vector3::new(1.0, 2.0, 3.0));
    }
}
