use nalgebra::{Quaternion, UnitQuaternion};
use serde::{Serialize, Deserialize};
use strum_macros::{Display, EnumIter, EnumString};
use crate::utils::utils_errors::SceneError;
use crate::utils::utils_se3::quaternion_algebra::QuaternionAlgebra;

/// Position of the scalar component within a raw four-component quaternion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display)]
pub enum ScalarOrder {
    /// (w, x, y, z)
    #[strum(to_string = "scalar-first", serialize = "wxyz")]
    ScalarFirst,
    /// (x, y, z, w)
    #[strum(to_string = "scalar-last", serialize = "xyzw")]
    ScalarLast
}

/// Four raw quaternion components tagged with the order they are stored in.
///
/// Every quaternion that enters or leaves the crate as plain numbers goes through this type, so a
/// (w,x,y,z) array can never be silently read as (x,y,z,w).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderedQuaternion {
    components: [f64; 4],
    scalar_order: ScalarOrder
}
impl OrderedQuaternion {
    pub fn new(components: [f64; 4], scalar_order: ScalarOrder) -> Self {
        Self { components, scalar_order }
    }
    pub fn new_scalar_first(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self::new([w, x, y, z], ScalarOrder::ScalarFirst)
    }
    pub fn new_scalar_last(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::new([x, y, z, w], ScalarOrder::ScalarLast)
    }
    pub fn identity(scalar_order: ScalarOrder) -> Self {
        Self::new_from_quaternion(&Quaternion::identity(), scalar_order)
    }
    pub fn new_from_quaternion(q: &Quaternion<f64>, scalar_order: ScalarOrder) -> Self {
        let components = match scalar_order {
            ScalarOrder::ScalarFirst => { [q.w, q.i, q.j, q.k] }
            ScalarOrder::ScalarLast => { [q.i, q.j, q.k, q.w] }
        };
        Self::new(components, scalar_order)
    }
    pub fn new_from_unit_quaternion(q: &UnitQuaternion<f64>, scalar_order: ScalarOrder) -> Self {
        Self::new_from_quaternion(q.quaternion(), scalar_order)
    }
    pub fn components(&self) -> &[f64; 4] {
        &self.components
    }
    pub fn scalar_order(&self) -> ScalarOrder {
        self.scalar_order
    }
    pub fn w(&self) -> f64 {
        match self.scalar_order {
            ScalarOrder::ScalarFirst => { self.components[0] }
            ScalarOrder::ScalarLast => { self.components[3] }
        }
    }
    pub fn x(&self) -> f64 { self.vector_part()[0] }
    pub fn y(&self) -> f64 { self.vector_part()[1] }
    pub fn z(&self) -> f64 { self.vector_part()[2] }
    fn vector_part(&self) -> [f64; 3] {
        let c = &self.components;
        match self.scalar_order {
            ScalarOrder::ScalarFirst => { [c[1], c[2], c[3]] }
            ScalarOrder::ScalarLast => { [c[0], c[1], c[2]] }
        }
    }
    /// The same rotation with its components rearranged into `scalar_order`.
    pub fn reordered(&self, scalar_order: ScalarOrder) -> Self {
        Self::new_from_quaternion(&self.to_quaternion(), scalar_order)
    }
    /// The raw, possibly non-unit quaternion.
    pub fn to_quaternion(&self) -> Quaternion<f64> {
        let v = self.vector_part();
        Quaternion::new(self.w(), v[0], v[1], v[2])
    }
    /// Normalizes into a unit quaternion, failing on zero-norm or non-finite components.
    pub fn to_unit_quaternion(&self) -> Result<UnitQuaternion<f64>, SceneError> {
        QuaternionAlgebra::normalize(&self.to_quaternion())
    }
}
