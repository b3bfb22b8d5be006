use nalgebra::{Quaternion, UnitQuaternion};
use crate::utils::utils_errors::{check_finite, SceneError};
use crate::utils::utils_se3::euler_axis_order::{EulerAxisOrder, RotationAxis};

/// Norms at or below this are treated as zero by `QuaternionAlgebra::normalize`.
pub const DEGENERATE_QUATERNION_NORM: f64 = 1e-12;

/// Primitive quaternion operations.  All quaternions here are scalar-first by construction
/// (`Quaternion::new(w, x, y, z)`); raw component arrays should come in through `OrderedQuaternion`.
pub struct QuaternionAlgebra;
impl QuaternionAlgebra {
    pub fn identity() -> UnitQuaternion<f64> {
        UnitQuaternion::identity()
    }
    /// Hamilton product `p ⊗ q`.  Non-commutative.
    pub fn multiply(p: &Quaternion<f64>, q: &Quaternion<f64>) -> Quaternion<f64> {
        p * q
    }
    /// Four-dimensional dot product of the component vectors.
    pub fn dot(p: &Quaternion<f64>, q: &Quaternion<f64>) -> f64 {
        p.coords.dot(&q.coords)
    }
    /// Divides all four components by the Euclidean norm.  Zero-norm or non-finite input is an error
    /// rather than a NaN-filled result.
    pub fn normalize(q: &Quaternion<f64>) -> Result<UnitQuaternion<f64>, SceneError> {
        let components = [q.w, q.i, q.j, q.k];
        check_finite("quaternion", &components, file!(), line!())?;
        // Scaling by the largest magnitude first keeps the sum of squares from overflowing.
        let largest = q.coords.amax();
        if largest == 0.0 {
            return Err(SceneError::new_degenerate_quaternion_error(&components, file!(), line!()));
        }
        let scaled = q.coords / largest;
        let scaled_norm = scaled.norm();
        if largest * scaled_norm <= DEGENERATE_QUATERNION_NORM {
            return Err(SceneError::new_degenerate_quaternion_error(&components, file!(), line!()));
        }
        let u = scaled / scaled_norm;
        Ok(UnitQuaternion::new_unchecked(Quaternion::from_vector(u)))
    }
    /// Builds a rotation from roll (about X), pitch (about Y) and yaw (about Z), composing the
    /// elemental rotations left to right in `axis_order`: "ZYX" gives `q_Z ⊗ q_Y ⊗ q_X`.
    ///
    /// ## Example
    /// ```
    /// use scene_porter::utils::utils_se3::euler_axis_order::EulerAxisOrder;
    /// use scene_porter::utils::utils_se3::quaternion_algebra::QuaternionAlgebra;
    /// let q = QuaternionAlgebra::euler_to_quaternion(0.0, 0.0, 90.0, &EulerAxisOrder::zyx(), true).unwrap();
    /// assert!((q.w - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    /// ```
    pub fn euler_to_quaternion(roll: f64, pitch: f64, yaw: f64, axis_order: &EulerAxisOrder, degrees: bool) -> Result<UnitQuaternion<f64>, SceneError> {
        check_finite("euler angles", &[roll, pitch, yaw], file!(), line!())?;
        let (roll, pitch, yaw) = if degrees {
            (roll.to_radians(), pitch.to_radians(), yaw.to_radians())
        } else {
            (roll, pitch, yaw)
        };

        let mut q = Quaternion::identity();
        for axis in axis_order.axes() {
            let angle = match axis {
                RotationAxis::X => { roll }
                RotationAxis::Y => { pitch }
                RotationAxis::Z => { yaw }
            };
            let elemental = UnitQuaternion::from_axis_angle(&axis.unit_vector(), angle);
            q = Self::multiply(&q, elemental.quaternion());
        }

        return Self::normalize(&q);
    }
    /// Same as `euler_to_quaternion`, parsing the axis order from a string such as "ZYX".
    pub fn euler_to_quaternion_str(roll: f64, pitch: f64, yaw: f64, axis_order: &str, degrees: bool) -> Result<UnitQuaternion<f64>, SceneError> {
        let order = EulerAxisOrder::new_from_str(axis_order)?;
        return Self::euler_to_quaternion(roll, pitch, yaw, &order, degrees);
    }
    /// Inverse of `euler_to_quaternion`: returns `[roll, pitch, yaw]` such that composing them in
    /// `axis_order` reproduces `q`.  The middle angle lies in [-90, 90] degrees.  At gimbal lock the
    /// last angle is set to zero and the first absorbs the whole rotation.
    pub fn quaternion_to_euler(q: &Quaternion<f64>, axis_order: &EulerAxisOrder, degrees: bool) -> Result<[f64; 3], SceneError> {
        let m = Self::normalize(q)?.to_rotation_matrix().into_inner();
        let [a0, a1, a2] = *axis_order.axes();
        let (i, j, k) = (a0.index(), a1.index(), a2.index());
        // Cyclic orders (XYZ, YZX, ZXY) are even permutations.
        let sign = if (j + 3 - i) % 3 == 1 { 1.0 } else { -1.0 };

        let sin_middle = (sign * m[(i, k)]).clamp(-1.0, 1.0);
        let middle = sin_middle.asin();
        let (first, last) = if sin_middle.abs() < 1.0 - 1e-12 {
            (
                (-sign * m[(j, k)]).atan2(m[(k, k)]),
                (-sign * m[(i, j)]).atan2(m[(i, i)])
            )
        } else {
            ((sign * m[(k, j)]).atan2(m[(j, j)]), 0.0)
        };

        let mut out = [0.0; 3];
        for (axis, angle) in [(a0, first), (a1, middle), (a2, last)] {
            out[axis.index()] = if degrees { angle.to_degrees() } else { angle };
        }
        Ok(out)
    }
    /// True when `p` and `q` encode the same rotation, treating `q` and `-q` as equal.
    pub fn rotations_equivalent(p: &UnitQuaternion<f64>, q: &UnitQuaternion<f64>, tolerance: f64) -> bool {
        Self::dot(p.quaternion(), q.quaternion()).abs() >= 1.0 - tolerance
    }
}
