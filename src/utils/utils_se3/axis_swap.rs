use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Serialize, Deserialize};
use crate::utils::utils_errors::SceneError;

/// Rows of the swap taking y-up Habitat coordinates to z-up coordinates: (x, y, z) -> (x, -z, y).
/// As a rotation this is +90 degrees about X.
pub const HABITAT_Y_UP_TO_Z_UP_ROWS: [[f64; 3]; 3] = [
    [1.0, 0.0, 0.0],
    [0.0, 0.0, -1.0],
    [0.0, 1.0, 0.0],
];

/// Rows of the swap taking left-handed y-up Unity coordinates to z-up coordinates:
/// (x, y, z) -> (x, z, y).  Determinant -1.
pub const UNITY_Y_UP_TO_Z_UP_ROWS: [[f64; 3]; 3] = [
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
];

/// A signed permutation matrix `S` relating two coordinate conventions.  Every entry is -1, 0 or 1
/// with exactly one non-zero per row and column, so `S` is orthogonal and `S^T = S^-1`.
/// Serialized as its rows; deserialization goes through `new_from_rows`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 3]; 3]", into = "[[f64; 3]; 3]")]
pub struct AxisSwap {
    matrix: Matrix3<f64>
}
impl AxisSwap {
    pub fn new_from_rows(rows: [[f64; 3]; 3]) -> Result<Self, SceneError> {
        for i in 0..3 {
            let mut row_nonzero = 0;
            let mut col_nonzero = 0;
            for j in 0..3 {
                let r = rows[i][j];
                if r != 0.0 && r != 1.0 && r != -1.0 {
                    return Err(SceneError::new_generic_error_str(&format!("axis swap entry ({}, {}) is {}, expected -1, 0 or 1.", i, j, r), file!(), line!()));
                }
                if r != 0.0 { row_nonzero += 1; }
                if rows[j][i] != 0.0 { col_nonzero += 1; }
            }
            if row_nonzero != 1 || col_nonzero != 1 {
                return Err(SceneError::new_generic_error_str(&format!("axis swap {:?} is not a signed permutation.", rows), file!(), line!()));
            }
        }

        let matrix = Matrix3::new(
            rows[0][0], rows[0][1], rows[0][2],
            rows[1][0], rows[1][1], rows[1][2],
            rows[2][0], rows[2][1], rows[2][2],
        );
        Ok(Self { matrix })
    }
    pub fn identity() -> Self {
        Self { matrix: Matrix3::identity() }
    }
    pub fn new_habitat_y_up_to_z_up() -> Self {
        Self::new_from_signed_permutation(HABITAT_Y_UP_TO_Z_UP_ROWS)
    }
    pub fn new_unity_y_up_to_z_up() -> Self {
        Self::new_from_signed_permutation(UNITY_Y_UP_TO_Z_UP_ROWS)
    }
    /// For the crate's own row constants, which are signed permutations by inspection.
    fn new_from_signed_permutation(rows: [[f64; 3]; 3]) -> Self {
        Self { matrix: Matrix3::from_row_slice(&[
            rows[0][0], rows[0][1], rows[0][2],
            rows[1][0], rows[1][1], rows[1][2],
            rows[2][0], rows[2][1], rows[2][2],
        ]) }
    }
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }
    pub fn rows(&self) -> [[f64; 3]; 3] {
        let m = &self.matrix;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }
    /// The inverse swap, `S^T`.
    pub fn transpose(&self) -> AxisSwap {
        Self { matrix: self.matrix.transpose() }
    }
    /// The swap that applies `self` first and then `other`.
    pub fn then(&self, other: &AxisSwap) -> AxisSwap {
        Self { matrix: other.matrix * self.matrix }
    }
    /// +1 for a pure relabelling of axes, -1 when the swap also changes handedness.
    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }
    pub fn is_proper(&self) -> bool {
        self.determinant() > 0.0
    }
    /// `S * v`.
    pub fn apply_to_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.matrix * v
    }
    /// Permutes per-axis magnitudes such as scales; signs are dropped.
    pub fn apply_to_scale(&self, scale: &Vector3<f64>) -> Vector3<f64> {
        self.matrix.abs() * scale
    }
    /// `S * M * S^T`.
    pub fn conjugate_matrix(&self, m: &Matrix3<f64>) -> Matrix3<f64> {
        self.matrix * m * self.matrix.transpose()
    }
    /// Re-expresses a rotation in the target convention.  With an improper swap a rotation of
    /// angle t about axis a becomes a rotation of -t about `S * a`; the result is a proper rotation
    /// either way.
    pub fn conjugate_rotation(&self, r: &Rotation3<f64>) -> Rotation3<f64> {
        Rotation3::from_matrix_unchecked(self.conjugate_matrix(r.matrix()))
    }
    /// The swap viewed as a rotation.  Only proper swaps are rotations.
    pub fn as_rotation(&self) -> Result<Rotation3<f64>, SceneError> {
        if !self.is_proper() {
            return Err(SceneError::new_unsupported_operation_error("as_rotation", "an axis swap with determinant -1 is a reflection, not a rotation.", file!(), line!()));
        }
        Ok(Rotation3::from_matrix_unchecked(self.matrix))
    }
}

impl TryFrom<[[f64; 3]; 3]> for AxisSwap {
    type Error = SceneError;
    fn try_from(rows: [[f64; 3]; 3]) -> Result<Self, Self::Error> {
        Self::new_from_rows(rows)
    }
}
impl From<AxisSwap> for [[f64; 3]; 3] {
    fn from(s: AxisSwap) -> Self {
        s.rows()
    }
}

/// Orthogonal with determinant +1, within `tolerance`.
pub fn is_valid_rotation_matrix(m: &Matrix3<f64>, tolerance: f64) -> bool {
    let orthogonality_error = (m * m.transpose() - Matrix3::identity()).abs().max();
    return orthogonality_error <= tolerance && (m.determinant() - 1.0).abs() <= tolerance;
}
