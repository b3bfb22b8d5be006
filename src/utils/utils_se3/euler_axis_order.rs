use std::fmt;
use std::str::FromStr;
use nalgebra::{Unit, Vector3};
use serde::{Serialize, Deserialize};
use strum_macros::{Display, EnumIter, EnumString};
use crate::utils::utils_errors::SceneError;

/// One of the three coordinate axes of a right-handed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display)]
pub enum RotationAxis {
    X,
    Y,
    Z
}
impl RotationAxis {
    pub fn index(&self) -> usize {
        match self {
            RotationAxis::X => { 0 }
            RotationAxis::Y => { 1 }
            RotationAxis::Z => { 2 }
        }
    }
    pub fn unit_vector(&self) -> Unit<Vector3<f64>> {
        match self {
            RotationAxis::X => { Vector3::x_axis() }
            RotationAxis::Y => { Vector3::y_axis() }
            RotationAxis::Z => { Vector3::z_axis() }
        }
    }
    fn from_char(c: char) -> Option<Self> {
        match c {
            'X' => { Some(RotationAxis::X) }
            'Y' => { Some(RotationAxis::Y) }
            'Z' => { Some(RotationAxis::Z) }
            _ => { None }
        }
    }
}

/// The order in which three elemental rotations are composed, e.g. "ZYX".
///
/// Only the six permutations of X, Y and Z are representable.  Letters must be uppercase, since a
/// lowercase order conventionally denotes extrinsic rotations elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EulerAxisOrder {
    axes: [RotationAxis; 3]
}
impl EulerAxisOrder {
    pub fn new(axes: [RotationAxis; 3]) -> Result<Self, SceneError> {
        let (a, b, c) = (axes[0], axes[1], axes[2]);
        if a == b || b == c || a == c {
            let given: String = axes.iter().map(|a| a.to_string()).collect();
            return Err(SceneError::new_unsupported_axis_order_error(&given, file!(), line!()));
        }
        Ok(Self { axes })
    }
    pub fn new_from_str(s: &str) -> Result<Self, SceneError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 3 {
            return Err(SceneError::new_unsupported_axis_order_error(s, file!(), line!()));
        }
        let mut axes = [RotationAxis::X; 3];
        for (i, c) in chars.iter().enumerate() {
            axes[i] = match RotationAxis::from_char(*c) {
                Some(a) => { a }
                None => { return Err(SceneError::new_unsupported_axis_order_error(s, file!(), line!())); }
            };
        }
        return Self::new(axes).map_err(|_| SceneError::new_unsupported_axis_order_error(s, file!(), line!()));
    }
    /// Yaw-pitch-roll, the conventional aerospace order.
    pub fn zyx() -> Self {
        Self { axes: [RotationAxis::Z, RotationAxis::Y, RotationAxis::X] }
    }
    pub fn xyz() -> Self {
        Self { axes: [RotationAxis::X, RotationAxis::Y, RotationAxis::Z] }
    }
    /// Intrinsic order equivalent to the game engine convention of rotating about world Z, then X,
    /// then Y.
    pub fn unity() -> Self {
        Self { axes: [RotationAxis::Y, RotationAxis::X, RotationAxis::Z] }
    }
    pub fn all_orders() -> Vec<Self> {
        use RotationAxis::*;
        vec![[X, Y, Z], [X, Z, Y], [Y, X, Z], [Y, Z, X], [Z, X, Y], [Z, Y, X]]
            .into_iter()
            .map(|axes| Self { axes })
            .collect()
    }
    pub fn axes(&self) -> &[RotationAxis; 3] {
        &self.axes
    }
}
impl Default for EulerAxisOrder {
    fn default() -> Self { Self::zyx() }
}
impl FromStr for EulerAxisOrder {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new_from_str(s)
    }
}
impl TryFrom<String> for EulerAxisOrder {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new_from_str(&value)
    }
}
impl From<EulerAxisOrder> for String {
    fn from(order: EulerAxisOrder) -> Self {
        order.to_string()
    }
}
impl fmt::Display for EulerAxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.axes[0], self.axes[1], self.axes[2])
    }
}
