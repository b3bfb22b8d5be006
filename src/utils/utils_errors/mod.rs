use std::fmt;

/// A common error type returned by functions throughout the crate.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneError {
    GenericError(String),
    NonFiniteValueError(String),
    DegenerateQuaternionError(String),
    UnsupportedAxisOrderError(String),
    UnsupportedOperationError(String),
    DatasetFormatError(String),
    MissingAssetError(String)
}
impl SceneError {
    pub fn new_generic_error_str(s: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: {} -- File: {}, Line: {}", s, file, line);
        return Self::GenericError(s);
    }
    pub fn new_non_finite_value_error(what: &str, values: &[f64], file: &str, line: u32) -> Self {
        let s = format!("ERROR: {} must be finite, got {:?} -- File: {}, Line: {}", what, values, file, line);
        return Self::NonFiniteValueError(s);
    }
    pub fn new_degenerate_quaternion_error(components: &[f64; 4], file: &str, line: u32) -> Self {
        let s = format!("ERROR: Quaternion {:?} has zero norm and cannot be normalized -- File: {}, Line: {}", components, file, line);
        return Self::DegenerateQuaternionError(s);
    }
    pub fn new_unsupported_axis_order_error(given: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Axis order {:?} is not a permutation of \"XYZ\" -- File: {}, Line: {}", given, file, line);
        return Self::UnsupportedAxisOrderError(s);
    }
    pub fn new_unsupported_operation_error(function_name: &str, message: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Unsupported operation error in function {}.  {} -- File: {}, Line: {}", function_name, message, file, line);
        return Self::UnsupportedOperationError(s);
    }
    pub fn new_dataset_format_error(dataset: &str, message: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Malformed {} record.  {} -- File: {}, Line: {}", dataset, message, file, line);
        return Self::DatasetFormatError(s);
    }
    pub fn new_missing_asset_error(key: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: No asset is registered for {:?} -- File: {}, Line: {}", key, file, line);
        return Self::MissingAssetError(s);
    }
    /// The formatted message carried by any variant.
    pub fn message(&self) -> &str {
        return match self {
            SceneError::GenericError(s) => { s }
            SceneError::NonFiniteValueError(s) => { s }
            SceneError::DegenerateQuaternionError(s) => { s }
            SceneError::UnsupportedAxisOrderError(s) => { s }
            SceneError::UnsupportedOperationError(s) => { s }
            SceneError::DatasetFormatError(s) => { s }
            SceneError::MissingAssetError(s) => { s }
        }
    }
}
impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
impl std::error::Error for SceneError { }

/// Checks that every value is finite, returning a `NonFiniteValueError` naming `what` otherwise.
pub fn check_finite(what: &str, values: &[f64], file: &str, line: u32) -> Result<(), SceneError> {
    return if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SceneError::new_non_finite_value_error(what, values, file, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_finite_accepts_ordinary_values() {
        assert!(check_finite("position", &[1.0, -2.5, 0.0], file!(), line!()).is_ok());
    }

    #[test]
    fn check_finite_rejects_nan_and_infinity() {
        let res = check_finite("position", &[1.0, f64::NAN, 0.0], file!(), line!());
        assert!(matches!(res, Err(SceneError::NonFiniteValueError(_))));
        let res = check_finite("angles", &[f64::INFINITY], file!(), line!());
        assert!(matches!(res, Err(SceneError::NonFiniteValueError(_))));
    }

    #[test]
    fn messages_carry_location() {
        let e = SceneError::new_unsupported_axis_order_error("XXY", "a.rs", 7);
        assert!(e.message().contains("XXY"));
        assert!(e.to_string().contains("a.rs, Line: 7"));
    }
}
