use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::utils::utils_errors::SceneError;

pub trait ToAndFromRonString: Serialize + DeserializeOwned {
    fn convert_to_ron_string(&self) -> Result<String, SceneError> {
        return ron::to_string(self).map_err(|e| {
            SceneError::new_generic_error_str(&format!("Could not serialize to ron string: {}", e), file!(), line!())
        });
    }
    fn load_from_ron_string(ron_string: &str) -> Result<Self, SceneError> where Self: Sized {
        let load: Result<Self, _> = ron::from_str(ron_string);
        return match load {
            Ok(load) => { Ok(load) }
            Err(e) => {
                Err(SceneError::new_generic_error_str(&format!("Could not load ron string {:?} into correct type: {}", ron_string, e), file!(), line!()))
            }
        }
    }
}
impl <T> ToAndFromRonString for T where T: Serialize + DeserializeOwned {  }

pub trait ToAndFromJsonString: Serialize + DeserializeOwned {
    fn convert_to_json_string(&self) -> Result<String, SceneError> {
        return serde_json::to_string(self).map_err(|e| {
            SceneError::new_generic_error_str(&format!("Could not serialize to json string: {}", e), file!(), line!())
        });
    }
    fn load_from_json_string(json_str: &str) -> Result<Self, SceneError> where Self: Sized {
        load_object_from_json_string(json_str)
    }
}
impl <T> ToAndFromJsonString for T where T: Serialize + DeserializeOwned {  }

pub fn load_object_from_json_string<T: DeserializeOwned>(json_str: &str) -> Result<T, SceneError> {
    let o_res = serde_json::from_str(json_str);
    return match o_res {
        Ok(o) => { Ok(o) }
        Err(e) => {
            Err(SceneError::new_generic_error_str(&format!("load_object_from_json_string() failed.  The given json_string is incompatible with the requested type: {}", e), file!(), line!()))
        }
    }
}
