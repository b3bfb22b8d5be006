use std::collections::HashMap;
use std::path::Path;
use crate::scene_porting::replicacad::ReplicaCADObjectConfig;
use crate::utils::utils_errors::SceneError;
use crate::utils::utils_traits::load_object_from_json_string;

/// Supplies the raw JSON of ReplicaCAD object configs.  Reading them from disk, an archive or an
/// embedded table is up to the implementor.
pub trait ObjectConfigSource {
    /// `config_name` is the template's file name without directories, e.g. "frl_apartment_basket".
    fn object_config_json(&self, config_name: &str) -> Result<String, SceneError>;
}

/// Object configs held as JSON strings, keyed by config name.
#[derive(Clone, Debug, Default)]
pub struct InMemoryObjectConfigSource {
    json_strings: HashMap<String, String>
}
impl InMemoryObjectConfigSource {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn insert(&mut self, config_name: &str, json: &str) {
        self.json_strings.insert(config_name.to_string(), json.to_string());
    }
    pub fn len(&self) -> usize {
        self.json_strings.len()
    }
    pub fn is_empty(&self) -> bool {
        self.json_strings.is_empty()
    }
}
impl ObjectConfigSource for InMemoryObjectConfigSource {
    fn object_config_json(&self, config_name: &str) -> Result<String, SceneError> {
        return match self.json_strings.get(config_name) {
            Some(s) => { Ok(s.clone()) }
            None => { Err(SceneError::new_missing_asset_error(config_name, file!(), line!())) }
        }
    }
}

/// Parsed object configs memoized by template name.  Owned by the caller and passed into each
/// porting call, so its lifetime is exactly as long as the caller keeps it.
pub struct ObjectConfigCache<S: ObjectConfigSource> {
    source: S,
    configs: HashMap<String, ReplicaCADObjectConfig>,
    hits: usize,
    misses: usize
}
impl <S: ObjectConfigSource> ObjectConfigCache<S> {
    pub fn new(source: S) -> Self {
        Self { source, configs: HashMap::new(), hits: 0, misses: 0 }
    }
    /// Looks up the config for a template such as "objects/frl_apartment_basket", loading and
    /// parsing it on first use.
    pub fn get(&mut self, template_name: &str) -> Result<&ReplicaCADObjectConfig, SceneError> {
        if self.configs.contains_key(template_name) {
            self.hits += 1;
        } else {
            let config_name = Self::config_name_for(template_name);
            let json = self.source.object_config_json(&config_name)?;
            let config: ReplicaCADObjectConfig = load_object_from_json_string(&json).map_err(|e| {
                SceneError::new_dataset_format_error("ReplicaCAD object config", &format!("{}: {}", config_name, e.message()), file!(), line!())
            })?;
            self.configs.insert(template_name.to_string(), config);
            self.misses += 1;
        }

        return self.configs.get(template_name).ok_or_else(|| {
            SceneError::new_generic_error_str(&format!("config for {} vanished from the cache.", template_name), file!(), line!())
        });
    }
    pub fn config_name_for(template_name: &str) -> String {
        return match Path::new(template_name).file_name() {
            Some(n) => { n.to_string_lossy().to_string() }
            None => { template_name.to_string() }
        }
    }
    pub fn hits(&self) -> usize {
        self.hits
    }
    pub fn misses(&self) -> usize {
        self.misses
    }
    pub fn len(&self) -> usize {
        self.configs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
    pub fn clear(&mut self) {
        self.configs.clear();
        self.hits = 0;
        self.misses = 0;
    }
    pub fn source(&self) -> &S {
        &self.source
    }
}
