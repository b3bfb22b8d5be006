use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

/// Height added to every converted ReplicaCAD position by an earlier loader to keep objects clear
/// of the ground plane.  Not part of the dataset's convention, so it is only applied when a config
/// asks for it.
pub const REPLICACAD_LEGACY_VERTICAL_OFFSET: f64 = 0.3;

/// Height the same loader placed the ReplicaCAD stage mesh at.
pub const REPLICACAD_LEGACY_STAGE_HEIGHT: f64 = 0.1;

/// Settings shared by the scene porters.  Every field has a default, so configs only need to name
/// what they change.
///
/// ## Example
/// ```
/// use scene_porter::scene_porting::porting_config::ScenePortingConfig;
/// use scene_porter::utils::utils_traits::ToAndFromRonString;
/// let config = ScenePortingConfig::load_from_ron_string("(vertical_offset: 0.3, verbose: true)").unwrap();
/// assert_eq!(config.vertical_offset, 0.3);
/// assert_eq!(config.skipped_articulated_patterns, vec!["door".to_string()]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenePortingConfig {
    /// Prefix for every asset path the porters emit.
    pub dataset_root: PathBuf,
    /// Added along the target up axis to every converted position.
    pub vertical_offset: f64,
    /// Target-frame position of the stage mesh.
    pub stage_position: [f64; 3],
    /// Rigid objects whose template name contains any of these are left out.
    pub skipped_object_patterns: Vec<String>,
    /// Articulated objects whose template name contains any of these are left out.
    pub skipped_articulated_patterns: Vec<String>,
    /// Rigid objects heavier than this are placed fixed.
    pub heavy_object_mass_threshold: Option<f64>,
    /// Robot placed at a house's agent start position, when the house names one.
    pub agent_urdf: Option<PathBuf>,
    pub verbose: bool
}
impl Default for ScenePortingConfig {
    fn default() -> Self {
        Self {
            dataset_root: PathBuf::new(),
            vertical_offset: 0.0,
            stage_position: [0.0, 0.0, 0.0],
            skipped_object_patterns: vec!["frl_apartment_bike_0".to_string()],
            skipped_articulated_patterns: vec!["door".to_string()],
            heavy_object_mass_threshold: Some(5.0),
            agent_urdf: None,
            verbose: false
        }
    }
}
impl ScenePortingConfig {
    pub fn new(dataset_root: &Path) -> Self {
        Self { dataset_root: dataset_root.to_path_buf(), ..Self::default() }
    }
    /// Reproduces the offsets of the earlier ReplicaCAD loader.
    pub fn new_replicacad_legacy(dataset_root: &Path) -> Self {
        Self {
            vertical_offset: REPLICACAD_LEGACY_VERTICAL_OFFSET,
            stage_position: [0.0, 0.0, REPLICACAD_LEGACY_STAGE_HEIGHT],
            ..Self::new(dataset_root)
        }
    }
    pub fn is_object_skipped(&self, template_name: &str) -> bool {
        self.skipped_object_patterns.iter().any(|p| template_name.contains(p.as_str()))
    }
    pub fn is_articulated_skipped(&self, template_name: &str) -> bool {
        self.skipped_articulated_patterns.iter().any(|p| template_name.contains(p.as_str()))
    }
    pub fn is_heavy(&self, mass: Option<f64>) -> bool {
        match (self.heavy_object_mass_threshold, mass) {
            (Some(threshold), Some(mass)) => { mass > threshold }
            _ => { false }
        }
    }
    pub fn resolve_asset_path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.dataset_root.join(relative)
    }
}
