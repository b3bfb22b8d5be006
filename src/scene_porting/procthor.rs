use std::collections::HashMap;
use std::path::PathBuf;
use nalgebra::Vector3;
use serde::{Serialize, Deserialize};
use crate::frame_conversion::FrameConversion;
use crate::scene_porting::dataset_literals::{DatasetRotation, DatasetRotationLayout, DatasetScale, DatasetVector3};
use crate::scene_porting::entity_placement::{EntityKind, EntityPlacement, PortedScene};
use crate::scene_porting::porting_config::ScenePortingConfig;
use crate::utils::utils_console::scene_warn;
use crate::utils::utils_errors::SceneError;
use crate::utils::utils_traits::load_object_from_json_string;

/// A ProcTHOR house record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcTHORHouse {
    #[serde(default)]
    pub objects: Vec<ProcTHORObject>,
    #[serde(default)]
    pub agent_start_position: Option<DatasetVector3>
}
impl ProcTHORHouse {
    pub fn new_from_json_string(json_str: &str) -> Result<Self, SceneError> {
        return load_object_from_json_string(json_str).map_err(|e| {
            SceneError::new_dataset_format_error("ProcTHOR house", e.message(), file!(), line!())
        });
    }
    /// Every object including nested children, parents before their children.
    pub fn all_objects(&self) -> Vec<&ProcTHORObject> {
        let mut out_vec = vec![];
        for o in &self.objects { o.collect_into(&mut out_vec); }
        out_vec
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcTHORObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "objectType", alias = "assetId")]
    pub object_type: String,
    pub position: DatasetVector3,
    /// Unity Euler angles in degrees.
    #[serde(default)]
    pub rotation: Option<DatasetRotation>,
    #[serde(default)]
    pub scale: Option<DatasetScale>,
    #[serde(default)]
    pub kinematic: Option<bool>,
    #[serde(default)]
    pub children: Vec<ProcTHORObject>
}
impl ProcTHORObject {
    fn collect_into<'a>(&'a self, out_vec: &mut Vec<&'a ProcTHORObject>) {
        out_vec.push(self);
        for c in &self.children { c.collect_into(out_vec); }
    }
    pub fn display_name(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.object_type)
    }
}

/// Turns ProcTHOR houses into engine placements in the z-up convention.
#[derive(Clone, Debug)]
pub struct ProcTHORHousePorter {
    conversion: FrameConversion,
    layout: DatasetRotationLayout,
    config: ScenePortingConfig,
    /// objectType -> mesh path relative to the dataset root.
    asset_index: HashMap<String, PathBuf>
}
impl ProcTHORHousePorter {
    pub fn new(config: ScenePortingConfig, asset_index: HashMap<String, PathBuf>) -> Self {
        let conversion = FrameConversion::new_unity_to_genesis().with_vertical_offset(config.vertical_offset);
        Self { conversion, layout: DatasetRotationLayout::new_procthor(), config, asset_index }
    }
    /// Reads the asset index from a JSON object mapping object types to mesh paths.
    pub fn new_with_asset_index_json(config: ScenePortingConfig, asset_index_json: &str) -> Result<Self, SceneError> {
        let asset_index: HashMap<String, PathBuf> = load_object_from_json_string(asset_index_json).map_err(|e| {
            SceneError::new_dataset_format_error("ProcTHOR asset index", e.message(), file!(), line!())
        })?;
        Ok(Self::new(config, asset_index))
    }
    pub fn conversion(&self) -> &FrameConversion {
        &self.conversion
    }
    /// Ground plane, then every object, then the agent robot if one is configured.
    pub fn port_house(&self, house: &ProcTHORHouse) -> Result<PortedScene, SceneError> {
        let mut out = PortedScene::new();
        out.entities.push(EntityPlacement {
            name: "ground".to_string(),
            kind: EntityKind::GroundPlane,
            position: [0.0; 3],
            orientation: self.conversion.identity_orientation(),
            scale: [1.0; 3],
            fixed: true,
            mass: None,
            friction: None
        });

        for obj in house.all_objects() {
            if self.config.is_object_skipped(&obj.object_type) {
                if self.config.verbose { scene_warn("ProcTHORHousePorter", &format!("skipping {}", obj.display_name())); }
                out.skipped.push(obj.display_name().to_string());
                continue;
            }
            out.entities.push(self.object_placement(obj)?);
        }

        match (&house.agent_start_position, &self.config.agent_urdf) {
            (Some(start), Some(urdf)) => {
                let p = self.conversion.convert_position(&start.to_vector3())?;
                out.entities.push(EntityPlacement {
                    name: "agent".to_string(),
                    kind: EntityKind::Articulated { urdf: urdf.clone() },
                    position: [p[0], p[1], p[2]],
                    orientation: self.conversion.identity_orientation(),
                    scale: [1.0; 3],
                    fixed: false,
                    mass: None,
                    friction: None
                });
            }
            (Some(_), None) => {
                if self.config.verbose { scene_warn("ProcTHORHousePorter", "house has an agent start position but no agent_urdf is configured"); }
            }
            _ => { }
        }

        Ok(out)
    }
    fn object_placement(&self, obj: &ProcTHORObject) -> Result<EntityPlacement, SceneError> {
        let mesh = match self.asset_index.get(&obj.object_type) {
            Some(m) => { self.config.resolve_asset_path(m) }
            None => { return Err(SceneError::new_missing_asset_error(&obj.object_type, file!(), line!())); }
        };

        let p = self.conversion.convert_position(&obj.position.to_vector3())?;
        let orientation = match &obj.rotation {
            Some(r) => { self.conversion.convert_orientation(&r.to_ordered_quaternion(&self.layout)?)? }
            None => { self.conversion.identity_orientation() }
        };
        let scale = obj.scale.as_ref().map(|s| s.to_vector3()).unwrap_or_else(|| Vector3::new(1.0, 1.0, 1.0));
        let scale = self.conversion.axis_swap().apply_to_scale(&scale);

        Ok(EntityPlacement {
            name: obj.display_name().to_string(),
            kind: EntityKind::RigidMesh { mesh, collision_mesh: None, convex_decomposition: true },
            position: [p[0], p[1], p[2]],
            orientation,
            scale: [scale[0], scale[1], scale[2]],
            fixed: obj.kinematic.unwrap_or(false),
            mass: None,
            friction: None
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use crate::utils::utils_se3::euler_axis_order::EulerAxisOrder;
    use crate::utils::utils_se3::ordered_quaternion::ScalarOrder;
    use crate::utils::utils_se3::quaternion_algebra::QuaternionAlgebra;
    use super::*;

    const HOUSE: &str = r#"{
        "objects": [
            {"id": "Sofa|1", "objectType": "Sofa", "position": {"x": 1.0, "y": 0.4, "z": 2.0},
             "rotation": {"x": 0.0, "y": 90.0, "z": 0.0}, "kinematic": true,
             "children": [
                {"id": "Pillow|1|1", "assetId": "Pillow", "position": {"x": 1.1, "y": 0.8, "z": 2.0},
                 "scale": {"x": 1.0, "y": 2.0, "z": 3.0}}
             ]},
            {"id": "Chair|2", "objectType": "Chair", "position": {"x": -1.0, "y": 0.0, "z": 0.5}, "scale": 0.5}
        ],
        "agent_start_position": {"x": 0.5, "y": 0.9, "z": -0.5}
    }"#;

    const INDEX: &str = r#"{"Sofa": "thor_glb/sofa.glb", "Pillow": "thor_glb/pillow.glb", "Chair": "thor_glb/chair.glb"}"#;

    fn porter(config: ScenePortingConfig) -> ProcTHORHousePorter {
        ProcTHORHousePorter::new_with_asset_index_json(config, INDEX).unwrap()
    }

    #[test]
    fn children_are_flattened() {
        let house = ProcTHORHouse::new_from_json_string(HOUSE).unwrap();
        let names: Vec<&str> = house.all_objects().iter().map(|o| o.display_name()).collect();
        assert_eq!(names, vec!["Sofa|1", "Pillow|1|1", "Chair|2"]);
    }

    #[test]
    fn ports_objects_with_converted_poses() {
        let house = ProcTHORHouse::new_from_json_string(HOUSE).unwrap();
        let scene = porter(ScenePortingConfig::new(Path::new("/thor"))).port_house(&house).unwrap();
        assert_eq!(scene.entities.len(), 4);
        assert_eq!(scene.entities[0].kind, EntityKind::GroundPlane);

        let sofa = scene.find("Sofa|1").unwrap();
        assert_eq!(sofa.position, [1.0, 2.0, 0.4]);
        assert!(sofa.fixed);
        assert_eq!(sofa.kind, EntityKind::RigidMesh { mesh: PathBuf::from("/thor/thor_glb/sofa.glb"), collision_mesh: None, convex_decomposition: true });
        assert_eq!(sofa.orientation.scalar_order(), ScalarOrder::ScalarFirst);
        let expected = QuaternionAlgebra::euler_to_quaternion(0.0, 0.0, -90.0, &EulerAxisOrder::zyx(), true).unwrap();
        assert!(QuaternionAlgebra::rotations_equivalent(&sofa.orientation.to_unit_quaternion().unwrap(), &expected, 1e-9));
    }

    #[test]
    fn scales_are_permuted() {
        let house = ProcTHORHouse::new_from_json_string(HOUSE).unwrap();
        let scene = porter(ScenePortingConfig::default()).port_house(&house).unwrap();
        assert_eq!(scene.find("Pillow|1|1").unwrap().scale, [1.0, 3.0, 2.0]);
        assert_eq!(scene.find("Chair|2").unwrap().scale, [0.5, 0.5, 0.5]);
        let pillow = scene.find("Pillow|1|1").unwrap();
        assert_eq!(pillow.orientation.components(), &[1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn agent_is_placed_when_configured() {
        let house = ProcTHORHouse::new_from_json_string(HOUSE).unwrap();
        let mut config = ScenePortingConfig::default();
        config.agent_urdf = Some(PathBuf::from("urdf/locobot/locobot.urdf"));
        let scene = porter(config).port_house(&house).unwrap();
        let agent = scene.find("agent").unwrap();
        assert_eq!(agent.position, [0.5, -0.5, 0.9]);
        assert_eq!(agent.kind, EntityKind::Articulated { urdf: PathBuf::from("urdf/locobot/locobot.urdf") });
    }

    #[test]
    fn skip_patterns_apply_to_object_types() {
        let house = ProcTHORHouse::new_from_json_string(HOUSE).unwrap();
        let mut config = ScenePortingConfig::default();
        config.skipped_object_patterns = vec!["Pillow".to_string()];
        let scene = porter(config).port_house(&house).unwrap();
        assert_eq!(scene.skipped, vec!["Pillow|1|1".to_string()]);
        assert!(scene.find("Pillow|1|1").is_none());
    }

    #[test]
    fn unmapped_object_type_is_an_error() {
        let house = ProcTHORHouse::new_from_json_string(HOUSE).unwrap();
        let p = ProcTHORHousePorter::new(ScenePortingConfig::default(), HashMap::new());
        assert!(matches!(p.port_house(&house), Err(SceneError::MissingAssetError(_))));
    }
}
