use std::path::PathBuf;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Serialize, Deserialize};
use crate::frame_conversion::FrameConversion;
use crate::scene_porting::dataset_literals::{DatasetRotation, DatasetRotationLayout, DatasetVector3};
use crate::scene_porting::entity_placement::{EntityKind, EntityPlacement, PortedScene};
use crate::scene_porting::object_config_cache::{ObjectConfigCache, ObjectConfigSource};
use crate::scene_porting::porting_config::ScenePortingConfig;
use crate::utils::utils_console::scene_warn;
use crate::utils::utils_errors::SceneError;
use crate::utils::utils_se3::ordered_quaternion::OrderedQuaternion;
use crate::utils::utils_traits::load_object_from_json_string;

/// A `*.scene_instance.json` file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplicaCADSceneInstance {
    pub stage_instance: ReplicaCADStageInstance,
    #[serde(default)]
    pub object_instances: Vec<ReplicaCADObjectInstance>,
    #[serde(default)]
    pub articulated_object_instances: Vec<ReplicaCADArticulatedObjectInstance>
}
impl ReplicaCADSceneInstance {
    pub fn new_from_json_string(json_str: &str) -> Result<Self, SceneError> {
        return load_object_from_json_string(json_str).map_err(|e| {
            SceneError::new_dataset_format_error("ReplicaCAD scene instance", e.message(), file!(), line!())
        });
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplicaCADStageInstance {
    /// e.g. "stages/apt_0_stage"
    pub template_name: String
}

/// Omitted translations and rotations mean the origin and no rotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplicaCADObjectInstance {
    pub template_name: String,
    #[serde(default)]
    pub translation: Option<DatasetVector3>,
    #[serde(default)]
    pub rotation: Option<DatasetRotation>,
    /// "STATIC", "DYNAMIC" or "KINEMATIC".
    #[serde(default)]
    pub motion_type: Option<String>
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplicaCADArticulatedObjectInstance {
    pub template_name: String,
    #[serde(default)]
    pub translation: Option<DatasetVector3>,
    #[serde(default)]
    pub rotation: Option<DatasetRotation>,
    #[serde(default)]
    pub uniform_scale: Option<f64>,
    #[serde(default)]
    pub fixed_base: Option<bool>
}

/// A `*.object_config.json` file.  Asset paths are relative to `configs/objects`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplicaCADObjectConfig {
    pub render_asset: String,
    #[serde(default)]
    pub collision_asset: Option<String>,
    #[serde(default)]
    pub mass: Option<f64>,
    #[serde(default, alias = "friction")]
    pub friction_coefficient: Option<f64>,
    #[serde(default)]
    pub urdf_filepath: Option<String>
}

const OBJECT_CONFIG_DIR: &str = "configs/objects";

/// Turns ReplicaCAD scene instances into engine placements in the z-up convention.
#[derive(Clone, Debug)]
pub struct ReplicaCADScenePorter {
    conversion: FrameConversion,
    layout: DatasetRotationLayout,
    config: ScenePortingConfig
}
impl ReplicaCADScenePorter {
    pub fn new(config: ScenePortingConfig) -> Self {
        let conversion = FrameConversion::new_habitat_to_genesis().with_vertical_offset(config.vertical_offset);
        Self { conversion, layout: DatasetRotationLayout::new_replicacad(), config }
    }
    pub fn conversion(&self) -> &FrameConversion {
        &self.conversion
    }
    pub fn config(&self) -> &ScenePortingConfig {
        &self.config
    }
    /// Stage first, then rigid objects, then articulated objects, each in file order.
    pub fn port_scene<S: ObjectConfigSource>(&self, instance: &ReplicaCADSceneInstance, cache: &mut ObjectConfigCache<S>) -> Result<PortedScene, SceneError> {
        let mut out = PortedScene::new();
        out.entities.push(self.stage_placement(&instance.stage_instance)?);

        for obj in &instance.object_instances {
            if self.config.is_object_skipped(&obj.template_name) {
                self.note_skip(&mut out, &obj.template_name);
                continue;
            }
            let object_config = cache.get(&obj.template_name)?;
            out.entities.push(self.object_placement(obj, object_config)?);
        }

        for aobj in &instance.articulated_object_instances {
            if self.config.is_articulated_skipped(&aobj.template_name) {
                self.note_skip(&mut out, &aobj.template_name);
                continue;
            }
            out.entities.push(self.articulated_placement(aobj)?);
        }

        Ok(out)
    }
    fn note_skip(&self, out: &mut PortedScene, name: &str) {
        if self.config.verbose { scene_warn("ReplicaCADScenePorter", &format!("skipping {}", name)); }
        out.skipped.push(name.to_string());
    }
    /// The stage mesh is authored y-up, so it is turned by the axis swap itself.
    fn stage_placement(&self, stage: &ReplicaCADStageInstance) -> Result<EntityPlacement, SceneError> {
        let rotation = self.conversion.axis_swap().as_rotation()?;
        let q = UnitQuaternion::from_rotation_matrix(&rotation);
        Ok(EntityPlacement {
            name: stage.template_name.clone(),
            kind: EntityKind::StageMesh { mesh: self.config.resolve_asset_path(format!("{}.glb", stage.template_name)) },
            position: self.config.stage_position,
            orientation: OrderedQuaternion::new_from_unit_quaternion(&q, self.conversion.target().scalar_order()),
            scale: [1.0; 3],
            fixed: true,
            mass: None,
            friction: None
        })
    }
    fn object_placement(&self, obj: &ReplicaCADObjectInstance, object_config: &ReplicaCADObjectConfig) -> Result<EntityPlacement, SceneError> {
        let (position, orientation) = self.convert_pose(&obj.translation, &obj.rotation)?;
        let object_dir = PathBuf::from(OBJECT_CONFIG_DIR);

        let kind = match &object_config.urdf_filepath {
            Some(urdf) => { EntityKind::Articulated { urdf: self.config.resolve_asset_path(urdf) } }
            None => {
                let collision_mesh = object_config.collision_asset.as_ref().map(|c| self.config.resolve_asset_path(object_dir.join(c)));
                EntityKind::RigidMesh {
                    mesh: self.config.resolve_asset_path(object_dir.join(&object_config.render_asset)),
                    convex_decomposition: collision_mesh.is_none(),
                    collision_mesh
                }
            }
        };
        let is_static = obj.motion_type.as_deref() == Some("STATIC");

        Ok(EntityPlacement {
            name: obj.template_name.clone(),
            kind,
            position,
            orientation,
            scale: [1.0; 3],
            fixed: is_static || self.config.is_heavy(object_config.mass),
            mass: object_config.mass,
            friction: object_config.friction_coefficient
        })
    }
    fn articulated_placement(&self, aobj: &ReplicaCADArticulatedObjectInstance) -> Result<EntityPlacement, SceneError> {
        let (position, orientation) = self.convert_pose(&aobj.translation, &aobj.rotation)?;
        let name = &aobj.template_name;
        let s = aobj.uniform_scale.unwrap_or(1.0);

        Ok(EntityPlacement {
            name: name.clone(),
            kind: EntityKind::Articulated { urdf: self.config.resolve_asset_path(format!("urdf/{}/{}.urdf", name, name)) },
            position,
            orientation,
            scale: [s, s, s],
            fixed: aobj.fixed_base.unwrap_or(false),
            mass: None,
            friction: None
        })
    }
    fn convert_pose(&self, translation: &Option<DatasetVector3>, rotation: &Option<DatasetRotation>) -> Result<([f64; 3], OrderedQuaternion), SceneError> {
        let t = translation.as_ref().map(|t| t.to_vector3()).unwrap_or_else(Vector3::zeros);
        let p = self.conversion.convert_position(&t)?;
        let orientation = match rotation {
            Some(r) => { self.conversion.convert_orientation(&r.to_ordered_quaternion(&self.layout)?)? }
            None => { self.conversion.identity_orientation() }
        };
        Ok(([p[0], p[1], p[2]], orientation))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use crate::scene_porting::object_config_cache::InMemoryObjectConfigSource;
    use crate::utils::utils_se3::euler_axis_order::EulerAxisOrder;
    use crate::utils::utils_se3::ordered_quaternion::ScalarOrder;
    use crate::utils::utils_se3::quaternion_algebra::QuaternionAlgebra;
    use super::*;

    const SCENE: &str = r#"{
        "stage_instance": {"template_name": "stages/apt_0_stage"},
        "object_instances": [
            {"template_name": "objects/frl_apartment_basket", "translation": [1.0, 2.0, 3.0],
             "rotation": [0.7071067811865476, 0.0, 0.7071067811865476, 0.0], "motion_type": "DYNAMIC"},
            {"template_name": "objects/frl_apartment_bike_01", "translation": [0.0, 0.0, 0.0],
             "rotation": [1.0, 0.0, 0.0, 0.0], "motion_type": "DYNAMIC"},
            {"template_name": "objects/frl_apartment_sofa", "translation": [-1.0, 0.5, 2.0],
             "rotation": [1.0, 0.0, 0.0, 0.0], "motion_type": "DYNAMIC"},
            {"template_name": "objects/frl_apartment_basket", "translation": [0.0, 1.0, 0.0],
             "rotation": {"w": 1.0, "x": 0.0, "y": 0.0, "z": 0.0}, "motion_type": "STATIC"}
        ],
        "articulated_object_instances": [
            {"template_name": "fridge", "translation": [2.0, 0.0, -1.0], "rotation": [1.0, 0.0, 0.0, 0.0],
             "fixed_base": true, "uniform_scale": 0.9},
            {"template_name": "door2", "translation": [0.0, 0.0, 0.0]}
        ]
    }"#;

    fn cache() -> ObjectConfigCache<InMemoryObjectConfigSource> {
        let mut source = InMemoryObjectConfigSource::new();
        source.insert("frl_apartment_basket", r#"{"render_asset": "frl_apartment_basket.glb", "collision_asset": "convex/frl_apartment_basket_cv_decomp.glb", "mass": 0.4, "friction_coefficient": 0.5}"#);
        source.insert("frl_apartment_sofa", r#"{"render_asset": "frl_apartment_sofa.glb", "mass": 40.0}"#);
        ObjectConfigCache::new(source)
    }

    fn port(config: ScenePortingConfig) -> PortedScene {
        let instance = ReplicaCADSceneInstance::new_from_json_string(SCENE).unwrap();
        ReplicaCADScenePorter::new(config).port_scene(&instance, &mut cache()).unwrap()
    }

    #[test]
    fn ports_every_kept_record() {
        let scene = port(ScenePortingConfig::new(Path::new("/data")));
        assert_eq!(scene.entities.len(), 5);
        assert_eq!(scene.skipped, vec!["objects/frl_apartment_bike_01".to_string(), "door2".to_string()]);
        assert_eq!(scene.entities_of_kind("stage").len(), 1);
        assert_eq!(scene.entities_of_kind("rigid").len(), 3);
        assert_eq!(scene.entities_of_kind("articulated").len(), 1);
    }

    #[test]
    fn stage_is_turned_upright() {
        let scene = port(ScenePortingConfig::new(Path::new("/data")));
        let stage = &scene.entities[0];
        assert_eq!(stage.kind, EntityKind::StageMesh { mesh: PathBuf::from("/data/stages/apt_0_stage.glb") });
        assert!(stage.fixed);
        let expected = QuaternionAlgebra::euler_to_quaternion(90.0, 0.0, 0.0, &Default::default(), true).unwrap();
        assert!(QuaternionAlgebra::rotations_equivalent(&stage.orientation.to_unit_quaternion().unwrap(), &expected, 1e-9));
        let euler = stage.orientation_euler_degrees(&EulerAxisOrder::xyz()).unwrap();
        assert!((euler[0] - 90.0).abs() < 1e-9 && euler[1].abs() < 1e-9 && euler[2].abs() < 1e-9, "{:?}", euler);
    }

    #[test]
    fn rigid_object_pose_and_assets() {
        let scene = port(ScenePortingConfig::new(Path::new("/data")));
        let basket = &scene.entities[1];
        assert_eq!(basket.position, [1.0, -3.0, 2.0]);
        assert_eq!(basket.orientation.scalar_order(), ScalarOrder::ScalarFirst);
        // 90 degrees about Habitat's up axis is 90 degrees about the z-up frame's up axis.
        let expected = QuaternionAlgebra::euler_to_quaternion(0.0, 0.0, 90.0, &Default::default(), true).unwrap();
        assert!(QuaternionAlgebra::rotations_equivalent(&basket.orientation.to_unit_quaternion().unwrap(), &expected, 1e-9));
        assert_eq!(basket.kind, EntityKind::RigidMesh {
            mesh: PathBuf::from("/data/configs/objects/frl_apartment_basket.glb"),
            collision_mesh: Some(PathBuf::from("/data/configs/objects/convex/frl_apartment_basket_cv_decomp.glb")),
            convex_decomposition: false
        });
        assert!(!basket.fixed);
        assert_eq!((basket.mass, basket.friction), (Some(0.4), Some(0.5)));
    }

    #[test]
    fn fixed_when_static_or_heavy() {
        let scene = port(ScenePortingConfig::new(Path::new("/data")));
        let sofa = &scene.entities[2];
        assert!(sofa.fixed);
        assert!(matches!(sofa.kind, EntityKind::RigidMesh { convex_decomposition: true, collision_mesh: None, .. }));
        let static_basket = &scene.entities[3];
        assert!(static_basket.fixed);
    }

    #[test]
    fn articulated_object() {
        let scene = port(ScenePortingConfig::new(Path::new("/data")));
        let fridge = scene.find("fridge").unwrap();
        assert_eq!(fridge.kind, EntityKind::Articulated { urdf: PathBuf::from("/data/urdf/fridge/fridge.urdf") });
        assert_eq!(fridge.position, [2.0, 1.0, 0.0]);
        assert_eq!(fridge.scale, [0.9, 0.9, 0.9]);
        assert!(fridge.fixed);
    }

    #[test]
    fn object_config_with_urdf_becomes_articulated() {
        let scene_json = r#"{
            "stage_instance": {"template_name": "stages/apt_1_stage"},
            "object_instances": [
                {"template_name": "objects/kitchen_cupboard", "translation": [0.5, 0.0, -2.0], "motion_type": "DYNAMIC"}
            ]
        }"#;
        let mut source = InMemoryObjectConfigSource::new();
        source.insert("kitchen_cupboard", r#"{"render_asset": "kitchen_cupboard.glb", "urdf_filepath": "urdf/x.urdf", "friction": 0.3}"#);
        let mut c = ObjectConfigCache::new(source);
        let instance = ReplicaCADSceneInstance::new_from_json_string(scene_json).unwrap();
        let scene = ReplicaCADScenePorter::new(ScenePortingConfig::new(Path::new("/data"))).port_scene(&instance, &mut c).unwrap();

        let cupboard = scene.find("objects/kitchen_cupboard").unwrap();
        assert_eq!(cupboard.kind, EntityKind::Articulated { urdf: PathBuf::from("/data/urdf/x.urdf") });
        assert_eq!(cupboard.friction, Some(0.3));
        assert_eq!(cupboard.position, [0.5, 2.0, 0.0]);
        assert!(!cupboard.fixed);
    }

    #[test]
    fn legacy_offsets_apply_when_requested() {
        let scene = port(ScenePortingConfig::new_replicacad_legacy(Path::new("/data")));
        assert_eq!(scene.entities[0].position, [0.0, 0.0, 0.1]);
        let basket = &scene.entities[1];
        assert!((basket.position[2] - 2.3).abs() < 1e-12);
    }

    #[test]
    fn cache_is_shared_across_records() {
        let instance = ReplicaCADSceneInstance::new_from_json_string(SCENE).unwrap();
        let porter = ReplicaCADScenePorter::new(ScenePortingConfig::default());
        let mut c = cache();
        porter.port_scene(&instance, &mut c).unwrap();
        assert_eq!((c.misses(), c.hits()), (2, 1));
        porter.port_scene(&instance, &mut c).unwrap();
        assert_eq!((c.misses(), c.hits()), (2, 4));
    }

    #[test]
    fn missing_object_config_is_an_error() {
        let instance = ReplicaCADSceneInstance::new_from_json_string(SCENE).unwrap();
        let porter = ReplicaCADScenePorter::new(ScenePortingConfig::default());
        let mut empty = ObjectConfigCache::new(InMemoryObjectConfigSource::new());
        assert!(matches!(porter.port_scene(&instance, &mut empty), Err(SceneError::MissingAssetError(_))));
    }

    #[test]
    fn malformed_scene_is_a_dataset_error() {
        let res = ReplicaCADSceneInstance::new_from_json_string("{\"object_instances\": []}");
        assert!(matches!(res, Err(SceneError::DatasetFormatError(_))));
    }
}
