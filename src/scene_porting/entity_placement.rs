use std::path::PathBuf;
use serde::{Serialize, Deserialize};
use crate::utils::utils_console::{scene_print, PrintColor, PrintMode};
use crate::utils::utils_errors::SceneError;
use crate::utils::utils_se3::euler_axis_order::EulerAxisOrder;
use crate::utils::utils_se3::ordered_quaternion::OrderedQuaternion;
use crate::utils::utils_se3::quaternion_algebra::QuaternionAlgebra;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// The static background mesh of a scene.
    StageMesh { mesh: PathBuf },
    RigidMesh { mesh: PathBuf, collision_mesh: Option<PathBuf>, convex_decomposition: bool },
    Articulated { urdf: PathBuf },
    GroundPlane
}
impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::StageMesh { .. } => { "stage" }
            EntityKind::RigidMesh { .. } => { "rigid" }
            EntityKind::Articulated { .. } => { "articulated" }
            EntityKind::GroundPlane => { "plane" }
        }
    }
}

/// One entity to hand to the physics engine, with its pose already in the engine's convention.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityPlacement {
    pub name: String,
    pub kind: EntityKind,
    pub position: [f64; 3],
    pub orientation: OrderedQuaternion,
    pub scale: [f64; 3],
    pub fixed: bool,
    pub mass: Option<f64>,
    pub friction: Option<f64>
}
impl EntityPlacement {
    /// The orientation as `[x, y, z]` Euler angles in degrees, for engines that take `euler=`
    /// rather than a quaternion.
    pub fn orientation_euler_degrees(&self, axis_order: &EulerAxisOrder) -> Result<[f64; 3], SceneError> {
        QuaternionAlgebra::quaternion_to_euler(&self.orientation.to_quaternion(), axis_order, true)
    }
}

/// Everything a porter produced for one scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortedScene {
    pub entities: Vec<EntityPlacement>,
    /// Template or object names that matched a skip rule.
    pub skipped: Vec<String>
}
impl PortedScene {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn entities_of_kind(&self, label: &str) -> Vec<&EntityPlacement> {
        self.entities.iter().filter(|e| e.kind.label() == label).collect()
    }
    pub fn find(&self, name: &str) -> Option<&EntityPlacement> {
        self.entities.iter().find(|e| e.name == name)
    }
    pub fn print_summary(&self) {
        scene_print(&format!("Ported scene with {} entities ({} skipped)", self.entities.len(), self.skipped.len()), PrintMode::Println, PrintColor::Blue, true);
        for e in &self.entities {
            let p = &e.position;
            let q = e.orientation.components();
            scene_print(&format!("  {:<11} {}", e.kind.label(), e.name), PrintMode::Print, PrintColor::Cyan, false);
            scene_print(&format!("  pos [{:.3}, {:.3}, {:.3}] quat {:?} {:?}{}", p[0], p[1], p[2], q, e.orientation.scalar_order(), if e.fixed { " fixed" } else { "" }), PrintMode::Println, PrintColor::None, false);
        }
        for s in &self.skipped {
            scene_print(&format!("  skipped {}", s), PrintMode::Println, PrintColor::Yellow, false);
        }
    }
}
