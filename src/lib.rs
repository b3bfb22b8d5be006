//! Scene porter converts positions and orientations between the world-coordinate conventions of
//! scene datasets (ReplicaCAD / Habitat, ProcTHOR / Unity) and a z-up rigid-body physics engine.
//! Its core is a small quaternion algebra and a frame converter that conjugates rotations by a
//! fixed axis swap per convention pair; on top of that sit porters that turn dataset records into
//! placement records the engine can consume directly.

pub mod frame_conversion;
pub mod scene_porting;
pub mod utils;
