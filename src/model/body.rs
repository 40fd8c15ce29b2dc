use std::path::PathBuf;

use nalgebra::Point3;

use super::orbit::CircularOrbit;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

// All the immutable info about a body
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub name: String,
    pub radius: f32,
    pub color: Point3<f32>,
    pub texture: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
    // None means the body is a child of the scene root
    pub parent: Option<BodyID>,
    // None means the body sits at its parent's origin
    pub orbit: Option<CircularOrbit>,
}
