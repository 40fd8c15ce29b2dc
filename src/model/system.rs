use nalgebra::{Point3, Vector3};

use super::body::{Body, BodyID, BodyInfo};
use super::orbit::CircularOrbit;

/// The fixed hierarchy of bodies in the scene. Bodies are never added or
/// removed once the scene is running, so ids are just indices.
#[derive(Debug, Clone, Default)]
pub struct StarSystem {
    bodies: Vec<Body>,
}

impl StarSystem {
    pub fn new() -> Self {
        StarSystem { bodies: vec![] }
    }

    /// Adds a body that sits still at its parent's origin.
    ///
    /// # Panics
    ///
    /// Panics if `parent` isn't already in this system.
    pub fn add_fixed_body(&mut self, info: BodyInfo, parent: Option<BodyID>) -> BodyID {
        self.push(info, parent, None)
    }

    /// Adds a body on a circular orbit around its parent's origin.
    ///
    /// # Panics
    ///
    /// Panics if `parent` isn't already in this system.
    pub fn add_body(
        &mut self,
        info: BodyInfo,
        orbit: CircularOrbit,
        parent: Option<BodyID>,
    ) -> BodyID {
        self.push(info, parent, Some(orbit))
    }

    fn push(
        &mut self,
        info: BodyInfo,
        parent: Option<BodyID>,
        orbit: Option<CircularOrbit>,
    ) -> BodyID {
        // Parents must already exist, which also rules out cycles
        if let Some(parent_id) = parent {
            assert!(
                parent_id.0 < self.bodies.len(),
                "Parent {:?} of {} doesn't exist yet",
                parent_id,
                info.name
            );
        }

        let id = BodyID(self.bodies.len());
        self.bodies.push(Body {
            id,
            info,
            parent,
            orbit,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// # Panics
    ///
    /// Panics if `id` doesn't belong to this system.
    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    /// Names are matched exactly, the same way config validation compares
    /// them.
    pub fn find_by_name(&self, name: &str) -> Option<BodyID> {
        self.bodies
            .iter()
            .find(|b| b.info.name == name)
            .map(|b| b.id)
    }

    pub fn get_parent(&self, id: BodyID) -> Option<BodyID> {
        self.get_body(id).parent
    }

    pub fn children(&self, id: BodyID) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(move |b| b.parent == Some(id))
    }

    /// Position relative to the parent node at the given time.
    pub fn local_position(&self, id: BodyID, time_millis: f64) -> Vector3<f64> {
        match &self.get_body(id).orbit {
            Some(orbit) => orbit.position_at(time_millis),
            None => Vector3::zeros(),
        }
    }

    /// Position relative to the parent node before the first frame.
    pub fn initial_local_position(&self, id: BodyID) -> Vector3<f64> {
        match &self.get_body(id).orbit {
            Some(orbit) => orbit.initial_position(),
            None => Vector3::zeros(),
        }
    }

    /// Walks up the parent chain and adds up the local offsets. Nodes never
    /// rotate, so translations compose by plain addition.
    pub fn world_position<F>(&self, id: BodyID, local: F) -> Point3<f64>
    where
        F: Fn(BodyID) -> Vector3<f64>,
    {
        let mut total = Vector3::zeros();
        let mut current = Some(id);
        while let Some(body_id) = current {
            total += local(body_id);
            current = self.get_parent(body_id);
        }
        Point3::from(total)
    }

    pub fn world_position_at(&self, id: BodyID, time_millis: f64) -> Point3<f64> {
        self.world_position(id, |body_id| self.local_position(body_id, time_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn info(name: &str, radius: f32) -> BodyInfo {
        BodyInfo {
            name: name.to_owned(),
            radius,
            color: Point3::new(1.0, 1.0, 1.0),
            texture: None,
        }
    }

    fn sun_earth_moon() -> (StarSystem, BodyID, BodyID, BodyID) {
        let mut system = StarSystem::new();
        let sun = system.add_fixed_body(info("Sun", 3.0), None);
        let earth = system.add_body(info("Earth", 1.0), CircularOrbit::new(10.0, 0.001), None);
        let moon = system.add_body(
            info("Moon", 0.5),
            CircularOrbit::new(2.0, 0.01),
            Some(earth),
        );
        (system, sun, earth, moon)
    }

    #[test]
    fn test_hierarchy() {
        let (system, sun, earth, moon) = sun_earth_moon();
        assert_eq!(system.len(), 3);
        assert_eq!(system.get_parent(sun), None);
        assert_eq!(system.get_parent(earth), None);
        assert_eq!(system.get_parent(moon), Some(earth));

        let earth_children: Vec<_> = system.children(earth).map(|b| b.id).collect();
        assert_eq!(earth_children, vec![moon]);
        assert_eq!(system.children(sun).count(), 0);

        assert_eq!(system.find_by_name("Moon"), Some(moon));
        assert_eq!(system.find_by_name("moon"), None);
        assert_eq!(system.find_by_name("Pluto"), None);
    }

    #[test]
    fn test_world_position_composes() {
        let (system, sun, earth, moon) = sun_earth_moon();

        let t = 98_765.0;
        assert_relative_eq!(system.world_position_at(sun, t), Point3::origin());
        assert_relative_eq!(
            system.world_position_at(moon, t),
            system.world_position_at(earth, t) + system.local_position(moon, t),
        );

        // The Moon is never more than 2 away from the Earth
        for i in 0..50 {
            let t = i as f64 * 777.0;
            let separation = system.world_position_at(moon, t) - system.world_position_at(earth, t);
            assert_relative_eq!(separation.norm(), 2.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_initial_positions() {
        let (system, sun, earth, moon) = sun_earth_moon();
        assert_eq!(system.initial_local_position(sun), Vector3::zeros());
        assert_eq!(system.initial_local_position(earth), Vector3::new(10.0, 0.0, 0.0));
        assert_eq!(system.initial_local_position(moon), Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    #[should_panic]
    fn test_get_body_out_of_range() {
        let (system, ..) = sun_earth_moon();
        system.get_body(BodyID(3));
    }

    #[test]
    #[should_panic]
    fn test_parent_must_exist() {
        let mut system = StarSystem::new();
        system.add_fixed_body(info("Orphan", 1.0), Some(BodyID(3)));
    }
}
