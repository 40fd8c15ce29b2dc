//! Scene configuration, read from TOML.
//!
//! Every field has a default, and the defaults describe the classic scene: a
//! sun at the origin, an earth circling it at distance 10, and a moon circling
//! the earth at distance 2, ten times as fast.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::model::{BodyInfo, CircularOrbit, StarSystem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Directory that body textures are looked up in.
    pub assets: PathBuf,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub display: DisplayConfig,
    pub bodies: Vec<BodyConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framerate_limit: Option<u64>,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Starting distance from the origin, along +z.
    pub distance: f32,
    /// Radians of tilt per unit of normalized mouse offset.
    pub tilt_sensitivity: f64,
    /// Radians of orbit per pixel dragged.
    pub drag_step: f32,
    /// Radians of orbit per key press.
    pub key_step: f32,
    /// Zoom factor per scroll notch or key press.
    pub zoom_ratio: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub show_orbits: bool,
    pub show_grid: bool,
    pub show_hud: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub name: String,
    pub radius: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<PathBuf>,
    /// Hex RGB, used when there's no texture or it can't be found.
    #[serde(default = "default_body_color")]
    pub color: String,
    /// Name of an earlier body. Omit to hang the body off the scene root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<OrbitConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrbitConfig {
    pub radius: f64,
    /// Radians per millisecond.
    pub angular_rate: f64,
}

fn default_body_color() -> String {
    String::from("ffffff")
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            assets: PathBuf::from("textures"),
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            display: DisplayConfig::default(),
            bodies: default_bodies(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: String::from("Solar System"),
            width: 1280,
            height: 720,
            framerate_limit: Some(60),
            background: String::from("000000"),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            fovy_degrees: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            distance: 20.0,
            tilt_sensitivity: 0.1,
            drag_step: 0.005,
            key_step: 0.1,
            zoom_ratio: 1.2,
            min_distance: 4.0,
            max_distance: 500.0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            show_orbits: true,
            show_grid: false,
            show_hud: true,
        }
    }
}

fn default_bodies() -> Vec<BodyConfig> {
    vec![
        BodyConfig {
            name: String::from("Sun"),
            radius: 3.0,
            texture: Some(PathBuf::from("sun.png")),
            color: String::from("ffcc33"),
            parent: None,
            orbit: None,
        },
        BodyConfig {
            name: String::from("Earth"),
            radius: 1.0,
            texture: Some(PathBuf::from("earth.jpg")),
            color: String::from("2a6fdb"),
            parent: None,
            orbit: Some(OrbitConfig {
                radius: 10.0,
                angular_rate: 0.001,
            }),
        },
        BodyConfig {
            name: String::from("Moon"),
            radius: 0.5,
            texture: Some(PathBuf::from("moon.jpg")),
            color: String::from("bbbbbb"),
            parent: Some(String::from("Earth")),
            orbit: Some(OrbitConfig {
                radius: 2.0,
                angular_rate: 0.01,
            }),
        },
    ]
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml_str(&text).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(text).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        self.window.validate().context("Bad [window] section")?;
        self.camera.validate().context("Bad [camera] section")?;

        ensure!(!self.bodies.is_empty(), "At least one body is required");
        let mut seen = HashMap::new();
        for (i, body) in self.bodies.iter().enumerate() {
            body.validate()
                .with_context(|| format!("Bad body #{} ({:?})", i + 1, body.name))?;
            if let Some(parent) = &body.parent {
                ensure!(
                    seen.contains_key(parent.as_str()),
                    "Body {:?} names parent {:?}, which must be declared before it",
                    body.name,
                    parent
                );
            }
            if seen.insert(body.name.as_str(), i).is_some() {
                bail!("Body name {:?} is used more than once", body.name);
            }
        }
        Ok(())
    }

    /// Builds the body hierarchy. Texture paths come out joined onto the
    /// asset directory.
    pub fn build_system(&self) -> Result<StarSystem> {
        self.validate()?;

        let mut system = StarSystem::new();
        let mut name_to_id = HashMap::new();

        for body in self.bodies.iter() {
            let info = BodyInfo {
                name: body.name.clone(),
                radius: body.radius,
                color: parse_color(&body.color)?,
                texture: body.texture.as_ref().map(|t| self.assets.join(t)),
            };

            // validate() already made sure parents come first
            let parent = match &body.parent {
                Some(name) => Some(name_to_id[name.as_str()]),
                None => None,
            };

            let id = match body.orbit {
                Some(orbit) => system.add_body(
                    info,
                    CircularOrbit::new(orbit.radius, orbit.angular_rate),
                    parent,
                ),
                None => system.add_fixed_body(info, parent),
            };
            name_to_id.insert(body.name.as_str(), id);
        }

        Ok(system)
    }

    pub fn background_color(&self) -> Result<Point3<f32>> {
        parse_color(&self.window.background).context("Bad window background color")
    }
}

impl WindowConfig {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "Window must be non-empty, got {}x{}",
            self.width,
            self.height
        );
        parse_color(&self.background)?;
        Ok(())
    }
}

impl CameraConfig {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.fovy_degrees > 0.0 && self.fovy_degrees < 180.0,
            "fovy_degrees must be strictly between 0 and 180, got {}",
            self.fovy_degrees
        );
        ensure!(
            self.znear > 0.0 && self.znear < self.zfar,
            "Need 0 < znear < zfar, got znear = {} and zfar = {}",
            self.znear,
            self.zfar
        );
        ensure!(
            self.min_distance > 0.0 && self.min_distance <= self.max_distance,
            "Need 0 < min_distance <= max_distance, got {} and {}",
            self.min_distance,
            self.max_distance
        );
        ensure!(
            self.distance.is_finite() && self.distance > 0.0,
            "distance must be positive, got {}",
            self.distance
        );
        ensure!(
            self.tilt_sensitivity.is_finite(),
            "tilt_sensitivity must be finite"
        );
        ensure!(
            self.zoom_ratio > 1.0,
            "zoom_ratio must be greater than 1, got {}",
            self.zoom_ratio
        );
        Ok(())
    }
}

impl BodyConfig {
    fn validate(&self) -> Result<()> {
        ensure!(!self.name.trim().is_empty(), "Body name is empty");
        ensure!(
            self.radius.is_finite() && self.radius > 0.0,
            "radius must be positive, got {}",
            self.radius
        );
        parse_color(&self.color)?;
        if let Some(orbit) = &self.orbit {
            ensure!(
                orbit.radius.is_finite() && orbit.radius >= 0.0,
                "orbit radius must be non-negative, got {}",
                orbit.radius
            );
            ensure!(
                orbit.angular_rate.is_finite(),
                "angular_rate must be finite, got {}",
                orbit.angular_rate
            );
        }
        Ok(())
    }
}

pub fn parse_color(s: &str) -> Result<Point3<f32>> {
    let s = s.trim_start_matches('#');
    ensure!(
        s.len() == 6 && s.is_ascii(),
        "Color {:?} is not of the form rrggbb",
        s
    );
    let channel = |range: std::ops::Range<usize>| -> Result<f32> {
        let value = u8::from_str_radix(&s[range], 16)
            .with_context(|| format!("Color {:?} is not valid hex", s))?;
        Ok(value as f32 / 255.0)
    };

    Ok(Point3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
