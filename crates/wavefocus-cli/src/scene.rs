//! Scene files.
//!
//! A scene is a JSON document describing the speaker array, the listener and
//! the beams to render. Track paths are relative to the scene file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use wavefocus_engine::{
    match_lengths, ArrayLayout, Beam, Execution, LengthPolicy, Listener, ListenerSpec,
    SpeakerArray, SynthesisConfig, Vec3, Windowing, SPEED_OF_SOUND_M_S,
};

use crate::audio_io;

fn default_speed_of_sound() -> f64 {
    SPEED_OF_SOUND_M_S
}

/// One track steered to one focal point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeamSpec {
    /// WAV file, relative to the scene file unless absolute.
    pub track: PathBuf,
    /// Focal point in meters.
    pub focus: Vec3,
}

/// The contents of a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default = "default_speed_of_sound")]
    pub speed_of_sound: f64,
    #[serde(default)]
    pub windowing: Windowing,
    #[serde(default)]
    pub execution: Execution,
    #[serde(default)]
    pub length_policy: LengthPolicy,
    pub array: ArrayLayout,
    /// Defaults to a fixed listener at the first beam's focus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listener: Option<ListenerSpec>,
    pub beams: Vec<BeamSpec>,
}

impl Scene {
    /// Parses a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scene JSON")
    }

    /// Synthesis settings carried by the scene.
    pub fn config(&self) -> SynthesisConfig {
        SynthesisConfig::default()
            .with_speed_of_sound(self.speed_of_sound)
            .with_windowing(self.windowing)
            .with_execution(self.execution)
    }

    /// Builds the speaker array.
    pub fn speakers(&self) -> Result<SpeakerArray> {
        self.array.build().context("Invalid speaker array")
    }

    /// Focus of the first beam.
    pub fn primary_focus(&self) -> Result<Vec3> {
        match self.beams.first() {
            Some(beam) => Ok(beam.focus),
            None => bail!("Scene has no beams"),
        }
    }
}

/// A scene together with the location it was loaded from.
#[derive(Debug, Clone)]
pub struct SceneFile {
    pub path: PathBuf,
    pub scene: Scene,
}

/// Everything the engine needs for one render.
#[derive(Debug, Clone)]
pub struct PreparedScene {
    pub speakers: SpeakerArray,
    pub beams: Vec<Beam>,
    pub listener: Listener,
    pub config: SynthesisConfig,
}

impl PreparedScene {
    /// Sample rate shared by every beam.
    pub fn sample_rate(&self) -> u32 {
        self.beams
            .first()
            .map(|beam| beam.track.sample_rate())
            .unwrap_or(0)
    }
}

impl SceneFile {
    /// Reads and parses a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file: {}", path.display()))?;
        let scene = Scene::from_json(&json)
            .with_context(|| format!("Invalid scene file: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            scene,
        })
    }

    /// Directory that relative track paths resolve against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Resolves a beam's track path.
    pub fn track_path(&self, beam: &BeamSpec) -> PathBuf {
        self.base_dir().join(&beam.track)
    }

    /// Decodes every track and resolves the array and listener.
    pub fn prepare(&self) -> Result<PreparedScene> {
        let scene = &self.scene;
        let focus = scene.primary_focus()?;
        let speakers = scene.speakers()?;

        let tracks = scene
            .beams
            .iter()
            .map(|beam| audio_io::read_track(&self.track_path(beam)))
            .collect::<Result<Vec<_>>>()?;
        let tracks = match_lengths(tracks, scene.length_policy)
            .context("Scene tracks cannot be combined")?;
        let num_samples = tracks.first().map(|t| t.len()).unwrap_or(0);

        let listener = match &scene.listener {
            Some(spec) => spec.resolve(num_samples).context("Invalid listener")?,
            None => Listener::Fixed(focus),
        };

        let beams = tracks
            .into_iter()
            .zip(&scene.beams)
            .map(|(track, spec)| Beam::new(track, spec.focus))
            .collect();

        Ok(PreparedScene {
            speakers,
            beams,
            listener,
            config: scene.config(),
        })
    }
}
