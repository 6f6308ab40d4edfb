//! JSON project definitions and engine construction from them.
//!
//! A project lists tracks and their clips. Durations are authored in
//! milliseconds and converted to frames at the engine sample rate. Audio
//! is supplied by a caller-provided loader so the library never touches
//! codecs or the filesystem beyond reading the project file.

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::clip::{BufferClip, ClipFades, ClipKind, ClipParams, Condition, ConditionType};
use crate::engine::{Engine, EngineSettings};
use crate::error::ConfigError;
use crate::random::seeded_source;
use crate::track::{MusicTrack, TrackFades};

/// Decoded audio handed back by a clip loader.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAudio {
    /// Interleaved samples.
    pub samples: Vec<f32>,
    pub channels: usize,
    pub sample_rate: u32,
}

impl LoadedAudio {
    /// A single silent frame, for building an engine without decoding.
    pub fn silence(settings: &EngineSettings) -> Self {
        Self {
            samples: vec![0.0; settings.channels],
            channels: settings.channels,
            sample_rate: settings.sample_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Default tempo for clips that do not set their own.
    pub bpm: f32,
    pub beats_per_bar: u32,
    pub tracks: Vec<TrackConfig>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            beats_per_bar: 4,
            tracks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackConfig {
    pub name: String,
    pub volume: f32,
    pub fade_in_ms: f32,
    pub fade_out_ms: f32,
    pub xfade_in_ms: f32,
    pub xfade_out_ms: f32,
    pub clips: Vec<ClipConfig>,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            volume: 1.0,
            fade_in_ms: 0.0,
            fade_out_ms: 0.0,
            xfade_in_ms: 0.0,
            xfade_out_ms: 0.0,
            clips: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClipConfig {
    /// Audio file path, resolved by the loader.
    pub source: String,
    pub kind: ClipKind,
    pub random_chance: u32,
    pub min_movement_bars: u32,
    pub bars: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beats_per_bar: Option<u32>,
    pub fade_in_ms: f32,
    pub fade_out_ms: f32,
    pub xfade_in_ms: f32,
    pub xfade_out_ms: f32,
    pub volume: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            source: String::new(),
            kind: ClipKind::Loop,
            random_chance: 0,
            min_movement_bars: 0,
            bars: 0,
            bpm: None,
            beats_per_bar: None,
            fade_in_ms: 0.0,
            fade_out_ms: 0.0,
            xfade_in_ms: 0.0,
            xfade_out_ms: 0.0,
            volume: 1.0,
            condition: None,
        }
    }
}

impl ProjectConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let project: Self = serde_json::from_str(json)?;
        project.validate()?;
        Ok(project)
    }

    /// Read and validate a project file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let project = Self::from_json(&json)?;
        info!(
            "loaded project {} ({} track(s))",
            path.display(),
            project.tracks.len()
        );
        Ok(project)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A small two-track project showing every clip role.
    pub fn example() -> Self {
        let clip = |source: &str, kind: ClipKind| ClipConfig {
            source: source.to_string(),
            kind,
            bars: 4,
            ..ClipConfig::default()
        };
        Self {
            bpm: 120.0,
            beats_per_bar: 4,
            tracks: vec![
                TrackConfig {
                    name: "explore".to_string(),
                    fade_in_ms: 500.0,
                    fade_out_ms: 1000.0,
                    xfade_in_ms: 250.0,
                    xfade_out_ms: 250.0,
                    clips: vec![
                        clip("music/explore_intro.wav", ClipKind::Intro),
                        clip("music/explore_a.wav", ClipKind::Loop),
                        clip("music/explore_b.wav", ClipKind::Loop),
                        ClipConfig {
                            random_chance: 25,
                            ..clip("music/explore_sting.wav", ClipKind::Loop)
                        },
                        ClipConfig {
                            min_movement_bars: 1,
                            condition: Some(Condition::new(2, ConditionType::Greater, 0, 0)),
                            ..clip("music/explore_danger.wav", ClipKind::Conditional)
                        },
                        clip("music/explore_end.wav", ClipKind::End),
                    ],
                    ..TrackConfig::default()
                },
                TrackConfig {
                    name: "battle".to_string(),
                    xfade_in_ms: 100.0,
                    xfade_out_ms: 400.0,
                    clips: vec![
                        ClipConfig {
                            bpm: Some(140.0),
                            min_movement_bars: 2,
                            ..clip("music/battle_loop.wav", ClipKind::Loop)
                        },
                        ClipConfig {
                            bpm: Some(140.0),
                            condition: Some(Condition::new(
                                3,
                                ConditionType::Range,
                                5,
                                10,
                            )),
                            ..clip("music/battle_boss.wav", ClipKind::Conditional)
                        },
                    ],
                    ..TrackConfig::default()
                },
            ],
        }
    }

    /// Check every track and clip for values the engine cannot play.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for track in &self.tracks {
            for clip in &track.clips {
                if let Err(reason) = self.check_clip(clip) {
                    return Err(ConfigError::InvalidClip {
                        track: track.name.clone(),
                        clip: clip.source.clone(),
                        reason,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_clip(&self, clip: &ClipConfig) -> Result<(), String> {
        if clip.source.trim().is_empty() {
            return Err("missing source".to_string());
        }
        if clip.random_chance > 100 {
            return Err(format!("random_chance {} exceeds 100", clip.random_chance));
        }
        let bpm = clip.bpm.unwrap_or(self.bpm);
        if clip.bars > 0 && !(bpm.is_finite() && bpm > 0.0) {
            return Err(format!("bars set but bpm is {}", bpm));
        }
        if clip.min_movement_bars > 0 && !(bpm.is_finite() && bpm > 0.0) {
            return Err(format!("min_movement_bars set but bpm is {}", bpm));
        }
        match (clip.kind, clip.condition) {
            (ClipKind::Conditional, None) => {
                Err("conditional clip without a condition".to_string())
            }
            (_, Some(condition))
                if condition.kind == ConditionType::Range && condition.value2 < condition.value =>
            {
                Err(format!(
                    "empty range {}..={}",
                    condition.value, condition.value2
                ))
            }
            _ => Ok(()),
        }
    }

    /// Build an engine with one track per definition.
    ///
    /// `loader` decodes each clip source. With a `seed`, track `n` draws its
    /// selections from a source seeded with `seed + n`.
    pub fn build_engine<F>(
        &self,
        settings: EngineSettings,
        seed: Option<u64>,
        mut loader: F,
    ) -> Result<Engine, ConfigError>
    where
        F: FnMut(&ClipConfig) -> Result<LoadedAudio, ConfigError>,
    {
        let mut engine = Engine::new(settings)?;
        for (index, track_config) in self.tracks.iter().enumerate() {
            let mut track = match seed {
                Some(seed) => MusicTrack::with_random(
                    track_config.name.clone(),
                    seeded_source(seed.wrapping_add(index as u64)),
                ),
                None => MusicTrack::new(track_config.name.clone()),
            };
            track.set_fades(track_config.fades(&settings));
            track.set_volume(track_config.volume);

            for clip_config in &track_config.clips {
                let audio = loader(clip_config)?;
                if audio.sample_rate != settings.sample_rate {
                    return Err(ConfigError::InvalidClip {
                        track: track_config.name.clone(),
                        clip: clip_config.source.clone(),
                        reason: format!(
                            "sample rate {} differs from output rate {}",
                            audio.sample_rate, settings.sample_rate
                        ),
                    });
                }
                debug!(
                    "track {}: {} ({:?}, {} frame(s))",
                    track_config.name,
                    clip_config.source,
                    clip_config.kind,
                    audio.samples.len() / audio.channels.max(1)
                );
                let clip = BufferClip::new(
                    clip_config.source.clone(),
                    audio.samples,
                    audio.channels,
                    audio.sample_rate,
                    self.clip_params(clip_config, &settings),
                );
                track.attach_clip(Box::new(clip));
            }
            engine.add_track(track)?;
        }
        Ok(engine)
    }

    /// Resolve a clip definition against project defaults.
    pub fn clip_params(&self, clip: &ClipConfig, settings: &EngineSettings) -> ClipParams {
        ClipParams {
            kind: clip.kind,
            random_chance: clip.random_chance,
            min_movement_bars: clip.min_movement_bars,
            fades: ClipFades {
                fade_in: settings.ms_to_frames(clip.fade_in_ms),
                fade_out: settings.ms_to_frames(clip.fade_out_ms),
                xfade_in: settings.ms_to_frames(clip.xfade_in_ms),
                xfade_out: settings.ms_to_frames(clip.xfade_out_ms),
            },
            condition: clip.condition,
            bpm: clip.bpm.unwrap_or(self.bpm),
            beats_per_bar: clip.beats_per_bar.unwrap_or(self.beats_per_bar),
            bars: clip.bars,
            volume: clip.volume,
        }
    }
}

impl TrackConfig {
    pub fn fades(&self, settings: &EngineSettings) -> TrackFades {
        TrackFades {
            fade_in: settings.ms_to_frames(self.fade_in_ms),
            fade_out: settings.ms_to_frames(self.fade_out_ms),
            xfade_in: settings.ms_to_frames(self.xfade_in_ms),
            xfade_out: settings.ms_to_frames(self.xfade_out_ms),
        }
    }
}
