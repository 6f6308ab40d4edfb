//! Offline rendering of a project track to a WAV file.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info};
use serde::Serialize;

use strata_lib::config::ProjectConfig;
use strata_lib::{EngineSettings, MixOutput, SampleFormat};

use super::decode::project_loader;
use super::error::CliError;

const BLOCK_FRAMES: usize = 1024;

/// Condition change applied at a point in the render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionCue {
    pub id: i32,
    pub value: i32,
    pub seconds: f64,
}

impl FromStr for ConditionCue {
    type Err = CliError;

    /// Parse `ID=VALUE@SECONDS`; `@SECONDS` may be omitted for time zero.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            CliError::InvalidArgument(format!(
                "condition '{}', expected ID=VALUE@SECONDS",
                raw
            ))
        };
        let (assignment, seconds) = match raw.split_once('@') {
            Some((assignment, seconds)) => {
                let seconds: f64 = seconds.trim().parse().map_err(|_| invalid())?;
                (assignment, seconds)
            }
            None => (raw, 0.0),
        };
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(invalid());
        }
        let (id, value) = assignment.split_once('=').ok_or_else(invalid)?;
        Ok(Self {
            id: id.trim().parse().map_err(|_| invalid())?,
            value: value.trim().parse().map_err(|_| invalid())?,
            seconds,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub project: PathBuf,
    pub out: PathBuf,
    pub track: Option<String>,
    pub seconds: f64,
    pub sample_rate: u32,
    pub channels: usize,
    pub seed: Option<u64>,
    pub conditions: Vec<ConditionCue>,
    pub debug_clipping: bool,
}

/// What a finished render produced, printed as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSummary {
    pub track: String,
    pub out: String,
    pub frames: u64,
    pub sample_rate: u32,
    pub channels: usize,
    pub conditions_applied: usize,
    pub peak: f32,
    pub playing: String,
}

pub fn render(options: &RenderOptions) -> Result<RenderSummary, CliError> {
    if !options.seconds.is_finite() || options.seconds < 0.0 {
        return Err(CliError::InvalidArgument(format!(
            "render length {} seconds",
            options.seconds
        )));
    }

    let project = ProjectConfig::load(&options.project)?;
    let settings = EngineSettings {
        sample_rate: options.sample_rate,
        channels: options.channels,
        format: SampleFormat::F32,
        volume: 1.0,
        debug_clipping: options.debug_clipping,
    };
    settings.validate()?;

    let base_dir = options
        .project
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut engine = project.build_engine(settings, options.seed, project_loader(base_dir))?;

    let track = match &options.track {
        Some(track) => track.clone(),
        None => engine
            .track_names()
            .first()
            .map(|name| name.to_string())
            .ok_or_else(|| CliError::InvalidArgument("project has no tracks".to_string()))?,
    };
    engine.play_track(&track)?;

    let mut cues: Vec<(u64, ConditionCue)> = options
        .conditions
        .iter()
        .map(|cue| ((cue.seconds * options.sample_rate as f64).round() as u64, *cue))
        .collect();
    cues.sort_by_key(|(frame, _)| *frame);

    let total_frames = (options.seconds * options.sample_rate as f64).round() as u64;
    let spec = hound::WavSpec {
        channels: options.channels as u16,
        sample_rate: options.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&options.out, spec)?;

    let channels = options.channels;
    let mut buffer = vec![0.0_f32; BLOCK_FRAMES * channels];
    let mut frame = 0_u64;
    let mut next_cue = 0;
    let mut peak = 0.0_f32;

    while frame < total_frames {
        while let Some((at, cue)) = cues.get(next_cue).filter(|(at, _)| *at <= frame) {
            debug!("frame {}: condition {}={}", at, cue.id, cue.value);
            engine.set_condition(cue.id, cue.value)?;
            next_cue += 1;
        }

        let mut end = total_frames.min(frame + BLOCK_FRAMES as u64);
        if let Some((at, _)) = cues.get(next_cue) {
            end = end.min(*at);
        }
        let samples = (end - frame) as usize * channels;

        let block = &mut buffer[..samples];
        block.fill(0.0);
        engine.mix_to_buffer(MixOutput::F32(&mut *block))?;
        for &sample in block.iter() {
            peak = peak.max(sample.abs());
            writer.write_sample(sample)?;
        }
        frame = end;
    }
    writer.finalize()?;

    info!(
        "rendered {} frame(s) of {} to {}",
        total_frames,
        track,
        options.out.display()
    );

    Ok(RenderSummary {
        track,
        out: options.out.display().to_string(),
        frames: total_frames,
        sample_rate: options.sample_rate,
        channels,
        conditions_applied: next_cue,
        peak,
        playing: engine.playing_info(),
    })
}
