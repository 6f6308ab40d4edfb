//! Clip decoding through symphonia.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use strata_lib::config::{ClipConfig, LoadedAudio};
use strata_lib::ConfigError;

/// Loader resolving clip sources relative to `base_dir`.
pub fn project_loader(
    base_dir: &Path,
) -> impl FnMut(&ClipConfig) -> Result<LoadedAudio, ConfigError> + '_ {
    move |clip| decode_file(&resolve(base_dir, &clip.source))
}

fn resolve(base_dir: &Path, source: &str) -> PathBuf {
    let path = Path::new(source);
    if path.is_relative() {
        base_dir.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Decode the first audio track of a file into interleaved `f32` samples.
pub fn decode_file(path: &Path) -> Result<LoadedAudio, ConfigError> {
    let source = path.display().to_string();
    let fail = |reason: String| ConfigError::Load {
        source: source.clone(),
        reason,
    };

    let file = File::open(path).map_err(|err| fail(err.to_string()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(extension);
    }

    let meta_opts: MetadataOptions = Default::default();
    let fmt_opts: FormatOptions = Default::default();
    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(|err| fail(err.to_string()))?;
    let mut format = probed.format;

    let (track_id, codec_params) = format
        .tracks()
        .iter()
        .find(|track| track.codec_params.codec != CODEC_TYPE_NULL)
        .map(|track| (track.id, track.codec_params.clone()))
        .ok_or_else(|| fail("no supported audio tracks".to_string()))?;

    let dec_opts: DecoderOptions = Default::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &dec_opts)
        .map_err(|err| fail(err.to_string()))?;

    let mut sample_rate = codec_params.sample_rate;
    let mut channels = codec_params.channels.map(|channels| channels.count());
    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(Error::IoError(err)) if err.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(fail(err.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let needed = decoded.capacity() * spec.channels.count();
                sample_rate.get_or_insert(spec.rate);
                channels.get_or_insert(spec.channels.count());

                if sample_buf.as_ref().map_or(true, |buf| buf.capacity() < needed) {
                    sample_buf = Some(SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
                }
                if let Some(buf) = sample_buf.as_mut() {
                    buf.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buf.samples());
                }
            }
            Err(Error::DecodeError(err)) => warn!("{}: decode error: {}", source, err),
            Err(Error::IoError(err)) if err.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(fail(err.to_string())),
        }
    }

    if samples.is_empty() {
        return Err(fail("no audio decoded".to_string()));
    }

    let channels = channels.unwrap_or(1).max(1);
    debug!(
        "decoded {}: {} frame(s), {} channel(s)",
        source,
        samples.len() / channels,
        channels
    );

    Ok(LoadedAudio {
        samples,
        channels,
        sample_rate: sample_rate.unwrap_or(0),
    })
}
