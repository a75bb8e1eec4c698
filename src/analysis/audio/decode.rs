//! Symphonia-based decode of uploaded bytes into mono PCM.

use std::io::Cursor;

use symphonia::core::{
    audio::SampleBuffer, codecs::DecoderOptions, errors::Error as SymphoniaError,
    formats::FormatOptions, io::MediaSourceStream, meta::MetadataOptions, probe::Hint,
};
use tracing::debug;

use super::{DECODE_CAP_SECONDS, downmix_to_mono};
use crate::error::DecodeError;

/// Decoded mono audio at its original sample rate.
#[derive(Debug)]
pub struct DecodedAudio {
    pub mono: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl DecodedAudio {
    pub fn duration_seconds(&self) -> f32 {
        self.mono.len() as f32 / self.sample_rate.max(1) as f32
    }
}

/// Decode an uploaded byte buffer into mono PCM at the source sample rate.
///
/// The optional media type is passed to the container probe as a hint; the
/// probe still sniffs the actual bytes, so a wrong hint degrades to a slower
/// probe rather than a failure.
pub fn decode_bytes(bytes: Vec<u8>, media_type: Option<&str>) -> Result<DecodedAudio, DecodeError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());
    let mut hint = Hint::new();
    if let Some(media_type) = media_type {
        hint.mime_type(media_type);
        if let Some(ext) = extension_for_media_type(media_type) {
            hint.with_extension(ext);
        }
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| DecodeError::Probe {
            message: err.to_string(),
        })?;
    let mut format = probed.format;
    let track = format.default_track().ok_or(DecodeError::NoAudioTrack)?;
    let track_id = track.id;
    let codec_params = &track.codec_params;
    let sample_rate = codec_params
        .sample_rate
        .ok_or(DecodeError::MissingSampleRate)?;
    let channels = codec_params
        .channels
        .ok_or(DecodeError::MissingChannels)?
        .count() as u16;
    if channels == 0 {
        return Err(DecodeError::MissingChannels);
    }
    let max_samples = ((DECODE_CAP_SECONDS * sample_rate as f32).ceil().max(1.0) as usize)
        .saturating_mul(channels as usize);

    let mut decoder = symphonia::default::get_codecs()
        .make(codec_params, &DecoderOptions::default())
        .map_err(|err| DecodeError::CreateDecoder {
            message: err.to_string(),
        })?;

    let mut interleaved = Vec::new();
    loop {
        if interleaved.len() >= max_samples {
            interleaved.truncate(max_samples);
            break;
        }
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(_)) => break,
            Err(err) => {
                return Err(DecodeError::Decode {
                    message: err.to_string(),
                });
            }
        };
        if packet.track_id() != track_id {
            continue;
        }
        let audio_buf = match decoder.decode(&packet) {
            Ok(audio_buf) => audio_buf,
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(err) => {
                return Err(DecodeError::Decode {
                    message: err.to_string(),
                });
            }
        };
        let spec = *audio_buf.spec();
        let mut sample_buf = SampleBuffer::<f32>::new(audio_buf.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(audio_buf);
        interleaved.extend_from_slice(sample_buf.samples());
    }

    if interleaved.is_empty() {
        return Err(DecodeError::EmptyAudio);
    }

    let mono = downmix_to_mono(&interleaved, channels);
    debug!(
        sample_rate,
        channels,
        samples = mono.len(),
        "decoded upload to mono PCM"
    );
    Ok(DecodedAudio {
        mono,
        sample_rate,
        channels,
    })
}

fn extension_for_media_type(media_type: &str) -> Option<&'static str> {
    let media_type = media_type
        .split(';')
        .next()
        .unwrap_or(media_type)
        .trim()
        .to_ascii_lowercase();
    match media_type.as_str() {
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/mpeg" | "audio/mp3" => Some("mp3"),
        "audio/mp4" | "video/mp4" | "audio/m4a" | "audio/x-m4a" => Some("mp4"),
        "audio/ogg" | "application/ogg" => Some("ogg"),
        "audio/flac" | "audio/x-flac" => Some("flac"),
        "audio/webm" | "video/webm" => Some("webm"),
        _ => None,
    }
}
