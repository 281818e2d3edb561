use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::mixer;
use crate::error::{Result, SpectrogramError};

/// Mono sample stream loaded fully into memory.
#[derive(Debug)]
pub struct AudioData {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

impl AudioData {
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Container formats accepted on the command line, chosen by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Ok(Self::Wav),
            "mp3" => Ok(Self::Mp3),
            _ => Err(SpectrogramError::UnsupportedFormat {
                extension: ext.to_string(),
            }),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
        }
    }
}

pub fn decode_audio(path: &Path) -> Result<AudioData> {
    let format_hint = AudioFormat::from_path(path)?;

    let file = std::fs::File::open(path).map_err(|e| SpectrogramError::io(path, e))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    hint.with_extension(format_hint.extension());

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| SpectrogramError::decode(path, e))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| SpectrogramError::decode(path, "no audio tracks found"))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| SpectrogramError::decode(path, "unknown sample rate"))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| SpectrogramError::decode(path, e))?;

    let mut samples: Vec<f64> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(SpectrogramError::decode(path, e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(msg)) => {
                log::debug!("Skipping corrupt packet: {}", msg);
                continue;
            }
            Err(e) => return Err(SpectrogramError::decode(path, e)),
        };

        let spec = *decoded.spec();
        let channels = spec.channels.count();

        let mut sample_buf = SampleBuffer::<f32>::new(decoded.frames() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        mixer::downmix_interleaved(sample_buf.samples(), channels, &mut samples);
    }

    let audio = AudioData {
        samples,
        sample_rate,
    };

    log::info!(
        "Decoded audio: {} samples, {}Hz, {:.1}s",
        audio.samples.len(),
        audio.sample_rate,
        audio.duration()
    );

    Ok(audio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("specgram-decode-{}-{}", std::process::id(), name))
    }

    fn write_wav(path: &Path, channels: u16, frames: &[Vec<i16>]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for frame in frames {
            for &s in frame {
                writer.write_sample(s).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn dispatches_on_extension() {
        assert_eq!(AudioFormat::from_path(Path::new("a.wav")).unwrap(), AudioFormat::Wav);
        assert_eq!(AudioFormat::from_path(Path::new("b.MP3")).unwrap(), AudioFormat::Mp3);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = decode_audio(Path::new("song.flac")).unwrap_err();
        assert!(matches!(
            err,
            SpectrogramError::UnsupportedFormat { ref extension } if extension == "flac"
        ));

        let err = AudioFormat::from_path(Path::new("no_extension")).unwrap_err();
        assert!(matches!(err, SpectrogramError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_file_is_io_failure() {
        let err = decode_audio(&temp_path("does-not-exist.wav")).unwrap_err();
        assert!(matches!(err, SpectrogramError::Io { .. }));
    }

    #[test]
    fn garbage_file_is_decode_failure() {
        let path = temp_path("garbage.wav");
        std::fs::write(&path, b"this is not a riff file at all").unwrap();
        let err = decode_audio(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, SpectrogramError::DecodeFailure { .. }));
    }

    #[test]
    fn stereo_wav_is_mixed_to_mono() {
        let path = temp_path("stereo.wav");
        let frames: Vec<Vec<i16>> = (0..100).map(|_| vec![16384, 0]).collect();
        write_wav(&path, 2, &frames);

        let audio = decode_audio(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(audio.sample_rate, 8000);
        assert_eq!(audio.samples.len(), 100);
        for s in &audio.samples {
            assert!((s - 0.25).abs() < 1e-6, "sample {} != 0.25", s);
        }
    }

    #[test]
    fn mono_wav_passes_through() {
        let path = temp_path("mono.wav");
        let frames: Vec<Vec<i16>> = (0..64).map(|_| vec![-16384]).collect();
        write_wav(&path, 1, &frames);

        let audio = decode_audio(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(audio.samples.len(), 64);
        assert!(audio.samples.iter().all(|s| (s + 0.5).abs() < 1e-6));
    }
}
