/// Average a stereo pair down to a single sample: `(L + R) / 2`.
#[inline]
pub fn mix_to_mono(pair: [f32; 2]) -> f64 {
    (pair[0] as f64 + pair[1] as f64) / 2.0
}

/// Pull the stereo pair out of one interleaved frame.
///
/// Mono frames are treated as `(s, s)`; frames with more than two channels
/// contribute only their first two.
#[inline]
pub fn stereo_pair(frame: &[f32]) -> [f32; 2] {
    match frame {
        [] => [0.0, 0.0],
        [s] => [*s, *s],
        [l, r, ..] => [*l, *r],
    }
}

/// Downmix an interleaved buffer with `channels` channels, appending to `out`.
pub fn downmix_interleaved(samples: &[f32], channels: usize, out: &mut Vec<f64>) {
    let channels = channels.max(1);
    out.reserve(samples.len() / channels);
    for frame in samples.chunks_exact(channels) {
        out.push(mix_to_mono(stereo_pair(frame)));
    }
}
