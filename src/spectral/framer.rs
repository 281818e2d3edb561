//! Slices a mono sample stream into fixed-size, overlapping frames.

use rayon::prelude::*;

/// Frame layout over a borrowed sample stream.
///
/// Frame `i` covers `samples[i * hop .. i * hop + window]`. A trailing
/// partial frame is dropped, never zero-padded.
#[derive(Clone, Copy, Debug)]
pub struct Framer<'a> {
    samples: &'a [f64],
    window_size: usize,
    hop_size: usize,
}

impl<'a> Framer<'a> {
    /// `window_size` and `hop_size` must satisfy `0 < hop_size <= window_size`;
    /// callers validate this through `AnalysisParams`.
    pub fn new(samples: &'a [f64], window_size: usize, hop_size: usize) -> Self {
        debug_assert!(window_size > 0 && hop_size > 0 && hop_size <= window_size);
        Self {
            samples,
            window_size,
            hop_size: hop_size.max(1),
        }
    }

    /// Number of whole frames: `floor((N - W) / H) + 1` when `N >= W`, else 0.
    pub fn len(&self) -> usize {
        frame_count(self.samples.len(), self.window_size, self.hop_size)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Random access to frame `index`, `None` past the last whole frame.
    pub fn frame(&self, index: usize) -> Option<&'a [f64]> {
        let start = index.checked_mul(self.hop_size)?;
        let end = start.checked_add(self.window_size)?;
        self.samples.get(start..end)
    }

    /// Indexed parallel view of the same frames; collecting it keeps frame order.
    pub fn par_iter(&self) -> impl IndexedParallelIterator<Item = &'a [f64]> + 'a {
        self.samples
            .par_windows(self.window_size)
            .step_by(self.hop_size)
    }

    /// Restartable iterator over all frames, in order.
    pub fn iter(&self) -> Frames<'a> {
        Frames {
            framer: *self,
            next: 0,
        }
    }
}

pub fn frame_count(num_samples: usize, window_size: usize, hop_size: usize) -> usize {
    if window_size == 0 || hop_size == 0 || num_samples < window_size {
        return 0;
    }
    (num_samples - window_size) / hop_size + 1
}

pub struct Frames<'a> {
    framer: Framer<'a>,
    next: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a [f64];

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.framer.frame(self.next)?;
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.framer.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

impl<'a> IntoIterator for &Framer<'a> {
    type Item = &'a [f64];
    type IntoIter = Frames<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
