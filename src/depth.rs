#[allow(unused_imports)]
use crate::RbTree;

/// Depth gathers the distribution of sentinel depths in the [`RbTree`],
/// that is, the length of every root-to-leaf path.
#[derive(Clone, Debug, Default)]
pub struct Depth {
    samples: usize,
    min: usize,
    max: usize,
    total: usize,
    histogram: Vec<u64>, // histogram[depth] = number of paths
}

impl Depth {
    pub(crate) fn new() -> Depth {
        Default::default()
    }

    pub(crate) fn sample(&mut self, depth: usize) {
        if self.samples == 0 || depth < self.min {
            self.min = depth
        }
        if depth > self.max {
            self.max = depth
        }
        self.samples += 1;
        self.total += depth;
        if self.histogram.len() <= depth {
            self.histogram.resize(depth + 1, 0);
        }
        self.histogram[depth] += 1;
    }

    /// Return number of root-to-leaf paths sampled.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Return the shortest root-to-leaf path.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Return the longest root-to-leaf path. For a valid red-black
    /// tree this never exceeds twice [`Depth::min`].
    pub fn max(&self) -> usize {
        self.max
    }

    /// Return the average root-to-leaf path length.
    pub fn mean(&self) -> usize {
        match self.samples {
            0 => 0,
            n => self.total / n,
        }
    }

    /// Return (percentile, depth) tuples, for percentiles 90 and above.
    pub fn percentiles(&self) -> Vec<(u8, usize)> {
        let mut acc = 0_u64;
        let mut prev = 90_u8;
        let mut percentiles = vec![];
        for (depth, n) in self.histogram.iter().enumerate() {
            if *n == 0 {
                continue;
            }
            acc += *n;
            let perc = ((acc as f64 / self.samples as f64) * 100_f64) as u8;
            if perc >= prev {
                percentiles.push((perc, depth));
                prev = perc;
            }
        }
        percentiles
    }

    /// Render depth statistics in JSON format, useful for plotting.
    pub fn json(&self) -> String {
        let ps: Vec<String> = self
            .percentiles()
            .into_iter()
            .map(|(p, d)| format!("\"{}\": {}", p, d))
            .collect();
        format!(
            "{{ \"min\": {}, \"mean\": {}, \"max\": {}, \"percentiles\": {{ {} }} }}",
            self.min,
            self.mean(),
            self.max,
            ps.join(", ")
        )
    }
}
