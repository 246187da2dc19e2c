/// Depth calculates minimum, maximum, average and percentile of leaf
/// depths in a [`Tree`](crate::Tree). A leaf here is the sentinel hanging
/// below a node, so an empty tree samples a single leaf at depth 0.
#[derive(Clone, Debug, Default)]
pub struct Depth {
    samples: usize,
    min: Option<usize>,
    max: usize,
    total: usize,
    depths: Vec<u64>, // depths[d] is the number of leaves at depth d.
}

impl Depth {
    pub(crate) fn new() -> Depth {
        Default::default()
    }

    pub(crate) fn sample(&mut self, depth: usize) {
        self.samples += 1;
        self.total += depth;
        self.min = Some(self.min.map_or(depth, |min| min.min(depth)));
        self.max = self.max.max(depth);
        if self.depths.len() <= depth {
            self.depths.resize(depth + 1, 0);
        }
        self.depths[depth] += 1;
    }

    /// Return number of leaves sampled.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Return minimum depth of leaves.
    pub fn min(&self) -> usize {
        self.min.unwrap_or(0)
    }

    /// Return maximum depth of leaves.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Return the average depth of leaves.
    pub fn mean(&self) -> usize {
        match self.samples {
            0 => 0,
            samples => self.total / samples,
        }
    }

    /// Return depth as tuple of percentiles, each tuple provides
    /// (percentile, depth). Returned percentiles from 90, 91 .. 100
    pub fn percentiles(&self) -> Vec<(u8, usize)> {
        let mut percentiles: Vec<(u8, usize)> = vec![];
        let (mut acc, mut prev_perc) = (0_u64, 90_u8);
        let iter = self.depths.iter().enumerate().filter(|(_, &item)| item > 0);
        for (depth, samples) in iter {
            acc += *samples;
            let perc = ((acc as f64 / self.samples as f64) * 100_f64) as u8;
            if perc >= prev_perc {
                percentiles.push((perc, depth));
                prev_perc = perc;
            }
        }
        percentiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth() {
        let mut depth = Depth::new();
        assert_eq!(depth.samples(), 0);
        assert_eq!(depth.mean(), 0);

        for d in [3, 3, 4, 5, 300].iter() {
            depth.sample(*d);
        }
        assert_eq!(depth.samples(), 5);
        assert_eq!(depth.min(), 3);
        assert_eq!(depth.max(), 300);
        assert_eq!(depth.mean(), 63);
        assert_eq!(depth.percentiles(), vec![(100, 300)]);
    }

    #[test]
    fn test_depth_zero() {
        let mut depth = Depth::new();
        depth.sample(0);
        assert_eq!(depth.min(), 0);
        assert_eq!(depth.max(), 0);
        assert_eq!(depth.percentiles(), vec![(100, 0)]);
    }
}
