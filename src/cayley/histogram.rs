use itertools::Itertools;

/// Number of elements of A12 at each word length over the icosahedral twists.
pub const ICOSAHEDRAL_WORD_LENGTHS: [u64; 9] =
    [1, 48, 2016, 80700, 2891295, 73385595, 163078590, 62495, 60];

/// Population count per distance from the identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram {
    counts: Vec<u64>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: Vec<u64>) -> Self {
        Histogram { counts }
    }

    /// The exact histogram of A12 over the icosahedral twists.
    pub fn icosahedral() -> Self {
        Self::from_counts(ICOSAHEDRAL_WORD_LENGTHS.to_vec())
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn count(&self, distance: usize) -> u64 {
        self.counts.get(distance).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest distance with a non-zero count.
    pub fn diameter(&self) -> Option<usize> {
        self.counts.iter().rposition(|&c| c > 0)
    }

    /// Adds one element at `distance`.
    pub fn record(&mut self, distance: usize) {
        if self.counts.len() <= distance {
            self.counts.resize(distance + 1, 0);
        }
        self.counts[distance] += 1;
    }

    /// Counts normalised to frequencies.
    pub fn density(&self) -> Vec<f64> {
        let total = self.total() as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }

    /// Largest absolute difference between the two densities, distance by distance.
    pub fn max_density_error(&self, other: &Histogram) -> f64 {
        self.density()
            .into_iter()
            .zip_longest(other.density())
            .map(|pair| {
                let (a, b) = pair.or(0.0, 0.0);
                (a - b).abs()
            })
            .fold(0.0, f64::max)
    }
}

impl FromIterator<usize> for Histogram {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut h = Histogram::new();
        for d in iter {
            h.record(d);
        }
        h
    }
}
