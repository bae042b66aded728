//! Data-dependent quantile binning
//!
//! Builds classification bins from the data at run time: percentiles over
//! the strictly-positive subset become right-closed interval edges, and a
//! fixed ordered label list is truncated to however many bins survive.
//!
//! Degenerate data degrades instead of failing: when many rows share a
//! value, duplicate percentiles are discarded and the categories get
//! coarser. Labels are dropped from the end of the list, keeping the
//! remaining labels aligned to the low edges.

/// A validated set of strictly-increasing bin edges with matching labels
#[derive(Debug)]
pub struct QuantileBucketer {
    edges: Vec<f64>,
    labels: Vec<&'static str>,
}

impl QuantileBucketer {
    /// Build bins from a column of values.
    ///
    /// Percentiles are computed over the strictly-positive subset only.
    /// Edges start at 0; each percentile is appended only if it strictly
    /// exceeds the previous accepted edge; the final edge is +inf.
    ///
    /// Returns `None` when the column has no positive value at all - the
    /// caller assigns its constant "no x" label instead of binning.
    pub fn new(values: &[f64], quantiles: &[f64], labels: &[&'static str]) -> Option<Self> {
        let mut positive: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
        if positive.is_empty() {
            return None;
        }
        positive.sort_by(f64::total_cmp);

        let mut edges = vec![0.0];
        for &q in quantiles {
            let p = percentile(&positive, q);
            if p > *edges.last().expect("edges start non-empty") {
                edges.push(p);
            }
        }
        edges.push(f64::INFINITY);

        let bins = edges.len() - 1;
        let labels = labels[..labels.len().min(bins)].to_vec();

        Some(Self { edges, labels })
    }

    /// Bin edges, strictly increasing from 0 to +inf
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Labels, one per bin from the lowest up; never more than bins
    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    /// Look up the label for a value.
    ///
    /// Intervals are right-closed: a value lands in `(edge[i], edge[i+1]]`.
    /// Values at or below the first edge (i.e. 0) have no bin, and bins
    /// beyond the truncated label list stay unlabeled.
    pub fn bucket(&self, value: f64) -> Option<&'static str> {
        if value <= self.edges[0] {
            return None;
        }
        let idx = self
            .edges
            .windows(2)
            .position(|w| value > w[0] && value <= w[1])?;
        self.labels.get(idx).copied()
    }
}

/// Percentile with linear interpolation between closest ranks.
///
/// `sorted` must be non-empty and ascending.
pub(crate) fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    if lower + 1 >= sorted.len() {
        return sorted[sorted.len() - 1];
    }
    let frac = pos - lower as f64;
    sorted[lower] + frac * (sorted[lower + 1] - sorted[lower])
}
