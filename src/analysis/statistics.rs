//! Aggregate multiplicity statistics across images

use ndarray::Array1;

/// Mean and standard error of the mean over all regions of a batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Arithmetic mean multiplicity
    pub mean: f64,
    /// Sample standard deviation (n - 1 divisor) divided by the square root of `count`
    pub sem: f64,
    /// Number of regions contributing to the summary
    pub count: usize,
}

impl Summary {
    /// Summary of a batch without any region
    pub const EMPTY: Self = Self {
        mean: 0.0,
        sem: 0.0,
        count: 0,
    };
}

/// Flatten per-image multiplicities and compute mean and SEM
///
/// The statistics run over the union of all regions, not over per-image
/// averages. Without any region both values are 0. A single region has no
/// sample deviation, so its SEM is NaN.
pub fn summarize<S: AsRef<[usize]>>(all_multiplicities: &[S]) -> Summary {
    let flattened: Array1<f64> = all_multiplicities
        .iter()
        .flat_map(|multiplicities| multiplicities.as_ref().iter())
        .map(|&multiplicity| multiplicity as f64)
        .collect();

    let count = flattened.len();
    let Some(mean) = flattened.mean() else {
        return Summary::EMPTY;
    };
    let std_dev = flattened.std(1.0);

    Summary {
        mean,
        sem: std_dev / (count as f64).sqrt(),
        count,
    }
}

/// Average multiplicity of a single image, 0 when it has no region
pub fn image_mean(multiplicities: &[usize]) -> f64 {
    if multiplicities.is_empty() {
        return 0.0;
    }
    multiplicities.iter().sum::<usize>() as f64 / multiplicities.len() as f64
}
