use argminmax::ArgMinMax;

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Distance of `value` from `reference` as a fraction of `reference`.
/// A zero reference can't anchor a relative comparison, so anything
/// measured against it counts as infinitely far away.
pub fn relative_distance(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return f64::INFINITY;
    }
    ((value - reference) / reference).abs()
}

/// Fraction of `levels` lying within `tolerance` relative distance of `target`.
/// An empty input yields 0.0 rather than dividing by zero.
pub fn fraction_within(levels: &[f64], target: f64, tolerance: f64) -> f64 {
    if levels.is_empty() {
        return 0.0;
    }
    let hits = levels
        .iter()
        .filter(|&&level| relative_distance(level, target) <= tolerance)
        .count();
    hits as f64 / levels.len() as f64
}
