/// Scales each value against the largest one: `multiplier * value / max`.
///
/// Absent and non-positive entries count as zero. When nothing is positive
/// the result is all zeros.
pub fn to_ratio_by_max<T>(values: &[Option<T>], multiplier: f64) -> Vec<f64>
where
    T: Copy + Into<i64>,
{
    let cleaned: Vec<i64> = values
        .iter()
        .map(|&v| v.map(Into::<i64>::into).filter(|n| *n > 0).unwrap_or(0))
        .collect();

    let max = cleaned.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return vec![0.0; cleaned.len()];
    }

    cleaned
        .into_iter()
        .map(|n| multiplier * n as f64 / max as f64)
        .collect()
}
