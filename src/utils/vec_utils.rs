/// Gap-filling helpers for sparse feed channels.
///
/// Feeds occasionally deliver candles with junk in one field (a string that
/// isn't numeric, a null, a missing key). Those become `None` gaps which we
/// repair from adjacent candles so the series stays continuous.

pub fn has_any_none_elements(values: &[Option<f64>]) -> bool {
    values.iter().any(|v| v.is_none())
}

/// Replace each `None` with the most recent `Some` before it.
/// Leading gaps (nothing before them) are left untouched.
/// Returns how many gaps were filled.
pub fn fill_forward_mut(values: &mut [Option<f64>]) -> u32 {
    let mut filled = 0;
    let mut last_seen: Option<f64> = None;
    for value in values.iter_mut() {
        match value {
            Some(v) => last_seen = Some(*v),
            None => {
                if let Some(prev) = last_seen {
                    *value = Some(prev);
                    filled += 1;
                }
            }
        }
    }
    filled
}

/// Replace each `None` with the nearest `Some` after it.
/// Trailing gaps are left untouched. Returns how many gaps were filled.
pub fn fill_backward_mut(values: &mut [Option<f64>]) -> u32 {
    let mut filled = 0;
    let mut next_seen: Option<f64> = None;
    for value in values.iter_mut().rev() {
        match value {
            Some(v) => next_seen = Some(*v),
            None => {
                if let Some(next) = next_seen {
                    *value = Some(next);
                    filled += 1;
                }
            }
        }
    }
    filled
}

/// Forward pass then backward pass. After this, `None` survives only when
/// the whole slice was `None`.
pub fn fill_gaps_mut(values: &mut [Option<f64>]) -> u32 {
    fill_forward_mut(values) + fill_backward_mut(values)
}
