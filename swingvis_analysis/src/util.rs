/// Index of the smallest value, or `None` on an empty slice. Ties resolve
/// to the earliest index.
pub fn arg_min(sl: &[f32]) -> Option<usize> {
    // we have no NaNs; missing motion values are encoded as +inf
    sl.iter()
        .enumerate()
        .fold(None, |cur: Option<(usize, f32)>, (i, x)| match cur {
            Some((_, best)) if best <= *x => cur,
            _ => Some((i, *x)),
        })
        .map(|(i, _)| i)
}

/// Index of the largest value, or `None` on an empty slice. Ties resolve
/// to the earliest index.
pub fn arg_max(sl: &[f32]) -> Option<usize> {
    // we have no NaNs
    sl.iter()
        .enumerate()
        .fold(None, |cur: Option<(usize, f32)>, (i, x)| match cur {
            Some((_, best)) if best >= *x => cur,
            _ => Some((i, *x)),
        })
        .map(|(i, _)| i)
}
