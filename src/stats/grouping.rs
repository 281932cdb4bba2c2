//! Grouping helpers shared by the aggregator and the renderers.

/// Group `(x, y)` pairs by exact x value, returning x ascending with the
/// y values of each group in input order. Non-finite x values are dropped.
pub fn group_by_x(points: &[(f64, f64)]) -> Vec<(f64, Vec<f64>)> {
    let mut sorted: Vec<(f64, f64)> = points.iter().copied().filter(|(x, _)| x.is_finite()).collect();
    // Stable sort keeps repeated trials in input order within a group.
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut groups: Vec<(f64, Vec<f64>)> = Vec::new();
    for (x, y) in sorted {
        match groups.last_mut() {
            Some((last_x, ys)) if *last_x == x => ys.push(y),
            _ => groups.push((x, vec![y])),
        }
    }
    groups
}

/// Group items by key, preserving the order in which keys first appear.
pub fn group_first_seen<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(&item);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(item),
            None => groups.push((k, vec![item])),
        }
    }
    groups
}
