//! Ranking with average ranks for ties.

/// Ranks of a pooled sample plus the sizes of its tie groups.
#[derive(Debug, Clone)]
pub struct Ranking {
    /// 1-based ranks in input order; tied values share their average rank.
    pub ranks: Vec<f64>,
    /// Size of every group of tied values (groups of one are omitted).
    pub tie_groups: Vec<usize>,
}

impl Ranking {
    /// True if any two values are equal.
    pub fn has_ties(&self) -> bool {
        !self.tie_groups.is_empty()
    }

    /// Tie term `sum(t^3 - t)` over all tie groups.
    pub fn tie_term(&self) -> f64 {
        self.tie_groups
            .iter()
            .map(|&t| {
                let t = t as f64;
                t * t * t - t
            })
            .sum()
    }
}

/// Rank `data`, assigning tied values the mean of the ranks they span.
pub fn rank_average(data: &[f64]) -> Ranking {
    let n = data.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| data[a].total_cmp(&data[b]));

    let mut ranks = vec![0.0; n];
    let mut tie_groups = Vec::new();

    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && data[order[end]] == data[order[start]] {
            end += 1;
        }
        // Positions start..end (0-based) share ranks start+1..=end
        let shared = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = shared;
        }
        if end - start > 1 {
            tie_groups.push(end - start);
        }
        start = end;
    }

    Ranking { ranks, tie_groups }
}
