//! Reconstruct table rows from positioned text.
//!
//! PDF text carries no table structure, so rows are rebuilt from the vertical
//! position of each fragment. The row tolerance adapts to the page: the most
//! common gap between distinct baselines is taken as the line pitch. The
//! tolerance always stays below that pitch, so rows printed on exact baselines
//! one pitch apart are never chained together.

use std::collections::BTreeMap;

use crate::model::TextFragment;

/// Tunables for row clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    /// Baseline differences at or below this are treated as the same baseline.
    pub min_gap: f32,
    /// Bucket width used when counting baseline differences.
    pub bucket_step: f32,
    /// Differences at or above this never count as line pitch.
    pub outlier_ceiling: f32,
    /// Multiplier applied to the detected pitch.
    pub slack_factor: f32,
    /// Tolerance used when no pitch can be detected.
    pub default_tolerance: f32,
    /// Upper bound on a detected tolerance, as a fraction of the pitch.
    pub max_pitch_fraction: f32,
    /// Lower bound for a detected tolerance.
    pub min_tolerance: f32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_gap: 0.1,
            bucket_step: 0.5,
            outlier_ceiling: 20.0,
            slack_factor: 1.2,
            default_tolerance: 3.0,
            max_pitch_fraction: 0.5,
            min_tolerance: 2.0,
        }
    }
}

/// Fragments sharing one inferred baseline, ordered left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub fragments: Vec<TextFragment>,
}

impl Row {
    /// Trimmed text of every fragment, in column order.
    pub fn cells(&self) -> Vec<&str> {
        self.fragments.iter().map(|f| f.text.trim()).collect()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Estimate the vertical distance within which fragments share a row.
pub fn row_tolerance(fragments: &[TextFragment], config: &ClusterConfig) -> f32 {
    let mut ys: Vec<f32> = fragments.iter().map(|f| f.y).collect();
    ys.sort_by(f32::total_cmp);

    // Count differences per bucket, keyed by the number of bucket steps.
    let mut buckets: BTreeMap<i64, usize> = BTreeMap::new();
    for pair in ys.windows(2) {
        let diff = (pair[1] - pair[0]).abs();
        if diff <= config.min_gap {
            continue;
        }
        let key = (diff / config.bucket_step).round() as i64;
        *buckets.entry(key).or_insert(0) += 1;
    }

    // Highest count wins; the smaller pitch wins ties.
    let mut pitch: Option<(f32, usize)> = None;
    for (&key, &count) in &buckets {
        let value = key as f32 * config.bucket_step;
        if value >= config.outlier_ceiling {
            continue;
        }
        if pitch.map_or(true, |(_, best)| count > best) {
            pitch = Some((value, count));
        }
    }

    match pitch {
        Some((value, _)) => (value * config.slack_factor)
            .min(value * config.max_pitch_fraction)
            .max(config.min_tolerance),
        None => config.default_tolerance,
    }
}

/// Group one page's fragments into rows, top of page first.
///
/// Every input fragment lands in exactly one row and no row is empty.
pub fn cluster_rows(fragments: &[TextFragment], config: &ClusterConfig) -> Vec<Row> {
    if fragments.is_empty() {
        return Vec::new();
    }

    let tolerance = row_tolerance(fragments, config);
    log::debug!(
        "clustering {} fragments with row tolerance {:.2}",
        fragments.len(),
        tolerance
    );

    let mut sorted: Vec<&TextFragment> = fragments.iter().collect();
    sorted.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut rows: Vec<Vec<TextFragment>> = Vec::new();
    let mut current: Vec<TextFragment> = Vec::new();
    let mut last_y: Option<f32> = None;

    for fragment in sorted {
        if let Some(y) = last_y {
            if (y - fragment.y).abs() > tolerance {
                rows.push(std::mem::take(&mut current));
            }
        }
        last_y = Some(fragment.y);
        current.push(fragment.clone());
    }
    if !current.is_empty() {
        rows.push(current);
    }

    let rows: Vec<Row> = rows
        .into_iter()
        .map(|mut fragments| {
            fragments.sort_by(|a, b| a.x.total_cmp(&b.x));
            Row { fragments }
        })
        .collect();

    log::debug!("grouped into {} rows", rows.len());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, x: f32, y: f32) -> TextFragment {
        TextFragment::new(text, x, y)
    }

    fn texts(row: &Row) -> Vec<&str> {
        row.cells()
    }

    #[test]
    fn test_tolerance_from_common_pitch() {
        // Baselines every 12 units, two fragments per line.
        let fragments: Vec<TextFragment> = (0..6)
            .flat_map(|i| {
                let y = 700.0 - 12.0 * i as f32;
                vec![frag("a", 10.0, y), frag("b", 90.0, y)]
            })
            .collect();
        let tol = row_tolerance(&fragments, &ClusterConfig::default());
        assert!((tol - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_tolerance_slack_below_cap() {
        let config = ClusterConfig {
            slack_factor: 0.4,
            ..ClusterConfig::default()
        };
        let fragments: Vec<TextFragment> = (0..4)
            .map(|i| frag("a", 10.0, 700.0 - 10.0 * i as f32))
            .collect();
        let tol = row_tolerance(&fragments, &config);
        assert!((tol - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_tolerance_default_without_usable_gaps() {
        let config = ClusterConfig::default();
        let same_line = vec![frag("a", 1.0, 500.0), frag("b", 50.0, 500.05)];
        assert_eq!(row_tolerance(&same_line, &config), 3.0);

        // Only outlier gaps.
        let far = vec![frag("a", 1.0, 500.0), frag("b", 1.0, 400.0)];
        assert_eq!(row_tolerance(&far, &config), 3.0);
        assert_eq!(row_tolerance(&[], &config), 3.0);
    }

    #[test]
    fn test_tolerance_floor() {
        let fragments = vec![
            frag("a", 1.0, 100.0),
            frag("b", 1.0, 101.0),
            frag("c", 1.0, 102.0),
        ];
        // Pitch 1.0 * 1.2 is raised to the floor.
        assert_eq!(row_tolerance(&fragments, &ClusterConfig::default()), 2.0);
    }

    #[test]
    fn test_tolerance_ties_prefer_smaller_pitch() {
        let fragments = vec![
            frag("a", 1.0, 100.0),
            frag("b", 1.0, 110.0),
            frag("c", 1.0, 115.0),
        ];
        let tol = row_tolerance(&fragments, &ClusterConfig::default());
        assert!((tol - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_exact_baselines_header_and_row() {
        let fragments = vec![
            frag("ITEM NO.", 36.0, 700.0),
            frag("DESCRIPTION", 100.0, 700.0),
            frag("UNIT", 250.0, 700.0),
            frag("QUANTITY", 300.0, 700.0),
            frag("203-01", 36.0, 688.0),
            frag("Clearing & Grubbing", 100.0, 688.0),
            frag("LS", 250.0, 688.0),
            frag("1", 300.0, 688.0),
        ];
        let rows = cluster_rows(&fragments, &ClusterConfig::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(texts(&rows[0]), vec!["ITEM NO.", "DESCRIPTION", "UNIT", "QUANTITY"]);
        assert_eq!(
            texts(&rows[1]),
            vec!["203-01", "Clearing & Grubbing", "LS", "1"]
        );
    }

    #[test]
    fn test_exact_baselines_uniform_table() {
        let fragments: Vec<TextFragment> = (0..5)
            .flat_map(|line| {
                let y = 740.0 - 14.0 * line as f32;
                (0..4).map(move |col| frag(&format!("r{line}c{col}"), 36.0 + 90.0 * col as f32, y))
            })
            .collect();

        let rows = cluster_rows(&fragments, &ClusterConfig::default());
        assert_eq!(rows.len(), 5);
        for (line, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 4);
            assert_eq!(row.cells()[0], format!("r{line}c0"));
        }
    }

    #[test]
    fn test_cluster_rows_orders_top_to_bottom_left_to_right() {
        let fragments = vec![
            frag("1", 300.0, 688.4),
            frag("Clearing & Grubbing", 100.0, 688.0),
            frag("ITEM NO.", 36.0, 700.0),
            frag("203-01", 36.0, 687.6),
            frag("DESCRIPTION", 100.0, 700.2),
            frag("LS", 250.0, 688.0),
        ];
        let rows = cluster_rows(&fragments, &ClusterConfig::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(texts(&rows[0]), vec!["ITEM NO.", "DESCRIPTION"]);
        assert_eq!(
            texts(&rows[1]),
            vec!["203-01", "Clearing & Grubbing", "LS", "1"]
        );
    }

    #[test]
    fn test_cluster_rows_keeps_every_fragment_once() {
        let fragments: Vec<TextFragment> = (0..40)
            .map(|i| {
                let line = i / 4;
                let col = i % 4;
                frag(
                    &format!("f{i}"),
                    20.0 + 80.0 * col as f32,
                    720.0 - 14.0 * line as f32 + (col as f32) * 0.3,
                )
            })
            .collect();

        let rows = cluster_rows(&fragments, &ClusterConfig::default());
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| !r.is_empty()));

        let mut seen: Vec<String> = rows
            .iter()
            .flat_map(|r| r.fragments.iter().map(|f| f.text.clone()))
            .collect();
        seen.sort();
        let mut expected: Vec<String> = fragments.iter().map(|f| f.text.clone()).collect();
        expected.sort();
        assert_eq!(seen, expected);

        for row in &rows {
            assert!(row.fragments.windows(2).all(|w| w[0].x <= w[1].x));
        }
        for pair in rows.windows(2) {
            let top = pair[0].fragments.iter().map(|f| f.y).fold(f32::MIN, f32::max);
            let below = pair[1].fragments.iter().map(|f| f.y).fold(f32::MIN, f32::max);
            assert!(top > below);
        }
    }

    #[test]
    fn test_cluster_rows_is_deterministic() {
        let fragments = vec![
            frag("b", 50.0, 100.0),
            frag("a", 10.0, 100.0),
            frag("c", 10.0, 80.0),
        ];
        let mut reversed = fragments.clone();
        reversed.reverse();
        let config = ClusterConfig::default();
        assert_eq!(
            cluster_rows(&fragments, &config),
            cluster_rows(&reversed, &config)
        );
    }

    #[test]
    fn test_cluster_rows_empty() {
        assert!(cluster_rows(&[], &ClusterConfig::default()).is_empty());
    }
}
