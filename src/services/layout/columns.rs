//! Greedy interval coloring shared by timed columns and multi-day lanes.
//!
//! Spans are processed in start order and each goes to the leftmost column
//! that is free at its start. For interval graphs this first-fit order is
//! optimal: a cluster never uses more columns than the largest number of
//! spans active at one instant.

use chrono::{Duration, NaiveDateTime};

/// Half-open occupancy interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Span {
    /// Build a span; a reversed interval is clamped to zero length.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// End of the occupied interval. Zero-length spans hold their instant for
    /// an infinitesimal moment, so two of them at the same instant still
    /// collide while one ending exactly there does not.
    pub fn occupied_until(&self) -> NaiveDateTime {
        if self.end > self.start {
            self.end
        } else {
            self.start + Duration::nanoseconds(1)
        }
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.occupied_until() && other.start < self.occupied_until()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnAssignment {
    pub column: usize,
    /// Index into [`Coloring::cluster_widths`]
    pub cluster: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coloring {
    /// One entry per input span, in input order
    pub assignments: Vec<ColumnAssignment>,
    /// Columns used by each overlap cluster
    pub cluster_widths: Vec<usize>,
}

impl Coloring {
    pub fn column_count(&self, index: usize) -> usize {
        self.cluster_widths[self.assignments[index].cluster]
    }

    /// Largest cluster width; the lane count of a band.
    pub fn max_width(&self) -> usize {
        self.cluster_widths.iter().copied().max().unwrap_or(0)
    }
}

/// Color `spans`, which must already be sorted by start.
pub fn assign_columns(spans: &[Span]) -> Coloring {
    let mut coloring = Coloring {
        assignments: Vec::with_capacity(spans.len()),
        cluster_widths: Vec::new(),
    };
    let mut column_ends: Vec<NaiveDateTime> = Vec::new();
    let mut cluster_end: Option<NaiveDateTime> = None;

    for span in spans {
        let until = span.occupied_until();

        match cluster_end {
            Some(end) if span.start < end => cluster_end = Some(end.max(until)),
            _ => {
                // Every column is free again: start a new cluster.
                column_ends.clear();
                coloring.cluster_widths.push(0);
                cluster_end = Some(until);
            }
        }

        let column = match column_ends.iter().position(|end| *end <= span.start) {
            Some(free) => {
                column_ends[free] = until;
                free
            }
            None => {
                column_ends.push(until);
                column_ends.len() - 1
            }
        };

        let cluster = coloring.cluster_widths.len() - 1;
        coloring.cluster_widths[cluster] = coloring.cluster_widths[cluster].max(column + 1);
        coloring.assignments.push(ColumnAssignment { column, cluster });
    }

    coloring
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn span(start_min: i64, end_min: i64) -> Span {
        let base = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Span::new(base + Duration::minutes(start_min), base + Duration::minutes(end_min))
    }

    fn columns(coloring: &Coloring) -> Vec<usize> {
        coloring.assignments.iter().map(|a| a.column).collect()
    }

    #[test]
    fn test_staggered_overlaps_use_three_columns() {
        let coloring = assign_columns(&[span(0, 30), span(10, 40), span(20, 50)]);
        assert_eq!(columns(&coloring), vec![0, 1, 2]);
        assert_eq!(coloring.cluster_widths, vec![3]);
    }

    #[test]
    fn test_adjacent_spans_share_column() {
        let coloring = assign_columns(&[span(0, 30), span(30, 60)]);
        assert_eq!(columns(&coloring), vec![0, 0]);
        assert_eq!(coloring.cluster_widths, vec![1, 1]);
    }

    #[test]
    fn test_freed_column_is_reused_inside_cluster() {
        // a: 0-60, b: 0-20, c: 30-50 -> c reuses b's column
        let coloring = assign_columns(&[span(0, 60), span(0, 20), span(30, 50)]);
        assert_eq!(columns(&coloring), vec![0, 1, 1]);
        assert_eq!(coloring.cluster_widths, vec![2]);
        assert_eq!(coloring.column_count(2), 2);
    }

    #[test]
    fn test_zero_length_spans_at_same_instant_split() {
        let coloring = assign_columns(&[span(0, 0), span(0, 0)]);
        assert_eq!(columns(&coloring), vec![0, 1]);
        assert_eq!(coloring.max_width(), 2);
    }

    #[test]
    fn test_zero_length_span_after_touching_span_shares_column() {
        let coloring = assign_columns(&[span(0, 30), span(30, 30)]);
        assert_eq!(columns(&coloring), vec![0, 0]);
    }

    #[test]
    fn test_reversed_span_is_clamped() {
        let reversed = span(30, 10);
        assert_eq!(reversed.end, reversed.start);
        assert!(reversed.overlaps(&span(0, 60)));
        assert!(!reversed.overlaps(&span(40, 60)));
    }

    #[test]
    fn test_empty_input() {
        let coloring = assign_columns(&[]);
        assert!(coloring.assignments.is_empty());
        assert_eq!(coloring.max_width(), 0);
    }
}
