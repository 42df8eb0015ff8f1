//! Date alignment (inner joins) across series.
//!
//! Both joins walk the inputs with one cursor per series, relying on the
//! strictly increasing dates guaranteed by [`Series`]; output order is the
//! common ascending date order.
use chrono::NaiveDate;

use crate::series::types::Series;

/// Two series restricted to their common dates.
#[derive(Debug, Clone, PartialEq)]
pub struct Aligned {
    pub dates: Vec<NaiveDate>,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
}

impl Aligned {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Inner join of two series on date.
pub fn align(a: &Series, b: &Series) -> Aligned {
    let (pa, pb) = (a.points(), b.points());
    let mut out = Aligned { dates: Vec::new(), a: Vec::new(), b: Vec::new() };
    let (mut i, mut j) = (0, 0);
    while i < pa.len() && j < pb.len() {
        match pa[i].date.cmp(&pb[j].date) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.dates.push(pa[i].date);
                out.a.push(pa[i].close);
                out.b.push(pb[j].close);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// N-way inner join: the dates present in every series, plus one value
/// column per input (in input order).
pub fn align_many(series: &[&Series]) -> (Vec<NaiveDate>, Vec<Vec<f64>>) {
    let Some((first, rest)) = series.split_first() else {
        return (Vec::new(), Vec::new());
    };
    let mut cursors = vec![0usize; rest.len()];
    let mut dates = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); series.len()];

    'outer: for point in first.points() {
        let mut row = Vec::with_capacity(rest.len());
        for (k, other) in rest.iter().enumerate() {
            let pts = other.points();
            while cursors[k] < pts.len() && pts[cursors[k]].date < point.date {
                cursors[k] += 1;
            }
            match pts.get(cursors[k]) {
                Some(p) if p.date == point.date => row.push(p.close),
                _ => continue 'outer,
            }
        }
        dates.push(point.date);
        columns[0].push(point.close);
        for (k, value) in row.into_iter().enumerate() {
            columns[k + 1].push(value);
        }
    }
    (dates, columns)
}
