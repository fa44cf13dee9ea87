use crate::field::FieldElement;
use crate::group::{window_digit, WINDOW_SIZE};
use crate::projective::Projective;
use num_bigint::BigUint;

/// Precomputed multiples of one base point, spaced by radix-16 steps:
/// `rows[i][j] = j * 16^i * P`.
///
/// A scalar is then a sum of one entry per row, with no doublings.
#[derive(Debug)]
pub(crate) struct BaseTable {
    rows: Vec<Vec<Projective>>,
}

impl BaseTable {
    pub fn new(base: &Projective, windows: usize, a: &FieldElement) -> Self {
        let field = base.x.field();
        let mut rows = Vec::with_capacity(windows);
        let mut step = base.clone();

        for _ in 0..windows {
            let mut row = Vec::with_capacity(WINDOW_SIZE);
            row.push(Projective::identity(field));
            row.push(step.clone());
            for j in 2..WINDOW_SIZE {
                let next = row[j - 1].add(&step, a);
                row.push(next);
            }
            step = row[WINDOW_SIZE - 1].add(&step, a);
            rows.push(row);
        }

        BaseTable { rows }
    }

    /// `k * P` for a scalar already reduced below `16^windows`.
    pub fn mul(&self, k: &BigUint, a: &FieldElement) -> Projective {
        let field = self.rows[0][0].x.field();
        let mut result = Projective::identity(field);
        for (i, row) in self.rows.iter().enumerate() {
            result = result.add(&row[window_digit(k, i)], a);
        }
        result
    }

    pub fn windows(&self) -> usize {
        self.rows.len()
    }
}
