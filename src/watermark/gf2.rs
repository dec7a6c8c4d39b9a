use rand::Rng;

/// Fixed-width bit vector stored in 64-bit words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitRow {
    words: Vec<u64>,
}

impl BitRow {
    pub fn zeros(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(64)],
        }
    }

    pub fn get(&self, i: usize) -> bool {
        (self.words[i / 64] >> (i % 64)) & 1 == 1
    }

    pub fn set(&mut self, i: usize, value: bool) {
        let mask = 1u64 << (i % 64);
        if value {
            self.words[i / 64] |= mask;
        } else {
            self.words[i / 64] &= !mask;
        }
    }

    pub fn xor_assign(&mut self, other: &BitRow) {
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w ^= *o;
        }
    }
}

/// Augmented linear system over GF(2).
/// Each row holds `vars` coefficient bits followed by one right-hand-side bit.
#[derive(Clone, Debug)]
pub struct Gf2System {
    vars: usize,
    rows: Vec<BitRow>,
}

/// Output of [`Gf2System::solve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gf2Solution {
    /// One 0/1 value per variable
    pub x: Vec<u8>,
    /// Number of pivot rows after elimination
    pub rank: usize,
    /// False if some row reduced to `0 = 1`; `x` then satisfies only the pivot rows
    pub consistent: bool,
}

impl Gf2System {
    pub fn new(vars: usize) -> Self {
        Self {
            vars,
            rows: Vec::new(),
        }
    }

    pub fn with_capacity(vars: usize, rows: usize) -> Self {
        Self {
            vars,
            rows: Vec::with_capacity(rows),
        }
    }

    /// Append the equation `XOR of x[c] for c in coeffs = rhs`.
    /// A column listed twice cancels out.
    pub fn push_row(&mut self, coeffs: &[usize], rhs: bool) {
        let mut row = BitRow::zeros(self.vars + 1);
        for &c in coeffs {
            assert!(c < self.vars, "column {c} out of range for {} vars", self.vars);
            row.set(c, !row.get(c));
        }
        row.set(self.vars, rhs);
        self.rows.push(row);
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Gauss-Jordan elimination, then back-substitution with free variables drawn uniformly.
    pub fn solve<R: Rng>(mut self, rng: &mut R) -> Gf2Solution {
        let vars = self.vars;
        let num_rows = self.rows.len();
        let mut pivot_cols = Vec::with_capacity(vars.min(num_rows));

        let mut row = 0;
        for col in 0..vars {
            if row >= num_rows {
                break;
            }
            let Some(sel) = (row..num_rows).find(|&i| self.rows[i].get(col)) else {
                continue;
            };
            self.rows.swap(row, sel);
            let pivot = self.rows[row].clone();
            for (i, r) in self.rows.iter_mut().enumerate() {
                if i != row && r.get(col) {
                    r.xor_assign(&pivot);
                }
            }
            pivot_cols.push(col);
            row += 1;
        }
        let rank = row;

        // rows below the rank have an all-zero left side
        let consistent = self.rows[rank..].iter().all(|r| !r.get(vars));

        let mut is_pivot = vec![false; vars];
        for &pc in &pivot_cols {
            is_pivot[pc] = true;
        }
        let mut x: Vec<u8> = (0..vars)
            .map(|c| if is_pivot[c] { 0 } else { rng.gen_range(0..=1) })
            .collect();

        for i in (0..rank).rev() {
            let pc = pivot_cols[i];
            let r = &self.rows[i];
            let mut value = r.get(vars);
            for j in pc + 1..vars {
                if r.get(j) && x[j] == 1 {
                    value = !value;
                }
            }
            x[pc] = u8::from(value);
        }

        Gf2Solution { x, rank, consistent }
    }
}
