/// Row-major 2D array of reals shaped like a [`Grid`](crate::Grid).
#[derive(Clone, Debug, PartialEq)]
pub struct Field2D {
    cols: usize,
    rows: usize,
    data: Vec<f64>,
}

impl Field2D {
    /// Field of `cols * rows` zeros.
    pub fn zeros(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            data: vec![0.0; cols * rows],
        }
    }

    /// Wrap existing row-major data; `None` when the length does not match the shape.
    pub fn from_vec(cols: usize, rows: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == cols * rows).then_some(Self { cols, rows, data })
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row-major values.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Smallest and largest value, or `None` for an empty field.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let (&first, rest) = self.data.split_first()?;
        Some(
            rest.iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// `(row, col)` of the first maximum in row-major order.
    pub fn argmax(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            if best.is_none_or(|(_, b)| v > b) {
                best = Some((i, v));
            }
        }
        best.map(|(i, _)| (i / self.cols, i % self.cols))
    }
}
