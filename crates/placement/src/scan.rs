/// Iterator over candidate cells of a square region with variable pitch.
///
/// Different variants of one group have different footprints, so the walk
/// cannot use a fixed grid: the inner (y) axis advances by whatever step the
/// lookup reports for the cell just visited, and the outer (x) axis advances
/// by the largest step seen in the completed scan line, so variable-size
/// variants never overlap their own scan grid.
///
/// The lookup is expected to be pure in the cell coordinates (it resolves
/// the variant for the cell, which is coordinate-seeded), so callers can
/// re-resolve inside the loop body and get the same variant the step came
/// from.
pub struct ScanGrid<F> {
    min: i32,
    max: i32,
    x: i32,
    y: i32,
    row_step: i32,
    lookup: F,
}

impl<F> ScanGrid<F>
where
    F: FnMut(i32, i32) -> f32,
{
    /// Walk `[min, max)` on both axes, asking `lookup` for the step at each
    /// visited cell.
    pub fn new(min: i32, max: i32, lookup: F) -> Self {
        Self {
            min,
            max,
            x: min,
            y: min,
            row_step: 0,
            lookup,
        }
    }
}

impl<F> Iterator for ScanGrid<F>
where
    F: FnMut(i32, i32) -> f32,
{
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.y >= self.max {
            self.x += self.row_step.max(1);
            self.y = self.min;
            self.row_step = 0;
        }
        if self.x >= self.max {
            return None;
        }
        let cell = (self.x, self.y);
        let step = ((self.lookup)(self.x, self.y).round() as i32).max(1);
        self.y += step;
        self.row_step = self.row_step.max(step);
        Some(cell)
    }
}
