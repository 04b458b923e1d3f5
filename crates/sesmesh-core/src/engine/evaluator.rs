use super::progress::{Progress, ProgressReporter};
use crate::core::models::grid::{ScalarField, VoxelGrid};
use tracing::{instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Samples a scalar function over every point of `grid`, one z-slice per task.
///
/// `fill_slice` receives the slice index `z` and the slice's region of the
/// output array (`(xdim+1) * (ydim+1)` samples, x-fastest). Slices are disjoint,
/// so workers never write the same sample. With the `parallel` feature slices
/// are distributed over the rayon pool; otherwise they are processed in order.
/// The call returns only once every slice has been written.
#[instrument(level = "debug", skip_all, fields(dims = ?grid.dims()))]
pub fn evaluate<F>(grid: &VoxelGrid, reporter: &ProgressReporter, fill_slice: F) -> ScalarField
where
    F: Fn(usize, &mut [f64]) + Send + Sync,
{
    let slice_len = grid.slice_len();
    let num_slices = grid.points_per_axis()[2];
    let mut values = vec![0.0; slice_len * num_slices];

    reporter.report(Progress::TaskStart {
        total_steps: num_slices as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let slices = values.chunks_mut(slice_len);

    #[cfg(feature = "parallel")]
    let slices = values.par_chunks_mut(slice_len);

    slices.enumerate().for_each(|(z, slice)| {
        fill_slice(z, slice);
        trace!(z, "Slice sampled.");
        reporter.report(Progress::TaskIncrement);
    });

    reporter.report(Progress::TaskFinish);

    ScalarField::from_values(*grid, values)
}

/// Iterates the rows of one slice, y-outer, passing the row's y index.
#[inline]
pub fn for_each_row(grid: &VoxelGrid, slice: &mut [f64], mut fill_row: impl FnMut(usize, &mut [f64])) {
    let row_len = grid.points_per_axis()[0];
    for (y, row) in slice.chunks_mut(row_len).enumerate() {
        fill_row(y, row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::sync::{Arc, Mutex};

    #[test]
    fn evaluate_writes_every_sample_at_its_linear_index() {
        let grid = VoxelGrid::new(Point3::origin(), 1.0, [3, 2, 4]);
        let field = evaluate(&grid, &ProgressReporter::new(), |z, slice| {
            for_each_row(&grid, slice, |y, row| {
                for (x, value) in row.iter_mut().enumerate() {
                    *value = grid.index(x, y, z) as f64;
                }
            });
        });

        for (i, &v) in field.values().iter().enumerate() {
            assert_eq!(v, i as f64);
        }
    }

    #[test]
    fn evaluate_visits_each_slice_exactly_once() {
        let grid = VoxelGrid::new(Point3::origin(), 1.0, [2, 2, 9]);
        let visited = Mutex::new(Vec::new());
        evaluate(&grid, &ProgressReporter::new(), |z, slice| {
            assert_eq!(slice.len(), 9);
            visited.lock().unwrap().push(z);
        });

        let mut visited = visited.into_inner().unwrap();
        visited.sort_unstable();
        assert_eq!(visited, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn evaluate_reports_one_increment_per_slice() {
        let grid = VoxelGrid::new(Point3::origin(), 1.0, [1, 1, 5]);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |e| {
            sink.lock().unwrap().push(e);
        }));

        evaluate(&grid, &reporter, |_, _| {});

        let events = events.lock().unwrap();
        assert_eq!(events.first(), Some(&Progress::TaskStart { total_steps: 6 }));
        assert_eq!(events.last(), Some(&Progress::TaskFinish));
        let increments = events
            .iter()
            .filter(|e| **e == Progress::TaskIncrement)
            .count();
        assert_eq!(increments, 6);
    }

    #[test]
    fn evaluate_is_deterministic_across_runs() {
        let grid = VoxelGrid::new(Point3::new(-1.0, -1.0, -1.0), 0.5, [4, 4, 4]);
        let sample = |z: usize, slice: &mut [f64]| {
            for_each_row(&grid, slice, |y, row| {
                for (x, value) in row.iter_mut().enumerate() {
                    *value = grid.world(x, y, z).coords.norm_squared();
                }
            });
        };
        let first = evaluate(&grid, &ProgressReporter::new(), sample);
        let second = evaluate(&grid, &ProgressReporter::new(), sample);
        assert_eq!(first, second);
    }
}
