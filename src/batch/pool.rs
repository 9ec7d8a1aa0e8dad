//! Fixed-size worker pool for per-file work.

use crossbeam_channel::{bounded, unbounded};
use std::path::{Path, PathBuf};
use std::thread;

/// Applies `work` to every path and returns the results in input order.
///
/// With `jobs <= 1` the paths are processed on the calling thread.
/// Otherwise `jobs` scoped workers pull paths from a bounded channel; the
/// results are collected only after all workers have finished and are then
/// put back into input order, so the outcome does not depend on scheduling.
pub(crate) fn process_all<F, R>(paths: Vec<PathBuf>, jobs: usize, work: F) -> Vec<(PathBuf, R)>
where
    F: Fn(&Path) -> R + Sync,
    R: Send,
{
    if jobs <= 1 || paths.len() <= 1 {
        return paths
            .into_iter()
            .map(|path| {
                let result = work(&path);
                (path, result)
            })
            .collect();
    }

    let num_paths = paths.len();
    let (tx, rx) = bounded::<(usize, PathBuf)>(jobs * 2);
    let (result_tx, result_rx) = unbounded::<(usize, PathBuf, R)>();
    let work = &work;

    thread::scope(|scope| {
        for _ in 0..jobs {
            let rx = rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                while let Ok((index, path)) = rx.recv() {
                    let result = work(&path);
                    if result_tx.send((index, path, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(rx);
        drop(result_tx);

        for item in paths.into_iter().enumerate() {
            if tx.send(item).is_err() {
                break;
            }
        }
        drop(tx);
    });

    let mut results: Vec<(usize, PathBuf, R)> = result_rx.iter().collect();
    debug_assert_eq!(results.len(), num_paths);
    results.sort_by_key(|(index, _, _)| *index);
    results
        .into_iter()
        .map(|(_, path, result)| (path, result))
        .collect()
}
