// Copyright 2025 Irreducible Inc.
//! Level-ordered dispatch of constraint batches onto the rayon pool.

use std::sync::mpsc;

use strata_dag::balanced_chunks;

/// Minimum number of constraints one worker should receive. A level below
/// the threshold runs inline on the calling thread without synchronization.
pub(crate) const MIN_WORK_PER_CPU: usize = 50;

/// Runs `solve_one` over every constraint id of `level`, fanning out across
/// the rayon pool when the level is large enough.
///
/// The scope join at the end is the happens-before edge between levels:
/// every write of this level retires before the next level starts. Worker
/// errors travel a bounded channel sized to the task count and are drained
/// after the join; the first writer wins, later workers abandon their
/// remaining constraints.
pub(crate) fn run_level<E, S>(level: &[usize], solve_one: S) -> Result<(), E>
where
	E: Send,
	S: Fn(usize) -> Result<(), E> + Sync,
{
	let max_cpu = level.len() as f64 / MIN_WORK_PER_CPU as f64;
	if max_cpu <= 1.0 {
		for &constraint in level {
			solve_one(constraint)?;
		}
		return Ok(());
	}

	let nb_tasks = rayon::current_num_threads().min(max_cpu.ceil() as usize);
	let (err_tx, err_rx) = mpsc::sync_channel::<E>(nb_tasks);
	rayon::scope(|scope| {
		for range in balanced_chunks(level.len(), nb_tasks) {
			let chunk = &level[range];
			let err_tx = err_tx.clone();
			let solve_one = &solve_one;
			scope.spawn(move |_| {
				for &constraint in chunk {
					if let Err(error) = solve_one(constraint) {
						// one slot per task, try_send cannot lose this
						let _ = err_tx.try_send(error);
						return;
					}
				}
			});
		}
	});
	drop(err_tx);

	match err_rx.try_recv() {
		Ok(error) => Err(error),
		Err(_) => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	#[test]
	fn small_levels_run_inline() {
		let level: Vec<usize> = (0..10).collect();
		let hits = AtomicUsize::new(0);
		run_level::<(), _>(&level, |_| {
			hits.fetch_add(1, Ordering::Relaxed);
			Ok(())
		})
		.unwrap();
		assert_eq!(hits.load(Ordering::Relaxed), 10);
	}

	#[test]
	fn every_constraint_of_a_large_level_runs() {
		let level: Vec<usize> = (0..10_000).collect();
		let hits = AtomicUsize::new(0);
		run_level::<(), _>(&level, |_| {
			hits.fetch_add(1, Ordering::Relaxed);
			Ok(())
		})
		.unwrap();
		assert_eq!(hits.load(Ordering::Relaxed), 10_000);
	}

	#[test]
	fn first_error_short_circuits() {
		let level: Vec<usize> = (0..10_000).collect();
		let result = run_level(&level, |i| if i == 137 { Err(i) } else { Ok(()) });
		assert_eq!(result, Err(137));
	}
}
