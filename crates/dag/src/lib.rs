// Copyright 2025 Irreducible Inc.
//! Dependency DAG over constraints, clustered into parallel-solvable levels.
//!
//! Nodes are dense indices, one per constraint; an edge parent → child means
//! the parent must be solved before the child. [`Dag::levels`] groups the
//! nodes into minimal topological levels: every parent of a node in level
//! `k` lives in a level `< k`, so all nodes of one level are data
//! independent and can be solved concurrently.
//!
//! The DAG is built once while finalizing a constraint system and is
//! immutable afterwards.

use std::ops::Range;
use std::sync::{
	atomic::{AtomicI64, Ordering},
	Mutex,
};

use rayon::prelude::*;

#[cfg(test)]
mod tests;

/// A directed acyclic dependency graph over dense node ids.
///
/// Nodes are appended with [`Dag::add_node`]; edges may only point from
/// smaller ids to larger ones (existing nodes are never re-parented), which
/// rules out cycles by construction.
#[derive(Clone, Debug, Default)]
pub struct Dag {
	parents: Vec<Vec<usize>>,
	children: Vec<Vec<usize>>,
	entry: Vec<bool>,
	nb_nodes: usize,
}

/// One scheduling level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Level {
	/// Node ids of the level, ascending.
	pub nodes: Vec<usize>,
}

impl Dag {
	/// Creates an empty DAG with storage preallocated for `capacity` nodes.
	pub fn new(capacity: usize) -> Self {
		Dag {
			parents: Vec::with_capacity(capacity),
			children: Vec::with_capacity(capacity),
			entry: Vec::with_capacity(capacity),
			nb_nodes: 0,
		}
	}

	/// Appends a node and returns its dense id.
	pub fn add_node(&mut self) -> usize {
		self.parents.push(Vec::new());
		self.children.push(Vec::new());
		self.entry.push(false);
		let n = self.nb_nodes;
		self.nb_nodes += 1;
		n
	}

	/// Sets the parents of `node`, and registers `node` as a child of each.
	///
	/// Call at most once per node. Parents must predate the node; no
	/// transitivity reduction is applied (it slows graph building more than
	/// it speeds up level extraction).
	pub fn add_edges(&mut self, node: usize, parents: &[usize]) {
		debug_assert!(self.parents[node].is_empty(), "edges of node {node} set twice");
		debug_assert!(
			parents.iter().all(|&p| p < node),
			"parents must have smaller ids than node {node}"
		);
		self.parents[node] = parents.to_vec();
		for &p in parents {
			self.children[p].push(node);
		}
	}

	/// Flags `node` as a level-0 seed: it has no unsolved dependencies even
	/// if it carries edges. Parentless nodes are seeds implicitly.
	pub fn mark_entry(&mut self, node: usize) {
		self.entry[node] = true;
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nb_nodes
	}

	/// Whether the DAG has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nb_nodes == 0
	}

	/// Clusters the nodes into minimal topological levels: for every node of
	/// level `k`, all its parents live in levels `< k`. Level 0 holds the
	/// entry nodes. Node lists are sorted ascending so the output is
	/// deterministic for a given DAG regardless of worker interleaving.
	pub fn levels(&self) -> Vec<Level> {
		let nb_nodes = self.nb_nodes;
		let mut solved = vec![false; nb_nodes];
		let mut current: Vec<usize> = Vec::with_capacity(nb_nodes / 2);
		let mut entry_nodes = Vec::new();

		for n in 0..nb_nodes {
			if self.entry[n] || self.parents[n].is_empty() {
				solved[n] = true;
				current.extend_from_slice(&self.children[n]);
				entry_nodes.push(n);
			}
		}
		let mut levels = vec![Level { nodes: entry_nodes }];

		// Tags the round a node was last inspected in. Stale values from
		// earlier rounds are ignored, so it is never cleared; the atomic
		// swap lets exactly one worker keep a node that several parents
		// pushed in the same round.
		let visited: Vec<AtomicI64> = (0..nb_nodes).map(|_| AtomicI64::new(0)).collect();

		let mut round: i64 = 0;
		while !current.is_empty() {
			round += 1;
			let level = Mutex::new(Vec::with_capacity(current.len()));
			let next = Mutex::new(Vec::with_capacity(current.len()));

			let solved_ref = &solved;
			let visited_ref = &visited;
			let current_ref = &current;
			rayon::scope(|scope| {
				for range in balanced_chunks(current_ref.len(), rayon::current_num_threads()) {
					let chunk = &current_ref[range];
					let (level, next) = (&level, &next);
					scope.spawn(move |_| {
						let mut local_level = Vec::new();
						let mut local_next = Vec::new();
						for &n in chunk {
							// an entry node shows up here when it is the
							// child of another entry node
							if solved_ref[n] {
								continue;
							}
							if visited_ref[n].swap(round, Ordering::Relaxed) == round {
								continue;
							}
							if self.parents[n].iter().any(|&p| !solved_ref[p]) {
								// retried once the missing parents land
								local_next.push(n);
								continue;
							}
							local_level.push(n);
							local_next.extend_from_slice(&self.children[n]);
						}
						level.lock().unwrap().append(&mut local_level);
						next.lock().unwrap().append(&mut local_next);
					});
				}
			});

			let level_nodes = level.into_inner().unwrap();
			for &n in &level_nodes {
				solved[n] = true;
			}
			current = next.into_inner().unwrap();
			levels.push(Level { nodes: level_nodes });
		}

		levels
			.par_iter_mut()
			.for_each(|level| level.nodes.sort_unstable());

		if cfg!(debug_assertions) {
			let placed: usize = levels.iter().map(|level| level.nodes.len()).sum();
			assert_eq!(placed, nb_nodes, "a node is missing from level clustering");
			assert!(solved.iter().all(|&s| s), "an unsolved node survived level clustering");
		}

		levels
	}
}

/// Splits `len` items into at most `max_chunks` contiguous ranges whose
/// sizes differ by at most one; the leading `len % n` ranges take the extra
/// item. The partition is deterministic, so work assignment does not depend
/// on scheduling.
pub fn balanced_chunks(len: usize, max_chunks: usize) -> impl Iterator<Item = Range<usize>> {
	let nb_chunks = if len == 0 { 0 } else { max_chunks.clamp(1, len) };
	let (base, extra) = if nb_chunks == 0 {
		(0, 0)
	} else {
		(len / nb_chunks, len % nb_chunks)
	};
	(0..nb_chunks).map(move |i| {
		let start = i * base + i.min(extra);
		let end = start + base + usize::from(i < extra);
		start..end
	})
}
