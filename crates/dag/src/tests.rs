// Copyright 2025 Irreducible Inc.
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::*;

fn level_of(levels: &[Level]) -> Vec<usize> {
	let nb_nodes: usize = levels.iter().map(|l| l.nodes.len()).sum();
	let mut level_of = vec![usize::MAX; nb_nodes];
	for (k, level) in levels.iter().enumerate() {
		for &n in &level.nodes {
			level_of[n] = k;
		}
	}
	level_of
}

#[test]
fn chain_is_one_node_per_level() {
	// A -> B -> C, with C also depending on A directly.
	let mut dag = Dag::new(3);
	let a = dag.add_node();
	let b = dag.add_node();
	dag.add_edges(b, &[a]);
	let c = dag.add_node();
	dag.add_edges(c, &[a, b]);

	let levels = dag.levels();
	assert_eq!(levels.len(), 3);
	assert_eq!(levels[0].nodes, vec![a]);
	assert_eq!(levels[1].nodes, vec![b]);
	assert_eq!(levels[2].nodes, vec![c]);
}

#[test]
fn fork_join_clusters_independent_nodes() {
	// A     B     C
	// │     │     │
	// │     ▼     │
	// │     D ◄───┘
	// │     │
	// │     ▼
	// └────►E ◄─── (B, C as well)
	let mut dag = Dag::new(5);
	let a = dag.add_node();
	let b = dag.add_node();
	let c = dag.add_node();
	let d = dag.add_node();
	dag.add_edges(d, &[b, c]);
	let e = dag.add_node();
	dag.add_edges(e, &[a, b, c, d]);

	let levels = dag.levels();
	assert_eq!(levels.len(), 3);
	assert_eq!(levels[0].nodes, vec![a, b, c]);
	assert_eq!(levels[1].nodes, vec![d]);
	assert_eq!(levels[2].nodes, vec![e]);
}

#[test]
fn marked_entry_overrides_edges() {
	// Node 1 depends on node 0 structurally but is flagged as having no
	// unsolved dependencies, so it seeds level 0 alongside it.
	let mut dag = Dag::new(3);
	let a = dag.add_node();
	let b = dag.add_node();
	dag.add_edges(b, &[a]);
	dag.mark_entry(b);
	let c = dag.add_node();
	dag.add_edges(c, &[b]);

	let levels = dag.levels();
	assert_eq!(levels[0].nodes, vec![a, b]);
	assert_eq!(levels[1].nodes, vec![c]);
}

#[test]
fn levels_are_deterministic() {
	let dag = random_dag(5_000, 6, 42);
	let first = dag.levels();
	for _ in 0..3 {
		assert_eq!(dag.levels(), first);
	}
}

#[test]
fn single_thread_and_parallel_extraction_agree() {
	let dag = random_dag(20_000, 10, 7);
	let parallel = dag.levels();

	let pool = rayon::ThreadPoolBuilder::new()
		.num_threads(1)
		.build()
		.unwrap();
	let sequential = pool.install(|| dag.levels());

	assert_eq!(parallel, sequential);
}

#[test]
#[ignore = "benchmark-sized run"]
fn single_thread_and_parallel_extraction_agree_100k() {
	let dag = random_dag(100_000, 10, 7);
	let parallel = dag.levels();

	let pool = rayon::ThreadPoolBuilder::new()
		.num_threads(1)
		.build()
		.unwrap();
	let sequential = pool.install(|| dag.levels());

	assert_eq!(parallel, sequential);
}

/// A DAG in the shape of the solver workload: the first `nb_nodes / 1000`
/// nodes are roots, every later node picks `nb_parents` random predecessors.
fn random_dag(nb_nodes: usize, nb_parents: usize, seed: u64) -> Dag {
	let mut rng = StdRng::seed_from_u64(seed);
	let mut dag = Dag::new(nb_nodes);
	let nb_roots = (nb_nodes / 1000).max(1);
	for _ in 0..nb_roots {
		dag.add_node();
	}
	let mut parents = Vec::with_capacity(nb_parents);
	for i in nb_roots..nb_nodes {
		parents.clear();
		for _ in 0..nb_parents {
			parents.push(rng.gen_range(0..i));
		}
		parents.sort_unstable();
		parents.dedup();
		let n = dag.add_node();
		dag.add_edges(n, &parents);
	}
	dag
}

#[test]
fn balanced_chunks_cover_contiguously() {
	let chunks: Vec<_> = balanced_chunks(10, 3).collect();
	assert_eq!(chunks, vec![0..4, 4..7, 7..10]);

	// more chunks than items: one item each
	let chunks: Vec<_> = balanced_chunks(2, 8).collect();
	assert_eq!(chunks, vec![0..1, 1..2]);

	assert_eq!(balanced_chunks(0, 4).count(), 0);
}

proptest! {
	#[test]
	fn parents_always_land_in_earlier_levels(
		raw_parents in prop::collection::vec(prop::collection::vec(0usize..1000, 0..5), 1..60),
	) {
		let mut dag = Dag::new(raw_parents.len());
		for (i, raw) in raw_parents.iter().enumerate() {
			let n = dag.add_node();
			if i > 0 {
				let mut parents: Vec<usize> = raw.iter().map(|p| p % i).collect();
				parents.sort_unstable();
				parents.dedup();
				dag.add_edges(n, &parents);
			}
		}

		let levels = dag.levels();
		let level_of = level_of(&levels);

		// coverage: every node in exactly one level
		prop_assert!(level_of.iter().all(|&k| k != usize::MAX));
		let placed: usize = levels.iter().map(|l| l.nodes.len()).sum();
		prop_assert_eq!(placed, raw_parents.len());

		// monotonicity
		for (i, raw) in raw_parents.iter().enumerate() {
			if i > 0 {
				for p in raw.iter().map(|p| p % i) {
					prop_assert!(level_of[p] < level_of[i]);
				}
			}
		}
	}
}
