//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check store and search invariants over generated inputs.

use proptest::prelude::*;

use crate::cache::{find_best_match, CacheEntry, CacheStore, EmbeddingVector, PersistedCache};

// == Test Configuration ==
const DIMENSION: usize = 8;

// == Strategies ==
/// Generates vectors with at least one clearly nonzero component
fn nonzero_vector_strategy() -> impl Strategy<Value = Vec<f32>> {
    (
        prop::collection::vec(-1.0f32..1.0, DIMENSION - 1),
        prop_oneof![0.1f32..1.0, -1.0f32..-0.1],
    )
        .prop_map(|(mut rest, pivot)| {
            rest.push(pivot);
            rest
        })
}

fn query_text_strategy() -> impl Strategy<Value = String> {
    "[a-z ]{1,40}".prop_map(|s| s)
}

fn entry_strategy() -> impl Strategy<Value = CacheEntry> {
    (
        query_text_strategy(),
        "[a-zA-Z0-9 ]{11,80}",
        nonzero_vector_strategy(),
        0u64..2_000_000_000_000,
    )
        .prop_map(|(query, answer, embedding, created_at)| {
            CacheEntry::with_timestamp(query, answer, EmbeddingVector::new(embedding), created_at)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Property: capacity is never exceeded.
    // After every insert the store holds at most `capacity` entries.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..20,
        entries in prop::collection::vec(entry_strategy(), 1..60)
    ) {
        let mut store = CacheStore::new(capacity);

        for entry in entries {
            store.insert(entry);
            prop_assert!(
                store.size() <= capacity,
                "Cache size {} exceeds max {}",
                store.size(),
                capacity
            );
        }
    }

    // Property: FIFO eviction.
    // The store always equals the last `capacity` inserted entries, in order.
    #[test]
    fn prop_fifo_keeps_most_recent_in_order(
        capacity in 1usize..20,
        entries in prop::collection::vec(entry_strategy(), 1..60)
    ) {
        let mut store = CacheStore::new(capacity);
        for entry in &entries {
            store.insert(entry.clone());
        }

        let skip = entries.len().saturating_sub(capacity);
        let expected: Vec<&CacheEntry> = entries.iter().skip(skip).collect();
        let actual: Vec<&CacheEntry> = store.all().collect();
        prop_assert_eq!(actual, expected);
    }

    // Property: persistence round-trip.
    // Serializing a snapshot to JSON and loading it back preserves content and order.
    #[test]
    fn prop_snapshot_round_trip(entries in prop::collection::vec(entry_strategy(), 0..30)) {
        let mut store = CacheStore::new(50);
        for entry in entries {
            store.insert(entry);
        }

        let json = serde_json::to_string(&store.snapshot()).unwrap();
        let record: PersistedCache = serde_json::from_str(&json).unwrap();
        let reloaded = CacheStore::load(Some(record), 50, DIMENSION).unwrap();

        let original: Vec<&CacheEntry> = store.all().collect();
        let restored: Vec<&CacheEntry> = reloaded.all().collect();
        prop_assert_eq!(original, restored);
    }

    // Property: self-similarity.
    // Any nonzero vector has similarity 1 with itself and -1 with its negation.
    #[test]
    fn prop_similarity_bounds(values in nonzero_vector_strategy()) {
        let v = EmbeddingVector::new(values.clone());
        let neg = EmbeddingVector::new(values.iter().map(|x| -x).collect());

        let same = v.similarity(&v).unwrap();
        let opposite = v.similarity(&neg).unwrap();
        prop_assert!((same - 1.0).abs() < 1e-6, "self similarity {}", same);
        prop_assert!((opposite + 1.0).abs() < 1e-6, "negated similarity {}", opposite);
    }

    // Property: search returns the first maximum.
    // The returned entry has the highest score, no earlier entry ties it,
    // and its score is strictly above the threshold.
    #[test]
    fn prop_search_returns_first_maximum(
        query in nonzero_vector_strategy(),
        entries in prop::collection::vec(entry_strategy(), 1..30),
        threshold in -1.0f32..1.0
    ) {
        let query = EmbeddingVector::new(query);
        let mut store = CacheStore::new(100);
        for entry in entries {
            store.insert(entry);
        }

        let scores: Vec<f32> = store
            .all()
            .map(|e| query.similarity(e.embedding()).unwrap())
            .collect();
        let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let first_max = scores.iter().position(|s| *s == max).unwrap();

        match find_best_match(&query, &store, threshold).unwrap() {
            Some(found) => {
                prop_assert!(found.similarity > threshold);
                prop_assert_eq!(found.similarity, max);
                prop_assert_eq!(&found.entry, store.all().nth(first_max).unwrap());
            }
            None => prop_assert!(max <= threshold),
        }
    }
}
