//! Readers and writers hammering one shared store from parallel threads.
//!
//! The invariants under test: a committed id is never observed missing, even
//! while a writer swaps its entry to refresh the rating, and every id's final
//! rating equals what the same review sequence would produce sequentially.

use rust_decimal_macros::dec;
use shopcat::model::Rating;
use shopcat::persist::CatalogPaths;
use shopcat::store::CatalogStore;
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const READERS: usize = 4;
const WRITERS: usize = 4;
const REVIEWS_PER_WRITER: usize = 50;

fn empty_store() -> (Arc<CatalogStore>, CatalogPaths, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let paths = CatalogPaths::new(dir.path().join("data"), dir.path().join("reports"));
    fs::create_dir_all(&paths.data_dir).expect("Failed to create data dir");
    (Arc::new(CatalogStore::new(paths.clone())), paths, dir)
}

/// Rating ordinal posted by a writer on iteration `i`: cycles 1..=5.
fn rating_for(i: usize) -> Rating {
    Rating::try_from((i % 5 + 1) as u8).expect("ordinal in range")
}

/// What the cyclic review sequence averages to, computed sequentially.
fn expected_rating(reviews: usize) -> Rating {
    let sum: usize = (0..reviews).map(|i| rating_for(i).ordinal() as usize).sum();
    let mean = sum as f64 / reviews as f64;
    Rating::try_from(mean.round() as u8).expect("mean in range")
}

#[test]
fn concurrent_reads_never_miss_a_committed_id() {
    let (store, _paths, _dir) = empty_store();

    // Commit every id before any concurrency starts.
    let ids: Vec<u32> = (101..101 + WRITERS as u32).collect();
    for &id in &ids {
        store
            .create(id, format!("Product {id}"), dec!(10.00), Rating::NotRated, None)
            .expect("Failed to create product");
    }

    thread::scope(|scope| {
        // Writers review disjoint ids, forcing entry swaps on each call.
        for (w, &id) in ids.iter().enumerate() {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for i in 0..REVIEWS_PER_WRITER {
                    store
                        .add_review(id, rating_for(i), format!("writer {w} review {i}"))
                        .expect("Failed to add review to committed id");
                }
            });
        }

        // Readers must always find every committed id, mid-swap included.
        for _ in 0..READERS {
            let store = Arc::clone(&store);
            let ids = ids.clone();
            scope.spawn(move || {
                for _ in 0..REVIEWS_PER_WRITER {
                    for &id in &ids {
                        store
                            .find(id)
                            .expect("Committed id observed missing during swap");
                    }
                    let discounts = store.discounts_by_star_rating("en-GB");
                    assert!(
                        !discounts.is_empty(),
                        "Discount summary lost committed products"
                    );
                }
            });
        }
    });

    // Interleaving must not change the outcome: each id carries exactly its
    // writer's sequence, so the final rating matches the sequential result.
    let expected = expected_rating(REVIEWS_PER_WRITER);
    for &id in &ids {
        let product = store.find(id).expect("Failed to find product");
        assert_eq!(
            product.rating(),
            expected,
            "Final rating for {id} diverged from sequential equivalent"
        );
    }
}

#[test]
fn concurrent_reports_are_independent() {
    let (store, paths, _dir) = empty_store();
    store
        .create(101, "Tea", dec!(1.99), Rating::NotRated, None)
        .expect("Failed to create product");
    store
        .add_review(101, Rating::FourStars, "ok")
        .expect("Failed to add review");

    // Per-call report I/O shares no mutable state, so parallel report calls
    // with distinct client tags must all succeed without interfering.
    thread::scope(|scope| {
        for client in 0..8 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                store.report(101, "en-GB", &format!("client{client}"));
            });
        }
    });

    for client in 0..8 {
        let contents = fs::read_to_string(paths.report_file(101, &format!("client{client}")))
            .expect("Failed to read report");
        assert_eq!(contents.lines().count(), 2, "product line plus one review");
    }
}
