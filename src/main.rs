//! Demo driver: simulates a handful of shop clients hammering one shared
//! catalog from parallel threads.
//!
//! Each client picks a random product and locale, asks for the discount
//! summary, files a review, and generates a report file. Session logs are
//! aggregated and printed once every client has finished, so the interleaved
//! work stays readable.

use rand::Rng;
use shopcat::model::Rating;
use shopcat::persist::CatalogPaths;
use shopcat::store::CatalogStore;
use shopcat::telemetry::setup_tracing;
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

const MIN_PRODUCT_ID: u32 = 101;
const NUM_PRODUCTS: u32 = 5;
const NUM_CLIENTS: usize = 5;

fn main() {
    setup_tracing();
    info!("Starting shop with shared catalog");

    let store = Arc::new(CatalogStore::new(CatalogPaths::default()));

    let logs: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (1..=NUM_CLIENTS)
            .map(|client| {
                let store = Arc::clone(&store);
                scope.spawn(move || client_session(client, &store))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(log) => log,
                Err(_) => {
                    error!("Client thread panicked");
                    String::from("-\tclient panicked\t-")
                }
            })
            .collect()
    });

    for log in logs {
        println!("{log}");
    }

    info!("All clients finished");
}

fn client_session(client: usize, store: &CatalogStore) -> String {
    let mut rng = rand::thread_rng();
    let client_id = format!("Client {client}");
    let product_id = MIN_PRODUCT_ID + rng.gen_range(0..NUM_PRODUCTS);

    let locales = CatalogStore::supported_locales();
    let language_tag = locales[rng.gen_range(0..locales.len())];

    let mut log = String::new();
    log.push_str(&format!("{client_id}\n-\tstart of log\t-\n"));

    for (stars, total) in store.discounts_by_star_rating(language_tag) {
        log.push_str(&format!("{stars}\t{total}\n"));
    }

    let comment = format!("Yet another review from {client_id}");
    match store.add_review(product_id, Rating::FourStars, comment) {
        Ok(product) => log.push_str(&format!(
            "Product {} reviewed, rating now {}\n",
            product.id(),
            product.stars()
        )),
        Err(e) => log.push_str(&format!("Product {product_id} not reviewed: {e}\n")),
    }

    store.report(product_id, language_tag, &client_id.replace(' ', "_"));
    log.push_str(&format!(
        "{client_id} generated report for product {product_id}\n"
    ));

    log.push_str("-\tend of log\t-\n");
    log
}
