//! Experiment Assignment Walkthrough
//!
//! Demonstrates the full assignment lifecycle: registry setup, sticky
//! variant resolution, exposure deduplication, forced overrides, and
//! clear-all.
//!
//! Run with: cargo run --example assignment_walkthrough

use forkspot_experiments::kv::MemoryKvStore;
use forkspot_experiments::tracking::{TrackingEvent, TrackingSink};
use forkspot_experiments::{ExperimentClient, ExperimentConfig, ExperimentRegistry};

/// Sink that prints every event as the analytics dispatch layer would see it.
struct PrintSink;

impl TrackingSink for PrintSink {
    fn emit(&self, event: TrackingEvent) {
        println!(
            "   [tracking] {}",
            serde_json::to_string(&event).expect("event serializes")
        );
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("forkspot_experiments=debug")),
        )
        .init();

    println!("=== Forkspot Experiment Assignment ===\n");

    // -------------------------------------------------------------------------
    // 1. Register the experiments this build knows about
    // -------------------------------------------------------------------------
    println!("1. Building the experiment registry...");

    let registry = ExperimentRegistry::builder()
        .register(ExperimentConfig::new(
            "restaurant_card_layout",
            ["compact", "extended"],
        ))
        .register(
            ExperimentConfig::new("search_ranking", ["distance", "rating", "blend"])
                .weights([0.25, 0.25, 0.5]),
        )
        .build();

    println!("   Registered experiments: {}", registry.len());

    // -------------------------------------------------------------------------
    // 2. Construct the one client the whole app shares
    // -------------------------------------------------------------------------
    println!("\n2. Constructing the experiment client...");

    let client = ExperimentClient::builder(registry, MemoryKvStore::new(), PrintSink).build();

    // -------------------------------------------------------------------------
    // 3. Resolve variants - first call assigns, emits one exposure
    // -------------------------------------------------------------------------
    println!("\n3. Resolving variants...");

    let layout = client.variant("restaurant_card_layout").await;
    println!("   restaurant_card_layout -> {layout}");

    let ranking = client.variant("search_ranking").await;
    println!("   search_ranking -> {ranking}");

    // -------------------------------------------------------------------------
    // 4. Resolve again - sticky, and the exposure is deduplicated
    // -------------------------------------------------------------------------
    println!("\n4. Resolving again (sticky, no duplicate exposure)...");

    for _ in 0..3 {
        let again = client.variant("restaurant_card_layout").await;
        assert_eq!(again, layout);
    }
    println!("   restaurant_card_layout -> {layout} (x3, one exposure total)");

    // -------------------------------------------------------------------------
    // 5. Force an override for debugging
    // -------------------------------------------------------------------------
    println!("\n5. Forcing search_ranking to \"blend\"...");

    client.force_variant("search_ranking", "blend").await;
    println!("   search_ranking -> {}", client.variant("search_ranking").await);

    // -------------------------------------------------------------------------
    // 6. Inspect and clear the persisted state
    // -------------------------------------------------------------------------
    println!("\n6. Persisted assignments:");
    for (name, assignment) in client.assignments().await {
        println!(
            "   {name}: {} (assigned {})",
            assignment.variant(),
            assignment.assigned_at()
        );
    }

    client.clear_assignments().await;
    println!("\n   After clear_assignments: {:?}", client.assignments().await);

    println!("\n=== Done ===");
}
