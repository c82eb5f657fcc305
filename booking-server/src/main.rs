use std::net::SocketAddr;

use booking_server::engine::{BookingEngine, EngineConfig};
use booking_server::payment::{ApproveAll, PaymentProcessor};
use booking_server::store::{Store, seed};
use booking_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_server=debug,info".into()),
        )
        .init();

    // Seed the demo catalog: three trains with compartments and seats
    let store = Store::new(seed::sample_catalog());

    let engine = BookingEngine::new(store.clone(), EngineConfig::default());
    let payments = PaymentProcessor::new(store, ApproveAll);

    // Build app state
    let state = AppState::new(engine, payments);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Train Booking Server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health                    - Health check");
    println!("  GET  /trains                    - Train catalog");
    println!("  GET  /trains/:id/seats          - Seats and availability");
    println!("  GET  /trains/:id/compartments   - Per-compartment availability");
    println!("  GET  /routes/search             - Search routes by station");
    println!("  POST /bookings                  - Create a booking");
    println!("  POST /bookings/:id/cancel       - Cancel a booking");
    println!("  GET  /bookings                  - List bookings");
    println!("  GET  /queues/rac                - RAC queue entries");
    println!("  GET  /queues/waitlist           - Waitlist entries");
    println!("  POST /payments                  - Resolve payment for a booking");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
