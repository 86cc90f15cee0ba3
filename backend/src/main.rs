//! Main entry point for the Larder backend.
//!
//! Starts the Axum web server; see the library crate for how state, routes
//! and middleware are assembled.

use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(e) = larder::start_server().await {
        error!("Server failed: {e}");
        eprintln!("Server failed: {e}");
        std::process::exit(1);
    }
}
