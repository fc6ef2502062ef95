//! # Cuebook Console Entry Point
//!
//! ```text
//! $ cuebook
//! Cuebook Billiards ready. Type `help` for commands.
//! start 3 Alice
//! { "id": "…", "table_number": 3, "customer_name": "Alice", "active": true, … }
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    cuebook_console::run().await
}
