//! WebSocket API for the calculator.
//!
//! Every text frame is one JSON request (see `api::ApiRequest`); the reply is
//! one text frame with the JSON response.
//!
//! ## Usage
//!
//! Build with web feature:
//! ```sh
//! cargo build --features web
//! ```
//!
//! Run with web server:
//! ```sh
//! ./target/debug/lootbox --serve        # Default port 5278
//! ./target/debug/lootbox --serve=8080   # Custom port
//! ```

#[cfg(feature = "web")]
mod server;

#[cfg(feature = "web")]
pub use server::start_web_server;
