//! The whole service — access logging wrapped around a fixed JSON banner.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example app
//!
//! Try:
//!   curl http://localhost:3000/
//!   curl -X POST http://localhost:3000/anything -d 'ignored'
//!
//! Every request gets the same answer; every request leaves one access-log
//! line with the caller's address.

use portico::middleware::AccessLog;
use portico::{Pipeline, Server, app};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let pipeline = Pipeline::builder()
        .wrap(AccessLog::new())
        .handler(app::handle);

    Server::bind("0.0.0.0:3000")
        .serve(pipeline)
        .await
        .expect("server error");
}
