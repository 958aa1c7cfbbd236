/// Buzz Producer — emits a random travel sentence every interval.
///
/// Usage: buzz_producer
///
/// Reads MESSAGE_INTERVAL_SECONDS (default 3) and the optional BUZZ_* settings
/// from the environment or a `.env` file. Stop with Ctrl+C.

use std::process;
use travel_buzz::config::Role;

#[tokio::main]
async fn main() {
    if let Err(err) = travel_buzz::runtime::run(Role::Producer).await {
        eprintln!("ERROR: {}", err);
        process::exit(1);
    }
}
