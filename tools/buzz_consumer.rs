/// Buzz Consumer — processes a canned buzz response every interval and logs
/// word count, character count and sentiment for the quoted message.
///
/// Usage: buzz_consumer
///
/// Reads MESSAGE_INTERVAL_SECONDS (default 2) and the optional BUZZ_* settings
/// from the environment or a `.env` file. Stop with Ctrl+C.

use std::process;
use travel_buzz::config::Role;

#[tokio::main]
async fn main() {
    if let Err(err) = travel_buzz::runtime::run(Role::Consumer).await {
        eprintln!("ERROR: {}", err);
        process::exit(1);
    }
}
