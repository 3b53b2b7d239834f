//! Async channel example with Tokio.
//!
//! Run with: cargo run --example channel_async --features native,tokio
//!
//! Key events are received asynchronously while a heartbeat shows the async
//! loop stays responsive. Press Escape to exit.

use axidev_io::Listener;
use axidev_io::channel::listen_async_channel;
use std::time::Duration;
use tokio::time::interval;

#[tokio::main]
async fn main() {
    println!("axidev-io channel example (async/tokio)");
    println!("=======================================\n");
    println!("Press Escape to exit.\n");

    let listener = Listener::new().expect("Failed to create listener");
    let mut rx = listen_async_channel(&listener, 100).expect("Failed to start listener");
    let escape = axidev_io::Key::from_name("Escape");

    println!("Listener started, waiting for events...\n");

    let mut event_count = 0u32;
    let mut heartbeat = interval(Duration::from_secs(5));

    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Some(event) => {
                        event_count += 1;
                        let state = if event.is_press() { "pressed" } else { "released" };
                        println!("[{}] {} {} [{}]", event_count, event.key_name(), state, event.modifiers);

                        if event.is_press() && event.key == escape {
                            listener.stop();
                        }
                    }
                    None => {
                        println!("Channel closed, listener stopped.");
                        break;
                    }
                }
            }

            _ = heartbeat.tick() => {
                println!("... heartbeat (received {} events so far)", event_count);
            }
        }
    }

    listener.close();
}
