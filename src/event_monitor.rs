// src/event_monitor.rs

use std::thread;
use tokio::runtime::Runtime;

use log::{error, info};

/// Watches for Ctrl-C on a background thread; prints `farewell` and exits
/// with status 0 when it arrives.
pub fn start_interrupt_monitor(farewell: String) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to create tokio runtime for the interrupt monitor: {}", e);
                return;
            }
        };
        rt.block_on(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, shutting down");
                    println!("\x1b[39m\n{}", farewell);
                    std::process::exit(0);
                }
                Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
            }
        });
    });
}
