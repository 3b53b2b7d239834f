//! Keyboard walkthrough: library info, injection, key names and listening.
//!
//! Run with: cargo run --example keyboard --features native
//!
//! Note: On macOS, grant Accessibility and Input Monitoring permissions to the
//! terminal. On Linux, the user needs access to /dev/uinput and /dev/input.

use axidev_io::{Key, KeyEvent, Listener, LogLevel, Modifier, Sender};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> axidev_io::Result<()> {
    println!("axidev-io keyboard example");
    println!("==========================\n");

    println!("Library version: {}\n", axidev_io::library_version());

    println!("--- Logging ---");
    println!("Current log level: {:?}", axidev_io::log_level());
    println!(
        "Debug logging enabled: {}",
        axidev_io::is_log_enabled(LogLevel::Debug)
    );
    println!(
        "Info logging enabled: {}",
        axidev_io::is_log_enabled(LogLevel::Info)
    );
    axidev_io::set_log_level(LogLevel::Debug);
    println!("Enabled debug logging\n");

    println!("--- Keyboard Sender ---");
    let sender = Sender::new()?;
    println!("Sender ready: {}", sender.is_ready());
    println!("Backend type: {}", sender.backend_type());

    let caps = sender.capabilities();
    println!("Capabilities:");
    println!("  Can inject keys:       {}", caps.can_inject_keys);
    println!("  Can inject text:       {}", caps.can_inject_text);
    println!("  Can simulate HID:      {}", caps.can_simulate_hid);
    println!("  Supports key repeat:   {}", caps.supports_key_repeat);
    println!("  Needs accessibility:   {}", caps.needs_accessibility_perm);
    println!("  Needs input monitor:   {}", caps.needs_input_monitoring_perm);
    println!("  Needs uinput access:   {}", caps.needs_uinput_access);
    println!();

    if caps.needs_permissions() {
        println!("Requesting permissions...");
        if sender.request_permissions() {
            println!("Permissions granted!\n");
        } else {
            println!("Warning: permissions not granted, some features may not work\n");
        }
    }

    println!("--- Key Conversion ---");
    for name in ["A", "Enter", "Return", "Space", "Escape", "F1", "Ctrl", "Shift"] {
        let key = Key::from_name(name);
        println!("  {name:?} -> Key({}) -> {:?}", key.code(), key.name());
    }
    println!();

    println!("--- Modifiers ---");
    let mods = Modifier::CTRL | Modifier::SHIFT;
    println!("Combined modifiers ({mods}): 0x{:02X}", mods.bits());
    println!(
        "  has_ctrl: {}, has_shift: {}, has_alt: {}\n",
        mods.has_ctrl(),
        mods.has_shift(),
        mods.has_alt()
    );

    if caps.can_inject_text {
        println!("--- Text Injection Demo ---");
        println!("Will type text in 3 seconds... (switch to a text editor!)");
        thread::sleep(Duration::from_secs(3));

        match sender.type_text("Hello from axidev-io! 🎉") {
            Ok(()) => println!("Text typed successfully!"),
            Err(e) => println!("type_text error: {e}"),
        }
        if let Err(e) = sender.tap(Key::from_name("Return")) {
            println!("tap error: {e}");
        }
        println!();
    }

    println!("--- Keyboard Listener ---");
    let listener = Listener::new()?;
    println!("Starting keyboard listener (press Ctrl+C to exit)...");
    println!("Press keys to see events:\n");

    listener.start(|event: KeyEvent| {
        let action = if event.is_press() {
            "↓ pressed "
        } else {
            "↑ released"
        };

        let mut name = event.key_name();
        if name.is_empty() {
            name = format!("Unknown(0x{:04X})", event.key.code());
        }

        let mut mods = event.modifiers;
        mods.remove(Modifier::CAPS_LOCK | Modifier::NUM_LOCK);
        let mods = if mods.is_empty() {
            String::new()
        } else {
            format!("{mods}+")
        };

        let ch = event
            .char()
            .map(|c| format!(" char={c:?}"))
            .unwrap_or_default();

        println!("  {action} {mods}{name}{ch}");
    })?;
    println!("Listening: {}", listener.is_listening());

    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })
    .expect("Error setting Ctrl-C handler");
    let _ = rx.recv();

    println!("\n--- Cleanup ---");
    println!("Stopping listener...");
    listener.stop();
    println!("Listening after stop: {}", listener.is_listening());

    if let Some(err) = axidev_io::last_error() {
        println!("Last error: {err}");
        axidev_io::clear_last_error();
    }

    println!("Done!");
    Ok(())
}
