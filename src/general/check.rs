use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

// Connection status flag
static HOST_CONNECTED: AtomicBool = AtomicBool::new(false);

fn print_banner(color: Color, text: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true));
    let _ = writeln!(&mut stdout, "{}", text);
    let _ = stdout.reset();
}

/// Print the "registered" banner once the host accepted the registration.
pub fn print_connection_active(port: u16) {
    if HOST_CONNECTED.swap(true, Ordering::SeqCst) {
        return;
    }
    print_banner(Color::Green, &format!("Plugin registered on port {} | Waiting for events", port));
}

/// Print the shutdown banner once, after the host connection is gone.
pub fn print_connection_closed(reason: &str) {
    if !HOST_CONNECTED.swap(false, Ordering::SeqCst) {
        return;
    }
    print_banner(Color::Red, &format!("Host connection closed ({}) | Exiting", reason));
}
