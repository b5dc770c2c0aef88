use crate::config::WindowConfig;
use gdk4::prelude::*;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};

/// Width of the first monitor, in logical pixels.
pub fn monitor_width() -> Option<i32> {
    let display = gdk4::Display::default()?;
    display
        .monitors()
        .item(0)
        .and_then(|item| item.downcast::<gdk4::Monitor>().ok())
        .map(|m| m.geometry().width())
}

/// Pins the window full-width to the bottom edge of the display. Without
/// layer-shell support it becomes a regular window as wide as the monitor.
pub fn place_at_bottom(window: &gtk::ApplicationWindow, config: &WindowConfig) {
    let width = monitor_width().unwrap_or(config.width);
    window.set_default_size(width, config.height);

    if !gtk4_layer_shell::is_supported() {
        log::info!("Layer shell not supported, using a regular window");
        return;
    }

    window.init_layer_shell();
    window.set_layer(Layer::Top);
    window.set_namespace(Some("weightpicker"));
    window.set_exclusive_zone(config.height);
    for edge in [Edge::Left, Edge::Right, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(KeyboardMode::OnDemand);
}
