use crate::gui::scale::SHADOW_ALPHA;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Colors the scale style does not cover. Themes can override them with
/// `@define-color scale_ring_color ...;` and friends.
pub struct ThemeColors {
    pub ring: Srgba<f64>,
    pub shadow: Srgba<f64>,
    pub label: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            ring: Srgba::new(1.0, 1.0, 1.0, 1.0),
            shadow: Srgba::new(0.0, 0.0, 0.0, SHADOW_ALPHA),
            label: Srgba::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            ring: Self::lookup_color(context, "scale_ring_color", fallback.ring),
            shadow: Self::lookup_color(context, "scale_shadow_color", fallback.shadow),
            label: Self::lookup_color(context, "scale_label_color", fallback.label),
        }
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.scale-drawing-area {
    background: none;
    background-color: transparent;
}

.weight-label {
    font-size: 32pt;
    font-weight: bold;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
