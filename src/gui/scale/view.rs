use super::model::{DialGeometry, ScaleState, Tick, TickLabel};
use super::style::ScaleStyle;
use super::{LABEL_FONT, SHADOW_BLUR, SHADOW_STEPS, TICK_STROKE_WIDTH};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct TickRenderer<'a> {
    tick: &'a Tick,
    style: &'a ScaleStyle,
}

impl<'a> TickRenderer<'a> {
    fn new(tick: &'a Tick, style: &'a ScaleStyle) -> Self {
        Self { tick, style }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        if let Some(label) = &self.tick.label {
            self.draw_label(cr, label, colors)?;
        }
        self.draw_line(cr)
    }

    fn draw_line(&self, cr: &Context) -> Result<(), cairo::Error> {
        set_source(cr, self.tick.kind.line_color(self.style).to_srgba());
        cr.set_line_width(TICK_STROKE_WIDTH);
        cr.move_to(self.tick.start.x, self.tick.start.y);
        cr.line_to(self.tick.end.x, self.tick.end.y);
        cr.stroke()
    }

    fn draw_label(
        &self,
        cr: &Context,
        label: &TickLabel,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        cr.save()?;
        set_source(cr, colors.label);
        cr.select_font_face(LABEL_FONT, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(self.style.text_size);

        // baseline centered on the label position, rotated about it
        let ext = cr.text_extents(&label.text)?;
        cr.translate(label.position.x, label.position.y);
        cr.rotate(label.rotation);
        cr.move_to(-(ext.width() / 2.0 + ext.x_bearing()), 0.0);
        cr.show_text(&label.text)?;
        cr.restore()
    }
}

pub fn draw(
    cr: &Context,
    state: &ScaleState,
    width: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let geometry = state.geometry(width);

    draw_shadow(cr, &geometry, colors)?;
    draw_ring(cr, &geometry, colors)?;

    for tick in state.ticks(&geometry) {
        TickRenderer::new(&tick, state.style()).draw(cr, colors)?;
    }
    Ok(())
}

/// Cairo has no blur, so the shadow is a stack of translucent rings that
/// widen up to `SHADOW_BLUR` past both edges of the scale ring.
fn draw_shadow(
    cr: &Context,
    geometry: &DialGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let layer = Srgba::new(
        colors.shadow.red,
        colors.shadow.green,
        colors.shadow.blue,
        colors.shadow.alpha / SHADOW_STEPS as f64,
    );
    set_source(cr, layer);

    for step in 1..=SHADOW_STEPS {
        let spread = SHADOW_BLUR * step as f64 / SHADOW_STEPS as f64;
        cr.set_line_width(geometry.ring_width + 2.0 * spread);
        cr.new_sub_path();
        cr.arc(
            geometry.center.x,
            geometry.center.y,
            geometry.radius,
            0.0,
            2.0 * PI,
        );
        cr.stroke()?;
    }
    Ok(())
}

fn draw_ring(
    cr: &Context,
    geometry: &DialGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_source(cr, colors.ring);
    cr.set_line_width(geometry.ring_width);
    cr.new_sub_path();
    cr.arc(
        geometry.center.x,
        geometry.center.y,
        geometry.radius,
        0.0,
        2.0 * PI,
    );
    cr.stroke()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::scale::WeightRange;

    fn render(state: &ScaleState, width: i32, height: i32) -> cairo::ImageSurface {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            draw(&cr, state, width as f64, &ThemeColors::default()).unwrap();
        }
        surface.flush();
        surface
    }

    fn pixel(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> [u8; 4] {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let i = y * stride + x * 4;
        // ARGB32 is stored as native-endian u32; on little endian that is B, G, R, A
        [data[i], data[i + 1], data[i + 2], data[i + 3]]
    }

    #[test]
    fn test_render_ring_and_ticks() {
        let state = ScaleState::new(
            ScaleStyle::default(),
            WeightRange::new(20, 250, 80).unwrap(),
        );
        let mut surface = render(&state, 400, 300);

        // inside the ring, clear of ticks and labels
        assert_eq!(pixel(&mut surface, 200, 100), [255, 255, 255, 255]);

        // the ten-step tick for 80 sits on top of the ring at the top center
        let [_, _, red, alpha] = pixel(&mut surface, 200, 17);
        assert_eq!(alpha, 255);
        assert!(red < 200, "red channel {}", red);

        // beyond the shadow
        assert_eq!(pixel(&mut surface, 0, 0)[3], 0);
    }
}
