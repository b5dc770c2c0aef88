use crate::config::{Config, InteractionConfig};
use crate::gui::scale::style::{HexColor, ScaleStyle};
use crate::gui::scale::{BASE_OFFSET_DEG, LABEL_GAP};
use std::f64::consts::FRAC_PI_2;
use std::ops::RangeInclusive;
use strum::EnumIter;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    #[error(
        "Invalid weight range: min {min}, max {max}, initial {initial} \
         (expected min < max and min <= initial <= max)"
    )]
    InvalidRange { min: i32, max: i32, initial: i32 },
}

/// A validated `[min, max]` range together with the weight shown at the top
/// of the dial before any rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightRange {
    min: i32,
    max: i32,
    initial: i32,
}

impl WeightRange {
    pub fn new(min: i32, max: i32, initial: i32) -> Result<Self, ScaleError> {
        if min >= max || !(min..=max).contains(&initial) {
            return Err(ScaleError::InvalidRange { min, max, initial });
        }
        Ok(Self { min, max, initial })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn initial(&self) -> i32 {
        self.initial
    }

    pub fn values(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    pub fn clamp(&self, raw: f64) -> i32 {
        raw.clamp(self.min as f64, self.max as f64) as i32
    }

    /// Rotation angles (degrees) at which the selection reaches `max` and `min`.
    pub fn angle_bounds(&self) -> (f64, f64) {
        (
            self.initial as f64 - self.max as f64,
            self.initial as f64 - self.min as f64,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum TickKind {
    Normal,
    FiveStep,
    TenStep,
}

impl TickKind {
    /// Multiples of ten win over multiples of five.
    pub fn classify(value: i32) -> Self {
        if value.rem_euclid(10) == 0 {
            Self::TenStep
        } else if value.rem_euclid(5) == 0 {
            Self::FiveStep
        } else {
            Self::Normal
        }
    }

    pub fn line_length(self, style: &ScaleStyle) -> f64 {
        match self {
            Self::Normal => style.normal_line_length,
            Self::FiveStep => style.five_step_line_length,
            Self::TenStep => style.ten_step_line_length,
        }
    }

    pub fn line_color(self, style: &ScaleStyle) -> HexColor {
        match self {
            Self::Normal => style.normal_line_color,
            Self::FiveStep => style.five_step_line_color,
            Self::TenStep => style.ten_step_line_color,
        }
    }

    pub fn is_labelled(self) -> bool {
        matches!(self, Self::TenStep)
    }
}

/// Placement of the dial on a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub center: Point,
    pub radius: f64,
    pub outer_radius: f64,
    pub ring_width: f64,
}

impl DialGeometry {
    /// The center sits below the surface's top edge by half the ring width plus
    /// the radius, so the outer rim touches the top edge and only the upper arc
    /// shows when the widget is pinned to the bottom of the screen.
    pub fn new(style: &ScaleStyle, surface_width: f64) -> Self {
        Self {
            center: Point::new(surface_width / 2.0, style.scale_width / 2.0 + style.radius),
            radius: style.radius,
            outer_radius: style.outer_radius(),
            ring_width: style.scale_width,
        }
    }

    pub fn polar(&self, distance: f64, angle: f64) -> Point {
        Point::new(
            self.center.x + distance * angle.cos(),
            self.center.y + distance * angle.sin(),
        )
    }

    /// Angle of `pointer` around the center in degrees, clockwise positive (y down).
    pub fn pointer_angle(&self, pointer: Point) -> f64 {
        (pointer.y - self.center.y)
            .atan2(pointer.x - self.center.x)
            .to_degrees()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub text: String,
    pub position: Point,
    /// Radians; keeps the baseline tangent to the circle.
    pub rotation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: i32,
    pub kind: TickKind,
    /// Radians.
    pub angle: f64,
    pub start: Point,
    pub end: Point,
    pub label: Option<TickLabel>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaleUpdate {
    pub should_redraw: bool,
    pub weight_changed: Option<i32>,
}

impl ScaleUpdate {
    pub fn new(should_redraw: bool, weight_changed: Option<i32>) -> Self {
        Self {
            should_redraw,
            weight_changed,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DragTracker {
    geometry: DialGeometry,
    last_angle: f64,
}

impl DragTracker {
    fn new(geometry: DialGeometry, pointer: Point) -> Self {
        Self {
            geometry,
            last_angle: geometry.pointer_angle(pointer),
        }
    }

    /// Signed change of the pointer angle since the previous call, unwrapped
    /// across the ±180° seam.
    fn advance(&mut self, pointer: Point) -> f64 {
        let angle = self.geometry.pointer_angle(pointer);
        let mut delta = (angle - self.last_angle).rem_euclid(360.0);
        if delta > 180.0 {
            delta -= 360.0;
        }
        self.last_angle = angle;
        delta
    }
}

pub struct ScaleState {
    style: ScaleStyle,
    range: WeightRange,
    interaction: InteractionConfig,
    angle: f64,
    reported: i32,
    drag: Option<DragTracker>,
}

impl ScaleState {
    pub fn new(style: ScaleStyle, range: WeightRange) -> Self {
        Self {
            style,
            range,
            interaction: InteractionConfig::default(),
            angle: 0.0,
            reported: range.initial(),
            drag: None,
        }
    }

    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, ScaleError> {
        let range = config.range.validate()?;
        Ok(Self::new(config.style.clone(), range).with_interaction(config.interaction.clone()))
    }

    pub fn style(&self) -> &ScaleStyle {
        &self.style
    }

    pub fn range(&self) -> &WeightRange {
        &self.range
    }

    /// Current rotation in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn selected_weight(&self) -> i32 {
        self.range
            .clamp((self.range.initial() as f64 - self.angle).round())
    }

    /// Stores `angle` as is. Reports the selected weight only when it differs
    /// from the last reported one.
    pub fn set_angle(&mut self, angle: f64) -> ScaleUpdate {
        if !angle.is_finite() {
            return ScaleUpdate::default();
        }

        let should_redraw = angle != self.angle;
        self.angle = angle;

        let weight = self.selected_weight();
        let weight_changed = (weight != self.reported).then(|| {
            self.reported = weight;
            weight
        });

        ScaleUpdate::new(should_redraw, weight_changed)
    }

    /// Rotates by `delta` degrees without turning past either end of the range.
    pub fn rotate_by(&mut self, delta: f64) -> ScaleUpdate {
        let (lo, hi) = self.range.angle_bounds();
        self.set_angle((self.angle + delta).clamp(lo, hi))
    }

    pub fn begin_drag(&mut self, pointer: Point, surface_width: f64) {
        self.drag = Some(DragTracker::new(self.geometry(surface_width), pointer));
    }

    pub fn drag_to(&mut self, pointer: Point) -> ScaleUpdate {
        let Some(tracker) = self.drag.as_mut() else {
            return ScaleUpdate::default();
        };
        let delta = tracker.advance(pointer);
        self.rotate_by(delta * self.interaction.drag_sensitivity)
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Scrolling up (negative `dy`) increases the weight.
    pub fn scroll(&mut self, dy: f64) -> ScaleUpdate {
        self.rotate_by(dy * self.interaction.scroll_step)
    }

    pub fn geometry(&self, surface_width: f64) -> DialGeometry {
        DialGeometry::new(&self.style, surface_width)
    }

    /// Angle of `value` on the dial in radians.
    pub fn tick_angle(&self, value: i32) -> f64 {
        (value as f64 - self.range.initial() as f64 + self.angle + BASE_OFFSET_DEG).to_radians()
    }

    pub fn tick(&self, value: i32, geometry: &DialGeometry) -> Tick {
        let kind = TickKind::classify(value);
        let length = kind.line_length(&self.style);
        let angle = self.tick_angle(value);

        let label = kind.is_labelled().then(|| TickLabel {
            text: value.unsigned_abs().to_string(),
            position: geometry.polar(
                geometry.outer_radius - length - self.style.text_size - LABEL_GAP,
                angle,
            ),
            rotation: angle + FRAC_PI_2,
        });

        Tick {
            value,
            kind,
            angle,
            start: geometry.polar(geometry.outer_radius - length, angle),
            end: geometry.polar(geometry.outer_radius, angle),
            label,
        }
    }

    pub fn ticks(&self, geometry: &DialGeometry) -> Vec<Tick> {
        self.range
            .values()
            .map(|value| self.tick(value, geometry))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const EPS: f64 = 1e-9;

    fn default_state() -> ScaleState {
        ScaleState::new(
            ScaleStyle::default(),
            WeightRange::new(20, 250, 80).unwrap(),
        )
    }

    fn point_at(geometry: &DialGeometry, degrees: f64) -> Point {
        geometry.polar(100.0, degrees.to_radians())
    }

    #[test]
    fn test_classification() {
        for i in -100..=100 {
            let kind = TickKind::classify(i);
            assert_eq!(kind == TickKind::TenStep, i % 10 == 0, "value {}", i);
            assert_eq!(
                kind == TickKind::FiveStep,
                i % 5 == 0 && i % 10 != 0,
                "value {}",
                i
            );
            assert_eq!(kind == TickKind::Normal, i % 5 != 0, "value {}", i);
        }
    }

    #[test]
    fn test_every_value_gets_one_tick() {
        let state = default_state();
        let ticks = state.ticks(&state.geometry(400.0));
        assert_eq!(ticks.len(), 231);
        assert!(ticks.iter().map(|t| t.value).eq(20..=250));
    }

    #[test]
    fn test_kind_styles() {
        let style = ScaleStyle::default();
        let lengths: Vec<f64> = TickKind::iter().map(|k| k.line_length(&style)).collect();
        assert_eq!(lengths, vec![15.0, 25.0, 35.0]);
        assert_eq!(TickKind::TenStep.line_color(&style), style.ten_step_line_color);
        assert_eq!(TickKind::Normal.line_color(&style), style.normal_line_color);
    }

    #[test]
    fn test_invalid_ranges() {
        assert_eq!(
            WeightRange::new(100, 50, 80),
            Err(ScaleError::InvalidRange {
                min: 100,
                max: 50,
                initial: 80
            })
        );
        assert!(WeightRange::new(50, 50, 50).is_err());
        assert!(WeightRange::new(20, 250, 19).is_err());
        assert!(WeightRange::new(20, 250, 251).is_err());
        assert!(WeightRange::new(20, 250, 20).is_ok());
        assert!(WeightRange::new(20, 250, 250).is_ok());
    }

    #[test]
    fn test_initial_weight_at_top() {
        let state = default_state();
        assert_eq!(state.selected_weight(), 80);

        let geometry = state.geometry(400.0);
        let tick = state.tick(80, &geometry);
        assert_eq!(tick.kind, TickKind::TenStep);
        assert!((tick.angle + FRAC_PI_2).abs() < EPS);
        // outer rim touches the top edge of the surface
        assert!((tick.end.x - 200.0).abs() < EPS);
        assert!(tick.end.y.abs() < EPS);
    }

    #[test]
    fn test_rotation_selects_lower_weight() {
        let mut state = default_state();
        let update = state.set_angle(10.0);
        assert_eq!(update, ScaleUpdate::new(true, Some(70)));
        assert_eq!(state.selected_weight(), 70);

        // the tick for 70 is now at the top
        let tick = state.tick(70, &state.geometry(400.0));
        assert!((tick.angle + FRAC_PI_2).abs() < EPS);
    }

    // The last reported weight starts at `initial`, so clamping back onto the
    // initial weight is not a change and nothing is reported.
    #[test]
    fn test_weight_is_clamped_to_min() {
        let mut state = ScaleState::new(
            ScaleStyle::default(),
            WeightRange::new(20, 250, 20).unwrap(),
        );
        let update = state.set_angle(50.0);
        assert_eq!(state.selected_weight(), 20);
        assert_eq!(state.angle(), 50.0);
        assert_eq!(update.weight_changed, None);
        assert!(update.should_redraw);
    }

    #[test]
    fn test_weight_is_clamped_to_max() {
        let mut state = default_state();
        let update = state.set_angle(-1000.0);
        assert_eq!(update.weight_changed, Some(250));
        assert_eq!(state.selected_weight(), 250);
    }

    #[test]
    fn test_weight_is_monotonic_in_angle() {
        let mut state = default_state();
        let mut previous = i32::MAX;
        let mut angle = -300.0;
        while angle <= 300.0 {
            state.set_angle(angle);
            let weight = state.selected_weight();
            assert!(weight <= previous, "angle {}", angle);
            assert!((20..=250).contains(&weight));
            previous = weight;
            angle += 0.25;
        }
    }

    #[test]
    fn test_change_reported_once() {
        let mut state = default_state();
        assert_eq!(state.set_angle(10.0).weight_changed, Some(70));
        assert_eq!(state.set_angle(10.2).weight_changed, None);
        assert_eq!(state.set_angle(9.7).weight_changed, None);
        assert_eq!(state.set_angle(11.0).weight_changed, Some(69));
        assert_eq!(state.set_angle(0.0).weight_changed, Some(80));
        assert_eq!(state.set_angle(0.0), ScaleUpdate::new(false, None));
    }

    #[test]
    fn test_non_finite_angle_is_ignored() {
        let mut state = default_state();
        state.set_angle(5.0);
        assert_eq!(state.set_angle(f64::NAN), ScaleUpdate::default());
        assert_eq!(state.set_angle(f64::INFINITY), ScaleUpdate::default());
        assert_eq!(state.angle(), 5.0);
        assert_eq!(state.rotate_by(f64::NAN), ScaleUpdate::default());
        assert_eq!(state.angle(), 5.0);
    }

    #[test]
    fn test_tick_distances_from_center() {
        let mut state = default_state();
        state.set_angle(37.5);
        let geometry = state.geometry(640.0);

        for tick in state.ticks(&geometry) {
            let length = tick.kind.line_length(state.style());
            let outer = geometry.outer_radius;
            assert!((tick.end.distance(geometry.center) - outer).abs() < 1e-6);
            assert!((tick.start.distance(geometry.center) - (outer - length)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_labels_only_on_ten_steps() {
        let state = default_state();
        let geometry = state.geometry(400.0);
        let ticks = state.ticks(&geometry);

        let labelled: Vec<i32> = ticks
            .iter()
            .filter(|t| t.label.is_some())
            .map(|t| t.value)
            .collect();
        assert_eq!(labelled, (20..=250).step_by(10).collect::<Vec<_>>());

        let label = state.tick(80, &geometry).label.unwrap();
        assert_eq!(label.text, "80");
        assert!(label.rotation.abs() < EPS);
        let expected = geometry.outer_radius - 35.0 - 18.0 - LABEL_GAP;
        assert!((label.position.distance(geometry.center) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_negative_labels_show_absolute_value() {
        let state = ScaleState::new(ScaleStyle::default(), WeightRange::new(-25, 25, 0).unwrap());
        let geometry = state.geometry(400.0);
        assert_eq!(state.tick(-20, &geometry).label.unwrap().text, "20");
        assert_eq!(state.tick(-15, &geometry).kind, TickKind::FiveStep);
        assert!(state.tick(-15, &geometry).label.is_none());
    }

    #[test]
    fn test_clockwise_drag_lowers_weight() {
        let mut state = default_state();
        let geometry = state.geometry(400.0);
        assert_eq!(geometry.center, Point::new(200.0, 185.0));

        state.begin_drag(point_at(&geometry, -90.0), 400.0);
        assert!(state.is_dragging());

        let update = state.drag_to(point_at(&geometry, -45.0));
        assert_eq!(update.weight_changed, Some(35));
        assert!((state.angle() - 45.0).abs() < 1e-6);

        let update = state.drag_to(point_at(&geometry, -90.0));
        assert_eq!(update.weight_changed, Some(80));

        state.end_drag();
        assert!(!state.is_dragging());
        assert_eq!(state.drag_to(point_at(&geometry, 0.0)), ScaleUpdate::default());
    }

    #[test]
    fn test_drag_without_begin_is_ignored() {
        let mut state = default_state();
        assert_eq!(state.drag_to(Point::new(10.0, 10.0)), ScaleUpdate::default());
        assert_eq!(state.angle(), 0.0);
    }

    #[test]
    fn test_drag_across_seam() {
        let mut state = ScaleState::new(
            ScaleStyle::default(),
            WeightRange::new(-1000, 1000, 0).unwrap(),
        );
        let geometry = state.geometry(400.0);

        state.begin_drag(point_at(&geometry, 170.0), 400.0);
        state.drag_to(point_at(&geometry, -170.0));
        assert!((state.angle() - 20.0).abs() < 1e-6);
        assert_eq!(state.selected_weight(), -20);
    }

    #[test]
    fn test_drag_stops_at_range_end() {
        let mut state = default_state();
        let geometry = state.geometry(400.0);

        state.begin_drag(point_at(&geometry, -90.0), 400.0);
        let update = state.drag_to(point_at(&geometry, 0.0));
        assert_eq!(update.weight_changed, Some(20));
        assert!((state.angle() - 60.0).abs() < 1e-9);

        // reversing responds immediately
        let update = state.drag_to(point_at(&geometry, -10.0));
        assert_eq!(update.weight_changed, Some(30));
    }

    #[test]
    fn test_drag_sensitivity() {
        let interaction = InteractionConfig {
            drag_sensitivity: 0.5,
            ..InteractionConfig::default()
        };
        let mut state = default_state().with_interaction(interaction);
        let geometry = state.geometry(400.0);

        state.begin_drag(point_at(&geometry, -90.0), 400.0);
        state.drag_to(point_at(&geometry, -70.0));
        assert_eq!(state.selected_weight(), 70);
    }

    #[test]
    fn test_scroll() {
        let mut state = default_state();
        assert_eq!(state.scroll(-3.0).weight_changed, Some(83));
        assert_eq!(state.scroll(2.0).weight_changed, Some(81));
        assert_eq!(state.scroll(-1000.0).weight_changed, Some(250));
        assert_eq!(state.scroll(-1.0), ScaleUpdate::new(false, None));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.range.min = 100;
        config.range.max = 50;
        assert!(matches!(
            ScaleState::from_config(&config),
            Err(ScaleError::InvalidRange { min: 100, max: 50, .. })
        ));

        let state = ScaleState::from_config(&Config::default()).unwrap();
        assert_eq!(state.selected_weight(), 80);
    }
}
