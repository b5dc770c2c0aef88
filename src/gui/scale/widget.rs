use super::model::{Point, ScaleState, ScaleUpdate};
use super::view;
use crate::gui::theme::ThemeColors;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// The rotatable scale. Emits [`ScaleOutput::WeightChanged`] whenever the
/// selected weight changes.
pub struct ScaleWidget {
    state: Rc<RefCell<ScaleState>>,
    drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum ScaleMsg {
    DragBegin(Point),
    DragUpdate(Point),
    DragEnd,
    Scroll(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleOutput {
    WeightChanged(i32),
}

#[relm4::component(pub)]
impl SimpleComponent for ScaleWidget {
    type Init = ScaleState;
    type Input = ScaleMsg;
    type Output = ScaleOutput;

    view! {
        #[root]
        gtk::DrawingArea {
            set_hexpand: true,
            set_vexpand: true,
            add_css_class: "scale-drawing-area",

            add_controller = gtk::GestureDrag::new() {
                connect_drag_begin[sender] => move |_, x, y| {
                    sender.input(ScaleMsg::DragBegin(Point::new(x, y)));
                },
                connect_drag_update[sender] => move |gesture, dx, dy| {
                    if let Some((x, y)) = gesture.start_point() {
                        sender.input(ScaleMsg::DragUpdate(Point::new(x + dx, y + dy)));
                    }
                },
                connect_drag_end[sender] => move |_, _, _| {
                    sender.input(ScaleMsg::DragEnd);
                },
            },

            add_controller = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL) {
                connect_scroll[sender] => move |_, _, dy| {
                    sender.input(ScaleMsg::Scroll(dy));
                    glib::Propagation::Stop
                },
            },
        }
    }

    fn init(
        state: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let state = Rc::new(RefCell::new(state));

        let model = ScaleWidget {
            state: state.clone(),
            drawing_area: root.clone(),
        };

        let widgets = view_output!();

        let state_draw = state.clone();
        root.set_draw_func(move |drawing_area, cr, width, _| {
            let colors = ThemeColors::from_context(&drawing_area.style_context());
            if let Err(e) = view::draw(cr, &state_draw.borrow(), width as f64, &colors) {
                log::error!("Drawing error: {}", e);
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        let update = match msg {
            ScaleMsg::DragBegin(pointer) => {
                let width = self.drawing_area.width() as f64;
                self.state.borrow_mut().begin_drag(pointer, width);
                ScaleUpdate::default()
            }
            ScaleMsg::DragUpdate(pointer) => self.state.borrow_mut().drag_to(pointer),
            ScaleMsg::DragEnd => {
                self.state.borrow_mut().end_drag();
                ScaleUpdate::default()
            }
            ScaleMsg::Scroll(dy) => self.state.borrow_mut().scroll(dy),
        };

        if update.should_redraw {
            self.drawing_area.queue_draw();
        }
        if let Some(weight) = update.weight_changed {
            log::debug!("Selected weight: {}", weight);
            let _ = sender.output(ScaleOutput::WeightChanged(weight));
        }
    }
}
