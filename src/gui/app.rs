use crate::config::{self, Config, RangeOverrides};
use crate::events::AppEvent;
use crate::gui::scale::{ScaleOutput, ScaleState, ScaleWidget};
use crate::gui::theme;
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppInit {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub overrides: RangeOverrides,
    pub state: ScaleState,
    /// Last selected weight, readable after the app exits.
    pub selection: Rc<Cell<i32>>,
    pub events: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub weight: i32,
    pub selection: Rc<Cell<i32>>,
    pub config_path: Option<PathBuf>,
    pub overrides: RangeOverrides,
    pub scale: Controller<ScaleWidget>,
    pub root: gtk::ApplicationWindow,
    pub container: gtk::Box,
}

#[derive(Debug)]
pub enum AppMsg {
    WeightChanged(i32),
    ConfigReload,
    Close,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn launch_scale(state: ScaleState, sender: &ComponentSender<Self>) -> Controller<ScaleWidget> {
        ScaleWidget::builder()
            .launch(state)
            .forward(sender.input_sender(), |output| match output {
                ScaleOutput::WeightChanged(weight) => AppMsg::WeightChanged(weight),
            })
    }

    fn set_weight(&mut self, weight: i32) {
        self.weight = weight;
        self.selection.set(weight);
    }

    /// Replaces the scale with a fresh instance built from the config file.
    fn reload(&mut self, sender: &ComponentSender<Self>) {
        let Some(path) = &self.config_path else {
            return;
        };
        let mut new_config = match config::load_config(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };
        self.overrides.apply(&mut new_config);

        let state = match ScaleState::from_config(&new_config) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Keeping current scale: {}", e);
                return;
            }
        };

        self.set_weight(state.selected_weight());
        self.container.remove(self.scale.widget());
        self.scale = Self::launch_scale(state, sender);
        self.container.append(self.scale.widget());
        log::info!("Configuration reloaded");
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Weight Picker"),
            add_css_class: "weightpicker-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "container"]
            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,

                gtk::Label {
                    add_css_class: "weight-label",
                    #[watch]
                    set_label: &model.weight.to_string(),
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            config_path,
            overrides,
            state,
            selection,
            events,
        } = init;

        theme::load_css();
        window::place_at_bottom(&root, &config.window);

        let weight = state.selected_weight();
        selection.set(weight);

        let model = AppModel {
            weight,
            selection,
            config_path,
            overrides,
            scale: Self::launch_scale(state, &sender),
            root: root.clone(),
            container: gtk::Box::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.container = widgets.container.clone();
        model.container.append(model.scale.widget());

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::WeightChanged(weight) => self.set_weight(weight),
            AppMsg::ConfigReload => self.reload(&sender),
            AppMsg::Close => self.root.close(),
        }
    }
}
