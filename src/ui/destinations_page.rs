use gtk::prelude::*;
use relm4::factory::FactoryVecDeque;
use relm4::prelude::*;

use crate::models::Destination;
use crate::ui::destination_card::{DestinationCard, DestinationCardInit};

/// Catalog page: one GET, three view states (loading / error / grid).
pub struct DestinationsPage {
    cards: FactoryVecDeque<DestinationCard>,
    stack: gtk::Stack,
}

#[derive(Debug)]
pub enum DestinationsPageMsg {
    SetLoading,
    SetError,
    SetDestinations(Vec<Destination>),
    RefreshClicked,
}

#[derive(Debug)]
pub enum DestinationsPageOutput {
    Refresh,
}

#[relm4::component(pub)]
impl Component for DestinationsPage {
    type Init = ();
    type Input = DestinationsPageMsg;
    type Output = DestinationsPageOutput;
    type CommandOutput = ();

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 4,
            set_margin_all: 16,

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 8,

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 4,
                    set_hexpand: true,

                    gtk::Label {
                        set_label: "Destinations",
                        set_halign: gtk::Align::Start,
                        add_css_class: "title-1",
                    },
                    gtk::Label {
                        set_label: "Découvrez nos destinations populaires",
                        set_halign: gtk::Align::Start,
                        add_css_class: "dim-label",
                    },
                },

                gtk::Button {
                    set_icon_name: "view-refresh-symbolic",
                    set_tooltip_text: Some("Actualiser"),
                    set_valign: gtk::Align::Center,
                    add_css_class: "flat",
                    connect_clicked => DestinationsPageMsg::RefreshClicked,
                },
            },

            #[local_ref]
            stack -> gtk::Stack {
                set_vexpand: true,
                set_margin_top: 8,
            },
        }
    }

    fn init(
        _init: Self::Init,
        root: Self::Root,
        _sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let grid = gtk::FlowBox::builder()
            .selection_mode(gtk::SelectionMode::None)
            .homogeneous(true)
            .column_spacing(12)
            .row_spacing(12)
            .min_children_per_line(1)
            .max_children_per_line(3)
            .valign(gtk::Align::Start)
            .build();
        let cards = FactoryVecDeque::builder().launch(grid).detach();

        let stack = build_list_stack(cards.widget());

        let model = Self {
            cards,
            stack: stack.clone(),
        };

        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            DestinationsPageMsg::SetLoading => {
                self.stack.set_visible_child_name("loading");
            }
            DestinationsPageMsg::SetError => {
                self.stack.set_visible_child_name("error");
            }
            DestinationsPageMsg::SetDestinations(destinations) => {
                let mut guard = self.cards.guard();
                guard.clear();
                for destination in destinations {
                    guard.push_back(DestinationCardInit {
                        destination,
                        show_price_level: true,
                    });
                }
                drop(guard);
                self.stack.set_visible_child_name("ready");
            }
            DestinationsPageMsg::RefreshClicked => {
                let _ = sender.output(DestinationsPageOutput::Refresh);
            }
        }
    }
}

/// Loading / error / ready stack shared by both list pages.
pub fn build_list_stack(grid: &gtk::FlowBox) -> gtk::Stack {
    let stack = gtk::Stack::new();

    let loading_box = gtk::Box::builder()
        .orientation(gtk::Orientation::Vertical)
        .spacing(12)
        .halign(gtk::Align::Center)
        .valign(gtk::Align::Center)
        .build();
    let spinner = gtk::Spinner::builder().spinning(true).build();
    spinner.set_size_request(32, 32);
    loading_box.append(&spinner);
    let loading_label = gtk::Label::new(Some("Chargement..."));
    loading_label.add_css_class("dim-label");
    loading_box.append(&loading_label);
    stack.add_named(&loading_box, Some("loading"));

    let error_page = adw::StatusPage::new();
    error_page.set_icon_name(Some("dialog-error-symbolic"));
    error_page.set_title("Erreur de chargement");
    error_page.set_description(Some("Impossible de contacter le serveur."));
    stack.add_named(&error_page, Some("error"));

    let scroll = gtk::ScrolledWindow::new();
    scroll.set_hscrollbar_policy(gtk::PolicyType::Never);
    scroll.set_child(Some(grid));
    stack.add_named(&scroll, Some("ready"));

    stack.set_visible_child_name("loading");
    stack
}
