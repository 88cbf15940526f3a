use gtk::prelude::*;
use relm4::factory::FactoryVecDeque;
use relm4::prelude::*;

use crate::models::Destination;
use crate::ui::destination_card::{DestinationCard, DestinationCardInit};
use crate::ui::destinations_page::build_list_stack;

/// Personalized catalog: same three view states as the destination page,
/// fetched for the configured user.
pub struct RecommendationsPage {
    cards: FactoryVecDeque<DestinationCard>,
    stack: gtk::Stack,
}

#[derive(Debug)]
pub enum RecommendationsPageMsg {
    SetLoading,
    SetError,
    SetRecommendations(Vec<Destination>),
    RefreshClicked,
}

#[derive(Debug)]
pub enum RecommendationsPageOutput {
    Refresh,
}

#[relm4::component(pub)]
impl Component for RecommendationsPage {
    type Init = ();
    type Input = RecommendationsPageMsg;
    type Output = RecommendationsPageOutput;
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
                        set_label: "Recommandations",
                        set_halign: gtk::Align::Start,
                        add_css_class: "title-1",
                    },
                    gtk::Label {
                        set_label: "Destinations personnalisées selon vos préférences",
                        set_halign: gtk::Align::Start,
                        add_css_class: "dim-label",
                    },
                },

                gtk::Button {
                    set_icon_name: "view-refresh-symbolic",
                    set_tooltip_text: Some("Actualiser"),
                    set_valign: gtk::Align::Center,
                    add_css_class: "flat",
                    connect_clicked => RecommendationsPageMsg::RefreshClicked,
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
            RecommendationsPageMsg::SetLoading => {
                self.stack.set_visible_child_name("loading");
            }
            RecommendationsPageMsg::SetError => {
                self.stack.set_visible_child_name("error");
            }
            RecommendationsPageMsg::SetRecommendations(destinations) => {
                let mut guard = self.cards.guard();
                guard.clear();
                for destination in destinations {
                    guard.push_back(DestinationCardInit {
                        destination,
                        show_price_level: false,
                    });
                }
                drop(guard);
                self.stack.set_visible_child_name("ready");
            }
            RecommendationsPageMsg::RefreshClicked => {
                let _ = sender.output(RecommendationsPageOutput::Refresh);
            }
        }
    }
}
