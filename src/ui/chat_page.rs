use gtk::prelude::*;
use relm4::factory::FactoryVecDeque;
use relm4::prelude::*;

use crate::models::{ChatTurn, DetectedPreferences, Listing};
use crate::ui::listing_card::ListingCard;
use crate::ui::turn_widget::TurnWidget;

/// Canned prompts offered below the input, prefilling it on click.
const SUGGESTIONS: [&str; 5] = [
    "Je cherche un voyage pas cher",
    "Je veux aller à la plage",
    "Je préfère la culture et les musées",
    "Budget luxe pour Paris",
    "Nature et randonnée",
];

/// Conversation page: transcript on the left, current offers and
/// detected preferences on the right. All state transitions come from
/// the shell; this component only renders and forwards user intent.
pub struct ChatPage {
    turns: FactoryVecDeque<TurnWidget>,
    listings: FactoryVecDeque<ListingCard>,
    pending: bool,
    listing_count: usize,
    has_preferences: bool,
    entry: gtk::Entry,
    transcript_scroll: gtk::ScrolledWindow,
    preference_badges: gtk::FlowBox,
}

#[derive(Debug)]
pub enum ChatPageMsg {
    // User intent
    SendClicked,
    SuggestionClicked(&'static str),
    ResetClicked,
    // Driven by the shell
    AppendTurn(ChatTurn),
    SetPending(bool),
    ReplaceListings(Vec<Listing>),
    ReplacePreferences(DetectedPreferences),
    ResetTo(ChatTurn),
    // Internal
    ScrollToBottom,
}

#[derive(Debug)]
pub enum ChatPageOutput {
    Send(String),
    Reset,
}

#[relm4::component(pub)]
impl Component for ChatPage {
    type Init = ();
    type Input = ChatPageMsg;
    type Output = ChatPageOutput;
    type CommandOutput = ();

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Horizontal,
            set_spacing: 16,
            set_margin_all: 16,

            // Conversation column
            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,
                set_hexpand: true,

                gtk::Label {
                    set_label: "Conversation",
                    set_halign: gtk::Align::Start,
                    add_css_class: "title-4",
                },

                #[local_ref]
                transcript_scroll -> gtk::ScrolledWindow {
                    set_vexpand: true,
                    set_hscrollbar_policy: gtk::PolicyType::Never,

                    #[local_ref]
                    turn_list -> gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 8,
                        set_margin_all: 4,
                    },
                },

                // Pending indicator
                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 8,
                    set_margin_start: 4,
                    #[watch]
                    set_visible: model.pending,

                    gtk::Spinner {
                        set_spinning: true,
                    },
                    gtk::Label {
                        set_label: "L'assistant réfléchit...",
                        add_css_class: "dim-label",
                    },
                },

                // Input row
                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 8,

                    #[local_ref]
                    entry -> gtk::Entry {
                        set_hexpand: true,
                        set_placeholder_text: Some("Tapez votre message..."),
                        #[watch]
                        set_sensitive: !model.pending,
                        connect_activate => ChatPageMsg::SendClicked,
                    },

                    gtk::Button {
                        set_label: "Envoyer",
                        add_css_class: "suggested-action",
                        #[watch]
                        set_sensitive: !model.pending,
                        connect_clicked => ChatPageMsg::SendClicked,
                    },

                    gtk::Button {
                        set_icon_name: "edit-clear-all-symbolic",
                        set_tooltip_text: Some("Nouvelle conversation"),
                        connect_clicked => ChatPageMsg::ResetClicked,
                    },
                },

                #[local_ref]
                suggestion_box -> gtk::FlowBox {
                    set_selection_mode: gtk::SelectionMode::None,
                    set_column_spacing: 4,
                    set_row_spacing: 4,
                    set_halign: gtk::Align::Start,
                },
            },

            gtk::Separator {
                set_orientation: gtk::Orientation::Vertical,
            },

            // Side panel
            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,
                set_width_request: 320,

                gtk::Label {
                    set_label: "Recommandations IA",
                    set_halign: gtk::Align::Start,
                    add_css_class: "title-4",
                },

                gtk::Label {
                    set_label: "Commencez une conversation pour voir les recommandations",
                    set_halign: gtk::Align::Start,
                    set_wrap: true,
                    add_css_class: "dim-label",
                    #[watch]
                    set_visible: model.listing_count == 0,
                },

                gtk::ScrolledWindow {
                    set_vexpand: true,
                    set_hscrollbar_policy: gtk::PolicyType::Never,

                    #[local_ref]
                    listing_list -> gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 8,
                    },
                },

                gtk::Label {
                    set_label: "Préférences détectées",
                    set_halign: gtk::Align::Start,
                    add_css_class: "title-4",
                },

                gtk::Label {
                    set_label: "Aucune préférence détectée pour le moment",
                    set_halign: gtk::Align::Start,
                    set_wrap: true,
                    add_css_class: "dim-label",
                    #[watch]
                    set_visible: !model.has_preferences,
                },

                #[local_ref]
                preference_badges -> gtk::FlowBox {
                    set_selection_mode: gtk::SelectionMode::None,
                    set_column_spacing: 6,
                    set_row_spacing: 6,
                    set_halign: gtk::Align::Start,
                },
            },
        }
    }

    fn init(
        _init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let turns = FactoryVecDeque::builder().launch(gtk::Box::default()).detach();
        let listings = FactoryVecDeque::builder().launch(gtk::Box::default()).detach();

        let entry = gtk::Entry::new();
        let transcript_scroll = gtk::ScrolledWindow::new();
        let preference_badges = gtk::FlowBox::new();
        let suggestion_box = gtk::FlowBox::new();

        for suggestion in SUGGESTIONS {
            let chip = gtk::Button::builder().label(suggestion).build();
            chip.add_css_class("pill");
            let sender_chip = sender.input_sender().clone();
            chip.connect_clicked(move |_| {
                sender_chip
                    .send(ChatPageMsg::SuggestionClicked(suggestion))
                    .unwrap();
            });
            suggestion_box.append(&chip);
        }

        let model = Self {
            turns,
            listings,
            pending: false,
            listing_count: 0,
            has_preferences: false,
            entry: entry.clone(),
            transcript_scroll: transcript_scroll.clone(),
            preference_badges: preference_badges.clone(),
        };

        let turn_list = model.turns.widget();
        let listing_list = model.listings.widget();
        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            ChatPageMsg::SendClicked => {
                let text = self.entry.text().to_string();
                if text.trim().is_empty() {
                    return;
                }
                self.entry.set_text("");
                let _ = sender.output(ChatPageOutput::Send(text));
            }
            ChatPageMsg::SuggestionClicked(text) => {
                self.entry.set_text(text);
                self.entry.set_position(-1);
                self.entry.grab_focus();
            }
            ChatPageMsg::ResetClicked => {
                let _ = sender.output(ChatPageOutput::Reset);
            }
            ChatPageMsg::AppendTurn(turn) => {
                let mut guard = self.turns.guard();
                guard.push_back(turn);
                drop(guard);
                sender.input(ChatPageMsg::ScrollToBottom);
            }
            ChatPageMsg::SetPending(pending) => {
                self.pending = pending;
            }
            ChatPageMsg::ReplaceListings(listings) => {
                self.listing_count = listings.len();
                let mut guard = self.listings.guard();
                guard.clear();
                for listing in listings {
                    guard.push_back(listing);
                }
            }
            ChatPageMsg::ReplacePreferences(preferences) => {
                self.has_preferences = !preferences.is_empty();
                self.rebuild_preference_badges(&preferences);
            }
            ChatPageMsg::ResetTo(greeting) => {
                let mut guard = self.turns.guard();
                guard.clear();
                guard.push_back(greeting);
            }
            ChatPageMsg::ScrollToBottom => {
                let adj = self.transcript_scroll.vadjustment();
                glib::idle_add_local_once(move || {
                    adj.set_value(adj.upper());
                });
            }
        }
    }
}

impl ChatPage {
    fn rebuild_preference_badges(&self, preferences: &DetectedPreferences) {
        while let Some(child) = self.preference_badges.first_child() {
            self.preference_badges.remove(&child);
        }

        let mut badges = Vec::new();
        if let Some(budget) = &preferences.budget {
            badges.push(format!("Budget : {budget}"));
        }
        if let Some(destination) = &preferences.destination {
            badges.push(format!("Destination : {destination}"));
        }
        for interest in &preferences.interests {
            badges.push(format!("Intérêt : {interest}"));
        }

        for badge in badges {
            let label = gtk::Label::new(Some(&badge));
            label.add_css_class("caption");
            label.add_css_class("accent");
            label.add_css_class("card");
            self.preference_badges.append(&label);
        }
    }
}
