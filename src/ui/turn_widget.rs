use gtk::prelude::*;
use relm4::prelude::*;

use crate::models::{ChatTurn, Role};

/// One transcript bubble. User turns sit on the right, assistant turns
/// on the left, following the usual chat layout.
pub struct TurnWidget {
    pub turn: ChatTurn,
}

#[derive(Debug)]
pub enum TurnWidgetMsg {}

#[derive(Debug)]
pub enum TurnWidgetOutput {}

#[relm4::factory(pub)]
impl FactoryComponent for TurnWidget {
    type Init = ChatTurn;
    type Input = TurnWidgetMsg;
    type Output = TurnWidgetOutput;
    type CommandOutput = ();
    type ParentWidget = gtk::Box;

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Horizontal,
        }
    }

    fn init_model(turn: Self::Init, _index: &DynamicIndex, _sender: FactorySender<Self>) -> Self {
        Self { turn }
    }

    fn init_widgets(
        &mut self,
        _index: &DynamicIndex,
        root: Self::Root,
        _returned_widget: &<Self::ParentWidget as relm4::factory::FactoryView>::ReturnedWidget,
        _sender: FactorySender<Self>,
    ) -> Self::Widgets {
        let is_user = self.turn.role == Role::User;

        let bubble = gtk::Box::builder()
            .orientation(gtk::Orientation::Vertical)
            .spacing(2)
            .build();
        bubble.add_css_class("card");

        let header = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(8)
            .margin_start(10)
            .margin_end(10)
            .margin_top(6)
            .build();

        let author_label = gtk::Label::builder()
            .label(if is_user { "Vous" } else { "Assistant" })
            .halign(gtk::Align::Start)
            .hexpand(true)
            .build();
        author_label.add_css_class("caption");
        author_label.add_css_class("dim-label");
        header.append(&author_label);

        let time_label = gtk::Label::builder()
            .label(self.turn.created_at.format("%H:%M").to_string())
            .halign(gtk::Align::End)
            .build();
        time_label.add_css_class("caption");
        time_label.add_css_class("dim-label");
        header.append(&time_label);

        bubble.append(&header);

        let text_label = gtk::Label::builder()
            .label(&self.turn.text)
            .halign(gtk::Align::Start)
            .xalign(0.0)
            .wrap(true)
            .wrap_mode(gtk::pango::WrapMode::WordChar)
            .max_width_chars(50)
            .selectable(true)
            .margin_start(10)
            .margin_end(10)
            .margin_bottom(8)
            .build();
        bubble.append(&text_label);

        if is_user {
            root.set_halign(gtk::Align::End);
            root.set_margin_start(48);
        } else {
            root.set_halign(gtk::Align::Start);
            root.set_margin_end(48);
        }
        root.append(&bubble);

        let widgets = view_output!();
        widgets
    }
}
