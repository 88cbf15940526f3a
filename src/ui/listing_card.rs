use gtk::prelude::*;
use relm4::prelude::*;

use crate::models::Listing;

/// One travel offer in the side panel, refreshed with each reply.
pub struct ListingCard {
    pub listing: Listing,
}

#[derive(Debug)]
pub enum ListingCardMsg {}

#[derive(Debug)]
pub enum ListingCardOutput {}

#[relm4::factory(pub)]
impl FactoryComponent for ListingCard {
    type Init = Listing;
    type Input = ListingCardMsg;
    type Output = ListingCardOutput;
    type CommandOutput = ();
    type ParentWidget = gtk::Box;

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 2,
            add_css_class: "card",
        }
    }

    fn init_model(listing: Self::Init, _index: &DynamicIndex, _sender: FactorySender<Self>) -> Self {
        Self { listing }
    }

    fn init_widgets(
        &mut self,
        _index: &DynamicIndex,
        root: Self::Root,
        _returned_widget: &<Self::ParentWidget as relm4::factory::FactoryView>::ReturnedWidget,
        _sender: FactorySender<Self>,
    ) -> Self::Widgets {
        let name_label = gtk::Label::builder()
            .label(&self.listing.name)
            .halign(gtk::Align::Start)
            .wrap(true)
            .margin_start(10)
            .margin_end(10)
            .margin_top(8)
            .build();
        name_label.add_css_class("heading");
        root.append(&name_label);

        let price_label = gtk::Label::builder()
            .label(format!("Prix : {}", self.listing.price_label()))
            .halign(gtk::Align::Start)
            .margin_start(10)
            .margin_end(10)
            .build();
        root.append(&price_label);

        let rating_label = gtk::Label::builder()
            .label(format!("Note : {} ★", self.listing.rating_label()))
            .halign(gtk::Align::Start)
            .margin_start(10)
            .margin_end(10)
            .build();
        root.append(&rating_label);

        let link = gtk::LinkButton::builder()
            .uri(&self.listing.url)
            .label(self.listing.link_label())
            .halign(gtk::Align::Start)
            .margin_start(4)
            .margin_bottom(4)
            .build();
        root.append(&link);

        let widgets = view_output!();
        widgets
    }
}
