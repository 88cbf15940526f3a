use gtk::prelude::*;
use relm4::prelude::*;

use crate::models::Destination;

pub struct DestinationCardInit {
    pub destination: Destination,
    /// The catalog page shows the price-level badge; the personalized
    /// page only carries the score.
    pub show_price_level: bool,
}

/// One catalog card, shared by the destination and recommendation grids.
pub struct DestinationCard {
    destination: Destination,
    show_price_level: bool,
}

#[derive(Debug)]
pub enum DestinationCardMsg {}

#[derive(Debug)]
pub enum DestinationCardOutput {}

#[relm4::factory(pub)]
impl FactoryComponent for DestinationCard {
    type Init = DestinationCardInit;
    type Input = DestinationCardMsg;
    type Output = DestinationCardOutput;
    type CommandOutput = ();
    type ParentWidget = gtk::FlowBox;

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 4,
            set_width_request: 280,
            add_css_class: "card",
        }
    }

    fn init_model(init: Self::Init, _index: &DynamicIndex, _sender: FactorySender<Self>) -> Self {
        Self {
            destination: init.destination,
            show_price_level: init.show_price_level,
        }
    }

    fn init_widgets(
        &mut self,
        _index: &DynamicIndex,
        root: Self::Root,
        _returned_widget: &<Self::ParentWidget as relm4::factory::FactoryView>::ReturnedWidget,
        _sender: FactorySender<Self>,
    ) -> Self::Widgets {
        let title_label = gtk::Label::builder()
            .label(&self.destination.title)
            .halign(gtk::Align::Start)
            .wrap(true)
            .margin_start(10)
            .margin_end(10)
            .margin_top(8)
            .build();
        title_label.add_css_class("heading");
        root.append(&title_label);

        if let Some(city) = &self.destination.city {
            let city_label = gtk::Label::builder()
                .label(&city.name)
                .halign(gtk::Align::Start)
                .margin_start(10)
                .margin_end(10)
                .build();
            city_label.add_css_class("caption");
            city_label.add_css_class("dim-label");
            root.append(&city_label);
        }

        if let Some(description) = &self.destination.description {
            let description_label = gtk::Label::builder()
                .label(description)
                .halign(gtk::Align::Start)
                .xalign(0.0)
                .wrap(true)
                .wrap_mode(gtk::pango::WrapMode::WordChar)
                .margin_start(10)
                .margin_end(10)
                .build();
            root.append(&description_label);
        }

        let badges = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(8)
            .margin_start(10)
            .margin_end(10)
            .margin_top(4)
            .margin_bottom(8)
            .build();

        let score_label = gtk::Label::new(Some(&self.destination.score_label()));
        score_label.add_css_class("caption");
        score_label.add_css_class("accent");
        badges.append(&score_label);

        if self.show_price_level {
            let price_label = gtk::Label::new(Some(&self.destination.price_level_label()));
            price_label.add_css_class("caption");
            price_label.add_css_class("dim-label");
            badges.append(&price_label);
        }

        root.append(&badges);

        let widgets = view_output!();
        widgets
    }
}
