use adw::prelude::*;

use crate::config;

pub fn create_about_dialog(parent: &adw::ApplicationWindow) {
    let about = adw::AboutWindow::builder()
        .application_name(config::APP_NAME)
        .version(config::VERSION)
        .developer_name("Rihla Contributors")
        .license_type(gtk::License::Gpl30)
        .comments("A native Linux desktop travel assistant for GNOME")
        .application_icon(config::APP_ID)
        .build();
    about.set_transient_for(Some(parent));
    about.present();
}
