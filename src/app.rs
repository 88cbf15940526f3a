use std::sync::Arc;

use adw::prelude::*;
use relm4::prelude::*;

use crate::api::{ApiError, AssistantReply, HealthStatus, TravelApi};
use crate::config;
use crate::models::{Destination, DetectedPreferences};
use crate::services::ChatSession;
use crate::ui::chat_page::{ChatPage, ChatPageMsg, ChatPageOutput};
use crate::ui::destinations_page::{
    DestinationsPage, DestinationsPageMsg, DestinationsPageOutput,
};
use crate::ui::recommendations_page::{
    RecommendationsPage, RecommendationsPageMsg, RecommendationsPageOutput,
};

/// Application shell: owns the backend binding and the chat session,
/// dispatches every HTTP call, and routes settles back to the pages.
pub struct App {
    api: Arc<TravelApi>,
    session: ChatSession,
    user_id: i64,
    destinations_page: Controller<DestinationsPage>,
    recommendations_page: Controller<RecommendationsPage>,
    chat_page: Controller<ChatPage>,
    // Stale-response guards for the list pages; chat uses the session's
    // own generation counter.
    destinations_seq: u64,
    recommendations_seq: u64,
}

#[derive(Debug)]
pub enum AppMsg {
    SendChat(String),
    ResetChat,
    ReloadDestinations,
    ReloadRecommendations,
    ShowAbout,
}

#[derive(Debug)]
pub enum AppCmd {
    ChatSettled {
        generation: u64,
        result: Result<AssistantReply, ApiError>,
    },
    DestinationsLoaded {
        seq: u64,
        result: Result<Vec<Destination>, ApiError>,
    },
    RecommendationsLoaded {
        seq: u64,
        result: Result<Vec<Destination>, ApiError>,
    },
    HealthChecked(Result<HealthStatus, ApiError>),
}

#[relm4::component(pub, async)]
impl AsyncComponent for App {
    type Init = ();
    type Input = AppMsg;
    type Output = ();
    type CommandOutput = AppCmd;

    view! {
        adw::ApplicationWindow {
            set_title: Some(config::APP_NAME),
            set_default_width: 1100,
            set_default_height: 760,

            #[local_ref]
            toolbar_view -> adw::ToolbarView {},
        }
    }

    async fn init(
        _init: Self::Init,
        root: Self::Root,
        sender: AsyncComponentSender<Self>,
    ) -> AsyncComponentParts<Self> {
        let api = match TravelApi::new(&config::backend_base_url()) {
            Ok(api) => Arc::new(api),
            Err(e) => {
                tracing::error!("{e:#}; falling back to {}", config::DEFAULT_BASE_URL);
                Arc::new(
                    TravelApi::new(config::DEFAULT_BASE_URL)
                        .expect("default backend address is valid"),
                )
            }
        };
        let user_id = config::user_id();

        let destinations_page = DestinationsPage::builder()
            .launch(())
            .forward(sender.input_sender(), |output| match output {
                DestinationsPageOutput::Refresh => AppMsg::ReloadDestinations,
            });

        let recommendations_page = RecommendationsPage::builder()
            .launch(())
            .forward(sender.input_sender(), |output| match output {
                RecommendationsPageOutput::Refresh => AppMsg::ReloadRecommendations,
            });

        let chat_page = ChatPage::builder()
            .launch(())
            .forward(sender.input_sender(), |output| match output {
                ChatPageOutput::Send(text) => AppMsg::SendChat(text),
                ChatPageOutput::Reset => AppMsg::ResetChat,
            });

        let session = ChatSession::new();
        chat_page.emit(ChatPageMsg::ResetTo(session.turns()[0].clone()));

        // View stack with the three pages
        let stack = adw::ViewStack::new();
        let page = stack.add_titled(
            destinations_page.widget(),
            Some("destinations"),
            "Destinations",
        );
        page.set_icon_name(Some("mark-location-symbolic"));
        let page = stack.add_titled(
            recommendations_page.widget(),
            Some("recommendations"),
            "Recommandations",
        );
        page.set_icon_name(Some("starred-symbolic"));
        let page = stack.add_titled(chat_page.widget(), Some("chat"), "Chat IA");
        page.set_icon_name(Some("chat-message-new-symbolic"));

        let switcher = adw::ViewSwitcher::builder()
            .stack(&stack)
            .policy(adw::ViewSwitcherPolicy::Wide)
            .build();

        let header = adw::HeaderBar::new();
        header.set_title_widget(Some(&switcher));

        let menu = gio::Menu::new();
        menu.append(Some("À propos de Rihla"), Some("app.about"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu)
            .build();
        header.pack_end(&menu_button);

        let toolbar_view = adw::ToolbarView::new();
        toolbar_view.add_top_bar(&header);
        toolbar_view.set_content(Some(&stack));

        let model = App {
            api,
            session,
            user_id,
            destinations_page,
            recommendations_page,
            chat_page,
            destinations_seq: 0,
            recommendations_seq: 0,
        };

        let widgets = view_output!();

        let app = relm4::main_adw_application();
        let sender_about = sender.input_sender().clone();
        let about_action = gio::SimpleAction::new("about", None);
        about_action.connect_activate(move |_, _| {
            sender_about.send(AppMsg::ShowAbout).unwrap();
        });
        app.add_action(&about_action);

        // Initial catalog loads plus one startup health probe.
        sender.input(AppMsg::ReloadDestinations);
        sender.input(AppMsg::ReloadRecommendations);
        let api_health = model.api.clone();
        sender.command(move |out, _| {
            Box::pin(async move {
                out.send(AppCmd::HealthChecked(api_health.health().await))
                    .unwrap();
            })
        });

        AsyncComponentParts { model, widgets }
    }

    async fn update(
        &mut self,
        msg: Self::Input,
        sender: AsyncComponentSender<Self>,
        root: &Self::Root,
    ) {
        match msg {
            AppMsg::SendChat(text) => match self.session.begin_send(&text) {
                Some(send) => {
                    self.chat_page.emit(ChatPageMsg::AppendTurn(send.user_turn));
                    self.chat_page.emit(ChatPageMsg::SetPending(true));

                    let api = self.api.clone();
                    let user_id = self.user_id;
                    let generation = send.generation;
                    let message = send.message;
                    sender.command(move |out, _| {
                        Box::pin(async move {
                            let result = api.chat(&message, user_id).await;
                            out.send(AppCmd::ChatSettled { generation, result }).unwrap();
                        })
                    });
                }
                None => {
                    tracing::debug!("chat input dropped (blank or a send is pending)");
                }
            },
            AppMsg::ResetChat => {
                let greeting = self.session.reset();
                self.chat_page.emit(ChatPageMsg::SetPending(false));
                self.chat_page.emit(ChatPageMsg::ResetTo(greeting));
                self.chat_page.emit(ChatPageMsg::ReplaceListings(Vec::new()));
                self.chat_page
                    .emit(ChatPageMsg::ReplacePreferences(DetectedPreferences::default()));

                // Best-effort: the local reset stands whether or not the
                // backend hears about it.
                let api = self.api.clone();
                let user_id = self.user_id;
                sender.command(move |_out, _| {
                    Box::pin(async move {
                        if let Err(e) = api.reset(user_id).await {
                            tracing::warn!("conversation reset not acknowledged: {e}");
                        }
                    })
                });
            }
            AppMsg::ReloadDestinations => {
                self.destinations_seq += 1;
                let seq = self.destinations_seq;
                self.destinations_page.emit(DestinationsPageMsg::SetLoading);

                let api = self.api.clone();
                sender.command(move |out, _| {
                    Box::pin(async move {
                        let result = api.destinations().await;
                        out.send(AppCmd::DestinationsLoaded { seq, result }).unwrap();
                    })
                });
            }
            AppMsg::ReloadRecommendations => {
                self.recommendations_seq += 1;
                let seq = self.recommendations_seq;
                self.recommendations_page
                    .emit(RecommendationsPageMsg::SetLoading);

                let api = self.api.clone();
                let user_id = self.user_id;
                sender.command(move |out, _| {
                    Box::pin(async move {
                        let result = api.recommendations(user_id).await;
                        out.send(AppCmd::RecommendationsLoaded { seq, result })
                            .unwrap();
                    })
                });
            }
            AppMsg::ShowAbout => {
                crate::ui::window::create_about_dialog(root);
            }
        }
    }

    async fn update_cmd(
        &mut self,
        msg: Self::CommandOutput,
        _sender: AsyncComponentSender<Self>,
        _root: &Self::Root,
    ) {
        match msg {
            AppCmd::ChatSettled { generation, result } => match result {
                Ok(reply) => {
                    if let Some(update) = self.session.apply_reply(generation, reply) {
                        self.chat_page
                            .emit(ChatPageMsg::AppendTurn(update.assistant_turn));
                        self.chat_page
                            .emit(ChatPageMsg::ReplaceListings(update.listings));
                        self.chat_page
                            .emit(ChatPageMsg::ReplacePreferences(update.preferences));
                        self.chat_page.emit(ChatPageMsg::SetPending(false));
                    }
                }
                Err(error) => {
                    tracing::warn!("chat request failed: {error}");
                    if let Some(turn) = self.session.apply_failure(generation, &error) {
                        self.chat_page.emit(ChatPageMsg::AppendTurn(turn));
                        self.chat_page.emit(ChatPageMsg::SetPending(false));
                    }
                }
            },
            AppCmd::DestinationsLoaded { seq, result } => {
                if seq != self.destinations_seq {
                    tracing::debug!("discarding stale destination response");
                    return;
                }
                match result {
                    Ok(destinations) => {
                        self.destinations_page
                            .emit(DestinationsPageMsg::SetDestinations(destinations));
                    }
                    Err(error) => {
                        tracing::error!("failed to load destinations: {error}");
                        self.destinations_page.emit(DestinationsPageMsg::SetError);
                    }
                }
            }
            AppCmd::RecommendationsLoaded { seq, result } => {
                if seq != self.recommendations_seq {
                    tracing::debug!("discarding stale recommendation response");
                    return;
                }
                match result {
                    Ok(recommendations) => {
                        self.recommendations_page
                            .emit(RecommendationsPageMsg::SetRecommendations(recommendations));
                    }
                    Err(error) => {
                        tracing::error!("failed to load recommendations: {error}");
                        self.recommendations_page
                            .emit(RecommendationsPageMsg::SetError);
                    }
                }
            }
            AppCmd::HealthChecked(result) => match result {
                Ok(health) => {
                    tracing::info!(
                        status = %health.status,
                        model_loaded = health.model_loaded,
                        active_conversations = health.active_conversations,
                        "backend reachable"
                    );
                }
                Err(error) => {
                    tracing::warn!("backend health probe failed: {error}");
                }
            },
        }
    }
}
