use crate::config::{Cli, ClientConfig, ConfigError, Settings};
use crate::logic::actions::delete_prompt;
use crate::logic::{ClientContext, HostActions, HttpApi, SharedState, StatusPoller, lock_state};
use crate::model::{AppState, Host, MacAddress, Politeness, Severity, is_valid_hostname};
use eframe::egui;
use eframe::egui::{Color32, RichText};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tr::tr;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start the network runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub struct EguiWol {
    pub(crate) state: SharedState,
    pub(crate) actions: Arc<HostActions>,
    runtime: Handle,
    settings: Settings,
    pub input_name: String,
    pub input_mac: String,
    pub input_address: String,
    pub input_custom_mac: String,
    pub(crate) deleting_host: Option<Host>,
    /// Highest notification id already announced to the OS.
    announced_up_to: Option<u64>,
}

/// Helper for application-specific colors adapted for light/dark themes.
struct WolVisuals {
    pub is_dark: bool,
}

impl WolVisuals {
    fn from_ctx(ctx: &egui::Context) -> Self {
        Self {
            is_dark: ctx.style().visuals.dark_mode,
        }
    }

    fn alert_fill(&self, severity: Severity) -> Color32 {
        match (severity, self.is_dark) {
            (Severity::Success, true) => Color32::from_rgb(5, 54, 34),
            (Severity::Success, false) => Color32::from_rgb(209, 231, 221),
            (Severity::Warning, true) => Color32::from_rgb(51, 39, 1),
            (Severity::Warning, false) => Color32::from_rgb(255, 243, 205),
            (Severity::Danger, true) => Color32::from_rgb(44, 11, 14),
            (Severity::Danger, false) => Color32::from_rgb(248, 215, 218),
        }
    }

    fn alert_text(&self, severity: Severity) -> Color32 {
        match (severity, self.is_dark) {
            (Severity::Success, true) => Color32::from_rgb(117, 183, 152),
            (Severity::Success, false) => Color32::from_rgb(10, 54, 34),
            (Severity::Warning, true) => Color32::from_rgb(255, 218, 106),
            (Severity::Warning, false) => Color32::from_rgb(102, 77, 3),
            (Severity::Danger, true) => Color32::from_rgb(234, 134, 143),
            (Severity::Danger, false) => Color32::from_rgb(88, 21, 28),
        }
    }

    fn status_color(&self, online: Option<bool>) -> Color32 {
        match online {
            Some(true) if self.is_dark => Color32::from_rgb(86, 180, 233), // Sky Blue
            Some(true) => Color32::from_rgb(0, 114, 178),                  // Blue
            Some(false) => Color32::from_rgb(213, 94, 0),                  // Vermilion
            None if self.is_dark => Color32::from_gray(160),
            None => Color32::from_gray(90),
        }
    }
}

impl EguiWol {
    /// Starts the network thread: loads the host list, then polls statuses.
    pub fn new(cc: &eframe::CreationContext<'_>, cli: &Cli) -> Result<Self, StartupError> {
        let persisted: Option<Settings> = cc
            .storage
            .and_then(|storage| storage.get_string(eframe::APP_KEY))
            .and_then(|serialized| serde_json::from_str(&serialized).ok());
        let config = ClientConfig::resolve(cli, persisted)?;
        log::info!("Using Wake-on-LAN server at {}", config.server_url);

        let state = Arc::new(Mutex::new(AppState::default()));
        let ctx = ClientContext::new(Arc::new(HttpApi::new(&config.server_url)), state);
        let actions = Arc::new(HostActions::new(ctx.clone(), config.wake_hold));
        let poller = StatusPoller::new(ctx, config.poll_interval);

        // One cooperative thread runs every request; the UI only spawns onto it.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let handle = runtime.handle().clone();
        std::thread::Builder::new()
            .name("wol-network".to_string())
            .spawn(move || runtime.block_on(poller.run()))?;

        let mut app = Self::from_actions(actions, handle);
        app.settings = config.settings();
        Ok(app)
    }

    pub fn from_actions(actions: Arc<HostActions>, runtime: Handle) -> Self {
        Self {
            state: actions.context().state.clone(),
            actions,
            runtime,
            settings: Settings::default(),
            input_name: String::new(),
            input_mac: String::new(),
            input_address: String::new(),
            input_custom_mac: String::new(),
            deleting_host: None,
            announced_up_to: None,
        }
    }

    fn spawn_wake(&self, mac: String, name: Option<String>) {
        let actions = self.actions.clone();
        self.runtime.spawn(async move {
            actions.wake(&mac, name.as_deref()).await;
        });
    }

    fn spawn_delete(&self, host: Host) {
        let actions = self.actions.clone();
        // The confirmation dialog has already been accepted.
        self.runtime.spawn(async move {
            actions.delete_host(&host.mac, &host.name, |_| true).await;
        });
    }

    fn spawn_reload(&self) {
        let actions = self.actions.clone();
        self.runtime.spawn(async move {
            actions.reload_view().await;
        });
    }

    /// Asks the OS for attention once for every new assertive notification.
    fn announce_new_alerts(&mut self, ctx: &egui::Context) {
        if self.take_attention_request() {
            ctx.send_viewport_cmd(egui::ViewportCommand::RequestUserAttention(
                egui::UserAttentionType::Informational,
            ));
        }
    }

    /// Marks every current notification as announced. Returns `true` if any
    /// of the newly seen ones is assertive.
    fn take_attention_request(&mut self) -> bool {
        let (newest, assertive) = {
            let state = lock_state(&self.state);
            let fresh = state
                .notifications
                .iter()
                .filter(|n| self.announced_up_to.is_none_or(|last| n.id > last));
            fresh.fold((None, false), |(newest, assertive), n| {
                (
                    Some(newest.map_or(n.id, |id: u64| id.max(n.id))),
                    assertive || n.severity.politeness() == Politeness::Assertive,
                )
            })
        };
        if let Some(newest) = newest {
            self.announced_up_to = Some(newest);
        }
        assertive
    }

    fn alert_region(&mut self, ui: &mut egui::Ui, visuals: &WolVisuals) {
        let notifications = lock_state(&self.state).notifications.clone();
        let mut dismissed = Vec::new();

        for notification in &notifications {
            egui::Frame::new()
                .fill(visuals.alert_fill(notification.severity))
                .corner_radius(egui::CornerRadius::same(4))
                .inner_margin(egui::Margin::same(6))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let color = visuals.alert_text(notification.severity);
                        ui.label(
                            RichText::new(notification.created.format("%H:%M:%S").to_string())
                                .monospace()
                                .color(color),
                        );
                        ui.label(RichText::new(&notification.message).color(color));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("x").on_hover_text(tr!("Close alert")).clicked() {
                                dismissed.push(notification.id);
                            }
                        });
                    });
                });
        }

        if !dismissed.is_empty() {
            let mut state = lock_state(&self.state);
            for id in dismissed {
                state.dismiss_notification(id);
            }
        }
    }

    pub fn ui_layout(&mut self, ctx: &egui::Context) {
        self.announce_new_alerts(ctx);
        let visuals = WolVisuals::from_ctx(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.button(tr!("Add host")).clicked() {
                        lock_state(&self.state).add_host_dialog_open = true;
                    }
                    if ui.button(tr!("Refresh")).clicked() {
                        self.spawn_reload();
                    }

                    ui.separator();

                    let custom = ui.add(
                        egui::TextEdit::singleline(&mut self.input_custom_mac)
                            .char_limit(17)
                            .hint_text(tr!("MAC address"))
                            .desired_width(8.0 * 17.0),
                    );
                    let custom_mac = self.input_custom_mac.trim().parse::<MacAddress>().ok();

                    // Wake on button click or on Enter in the field
                    let clicked = ui
                        .add_enabled(custom_mac.is_some(), egui::Button::new(tr!("Wake MAC")))
                        .clicked();
                    let entered =
                        custom.lost_focus() && custom.ctx.input(|i| i.key_pressed(egui::Key::Enter));
                    if let Some(mac) = custom_mac
                        && (clicked || entered)
                    {
                        self.spawn_wake(mac.to_string(), None);
                        self.input_custom_mac.clear();
                    }

                    // Theme switch (right), defaults to following the OS
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let mut theme = ui.ctx().options(|o| o.theme_preference);
                        let old_theme = theme;
                        theme.radio_buttons(ui);
                        if theme != old_theme {
                            ui.ctx().options_mut(|o| o.theme_preference = theme);
                        }
                    });
                });

                ui.separator();
                self.alert_region(ui, &visuals);
                ui.add_space(4.0);

                // Snapshot, so the lock is not held while drawing
                let (hosts, statuses, buttons) = {
                    let state = lock_state(&self.state);
                    (
                        state.hosts.clone(),
                        state.statuses.clone(),
                        state.wake_buttons.clone(),
                    )
                };

                if hosts.is_empty() {
                    ui.label(tr!("No hosts configured"));
                }

                egui::Grid::new("hosts")
                    .striped(true)
                    .num_columns(4)
                    .show(ui, |ui| {
                        for host in &hosts {
                            let status = statuses.get(&host.mac).cloned().unwrap_or_default();
                            let button = buttons.get(&host.mac).copied().unwrap_or_default();

                            let name = ui.label(RichText::new(&host.name).strong());
                            if let Some(address) = &host.address {
                                name.on_hover_text(address.as_str());
                            }
                            ui.monospace(&host.mac);
                            ui.colored_label(
                                visuals.status_color(status.online),
                                RichText::new(status.text()).monospace(),
                            );
                            ui.horizontal(|ui| {
                                if ui
                                    .add_enabled(button.enabled, egui::Button::new(button.label.text()))
                                    .clicked()
                                {
                                    self.spawn_wake(host.mac.clone(), Some(host.name.clone()));
                                }
                                if ui.button(tr!("Remove")).clicked() {
                                    self.deleting_host = Some(host.clone());
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
        });

        self.add_host_dialog(ctx, &visuals);

        // Delete confirmation dialog
        if let Some(host) = self.deleting_host.clone() {
            egui::Window::new(tr!("Confirm Deletion"))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(delete_prompt(&host.name));
                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        if ui.button(tr!("Delete")).clicked() {
                            self.deleting_host = None;
                            self.spawn_delete(host.clone());
                        }
                        if ui.button(tr!("Cancel")).clicked() {
                            self.deleting_host = None;
                        }
                    });
                });
        }
    }

    fn add_host_dialog(&mut self, ctx: &egui::Context, visuals: &WolVisuals) {
        let mut is_open = lock_state(&self.state).add_host_dialog_open;
        if !is_open {
            return;
        }

        let mut submitted = false;
        let mut cancelled = false;
        egui::Window::new(tr!("New host"))
            .open(&mut is_open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("add_host_form").num_columns(2).show(ui, |ui| {
                    ui.label(tr!("Name"));
                    ui.add(egui::TextEdit::singleline(&mut self.input_name).hint_text("my-host"));
                    ui.end_row();

                    ui.label(tr!("MAC address"));
                    ui.add(
                        egui::TextEdit::singleline(&mut self.input_mac)
                            .char_limit(17)
                            .hint_text("AA:BB:CC:DD:EE:FF"),
                    );
                    ui.end_row();

                    ui.label(tr!("Address"));
                    ui.add(
                        egui::TextEdit::singleline(&mut self.input_address)
                            .hint_text(tr!("optional")),
                    );
                    ui.end_row();
                });

                let name_ok = is_valid_hostname(self.input_name.trim());
                let mac_ok = self.input_mac.trim().parse::<MacAddress>().is_ok();
                let warning = visuals.alert_text(Severity::Warning);
                if !name_ok && !self.input_name.is_empty() {
                    ui.colored_label(warning, tr!("Invalid host name"));
                }
                if !mac_ok && !self.input_mac.is_empty() {
                    ui.colored_label(warning, tr!("Invalid MAC address"));
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(name_ok && mac_ok, egui::Button::new(tr!("Add")))
                        .clicked()
                    {
                        submitted = true;
                    }
                    if ui.button(tr!("Cancel")).clicked() {
                        cancelled = true;
                    }
                });
            });

        if submitted && let Ok(mac) = self.input_mac.trim().parse::<MacAddress>() {
            // Closes the dialog before the request is sent.
            let request = self.actions.clone().add_host(
                self.input_name.trim().to_string(),
                mac.to_string(),
                self.input_address.clone(),
            );
            self.runtime.spawn(request);
            self.input_name.clear();
            self.input_mac.clear();
            self.input_address.clear();
        } else if cancelled || !is_open {
            lock_state(&self.state).add_host_dialog_open = false;
        }
    }
}

impl eframe::App for EguiWol {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string_pretty(&self.settings) {
            Ok(serialized) => storage.set_string(eframe::APP_KEY, serialized),
            Err(err) => log::error!("Failed to serialize settings: {err}"),
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_layout(ctx);
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
