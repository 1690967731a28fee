//! Main application state and UI.

use crate::error::{JournalError, Result};
use crate::gradient::{export_file_name, render_history};
use crate::history::{MoodEntry, TimeWindow};
use crate::journal::{Journal, Session, Signup, Submission};
use crate::mood::MoodBucket;
use crate::sentiment::VaderAnalyzer;
use crate::settings::Settings;
use crate::theme;
use chrono::{Local, NaiveDate};
use eframe::egui::{self, Color32, Vec2};
use std::path::PathBuf;
use std::time::Instant;

/// Entries shown in the history list before it is collapsed
const HISTORY_PREVIEW: usize = 30;

/// One line of feedback under the current screen
struct StatusMessage {
    text: String,
    color: Color32,
}

impl StatusMessage {
    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: theme::state::SUCCESS,
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: theme::state::WARNING,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: theme::state::ERROR,
        }
    }

    fn failed(action: &str, e: &JournalError) -> Self {
        Self::error(format!("Could not {action}: {e}"))
    }
}

/// Encoded gradient currently on screen
struct RenderedGradient {
    uri: String,
    png: Vec<u8>,
}

/// Main Pixal application
pub struct PixalApp {
    journal: Journal,
    session: Option<Session>,

    // Login form
    username: String,
    password: String,

    // Journal state
    mood_input: String,
    last_submission: Option<Submission>,
    history: Vec<MoodEntry>,
    time_window: TimeWindow,

    // Gradient cache
    gradient: Option<RenderedGradient>,
    gradient_dirty: bool,
    gradient_revision: u64,

    status: Option<StatusMessage>,

    // Settings persistence
    settings: Settings,
    settings_dirty: bool,
    last_settings_save: Instant,
}

impl PixalApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        // Load saved settings
        let settings = Settings::load();
        let root = settings.data_root();
        tracing::info!("Using data directory {:?}", root);

        let journal = Journal::new(root, settings.palette, Box::new(VaderAnalyzer::new()));

        Self {
            journal,
            session: None,
            username: settings.last_username.clone().unwrap_or_default(),
            password: String::new(),
            mood_input: String::new(),
            last_submission: None,
            history: Vec::new(),
            time_window: settings.time_window,
            gradient: None,
            gradient_dirty: true,
            gradient_revision: 0,
            status: None,
            settings,
            settings_dirty: false,
            last_settings_save: Instant::now(),
        }
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Mark settings as needing to be saved
    fn mark_settings_dirty(&mut self) {
        self.settings_dirty = true;
    }

    /// Copy current UI state to settings struct
    fn sync_settings_from_ui(&mut self) {
        self.settings.time_window = self.time_window;
        if let Some(session) = &self.session {
            self.settings.last_username = Some(session.username().to_string());
        }
    }

    /// Save settings if dirty and enough time has passed (debounce)
    fn maybe_save_settings(&mut self) {
        if self.settings_dirty && self.last_settings_save.elapsed().as_secs() >= 2 {
            self.sync_settings_from_ui();
            self.settings.save();
            self.settings_dirty = false;
            self.last_settings_save = Instant::now();
        }
    }

    fn start_session(&mut self, session: Session) {
        self.password.clear();
        match self.journal.history(&session) {
            Ok(history) => self.history = history,
            Err(e) => {
                self.history.clear();
                self.status = Some(StatusMessage::failed("load history", &e));
            }
        }
        self.session = Some(session);
        self.last_submission = None;
        self.gradient_dirty = true;
        self.mark_settings_dirty();
    }

    fn try_login(&mut self) {
        match self.journal.login(&self.username, &self.password) {
            Ok(Some(session)) => {
                self.status = None;
                self.start_session(session);
            }
            Ok(None) => {
                self.status = Some(StatusMessage::error("Invalid username or password."));
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    fn try_signup(&mut self) {
        match self.journal.signup(&self.username, &self.password) {
            Ok(Signup::Created(session)) => {
                self.status = Some(StatusMessage::success("Welcome to Pixal!"));
                self.start_session(session);
            }
            Ok(Signup::DuplicateUser) => {
                self.status = Some(StatusMessage::error("That username is already taken."));
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    fn logout(&mut self) {
        self.sync_settings_from_ui();
        self.session = None;
        self.history.clear();
        self.last_submission = None;
        self.mood_input.clear();
        self.gradient_dirty = true;
        self.status = None;
    }

    fn submit_mood(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        if self.mood_input.trim().is_empty() {
            self.status = Some(StatusMessage::warning("Tell Pixal how you feel first."));
            return;
        }

        let mut rng = rand::thread_rng();
        match self
            .journal
            .submit_mood(session, &self.mood_input, Self::today(), &mut rng)
        {
            Ok(submission) => {
                self.history = submission.history.clone();
                self.last_submission = Some(submission);
                self.mood_input.clear();
                self.gradient_dirty = true;
                self.status = None;
            }
            Err(e) => {
                self.status = Some(StatusMessage::failed("save your mood", &e));
            }
        }
    }

    fn reset_history(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        match self.journal.reset(session) {
            Ok(()) => {
                self.history.clear();
                self.last_submission = None;
                self.gradient_dirty = true;
                self.status = Some(StatusMessage::success("Mood log reset!"));
            }
            Err(e) => {
                self.status = Some(StatusMessage::failed("reset history", &e));
            }
        }
    }

    /// Re-render the gradient for the current window if anything changed
    fn refresh_gradient(&mut self, ctx: &egui::Context) {
        if !self.gradient_dirty {
            return;
        }
        self.gradient_dirty = false;

        if let Some(old) = self.gradient.take() {
            ctx.forget_image(&old.uri);
        }

        let (width, height) = self.settings.gradient_size();
        let today = Self::today();
        let rendered = render_history(&self.history, self.time_window, today, width, height)
            .and_then(|image| image.map(|img| img.to_png()).transpose());

        match rendered {
            Ok(Some(png)) => {
                self.gradient_revision += 1;
                self.gradient = Some(RenderedGradient {
                    uri: format!("bytes://pixal_gradient_{}.png", self.gradient_revision),
                    png,
                });
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Gradient rendering failed: {}", e);
                self.status = Some(StatusMessage::failed("render gradient", &e));
            }
        }
    }

    fn export_dir(&self) -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| self.journal.root().to_path_buf())
    }

    fn download_gradient(&mut self) {
        let Some(gradient) = &self.gradient else {
            return;
        };
        let path = self.export_dir().join(export_file_name(self.time_window));
        let result: Result<()> = std::fs::write(&path, &gradient.png)
            .map_err(|e| JournalError::io(&path, e));
        match result {
            Ok(()) => {
                tracing::info!("Exported gradient to {:?}", path);
                self.status = Some(StatusMessage::success(format!("Saved {}", path.display())));
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(status) = &self.status {
            ui.add_space(6.0);
            ui.colored_label(status.color, &status.text);
        }
    }

    fn render_login(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("🎨 Pixal");
            ui.colored_label(theme::text::MUTED, "Your mood, visualized as color 🌈");
            ui.add_space(20.0);

            ui.add(
                egui::TextEdit::singleline(&mut self.username)
                    .hint_text("Username")
                    .desired_width(240.0),
            );
            let password = ui.add(
                egui::TextEdit::singleline(&mut self.password)
                    .hint_text("Password")
                    .password(true)
                    .desired_width(240.0),
            );
            let enter = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                // Center the pair of buttons
                ui.add_space((ui.available_width() - 170.0).max(0.0) / 2.0);
                if ui.button("Log in").clicked() || enter {
                    self.try_login();
                }
                if ui.button("Sign up").clicked() {
                    self.try_signup();
                }
            });

            self.render_status(ui);
        });
    }

    fn render_mood_form(&mut self, ui: &mut egui::Ui) {
        ui.label("How are you feeling today?");
        let input = ui.add(
            egui::TextEdit::singleline(&mut self.mood_input)
                .hint_text("I feel...")
                .desired_width(f32::INFINITY),
        );
        let enter = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Generate Mood Color").clicked() || enter {
            self.submit_mood();
        }
    }

    fn render_result(&self, ui: &mut egui::Ui) {
        let Some(submission) = &self.last_submission else {
            return;
        };
        let bucket = submission.classification.bucket;
        let color = submission.color();
        let headline = format!("Your color for today is: {color}");
        let quote = format!("💬 {}", bucket.quote());

        egui::Frame::none()
            .fill(theme::bg::SURFACE)
            .rounding(6.0)
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    theme::swatch(ui, color.into(), Vec2::new(48.0, 48.0));
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(headline).strong());
                        ui.label(format!("Emotion detected: {}", bucket.label()));
                    });
                });
                ui.add_space(6.0);
                ui.label(egui::RichText::new(quote).italics());
                ui.hyperlink_to("🎧 Mood Music", bucket.song_url());
            });
    }

    fn render_history_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Filter by time range:");
            let before = self.time_window;
            egui::ComboBox::from_id_salt("time_window")
                .selected_text(self.time_window.label())
                .show_ui(ui, |ui| {
                    for window in TimeWindow::all() {
                        ui.selectable_value(&mut self.time_window, *window, window.label());
                    }
                });
            if self.time_window != before {
                self.gradient_dirty = true;
                self.mark_settings_dirty();
            }

            if ui.button("🔄 Reset Mood History").clicked() {
                self.reset_history();
            }
        });
    }

    fn render_gradient(&mut self, ui: &mut egui::Ui) {
        ui.heading("Your Mood History 🌈");
        ui.add_space(4.0);
        self.render_history_controls(ui);
        ui.add_space(6.0);

        if let Some(gradient) = &self.gradient {
            ui.add(
                egui::Image::from_bytes(gradient.uri.clone(), gradient.png.clone())
                    .max_width(ui.available_width())
                    .rounding(4.0),
            );
            ui.add_space(4.0);
            if ui.button("📥 Download Mood Gradient").clicked() {
                self.download_gradient();
            }
        } else if self.history.is_empty() {
            ui.colored_label(theme::text::MUTED, "No moods logged yet.");
        } else {
            let message = format!(
                "No mood entries found for selected time range: {}.",
                self.time_window.label()
            );
            ui.colored_label(theme::state::INFO, message);
        }
    }

    fn render_history_list(&self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(format!("Entries ({})", self.history.len()))
            .default_open(false)
            .show(ui, |ui| {
                egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    for entry in self.history.iter().rev().take(HISTORY_PREVIEW) {
                        ui.horizontal(|ui| {
                            theme::swatch(ui, entry.color.into(), Vec2::new(14.0, 14.0));
                            ui.colored_label(theme::text::MUTED, entry.date.to_string());
                            ui.label(truncate(&entry.text, 80));
                        });
                    }
                    if self.history.len() > HISTORY_PREVIEW {
                        let older = self.history.len() - HISTORY_PREVIEW;
                        ui.label(format!("  +{older} older"));
                    }
                });
            });
    }

    fn render_legend(&self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Mood colors")
            .default_open(false)
            .show(ui, |ui| {
                let palette = self.journal.palette();
                for bucket in MoodBucket::all() {
                    ui.horizontal(|ui| {
                        let color: Color32 = palette.color_for(*bucket).into();
                        theme::swatch(ui, color, Vec2::new(14.0, 14.0));
                        ui.label(bucket.label());
                    });
                }
            });
    }

    fn render_journal(&mut self, ui: &mut egui::Ui) {
        let username = self
            .session
            .as_ref()
            .map(|s| s.username().to_string())
            .unwrap_or_default();

        ui.horizontal(|ui| {
            ui.heading("🎨 Pixal");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Log out").clicked() {
                    self.logout();
                }
                ui.colored_label(theme::text::MUTED, format!("Signed in as {}", username));
            });
        });
        ui.separator();

        self.render_mood_form(ui);
        self.render_status(ui);
        ui.add_space(10.0);
        self.render_result(ui);
        ui.add_space(16.0);
        self.render_gradient(ui);
        ui.add_space(10.0);
        self.render_history_list(ui);
        self.render_legend(ui);
    }
}

impl eframe::App for PixalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.maybe_save_settings();

        if self.session.is_some() {
            self.refresh_gradient(ctx);
        }

        // Dark theme
        ctx.set_visuals(egui::Visuals::dark());

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(theme::bg::PANEL)
                    .inner_margin(egui::Margin::same(16.0)),
            )
            .show(ctx, |ui| {
                ui.style_mut().visuals.override_text_color = Some(theme::text::PRIMARY);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.session.is_some() {
                        self.render_journal(ui);
                    } else {
                        self.render_login(ui);
                    }
                });
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Force save settings on exit
        self.sync_settings_from_ui();
        self.settings.save();
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}
