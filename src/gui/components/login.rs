//! Login / signup screen with local form validation

use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::ThemePreference;
use crate::constants::auth::MIN_PASSWORD_LEN;
use crate::constants::timing::AUTH_DELAY_MS;
use crate::gui::components::theme_toggle;
use crate::gui::constants::*;
use crate::mock::{self, AuthResult, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Login,
    Signup,
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub general: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
            && self.general.is_none()
    }
}

/// Loose shape check: `local@domain.tld` with no whitespace
pub fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    match domain.rsplit_once('.') {
        Some((host, tld)) => !local.is_empty() && !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn validate(mode: FormMode, email: &str, password: &str, confirm: &str) -> FormErrors {
    let mut errors = FormErrors::default();

    if email.is_empty() {
        errors.email = Some("Email is required".into());
    } else if !looks_like_email(email) {
        errors.email = Some("Please enter a valid email".into());
    }

    if password.is_empty() {
        errors.password = Some("Password is required".into());
    } else if password.len() < MIN_PASSWORD_LEN {
        errors.password = Some(format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
    }

    if mode == FormMode::Signup && password != confirm {
        errors.confirm_password = Some("Passwords do not match".into());
    }

    errors
}

/// Emitted once the mocked round trip finishes successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub user: User,
    pub is_signup: bool,
}

pub struct LoginScreen {
    mode: FormMode,
    email: String,
    password: String,
    confirm_password: String,
    show_password: bool,
    errors: FormErrors,
    submitted_at: Option<Instant>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Login,
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            show_password: false,
            errors: FormErrors::default(),
            submitted_at: None,
        }
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            FormMode::Login => FormMode::Signup,
            FormMode::Signup => FormMode::Login,
        };
        self.email.clear();
        self.password.clear();
        self.confirm_password.clear();
        self.errors = FormErrors::default();
    }

    fn submit(&mut self) {
        self.errors = validate(self.mode, &self.email, &self.password, &self.confirm_password);
        if self.errors.is_empty() {
            self.submitted_at = Some(Instant::now());
        }
    }

    /// Finish a pending submission once the simulated latency has passed
    fn poll_submission(&mut self, ctx: &egui::Context) -> Option<LoginSuccess> {
        let submitted_at = self.submitted_at?;
        let delay = Duration::from_millis(AUTH_DELAY_MS);
        let elapsed = submitted_at.elapsed();
        if elapsed < delay {
            ctx.request_repaint_after(delay - elapsed);
            return None;
        }

        self.submitted_at = None;
        let is_signup = self.mode == FormMode::Signup;
        match mock::authenticate(&self.email, &self.password, is_signup) {
            AuthResult::Success(user) => Some(LoginSuccess { user, is_signup }),
            AuthResult::Failure(message) => {
                self.errors.general = Some(message);
                None
            }
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context, theme: &mut ThemePreference) -> (Option<LoginSuccess>, bool) {
        let mut theme_changed = false;

        egui::TopBottomPanel::top("login_header")
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    theme_changed = theme_toggle::ui(ui, theme).1;
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.15);
                ui.set_max_width(LOGIN_FORM_WIDTH);

                let (heading, subtitle) = match self.mode {
                    FormMode::Login => ("Welcome back", "Enter your credentials to continue"),
                    FormMode::Signup => ("Create your account", "Start your journey with us"),
                };
                ui.heading(heading);
                ui.label(egui::RichText::new(subtitle).weak());
                ui.add_space(SECTION_SPACING * 2.0);

                if let Some(general) = &self.errors.general {
                    ui.colored_label(STATUS_ERROR, general);
                    ui.add_space(ITEM_SPACING);
                }

                let busy = self.submitted_at.is_some();
                ui.add_enabled_ui(!busy, |ui| self.fields(ui));

                ui.add_space(SECTION_SPACING);
                let label = match (busy, self.mode) {
                    (true, _) => "Please wait...",
                    (false, FormMode::Login) => "Sign in",
                    (false, FormMode::Signup) => "Create account",
                };
                let button = egui::Button::new(egui::RichText::new(label).color(egui::Color32::WHITE))
                    .fill(ACCENT)
                    .min_size(egui::vec2(LOGIN_FORM_WIDTH, 32.0));
                let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                let clicked = ui.add_enabled(!busy, button).clicked();
                if !busy && (clicked || enter) {
                    self.submit();
                }

                ui.add_space(SECTION_SPACING);
                let switch = match self.mode {
                    FormMode::Login => "Don't have an account? Sign up",
                    FormMode::Signup => "Already have an account? Sign in",
                };
                if ui.add_enabled(!busy, egui::Link::new(switch)).clicked() {
                    self.toggle_mode();
                }
            });
        });

        (self.poll_submission(ctx), theme_changed)
    }

    fn fields(&mut self, ui: &mut egui::Ui) {
        ui.label("Email");
        ui.add(
            egui::TextEdit::singleline(&mut self.email)
                .hint_text("you@example.com")
                .desired_width(LOGIN_FORM_WIDTH),
        );
        if let Some(err) = &self.errors.email {
            ui.colored_label(STATUS_ERROR, err);
        }
        ui.add_space(ITEM_SPACING);

        ui.label("Password");
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.password)
                    .password(!self.show_password)
                    .desired_width(LOGIN_FORM_WIDTH - 40.0),
            );
            let eye = if self.show_password { "🙈" } else { "👁" };
            if ui.small_button(eye).clicked() {
                self.show_password = !self.show_password;
            }
        });
        if let Some(err) = &self.errors.password {
            ui.colored_label(STATUS_ERROR, err);
        }

        if self.mode == FormMode::Signup {
            ui.add_space(ITEM_SPACING);
            ui.label("Confirm password");
            ui.add(
                egui::TextEdit::singleline(&mut self.confirm_password)
                    .password(!self.show_password)
                    .desired_width(LOGIN_FORM_WIDTH),
            );
            if let Some(err) = &self.errors.confirm_password {
                ui.colored_label(STATUS_ERROR, err);
            }
        }
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}
