//! Dashboard application implemented with egui/eframe
//!
//! Owns the tour store and overlay. Each frame the visible screen registers
//! its tour targets, then the overlay is painted on top.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{error, info};

use super::components::dashboard::{Dashboard, DashboardAction};
use super::components::login::LoginScreen;
use super::components::theme_toggle;
use super::constants::*;
use super::targets::TargetRegistry;
use crate::config::AppConfig;
use crate::constants::timing::TOUR_START_DELAY_MS;
use crate::tour::{TourEvent, TourOverlay, TourStore};

enum Screen {
    Login(LoginScreen),
    Dashboard(Dashboard),
}

struct DashboardApp {
    config: AppConfig,
    config_path: PathBuf,
    screen: Screen,
    tour: TourStore,
    overlay: TourOverlay,
    targets: TargetRegistry,
    /// When a scheduled tour start becomes due
    pending_tour_start: Option<Instant>,
}

impl DashboardApp {
    fn new(cc: &CreationContext<'_>, config: AppConfig, config_path: PathBuf, tour: TourStore) -> Self {
        info!(
            completed = tour.has_completed_walkthrough(),
            degraded = tour.persistence_degraded(),
            "Initializing dashboard"
        );
        cc.egui_ctx.set_theme(theme_toggle::to_egui(config.theme));

        Self {
            config,
            config_path,
            screen: Screen::Login(LoginScreen::new()),
            tour,
            overlay: TourOverlay::new(),
            targets: TargetRegistry::new(),
            pending_tour_start: None,
        }
    }

    fn schedule_tour_start(&mut self) {
        info!(delay_ms = TOUR_START_DELAY_MS, "Scheduling walkthrough");
        self.pending_tour_start = Some(Instant::now() + Duration::from_millis(TOUR_START_DELAY_MS));
    }

    fn poll_tour_start(&mut self, ctx: &egui::Context) {
        let Some(due) = self.pending_tour_start else {
            return;
        };
        let now = Instant::now();
        if now < due {
            ctx.request_repaint_after(due - now);
            return;
        }
        self.pending_tour_start = None;
        if let Some(event) = self.tour.start() {
            self.log_tour_event(event);
        }
    }

    fn log_tour_event(&self, event: TourEvent) {
        match event {
            TourEvent::Started => info!(steps = self.tour.catalog().len(), "Walkthrough started"),
            TourEvent::StepChanged { from, to } => info!(from, to, "Walkthrough step changed"),
            TourEvent::Completed { reason } => info!(?reason, "Walkthrough closed"),
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        ctx.set_theme(theme_toggle::to_egui(self.config.theme));
        if let Err(err) = self.config.save(&self.config_path) {
            error!(error = ?err, "Failed to save theme preference");
        }
    }

    fn sign_out(&mut self) {
        info!("Signing out");
        self.pending_tour_start = None;
        self.tour.dismiss();
        self.screen = Screen::Login(LoginScreen::new());
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.targets.begin_frame();

        let mut theme_changed = false;
        let mut actions = Vec::new();

        match &mut self.screen {
            Screen::Login(login) => {
                let (success, changed) = login.ui(ctx, &mut self.config.theme);
                theme_changed = changed;
                if let Some(success) = success {
                    info!(email = %success.user.email, is_signup = success.is_signup, "Signed in");
                    let auto_start = success.is_signup
                        || (self.config.auto_start_tour && self.tour.should_auto_start());
                    self.screen = Screen::Dashboard(Dashboard::new(success.user));
                    if auto_start {
                        self.schedule_tour_start();
                    }
                    ctx.request_repaint();
                }
            }
            Screen::Dashboard(dashboard) => {
                actions = dashboard.ui(ctx, &mut self.config.theme, &mut self.targets);
            }
        }

        for action in actions {
            match action {
                DashboardAction::RestartTour => {
                    self.pending_tour_start = None;
                    if let Some(event) = self.tour.restart() {
                        self.log_tour_event(event);
                    }
                }
                DashboardAction::SignOut => self.sign_out(),
                DashboardAction::ThemeChanged => theme_changed = true,
            }
        }

        if theme_changed {
            self.apply_theme(ctx);
        }

        self.poll_tour_start(ctx);

        if let Some(event) = self.overlay.show(ctx, &mut self.tour, &mut self.targets) {
            self.log_tour_event(event);
        }
        if !self.tour.is_active() {
            self.targets.reset_scroll();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Dashboard exiting");
    }
}

pub fn run_gui(config: AppConfig, config_path: PathBuf, tour: TourStore) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([f32::from(config.window.width), f32::from(config.window.height)])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Orbit Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Orbit Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config, config_path, tour)))),
    )
    .map_err(|err| anyhow!("Failed to launch dashboard: {err}"))
}
