use std::time::{Duration, Instant};

use eframe::egui;

use crate::cli::LaunchOptions;
use crate::config::Config;
use crate::deck::Deck;
use crate::navigation::input::{
    ClickTarget, Command, DeckKey, SwipeTracker, command_for_click, command_for_key,
};
use crate::navigation::location::Location;
use crate::navigation::transition::{FrameAnimator, MotionMode, SlidePose};
use crate::render::chrome::{self, ChromeState};
use crate::render::image_cache::ImageCache;
use crate::render::{self, Paint};
use crate::session::{FileStore, KeyValueStore, MemoryStore, Session};
use crate::show::Show;
use crate::theme::Theme;
use crate::widgets::WidgetContext;

type Store = Box<dyn KeyValueStore>;

/// A second Esc inside this window exits.
const ESC_WINDOW: Duration = Duration::from_secs(1);

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            start: now,
        }
    }

    fn opacity(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        let duration = 1.5;
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.opacity(now) <= 0.0
    }
}

/// Parse the go-to prompt. Only in-range slide numbers are accepted.
fn parse_goto(typed: &str, len: usize) -> Option<usize> {
    typed
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
}

/// Input gathered in one frame, applied after the input lock is released.
#[derive(Default)]
struct FrameInput {
    commands: Vec<Command>,
    viewport_cmds: Vec<egui::ViewportCommand>,
    escape: bool,
    history: Option<bool>,
    jump: Option<String>,
}

pub struct PitchdeckApp {
    show: Show<Store, FrameAnimator>,
    theme: Theme,
    images: ImageCache,
    deck_title: String,
    window_title: String,
    toast: Option<Toast>,
    last_esc: Option<Instant>,
    show_hud: bool,
    goto: Option<String>,
    swipe: SwipeTracker,
}

impl PitchdeckApp {
    fn new(show: Show<Store, FrameAnimator>, theme: Theme, deck_title: String) -> Self {
        Self {
            show,
            theme,
            images: ImageCache::default(),
            deck_title,
            window_title: String::new(),
            toast: None,
            last_esc: None,
            show_hud: false,
            goto: None,
            swipe: SwipeTracker::default(),
        }
    }

    fn has_overlay(&self) -> bool {
        self.show_hud || self.goto.is_some()
    }

    fn read_input(&mut self, ctx: &egui::Context) -> FrameInput {
        let focus_in_form = ctx.wants_keyboard_input();
        let mut input = FrameInput::default();

        ctx.input(|i| {
            // The go-to prompt swallows every key while open.
            if let Some(typed) = self.goto.as_mut() {
                for event in &i.events {
                    if let egui::Event::Text(text) = event {
                        typed.extend(text.chars().filter(char::is_ascii_digit));
                    }
                }
                if i.key_pressed(egui::Key::Backspace) {
                    typed.pop();
                }
                if i.key_pressed(egui::Key::Enter) {
                    input.jump = self.goto.take();
                } else if i.key_pressed(egui::Key::Escape) {
                    self.goto = None;
                }
                return;
            }

            if focus_in_form {
                return;
            }

            if i.key_pressed(egui::Key::Q) {
                input.viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }

            if i.key_pressed(egui::Key::Escape) {
                input.escape = true;
                return;
            }

            if i.key_pressed(egui::Key::F) {
                input.viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
                return;
            }

            if i.key_pressed(egui::Key::H) {
                self.show_hud = !self.show_hud;
                return;
            }

            if i.key_pressed(egui::Key::G) {
                self.goto = Some(String::new());
                return;
            }

            // Alt+arrows walk the location history instead of the deck.
            if i.modifiers.alt {
                if i.key_pressed(egui::Key::ArrowLeft) {
                    input.history = Some(false);
                } else if i.key_pressed(egui::Key::ArrowRight) {
                    input.history = Some(true);
                }
                return;
            }

            for key in DeckKey::ALL {
                if i.key_pressed(key.egui_key()) {
                    input.commands.extend(command_for_key(key, focus_in_form));
                }
            }
        });
        input
    }

    fn apply_input(&mut self, input: FrameInput, now: Instant) -> Vec<egui::ViewportCommand> {
        let mut viewport_cmds = input.viewport_cmds;

        if let Some(typed) = input.jump {
            match parse_goto(&typed, self.show.deck().len()) {
                Some(n) => {
                    self.show.apply(Command::GoTo(n), now);
                }
                None if typed.is_empty() => {}
                None => self.toast = Some(Toast::new(format!("No slide {typed}"), now)),
            }
        }

        if input.escape {
            if self.show_hud {
                self.show_hud = false;
            } else if self.show.dismiss_overlays() {
                self.last_esc = None;
            } else if self
                .last_esc
                .is_some_and(|last| now.saturating_duration_since(last) < ESC_WINDOW)
            {
                viewport_cmds.push(egui::ViewportCommand::Close);
            } else {
                self.last_esc = Some(now);
                self.toast = Some(Toast::new("Press Esc again to exit", now));
            }
        }

        match input.history {
            Some(true) => {
                self.show.history_forward(now);
            }
            Some(false) => {
                self.show.history_back(now);
            }
            None => {}
        }

        for command in input.commands {
            self.show.apply(command, now);
        }
        viewport_cmds
    }

    fn paint_slides(&mut self, ui: &mut egui::Ui, rect: egui::Rect, scale: f32, now: Instant) {
        let paint = Paint {
            theme: &self.theme,
            scale,
            now,
            interactive: false,
        };
        match self.show.frame(now) {
            Some(frame) => {
                for (index, pose) in [(frame.from, frame.outgoing), (frame.to, frame.incoming)] {
                    if let Some((slide, runtime)) = self.show.slide_mut(index) {
                        render::render_slide(
                            ui,
                            index,
                            slide,
                            runtime,
                            &paint,
                            rect,
                            pose,
                            &mut self.images,
                        );
                    }
                }
            }
            None => {
                let paint = Paint {
                    interactive: !self.show_hud && self.goto.is_none(),
                    ..paint
                };
                let index = self.show.current();
                if let Some((slide, runtime)) = self.show.slide_mut(index) {
                    render::render_slide(
                        ui,
                        index,
                        slide,
                        runtime,
                        &paint,
                        rect,
                        SlidePose::REST,
                        &mut self.images,
                    );
                }
            }
        }
    }

    fn paint(&mut self, ui: &mut egui::Ui, now: Instant) {
        let rect = ui.max_rect();
        let bg = self.theme.background;
        ui.painter().rect_filled(rect, 0.0, bg);
        let scale = render::compute_scale(rect);

        // Registered first so widget controls painted later win the hit test.
        let background = ui.interact(
            rect,
            ui.id().with("background"),
            egui::Sense::click_and_drag(),
        );

        self.paint_slides(ui, rect, scale, now);

        let navigator = self.show.navigator();
        let current = navigator.current();
        let state = ChromeState {
            progress_percent: navigator.progress_percent(),
            counter: navigator.counter_text(),
            live_region: navigator.live_region(),
            footer: self.show.deck().footer.as_deref(),
            at_first: current == 1,
            at_last: current == navigator.len(),
        };
        let nav_click = chrome::draw(ui, &self.theme, rect, scale, &state);

        if navigator.notes_visible() {
            let notes = self
                .show
                .deck()
                .slide(current)
                .and_then(|s| s.notes.as_deref());
            chrome::draw_notes(ui, &self.theme, rect, scale, notes);
        }

        // Click and swipe
        let mut commands = Vec::new();
        let target = ClickTarget::resolve(
            nav_click,
            background.clicked() && !self.has_overlay(),
            ui.input(|i| i.pointer.primary_clicked()),
        );
        commands.extend(target.and_then(command_for_click));
        if background.drag_started() {
            if let Some(origin) = ui.input(|i| i.pointer.press_origin()) {
                self.swipe.press(origin, now);
            }
        }
        if background.drag_stopped() {
            let released = ui.input(|i| i.pointer.latest_pos());
            commands.extend(released.and_then(|pos| self.swipe.release(pos, now)));
        }
        for command in commands {
            self.show.apply(command, now);
        }

        if self.show_hud {
            chrome::draw_hud(ui, &self.theme, rect, scale);
        }
        if let Some(typed) = &self.goto {
            chrome::draw_goto_prompt(ui, &self.theme, rect, scale, typed, self.show.deck().len());
        }
        if let Some(toast) = &self.toast {
            chrome::draw_toast(ui, &self.theme, rect, scale, &toast.message, toast.opacity(now));
        }
    }
}

impl eframe::App for PitchdeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let input = self.read_input(ctx);
        let viewport_cmds = self.apply_input(input, now);
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        if let Some(arrival) = self.show.update(now) {
            tracing::debug!(from = arrival.from, to = arrival.to, "arrived");
        }

        let title = format!("{} \u{00b7} {}", self.deck_title, self.show.navigator().live_region());
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| self.paint(ui, now));

        if self.show.needs_repaint(now) || self.toast.is_some() || self.swipe.is_tracking() {
            ctx.request_repaint();
        }
    }
}

fn open_store() -> Store {
    match FileStore::open_default() {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "session store opened");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("session state will not persist: {e}");
            Box::new(MemoryStore::new())
        }
    }
}

pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let deck = match &options.deck {
        Some(path) => Deck::load(path)?,
        None => Deck::builtin()?,
    };

    let reduced = options.reduced_motion || config.reduced_motion();
    let windowed = options.windowed || config.windowed();
    let media_base = options
        .media_base
        .clone()
        .or_else(|| config.media_base().map(str::to_string));
    let ctx = WidgetContext {
        motion: MotionMode::from_reduced(reduced),
        media_base,
        asset_dir: deck.base_path.clone(),
    };

    let mut session = Session::new(open_store());
    if options.fresh {
        if let Err(e) = session.clear() {
            tracing::warn!("could not clear saved session: {e}");
        }
    }
    let location = Location::new(options.route.as_deref().unwrap_or(""));

    let title = deck.display_title();
    tracing::info!(slides = deck.len(), reduced, windowed, "starting presentation");

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let theme_name = config.theme().to_string();
    let app_title = title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| {
            let system_dark = cc
                .egui_ctx
                .system_theme()
                .map(|t| t == egui::Theme::Dark);
            let theme = Theme::from_name(&theme_name, system_dark);
            cc.egui_ctx.set_theme(if theme.is_dark() {
                egui::Theme::Dark
            } else {
                egui::Theme::Light
            });
            let show = Show::new(
                deck,
                session,
                location,
                FrameAnimator::default(),
                ctx,
                Instant::now(),
            );
            Ok(Box::new(PitchdeckApp::new(show, theme, app_title)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_fades_out() {
        let t0 = Instant::now();
        let toast = Toast::new("hello", t0);
        assert_eq!(toast.opacity(t0), 1.0);
        assert_eq!(toast.opacity(t0 + Duration::from_millis(999)), 1.0);
        let mid = toast.opacity(t0 + Duration::from_millis(1250));
        assert!((mid - 0.5).abs() < 0.01);
        assert!(!toast.is_expired(t0 + Duration::from_millis(1400)));
        assert!(toast.is_expired(t0 + Duration::from_millis(1500)));
    }

    #[test]
    fn test_parse_goto() {
        assert_eq!(parse_goto("3", 12), Some(3));
        assert_eq!(parse_goto("12", 12), Some(12));
        assert_eq!(parse_goto("13", 12), None);
        assert_eq!(parse_goto("0", 12), None);
        assert_eq!(parse_goto("", 12), None);
    }
}
