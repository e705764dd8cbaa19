use std::path::{Path, PathBuf};
use std::time::Instant;

use eframe::egui;

use crate::config::Config;
use crate::deck::Deck;
use crate::navigation::location::Location;
use crate::navigation::transition::{FrameAnimator, MotionMode, SlidePose};
use crate::render::{self, Paint, image_cache::ImageCache};
use crate::session::{MemoryStore, Session};
use crate::show::Show;
use crate::theme::Theme;
use crate::widgets::WidgetContext;

struct ExportApp {
    show: Show<MemoryStore, FrameAnimator>,
    theme: Theme,
    images: ImageCache,
    output_dir: PathBuf,
    screenshot_requested: bool,
    done: bool,
}

impl ExportApp {
    fn new(deck: Deck, theme: Theme, output_dir: PathBuf) -> Self {
        // Reduced motion: every slide is painted at rest, entrances settled.
        let ctx = WidgetContext {
            motion: MotionMode::Reduced,
            media_base: None,
            asset_dir: deck.base_path.clone(),
        };
        let show = Show::new(
            deck,
            Session::new(MemoryStore::new()),
            Location::default(),
            FrameAnimator::default(),
            ctx,
            Instant::now(),
        );
        Self {
            show,
            theme,
            images: ImageCache::default(),
            output_dir,
            screenshot_requested: false,
            done: false,
        }
    }
}

impl eframe::App for ExportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.done {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let now = Instant::now();
        let current = self.show.current();

        // Screenshot of the slide painted last frame
        let mut got_screenshot = false;
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Screenshot { image, .. } = event {
                    let filename = format!("slide-{current:02}.png");
                    let path = self.output_dir.join(&filename);
                    save_color_image(image, &path);
                    eprintln!("  Saved {filename}");
                    got_screenshot = true;
                }
            }
        });

        if got_screenshot {
            self.screenshot_requested = false;
            if current >= self.show.deck().len() {
                self.done = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
            self.show.visit(current + 1, now);
        }
        self.show.update(now);

        let bg = self.theme.background;
        let theme = &self.theme;
        let images = &mut self.images;
        let show = &mut self.show;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                let paint = Paint {
                    theme,
                    scale: render::compute_scale(rect),
                    now,
                    interactive: true,
                };
                let index = show.current();
                if let Some((slide, runtime)) = show.slide_mut(index) {
                    render::render_slide(
                        ui,
                        index,
                        slide,
                        runtime,
                        &paint,
                        rect,
                        SlidePose::REST,
                        images,
                    );
                }
            });

        // Request screenshot after rendering (will arrive next frame)
        if !self.screenshot_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.screenshot_requested = true;
        }

        ctx.request_repaint();
    }
}

fn save_color_image(image: &egui::ColorImage, path: &Path) {
    let [width, height] = image.size;
    let pixels: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| c.to_srgba_unmultiplied())
        .collect();

    if let Err(e) = image::save_buffer(
        path,
        &pixels,
        width as u32,
        height as u32,
        image::ColorType::Rgba8,
    ) {
        tracing::error!(path = %path.display(), "failed to save slide image: {e}");
    }
}

pub fn run(deck: Option<PathBuf>, output_dir: PathBuf, width: u32, height: u32) -> anyhow::Result<()> {
    let deck = match &deck {
        Some(path) => Deck::load(path)?,
        None => Deck::builtin()?,
    };

    std::fs::create_dir_all(&output_dir)?;

    eprintln!(
        "Exporting {} slides to {} ({}x{})",
        deck.len(),
        output_dir.display(),
        width,
        height,
    );

    // Exports have no window to ask, so `auto` renders dark.
    let theme = Theme::from_name(Config::load_or_default().theme(), None);
    let title = format!("{} export", deck.display_title());

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([width as f32, height as f32])
        .with_title(&title)
        .with_decorations(false);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ExportApp::new(deck, theme, output_dir)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    eprintln!("Export complete.");
    Ok(())
}
