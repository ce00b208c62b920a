use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;

use crate::app::{FrameClock, FrameLoop, InputEvent, LoopState};
use crate::assets::{Icon, IconSet};
use crate::classify::{Classifier, ClassifierError};
use crate::config::AppConfig;
use crate::gui::painter::{to_window, EguiSurface, IconTextures};

pub const WINDOW_TITLE: &str = "Optical Handwritten Digits Recognition";

#[derive(Debug, thiserror::Error)]
pub enum GuiError {
    #[error("window error: {0}")]
    Window(String),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Slot the app leaves a fatal error in before closing its window, so
/// `run` can hand it back to the caller after the event loop exits.
type FatalSlot = Rc<RefCell<Option<ClassifierError>>>;

/// eframe host around a `FrameLoop`: one `update` call is one tick.
pub struct OhdrApp<C: Classifier> {
    frame_loop: FrameLoop<C>,
    icons: IconTextures,
    clock: FrameClock,
    fatal: FatalSlot,
}

impl<C: Classifier> OhdrApp<C> {
    fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        icon_set: &IconSet,
        classifier: C,
        fatal: FatalSlot,
    ) -> OhdrApp<C> {
        let icons = IconTextures {
            dark: upload(&cc.egui_ctx, "dark_icon", &icon_set.dark),
            light: upload(&cc.egui_ctx, "light_icon", &icon_set.light),
        };
        OhdrApp {
            frame_loop: FrameLoop::new(config.profile, config.palette, classifier),
            icons,
            clock: FrameClock::new(config.tick_interval()),
            fatal,
        }
    }
}

fn upload(ctx: &egui::Context, name: &str, icon: &Icon) -> egui::TextureHandle {
    let image = egui::ColorImage::from_rgba_unmultiplied(
        [icon.width as usize, icon.height as usize],
        &icon.rgba,
    );
    ctx.load_texture(name, image, egui::TextureOptions::LINEAR)
}

/// Translates this frame's egui input into frame-loop events.
fn collect_events(ctx: &egui::Context, origin: egui::Pos2) -> Vec<InputEvent> {
    ctx.input(|i| {
        let mut events = Vec::new();
        for event in &i.events {
            match event {
                egui::Event::PointerMoved(p) => {
                    let (x, y) = to_window(origin, *p);
                    events.push(InputEvent::PointerMoved { x, y });
                }
                egui::Event::PointerButton { pos, button: egui::PointerButton::Primary, pressed, .. } => {
                    if *pressed {
                        let (x, y) = to_window(origin, *pos);
                        events.push(InputEvent::PrimaryPressed { x, y });
                    } else {
                        events.push(InputEvent::PrimaryReleased);
                    }
                }
                egui::Event::PointerGone => events.push(InputEvent::PointerGone),
                _ => {}
            }
        }
        if i.viewport().close_requested() {
            events.push(InputEvent::Quit);
        }
        events
    })
}

impl<C: Classifier> eframe::App for OhdrApp<C> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let outcome = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let origin = ui.max_rect().min;
                let events = collect_events(ctx, origin);
                let mut surface = EguiSurface::new(ui.painter(), origin, &self.icons);
                self.frame_loop.tick(events, &mut surface)
            })
            .inner;

        match outcome {
            Ok(LoopState::Running) => {
                self.clock.tick();
                ctx.request_repaint();
            }
            Ok(LoopState::Terminating) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            Err(err) => {
                tracing::error!(error = %err, "classification failed, closing");
                *self.fatal.borrow_mut() = Some(err);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }
}

/// Opens the window and runs the frame loop until the user quits.
///
/// Returns once the window is gone. A classifier failure during a tick
/// closes the window and is returned here.
pub fn run<C>(config: AppConfig, icons: IconSet, classifier: C) -> Result<(), GuiError>
where
    C: Classifier + 'static,
{
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size())
            .with_resizable(false)
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    let fatal: FatalSlot = Rc::new(RefCell::new(None));
    let app_fatal = fatal.clone();

    tracing::info!(
        profile = %config.profile,
        ticks_per_second = config.ticks_per_second,
        "opening window"
    );

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            Box::new(OhdrApp::new(cc, &config, &icons, classifier, app_fatal))
        }),
    )
    .map_err(|e| GuiError::Window(e.to_string()))?;

    let failure = fatal.borrow_mut().take();
    match failure {
        Some(err) => Err(err.into()),
        None => {
            tracing::info!("window closed");
            Ok(())
        }
    }
}
