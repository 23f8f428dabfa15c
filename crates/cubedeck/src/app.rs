use eframe::egui;
use std::path::Path;
use std::time::Instant;

use tracing::{info, trace, warn};

use crate::config::Config;
use crate::deck::Deck;
use crate::presentation::dispatcher::{Capabilities, EffectDispatcher, TransitionPhase};
use crate::presentation::fullscreen::{Fullscreen, ViewportFullscreen};
use crate::presentation::input::{self, Command, PointerTarget, RouteContext};
use crate::presentation::navigator::Navigator;
use crate::presentation::overlay::StartOverlay;
use crate::presentation::state::PresentationState;
use crate::render;
use crate::render::animator::TweenTarget;
use crate::render::chrome::{self, ChromeLayout};
use crate::theme::Theme;

/// Command-line choices for a presentation run. `None`/`true` fields defer to
/// the config file.
#[derive(Debug, Clone, Copy)]
pub struct LaunchOptions {
    pub windowed: bool,
    /// 1-indexed
    pub start_slide: Option<usize>,
    pub open_navigator: bool,
    pub skip_intro: bool,
    pub animations: bool,
    pub background: bool,
}

/// Resolved settings after merging CLI flags over the config file.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Settings {
    start_index: usize,
    open_navigator: bool,
    show_intro: bool,
    animations: bool,
    background: bool,
}

impl Settings {
    fn resolve(options: &LaunchOptions, config: &Config) -> Self {
        let start_slide = options.start_slide.or(config.start_slide()).unwrap_or(1);
        Self {
            start_index: start_slide.saturating_sub(1),
            open_navigator: options.open_navigator,
            show_intro: !options.skip_intro,
            animations: options.animations && config.animations(),
            background: options.background && config.background(),
        }
    }
}

/// Raw input gathered during one frame, routed in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FrameInput {
    Key(egui::Key),
    Click(PointerTarget),
}

struct PresentationApp {
    deck: Deck,
    theme: Theme,
    state: PresentationState,
    dispatcher: EffectDispatcher,
    navigator: Navigator,
    overlay: StartOverlay,
    fullscreen: ViewportFullscreen,
}

impl PresentationApp {
    fn new(deck: Deck, theme: Theme, settings: Settings, now: Instant) -> Self {
        let mut state = PresentationState::new(deck.slides.len(), settings.start_index);
        state.set_navigator_open(settings.open_navigator);

        let capabilities = Capabilities::resolve(settings.animations, settings.background, now);
        let mut dispatcher = EffectDispatcher::new(capabilities, deck.element_counts(), &state);
        let overlay = StartOverlay::new(settings.show_intro);
        if !overlay.is_visible() {
            dispatcher.begin(&state, now);
        }

        Self {
            navigator: Navigator::new(&deck.descriptors()),
            deck,
            theme,
            state,
            dispatcher,
            overlay,
            fullscreen: ViewportFullscreen::default(),
        }
    }

    fn route_context(&self) -> RouteContext {
        RouteContext::new(&self.state, self.overlay.is_visible())
    }

    fn execute(
        &mut self,
        command: Command,
        now: Instant,
        viewport_cmds: &mut Vec<egui::ViewportCommand>,
    ) {
        match command {
            Command::Advance(direction) => {
                if let Err(reason) = self.dispatcher.advance(&mut self.state, direction, now) {
                    trace!(?command, %reason, "command dropped");
                }
            }
            Command::Jump(index) => {
                if let Err(reason) = self.dispatcher.jump(&mut self.state, index, now) {
                    trace!(?command, %reason, "command dropped");
                }
            }
            Command::Select(index) => {
                if let Err(reason) =
                    self.navigator
                        .select(index, &mut self.state, &mut self.dispatcher, now)
                {
                    trace!(?command, %reason, "command dropped");
                }
            }
            Command::ToggleNavigator => self.navigator.toggle(&mut self.state),
            Command::CloseNavigator => self.navigator.close(&mut self.state),
            Command::DismissOverlay => {
                if self.overlay.dismiss(self.dispatcher.animator_mut(), now) {
                    // The deck becomes visible under the fading overlay
                    self.dispatcher.begin(&self.state, now);
                }
            }
            Command::ExitFullscreen => {
                if let Err(e) = self.fullscreen.exit() {
                    warn!(error = %e, "could not leave full-screen");
                }
            }
            Command::ToggleFullscreen => {
                if let Err(e) = self.fullscreen.toggle() {
                    warn!(error = %e, "full-screen toggle refused");
                }
            }
            Command::Quit => viewport_cmds.push(egui::ViewportCommand::Close),
        }
    }

    /// Route and run this frame's input, then advance animations to `now`.
    /// Each input is routed against the state the previous one left behind.
    /// Returns the viewport commands to send.
    fn process(&mut self, inputs: Vec<FrameInput>, now: Instant) -> Vec<egui::ViewportCommand> {
        let mut viewport_cmds = Vec::new();
        for frame_input in inputs {
            let route = self.route_context();
            let command = match frame_input {
                FrameInput::Key(key) => input::route_key(key, route),
                FrameInput::Click(target) => input::route_click(target, route),
            };
            if let Some(command) = command {
                self.execute(command, now, &mut viewport_cmds);
            }
        }

        let completed = self.dispatcher.update(&mut self.state, now);
        if self.overlay.poll(&completed, now) {
            if let Err(e) = self.fullscreen.request() {
                warn!(error = %e, "full-screen request refused");
            }
        }

        viewport_cmds.extend(self.fullscreen.take_commands());
        viewport_cmds
    }

    fn draw(&self, painter: &egui::Painter, layout: &ChromeLayout, hover: Option<egui::Pos2>) {
        let rect = layout.rect;
        painter.rect_filled(rect, 0.0, self.theme.background);
        self.dispatcher.scene().paint(painter, rect);

        let view = self.dispatcher.chrome();
        if let Some(slide) = self.deck.slides.get(view.active_slide) {
            let active = view.active_slide;
            render::slide::render(
                painter,
                slide,
                &self.theme,
                rect,
                layout.scale,
                self.dispatcher.props(TweenTarget::Slide(active)),
                |index| {
                    self.dispatcher
                        .props(TweenTarget::Element { slide: active, index })
                },
            );
        }

        let navigator_open = self.state.is_navigator_open();
        let hovered = hover.and_then(|pos| layout.hit_test(pos, navigator_open, false));
        chrome::draw_progress(painter, layout, &self.theme, view.progress_percent);
        chrome::draw_counter(painter, layout, &self.theme, &view.counter);
        let busy = self.dispatcher.phase() != TransitionPhase::Idle;
        chrome::draw_buttons(painter, layout, &self.theme, hovered, busy);
        if navigator_open {
            chrome::draw_navigator(
                painter,
                layout,
                &self.theme,
                self.navigator.thumbnails(),
                view.highlighted,
                hovered,
            );
        }

        if self.overlay.is_visible() {
            let opacity = self.dispatcher.props(TweenTarget::Overlay).opacity;
            chrome::draw_overlay(painter, layout, &self.theme, &self.deck.title, opacity);
        }
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let route = self.route_context();

        // Collect input first; viewport commands are sent AFTER the input
        // closure (sending inside ctx.input() causes RwLock deadlock)
        let mut inputs = Vec::new();
        let (fullscreen, clicked, hover) = ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    ..
                } = event
                {
                    inputs.push(FrameInput::Key(*key));
                }
            }
            (
                i.viewport().fullscreen,
                i.pointer.primary_clicked(),
                i.pointer.hover_pos(),
            )
        });
        self.fullscreen.observe(fullscreen);

        let mut viewport_cmds = Vec::new();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.background).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let scale = render::compute_scale(rect);
                let layout = ChromeLayout::new(rect, scale, self.navigator.thumbnails().len());

                if clicked {
                    if let Some(target) = hover.and_then(|pos| {
                        layout.hit_test(pos, route.navigator_open, route.overlay_visible)
                    }) {
                        inputs.push(FrameInput::Click(target));
                    }
                }
                if let Some(pos) = hover {
                    self.dispatcher.scene_mut().set_pointer(pos - rect.center());
                }

                viewport_cmds = self.process(std::mem::take(&mut inputs), now);
                self.draw(ui.painter(), &layout, hover);
            });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        if self.dispatcher.needs_repaint() {
            ctx.request_repaint();
        }
    }
}

pub fn run(file: Option<&Path>, options: LaunchOptions) -> anyhow::Result<()> {
    let deck = Deck::load_or_builtin(file)?;
    let config = Config::load_or_default();
    let settings = Settings::resolve(&options, &config);
    let theme = Theme::from_name(config.theme());

    info!(
        deck = %deck.title,
        slides = deck.slides.len(),
        start = settings.start_index + 1,
        theme = %theme.name,
        "starting presentation"
    );

    let title = format!("cubedeck - {}", deck.title);
    let viewport = if options.windowed {
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

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(PresentationApp::new(
                deck,
                theme,
                settings,
                Instant::now(),
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
