use crossbeam_channel::Receiver;
use rocca::{
    controller::LocationFactory, ChannelLocationSource, ControllerConfig, HeadlessSurface, LatLng,
    LocationSource, LocationUpdate, MapController, MapType, Point, TextLabel, TouchInput,
    TouchTarget,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Simulated GPS latency for the locate gesture
const FIX_DELAY: Duration = Duration::from_millis(800);

/// Command line: `rocca-app [--config <file.json>] [--device <lat>,<lng>]`
struct AppArgs {
    config: ControllerConfig,
    device_position: Option<LatLng>,
}

impl AppArgs {
    fn parse() -> anyhow::Result<Self> {
        let mut config = ControllerConfig::default();
        let mut device_position = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--config needs a file path"))?;
                    config = ControllerConfig::from_file(&path)
                        .map_err(|e| anyhow::anyhow!("loading {}: {}", path, e))?;
                }
                "--device" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--device needs <lat>,<lng>"))?;
                    device_position = Some(parse_lat_lng(&value)?);
                }
                other => anyhow::bail!("unknown argument '{}'", other),
            }
        }

        Ok(Self {
            config,
            device_position,
        })
    }
}

fn parse_lat_lng(value: &str) -> anyhow::Result<LatLng> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("expected <lat>,<lng>, got '{}'", value))?;
    let position = LatLng::new(lat.trim().parse()?, lng.trim().parse()?);
    if !position.is_valid() {
        anyhow::bail!("device position {} is out of range", position);
    }
    Ok(position)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = AppArgs::parse()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 760.0])
            .with_title("Rocca dei Rettori"),
        ..Default::default()
    };

    eframe::run_native(
        "rocca-app",
        options,
        Box::new(move |_cc| match RoccaApp::new(args) {
            Ok(app) => Box::new(app) as Box<dyn eframe::App>,
            Err(e) => {
                log::error!("failed to start map controller: {}", e);
                std::process::exit(1);
            }
        }),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {}", e))?;

    Ok(())
}

struct RoccaApp {
    controller: MapController<HeadlessSurface, TextLabel>,
    /// Filled in when the controller first builds its location source
    location_updates: Rc<RefCell<Option<Receiver<LocationUpdate>>>>,
    /// Area the current touch started in; positions are local to it
    touch_rect: Option<egui::Rect>,
    last_touch_pos: Option<egui::Pos2>,
    window_focused: bool,
}

impl RoccaApp {
    fn new(args: AppArgs) -> anyhow::Result<Self> {
        let location_updates = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&location_updates);
        let device_position = args.device_position;

        let factory: LocationFactory = Box::new(move || {
            let (source, rx) = ChannelLocationSource::channel(device_position);
            *slot.borrow_mut() = Some(rx);
            Box::new(source.with_fix_delay(FIX_DELAY)) as Box<dyn LocationSource>
        });

        let controller = MapController::new(
            args.config,
            HeadlessSurface::new(Point::new(420.0, 700.0)),
            TextLabel::new("Rocca dei Rettori"),
            factory,
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(Self {
            controller,
            location_updates,
            touch_rect: None,
            last_touch_pos: None,
            window_focused: true,
        })
    }

    fn drain_location_updates(&mut self) {
        let updates: Vec<LocationUpdate> = match self.location_updates.borrow().as_ref() {
            Some(rx) => rx.try_iter().collect(),
            None => return,
        };
        for update in updates {
            self.controller.on_location_update(&update);
        }
    }

    /// Translates the primary pointer into touches for the recognizer
    fn feed_pointer(&mut self, ctx: &egui::Context, label_rect: egui::Rect, map_rect: egui::Rect) {
        let now = Instant::now();
        let (focused, pressed, released, pos) = ctx.input(|i| {
            (
                i.focused,
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });

        if self.window_focused && !focused {
            log::debug!("window lost focus, dropping touches in flight");
            self.touch_rect = None;
            self.last_touch_pos = None;
            self.controller.cancel_touches();
        }
        self.window_focused = focused;
        if !focused {
            return;
        }

        if pressed {
            if let Some(pos) = pos {
                let target = if label_rect.contains(pos) {
                    Some((TouchTarget::Label, label_rect))
                } else if map_rect.contains(pos) {
                    Some((TouchTarget::Map, map_rect))
                } else {
                    None
                };
                if let Some((target, rect)) = target {
                    self.touch_rect = Some(rect);
                    self.last_touch_pos = Some(pos);
                    let position = to_local(pos, rect);
                    self.controller
                        .dispatch_touch(TouchInput::Down { position, target }, now);
                }
            }
        } else if let Some(rect) = self.touch_rect {
            if let Some(pos) = pos {
                if self.last_touch_pos != Some(pos) {
                    self.last_touch_pos = Some(pos);
                    let position = to_local(pos, rect);
                    self.controller
                        .dispatch_touch(TouchInput::Move { position }, now);
                }
            }
        }

        if released {
            if let Some(rect) = self.touch_rect.take() {
                let position = self
                    .last_touch_pos
                    .take()
                    .map(|pos| to_local(pos, rect))
                    .unwrap_or_default();
                self.controller
                    .dispatch_touch(TouchInput::Up { position }, now);
            }
        }

        self.controller.poll(now);
    }

    fn paint_map(&self, painter: &egui::Painter, rect: egui::Rect) {
        let (background, grid) = map_colors(self.controller.map_type());
        painter.rect_filled(rect, 0.0, background);

        for step in 1..8 {
            let t = step as f32 / 8.0;
            let x = rect.left() + rect.width() * t;
            let y = rect.top() + rect.height() * t;
            painter.line_segment(
                [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
                egui::Stroke::new(1.0, grid),
            );
            painter.line_segment(
                [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
                egui::Stroke::new(1.0, grid),
            );
        }

        let surface = self.controller.surface();
        for (_, coordinate) in surface.annotations() {
            let point = surface.point_for(coordinate);
            let pos = rect.min + egui::vec2(point.x as f32, point.y as f32);
            if rect.contains(pos) {
                painter.circle_filled(pos, 9.0, egui::Color32::from_rgb(220, 40, 40));
                painter.circle_stroke(pos, 9.0, egui::Stroke::new(2.0, egui::Color32::WHITE));
            }
        }

        painter.text(
            rect.left_bottom() + egui::vec2(8.0, -8.0),
            egui::Align2::LEFT_BOTTOM,
            self.controller.map_type().label(),
            egui::FontId::proportional(12.0),
            egui::Color32::from_gray(60),
        );
    }
}

fn to_local(pos: egui::Pos2, rect: egui::Rect) -> Point {
    Point::new((pos.x - rect.left()) as f64, (pos.y - rect.top()) as f64)
}

fn map_colors(map_type: MapType) -> (egui::Color32, egui::Color32) {
    match map_type {
        MapType::Standard => (egui::Color32::from_rgb(236, 232, 220), egui::Color32::from_gray(205)),
        MapType::Hybrid => (egui::Color32::from_rgb(70, 90, 60), egui::Color32::from_rgb(240, 220, 120)),
        MapType::HybridFlyover => (egui::Color32::from_rgb(60, 80, 70), egui::Color32::from_rgb(250, 230, 140)),
        MapType::MutedStandard => (egui::Color32::from_gray(225), egui::Color32::from_gray(210)),
        MapType::Satellite => (egui::Color32::from_rgb(55, 75, 50), egui::Color32::from_rgb(75, 95, 70)),
        MapType::SatelliteFlyover => (egui::Color32::from_rgb(45, 65, 60), egui::Color32::from_rgb(70, 90, 85)),
    }
}

impl eframe::App for RoccaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_location_updates();

        let mut label_rect = egui::Rect::NOTHING;
        egui::TopBottomPanel::top("status_label").show(ctx, |ui| {
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), 36.0),
                egui::Sense::click(),
            );
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.controller.label().text(),
                egui::FontId::proportional(18.0),
                ui.visuals().text_color(),
            );
            label_rect = rect;
        });

        let mut map_rect = egui::Rect::NOTHING;
        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            map_rect = rect;

            self.controller
                .surface_mut()
                .set_size(Point::new(rect.width() as f64, rect.height() as f64));

            if response.dragged() {
                let delta = response.drag_delta();
                self.controller
                    .surface_mut()
                    .pan_by(Point::new(delta.x as f64, delta.y as f64));
            }
            let zoom = ctx.input(|i| i.zoom_delta());
            if response.hovered() && zoom != 1.0 {
                self.controller.surface_mut().zoom_by(zoom as f64);
            }

            self.paint_map(ui.painter(), rect);
        });

        self.feed_pointer(ctx, label_rect, map_rect);

        ctx.request_repaint_after(Duration::from_millis(50));
    }
}
