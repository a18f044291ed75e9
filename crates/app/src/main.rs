//! Real-time unicycle robot viewer.
//!
//! Per-frame control loop, in strict order: sample input -> update the
//! velocity command -> (if running) one fixed-size integration step ->
//! rebuild the model matrix -> paint through the camera's view/projection
//! matrices. Single-threaded, no blocking; the loop owns every piece of
//! state and threads it explicitly.
//!
//! Controls:
//! - W/S: bump linear velocity up/down (one step per press)
//! - A/D: turn left/right while held
//! - R: reset pose and velocities
//! - Space: start/stop the integration
//! - Scroll: zoom (narrows/widens the camera field of view)

mod config;

use config::SimConfig;
use control::{InputMapper, InputSnapshot};
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};
use mechanics::UnicycleKinematics;
use nalgebra::{Matrix4, Point3};
use render::{Camera, TransformComposer};
use simcore::{KinematicsModel, Model, Pose, SimContext, SimState};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

const CONFIG_PATH: &str = "sim_config.json";
const PLOT_DT: f64 = 1e-2;
const TRACE_WINDOW_S: f64 = 10.0;
const SCROLL_SENSITIVITY: f32 = 0.05;
const GRID_HALF_EXTENT: i32 = 20;
const ROBOT_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 50, 50);

fn main() -> eframe::Result<()> {
    let _ = TermLogger::init(
        LevelFilter::Info,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let config = SimConfig::load_or_default(Path::new(CONFIG_PATH));
    log::info!(
        "starting simulator: vehicle {}x{} m, dt {} s",
        config.vehicle.length,
        config.vehicle.width,
        config.dt
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Unicycle Simulator"),
        ..Default::default()
    };
    eframe::run_native(
        "Unicycle Simulator",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(config)))),
    )
}

/// Bounded telemetry ring: keeps the last `TRACE_WINDOW_S` seconds of
/// velocity, turn rate, and ground-plane position samples.
struct Trace {
    t: VecDeque<f64>,
    v: VecDeque<f64>,
    omega: VecDeque<f64>,
    px: VecDeque<f64>,
    py: VecDeque<f64>,
    capacity: usize,
}

impl Trace {
    fn new(seconds: f64, sample_dt: f64) -> Self {
        let capacity = (seconds / sample_dt).ceil() as usize + 1;
        Self {
            t: VecDeque::with_capacity(capacity),
            v: VecDeque::with_capacity(capacity),
            omega: VecDeque::with_capacity(capacity),
            px: VecDeque::with_capacity(capacity),
            py: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, t: f64, v: f64, omega: f64, px: f64, py: f64) {
        self.t.push_back(t);
        self.v.push_back(v);
        self.omega.push_back(omega);
        self.px.push_back(px);
        self.py.push_back(py);
        self.trim();
    }

    fn trim(&mut self) {
        while self.t.len() > self.capacity { self.t.pop_front(); }
        while self.v.len() > self.capacity { self.v.pop_front(); }
        while self.omega.len() > self.capacity { self.omega.pop_front(); }
        while self.px.len() > self.capacity { self.px.pop_front(); }
        while self.py.len() > self.capacity { self.py.pop_front(); }
    }

    fn clear(&mut self) {
        self.t.clear();
        self.v.clear();
        self.omega.clear();
        self.px.clear();
        self.py.clear();
    }

    fn line<'a>(points: &'a VecDeque<f64>, t: &'a VecDeque<f64>) -> PlotPoints<'a> {
        PlotPoints::from_iter(t.iter().copied().zip(points.iter().copied()).map(|(x, y)| [x, y]))
    }
}

struct App {
    config: SimConfig,
    kinematics: UnicycleKinematics,
    mapper: InputMapper,
    state: SimState,
    camera: Camera,
    composer: TransformComposer,

    t: f64,
    trace: Trace,

    view_show_grid: bool,
    view_show_path: bool,
    window_s: f64,
}

impl App {
    fn new(config: SimConfig) -> Self {
        let mapper = InputMapper::new(config.linear_step, config.angular_step_deg);
        let state = SimState::default();

        // Top-down-like view: orientation is locked looking down -Z, so
        // placing the camera above the origin frames the ground plane with
        // world X right and world Y up. Orientation never changes after
        // this, so one update() suffices.
        let mut camera = Camera::default();
        camera.position = Point3::new(0.0, 0.0, config.camera_height);
        camera.update();

        let composer = TransformComposer::new(&state.pose, &config.vehicle);

        Self {
            config,
            kinematics: UnicycleKinematics,
            mapper,
            state,
            camera,
            composer,
            t: 0.0,
            trace: Trace::new(TRACE_WINDOW_S, PLOT_DT),
            view_show_grid: true,
            view_show_path: true,
            window_s: TRACE_WINDOW_S,
        }
    }

    fn sample_input(ctx: &egui::Context) -> InputSnapshot {
        ctx.input(|i| InputSnapshot {
            faster_pressed: i.key_pressed(egui::Key::W),
            slower_pressed: i.key_pressed(egui::Key::S),
            turn_left_held: i.key_down(egui::Key::A),
            turn_right_held: i.key_down(egui::Key::D),
            reset_pressed: i.key_pressed(egui::Key::R),
            run_toggle_pressed: i.key_pressed(egui::Key::Space),
            scroll_delta: i.raw_scroll_delta.y,
        })
    }

    /// Pose to origin, velocities already zeroed by the mapper; the model
    /// matrix is rebuilt immediately rather than waiting for the next step.
    fn apply_reset(&mut self) {
        self.state.pose = Pose::origin();
        self.composer.rebuild(&self.state.pose, &self.config.vehicle);
        self.trace.clear();
        log::info!("pose and velocities reset");
    }

    fn step_once(&mut self) {
        self.kinematics.step_kinematics(
            SimContext {
                dt: self.config.dt,
                t: self.t,
            },
            &mut self.state,
        );
        self.t += self.config.dt;

        if (self.trace.t.back().copied().unwrap_or(0.0) + PLOT_DT) <= self.t {
            self.trace.push(
                self.t,
                self.state.command.linear,
                self.state.command.angular.to_radians(),
                self.state.pose.x,
                self.state.pose.y,
            );
        }
    }

    fn draw_viewport(&self, ui: &mut egui::Ui, height_px: f32) {
        let desired = egui::vec2(ui.available_width(), height_px);
        let (response, painter) = ui.allocate_painter(desired, egui::Sense::hover());
        let rect = response.rect;

        let aspect = rect.width() / rect.height();
        let view_projection = self.camera.projection_matrix(aspect) * self.camera.view_matrix();

        // Clip -> NDC -> panel coordinates. Points at or behind the eye
        // plane are dropped.
        let project = |m: &Matrix4<f32>, p: Point3<f32>| -> Option<egui::Pos2> {
            let clip = m * p.to_homogeneous();
            if clip.w <= 0.0 {
                return None;
            }
            let ndc_x = clip.x / clip.w;
            let ndc_y = clip.y / clip.w;
            Some(egui::pos2(
                rect.center().x + ndc_x * rect.width() * 0.5,
                rect.center().y - ndc_y * rect.height() * 0.5,
            ))
        };

        painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);

        // Ground grid, 1 m spacing, drawn in world space through the
        // view/projection alone (model = identity).
        if self.view_show_grid {
            let stroke = egui::Stroke::new(1.0, ui.visuals().weak_text_color());
            let half = GRID_HALF_EXTENT as f32;
            for i in -GRID_HALF_EXTENT..=GRID_HALF_EXTENT {
                let w = i as f32;
                if let (Some(p1), Some(p2)) = (
                    project(&view_projection, Point3::new(w, -half, 0.0)),
                    project(&view_projection, Point3::new(w, half, 0.0)),
                ) {
                    painter.line_segment([p1, p2], stroke);
                }
                if let (Some(p1), Some(p2)) = (
                    project(&view_projection, Point3::new(-half, w, 0.0)),
                    project(&view_projection, Point3::new(half, w, 0.0)),
                ) {
                    painter.line_segment([p1, p2], stroke);
                }
            }
        }

        // World axes at the origin.
        if let (Some(o), Some(px_), Some(py_)) = (
            project(&view_projection, Point3::origin()),
            project(&view_projection, Point3::new(0.5, 0.0, 0.0)),
            project(&view_projection, Point3::new(0.0, 0.5, 0.0)),
        ) {
            painter.line_segment([o, px_], egui::Stroke::new(3.0, egui::Color32::RED));
            painter.line_segment([o, py_], egui::Stroke::new(3.0, egui::Color32::GREEN));
        }

        // Traveled path.
        if self.view_show_path && self.trace.px.len() > 1 {
            let points: Vec<egui::Pos2> = self
                .trace
                .px
                .iter()
                .copied()
                .zip(self.trace.py.iter().copied())
                .filter_map(|(x, y)| {
                    project(&view_projection, Point3::new(x as f32, y as f32, 0.0))
                })
                .collect();
            painter.add(egui::Shape::line(
                points,
                egui::Stroke::new(2.0, egui::Color32::LIGHT_BLUE),
            ));
        }

        // Vehicle: the unit-cube footprint carried through the full
        // model-view-projection chain. The model matrix supplies pose and
        // extents, so the corners here are plain object-space constants.
        let mvp = view_projection * self.composer.model();
        let corners = [
            Point3::new(-0.5, -0.5, 0.0),
            Point3::new(0.5, -0.5, 0.0),
            Point3::new(0.5, 0.5, 0.0),
            Point3::new(-0.5, 0.5, 0.0),
        ];
        let footprint: Vec<egui::Pos2> = corners
            .into_iter()
            .filter_map(|c| project(&mvp, c))
            .collect();
        if footprint.len() == corners.len() {
            painter.add(egui::Shape::convex_polygon(
                footprint,
                ROBOT_COLOR.gamma_multiply(0.6),
                egui::Stroke::new(2.0, ROBOT_COLOR),
            ));
        }

        // Nose marker: object-space +Y is the vehicle's forward direction.
        if let (Some(tail), Some(nose)) = (
            project(&mvp, Point3::origin()),
            project(&mvp, Point3::new(0.0, 0.75, 0.0)),
        ) {
            painter.line_segment([tail, nose], egui::Stroke::new(3.0, egui::Color32::YELLOW));
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let input = Self::sample_input(ctx);
        let actions = self.mapper.sample(&input);

        if input.scroll_delta != 0.0 {
            self.camera.update_zoom(input.scroll_delta * SCROLL_SENSITIVITY);
        }
        if actions.reset {
            self.apply_reset();
        }

        // The integrator reads the command off the state bus.
        self.state.command = self.mapper.command();

        // Exactly one fixed-size step per rendered frame while running;
        // while stopped the velocities stay settable but inert.
        if self.mapper.running() {
            self.step_once();
            self.composer.rebuild(&self.state.pose, &self.config.vehicle);
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                let run_label = if self.mapper.running() { "Stop" } else { "Start" };
                if ui.button(run_label).clicked() {
                    self.mapper.toggle_running();
                }
                if ui.button("Reset").clicked() {
                    self.mapper.reset();
                    self.apply_reset();
                }

                ui.separator();
                ui.label(format!(
                    "Pose: x={:.2} y={:.2} heading={:.1} deg",
                    self.state.pose.x,
                    self.state.pose.y,
                    self.state.pose.heading.to_degrees()
                ));
                ui.label(format!(
                    "v={:.2} u/s  w={:.0} deg/s",
                    self.state.command.linear, self.state.command.angular
                ));
                ui.separator();
                ui.label(format!("FOV: {:.0} deg", self.camera.zoom));
            });
            ui.horizontal(|ui| {
                ui.label("W/S: speed +/-  A/D: turn  R: reset  Space: start/stop  Scroll: zoom");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.checkbox(&mut self.view_show_grid, "Grid");
                ui.checkbox(&mut self.view_show_path, "Path");
            });
            self.draw_viewport(ui, (ui.available_height() - 200.0).max(240.0));

            ui.separator();

            Plot::new("command_plot")
                .legend(Legend::default())
                .allow_scroll(false)
                .height(170.0)
                .show(ui, |plot_ui| {
                    let x_min = (self.t - self.window_s).max(0.0);
                    let x_max = self.t.max(self.window_s * 0.1);
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, -3.0], [x_max, 3.0]));
                    plot_ui.line(Line::new("v (u/s)", Trace::line(&self.trace.v, &self.trace.t)));
                    plot_ui.line(Line::new(
                        "w (rad/s)",
                        Trace::line(&self.trace.omega, &self.trace.t),
                    ));
                });
        });

        ctx.request_repaint_after(Duration::from_millis(10));
    }
}
