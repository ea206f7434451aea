// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod angle;
pub mod canvas;
pub mod compass;
pub mod config;
pub mod error;
pub mod geometry;
pub mod label;
pub mod ladder;
pub mod scene;
pub mod section;
pub mod state;
pub mod ticks;

// External crate imports
use bon::Builder;
use log::{error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;

// Standard library imports
use std::path::PathBuf;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use canvas::{load_font, Canvas, FontMeasure};

pub use compass::{CompassRenderer, RedrawPhase};
pub use config::{
    Color, GaugeConfig, GaugeMode, GaugeStyle, LadderConfig, LadderTheme, LineStyle, Padding, Part,
    PartStyle, TextStyle,
};
pub use error::{ConfigError, HudError};
pub use geometry::{Area, Point, Size};
pub use ladder::LadderRenderer;
pub use scene::{DrawBackend, DrawCommand, Scene, TextMeasure};
pub use section::{Section, StyleOverride};
pub use state::{Orientation, SharedOrientation, Snapshot};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

#[derive(Debug, Clone, Builder)]
pub struct HudConfig {
    #[builder(default = "HUD".to_string(), into)]
    pub title: String,

    // Window configuration
    #[builder(default = 320)]
    pub window_width: usize,
    #[builder(default = 240)]
    pub window_height: usize,
    #[builder(default = 30.0)]
    pub max_framerate: f64,
    #[builder(default = Color::BLACK)]
    pub background_color: Color,

    /// TrueType/OpenType font for labels; labels are skipped without one
    pub font_path: Option<PathBuf>,

    // Gauges
    pub compass: GaugeConfig,
    #[builder(default)]
    pub compass_sections: Vec<Section>,
    #[builder(default)]
    pub ladder: LadderConfig,
    #[builder(default)]
    pub ladder_sections: Vec<Section>,
}

/// Heading compass and attitude ladder sharing one window.
pub struct Hud {
    config: HudConfig,
    compass: CompassRenderer,
    ladder: LadderRenderer,
    font: Option<Font<'static>>,
}

impl Hud {
    pub fn new(config: HudConfig) -> Result<Self, HudError> {
        let mut compass = CompassRenderer::new(config.compass.clone())?;
        for section in &config.compass_sections {
            compass.add_section(section.clone());
        }
        let mut ladder = LadderRenderer::new(config.ladder.clone())?;
        for section in &config.ladder_sections {
            ladder.add_section(section.clone());
        }

        let font = config.font_path.as_deref().map(load_font).transpose()?;
        if font.is_none() {
            warn!("no font configured, labels will not be drawn");
        }

        Ok(Self {
            config,
            compass,
            ladder,
            font,
        })
    }

    pub fn compass_mut(&mut self) -> &mut CompassRenderer {
        &mut self.compass
    }

    pub fn ladder_mut(&mut self) -> &mut LadderRenderer {
        &mut self.ladder
    }

    /// Redraw both gauges into an RGBA frame if a new sample arrived (or
    /// `force` is set). Returns whether the frame changed.
    pub fn render_frame(
        &mut self,
        shared: &SharedOrientation,
        frame: &mut [u8],
        width: usize,
        height: usize,
        force: bool,
    ) -> bool {
        if !force && !self.compass.needs_redraw(shared) && !self.ladder.needs_redraw(shared) {
            return false;
        }
        // one sample for both gauges
        let snapshot = shared.snapshot();
        let measure = FontMeasure::new(self.font.as_ref());
        let compass = self.compass.redraw_snapshot(&snapshot, &measure);
        let ladder = self.ladder.redraw_snapshot(&snapshot, &measure);

        let mut canvas = Canvas::new(frame, width, height, self.font.as_ref());
        canvas.clear(self.config.background_color);
        compass.render(&mut canvas);
        ladder.render(&mut canvas);
        true
    }

    /// Open the window and draw `shared` until it is closed.
    pub fn show(mut self, shared: SharedOrientation) -> Result<(), HudError> {
        let logical_width = self.config.window_width;
        let logical_height = self.config.window_height;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                logical_width as f64,
                logical_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
        info!(
            "{}: {}x{} px at up to {} fps",
            self.config.title, fb_width, fb_height, self.config.max_framerate
        );

        let frame_duration = Duration::from_secs_f64(1.0 / self.config.max_framerate);
        let mut last_frame = Instant::now();
        let mut force = true;

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                            warn!("resize_buffer failed: {err}");
                        }
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            warn!("resize_surface failed: {err}");
                        }
                        force = true;
                    }
                    WindowEvent::RedrawRequested => {
                        let frame = pixels.frame_mut();
                        if self.render_frame(&shared, frame, fb_width, fb_height, force) {
                            force = false;
                        }
                        if let Err(err) = pixels.render() {
                            error!("render failed: {err}");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::degrees_to_tenths;

    fn config() -> HudConfig {
        HudConfig::builder()
            .compass(
                GaugeConfig::builder()
                    .area(Area::new(0, 0, 319, 39))
                    .build(),
            )
            .ladder(
                LadderConfig::builder()
                    .origin(Point::new(120, 100))
                    .build(),
            )
            .build()
    }

    #[test]
    fn renders_only_on_new_samples() {
        let shared = SharedOrientation::new();
        let mut hud = Hud::new(config()).unwrap();
        let (w, h) = (320, 240);
        let mut frame = vec![0u8; w * h * 4];

        assert!(hud.render_frame(&shared, &mut frame, w, h, false));
        assert!(!hud.render_frame(&shared, &mut frame, w, h, false));
        assert!(hud.render_frame(&shared, &mut frame, w, h, true));

        shared.publish(Orientation::new(900, 100, 0));
        assert!(hud.render_frame(&shared, &mut frame, w, h, false));
        assert_eq!(hud.compass_mut().value(), 90.0);
        // light ladder background between two rungs
        let i = (118 * w + 140) * 4;
        assert_eq!(&frame[i..i + 3], &[0xff, 0xff, 0xff]);
    }

    #[test]
    fn both_gauges_draw_the_same_sample() {
        let shared = SharedOrientation::new();
        let mut hud = Hud::new(config()).unwrap();
        let (w, h) = (320, 240);
        let mut frame = vec![0u8; w * h * 4];

        let writer = {
            let shared = shared.clone();
            std::thread::spawn(move || {
                for i in 1..=500 {
                    shared.publish(Orientation::new(i, i, i));
                }
            })
        };
        for _ in 0..200 {
            hud.render_frame(&shared, &mut frame, w, h, true);
            let heading = degrees_to_tenths(hud.compass_mut().value());
            let (pitch, roll) = hud.ladder_mut().attitude();
            assert_eq!((heading, heading), (pitch, roll));
        }
        writer.join().unwrap();
    }

    #[test]
    fn rejects_invalid_gauges() {
        let mut config = config();
        config.compass.total_tick_count = 1;
        assert!(matches!(
            Hud::new(config),
            Err(HudError::Config(ConfigError::TooFewTicks(1)))
        ));
    }

    #[test]
    fn missing_font_is_an_error() {
        let mut config = config();
        config.font_path = Some(PathBuf::from("/definitely/not/here.ttf"));
        assert!(matches!(Hud::new(config), Err(HudError::FontRead { .. })));
    }
}
