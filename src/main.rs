use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hud_gauges::angle::{wrap_pitch_tenths, wrap_roll_tenths};
use hud_gauges::{
    Area, Color, GaugeConfig, GaugeMode, Hud, HudConfig, LadderConfig, LadderTheme, Orientation,
    Part, Point, Section, SharedOrientation, StyleOverride,
};
use log::{debug, info};
use rand::Rng;

const WINDOW_WIDTH: usize = 320;
const WINDOW_HEIGHT: usize = 240;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompassMode {
    Top,
    Bottom,
    Left,
    Right,
    Inner,
    Outer,
}

impl From<CompassMode> for GaugeMode {
    fn from(mode: CompassMode) -> Self {
        match mode {
            CompassMode::Top => GaugeMode::HorizontalTop,
            CompassMode::Bottom => GaugeMode::HorizontalBottom,
            CompassMode::Left => GaugeMode::VerticalLeft,
            CompassMode::Right => GaugeMode::VerticalRight,
            CompassMode::Inner => GaugeMode::RoundInner,
            CompassMode::Outer => GaugeMode::RoundOuter,
        }
    }
}

/// Heading compass and pitch/roll ladder fed by a simulated gyroscope
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value = "HUD")]
    title: String,

    /// TrueType/OpenType font for labels
    #[arg(long)]
    font: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = CompassMode::Bottom)]
    compass_mode: CompassMode,

    /// Sensor samples per second
    #[arg(long, default_value_t = 20.0)]
    rate_hz: f64,

    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    #[arg(long)]
    dark: bool,
}

fn compass_config(mode: GaugeMode) -> GaugeConfig {
    let w = WINDOW_WIDTH as i32;
    let builder = GaugeConfig::builder().mode(mode);
    match mode {
        GaugeMode::HorizontalTop => builder.area(Area::new(10, 180, w - 11, 229)).build(),
        GaugeMode::HorizontalBottom => builder.area(Area::new(10, 10, w - 11, 59)).build(),
        GaugeMode::VerticalLeft => builder.area(Area::new(w - 70, 10, w - 11, 229)).build(),
        GaugeMode::VerticalRight => builder.area(Area::new(10, 10, 69, 229)).build(),
        GaugeMode::RoundInner | GaugeMode::RoundOuter => builder
            .area(Area::new(10, 10, 109, 109))
            .range_min(0.0)
            .range_max(360.0)
            .angle_range(360)
            .rotation(-90)
            .major_tick_every(3)
            .total_tick_count(13)
            .text_source(["N", "E", "S", "W"].map(String::from).to_vec())
            .needle_length(-20)
            .build(),
    }
}

/// Random-walk attitude publisher.
fn spawn_producer(shared: SharedOrientation, rate_hz: f64) {
    let period = Duration::from_secs_f64(1.0 / rate_hz.max(0.1));
    thread::spawn(move || {
        let mut rng = rand::rng();
        let mut orientation = Orientation::default();
        loop {
            orientation.heading = (orientation.heading + rng.random_range(-5..=15)).rem_euclid(3600);
            orientation.pitch = wrap_pitch_tenths(orientation.pitch + rng.random_range(-8..=8));
            orientation.roll = wrap_roll_tenths(orientation.roll + rng.random_range(-12..=12));
            debug!("sample {orientation:?}");
            shared.publish(orientation);
            thread::sleep(period);
        }
    });
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let warning = Section::new(-90.0, -30.0).with_style(
        Part::Indicator,
        StyleOverride::default().line_color(Color::new(0xff, 0x40, 0x00)),
    );
    let config = HudConfig::builder()
        .title(args.title)
        .window_width(WINDOW_WIDTH)
        .window_height(WINDOW_HEIGHT)
        .max_framerate(args.fps)
        .maybe_font_path(args.font)
        .compass(compass_config(args.compass_mode.into()))
        .ladder(
            LadderConfig::builder()
                .origin(Point::new(120, 94))
                .theme(if args.dark {
                    LadderTheme::Dark
                } else {
                    LadderTheme::Light
                })
                .build(),
        )
        .ladder_sections(vec![warning])
        .build();

    let hud = Hud::new(config).context("invalid HUD configuration")?;
    let shared = SharedOrientation::new();
    spawn_producer(shared.clone(), args.rate_hz);
    info!("producer running at {} Hz", args.rate_hz);

    hud.show(shared).context("display failed")?;
    Ok(())
}
