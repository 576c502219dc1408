// SPDX-License-Identifier: MIT OR Apache-2.0
//! `canvas_tween_demo` - play a RON scene through a timeline
//!
//! Usage: `canvas_tween_demo [SCENE.ron] [--simulate] [--frames N]`
//!
//! Without `--simulate` the scene plays in real time at roughly 60 fps.
//! With it, frames are generated synthetically as fast as possible.

use canvas_tween_demo::{Canvas, SceneConfig, SceneError, SystemFrameSource, DEFAULT_SCENE};
use canvas_tween_timeline::{ManualFrameSource, Timeline, TimelineOptions};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const FRAME_MS: f64 = 1000.0 / 60.0;
const DEFAULT_MAX_FRAMES: usize = 1200;

#[derive(Debug, Default)]
struct DemoArgs {
    scene: Option<PathBuf>,
    simulate: bool,
    max_frames: Option<usize>,
}

impl DemoArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Self {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--simulate" => parsed.simulate = true,
                "--frames" => parsed.max_frames = args.next().and_then(|n| n.parse().ok()),
                _ => parsed.scene = Some(PathBuf::from(arg)),
            }
        }
        parsed
    }
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("canvas_tween_demo=debug".parse().expect("static directive"))
        .add_directive("canvas_tween_timeline=debug".parse().expect("static directive"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting canvas tween demo v{}", env!("CARGO_PKG_VERSION"));

    let args = DemoArgs::parse(std::env::args().skip(1));
    if let Err(e) = run(&args) {
        tracing::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}

fn run(args: &DemoArgs) -> Result<(), SceneError> {
    let scene = match &args.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::from_ron(DEFAULT_SCENE)?,
    };
    let max_frames = args.max_frames.unwrap_or(DEFAULT_MAX_FRAMES);

    let frames = if args.simulate {
        let source = ManualFrameSource::new();
        let (canvas, timeline) = scene.build(options(), source.clone())?;
        drive(canvas, timeline, max_frames, || source.advance(FRAME_MS))
    } else {
        let source = SystemFrameSource::new();
        let (canvas, timeline) = scene.build(options(), source.clone())?;
        let interval = Duration::from_secs_f64(FRAME_MS / 1000.0);
        drive(canvas, timeline, max_frames, || source.wait_frame(interval))
    };

    tracing::info!("Delivered {frames} frames");
    Ok(())
}

fn options() -> TimelineOptions {
    TimelineOptions::new()
        .on_repeat(|| tracing::info!("Timeline repeating"))
        .on_complete(|| tracing::info!("Timeline complete"))
        .on_reverse_complete(|| tracing::info!("Timeline reverse complete"))
}

/// Play the timeline, delivering frames until it stops or `max_frames` is reached
fn drive(
    mut canvas: Canvas,
    mut timeline: Timeline,
    max_frames: usize,
    mut next_frame: impl FnMut() -> Option<(canvas_tween_timeline::FrameHandle, f64)>,
) -> usize {
    timeline.play();
    let mut delivered = 0;
    while delivered < max_frames {
        let Some((handle, timestamp)) = next_frame() else {
            break;
        };
        timeline.on_frame(handle, timestamp);
        canvas.render(timestamp);
        delivered += 1;
    }
    if timeline.is_playing() {
        tracing::info!("Frame limit reached, pausing at {} ms", timeline.current_time());
        timeline.pause();
    }

    for (id, object) in canvas.objects() {
        let object = object.borrow();
        tracing::info!("{id}: {} ({} redraws)", object.describe(), object.redraws());
    }
    delivered
}
