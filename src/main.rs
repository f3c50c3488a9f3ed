use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use log::{error, info, warn};
use sdl2::keyboard::Keycode;

use multiraster::color;
use multiraster::config::{CanvasConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use multiraster::demos::{self, Demo};
use multiraster::display::{Display, InputEvent, PixelBuffer, RenderTarget};
use multiraster::util::{FpsCounter, Rng};
use multiraster::Result;

const SCREENSHOT: &str = "screenshot.png";
/// Frames between window title refreshes
const TITLE_EVERY: u64 = 30;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    scale: Option<u32>,
    cores: Option<usize>,
    demo: Option<usize>,
}

/// Parse the value following option `i`, if there is one
fn value_after<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Option<T> {
    if *i + 1 >= args.len() {
        return None;
    }
    *i += 1;
    let parsed = args[*i].parse::<T>().ok();
    if parsed.is_none() {
        warn!("ignoring invalid value '{}' for {}", args[*i], args[*i - 1]);
    }
    parsed
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    parsed.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--width" | "-w" => parsed.width = value_after(&args, &mut i),
            "--height" | "-h" => parsed.height = value_after(&args, &mut i),
            "--scale" | "-s" => parsed.scale = value_after(&args, &mut i),
            "--cores" => parsed.cores = value_after(&args, &mut i),
            "--demo" | "-d" => {
                parsed.demo = value_after::<usize>(&args, &mut i).map(|n| n.saturating_sub(1));
            },
            "--help" => {
                println!("Usage: multiraster [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --config PATH, -c PATH  Load canvas settings from a JSON file");
                println!(
                    "  --width W, -w W         Buffer width (default: {})",
                    DEFAULT_WIDTH
                );
                println!(
                    "  --height H, -h H        Buffer height (default: {})",
                    DEFAULT_HEIGHT
                );
                println!("  --scale N, -s N         Window pixels per buffer pixel (default: 4)");
                println!("  --cores N               Worker threads, 0 = all cores (default: 0)");
                println!("  --demo N, -d N          Start with demo N (1-4)");
                println!("  --help                  Show this help message");
                std::process::exit(0);
            },
            other => warn!("ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    parsed
}

fn load_config(args: &Args) -> Result<CanvasConfig> {
    let mut config = match &args.config {
        Some(path) => CanvasConfig::load(path)?,
        None => CanvasConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width.max(1);
    }
    if let Some(height) = args.height {
        config.height = height.max(1);
    }
    if let Some(scale) = args.scale {
        config.pixel_scale = scale;
    }
    if let Some(cores) = args.cores {
        config.cores = cores;
    }
    Ok(config)
}

fn save_frame(buffer: &PixelBuffer, path: &str, overwrite: bool) {
    if let Err(e) = buffer.save_png(path, overwrite) {
        error!("could not save {}: {}", path, e);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args();
    let config = load_config(&args)?;

    let (mut display, texture_creator) = Display::from_config(&config)?;
    let mut frame = PixelBuffer::from_config(&config);
    let background = color::pack(0, 0, 0, config.opaque);
    frame.fast_clear(background);
    let mut shown = frame.clone();
    let mut target = RenderTarget::for_buffer(&texture_creator, &frame)?;

    let mut rng = Rng::from_time();
    let mut scenes: Vec<Box<dyn Demo>> = demos::all(&config, &mut rng);
    let mut current = args.demo.unwrap_or(0).min(scenes.len() - 1);

    let mut fps_counter = FpsCounter::new(60);
    let frame_budget = Duration::from_secs_f32(1.0 / config.frame_rate.max(1) as f32);
    let mut paused = false;
    let mut recording = false;
    let mut recorded: u32 = 0;
    let mut frames: u64 = 0;

    info!(
        "{}x{} buffer, {} cores, starting with '{}'",
        config.width,
        config.height,
        config.cores(),
        scenes[current].name()
    );
    println!("Controls:");
    println!("  Left/Right, 1-4 - Select demo");
    println!("  P               - Pause");
    println!("  F12             - Save {}", SCREENSHOT);
    println!("  R               - Toggle recording frames to frameNNNNN.png");
    println!("  Escape, Q       - Quit");

    'main: loop {
        let started = Instant::now();
        let (dt, avg_fps) = fps_counter.tick();

        for event in display.poll_events() {
            let key = match event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown(key) => key,
            };
            let selected = match key {
                Keycode::Escape | Keycode::Q => break 'main,
                Keycode::P => {
                    paused = !paused;
                    continue;
                },
                Keycode::F12 => {
                    save_frame(&shown, SCREENSHOT, true);
                    continue;
                },
                Keycode::R => {
                    recording = !recording;
                    info!("recording {}", if recording { "on" } else { "off" });
                    continue;
                },
                Keycode::Num1 => 0,
                Keycode::Num2 => 1,
                Keycode::Num3 => 2,
                Keycode::Num4 => 3,
                Keycode::Left => (current + scenes.len() - 1) % scenes.len(),
                Keycode::Right => (current + 1) % scenes.len(),
                _ => continue,
            };
            if selected < scenes.len() && selected != current {
                current = selected;
                frame.fast_clear(background);
                info!("switched to '{}'", scenes[current].name());
            }
        }

        if !paused {
            let scene = &mut scenes[current];
            scene.update(dt, config.width, config.height);
            scene.render(&mut frame);
            scene.post_process(&frame, &mut shown);

            if recording {
                save_frame(&shown, &format!("frame{:05}.png", recorded), true);
                recorded += 1;
            }
        }

        display.present(&mut target, &shown)?;

        frames += 1;
        if frames % TITLE_EVERY == 0 {
            let title = format!("{} - {} ({:.0} fps)", config.title, scenes[current].name(), avg_fps);
            display.set_title(&title)?;
        }

        if let Some(rest) = frame_budget.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    Ok(())
}
