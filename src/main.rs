use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info, warn};

use chip_8_interpreter::chip::{
    chip8::{Chip8, Chip8Error, Color, Config, Graphics, ShlCarry, SpriteEdge},
    Chip,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shl {
    Msb,
    Lsb,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Edge {
    Wrap,
    Clip,
}

/// Runs a CHIP-8 program without a display, logging what it does.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the program image
    rom: String,

    /// Instructions executed per second
    #[arg(short, long, default_value_t = 700)]
    speed: u32,

    /// Stop after this many instructions
    #[arg(short, long)]
    max_steps: Option<u64>,

    /// Seed for CXKK; seeded from entropy if absent
    #[arg(long)]
    seed: Option<u64>,

    /// Bit that 8XYE shifts into VF
    #[arg(long, value_enum, default_value_t = Shl::Msb)]
    shl_carry: Shl,

    /// Handling of sprite pixels crossing the display edge
    #[arg(long, value_enum, default_value_t = Edge::Wrap)]
    sprite_edge: Edge,

    /// Instructions per timer decrement
    #[arg(long, default_value_t = 1)]
    timer_divider: u8,

    /// Print the display to stdout when the run ends
    #[arg(long)]
    dump: bool,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::default()
            .with_shl_carry(match self.shl_carry {
                Shl::Msb => ShlCarry::MostSignificantBit,
                Shl::Lsb => ShlCarry::LeastSignificantBit,
            })
            .with_sprite_edge(match self.sprite_edge {
                Edge::Wrap => SpriteEdge::Wrap,
                Edge::Clip => SpriteEdge::Clip,
            })
            .with_cycles_per_timer_tick(self.timer_divider);
        if let Some(seed) = self.seed {
            config = config.with_rng_seed(seed);
        }
        config
    }
}

fn render(gfx: &Graphics) -> String {
    let mut out = String::with_capacity((Graphics::WIDTH + 1) * Graphics::HEIGHT);
    for row in gfx.pixels().chunks(Graphics::WIDTH) {
        out.extend(row.iter().map(|pixel| match pixel {
            Color::White => '#',
            Color::Black => ' ',
        }));
        out.push('\n');
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let sound = Arc::new(|| info!("Beep"));
    let mut chip8 = Chip8::with_config(sound, args.config());
    chip8
        .load_program(&args.rom)
        .with_context(|| format!("Failed to load {}", args.rom))?;

    let step_sleep = Duration::from_secs(1) / args.speed.max(1);
    let outcome = run(&mut chip8, args.max_steps, step_sleep);

    if args.dump {
        print!("{}", render(chip8.frame()));
    }

    let steps = outcome.with_context(|| format!("{} stopped", args.rom))?;
    match chip8.awaiting_key() {
        Some(register) => warn!("Program is waiting for a key to store in V{:X}", register),
        None => info!("Ran {} steps, program counter at {:#05x}", steps, chip8.program_counter()),
    }

    Ok(())
}

/// Steps `chip8` until `max_steps` is reached, the program waits for a key or a step fails.
/// Returns the number of executed steps.
fn run(chip8: &mut Chip8, max_steps: Option<u64>, step_sleep: Duration) -> Result<u64, Chip8Error> {
    let mut steps = 0u64;
    loop {
        if max_steps.map_or(false, |max| steps >= max) {
            return Ok(steps);
        }

        if let Err(err) = chip8.step() {
            error!(
                "Stopped at {:#05x} after {} steps: {}",
                chip8.program_counter(),
                steps,
                err
            );
            return Err(err);
        }
        steps += 1;

        if chip8.take_draw_flag() {
            info!("Display updated after {} steps", steps);
        }

        // nothing feeds the keypad in a headless run
        if chip8.awaiting_key().is_some() {
            return Ok(steps);
        }

        thread::sleep(step_sleep);
    }
}
