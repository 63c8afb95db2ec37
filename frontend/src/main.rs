use clap::Parser;
use tk2000::machine::Tk2000Machine;

mod audio;
mod emulator;
mod input;
mod overlay;
mod rom_path;
mod video;

/// Matches `Sound`'s own sample rate (`tk2000::sound`), so the SDL ring
/// buffer can be fed directly without resampling.
const SOUND_SAMPLE_RATE: u32 = 16_000;

#[derive(Parser, Debug)]
#[command(name = "phosphor-tk2000", about = "TK2000 II emulator")]
struct Args {
    /// Path to a 16 KiB ROM image. Falls back to the last-used path saved
    /// in the config file if omitted.
    rom: Option<std::path::PathBuf>,

    /// Path to a .ct2 cassette image to load at startup.
    #[arg(long)]
    tape: Option<std::path::PathBuf>,

    /// Start in 16-color mode instead of green-phosphor mono.
    #[arg(long)]
    color: bool,

    /// Window scale factor.
    #[arg(long)]
    scale: Option<u32>,

    /// Disable speaker output entirely.
    #[arg(long)]
    mute: bool,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut config = rom_path::load_config();

    let rom_path = args
        .rom
        .clone()
        .or_else(|| config.last_rom_path.clone())
        .expect("no ROM path given and none saved in config");

    let rom = rom_path::load_rom(&rom_path).expect("failed to load ROM image");
    let mut machine = Tk2000Machine::new(rom);

    let color = args.color || config.color_mode;
    machine.set_color_mode(color);

    let tape_path = args.tape.clone().or_else(|| config.last_tape_path.clone());
    if let Some(path) = &tape_path
        && let Err(e) = machine.insert_tape(path)
    {
        tracing::warn!(error = %e, path = %path.display(), "failed to load tape image");
    }

    let scale = args.scale.or(config.scale).unwrap_or(2);

    let sdl_context = sdl2::init().expect("failed to initialize SDL2");
    let sdl_audio = sdl_context.audio().expect("failed to init SDL audio");

    if args.mute {
        machine.set_sound_enabled(false);
    }
    let _audio_device = match audio::init(&sdl_audio, SOUND_SAMPLE_RATE) {
        Some((device, ring, _fade_out)) => {
            machine.set_audio_sink(Box::new(audio::RingSink::new(ring)));
            device.resume();
            Some(device)
        }
        None => {
            machine.set_sound_enabled(false);
            None
        }
    };

    let key_map = input::default_key_map(machine.input_map());

    emulator::run(&mut machine, &key_map, scale);

    config.last_rom_path = Some(rom_path);
    config.last_tape_path = tape_path;
    config.color_mode = color;
    config.scale = Some(scale);
    rom_path::save_config(&config);
}
