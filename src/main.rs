//! Marble Maze entry point
//!
//! Runs the game headless: the autopilot tilts the board, the built-in
//! physics world rolls the ball, and score changes go to the log.
//!
//! Usage: `marble-maze [level.txt] [settings.json] [tilt|touch]`

use marble_maze::Settings;
use marble_maze::consts::SIM_DT;
use marble_maze::sim::{Autopilot, BasicPhysics, GameEvent, GameState, load_level_file, tick};

fn main() {
    env_logger::init();
    log::info!("Marble Maze (headless) starting...");

    let mut args = std::env::args().skip(1);
    let level_arg = args.next();
    let mut settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(mode) = args.next() {
        settings = settings.with_input_mode(&mode);
    }
    let level_path = level_arg.unwrap_or_else(|| settings.level_path.clone());

    let level = load_level_file(&level_path);
    let mut state = GameState::new(&level, settings.rules.clone());
    let mut world = BasicPhysics::new();
    let mut pilot = Autopilot::new(settings.demo_seed);
    log::info!(
        "Running {} ticks with seed {} ({} input)",
        settings.demo_ticks,
        settings.demo_seed,
        settings.rules.input_mode.as_str()
    );

    let mut stars = 0u32;
    let mut deaths = 0u32;
    for _ in 0..settings.demo_ticks {
        let input = pilot.next_input(&state);
        tick(&mut state, &mut world, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::ScoreChanged { score } => log::info!("Score: {}", score),
                GameEvent::StarCollected { .. } => stars += 1,
                GameEvent::PlayerCaught { .. } => deaths += 1,
                GameEvent::PlayerRespawned { .. } => {}
            }
        }
    }

    println!(
        "{} ticks: score {}, {} stars collected, {} vortex falls, ball at ({:.0}, {:.0})",
        state.time_ticks,
        state.score,
        stars,
        deaths,
        state.player.as_ref().map_or(0.0, |p| p.pos.x),
        state.player.as_ref().map_or(0.0, |p| p.pos.y),
    );
}
