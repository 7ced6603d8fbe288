#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::env;
use std::time::Instant;

use anyhow::{bail, Context};
use snake::config::EngineConfig;
use snake::formatter;
use snake::game::state::SessionState;
use snake::game::{EngineEvent, EngineEventKind, Game, Snapshot};
use snake::logging::setup_logging;
use snake::map::direction::Direction;
use snake::timestep::FixedTimestep;
use thousands::Separable;
use tracing::{debug, info, info_span};

/// Stops a runaway autopilot that never dies.
const DEFAULT_MAX_TICKS: u64 = 10_000;

struct Options {
    config: EngineConfig,
    max_ticks: u64,
    realtime: bool,
    verbose: bool,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut options = Options {
        config: EngineConfig::default(),
        max_ticks: DEFAULT_MAX_TICKS,
        realtime: false,
        verbose: false,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                options.config.seed = Some(value.parse().context("--seed must be an integer")?);
            }
            "--ticks" => {
                let value = args.next().context("--ticks needs a value")?;
                options.max_ticks = value.parse().context("--ticks must be an integer")?;
            }
            "--wrap" | "-w" => options.config.wrap_around = true,
            "--realtime" | "-r" => options.realtime = true,
            "--verbose" | "-v" => options.verbose = true,
            other => bail!("Unknown argument: {other}"),
        }
    }

    Ok(options)
}

/// Picks a safe direction that moves the head closer to the next food in the combo.
fn autopilot(game: &Game, snapshot: &Snapshot) -> Option<Direction> {
    let grid = game.grid();
    let head = snapshot.snake.head().position;
    let current = snapshot.snake.direction;
    let target = snapshot
        .foods
        .iter()
        .find(|food| food.number == snapshot.combo.expected_next)
        .map(|food| food.position)?;

    // The tail is still occupied while the head moves, so every segment blocks.
    Direction::DIRECTIONS
        .into_iter()
        .filter(|direction| !direction.is_opposite(current))
        .filter_map(|direction| {
            let mut next = grid.offset(head, direction);
            if game.config().wrap_around {
                next = grid.wrap(next);
            } else if !grid.contains(next) {
                return None;
            }
            if snapshot.snake.occupies(next) {
                return None;
            }
            let distance = (next.x - target.x).abs() + (next.y - target.y).abs();
            Some((distance, direction))
        })
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, direction)| direction)
}

fn main() -> anyhow::Result<()> {
    let options = parse_args()?;
    setup_logging(options.verbose);

    let mut game = Game::new(options.config.clone()).context("Could not create engine")?;
    let _session = info_span!("session", seed = game.seed()).entered();

    let _game_over = game.subscribe(EngineEventKind::GameOver, |event| {
        if let EngineEvent::GameOver { state, statistics } = event {
            info!(
                score = state.final_score,
                cause = ?state.cause,
                foods = statistics.foods_eaten,
                longest_streak = statistics.longest_streak,
                "Score submission ready"
            );
        }
    });
    let _combos = game.subscribe(EngineEventKind::Combo, |event| {
        debug!(event = ?event, "Combo update");
    });

    if !game.start() {
        bail!("Engine refused to start a game");
    }

    let mut timestep = FixedTimestep::new(game.config().tick_interval);
    let mut last_frame = Instant::now();
    info!(tick = ?timestep.step(), realtime = options.realtime, "Starting game loop");

    'running: loop {
        let due = if options.realtime {
            let now = Instant::now();
            let ticks = timestep.accumulate(now - last_frame);
            last_frame = now;
            ticks
        } else {
            1
        };

        for _ in 0..due {
            let snapshot = game.snapshot();
            let direction = autopilot(&game, &snapshot);
            let result = game.step(direction)?;
            formatter::set_tick(game.tick());

            if game.state() != SessionState::Playing || game.tick() >= options.max_ticks {
                debug!(collision = %result.collision, "Leaving game loop");
                break 'running;
            }
        }

        if options.realtime {
            spin_sleep::sleep(timestep.until_next());
        }
    }

    let stats = game.session_statistics();
    let score = game.statistics();
    println!(
        "Score {} | length {} | foods {} | combos {} | longest streak {} | {:.1?} played over {} ticks",
        score.total_score.separate_with_commas(),
        stats.snake_length,
        stats.foods_eaten,
        stats.total_combos,
        stats.longest_streak,
        stats.duration,
        stats.ticks.separate_with_commas(),
    );

    Ok(())
}
