use mazechase_rs::{
    events::{GameEvent, InputEvent},
    ghost_agent::{chase_target, ChaseContext, GhostVariant},
    variables::{
        step, Cell, Direction, FRAME_MS, GAME_OVER_MESSAGE, LEVEL_COMPLETE_MESSAGE,
        PACMAN_STARTING_POS,
    },
    GameConfig, RoundPhase, RoundState,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

fn active_round(seed: u64) -> RoundState {
    let mut round = RoundState::new(GameConfig::default().with_seed(seed)).unwrap();
    assert!(round.restart());
    round.take_events();
    round
}

/// Lets the player eat the pellet under its starting cell without moving.
fn clear_start_cell(round: &mut RoundState) {
    round.tick(FRAME_MS);
    assert!(!round.pickups().pellets.contains(&PACMAN_STARTING_POS));
    round.take_events();
}

#[test]
fn pellet_under_the_player_is_eaten() {
    let mut round = active_round(1);
    assert!(round.pickups().pellets.contains(&(21, 10)));
    round.handle_input(InputEvent::Direction(Direction::Right));
    round.tick(FRAME_MS);

    assert!(!round.pickups().pellets.contains(&(21, 10)));
    assert_eq!(round.score(), 10);
    assert_eq!(round.take_events(), vec![GameEvent::PelletEaten]);
}

#[test]
fn power_pellet_frightens_every_ghost() {
    let mut round = active_round(2);
    let cell_size = round.config().cell_size;
    round.pacman.agent.place((22, 1), cell_size);
    round.tick(FRAME_MS);

    assert!(!round.pickups().power_pellets.contains(&(22, 1)));
    assert_eq!(round.score(), 50);
    assert_eq!(round.fright_timer_ms(), 7000);
    assert_eq!(round.take_events(), vec![GameEvent::PowerPelletEaten]);
    for ghost in round.ghosts() {
        assert!(ghost.is_frightened());
        assert_eq!(ghost.agent.speed, 0.05);
    }

    round.tick(FRAME_MS);
    assert_eq!(round.fright_timer_ms(), 7000 - FRAME_MS);
}

#[test]
fn touching_a_frightened_ghost_eats_it() {
    let mut round = active_round(3);
    clear_start_cell(&mut round);
    let config = round.config().clone();
    let lead = round.ghost_mut(GhostVariant::Lead);
    lead.become_frightened(&config);
    lead.agent.place(PACMAN_STARTING_POS, config.cell_size);

    round.tick(FRAME_MS);

    assert_eq!(round.score(), 10 + 200);
    assert_eq!(round.lives(), 3);
    assert_eq!(round.take_events(), vec![GameEvent::GhostEaten]);
    let lead = round.ghost(GhostVariant::Lead);
    assert!(lead.is_eaten());
    assert!(!lead.is_frightened());
    assert_eq!(lead.pos(), GhostVariant::Lead.spawn_pos());
    assert_eq!(lead.agent.speed, config.eaten_ghost_speed);
}

#[test]
fn normal_ghost_costs_a_life_until_the_game_is_over() {
    let mut round = active_round(4);
    clear_start_cell(&mut round);
    let score = round.score();
    let pickups_left = round.pickups().len();
    let cell_size = round.config().cell_size;

    for lives_left in (0..3).rev() {
        round
            .ghost_mut(GhostVariant::Lead)
            .agent
            .place(PACMAN_STARTING_POS, cell_size);
        round.tick(FRAME_MS);

        assert_eq!(round.lives(), lives_left);
        assert_eq!(round.take_events(), vec![GameEvent::LifeLost]);
        assert_eq!(round.score(), score);
        assert_eq!(round.pickups().len(), pickups_left);
        assert_eq!(round.pacman.pos(), PACMAN_STARTING_POS);
        assert_eq!(round.pacman.direction(), None);
        for ghost in round.ghosts() {
            assert_eq!(ghost.pos(), ghost.variant().spawn_pos());
            assert!(!ghost.is_frightened() && !ghost.is_eaten());
        }
    }

    assert_eq!(round.phase(), RoundPhase::Lost);
    assert_eq!(round.message(), GAME_OVER_MESSAGE);

    // nothing moves once the round is over
    round.tick(FRAME_MS);
    assert_eq!(round.pacman.pos(), PACMAN_STARTING_POS);

    assert!(round.restart());
    assert_eq!(round.phase(), RoundPhase::Active);
    assert_eq!(round.lives(), 3);
    assert_eq!(round.score(), 0);
    assert!(round.pickups().pellets.contains(&PACMAN_STARTING_POS));
}

/// A walled maze as tall and wide as needed around the player's start cell,
/// with the given symbols written into row 21 from column 9.
fn start_row_layout(symbols: &str) -> Vec<String> {
    (0..23)
        .map(|row| {
            let mut line = "1".repeat(13);
            if row == PACMAN_STARTING_POS.0 {
                line.replace_range(9..9 + symbols.len(), symbols);
            }
            line
        })
        .collect()
}

fn round_on(layout: &[String], config: GameConfig) -> RoundState {
    let rows: Vec<&str> = layout.iter().map(String::as_str).collect();
    let mut round = RoundState::with_layout(config, &rows).unwrap();
    assert!(round.restart());
    round.take_events();
    round
}

#[test]
fn clearing_the_last_pellet_wins() {
    let layout = start_row_layout("1021");
    let mut round = round_on(&layout, GameConfig::default().with_seed(5));
    round.handle_input(InputEvent::Direction(Direction::Right));

    for _ in 0..60 {
        if round.phase() != RoundPhase::Active {
            break;
        }
        round.tick(FRAME_MS);
    }

    assert_eq!(round.phase(), RoundPhase::Won);
    assert_eq!(round.message(), LEVEL_COMPLETE_MESSAGE);
    assert!(round.pickups().is_empty());
    assert_eq!(round.score(), 10);
    assert_eq!(round.lives(), 3);
    assert_eq!(round.pacman.pos(), (21, 11));

    assert!(round.restart());
    assert_eq!(round.pickups().len(), 1);
}

#[test]
fn last_pellet_wins_even_when_the_last_life_goes() {
    let layout = start_row_layout("121");
    let config = GameConfig {
        starting_lives: 1,
        ..GameConfig::default().with_seed(6)
    };
    let mut round = round_on(&layout, config);
    let cell_size = round.config().cell_size;
    round
        .ghost_mut(GhostVariant::Lead)
        .agent
        .place(PACMAN_STARTING_POS, cell_size);

    round.tick(FRAME_MS);

    assert_eq!(round.lives(), 0);
    assert!(round.pickups().is_empty());
    assert_eq!(round.phase(), RoundPhase::Won);
    assert_eq!(round.message(), LEVEL_COMPLETE_MESSAGE);
    assert_eq!(
        round.take_events(),
        vec![GameEvent::PelletEaten, GameEvent::LifeLost]
    );
}

#[test]
fn ambush_facing_up_shifts_sideways() {
    let up = ChaseContext {
        pacman_pos: (10, 10),
        pacman_direction: Some(Direction::Up),
        lead_pos: (11, 13),
    };
    let scatter = GhostVariant::Ambush.scatter_pos();
    assert_eq!(chase_target(GhostVariant::Ambush, (14, 13), scatter, &up), (6, 6));

    let down = ChaseContext {
        pacman_direction: Some(Direction::Down),
        ..up
    };
    assert_eq!(chase_target(GhostVariant::Ambush, (14, 13), scatter, &down), (14, 10));
}

struct GhostRecord {
    pos: Cell,
    heading: Option<Direction>,
    held: bool,
}

fn record(round: &RoundState) -> Vec<GhostRecord> {
    round
        .ghosts()
        .iter()
        .map(|ghost| GhostRecord {
            pos: ghost.pos(),
            heading: ghost.agent.heading,
            held: ghost.is_frightened() || ghost.is_eaten(),
        })
        .collect()
}

#[test]
fn long_round_keeps_its_invariants() {
    for seed in 0..4 {
        let mut round = active_round(seed);
        let mut inputs = StdRng::seed_from_u64(seed + 100);
        let mut score = round.score();
        let mut pickups_left = round.pickups().len();

        for tick in 0..20_000 {
            if tick % 12 == 0 {
                let direction = *Direction::ALL.choose(&mut inputs).unwrap();
                round.handle_input(InputEvent::Direction(direction));
            }

            let before = record(&round);
            let fright_before = round.is_frightened();
            round.tick(FRAME_MS);
            let events = round.take_events();

            assert!(round.score() >= score);
            assert!(round.pickups().len() <= pickups_left);
            score = round.score();
            pickups_left = round.pickups().len();

            assert_eq!(round.phase() == RoundPhase::Won, round.pickups().is_empty());
            if round.phase() != RoundPhase::Active {
                break;
            }

            if fright_before || round.is_frightened() || events.contains(&GameEvent::LifeLost) {
                continue;
            }
            for (old, ghost) in before.iter().zip(round.ghosts()) {
                if old.held || ghost.is_frightened() || ghost.is_eaten() || old.pos == ghost.pos() {
                    continue;
                }
                let (Some(previous), Some(current)) = (old.heading, ghost.agent.heading) else {
                    continue;
                };
                if current != previous.opposite() {
                    continue;
                }
                let other_ways = Direction::ALL
                    .into_iter()
                    .filter(|&d| d != current && round.maze().is_walkable(step(old.pos, d)))
                    .count();
                assert_eq!(
                    other_ways, 0,
                    "{:?} reversed at {:?} on tick {tick} (seed {seed})",
                    ghost.variant(),
                    old.pos
                );
            }
        }
    }
}
