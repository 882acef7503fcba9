use std::time::Duration;

use garden_defence_core::{CellCoord, Command, Event, GameConfig, PlantKind, SpawnOrigin};
use garden_defence_system_movement::Movement;
use garden_defence_world::{self as world, query, World};

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn tick(world: &mut World, movement: &mut Movement) -> Vec<Event> {
    let mut events = apply_all(
        world,
        vec![Command::Tick {
            dt: Duration::from_secs(1),
        }],
    );
    let mut commands = Vec::new();
    movement.handle(&events, &query::invader_view(world), &mut commands);
    events.extend(apply_all(world, commands));
    events
}

#[test]
fn invader_walks_one_column_every_move_interval() {
    let config = GameConfig::default();
    let mut world = World::new(config.clone());
    let mut movement = Movement::new(config.invader_move_interval());
    let _ = apply_all(
        &mut world,
        vec![Command::SpawnInvader {
            row: 0,
            origin: SpawnOrigin::Wave,
        }],
    );

    let mut columns = Vec::new();
    for _ in 0..6 {
        let _ = tick(&mut world, &mut movement);
        let view = query::invader_view(&world);
        columns.push(view.iter().next().map(|invader| invader.cell.column()));
    }

    assert_eq!(
        columns,
        vec![Some(4), Some(3), Some(3), Some(2), Some(2), Some(1)]
    );
}

#[test]
fn wall_blocks_invader_until_destroyed() {
    let config = GameConfig::default();
    let mut world = World::new(config.clone());
    let mut movement = Movement::new(config.invader_move_interval());
    let wall = CellCoord::new(1, 3);
    let placed = apply_all(
        &mut world,
        vec![
            Command::PlantSeed {
                kind: PlantKind::WallNut,
                cell: wall,
            },
            Command::SpawnInvader {
                row: 1,
                origin: SpawnOrigin::Wave,
            },
        ],
    );
    assert!(matches!(placed[0], Event::PlantPlaced { .. }));

    let mut previous_health = 400;
    for _ in 0..20 {
        let _ = tick(&mut world, &mut movement);
        let invader = query::invader_view(&world)
            .into_vec()
            .pop()
            .expect("invader stays alive");
        assert_eq!(invader.cell.column(), 4, "blocked invader never advances");

        let health = query::plant_at(&world, wall).expect("wall still standing").health;
        assert!(health == previous_health || health + 10 == previous_health);
        previous_health = health;
    }
    assert_eq!(previous_health, 300);
}

#[test]
fn reaching_the_edge_ends_the_game() {
    let config = GameConfig {
        columns: 2,
        ..GameConfig::default()
    };
    let mut world = World::new(config.clone());
    let mut movement = Movement::new(config.invader_move_interval());
    let _ = apply_all(
        &mut world,
        vec![Command::SpawnInvader {
            row: 2,
            origin: SpawnOrigin::Wave,
        }],
    );

    let mut breached_at = None;
    for second in 1..=6 {
        let events = tick(&mut world, &mut movement);
        if events
            .iter()
            .any(|event| matches!(event, Event::DefenceBreached { .. }))
        {
            breached_at = Some(second);
            break;
        }
    }

    assert_eq!(breached_at, Some(4));
    assert!(query::is_over(&world));
}
