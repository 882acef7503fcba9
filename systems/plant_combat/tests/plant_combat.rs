use std::time::Duration;

use garden_defence_core::{CellCoord, Command, Event, GameConfig, PlantKind, SpawnOrigin};
use garden_defence_system_plant_combat::PlantCombat;
use garden_defence_world::{self as world, query, World};

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn rich_world() -> World {
    World::new(GameConfig {
        starting_stock: 1_000,
        ..GameConfig::default()
    })
}

fn tick(world: &mut World, combat: &mut PlantCombat) -> Vec<Event> {
    let mut events = apply_all(
        world,
        vec![Command::Tick {
            dt: Duration::from_secs(1),
        }],
    );
    let mut commands = Vec::new();
    combat.handle(
        &events,
        &query::plant_view(world),
        &query::invader_view(world),
        &mut commands,
    );
    events.extend(apply_all(world, commands));
    events
}

#[test]
fn shooter_fires_once_per_cooldown_window() {
    let mut world = rich_world();
    let mut combat = PlantCombat::new();
    let _ = apply_all(
        &mut world,
        vec![
            Command::PlantSeed {
                kind: PlantKind::Peashooter,
                cell: CellCoord::new(0, 0),
            },
            Command::SpawnInvader {
                row: 0,
                origin: SpawnOrigin::Wave,
            },
        ],
    );

    let mut shots_at = Vec::new();
    for second in 1..=9 {
        let events = tick(&mut world, &mut combat);
        let shots = events
            .iter()
            .filter(|event| matches!(event, Event::InvaderDamaged { .. }))
            .count();
        assert!(shots <= 1);
        if shots == 1 {
            shots_at.push(second);
        }
    }

    assert_eq!(shots_at, vec![3, 6, 9]);
    let remaining = query::invader_view(&world)
        .iter()
        .next()
        .map(|invader| invader.health);
    assert_eq!(remaining, Some(120 - 3 * 25));
}

#[test]
fn fifth_hit_defeats_wave_one_invader_and_counts_a_kill() {
    let mut world = rich_world();
    let mut combat = PlantCombat::new();
    let _ = apply_all(
        &mut world,
        vec![
            Command::PlantSeed {
                kind: PlantKind::Peashooter,
                cell: CellCoord::new(2, 1),
            },
            Command::SpawnInvader {
                row: 2,
                origin: SpawnOrigin::Wave,
            },
        ],
    );

    let mut defeated = Vec::new();
    for _ in 0..15 {
        for event in tick(&mut world, &mut combat) {
            if let Event::InvaderDefeated { kills, .. } = event {
                defeated.push(kills);
            }
        }
    }

    assert_eq!(defeated, vec![1]);
    assert!(query::invader_view(&world).is_empty());
    assert_eq!(query::progress(&world).kills, 1);
}

#[test]
fn first_invader_in_spawn_order_is_targeted() {
    let mut world = rich_world();
    let mut combat = PlantCombat::new();
    let _ = apply_all(
        &mut world,
        vec![
            Command::PlantSeed {
                kind: PlantKind::Peashooter,
                cell: CellCoord::new(1, 0),
            },
            Command::SpawnInvader {
                row: 1,
                origin: SpawnOrigin::Wave,
            },
            Command::SpawnInvader {
                row: 1,
                origin: SpawnOrigin::Wave,
            },
        ],
    );

    let events: Vec<Event> = (0..3).flat_map(|_| tick(&mut world, &mut combat)).collect();

    let hit: Vec<u32> = events
        .iter()
        .filter_map(|event| match event {
            Event::InvaderDamaged { invader, .. } => Some(invader.get()),
            _ => None,
        })
        .collect();
    assert_eq!(hit, vec![0]);
}
