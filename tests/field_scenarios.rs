//! Field scenario tests through the public API

use std::time::Duration;

use glam::{Vec2, Vec4};
use space_intruders::error::SetupError;
use space_intruders::sim::*;
use space_intruders::{ConfigError, FieldConfig};

const DT: u64 = 16;

fn arcade_field() -> (Field<ManualClock>, SpriteSheet, ManualClock) {
    let sheet = SpriteSheet::arcade();
    let clock = ManualClock::new();
    let field = Field::new(FieldConfig::default(), &sheet, clock.clone()).unwrap();
    (field, sheet, clock)
}

/// Every object resolves to the same one-frame square
struct Squares {
    size: f32,
}

impl SpriteLookup for Squares {
    fn locate(&self, object: &str, _animation: &str) -> Result<AnimBinding, SetupError> {
        if object.is_empty() {
            return Err(SetupError::MissingObject {
                name: object.to_string(),
            });
        }
        Ok(AnimBinding {
            object: 0,
            animation: 0,
            duration_ms: 1,
        })
    }

    fn resolve(&self, _object: usize, _animation: usize, _elapsed_ms: u64) -> SpriteFrame {
        SpriteFrame {
            rect: Vec4::new(0.0, 0.0, self.size, self.size),
            pivot: Vec2::ZERO,
        }
    }
}

#[test]
fn test_formation_turns_after_reaching_inner_bound() {
    let (mut field, _sheet, clock) = arcade_field();
    assert_eq!(field.formation().direction().x, 1.0);

    // Rightmost column starts at x=10 and moves 40 per step; the 8th step
    // puts it at 330, past the 320 bound
    for step in 1..=8 {
        clock.advance_ms(1000);
        field.on_physics(0);
        let expected = if step < 8 { 1.0 } else { -1.0 };
        assert_eq!(field.formation().direction().x, expected, "step {step}");
    }
    assert_eq!(field.formation().cell(9, 0).unwrap().body.pos.x, 330.0);

    // The next step heads back without another flip
    clock.advance_ms(1000);
    field.on_physics(0);
    assert_eq!(field.formation().direction().x, -1.0);
    assert_eq!(field.formation().cell(9, 0).unwrap().body.pos.x, 290.0);
}

#[test]
fn test_formation_never_descends() {
    let (mut field, _sheet, clock) = arcade_field();
    let ys: Vec<f32> = field.formation().cells().iter().map(|c| c.body.pos.y).collect();
    for _ in 0..40 {
        clock.advance_ms(1000);
        field.on_physics(0);
    }
    let after: Vec<f32> = field.formation().cells().iter().map(|c| c.body.pos.y).collect();
    assert_eq!(ys, after);
}

#[test]
fn test_one_enemy_shot_per_spawn_period() {
    let (mut field, sheet, clock) = arcade_field();
    let mut fired = 0;
    // Expiries land on frames 1648, 3296, 4944 and 6592 ms
    for _ in 0..420 {
        clock.advance_ms(DT);
        let before = field.shots().len();
        field.on_logic(&sheet, DT);
        let added = field.shots().len() - before;
        assert!(added <= 1);
        if added == 1 {
            assert_eq!(field.shots().last().unwrap().origin, Origin::Formation);
            fired += 1;
        }
    }
    assert_eq!(fired, 4);
}

#[test]
fn test_barrier_takes_priority_over_player() {
    let (mut field, _sheet, _clock) = arcade_field();
    let pos = field.barriers()[3].body.pos;
    field.player_mut().body.pos = pos;
    field.spawn_shot(0, pos, Vec2::NEG_Y, Origin::Formation);

    field.on_physics(0);

    assert_eq!(field.barriers()[3].hits, 1);
    assert_eq!(field.player_lives(), 3);
}

#[test]
fn test_death_resets_round_and_score() {
    let (mut field, sheet, _clock) = arcade_field();
    let target = field.formation().cell(2, 2).unwrap().body.pos;
    field.spawn_shot(0, target, Vec2::Y, Origin::Player);
    field.on_physics(0);
    assert_eq!(field.current_score(), 50);

    field.barriers_mut()[0].hits = 3;
    field.spawn_shot(1, Vec2::ZERO, Vec2::NEG_Y, Origin::Formation);
    field.player_mut().lives = 0;

    assert_eq!(field.on_logic(&sheet, DT), RoundReset::PlayerDied);
    assert_eq!(field.current_score(), 0);
    assert_eq!(field.player_lives(), 3);
    assert_eq!(field.barriers()[0].hits, 0);
    assert!(field.shots().is_empty());
    assert_eq!(field.formation().alive_count(), 60);
}

#[test]
fn test_clearing_the_formation_keeps_score() {
    let (mut field, sheet, _clock) = arcade_field();
    let positions: Vec<Vec2> = field.formation().cells().iter().map(|c| c.body.pos).collect();
    for pos in positions {
        field.spawn_shot(0, pos, Vec2::Y, Origin::Player);
    }
    field.on_physics(0);
    assert!(!field.any_intruders());
    assert_eq!(field.current_score(), 60 * 50);

    field.player_mut().lives = 1;
    assert_eq!(field.on_logic(&sheet, DT), RoundReset::FormationCleared);
    assert_eq!(field.current_score(), 3000);
    assert_eq!(field.player_lives(), 3);
}

#[test]
fn test_bonus_target_pass_and_hit() {
    let (mut field, sheet, clock) = arcade_field();
    clock.advance(Duration::from_millis(5000));
    let out = tick(&mut field, &sheet, &TickInput::default(), DT);
    assert_eq!(field.ufo_state(), UfoState::Traversing);
    assert!(out.audio.iter().any(|a| a.sound == Sound::Ufo && a.looping));

    let pos = field.ufo().body.pos;
    field.spawn_shot(0, pos, Vec2::Y, Origin::Player);
    field.on_physics(0);

    assert_eq!(field.current_score(), 200);
    assert_eq!(field.ufo_state(), UfoState::Hidden);
    assert_eq!(field.ufo().direction().x, -1.0);
}

#[test]
fn test_missed_shot_is_cleaned_up() {
    let (mut field, _sheet, clock) = arcade_field();
    field.on_device(&TickInput {
        fire: true,
        ..Default::default()
    });
    assert_eq!(field.shots().len(), 1);

    let mut frames = 0;
    while field.shots().iter().any(|s| s.origin == Origin::Player) {
        clock.advance_ms(DT);
        field.on_physics(DT);
        frames += 1;
        assert!(frames < 200);
    }
    assert_eq!(field.current_score(), 0);
    assert_eq!(field.formation().alive_count(), 60);
}

#[test]
fn test_custom_lookup_sizes_collision_boxes() {
    // Unit-rect squares at scale 10 give 10x10 boxes
    let config = FieldConfig {
        default_scale: 10.0,
        ..Default::default()
    };
    let mut field = Field::new(config, &Squares { size: 1.0 }, ManualClock::new()).unwrap();
    let cell = field.formation().cell(0, 0).unwrap().body.pos;

    // 9 px off: boxes of half-size 5 overlap
    field.spawn_shot(0, cell + Vec2::new(9.0, 0.0), Vec2::Y, Origin::Player);
    field.on_physics(0);
    assert!(field.formation().cell(0, 0).unwrap().destroyed);

    // 11 px off the next cell: no overlap
    let next = field.formation().cell(1, 0).unwrap().body.pos;
    field.spawn_shot(0, next + Vec2::new(0.0, 11.0), Vec2::Y, Origin::Player);
    field.on_physics(0);
    assert!(!field.formation().cell(1, 0).unwrap().destroyed);
}

#[test]
fn test_config_file_drives_the_field() {
    let config = FieldConfig {
        formation_width: 4,
        formation_height: 2,
        barrier_count: 2,
        player_lives: 5,
        ..Default::default()
    };
    let path = std::env::temp_dir().join(format!(
        "space_intruders_field_{}.json",
        std::process::id()
    ));
    std::fs::write(&path, config.to_json().unwrap()).unwrap();

    let loaded = FieldConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let field = Field::new(loaded, &SpriteSheet::arcade(), ManualClock::new()).unwrap();
    assert_eq!(field.formation().cells().len(), 8);
    assert_eq!(field.barriers().len(), 2);
    assert_eq!(field.player_lives(), 5);
}

#[test]
fn test_oversized_grid_fails_setup_cleanly() {
    let config = FieldConfig {
        formation_width: usize::MAX,
        formation_height: 2,
        ..Default::default()
    };
    let result = Field::new(config, &SpriteSheet::arcade(), ManualClock::new());
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            field: "formation_width",
            ..
        })
    ));
}

#[test]
fn test_bad_config_is_reported() {
    assert!(matches!(
        FieldConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        FieldConfig::load("/nonexistent/space_intruders.json"),
        Err(ConfigError::Io(_))
    ));
    let fallback = FieldConfig::load_or_default("/nonexistent/space_intruders.json");
    assert_eq!(fallback.formation_width, 10);
}

#[test]
fn test_autopilot_runs_are_reproducible() {
    fn run(seed: u64) -> (u64, u32, usize) {
        let (mut field, sheet, clock) = arcade_field();
        let mut pilot = Autopilot::new(seed);
        for _ in 0..1500 {
            clock.advance_ms(DT);
            let input = pilot.next_input(&field);
            tick(&mut field, &sheet, &input, DT);
        }
        (
            field.current_score(),
            field.player_lives(),
            field.formation().alive_count(),
        )
    }
    assert_eq!(run(9), run(9));
}
