//! Movement domain: unit tests for sensors, the motion state machine, and dashing.

use avian3d::prelude::{GravityScale, LayerMask, LinearVelocity};
use bevy::prelude::*;

use super::{
    ContactEdge, ContactEvent, ContactSensor, ContactState, DEFAULT_GRAVITY_SCALE, DashSignal,
    DashStep, DashTrajectory, ForceMode, JumpSignal, MotionBody, MotionState, MovementTuning,
    Player, RayCaster, SensorKind, add_motion_pipeline, facing_rotation,
};

const DT: f32 = 0.0625;

/// In-memory body that records the commands it receives.
#[derive(Debug, Clone)]
struct RecordingBody {
    position: Vec3,
    rotation: Quat,
    velocity: Vec3,
    gravity_enabled: bool,
    position_commands: usize,
}

impl Default for RecordingBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            gravity_enabled: true,
            position_commands: 0,
        }
    }
}

impl MotionBody for RecordingBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.position_commands += 1;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }
}

/// Ray caster that answers from a fixed flag and counts queries.
struct ScriptedWorld {
    hit: bool,
    queries: std::cell::Cell<usize>,
}

impl ScriptedWorld {
    fn new(hit: bool) -> Self {
        Self {
            hit,
            queries: std::cell::Cell::new(0),
        }
    }
}

impl RayCaster for ScriptedWorld {
    fn cast_ray(&self, _origin: Vec3, _direction: Dir3, _max: f32, _filter: LayerMask) -> bool {
        self.queries.set(self.queries.get() + 1);
        self.hit
    }
}

fn tuning() -> MovementTuning {
    MovementTuning {
        coyote_time: 0.5,
        jump_buffer_time: 0.25,
        dash_duration: 0.25,
        dash_distance: 4.0,
        dash_height: 1.0,
        ..default()
    }
}

fn grounded_state(body: &mut RecordingBody, tuning: &MovementTuning) -> MotionState {
    let mut state = MotionState::default();
    state.on_ground_enter(body, tuning);
    state
}

fn assert_climb_invariant(state: &MotionState) {
    assert_eq!(state.is_climbing, state.is_touching_wall);
}

// -----------------------------------------------------------------------------
// ContactState / ContactSensor tests
// -----------------------------------------------------------------------------

#[test]
fn test_contact_state_reports_edges_only_on_change() {
    let mut contact = ContactState::default();

    assert_eq!(contact.update(true), Some(ContactEdge::Enter));
    assert_eq!(contact.update(true), None);
    assert_eq!(contact.update(true), None);
    assert_eq!(contact.update(false), Some(ContactEdge::Exit));
    assert_eq!(contact.update(false), None);
    assert!(!contact.is_in_contact);
    assert!(!contact.was_in_contact);
}

#[test]
fn test_sensor_steady_contact_emits_nothing() {
    let mut sensor = ContactSensor::ground(0.2);
    let world = ScriptedWorld::new(true);
    let mut edges = Vec::new();

    sensor.sample(&world, Vec3::ZERO, Vec3::NEG_Y, |e| edges.push(e));
    assert_eq!(edges, vec![ContactEdge::Enter]);

    edges.clear();
    sensor.sample(&world, Vec3::ZERO, Vec3::NEG_Y, |e| edges.push(e));
    sensor.sample(&world, Vec3::ZERO, Vec3::NEG_Y, |e| edges.push(e));
    assert!(edges.is_empty());
    assert_eq!(world.queries.get(), 3);
}

#[test]
fn test_sensor_exit_after_contact_lost() {
    let mut sensor = ContactSensor::wall(0.6);
    let mut edges = Vec::new();

    sensor.sample(&ScriptedWorld::new(true), Vec3::ZERO, Vec3::NEG_Z, |e| edges.push(e));
    sensor.sample(&ScriptedWorld::new(false), Vec3::ZERO, Vec3::NEG_Z, |e| edges.push(e));

    assert_eq!(edges, vec![ContactEdge::Enter, ContactEdge::Exit]);
    assert!(!sensor.contact.is_in_contact);
}

#[test]
fn test_sensor_degenerate_query_is_no_contact() {
    let mut sensor = ContactSensor::ground(0.2);
    let world = ScriptedWorld::new(true);
    let mut edges = Vec::new();

    let hit = sensor.sample(&world, Vec3::NAN, Vec3::NEG_Y, |e| edges.push(e));
    assert!(!hit);
    let hit = sensor.sample(&world, Vec3::ZERO, Vec3::ZERO, |e| edges.push(e));
    assert!(!hit);

    assert!(edges.is_empty());
    assert_eq!(world.queries.get(), 0);
}

#[test]
fn test_sensor_directions() {
    let ground = ContactSensor::ground(0.2);
    let wall = ContactSensor::wall(0.6);

    assert_eq!(ground.kind, SensorKind::Ground);
    assert_eq!(wall.kind, SensorKind::Wall);
    assert_eq!(ground.direction(Vec3::X), Vec3::NEG_Y);
    assert_eq!(wall.direction(Vec3::X), Vec3::X);
}

#[test]
fn test_sensor_ray_follows_current_body_pose() {
    let body = Transform::from_xyz(1.0, 2.0, 3.0)
        .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));

    let ground = ContactSensor::ground(0.2);
    let (origin, direction) = ground.ray(&body, &Transform::from_xyz(0.0, -0.85, 0.0));
    assert!(origin.abs_diff_eq(Vec3::new(1.0, 1.15, 3.0), 1e-5));
    assert_eq!(direction, Vec3::NEG_Y);

    // Mount offsets turn with the body, and the wall ray faces the body's forward.
    let wall = ContactSensor::wall(0.6);
    let (origin, direction) = wall.ray(&body, &Transform::from_xyz(0.5, 0.0, 0.0));
    assert!(origin.abs_diff_eq(Vec3::new(1.0, 2.0, 2.5), 1e-5));
    assert!(direction.abs_diff_eq(Vec3::NEG_X, 1e-5));
}

// -----------------------------------------------------------------------------
// Ground / air and jump tests
// -----------------------------------------------------------------------------

#[test]
fn test_initial_state_is_idle() {
    let state = MotionState::default();
    assert!(!state.is_grounded);
    assert!(!state.is_touching_wall);
    assert!(!state.is_climbing);
    assert!(!state.is_dashing);
    assert_eq!(state.coyote_timer, 0.0);
    assert_eq!(state.jump_buffer_timer, 0.0);
    assert_eq!(state.move_input, Vec2::ZERO);
}

#[test]
fn test_grounded_jump_same_tick() {
    let tuning = MovementTuning {
        coyote_time: 0.5,
        jump_buffer_time: 0.2,
        ..tuning()
    };
    let mut body = RecordingBody::default();
    let mut state = grounded_state(&mut body, &tuning);

    state.on_jump(&tuning);
    state.tick(DT, &mut body, &tuning);

    assert_eq!(state.jumps_performed, 1);
    assert_eq!(body.velocity.y, tuning.jump_force);
    assert!(!state.is_grounded);
    assert_eq!(state.coyote_timer, 0.0);
    assert_eq!(state.jump_buffer_timer, 0.0);
    assert!(body.gravity_enabled);
}

#[test]
fn test_jump_overrides_vertical_velocity() {
    let tuning = tuning();
    let mut body = RecordingBody {
        velocity: Vec3::new(1.0, -12.0, 0.0),
        ..default()
    };
    let mut state = grounded_state(&mut body, &tuning);

    state.on_jump(&tuning);
    state.tick(DT, &mut body, &tuning);

    assert_eq!(body.velocity.y, tuning.jump_force);
}

#[test]
fn test_airborne_coyote_jump() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = MotionState::default();
    state.coyote_timer = 0.3;

    state.on_jump(&tuning);
    state.tick(DT, &mut body, &tuning);

    assert_eq!(state.jumps_performed, 1);
    assert_eq!(state.coyote_timer, 0.0);
}

#[test]
fn test_ground_exit_grants_coyote_time() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = grounded_state(&mut body, &tuning);

    state.on_ground_exit(&tuning);

    assert!(!state.is_grounded);
    assert_eq!(state.coyote_timer, tuning.coyote_time);
}

#[test]
fn test_jump_inside_coyote_window() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = grounded_state(&mut body, &tuning);

    // Walk off a ledge, then press jump 0.25s later (window is 0.5s).
    state.on_ground_exit(&tuning);
    for _ in 0..4 {
        state.tick(DT, &mut body, &tuning);
    }
    state.on_jump(&tuning);
    state.tick(DT, &mut body, &tuning);

    assert_eq!(state.jumps_performed, 1);
}

#[test]
fn test_jump_after_coyote_window_is_ignored() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = grounded_state(&mut body, &tuning);

    state.on_ground_exit(&tuning);
    // 0.5s elapsed: the grace window is spent.
    for _ in 0..8 {
        state.tick(DT, &mut body, &tuning);
    }
    state.on_jump(&tuning);
    state.tick(DT, &mut body, &tuning);

    assert_eq!(state.jumps_performed, 0);
    assert_eq!(state.coyote_timer, 0.0);
}

#[test]
fn test_buffered_jump_fires_on_landing() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = MotionState::default();

    // Airborne, no coyote time: the press is only buffered.
    state.on_jump(&tuning);
    state.tick(DT, &mut body, &tuning);
    state.tick(DT, &mut body, &tuning);
    assert_eq!(state.jumps_performed, 0);

    state.on_ground_enter(&mut body, &tuning);
    assert_eq!(state.jumps_performed, 1);
    assert_eq!(state.jump_buffer_timer, 0.0);
    assert_eq!(body.velocity.y, tuning.jump_force);

    // Same landing tick's integration must not jump again.
    state.tick(DT, &mut body, &tuning);
    assert_eq!(state.jumps_performed, 1);
}

#[test]
fn test_buffered_jump_expires_before_landing() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = MotionState::default();

    state.on_jump(&tuning);
    // 0.3125s > 0.25s buffer
    for _ in 0..5 {
        state.tick(DT, &mut body, &tuning);
    }
    state.on_ground_enter(&mut body, &tuning);

    assert_eq!(state.jumps_performed, 0);
    assert!(state.is_grounded);
}

#[test]
fn test_double_jump_excluded_same_tick() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = grounded_state(&mut body, &tuning);

    state.on_jump(&tuning);
    state.tick(DT, &mut body, &tuning);
    assert_eq!(state.jumps_performed, 1);

    state.on_jump(&tuning);
    state.tick(DT, &mut body, &tuning);
    assert_eq!(state.jumps_performed, 1);
}

#[test]
fn test_take_off_exit_does_not_regrant_coyote() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = grounded_state(&mut body, &tuning);

    state.on_jump(&tuning);
    state.tick(DT, &mut body, &tuning);
    assert_eq!(state.jumps_performed, 1);

    // The ground sensor notices the take-off a tick later.
    state.on_ground_exit(&tuning);
    assert_eq!(state.coyote_timer, 0.0);

    for _ in 0..5 {
        state.tick(DT, &mut body, &tuning);
    }
    state.on_jump(&tuning);
    state.tick(DT, &mut body, &tuning);
    assert_eq!(state.jumps_performed, 1);

    // Landing restores normal behavior.
    state.on_ground_enter(&mut body, &tuning);
    assert_eq!(state.jumps_performed, 2);
}

// -----------------------------------------------------------------------------
// Wall / climb tests
// -----------------------------------------------------------------------------

#[test]
fn test_climb_follows_wall_contact() {
    let mut state = MotionState::default();
    assert_climb_invariant(&state);

    state.on_wall_enter();
    assert!(state.is_climbing);
    assert_climb_invariant(&state);

    state.on_wall_exit();
    assert!(!state.is_climbing);
    assert_climb_invariant(&state);
}

#[test]
fn test_climb_invariant_over_mixed_sequence() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = MotionState::default();
    let mut wall = ContactSensor::wall(0.6);
    let contacts = [false, true, true, false, true, false, false, true];

    for (tick, touching) in contacts.into_iter().enumerate() {
        wall.sample(&ScriptedWorld::new(touching), Vec3::ZERO, Vec3::NEG_Z, |edge| {
            match edge {
                ContactEdge::Enter => state.on_wall_enter(),
                ContactEdge::Exit => state.on_wall_exit(),
            }
        });
        if tick % 3 == 0 {
            state.on_dash(&mut body);
            state.on_jump(&tuning);
        }
        state.tick(DT, &mut body, &tuning);

        assert_climb_invariant(&state);
        assert_eq!(state.is_touching_wall, touching);
    }
}

#[test]
fn test_climbing_moves_vertically_without_gravity() {
    let tuning = tuning();
    let mut body = RecordingBody {
        velocity: Vec3::new(3.0, -2.0, 1.0),
        ..default()
    };
    let mut state = MotionState::default();

    state.on_wall_enter();
    state.on_move(Vec2::new(0.5, 1.0));
    state.tick(DT, &mut body, &tuning);

    assert!(!body.gravity_enabled);
    assert_eq!(body.velocity, Vec3::new(0.0, tuning.climb_speed, 0.0));

    state.on_move(Vec2::ZERO);
    state.tick(DT, &mut body, &tuning);
    assert_eq!(body.velocity, Vec3::ZERO);
}

#[test]
fn test_leaving_wall_restores_gravity() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = MotionState::default();

    state.on_wall_enter();
    state.tick(DT, &mut body, &tuning);
    assert!(!body.gravity_enabled);

    state.on_wall_exit();
    state.tick(DT, &mut body, &tuning);
    assert!(body.gravity_enabled);
}

// -----------------------------------------------------------------------------
// Walking tests
// -----------------------------------------------------------------------------

#[test]
fn test_walk_accelerates_along_input() {
    let tuning = MovementTuning {
        drag: 0.0,
        ..tuning()
    };
    let mut body = RecordingBody::default();
    let mut state = grounded_state(&mut body, &tuning);

    state.on_move(Vec2::new(1.0, 0.0));
    state.tick(DT, &mut body, &tuning);

    assert!((body.velocity.x - tuning.walk_force * DT).abs() < 1e-5);
    assert_eq!(body.velocity.z, 0.0);
}

#[test]
fn test_walk_turns_toward_input() {
    let tuning = MovementTuning {
        rotation_speed: 1000.0,
        ..tuning()
    };
    let mut body = RecordingBody::default();
    let mut state = grounded_state(&mut body, &tuning);

    state.on_move(Vec2::new(1.0, 0.0));
    state.tick(DT, &mut body, &tuning);

    assert!(body.forward().abs_diff_eq(Vec3::X, 1e-4));
}

#[test]
fn test_input_inside_dead_zone_is_ignored() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = grounded_state(&mut body, &tuning);

    state.on_move(Vec2::new(0.05, 0.0));
    state.tick(DT, &mut body, &tuning);

    assert_eq!(body.velocity, Vec3::ZERO);
    assert_eq!(body.rotation, Quat::IDENTITY);
}

#[test]
fn test_drag_decays_horizontal_velocity_only() {
    let tuning = tuning();
    let mut body = RecordingBody {
        velocity: Vec3::new(4.0, -3.0, -2.0),
        ..default()
    };
    let mut state = MotionState::default();

    state.tick(DT, &mut body, &tuning);

    let keep = 1.0 - tuning.drag * DT;
    assert!((body.velocity.x - 4.0 * keep).abs() < 1e-5);
    assert!((body.velocity.z + 2.0 * keep).abs() < 1e-5);
    assert_eq!(body.velocity.y, -3.0);
}

#[test]
fn test_velocity_change_force_ignores_dt() {
    let mut body = RecordingBody::default();
    body.apply_force(Vec3::X, ForceMode::VelocityChange, 0.5);
    body.apply_force(Vec3::X, ForceMode::Acceleration, 0.5);
    assert_eq!(body.velocity, Vec3::new(1.5, 0.0, 0.0));
}

#[test]
fn test_facing_rotation_points_forward_along_direction() {
    for direction in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z] {
        let forward = facing_rotation(direction) * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(direction, 1e-5), "{direction:?}");
    }
}

// -----------------------------------------------------------------------------
// Dash tests
// -----------------------------------------------------------------------------

#[test]
fn test_dash_height_profile() {
    assert_eq!(DashTrajectory::height_at(0.0, 2.0), 0.0);
    assert_eq!(DashTrajectory::height_at(0.5, 2.0), 2.0);
    assert_eq!(DashTrajectory::height_at(1.0, 2.0), 0.0);
}

#[test]
fn test_dash_trajectory_samples() {
    let tuning = tuning();
    let dash = DashTrajectory::begin(Vec3::new(1.0, 0.0, 0.0), Vec3::NEG_Z);

    assert_eq!(dash.position_at(0.0, &tuning), Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(dash.position_at(0.5, &tuning), Vec3::new(1.0, 1.0, -2.0));
    assert_eq!(dash.position_at(1.0, &tuning), Vec3::new(1.0, 0.0, -4.0));
}

#[test]
fn test_dash_trajectory_finishes_when_duration_reached() {
    let tuning = tuning();
    let mut dash = DashTrajectory::begin(Vec3::ZERO, Vec3::NEG_Z);

    assert!(matches!(dash.advance(DT, &tuning), DashStep::Moving(_)));
    assert!(matches!(dash.advance(DT, &tuning), DashStep::Moving(_)));
    assert!(matches!(dash.advance(DT, &tuning), DashStep::Moving(_)));
    assert_eq!(
        dash.advance(DT, &tuning),
        DashStep::Finished(Vec3::new(0.0, 0.0, -4.0))
    );
    assert_eq!(dash.elapsed(), tuning.dash_duration);
}

#[test]
fn test_dash_is_continuous_and_suppresses_forces() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = grounded_state(&mut body, &tuning);

    state.on_move(Vec2::new(1.0, 0.0));
    assert!(state.on_dash(&mut body));
    state.on_jump(&tuning);

    // 0.25s dash at 0.0625s per tick: dashing through tick 4.
    for tick in 1..=4 {
        assert!(state.is_dashing, "tick {tick}");
        state.tick(DT, &mut body, &tuning);
        assert_eq!(body.velocity, Vec3::ZERO, "tick {tick}");
        assert_eq!(body.rotation, Quat::IDENTITY, "tick {tick}");
        assert!(!body.gravity_enabled, "tick {tick}");
        assert_eq!(state.jumps_performed, 0, "tick {tick}");
    }

    assert!(!state.is_dashing);
    assert!(state.dash().is_none());
    assert_eq!(body.position_commands, 4);
    assert!(body.position.abs_diff_eq(Vec3::new(0.0, 0.0, -4.0), 1e-5));
}

#[test]
fn test_landing_mid_dash_defers_buffered_jump() {
    let tuning = MovementTuning {
        jump_buffer_time: 0.5,
        ..tuning()
    };
    let mut body = RecordingBody::default();
    let mut state = grounded_state(&mut body, &tuning);

    assert!(state.on_dash(&mut body));
    state.tick(DT, &mut body, &tuning);
    // The arc lifts off, jump is pressed, and the arc touches down again.
    state.on_ground_exit(&tuning);
    state.on_jump(&tuning);
    state.tick(DT, &mut body, &tuning);
    state.on_ground_enter(&mut body, &tuning);

    assert!(state.is_dashing);
    assert!(state.is_grounded);
    assert!(!body.gravity_enabled);
    assert_eq!(body.velocity, Vec3::ZERO);
    assert_eq!(state.jumps_performed, 0);
    assert!(state.jump_buffer_timer > 0.0);

    // Ticks 3 and 4 finish the dash without jumping.
    state.tick(DT, &mut body, &tuning);
    state.tick(DT, &mut body, &tuning);
    assert!(!state.is_dashing);
    assert_eq!(state.jumps_performed, 0);
    assert_eq!(body.velocity, Vec3::ZERO);

    // First free tick honors the buffered press.
    state.tick(DT, &mut body, &tuning);
    assert_eq!(state.jumps_performed, 1);
    assert!(body.gravity_enabled);
    assert_eq!(body.velocity.y, tuning.jump_force);
}

#[test]
fn test_dash_peaks_halfway() {
    let tuning = tuning();
    let mut body = RecordingBody::default();
    let mut state = MotionState::default();

    state.on_dash(&mut body);
    state.tick(DT, &mut body, &tuning);
    state.tick(DT, &mut body, &tuning);

    assert!(body.position.abs_diff_eq(Vec3::new(0.0, 1.0, -2.0), 1e-5));
}

#[test]
fn test_dash_rejected_while_climbing_or_dashing() {
    let mut body = RecordingBody::default();
    let mut state = MotionState::default();

    state.on_wall_enter();
    assert!(!state.on_dash(&mut body));
    assert!(!state.is_dashing);

    state.on_wall_exit();
    assert!(state.on_dash(&mut body));
    let first = state.dash().cloned();
    assert!(!state.on_dash(&mut body));
    assert_eq!(state.dash().cloned(), first);
}

#[test]
fn test_dash_uses_body_facing() {
    let tuning = tuning();
    let mut body = RecordingBody {
        rotation: facing_rotation(Vec3::X),
        ..default()
    };
    let mut state = MotionState::default();

    state.on_dash(&mut body);
    assert!(state.dash().unwrap().forward().abs_diff_eq(Vec3::X, 1e-5));

    for _ in 0..4 {
        state.tick(DT, &mut body, &tuning);
    }
    assert!(body.position.abs_diff_eq(Vec3::new(4.0, 0.0, 0.0), 1e-4));
}

// -----------------------------------------------------------------------------
// Tuning tests
// -----------------------------------------------------------------------------

#[test]
fn test_default_tuning_is_valid() {
    assert!(MovementTuning::default().validate().is_ok());
}

#[test]
fn test_tuning_rejects_bad_values() {
    let zero_dash = MovementTuning {
        dash_duration: 0.0,
        ..default()
    };
    assert_eq!(zero_dash.validate().unwrap_err().field, "dash_duration");

    let negative = MovementTuning {
        coyote_time: -0.1,
        ..default()
    };
    assert_eq!(negative.validate().unwrap_err().field, "coyote_time");

    let nan = MovementTuning {
        drag: f32::NAN,
        ..default()
    };
    assert_eq!(nan.validate().unwrap_err().field, "drag");
}

#[test]
fn test_jump_height() {
    let tuning = MovementTuning {
        jump_force: 10.0,
        ..default()
    };
    assert_eq!(tuning.jump_height(10.0), 5.0);
}

// -----------------------------------------------------------------------------
// Fixed-tick pipeline tests
// -----------------------------------------------------------------------------

fn pipeline_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(tuning());
    add_motion_pipeline(&mut app);
    app
}

fn spawn_test_player(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Player,
            MotionState::default(),
            Transform::default(),
            LinearVelocity::default(),
            GravityScale(DEFAULT_GRAVITY_SCALE),
        ))
        .id()
}

fn motion_state(app: &App, entity: Entity) -> MotionState {
    app.world()
        .get::<MotionState>(entity)
        .expect("player has MotionState")
        .clone()
}

#[test]
fn test_pipeline_jump_on_landing_tick() {
    let mut app = pipeline_app();
    let player = spawn_test_player(&mut app);

    app.world_mut().write_message(ContactEvent {
        body: player,
        sensor: SensorKind::Ground,
        edge: ContactEdge::Enter,
    });
    app.world_mut().write_message(JumpSignal);
    app.world_mut().run_schedule(FixedUpdate);

    let state = motion_state(&app, player);
    assert_eq!(state.jumps_performed, 1);
    assert_eq!(state.jump_buffer_timer, 0.0);
    assert!(!state.is_grounded);
    let velocity = app.world().get::<LinearVelocity>(player).expect("velocity");
    assert_eq!(velocity.0.y, tuning().jump_force);
}

#[test]
fn test_pipeline_routes_contacts_before_input() {
    let mut app = pipeline_app();
    let climber = spawn_test_player(&mut app);
    let runner = spawn_test_player(&mut app);

    // Wall contact arrives the same tick as the dash press.
    app.world_mut().write_message(ContactEvent {
        body: climber,
        sensor: SensorKind::Wall,
        edge: ContactEdge::Enter,
    });
    app.world_mut().write_message(DashSignal);
    app.world_mut().run_schedule(FixedUpdate);

    let climber_state = motion_state(&app, climber);
    assert!(climber_state.is_climbing);
    assert!(!climber_state.is_dashing);

    let runner_state = motion_state(&app, runner);
    assert!(!runner_state.is_touching_wall);
    assert!(runner_state.is_dashing);
    let gravity = app.world().get::<GravityScale>(runner).expect("gravity");
    assert_eq!(gravity.0, 0.0);
}
