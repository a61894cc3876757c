//! Desktop window built on raylib.
//!
//! Plays the role of the render, audio and input collaborators: keyboard and
//! mouse are turned into [`InputEvent`](steppingstone::events::input::InputEvent)s,
//! the bridge and the player are drawn as boxes, and the joystick overlay and
//! a small HUD are drawn on top. Audio cues and host messages are only logged.

use log::{debug, info};
use raylib::prelude::*;
use steppingstone::events::host::{ControlCommand, HostCommand};
use steppingstone::events::input::PointerPhase;
use steppingstone::game::GameSession;
use steppingstone::resources::gameconfig::GameConfig;
use steppingstone::resources::gamestate::GameStates;
use steppingstone::resources::input::GameKey;
use steppingstone::resources::joystick::PointerId;

const KEY_BINDINGS: [(KeyboardKey, GameKey); 9] = [
    (KeyboardKey::KEY_UP, GameKey::Up),
    (KeyboardKey::KEY_DOWN, GameKey::Down),
    (KeyboardKey::KEY_LEFT, GameKey::Left),
    (KeyboardKey::KEY_RIGHT, GameKey::Right),
    (KeyboardKey::KEY_W, GameKey::Up),
    (KeyboardKey::KEY_S, GameKey::Down),
    (KeyboardKey::KEY_A, GameKey::Left),
    (KeyboardKey::KEY_D, GameKey::Right),
    (KeyboardKey::KEY_SPACE, GameKey::Jump),
];

const PLAYER_SIZE: f32 = 1.0;

pub fn run(mut session: GameSession, config: &GameConfig) {
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Stepping Stone")
        .build();
    rl.set_target_fps(config.target_fps);
    rl.set_exit_key(Some(KeyboardKey::KEY_ESCAPE));

    let input = session.input_sender();
    let host = session.host_messages();
    input.resize(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
    let mut last_mouse = rl.get_mouse_position();

    while !rl.window_should_close() && session.state() != GameStates::Quitting {
        // --------------- Input ---------------
        for (key, game_key) in KEY_BINDINGS {
            if rl.is_key_pressed(key) {
                input.key(game_key, true);
            }
            if rl.is_key_released(key) {
                input.key(game_key, false);
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_P) {
            let command = if session.state() == GameStates::Paused {
                ControlCommand::Resume
            } else {
                ControlCommand::Pause
            };
            session.send_host_command(HostCommand::GameControl { command });
        }
        if rl.is_key_pressed(KeyboardKey::KEY_ENTER) {
            session.send_host_command(HostCommand::GameControl {
                command: ControlCommand::Restart,
            });
        }

        let mouse = rl.get_mouse_position();
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            input.pointer(PointerId::Mouse, PointerPhase::Down, mouse.x, mouse.y);
        } else if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            input.pointer(PointerId::Mouse, PointerPhase::Up, mouse.x, mouse.y);
        } else if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT)
            && (mouse.x != last_mouse.x || mouse.y != last_mouse.y)
        {
            input.pointer(PointerId::Mouse, PointerPhase::Move, mouse.x, mouse.y);
        }
        last_mouse = mouse;

        if rl.is_window_resized() {
            input.resize(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        }

        // --------------- Simulation ---------------
        session.tick(rl.get_frame_time());
        for cue in session.drain_audio_cues() {
            debug!("Audio cue {:?}", cue);
        }
        for envelope in host.try_iter() {
            debug!("Host message {:?}", envelope.message);
        }

        // --------------- Drawing ---------------
        let Some(view) = session.player_view() else {
            continue;
        };
        let bridge = *session.bridge();
        let score = session.score().clone();
        let stick = session.joystick().clone();
        let state = session.state();

        let camera = Camera3D::perspective(
            Vector3::new(view.position.x * 0.5, 6.0, view.position.z + 10.0),
            Vector3::new(view.position.x * 0.5, 0.0, view.position.z - 2.0),
            Vector3::new(0.0, 1.0, 0.0),
            50.0,
        );

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::SKYBLUE);
        {
            let mut d3 = d.begin_mode3D(camera);
            let deck_center = Vector3::new(0.0, -0.25, (bridge.z_min + bridge.z_max) * 0.5);
            d3.draw_cube(
                deck_center,
                bridge.half_width * 2.0,
                0.5,
                bridge.length(),
                Color::BROWN,
            );
            d3.draw_cube_wires(
                deck_center,
                bridge.half_width * 2.0,
                0.5,
                bridge.length(),
                Color::DARKBROWN,
            );

            let body = Vector3::new(
                view.position.x,
                view.position.y + PLAYER_SIZE * 0.5,
                view.position.z,
            );
            let color = if view.falling() {
                Color::MAROON
            } else if view.jumping() {
                Color::ORANGE
            } else {
                Color::RED
            };
            d3.draw_cube(body, PLAYER_SIZE, PLAYER_SIZE, PLAYER_SIZE, color);
            let nose = Vector3::new(
                body.x + view.facing.yaw.sin() * 0.6,
                body.y + 0.2,
                body.z + view.facing.yaw.cos() * 0.6,
            );
            d3.draw_cube(nose, 0.2, 0.2, 0.2, Color::BLACK);
        }

        // joystick overlay
        let base = stick.center;
        d.draw_circle_lines(
            base.x as i32,
            base.y as i32,
            stick.max_radius,
            Color::new(255, 255, 255, 160),
        );
        let knob = base + stick.knob_offset();
        d.draw_circle_v(
            Vector2::new(knob.x, knob.y),
            stick.max_radius * 0.5,
            Color::new(255, 255, 255, if stick.is_active() { 220 } else { 120 }),
        );
        let button = stick.jump_button;
        d.draw_circle_v(
            Vector2::new(button.center.x, button.center.y),
            button.radius * 0.6,
            Color::new(255, 200, 60, if stick.jump_held() { 230 } else { 140 }),
        );

        d.draw_text(&format!("Score {}", score.score), 10, 10, 24, Color::WHITE);
        d.draw_text(
            &format!("Best {}  Distance {:.1}", score.best_score, score.max_distance),
            10,
            40,
            18,
            Color::WHITE,
        );
        match state {
            GameStates::Paused => d.draw_text("PAUSED (P)", 10, 70, 24, Color::YELLOW),
            GameStates::GameOver => {
                d.draw_text("GAME OVER - press Enter", 10, 70, 24, Color::YELLOW)
            }
            _ => {}
        }
    }

    session.shutdown();
    info!("Window closed");
}
