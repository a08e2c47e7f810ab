//! Arrow keys move and turn the robot, Space jumps, S gives a thumbs-up,
//! Escape quits.
//!
//! Run from the workspace root so the default model path resolves:
//!
//! ```text
//! RUST_LOG=info cargo run -p robot_walk
//! ```

use walker::App;

fn main() -> walker::Result<()> {
    env_logger::init();
    log::info!("Controls: arrows move/turn, Space jumps, S gestures, Esc quits");

    App::new()
        .with_title("Robot Walk")
        .with_model_path("assets/RobotExpressive.glb")
        .run()
}
