use rastrum::math::Vec3;
use rastrum::renderer::{RenderMode, Renderer};
use rastrum::window::{FrameLimiter, Key, Window, WindowEvent, WINDOW_HEIGHT, WINDOW_WIDTH};

const DEFAULT_MODEL: &str = "./assets/cube.obj";
const DEFAULT_TEXTURE: &str = "./assets/cube.png";

const MOVE_SPEED: f32 = 5.0;
const TURN_SPEED: f32 = 1.0;
const LIFT_SPEED: f32 = 3.0;

fn process_input(window: &mut Window, renderer: &mut Renderer, delta_time: f32) -> bool {
    match window.poll_event() {
        WindowEvent::Quit => return false,
        WindowEvent::KeyPress(key) => match key {
            Key::Num1 => renderer.set_render_mode(RenderMode::WIRE | RenderMode::DOT),
            Key::Num2 => renderer.set_render_mode(RenderMode::WIRE),
            Key::Num3 => renderer.set_render_mode(RenderMode::SOLID),
            Key::Num4 => renderer.set_render_mode(RenderMode::SOLID | RenderMode::WIRE),
            Key::Num5 => renderer.set_render_mode(RenderMode::TEXTURE),
            Key::Num6 => renderer.set_render_mode(RenderMode::TEXTURE | RenderMode::WIRE),
            Key::C => renderer.toggle_backface_culling(),
            Key::Z => renderer.toggle_depth_visualization(),
            Key::W => renderer.camera_mut().move_forward(MOVE_SPEED * delta_time),
            Key::S => renderer.camera_mut().move_forward(-MOVE_SPEED * delta_time),
            Key::A => renderer.camera_mut().rotate_yaw(-TURN_SPEED * delta_time),
            Key::D => renderer.camera_mut().rotate_yaw(TURN_SPEED * delta_time),
            Key::I => renderer.camera_mut().rotate_pitch(TURN_SPEED * delta_time),
            Key::K => renderer.camera_mut().rotate_pitch(-TURN_SPEED * delta_time),
            Key::Up => renderer.camera_mut().move_vertical(LIFT_SPEED * delta_time),
            Key::Down => renderer.camera_mut().move_vertical(-LIFT_SPEED * delta_time),
        },
        WindowEvent::None => {}
    }
    true
}

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    let (model, texture) = if args.len() == 3 {
        (args[1].as_str(), args[2].as_str())
    } else {
        (DEFAULT_MODEL, DEFAULT_TEXTURE)
    };

    let mut window = Window::new("rastrum", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut renderer = Renderer::new(WINDOW_WIDTH, WINDOW_HEIGHT);

    // A missing asset is not fatal: the scene just starts empty
    if let Err(e) = renderer.load_mesh(
        model,
        texture,
        Vec3::ONE,
        Vec3::new(0.0, 0.0, 5.0),
        Vec3::ZERO,
    ) {
        eprintln!("skipping mesh {}: {}", model, e);
    }

    let mut frame_limiter = FrameLimiter::new(&window);

    loop {
        let delta_time = frame_limiter.wait_and_get_delta(&window) as f32 / 1000.0;

        if !process_input(&mut window, &mut renderer, delta_time) {
            break;
        }

        renderer.update();
        renderer.render();
        window.present(renderer.frame_bytes())?;
    }

    Ok(())
}
