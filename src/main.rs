// src/main.rs

pub mod app;
pub mod demo_scene;
pub mod engine_lib;
pub mod rendering_lib;
pub mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use fov_magic::scene::Scene;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::WindowBuilder,
};

use app::CoverageApp;

type BoxError = Box<dyn std::error::Error>;

#[derive(Debug, PartialEq)]
enum Command {
    /// Open the viewer on a scene file, or on the built-in demo.
    View(Option<PathBuf>),
    /// Print the coverage of every camera in a scene file as JSON.
    Export(PathBuf),
    /// Print the built-in demo scene as JSON.
    Demo,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    match args {
        [] => Ok(Command::View(None)),
        [cmd] if cmd == "demo" => Ok(Command::Demo),
        [cmd, path] if cmd == "export" => Ok(Command::Export(PathBuf::from(path))),
        [cmd] if cmd == "export" => Err("export needs a scene file".to_string()),
        [path] => Ok(Command::View(Some(PathBuf::from(path)))),
        _ => Err(format!("unexpected arguments: {}", args.join(" "))),
    }
}

/// Reads the scene on a blocking worker so the caller never touches the disk.
async fn load_scene(path: Option<PathBuf>) -> Result<Scene, BoxError> {
    match path {
        Some(path) => Ok(tokio::task::spawn_blocking(move || Scene::load(path)).await??),
        None => {
            log::info!("no scene file given, using the demo scene");
            Ok(demo_scene::create_demo_scene())
        }
    }
}

async fn export(path: PathBuf) -> Result<(), BoxError> {
    let scene = load_scene(Some(path)).await?;
    let coverage = scene.simulate_all()?;
    println!("{}", serde_json::to_string_pretty(&coverage)?);
    Ok(())
}

async fn view(path: Option<PathBuf>) -> Result<(), BoxError> {
    let scene = load_scene(path).await?;

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("FOV Magic")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800))
            .build(&event_loop)?,
    );

    let mut app_state = CoverageApp::new(window.clone(), scene).await?;
    let mut last_time = std::time::Instant::now();

    event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { ref event, window_id } if window_id == window.id() => {
                if !app_state.handle_window_event(event, &window) {
                    match event {
                        WindowEvent::CloseRequested => target.exit(),
                        WindowEvent::Resized(physical_size) => app_state.resize(*physical_size),
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                let now = std::time::Instant::now();
                let dt = (now - last_time).as_secs_f32();
                last_time = now;

                app_state.update(dt);
                match app_state.render(&window) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        app_state.resize(app_state.get_size());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("out of GPU memory, exiting");
                        target.exit();
                    }
                    Err(e) => log::warn!("surface error: {e:?}"),
                }

                if !target.exiting() {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}

async fn run() -> Result<(), BoxError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::View(path) => view(path).await,
        Command::Export(path) => export(path).await,
        Command::Demo => {
            println!("{}", demo_scene::create_demo_scene().to_json_string()?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        log::error!("{e}");
        eprintln!("fov_magic: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_args(&args(&[])), Ok(Command::View(None)));
        assert_eq!(parse_args(&args(&["site.json"])), Ok(Command::View(Some("site.json".into()))));
        assert_eq!(parse_args(&args(&["export", "site.json"])), Ok(Command::Export("site.json".into())));
        assert_eq!(parse_args(&args(&["demo"])), Ok(Command::Demo));
        assert!(parse_args(&args(&["export"])).is_err());
        assert!(parse_args(&args(&["a", "b", "c"])).is_err());
    }

    #[tokio::test]
    async fn missing_scene_file_is_an_error() {
        assert!(load_scene(Some("does/not/exist.json".into())).await.is_err());
    }

    #[tokio::test]
    async fn demo_scene_without_path() {
        let scene = load_scene(None).await.unwrap();
        assert_eq!(scene.cameras.len(), 3);
    }
}
