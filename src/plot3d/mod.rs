pub mod camera;
pub mod projector;
pub mod renderer;
pub mod scene;
