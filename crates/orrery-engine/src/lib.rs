pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::layer::Layers;
pub use components::mesh::{Color, Material, MeshComponent, Shape};
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use core::time::{FrameClock, FrameTime};
pub use renderer::camera::{CameraUniform, OrbitControls, PerspectiveCamera, Ray};
pub use renderer::instance::{PointBuffer, PointInstance, RenderBuffer, RenderInstance};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{TextureDescriptor, TextureManifest};
pub use assets::registry::{AssetError, TextureId, TextureRegistry};
pub use bridge::protocol::ProtocolLayout;
pub use systems::picking::{pick, PickHit};
pub use systems::render::build_render_buffer;

// Extensions
pub use extensions::{
    Easing, lerp, ease, ease_vec3,
    TransformGraph, LocalTransform,
    TweenState, Tween, TweenId, TweenTarget,
};
