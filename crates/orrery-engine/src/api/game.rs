use crate::core::scene::Scene;
use crate::core::time::FrameTime;
use crate::api::types::{EntityId, GameEvent};
use crate::assets::manifest::TextureManifest;
use crate::assets::registry::TextureRegistry;
use crate::extensions::transform::TransformGraph;
use crate::extensions::tween::TweenState;
use crate::input::queue::InputQueue;
use crate::renderer::camera::{OrbitControls, PerspectiveCamera};
use crate::renderer::instance::{PointBuffer, RenderBuffer};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Rate that per-tick speeds are authored against (default: 60 Hz).
    pub reference_rate: f32,
    /// Largest frame delta fed to the game, in seconds (default: 0.25).
    pub max_dt: f32,
    /// Initial viewport width in CSS pixels.
    pub viewport_width: f32,
    /// Initial viewport height in CSS pixels.
    pub viewport_height: f32,
    /// Maximum number of mesh instances (default: 64).
    pub max_instances: usize,
    /// Maximum number of background points (default: 1024).
    pub max_points: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            reference_rate: 60.0,
            max_dt: 0.25,
            viewport_width: 1600.0,
            viewport_height: 900.0,
            max_instances: 64,
            max_points: 1024,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    /// Textures listed in the host manifest are already in `ctx.textures`.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Per-frame update. `input` holds everything queued since the last frame;
    /// tweens have already been advanced for this frame.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, time: FrameTime);

    /// Optional read-only render pass for data the scene does not carry (e.g. points).
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub transforms: TransformGraph,
    pub tweens: TweenState,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub textures: TextureRegistry,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Create a context whose camera matches the configured viewport.
    pub fn with_config(config: &GameConfig) -> Self {
        let mut camera = PerspectiveCamera::default();
        camera.resize(config.viewport_width, config.viewport_height);
        Self {
            scene: Scene::with_capacity(config.max_instances),
            transforms: TransformGraph::new(),
            tweens: TweenState::new(),
            camera,
            controls: OrbitControls::default(),
            textures: TextureRegistry::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Replace the texture registry from a host manifest.
    pub fn load_manifest(&mut self, manifest: &TextureManifest) {
        self.textures = TextureRegistry::from_manifest(manifest);
        log::info!("texture manifest: {} textures", self.textures.len());
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Advance tweens by `dt` seconds against the camera rig.
    /// Completion ids are collected in `tweens` until the game drains them.
    pub fn tick_tweens(&mut self, dt: f32) -> usize {
        self.tweens.tick(dt, &mut self.camera, &mut self.controls)
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    pub points: &'a mut PointBuffer,
    pub camera: &'a PerspectiveCamera,
}
