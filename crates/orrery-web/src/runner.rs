use orrery_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, RenderBuffer, PointBuffer, CameraUniform,
    FrameClock, ProtocolLayout, TextureManifest,
};
use orrery_engine::bridge::protocol::{
    HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_INSTANCE_COUNT, HEADER_TRANSLUCENT_SPLIT,
    HEADER_POINT_COUNT, HEADER_POINT_SIZE, HEADER_EVENT_COUNT,
    HEADER_VIEWPORT_WIDTH, HEADER_VIEWPORT_HEIGHT,
};
use orrery_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner via `export_game!`
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    points: PointBuffer,
    camera_uniform: CameraUniform,
    header: [f32; HEADER_FLOATS],
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let clock = FrameClock::new(config.reference_rate, config.max_dt);
        let layout = ProtocolLayout::from_config(&config);

        Self {
            game,
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            points: PointBuffer::with_capacity(config.max_points),
            camera_uniform: CameraUniform::default(),
            header: [0.0; HEADER_FLOATS],
            clock,
            layout,
            config,
            initialized: false,
        }
    }

    /// Initialize the game with the host's texture manifest. Call once after construction.
    pub fn init(&mut self, manifest_json: &str) {
        let manifest = TextureManifest::from_json_or_empty(manifest_json);
        self.ctx.load_manifest(&manifest);
        self.layout.write_static_header(&self.config, &mut self.header);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.build_frame_buffers();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: advance clock, tweens, game update, then rebuild render buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let time = self.clock.advance(dt);
        self.ctx.tick_tweens(time.dt);
        self.game.update(&mut self.ctx, &self.input, time);

        // Drain input after update
        self.input.drain();

        self.build_frame_buffers();
        self.header[HEADER_FRAME_COUNTER] = time.frame as f32;
    }

    fn build_frame_buffers(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
        self.points.clear();

        // Allow game to add custom render commands
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
                points: &mut self.points,
                camera: &self.ctx.camera,
            };
            self.game.render(&mut render_ctx);
        }

        if self.render_buffer.instances.len() > self.layout.max_instances {
            log::warn!(
                "{} instances exceed capacity {}; truncating",
                self.render_buffer.instances.len(),
                self.layout.max_instances
            );
            self.render_buffer.instances.truncate(self.layout.max_instances);
        }
        self.points.points.truncate(self.layout.max_points);
        self.ctx.events.truncate(self.layout.max_events);

        self.camera_uniform = self.ctx.camera.uniform();

        self.header[HEADER_INSTANCE_COUNT] = self.render_buffer.instance_count() as f32;
        self.header[HEADER_TRANSLUCENT_SPLIT] =
            self.render_buffer.translucent_split.min(self.render_buffer.instance_count()) as f32;
        self.header[HEADER_POINT_COUNT] = self.points.point_count() as f32;
        self.header[HEADER_POINT_SIZE] = self.points.size;
        self.header[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        self.header[HEADER_VIEWPORT_WIDTH] = self.ctx.camera.viewport.x;
        self.header[HEADER_VIEWPORT_HEIGHT] = self.ctx.camera.viewport.y;
    }

    /// The game, for game-specific exports (e.g. overlay text).
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Engine state, for inspection from tests and exports.
    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn point_buffer(&self) -> &PointBuffer {
        &self.points
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn camera_uniform(&self) -> &CameraUniform {
        &self.camera_uniform
    }

    /// Camera uniform as a flat float slice (view-projection, then eye).
    pub fn camera_floats(&self) -> &[f32] {
        self.camera_uniform.as_floats()
    }

    // ---- Pointer accessors for host reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.camera_uniform.as_floats().as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn translucent_split(&self) -> u32 {
        self.render_buffer.translucent_split
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.points_ptr()
    }

    pub fn point_count(&self) -> u32 {
        self.points.point_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_points(&self) -> u32 {
        self.layout.max_points as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{
        Color, Entity, FrameTime, GameEvent, Material, MeshComponent, PointInstance,
    };

    #[derive(Default)]
    struct Probe {
        frames: Vec<FrameTime>,
        moves: usize,
    }

    impl Game for Probe {
        fn config(&self) -> GameConfig {
            GameConfig { max_points: 2, ..Default::default() }
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id).with_mesh(MeshComponent::sphere(1.0, Material::Basic { color: Color::WHITE, opacity: 1.0 })),
            );
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, time: FrameTime) {
            self.frames.push(time);
            self.moves += input.iter().filter(|e| matches!(e, InputEvent::PointerMove { .. })).count();
            ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        }

        fn render(&self, ctx: &mut RenderContext) {
            for _ in 0..3 {
                ctx.points.push(PointInstance::default());
            }
        }
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut runner = GameRunner::new(Probe::default());
        runner.tick(0.016);
        assert!(runner.game().frames.is_empty());
    }

    #[test]
    fn tick_clamps_dt_and_drains_input() {
        let mut runner = GameRunner::new(Probe::default());
        runner.init("");
        runner.push_input(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        runner.tick(2.0);
        runner.tick(-1.0);

        let frames = &runner.game().frames;
        assert_eq!(frames[0].dt, 0.25);
        assert!((frames[0].ticks - 15.0).abs() < 1e-4);
        assert_eq!(frames[1].dt, 0.0);
        assert_eq!(runner.game().moves, 1);
    }

    #[test]
    fn buffers_respect_capacities() {
        let mut runner = GameRunner::new(Probe::default());
        runner.init("not json");
        runner.tick(1.0 / 60.0);

        assert_eq!(runner.instance_count(), 1);
        assert_eq!(runner.point_count(), 2);
        assert_eq!(runner.game_events_len(), 1);
        let header = runner.header();
        assert_eq!(header[HEADER_INSTANCE_COUNT], 1.0);
        assert_eq!(header[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(runner.camera_floats().len(), CameraUniform::FLOATS);
    }
}
