/// Solar System: interactive 3D orrery.
///
/// Pivots spin the planets around the sun, a seeded starfield flickers in the
/// background, and clicking a hovered planet flies the camera to it and types
/// out an info card. Drag orbits the camera, wheel zooms.

use glam::Vec2;
use orrery_engine::{
    EngineContext, FrameTime, Game, GameConfig, GameEvent, InputEvent, InputQueue, RenderContext,
};

use crate::bodies::BODIES;
use crate::config::{SceneConfig, SelectionConfig, StarfieldConfig};
use crate::kinematics::OrbitalKinematics;
use crate::overlay::InfoPanel;
use crate::scene::{self, SolarScene};
use crate::selection::{Selectable, SelectionMachine, SelectionState};
use crate::starfield::Starfield;

// ── Custom event kinds from the host ─────────────────────────────────

pub const CUSTOM_SET_SHOW_ORBITS: u32 = 1;
pub const CUSTOM_SET_ORBIT_SPEED: u32 = 2;
pub const CUSTOM_BACK: u32 = 3;
/// Viewport resize (sent by the host as kind=99).
pub const CUSTOM_RESIZE: u32 = 99;

// ── Game event kinds to the host ─────────────────────────────────────

/// a = hovered body index or -1.
pub const EVENT_HOVER: f32 = 1.0;
/// a = state code, b = body index or -1.
pub const EVENT_SELECTION: f32 = 2.0;
/// a = visible (0/1), b = revealed chars, c = total chars.
pub const EVENT_INFO: f32 = 3.0;
/// a = 1 for pointer cursor, 0 for default.
pub const EVENT_CURSOR: f32 = 4.0;

// ── Pointer ──────────────────────────────────────────────────────────

/// CSS-pixel travel before a press becomes a drag instead of a click.
const CLICK_THRESHOLD: f32 = 5.0;

/// Pointer press being tracked between down and up.
#[derive(Debug, Clone, Copy)]
struct Press {
    start: Vec2,
    last: Vec2,
    dragged: bool,
}

/// What the host last heard, so events fire only on change.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Reported {
    hover: f32,
    selection: (f32, f32),
    info: (bool, usize),
    cursor: bool,
}

pub struct SolarSystem {
    config: SceneConfig,
    selection_config: SelectionConfig,
    kinematics: OrbitalKinematics,
    starfield: Starfield,
    panel: InfoPanel,
    handles: Option<SolarScene>,
    machine: Option<SelectionMachine>,
    press: Option<Press>,
    reported: Option<Reported>,
    last_flicker_writes: usize,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_configs(SceneConfig::default(), StarfieldConfig::default(), SelectionConfig::default())
    }

    pub fn with_configs(config: SceneConfig, stars: StarfieldConfig, selection: SelectionConfig) -> Self {
        Self {
            config,
            selection_config: selection,
            kinematics: OrbitalKinematics::new(),
            starfield: Starfield::new(stars),
            panel: InfoPanel::new(selection.reveal_interval),
            handles: None,
            machine: None,
            press: None,
            reported: None,
            last_flicker_writes: 0,
        }
    }

    // ── Accessors for exports and tests ────────────────────────────

    pub fn scene_config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn handles(&self) -> Option<&SolarScene> {
        self.handles.as_ref()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.machine.as_ref().map_or(SelectionState::Idle, |m| m.state())
    }

    pub fn kinematics(&self) -> &OrbitalKinematics {
        &self.kinematics
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn info_panel(&self) -> &InfoPanel {
        &self.panel
    }

    /// Info card text revealed so far.
    pub fn info_text(&self) -> &str {
        self.panel.revealed()
    }

    pub fn is_info_visible(&self) -> bool {
        self.panel.is_visible()
    }

    /// Star color writes made by the most recent frame.
    pub fn last_flicker_writes(&self) -> usize {
        self.last_flicker_writes
    }

    // ── Input ──────────────────────────────────────────────────────

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(machine) = self.machine.as_mut() else {
            return;
        };

        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind, a, b, .. } => match kind {
                    CUSTOM_SET_SHOW_ORBITS => {
                        self.config.show_orbits = a != 0.0;
                        if let Some(handles) = &self.handles {
                            handles.set_orbits_visible(ctx, self.config.show_orbits);
                        }
                    }
                    CUSTOM_SET_ORBIT_SPEED => machine.request_orbit_speed(a, &mut self.config),
                    CUSTOM_BACK => {
                        machine.back(ctx, &mut self.panel);
                    }
                    CUSTOM_RESIZE => ctx.camera.resize(a, b),
                    _ => log::debug!("unhandled custom event {kind}"),
                },
                InputEvent::PointerDown { x, y } => {
                    let at = Vec2::new(x, y);
                    self.press = Some(Press { start: at, last: at, dragged: false });
                }
                InputEvent::PointerMove { x, y } => {
                    let at = Vec2::new(x, y);
                    if let Some(press) = self.press.as_mut() {
                        if at.distance(press.start) > CLICK_THRESHOLD {
                            press.dragged = true;
                        }
                        if press.dragged {
                            let delta = at - press.last;
                            ctx.controls.rotate(delta.x, delta.y);
                        }
                        press.last = at;
                    }
                    machine.pointer_moved(ctx.camera.screen_to_ndc(x, y), ctx);
                }
                InputEvent::PointerUp { x, y } => {
                    let at = Vec2::new(x, y);
                    if let Some(press) = self.press.take() {
                        if !press.dragged && at.distance(press.start) <= CLICK_THRESHOLD {
                            let ndc = ctx.camera.screen_to_ndc(x, y);
                            machine.click(ndc, ctx, &mut self.config);
                        }
                    }
                }
                InputEvent::Wheel { delta } => ctx.controls.zoom(delta),
            }
        }
    }

    // ── Host events ────────────────────────────────────────────────

    fn body_index(&self, id: Option<orrery_engine::EntityId>) -> f32 {
        id.and_then(|id| self.handles.as_ref()?.body_index(id))
            .map_or(-1.0, |i| i as f32)
    }

    fn emit_changes(&mut self, ctx: &mut EngineContext) {
        let state = self.selection_state();
        let hovered = match state {
            SelectionState::Hovering(id) => Some(id),
            _ => None,
        };
        let now = Reported {
            hover: self.body_index(hovered),
            selection: (state.code(), self.body_index(state.body())),
            info: (self.panel.is_visible(), self.panel.revealed_chars()),
            cursor: hovered.is_some(),
        };
        let before = self.reported;

        if before.map(|r| r.hover) != Some(now.hover) {
            ctx.emit_event(GameEvent::new(EVENT_HOVER, now.hover, 0.0, 0.0));
        }
        if before.map(|r| r.selection) != Some(now.selection) {
            ctx.emit_event(GameEvent::new(EVENT_SELECTION, now.selection.0, now.selection.1, 0.0));
        }
        if before.map(|r| r.info) != Some(now.info) {
            ctx.emit_event(GameEvent::new(
                EVENT_INFO,
                if now.info.0 { 1.0 } else { 0.0 },
                now.info.1 as f32,
                self.panel.total_chars() as f32,
            ));
        }
        if before.map(|r| r.cursor) != Some(now.cursor) {
            ctx.emit_event(GameEvent::new(EVENT_CURSOR, if now.cursor { 1.0 } else { 0.0 }, 0.0, 0.0));
        }
        self.reported = Some(now);
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 64,
            max_points: self.starfield.len().max(1),
            max_events: 16,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let handles = scene::build(ctx, &mut self.kinematics, self.config.show_orbits);

        let selectables = BODIES
            .iter()
            .enumerate()
            .filter(|(_, def)| def.selectable)
            .map(|(i, def)| Selectable {
                id: handles.bodies[i],
                radius: def.radius,
                info: def.info.map(|info| info.describe(def.radius)).unwrap_or_default(),
            })
            .collect();

        self.machine = Some(SelectionMachine::new(self.selection_config, handles.halo, selectables));
        self.handles = Some(handles);
        log::info!("solar system: {} stars", self.starfield.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, time: FrameTime) {
        self.handle_input(ctx, input);

        // ── Tween completions (ticked by the runner this frame) ──────
        let completed: Vec<u32> = ctx.tweens.drain_completed().collect();
        if let Some(machine) = self.machine.as_mut() {
            for id in completed {
                machine.on_tween_complete(id, ctx, &mut self.config, &mut self.panel);
            }
        }

        // ── Motion ───────────────────────────────────────────────────
        self.kinematics.advance(&mut ctx.transforms, time, self.config.orbit_speed_multiplier());
        ctx.transforms.propagate(&mut ctx.scene);

        self.last_flicker_writes = self.starfield.advance(time.dt);

        // Camera settles before the halo turns to face it.
        ctx.controls.update(&mut ctx.camera, time.ticks);
        if let Some(machine) = &self.machine {
            machine.update_halo(ctx);
        }
        self.panel.advance(time.dt);

        self.emit_changes(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        self.starfield.push_points(ctx.points);
    }
}
