/// Planet selection state machine: hover, fly-to, focus, fly-back.
///
/// Collaborators (engine context, scene config, info panel) are passed in by
/// reference on every call; the machine owns only selection state and the
/// camera snapshot taken when a fly-in starts.

use glam::{Vec2, Vec3};
use orrery_engine::{pick, EngineContext, Easing, EntityId, Layers, Tween};

use crate::config::{clamp_orbit_speed, SceneConfig, SelectionConfig};
use crate::overlay::InfoPanel;

/// Tween completion ids.
pub const FLY_IN_DONE: u32 = 1;
pub const FLY_OUT_DONE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Hovering(EntityId),
    TransitioningIn(EntityId),
    Focused(EntityId),
    TransitioningOut,
}

impl SelectionState {
    /// Wire code for the host.
    pub fn code(&self) -> f32 {
        match self {
            SelectionState::Idle => 0.0,
            SelectionState::Hovering(_) => 1.0,
            SelectionState::TransitioningIn(_) => 2.0,
            SelectionState::Focused(_) => 3.0,
            SelectionState::TransitioningOut => 4.0,
        }
    }

    pub fn body(&self) -> Option<EntityId> {
        match *self {
            SelectionState::Hovering(id)
            | SelectionState::TransitioningIn(id)
            | SelectionState::Focused(id) => Some(id),
            SelectionState::Idle | SelectionState::TransitioningOut => None,
        }
    }

    /// A selection is in progress: multiplier frozen, controls off, pointer ignored.
    pub fn is_engaged(&self) -> bool {
        !matches!(self, SelectionState::Idle | SelectionState::Hovering(_))
    }
}

/// Camera rig and orbit speed captured when a fly-in starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    pub eye: Vec3,
    pub target: Vec3,
    /// Multiplier restored on return; updated by speed changes made meanwhile.
    pub multiplier: f32,
}

/// A body the pointer can select.
#[derive(Debug, Clone)]
pub struct Selectable {
    pub id: EntityId,
    pub radius: f32,
    pub info: String,
}

pub struct SelectionMachine {
    state: SelectionState,
    config: SelectionConfig,
    easing: Easing,
    halo: EntityId,
    selectables: Vec<Selectable>,
    snapshot: Option<CameraSnapshot>,
    /// Last pointer position in NDC, for re-picking after a fly-back.
    pointer: Option<Vec2>,
}

impl SelectionMachine {
    pub fn new(config: SelectionConfig, halo: EntityId, selectables: Vec<Selectable>) -> Self {
        let easing = Easing::from_name(config.easing).unwrap_or_else(|| {
            log::warn!("unknown easing {:?}, using cubic in-out", config.easing);
            Easing::CubicInOut
        });
        Self {
            state: SelectionState::Idle,
            config,
            easing,
            halo,
            selectables,
            snapshot: None,
            pointer: None,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn hovered(&self) -> Option<EntityId> {
        match self.state {
            SelectionState::Hovering(id) => Some(id),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<&CameraSnapshot> {
        self.snapshot.as_ref()
    }

    fn selectable(&self, id: EntityId) -> Option<&Selectable> {
        self.selectables.iter().find(|s| s.id == id)
    }

    fn set_state(&mut self, next: SelectionState) {
        if next != self.state {
            log::debug!("selection: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Selectable body under an NDC point.
    fn pick_at(&self, ndc: Vec2, ctx: &EngineContext) -> Option<EntityId> {
        let ray = ctx.camera.ray_from_ndc(ndc);
        pick(&ctx.scene, &ray, Layers::PICK)
            .map(|hit| hit.id)
            .filter(|&id| self.selectable(id).is_some())
    }

    fn hover_at(&mut self, ndc: Vec2, ctx: &EngineContext) {
        let next = match self.pick_at(ndc, ctx) {
            Some(id) => SelectionState::Hovering(id),
            None => SelectionState::Idle,
        };
        self.set_state(next);
    }

    /// Pointer moved. Ignored (apart from being remembered) while a selection is engaged.
    pub fn pointer_moved(&mut self, ndc: Vec2, ctx: &EngineContext) {
        self.pointer = Some(ndc);
        if self.state.is_engaged() {
            return;
        }
        self.hover_at(ndc, ctx);
    }

    /// Click at an NDC point. Starts a fly-in only when it lands on the hovered body.
    pub fn click(&mut self, ndc: Vec2, ctx: &mut EngineContext, scene_config: &mut SceneConfig) -> bool {
        self.pointer = Some(ndc);
        let SelectionState::Hovering(hovered) = self.state else {
            return false;
        };
        if self.pick_at(ndc, ctx) != Some(hovered) {
            return false;
        }
        self.begin_fly_in(hovered, ctx, scene_config);
        true
    }

    fn begin_fly_in(&mut self, body: EntityId, ctx: &mut EngineContext, scene_config: &mut SceneConfig) {
        let Some(radius) = self.selectable(body).map(|s| s.radius) else {
            return;
        };
        let Some(body_pos) = ctx.scene.world_position(body) else {
            return;
        };

        let eye = ctx.camera.eye;
        let target = ctx.controls.target;
        self.snapshot = Some(CameraSnapshot {
            eye,
            target,
            multiplier: scene_config.orbit_speed_multiplier(),
        });

        scene_config.set_orbit_speed_multiplier(0.0);
        ctx.controls.enabled = false;
        ctx.controls.stop();
        ctx.scene.set_visible(self.halo, false);

        let dir = (eye - body_pos).try_normalize().unwrap_or(Vec3::Z);
        let eye_to = body_pos + dir * (self.config.offset_radii * radius);
        let secs = self.config.transition_secs;
        ctx.tweens.add(Tween::camera_eye(eye, eye_to, secs, self.easing).with_on_complete(FLY_IN_DONE));
        ctx.tweens.add(Tween::controls_target(target, body_pos, secs, self.easing));

        self.set_state(SelectionState::TransitioningIn(body));
    }

    /// Back action. Only acts while focused.
    pub fn back(&mut self, ctx: &mut EngineContext, panel: &mut InfoPanel) -> bool {
        if !matches!(self.state, SelectionState::Focused(_)) {
            return false;
        }
        let Some(snapshot) = self.snapshot else {
            return false;
        };
        panel.hide();

        let secs = self.config.transition_secs;
        ctx.tweens.add(
            Tween::camera_eye(ctx.camera.eye, snapshot.eye, secs, self.easing).with_on_complete(FLY_OUT_DONE),
        );
        ctx.tweens.add(Tween::controls_target(ctx.controls.target, snapshot.target, secs, self.easing));

        self.set_state(SelectionState::TransitioningOut);
        true
    }

    /// Handle a tween completion id.
    pub fn on_tween_complete(
        &mut self,
        event_id: u32,
        ctx: &mut EngineContext,
        scene_config: &mut SceneConfig,
        panel: &mut InfoPanel,
    ) {
        match (event_id, self.state) {
            (FLY_IN_DONE, SelectionState::TransitioningIn(body)) => {
                if let Some(pos) = ctx.scene.world_position(body) {
                    ctx.controls.target = pos;
                }
                if let Some(info) = self.selectable(body).map(|s| s.info.clone()) {
                    panel.show(info);
                }
                self.set_state(SelectionState::Focused(body));
            }
            (FLY_OUT_DONE, SelectionState::TransitioningOut) => {
                if let Some(snapshot) = self.snapshot.take() {
                    ctx.camera.eye = snapshot.eye;
                    ctx.controls.target = snapshot.target;
                    scene_config.set_orbit_speed_multiplier(snapshot.multiplier);
                }
                ctx.controls.enabled = true;
                self.set_state(SelectionState::Idle);
                if let Some(ndc) = self.pointer {
                    self.hover_at(ndc, ctx);
                }
            }
            _ => {}
        }
    }

    /// Orbit speed request from the controls panel. While a selection is
    /// engaged the value is kept for the return instead of applied.
    pub fn request_orbit_speed(&mut self, value: f32, scene_config: &mut SceneConfig) {
        match (self.state.is_engaged(), self.snapshot.as_mut()) {
            (true, Some(snapshot)) => snapshot.multiplier = clamp_orbit_speed(value),
            _ => scene_config.set_orbit_speed_multiplier(value),
        }
    }

    /// Per-frame halo update: shown only while hovering, sized to the body,
    /// placed on it and facing the camera.
    pub fn update_halo(&self, ctx: &mut EngineContext) {
        let placement = self.hovered().and_then(|id| {
            let radius = self.selectable(id)?.radius;
            let pos = ctx.scene.world_position(id)?;
            Some((pos, radius))
        });
        let facing = ctx.camera.orientation();

        if let Some(halo) = ctx.scene.get_mut(self.halo) {
            match placement {
                Some((pos, radius)) => {
                    halo.visible = true;
                    halo.pos = pos;
                    halo.rotation = facing;
                    halo.scale = Vec3::splat(radius);
                }
                None => halo.visible = false,
            }
        }
    }
}
