//! The whole per-actor state of the demo, advanced once per frame.

use std::sync::Arc;

use glam::Vec3;

use crate::animation::AnimationMixer;
use crate::assets::{LoadedModel, ModelLoad};
use crate::character::follow::{FollowParams, follow_placement};
use crate::character::motion::{ActorPose, MotionIntegrator, MotionParams, Velocity};
use crate::character::registry::ClipRegistry;
use crate::character::selector::AnimationSelector;
use crate::character::state::{AnimState, Transition};
use crate::input::{Command, Key};
use crate::scene::{Camera, Rig};

/// Lens and the camera placement used until the actor exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub initial_position: Vec3,
    pub initial_target: Vec3,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.25,
            far: 100.0,
            initial_position: Vec3::new(-5.0, 3.0, 10.0),
            initial_target: Vec3::new(0.0, 2.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationParams {
    pub motion: MotionParams,
    pub follow: FollowParams,
    pub camera: CameraParams,
}

/// The loaded model: its rig, the mixer animating it and the clip handles.
pub struct Actor {
    pub rig: Rig,
    pub mixer: AnimationMixer,
    pub clips: ClipRegistry,
}

impl Actor {
    /// Creates one mixer action per recognised clip with the clip's loop mode.
    #[must_use]
    pub fn new(model: LoadedModel) -> Self {
        let LoadedModel { rig, clips: loaded } = model;
        let mut mixer = AnimationMixer::new();
        let mut clips = ClipRegistry::new();

        for (name, clip) in loaded {
            if clips.contains(name) {
                log::warn!("Duplicate '{name}' clip, keeping the first");
                continue;
            }
            let handle = mixer.clip_action(Arc::new(clip), &rig);
            if let Some(action) = mixer.action_mut(handle) {
                let (loop_mode, clamp) = name.playback();
                action.loop_mode = loop_mode;
                action.clamp_when_finished = clamp;
            }
            clips.insert(name, handle);
        }

        Self { rig, mixer, clips }
    }
}

enum ModelSlot {
    Empty,
    Loading(ModelLoad),
    Ready(Box<Actor>),
    Failed,
}

/// Motion, animation state, camera and model of the single actor.
pub struct Simulation {
    motion: MotionIntegrator,
    selector: AnimationSelector,
    follow: FollowParams,
    camera: Camera,
    model: ModelSlot,
}

impl Simulation {
    #[must_use]
    pub fn new(params: SimulationParams) -> Self {
        let cam = params.camera;
        let mut camera = Camera::new_perspective(cam.fov, 16.0 / 9.0, cam.near, cam.far);
        camera.place(cam.initial_position, cam.initial_target);

        Self {
            motion: MotionIntegrator::new(params.motion),
            selector: AnimationSelector::new(),
            follow: params.follow,
            camera,
            model: ModelSlot::Empty,
        }
    }

    /// Hands over a pending model load; `update` polls it every frame.
    pub fn begin_load(&mut self, load: ModelLoad) {
        self.model = ModelSlot::Loading(load);
    }

    /// Installs a loaded model and starts the Idle clip.
    pub fn attach_model(&mut self, model: LoadedModel) {
        let mut actor = Actor::new(model);
        self.selector.start(&actor.clips, &mut actor.mixer);

        let names: Vec<_> = actor.clips.iter().map(|(name, _)| name.as_str()).collect();
        log::info!("Model ready: {} joints, clips {names:?}", actor.rig.len());

        self.model = ModelSlot::Ready(Box::new(actor));
    }

    /// Keyboard entry point. Returns `true` if the key maps to a command.
    pub fn handle_key(&mut self, key: Key) -> bool {
        log::debug!("Key down: {key:?}");
        match Command::from_key(key) {
            Some(command) => {
                self.handle_command(command);
                true
            }
            None => false,
        }
    }

    /// Applies the command's impulse and, once the model is ready and the
    /// guard allows it, the matching animation transition.
    pub fn handle_command(&mut self, command: Command) {
        if let Some(transition) = self.selector.state().on_command(command) {
            self.transition(transition);
        }
        self.motion.apply_impulse(command);
    }

    /// Advances one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.poll_model();

        self.motion.decay();
        if self.selector.state() != AnimState::Idle && self.motion.is_settled() {
            if let Some(transition) = self.selector.state().on_settled() {
                self.transition(transition);
            }
            self.motion.settle();
        }

        // The pose stays at the origin until there is a model to move.
        if let ModelSlot::Ready(actor) = &mut self.model {
            self.motion.integrate(dt);

            let (eye, target) = follow_placement(&self.motion.pose, &self.follow);
            self.camera.place(eye, target);

            let Actor { rig, mixer, .. } = actor.as_mut();
            mixer.update(dt, rig);
        }
    }

    fn transition(&mut self, transition: Transition) {
        if let ModelSlot::Ready(actor) = &mut self.model {
            let Actor { mixer, clips, .. } = actor.as_mut();
            self.selector.apply(transition, clips, mixer);
        }
    }

    fn poll_model(&mut self) {
        let ModelSlot::Loading(load) = &self.model else {
            return;
        };
        match load.poll() {
            None => {}
            Some(Ok(model)) => self.attach_model(model),
            Some(Err(err)) => {
                log::error!("Failed to load model: {err}");
                self.model = ModelSlot::Failed;
            }
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    #[must_use]
    pub fn state(&self) -> AnimState {
        self.selector.state()
    }

    #[must_use]
    pub fn selector(&self) -> &AnimationSelector {
        &self.selector
    }

    #[must_use]
    pub fn velocity(&self) -> Velocity {
        self.motion.velocity
    }

    #[must_use]
    pub fn pose(&self) -> ActorPose {
        self.motion.pose
    }

    #[must_use]
    pub fn motion(&self) -> &MotionIntegrator {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut MotionIntegrator {
        &mut self.motion
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The actor, once its model has loaded. `None` means nothing to draw.
    #[must_use]
    pub fn actor(&self) -> Option<&Actor> {
        match &self.model {
            ModelSlot::Ready(actor) => Some(actor),
            ModelSlot::Empty | ModelSlot::Loading(_) | ModelSlot::Failed => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.model, ModelSlot::Ready(_))
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.model, ModelSlot::Loading(_))
    }

    #[must_use]
    pub fn load_failed(&self) -> bool {
        matches!(self.model, ModelSlot::Failed)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationParams::default())
    }
}
