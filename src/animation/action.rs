use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::animation::{
    binding::PropertyBinding,
    clip::{AnimationClip, TrackData},
    tracks::KeyframeCursor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Loop,
}

/// Linear ramp of the fade level from `from` to `to`.
#[derive(Debug, Clone, Copy)]
struct Fade {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Fade {
    fn level(&self) -> f32 {
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Playback state of one clip inside an [`AnimationMixer`](crate::animation::AnimationMixer).
///
/// The chainable methods (`reset`, `set_effective_time_scale`,
/// `set_effective_weight`, `fade_in`, `fade_out`, `play`) all return
/// `&mut Self`, so a crossfade reads as one expression:
///
/// ```rust,ignore
/// action.reset().set_effective_time_scale(1.0).set_effective_weight(1.0).fade_in(0.5).play();
/// ```
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    /// For `LoopMode::Once`: hold the final pose instead of disabling at the end.
    pub clamp_when_finished: bool,
    pub paused: bool,
    pub enabled: bool,

    pub bindings: Vec<PropertyBinding>,

    pub(crate) track_cursors: Vec<KeyframeCursor>,

    playing: bool,
    fade_level: f32,
    fade: Option<Fade>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let track_count = clip.tracks.len();
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            clamp_when_finished: false,
            paused: false,
            enabled: true,
            bindings: Vec::new(),
            track_cursors: vec![KeyframeCursor::default(); track_count],
            playing: false,
            fade_level: 1.0,
            fade: None,
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Schedules the action in its mixer.
    pub fn play(&mut self) -> &mut Self {
        self.playing = true;
        self
    }

    /// Unschedules the action and rewinds it.
    pub fn stop(&mut self) -> &mut Self {
        self.playing = false;
        self.reset()
    }

    /// Rewinds to time 0, re-enables, unpauses and cancels any fade in progress.
    pub fn reset(&mut self) -> &mut Self {
        self.time = 0.0;
        self.paused = false;
        self.enabled = true;
        self.fade = None;
        self.fade_level = 1.0;
        for cursor in &mut self.track_cursors {
            cursor.last_index = 0;
        }
        self
    }

    pub fn set_effective_time_scale(&mut self, time_scale: f32) -> &mut Self {
        self.time_scale = time_scale;
        self
    }

    /// Sets the base weight and cancels any fade in progress.
    pub fn set_effective_weight(&mut self, weight: f32) -> &mut Self {
        self.weight = weight;
        self.fade = None;
        self.fade_level = 1.0;
        self
    }

    /// Ramps the fade level from 0 to 1 over `duration` seconds.
    pub fn fade_in(&mut self, duration: f32) -> &mut Self {
        self.schedule_fade(0.0, 1.0, duration)
    }

    /// Ramps the fade level from its current value to 0 over `duration`
    /// seconds, then disables the action.
    pub fn fade_out(&mut self, duration: f32) -> &mut Self {
        let from = self.current_fade_level();
        self.schedule_fade(from, 0.0, duration)
    }

    fn schedule_fade(&mut self, from: f32, to: f32, duration: f32) -> &mut Self {
        if duration > 0.0 {
            self.fade = Some(Fade {
                from,
                to,
                elapsed: 0.0,
                duration,
            });
            self.fade_level = from;
        } else {
            self.finish_fade(to);
        }
        self
    }

    fn finish_fade(&mut self, level: f32) {
        self.fade = None;
        self.fade_level = level;
        if level <= 0.0 {
            self.enabled = false;
        }
    }

    fn current_fade_level(&self) -> f32 {
        self.fade.as_ref().map_or(self.fade_level, Fade::level)
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Scheduled, enabled, not paused.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.playing && self.enabled && !self.paused
    }

    /// The weight this action contributes to the blend right now.
    #[must_use]
    pub fn effective_weight(&self) -> f32 {
        if self.playing && self.enabled {
            self.weight * self.current_fade_level()
        } else {
            0.0
        }
    }

    /// Advances the fade envelope and the playback time.
    pub fn update(&mut self, dt: f32) {
        if !self.playing || !self.enabled {
            return;
        }

        if let Some(fade) = &mut self.fade {
            fade.elapsed += dt;
            if fade.finished() {
                let to = fade.to;
                self.finish_fade(to);
                if !self.enabled {
                    return;
                }
            }
        }

        if self.paused {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                let finished = if self.time >= duration {
                    self.time = duration;
                    true
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    true
                } else {
                    false
                };

                if finished {
                    if self.clamp_when_finished {
                        self.paused = true;
                    } else {
                        self.enabled = false;
                    }
                }
            }
            LoopMode::Loop => {
                self.time = self.time.rem_euclid(duration);
            }
        }
    }

    /// Samples the track at `track_index` at the current time.
    pub fn sample_track(&mut self, track_index: usize) -> Option<TrackValue> {
        let track = self.clip.tracks.get(track_index)?;
        let cursor = self.track_cursors.get_mut(track_index)?;

        match &track.data {
            TrackData::Vector3(t) => t.sample_with_cursor(self.time, cursor).map(TrackValue::Vector3),
            TrackData::Quaternion(t) => {
                t.sample_with_cursor(self.time, cursor).map(TrackValue::Quaternion)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vector3(Vec3),
    Quaternion(Quat),
}
