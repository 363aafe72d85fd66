//! Looping playback of an asset's first animation clip

use vantage_assets::AnimationClip;

/// Plays one clip on a loop
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    clip: AnimationClip,
    time: f32,
}

impl AnimationPlayer {
    /// Player for the first clip, if the asset has any
    pub fn for_clips(clips: &[AnimationClip]) -> Option<Self> {
        clips.first().map(|clip| Self {
            clip: clip.clone(),
            time: 0.0,
        })
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    /// Playback position in seconds, within `[0, duration)`
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn update(&mut self, delta: f32) {
        self.time += delta;
        if self.clip.duration > 0.0 {
            self.time %= self.clip.duration;
        } else {
            self.time = 0.0;
        }
    }
}
