//! Background music state. The device is only told what to do; whether
//! playback really started comes back later through `playback_settled`,
//! because browsers may reject `play()` under autoplay policy.

use crate::config::MusicConfig;
use crate::readiness::{PlaybackConfirm, ReadinessState};
use std::cell::RefCell;
use std::fmt;

/// `play()` was refused (autoplay policy, missing media, ...). Expected, not fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackError {
    pub reason: String,
}

impl PlaybackError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playback rejected: {}", self.reason)
    }
}

pub trait AudioDevice {
    /// Begin playback; the outcome is reported through
    /// [`MusicPlayer::playback_settled`].
    fn start_playback(&mut self);
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn set_muted(&mut self, muted: bool);
}

pub struct MusicPlayer<D: AudioDevice> {
    device: D,
    playing: bool,
    muted: bool,
    volume: f32,
    pending: bool,
    requested_seen: bool,
}

impl<D: AudioDevice> MusicPlayer<D> {
    pub fn new(mut device: D, config: &MusicConfig) -> Self {
        let volume = config.volume.clamp(0.0, 1.0);
        device.set_volume(volume);
        Self {
            device,
            playing: false,
            muted: false,
            volume,
            pending: false,
            requested_seen: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Readiness observer hook. The first time music is requested, playback
    /// starts synchronously so it stays inside the user gesture.
    pub fn on_readiness(&mut self, state: &ReadinessState) {
        if state.music_requested && !self.requested_seen {
            self.requested_seen = true;
            self.request_play();
        }
    }

    /// Record the outcome of `start_playback`. Returns `true` when audio is
    /// now playing; see [`settle_playback`] for publishing that to readiness.
    pub fn playback_settled(&mut self, result: Result<(), PlaybackError>) -> bool {
        self.pending = false;
        match result {
            Ok(()) => {
                log::info!("[music] playback started");
                self.playing = true;
                true
            }
            Err(e) => {
                log::info!("[music] {}; waiting for the next gesture", e);
                false
            }
        }
    }

    /// Play/pause button. Starting again doubles as the retry after a
    /// rejected autoplay.
    pub fn toggle_play(&mut self) {
        if self.playing {
            self.device.pause();
            self.playing = false;
        } else {
            self.request_play();
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.device.set_muted(self.muted);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.device.set_volume(self.volume);
    }

    fn request_play(&mut self) {
        if self.pending {
            return;
        }
        self.pending = true;
        self.device.start_playback();
    }
}

/// Audio confirmation callback: settle the player, then publish
/// `music_started` once the player borrow is released (readiness observers
/// may call back into the player).
pub fn settle_playback<D: AudioDevice>(
    player: &RefCell<MusicPlayer<D>>,
    confirm: &PlaybackConfirm,
    result: Result<(), PlaybackError>,
) {
    let started = player.borrow_mut().playback_settled(result);
    if started {
        confirm.set_music_started(true);
    }
}
