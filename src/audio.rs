//! Browser audio playback
//!
//! Thin wrapper over `HtmlAudioElement`. Every play call is fire-and-forget:
//! failures (autoplay policy, missing file) are logged and swallowed, never
//! surfaced to the sim.

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::settings::Settings;

const JUMP_SOUND: &str = "audio/jump_sound.mp3";
const BACKGROUND_MUSIC: &str = "audio/background_music.ogg";

pub struct AudioManager {
    jump: Option<HtmlAudioElement>,
    music: Option<HtmlAudioElement>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let jump = match HtmlAudioElement::new_with_src(JUMP_SOUND) {
            Ok(audio) => {
                audio.set_volume(f64::from(settings.sfx_volume));
                Some(audio)
            }
            Err(err) => {
                log::warn!("jump sound unavailable: {err:?}");
                None
            }
        };

        let music = match HtmlAudioElement::new_with_src(BACKGROUND_MUSIC) {
            Ok(audio) => {
                audio.set_loop(true);
                audio.set_volume(f64::from(settings.music_volume));
                audio.set_muted(settings.music_muted);
                Some(audio)
            }
            Err(err) => {
                log::warn!("background music unavailable: {err:?}");
                None
            }
        };

        Self { jump, music }
    }

    /// Play the jump cue from the top
    pub fn play_jump(&self) {
        if let Some(audio) = &self.jump {
            audio.set_current_time(0.0);
            play_fire_and_forget(audio, "jump sound");
        }
    }

    /// Mute or unmute the background music, starting playback on unmute
    pub fn set_music_muted(&self, muted: bool) {
        if let Some(audio) = &self.music {
            audio.set_muted(muted);
            if !muted {
                play_fire_and_forget(audio, "background music");
            }
        }
    }
}

/// Kick off playback and log any rejection without blocking the frame
fn play_fire_and_forget(audio: &HtmlAudioElement, label: &'static str) {
    match audio.play() {
        Ok(promise) => {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    log::warn!("error playing {label}: {err:?}");
                }
            });
        }
        Err(err) => log::warn!("error playing {label}: {err:?}"),
    }
}
