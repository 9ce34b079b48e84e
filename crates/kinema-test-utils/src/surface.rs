use std::sync::Arc;

use kinema_engine::{MediaSurface, SurfaceError, SurfaceResult};
use kinema_platform::{Mutex, MutexGuard};
use url::Url;

#[derive(Debug)]
pub struct SurfaceState {
    pub src: Option<Url>,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub buffered_end: Option<f64>,
    pub paused: bool,
    pub rate: f64,
    pub volume: f64,
    /// Reject `play()` as a browser does without a user gesture.
    pub block_play: bool,
    pub seeks: Vec<f64>,
    pub play_calls: usize,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            src: None,
            current_time: 0.0,
            duration: None,
            buffered_end: None,
            paused: true,
            rate: 1.0,
            volume: 1.0,
            block_play: false,
            seeks: Vec::new(),
            play_calls: 0,
        }
    }
}

/// In-memory media element.
#[derive(Clone, Debug, Default)]
pub struct FakeSurface(Arc<Mutex<SurfaceState>>);

impl FakeSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, SurfaceState> {
        self.0.lock()
    }

    pub fn set_duration(&self, duration: f64) {
        self.0.lock().duration = Some(duration);
    }

    /// Move the playhead as playback would.
    pub fn advance(&self, secs: f64) {
        let mut state = self.0.lock();
        state.current_time += secs;
        state.buffered_end = Some(state.current_time + 10.0);
    }
}

impl MediaSurface for FakeSurface {
    fn set_src(&mut self, url: &Url) {
        let mut state = self.0.lock();
        state.src = Some(url.clone());
        state.current_time = 0.0;
    }

    fn clear_src(&mut self) {
        let mut state = self.0.lock();
        state.src = None;
        state.current_time = 0.0;
    }

    fn play(&mut self) -> SurfaceResult<()> {
        let mut state = self.0.lock();
        state.play_calls += 1;
        if state.block_play {
            return Err(SurfaceError::AutoplayBlocked("NotAllowedError".into()));
        }
        state.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.lock().paused = true;
    }

    fn is_paused(&self) -> bool {
        self.0.lock().paused
    }

    fn seek(&mut self, position: f64) {
        let mut state = self.0.lock();
        state.current_time = position;
        state.seeks.push(position);
    }

    fn current_time(&self) -> f64 {
        self.0.lock().current_time
    }

    fn duration(&self) -> Option<f64> {
        self.0.lock().duration
    }

    fn buffered_end(&self) -> Option<f64> {
        self.0.lock().buffered_end
    }

    fn set_rate(&mut self, rate: f64) {
        self.0.lock().rate = rate;
    }

    fn set_volume(&mut self, volume: f64) {
        self.0.lock().volume = volume;
    }
}
