//! In-memory overlay surface for headless runs and tests.
//!
//! Keeps every attached view with its placement and translation, and can
//! compose the whole layer into one frame.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use banner_render::compose;
use image::RgbaImage;

use super::surface::{BannerId, LayoutParams, OverlaySurface, ScreenMetrics, SurfaceError};

#[derive(Debug, Clone)]
struct HeadlessView {
    params: LayoutParams,
    bitmap: RgbaImage,
    translation_x: f32,
}

#[derive(Debug)]
struct HeadlessState {
    screen: ScreenMetrics,
    views: BTreeMap<BannerId, HeadlessView>,
    torn_down: bool,
    attached_total: u64,
    detached_total: u64,
}

/// Cloneable handle; clones share the same layer.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    inner: Arc<Mutex<HeadlessState>>,
}

impl HeadlessSurface {
    pub fn new(screen: ScreenMetrics) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HeadlessState {
                screen,
                views: BTreeMap::new(),
                torn_down: false,
                attached_total: 0,
                detached_total: 0,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, HeadlessState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulate the host destroying the overlay layer.
    pub fn tear_down(&self) {
        let mut state = self.state();
        state.torn_down = true;
        state.views.clear();
    }

    pub fn restore(&self) {
        self.state().torn_down = false;
    }

    pub fn set_screen(&self, screen: ScreenMetrics) {
        self.state().screen = screen;
    }

    pub fn attached_count(&self) -> usize {
        self.state().views.len()
    }

    pub fn attached_ids(&self) -> Vec<BannerId> {
        self.state().views.keys().copied().collect()
    }

    /// Placement and current translation of an attached view.
    pub fn view(&self, id: BannerId) -> Option<(LayoutParams, f32)> {
        self.state()
            .views
            .get(&id)
            .map(|v| (v.params, v.translation_x))
    }

    /// Total views ever attached and detached.
    pub fn totals(&self) -> (u64, u64) {
        let state = self.state();
        (state.attached_total, state.detached_total)
    }

    /// Compose every attached view at its current position.
    pub fn snapshot(&self) -> RgbaImage {
        let state = self.state();
        let mut frame = RgbaImage::new(state.screen.width, state.screen.height);
        for view in state.views.values() {
            let x = view.params.left(state.screen.width) + view.translation_x.round() as i64;
            compose::overlay(&mut frame, &view.bitmap, x, view.params.y as i64);
        }
        frame
    }
}

impl OverlaySurface for HeadlessSurface {
    fn add_view(
        &mut self,
        id: BannerId,
        params: &LayoutParams,
        bitmap: &RgbaImage,
    ) -> Result<(), SurfaceError> {
        let mut state = self.state();
        if state.torn_down {
            return Err(SurfaceError::HostGone);
        }
        if state.views.contains_key(&id) {
            return Err(SurfaceError::AlreadyAttached(id));
        }
        state.views.insert(
            id,
            HeadlessView {
                params: *params,
                bitmap: bitmap.clone(),
                translation_x: 0.0,
            },
        );
        state.attached_total += 1;
        Ok(())
    }

    fn set_translation_x(&mut self, id: BannerId, x: f32) -> Result<(), SurfaceError> {
        let mut state = self.state();
        if state.torn_down {
            return Err(SurfaceError::HostGone);
        }
        let view = state
            .views
            .get_mut(&id)
            .ok_or(SurfaceError::NotAttached(id))?;
        view.translation_x = x;
        Ok(())
    }

    fn remove_view(&mut self, id: BannerId) -> Result<(), SurfaceError> {
        let mut state = self.state();
        if state.torn_down {
            return Err(SurfaceError::HostGone);
        }
        state
            .views
            .remove(&id)
            .ok_or(SurfaceError::NotAttached(id))?;
        state.detached_total += 1;
        Ok(())
    }

    fn screen_metrics(&self) -> ScreenMetrics {
        self.state().screen
    }
}
