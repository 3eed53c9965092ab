//! Banner lifecycle: measure, place, attach, move, detach.
//!
//! `OverlayManager` is single-owner state. It is driven by the UI loop in
//! [`super::ui`], which also owns the animation timers; this type only
//! records what is attached where.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use banner_render::{BannerContent, BannerSurface, Typeface};
use chrono::{DateTime, Utc};

use super::animation::Translation;
use super::lane::{LaneAllocator, LaneGeometry, LaneId};
use super::surface::{BannerId, Gravity, LayoutParams, OverlaySurface, SurfaceError, WindowFlags};

/// Tunables for placement and queuing.
#[derive(Debug, Clone)]
pub struct OverlaySettings {
    pub lane_count: usize,
    pub lane_top_margin: u32,
    pub animation_duration: Duration,
    pub pending_capacity: usize,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            lane_count: 4,
            lane_top_margin: 20,
            animation_duration: Duration::from_millis(5000),
            pending_capacity: 8,
        }
    }
}

impl From<&crate::config::OverlayConfig> for OverlaySettings {
    fn from(config: &crate::config::OverlayConfig) -> Self {
        Self {
            lane_count: config.lane_count,
            lane_top_margin: config.lane_top_margin,
            animation_duration: config.animation_duration,
            pending_capacity: config.pending_capacity,
        }
    }
}

/// What the UI loop needs to animate a freshly attached banner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerHandle {
    pub id: BannerId,
    pub lane: LaneId,
    pub width: u32,
    pub translation: Translation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresentOutcome {
    Shown(BannerHandle),
    /// Waiting for a lane; `position` is 0 for the next in line.
    Queued { position: usize },
    /// Attach failed; nothing is held for this banner.
    Failed,
}

#[derive(Debug)]
struct ActiveBanner {
    surface: BannerSurface,
    lane: LaneId,
    started_at: DateTime<Utc>,
}

/// Counters reported to callers and logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayStats {
    pub active: usize,
    pub pending: usize,
    pub occupied_lanes: usize,
    pub dropped: u64,
}

pub struct OverlayManager<S: OverlaySurface> {
    surface: S,
    typeface: Arc<Typeface>,
    settings: OverlaySettings,
    lanes: LaneAllocator,
    active: HashMap<BannerId, ActiveBanner>,
    pending: VecDeque<BannerContent>,
    next_id: u64,
    dropped: u64,
}

impl<S: OverlaySurface> OverlayManager<S> {
    pub fn new(surface: S, typeface: Arc<Typeface>, settings: OverlaySettings) -> Self {
        let lanes = LaneAllocator::new(settings.lane_count.max(1));
        Self {
            surface,
            typeface,
            settings,
            lanes,
            active: HashMap::new(),
            pending: VecDeque::new(),
            next_id: 0,
            dropped: 0,
        }
    }

    /// Show a banner now, or queue it if every lane is taken.
    pub fn present(&mut self, content: BannerContent) -> PresentOutcome {
        let Some(lane) = self.lanes.acquire() else {
            return self.enqueue(content);
        };
        match self.attach(content, lane) {
            Ok(handle) => PresentOutcome::Shown(handle),
            Err(_) => PresentOutcome::Failed,
        }
    }

    fn enqueue(&mut self, content: BannerContent) -> PresentOutcome {
        if self.settings.pending_capacity == 0 {
            self.dropped += 1;
            tracing::info!(title = %content.title, "All lanes busy, banner dropped");
            return PresentOutcome::Failed;
        }
        if self.pending.len() >= self.settings.pending_capacity {
            if let Some(oldest) = self.pending.pop_front() {
                self.dropped += 1;
                tracing::info!(title = %oldest.title, "Pending queue full, oldest banner dropped");
            }
        }
        self.pending.push_back(content);
        let position = self.pending.len() - 1;
        tracing::debug!(position, "All lanes busy, banner queued");
        PresentOutcome::Queued { position }
    }

    /// Render and attach on `lane`. On failure the lane is released and the
    /// content handed back with the error.
    fn attach(
        &mut self,
        content: BannerContent,
        lane: LaneId,
    ) -> Result<BannerHandle, (SurfaceError, BannerContent)> {
        let screen = self.surface.screen_metrics();
        let geometry = LaneGeometry::new(
            screen.height,
            self.lanes.capacity(),
            self.settings.lane_top_margin,
        );
        let surface = BannerSurface::new(&self.typeface, content);
        let params = LayoutParams {
            x: 0,
            y: geometry.offset(lane) as i32,
            width: surface.width(),
            height: surface.height(),
            gravity: Gravity::TopEnd,
            flags: WindowFlags::BANNER,
        };

        self.next_id += 1;
        let id = BannerId(self.next_id);

        if let Err(e) = self.surface.add_view(id, &params, surface.bitmap()) {
            tracing::warn!(banner = %id, lane = lane.index(), "Failed to attach banner: {e}");
            self.lanes.release(lane);
            return Err((e, surface.into_content()));
        }

        let handle = BannerHandle {
            id,
            lane,
            width: surface.width(),
            translation: Translation::sweep(screen.width, self.settings.animation_duration),
        };
        let started_at = Utc::now();
        tracing::debug!(
            banner = %id,
            lane = lane.index(),
            width = handle.width,
            started_at = %started_at.format("%H:%M:%S%.3f"),
            "Banner attached"
        );
        self.active.insert(
            id,
            ActiveBanner {
                surface,
                lane,
                started_at,
            },
        );
        Ok(handle)
    }

    /// Move an attached banner. Unknown ids are ignored.
    pub fn set_translation(&mut self, id: BannerId, x: f32) {
        let Some(banner) = self.active.get_mut(&id) else {
            return;
        };
        banner.surface.set_translation_x(x);
        if let Err(e) = self.surface.set_translation_x(id, x) {
            tracing::debug!(banner = %id, "Frame update failed: {e}");
        }
    }

    /// Finish a banner: detach, free its lane, then fill free lanes from the
    /// queue. Returns the banners that were attached as a result.
    pub fn complete(&mut self, id: BannerId) -> Vec<BannerHandle> {
        let Some(banner) = self.active.remove(&id) else {
            tracing::debug!(banner = %id, "Completion for unknown banner ignored");
            return Vec::new();
        };
        self.detach(id, &banner);
        self.promote_pending()
    }

    fn detach(&mut self, id: BannerId, banner: &ActiveBanner) {
        if let Err(e) = self.surface.remove_view(id) {
            tracing::warn!(banner = %id, "Failed to detach banner: {e}");
        }
        self.lanes.release(banner.lane);
        let lived = Utc::now() - banner.started_at;
        tracing::debug!(
            banner = %id,
            lane = banner.lane.index(),
            lived_ms = lived.num_milliseconds(),
            "Banner detached"
        );
    }

    fn promote_pending(&mut self) -> Vec<BannerHandle> {
        let mut shown = Vec::new();
        while !self.pending.is_empty() {
            let Some(lane) = self.lanes.acquire() else {
                break;
            };
            let Some(content) = self.pending.pop_front() else {
                self.lanes.release(lane);
                break;
            };
            match self.attach(content, lane) {
                Ok(handle) => shown.push(handle),
                Err((SurfaceError::HostGone, content)) => {
                    // Keep the queue intact until the host is back.
                    self.pending.push_front(content);
                    tracing::warn!(
                        pending = self.pending.len(),
                        "Overlay host gone, pending banners kept"
                    );
                    break;
                }
                Err((e, content)) => {
                    self.dropped += 1;
                    tracing::warn!(title = %content.title, "Pending banner dropped: {e}");
                }
            }
        }
        shown
    }

    /// Detach everything, free every lane and drop the queue.
    pub fn cancel_all(&mut self) -> usize {
        let ids: Vec<BannerId> = self.active.keys().copied().collect();
        for id in &ids {
            if let Some(banner) = self.active.remove(id) {
                self.detach(*id, &banner);
            }
        }
        self.lanes.release_all();
        let pending = self.pending.len();
        self.pending.clear();
        if !ids.is_empty() || pending > 0 {
            tracing::info!(detached = ids.len(), pending, "Cancelled all banners");
        }
        ids.len()
    }

    pub fn stats(&self) -> OverlayStats {
        OverlayStats {
            active: self.active.len(),
            pending: self.pending.len(),
            occupied_lanes: self.lanes.occupied_count(),
            dropped: self.dropped,
        }
    }

    pub fn lane_of(&self, id: BannerId) -> Option<LaneId> {
        self.active.get(&id).map(|b| b.lane)
    }

    pub fn translation_of(&self, id: BannerId) -> Option<f32> {
        self.active.get(&id).map(|b| b.surface.translation_x())
    }

    pub fn active_ids(&self) -> Vec<BannerId> {
        let mut ids: Vec<_> = self.active.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
