/// A single-shot delayed action driven by frame time.
///
/// Scheduling while a run is pending replaces it, so at most one is ever
/// outstanding.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeferredTask {
    remaining: Option<f32>,
}

impl DeferredTask {
    pub fn schedule(&mut self, delay: f32) {
        self.remaining = Some(delay);
    }

    /// Advances the clock. Returns true on the tick the task fires.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining.as_mut() else {
            return false;
        };
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.remaining = None;
            true
        } else {
            false
        }
    }
}

/// Auto-hide state of the on-screen controls.
#[derive(Debug)]
pub struct ControlVisibility {
    visible: bool,
    hide_after: f32,
    hide_task: DeferredTask,
}

impl ControlVisibility {
    /// Starts visible with the hide countdown already running.
    pub fn new(hide_after: f32) -> Self {
        let mut hide_task = DeferredTask::default();
        hide_task.schedule(hide_after);
        Self { visible: true, hide_after, hide_task }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Pointer movement or touch start.
    pub fn on_activity(&mut self) {
        if !self.visible {
            log::trace!("controls shown");
        }
        self.visible = true;
        self.hide_task.schedule(self.hide_after);
    }

    pub fn update(&mut self, dt: f32) {
        if self.hide_task.tick(dt) {
            log::trace!("controls hidden after {:.1}s idle", self.hide_after);
            self.visible = false;
        }
    }
}
