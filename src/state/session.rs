use std::time::Instant;

use crate::error::Result;
use crate::playback::FrameScheduler;
use crate::ui::surface::RenderSurface;

use super::curve::{CurveModel, SampleGrid};
use super::param::ParamStore;

pub const INITIAL_TITLE: &str = "Interactive Graph";

pub fn frame_title(time: f64) -> String {
    format!("Interactive graph at time={:3.2}", time)
}

/// All interactive state for one run: parameters, curve, playback and display
pub struct Session<S: RenderSurface> {
    pub params: ParamStore,
    pub scheduler: FrameScheduler,
    grid: SampleGrid,
    model: CurveModel,
    surface: S,
}

impl<S: RenderSurface> Session<S> {
    pub fn new(
        params: ParamStore,
        grid: SampleGrid,
        model: CurveModel,
        scheduler: FrameScheduler,
        surface: S,
    ) -> Self {
        Self {
            params,
            scheduler,
            grid,
            model,
            surface,
        }
    }

    #[cfg(test)]
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Recompute the curve for `time` and push it to the surface
    pub fn on_tick(&mut self, time: f64) -> Result<()> {
        update_step(&self.params, &self.grid, &self.model, &mut self.surface, time)
    }

    /// Redraw at the current playback time, e.g. after a slider moved while paused
    pub fn refresh(&mut self) -> Result<()> {
        let time = self.scheduler.current_time();
        self.on_tick(time)
    }

    /// Deliver the due scheduler tick, if any
    pub fn advance(&mut self, now: Instant) -> Result<usize> {
        let Self {
            params,
            scheduler,
            grid,
            model,
            surface,
        } = self;
        scheduler.poll(now, |time| update_step(params, grid, model, surface, time))
    }
}

fn update_step<S: RenderSurface>(
    params: &ParamStore,
    grid: &SampleGrid,
    model: &CurveModel,
    surface: &mut S,
    time: f64,
) -> Result<()> {
    let frame = model.evaluate(grid, time, params.snapshot()?);
    surface.set_curve_ydata(&frame)?;
    surface.set_title(&frame_title(time))
}
