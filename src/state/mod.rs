pub mod curve;
pub mod param;
pub mod session;

pub use param::Param;
pub use session::Session;

use crate::config::Config;
use crate::error::Result;
use crate::playback::FrameScheduler;
use crate::ui::PlotSurface;

/// The session the terminal app runs: curve drawn into the in-memory plot surface
pub type AppState = Session<PlotSurface>;

impl Session<PlotSurface> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let params = config.param_store()?;
        let grid = config.sample_grid()?;
        let scheduler = FrameScheduler::new(config.time_sequence()?, config.interval()?)
            .with_looping(config.looping());
        let surface = PlotSurface::new(session::INITIAL_TITLE, config.axes(), grid.xs());
        Ok(Session::new(params, grid, config.curve_model(), scheduler, surface))
    }
}
