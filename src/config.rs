use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::playback::TimeSequence;
use crate::state::curve::{CurveModel, SampleGrid};
use crate::state::param::{Param, ParamStore, AMPLITUDE, SPEED};
use crate::ui::surface::Axes;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    animation: AnimationConfig,
    #[serde(default)]
    grid: GridConfig,
    #[serde(default)]
    curve: CurveConfig,
    #[serde(default)]
    axes: AxesConfig,
    #[serde(default)]
    params: ParamsConfig,
}

#[derive(Deserialize, Default)]
struct AnimationConfig {
    frames: Option<usize>,
    t_end: Option<f64>,
    #[serde(rename = "loop")]
    looping: Option<bool>,
}

#[derive(Deserialize, Default)]
struct GridConfig {
    points: Option<usize>,
    x_min: Option<f64>,
    x_max: Option<f64>,
}

#[derive(Deserialize, Default)]
struct CurveConfig {
    base_offset: Option<f64>,
}

#[derive(Deserialize, Default)]
struct AxesConfig {
    y_min: Option<f64>,
    y_max: Option<f64>,
}

#[derive(Deserialize, Default)]
struct ParamsConfig {
    #[serde(default)]
    speed: ParamConfig,
    #[serde(default)]
    amplitude: ParamConfig,
}

#[derive(Deserialize, Default)]
struct ParamConfig {
    label: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    default: Option<f64>,
    step: Option<f64>,
}

/// Embedded defaults merged with the optional user config file
pub struct Config {
    file: ConfigFile,
}

impl Config {
    /// Load the embedded config, then apply `~/.config/tuiplot/config.toml` if present
    pub fn load() -> Result<Self> {
        Self::load_from(user_config_path().as_deref())
    }

    /// Load the embedded config, then apply the user file at `path` if it exists.
    /// A user file that cannot be read or parsed is logged and ignored.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut base: ConfigFile = toml::from_str(DEFAULT_CONFIG)
            .map_err(|e| Error::Config(format!("embedded config.toml: {}", e)))?;

        if let Some(path) = path.filter(|p| p.exists()) {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                    Ok(user) => {
                        log::info!("Loaded user config from {}", path.display());
                        merge(&mut base, user);
                    }
                    Err(e) => log::warn!("Ignoring malformed config {}: {}", path.display(), e),
                },
                Err(e) => log::warn!("Could not read config {}: {}", path.display(), e),
            }
        }

        Ok(Config { file: base })
    }

    pub fn looping(&self) -> bool {
        self.file.animation.looping.unwrap_or(true)
    }

    fn frames(&self) -> usize {
        self.file.animation.frames.unwrap_or(1000)
    }

    fn t_end(&self) -> f64 {
        self.file.animation.t_end.unwrap_or(10.0)
    }

    pub fn time_sequence(&self) -> Result<TimeSequence> {
        TimeSequence::evenly_spaced(0.0, self.t_end(), self.frames())
    }

    /// Wall-clock time between frames, so one pass of the sequence takes `t_end` seconds
    pub fn interval(&self) -> Result<Duration> {
        let frames = self.frames();
        if frames == 0 {
            return Err(Error::EmptySequence("time sequence"));
        }
        Duration::try_from_secs_f64(self.t_end() / frames as f64)
            .map_err(|e| Error::Config(format!("invalid animation timing: {}", e)))
    }

    pub fn sample_grid(&self) -> Result<SampleGrid> {
        let grid = &self.file.grid;
        SampleGrid::evenly_spaced(
            grid.x_min.unwrap_or(0.0),
            grid.x_max.unwrap_or(10.0),
            grid.points.unwrap_or(100),
        )
    }

    pub fn curve_model(&self) -> CurveModel {
        self.file
            .curve
            .base_offset
            .map(CurveModel::new)
            .unwrap_or_default()
    }

    pub fn axes(&self) -> Axes {
        let fallback = Axes::default();
        let grid = &self.file.grid;
        let axes = &self.file.axes;
        Axes {
            x_bounds: [
                grid.x_min.unwrap_or(fallback.x_bounds[0]),
                grid.x_max.unwrap_or(fallback.x_bounds[1]),
            ],
            y_bounds: [
                axes.y_min.unwrap_or(fallback.y_bounds[0]),
                axes.y_max.unwrap_or(fallback.y_bounds[1]),
            ],
            ..fallback
        }
    }

    /// Speed and amplitude params, in slider order
    pub fn param_store(&self) -> Result<ParamStore> {
        let mut store = ParamStore::new();
        store.register(build_param(SPEED, "Speed", &self.file.params.speed, (0.0, 10.0, 3.0, 0.1))?);
        store.register(build_param(
            AMPLITUDE,
            "Amplitude",
            &self.file.params.amplitude,
            (0.0, 5.0, 5.0, 0.05),
        )?);
        Ok(store)
    }
}

fn build_param(
    name: &str,
    label: &str,
    cfg: &ParamConfig,
    (min, max, default, step): (f64, f64, f64, f64),
) -> Result<Param> {
    Param::new(
        name,
        cfg.label.as_deref().unwrap_or(label),
        cfg.min.unwrap_or(min),
        cfg.max.unwrap_or(max),
        cfg.default.unwrap_or(default),
        cfg.step.unwrap_or(step),
    )
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tuiplot").join("config.toml"))
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    merge_opt(&mut base.animation.frames, user.animation.frames);
    merge_opt(&mut base.animation.t_end, user.animation.t_end);
    merge_opt(&mut base.animation.looping, user.animation.looping);
    merge_opt(&mut base.grid.points, user.grid.points);
    merge_opt(&mut base.grid.x_min, user.grid.x_min);
    merge_opt(&mut base.grid.x_max, user.grid.x_max);
    merge_opt(&mut base.curve.base_offset, user.curve.base_offset);
    merge_opt(&mut base.axes.y_min, user.axes.y_min);
    merge_opt(&mut base.axes.y_max, user.axes.y_max);
    merge_param(&mut base.params.speed, user.params.speed);
    merge_param(&mut base.params.amplitude, user.params.amplitude);
}

fn merge_param(base: &mut ParamConfig, user: ParamConfig) {
    merge_opt(&mut base.label, user.label);
    merge_opt(&mut base.min, user.min);
    merge_opt(&mut base.max, user.max);
    merge_opt(&mut base.default, user.default);
    merge_opt(&mut base.step, user.step);
}

fn merge_opt<T>(base: &mut Option<T>, user: Option<T>) {
    if user.is_some() {
        *base = user;
    }
}
