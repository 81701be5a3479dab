use crate::error::{Error, Result};

pub const SPEED: &str = "speed";
pub const AMPLITUDE: &str = "amplitude";

/// A named, range-bounded scalar adjusted by a slider
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub label: String,
    value: f64,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Increment applied by a single slider key press
    pub step: f64,
}

impl Param {
    /// Build a param at its default value. The default is clamped into range.
    pub fn new(name: &str, label: &str, min: f64, max: f64, default: f64, step: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && default.is_finite()) || min > max {
            return Err(Error::Config(format!(
                "parameter '{}' needs finite bounds with min <= max (got [{}, {}])",
                name, min, max
            )));
        }
        let default = default.clamp(min, max);
        Ok(Self {
            name: name.to_string(),
            label: label.to_string(),
            value: default,
            min,
            max,
            default,
            step: if step.is_finite() && step > 0.0 { step } else { (max - min) / 100.0 },
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Position of the value within the range, 0.0 at min and 1.0 at max
    pub fn fraction(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            (self.value - self.min) / span
        }
    }

    fn set(&mut self, value: f64) -> Result<bool> {
        if !value.is_finite() {
            return Err(Error::OutOfRange {
                name: self.name.clone(),
                value,
                min: self.min,
                max: self.max,
            });
        }
        let clamped = value.clamp(self.min, self.max);
        let changed = clamped != self.value;
        self.value = clamped;
        Ok(changed)
    }

    fn reset(&mut self) -> bool {
        let changed = self.value != self.default;
        self.value = self.default;
        changed
    }
}

/// Parameter values read by the curve each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    pub speed: f64,
    pub amplitude: f64,
}

/// Registered parameters in slider order
#[derive(Debug, Clone, Default)]
pub struct ParamStore {
    params: Vec<Param>,
}

impl ParamStore {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Register a parameter. A param with the same name is replaced in place.
    pub fn register(&mut self, param: Param) {
        if let Some(existing) = self.params.iter_mut().find(|p| p.name == param.name) {
            *existing = param;
        } else {
            self.params.push(param);
        }
    }

    pub fn param(&self, name: &str) -> Result<&Param> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))
    }

    fn param_mut(&mut self, name: &str) -> Result<&mut Param> {
        self.params
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Result<f64> {
        self.param(name).map(Param::value)
    }

    /// Store a value, clamped into the param's range. Returns true if it changed.
    pub fn set(&mut self, name: &str, value: f64) -> Result<bool> {
        self.param_mut(name)?.set(value)
    }

    /// Move a param by a number of slider steps
    pub fn nudge(&mut self, name: &str, steps: i32) -> Result<bool> {
        let param = self.param_mut(name)?;
        let target = param.value + param.step * steps as f64;
        param.set(target)
    }

    /// Put every param back to its default. Returns true if any value changed.
    pub fn reset_all(&mut self) -> bool {
        self.params
            .iter_mut()
            .fold(false, |changed, p| p.reset() || changed)
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn snapshot(&self) -> Result<CurveParams> {
        Ok(CurveParams {
            speed: self.get(SPEED)?,
            amplitude: self.get(AMPLITUDE)?,
        })
    }
}
