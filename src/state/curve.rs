use crate::error::{Error, Result};

use super::param::CurveParams;

/// `count` evenly spaced values from `start` to `end`, both ends included
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Fixed x positions the curve is sampled at
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    xs: Vec<f64>,
}

impl SampleGrid {
    pub fn new(xs: Vec<f64>) -> Result<Self> {
        if xs.is_empty() {
            return Err(Error::EmptySequence("sample grid"));
        }
        Ok(Self { xs })
    }

    pub fn evenly_spaced(start: f64, end: f64, points: usize) -> Result<Self> {
        Self::new(linspace(start, end, points))
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.xs.len()
    }
}

/// One tick's y values, parallel to the grid
pub type CurveFrame = Vec<f64>;

/// y = base_offset + amplitude * sin(x + speed * t)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveModel {
    pub base_offset: f64,
}

impl Default for CurveModel {
    fn default() -> Self {
        Self { base_offset: 5.0 }
    }
}

impl CurveModel {
    pub fn new(base_offset: f64) -> Self {
        Self { base_offset }
    }

    pub fn evaluate(&self, grid: &SampleGrid, time: f64, params: CurveParams) -> CurveFrame {
        let phase = params.speed * time;
        grid.xs()
            .iter()
            .map(|&x| self.base_offset + params.amplitude * (x + phase).sin())
            .collect()
    }
}
