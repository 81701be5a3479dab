use crate::error::{Error, Result};

/// Display layer the update step pushes each frame into
pub trait RenderSurface {
    /// Replace the y-data of the plotted line. Must match the x-data length.
    fn set_curve_ydata(&mut self, ys: &[f64]) -> Result<()>;

    /// Replace the plot title
    fn set_title(&mut self, title: &str) -> Result<()>;
}

/// Axis limits and labels for the plot
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: String,
    pub y_label: String,
    pub grid: bool,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            x_bounds: [0.0, 10.0],
            y_bounds: [0.0, 10.0],
            x_label: "X Axis".to_string(),
            y_label: "Y Axis".to_string(),
            grid: true,
        }
    }
}

/// In-memory figure: one line plus title and axes. The plot pane draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSurface {
    title: String,
    axes: Axes,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl PlotSurface {
    /// Register a line over `xs` with zeroed y-data
    pub fn new(title: &str, axes: Axes, xs: &[f64]) -> Self {
        Self {
            title: title.to_string(),
            axes,
            xs: xs.to_vec(),
            ys: vec![0.0; xs.len()],
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    #[cfg(test)]
    pub fn ydata(&self) -> &[f64] {
        &self.ys
    }

    /// Line points as (x, y) pairs for the chart widget
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.xs.iter().copied().zip(self.ys.iter().copied()).collect()
    }
}

impl RenderSurface for PlotSurface {
    fn set_curve_ydata(&mut self, ys: &[f64]) -> Result<()> {
        if ys.len() != self.xs.len() {
            return Err(Error::RenderSurfaceFailure(format!(
                "curve has {} x values but got {} y values",
                self.xs.len(),
                ys.len()
            )));
        }
        self.ys.clear();
        self.ys.extend_from_slice(ys);
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title.clear();
        self.title.push_str(title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_line_is_zeroed() {
        let surface = PlotSurface::new("Interactive Graph", Axes::default(), &[0.0, 1.0, 2.0]);
        assert_eq!(surface.ydata(), &[0.0, 0.0, 0.0]);
        assert_eq!(surface.title(), "Interactive Graph");
        assert_eq!(surface.axes().x_label, "X Axis");
    }

    #[test]
    fn test_set_ydata_replaces_points() {
        let mut surface = PlotSurface::new("t", Axes::default(), &[0.0, 1.0]);
        surface.set_curve_ydata(&[4.0, 6.0]).unwrap();
        assert_eq!(surface.points(), vec![(0.0, 4.0), (1.0, 6.0)]);
    }

    #[test]
    fn test_length_mismatch_is_surface_failure() {
        let mut surface = PlotSurface::new("t", Axes::default(), &[0.0, 1.0]);
        let err = surface.set_curve_ydata(&[1.0]).unwrap_err();
        assert!(matches!(err, Error::RenderSurfaceFailure(_)));
        assert_eq!(surface.ydata(), &[0.0, 0.0]);
    }

    #[test]
    fn test_set_title() {
        let mut surface = PlotSurface::new("a", Axes::default(), &[0.0]);
        surface.set_title("Interactive graph at time=1.25").unwrap();
        assert_eq!(surface.title(), "Interactive graph at time=1.25");
    }
}
