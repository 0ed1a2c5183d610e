//! Area chart of the rolling hash-rate history.
//!
//! Geometry is computed here and issued against a [`Surface`], which keeps
//! rendering independent of the terminal backend. [`PathRecorder`] captures
//! the calls so they can be replayed onto a canvas or inspected.

/// Inset applied on every side of the surface.
pub const PADDING: f64 = 20.0;
/// Lower bound for the vertical scale, MH/s.
pub const MIN_SCALE: f64 = 100.0;

/// Minimal 2D drawing target modelled on a canvas path API.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// Top of the vertical scale for `samples`.
pub fn scale_max(samples: &[f64]) -> f64 {
    samples.iter().copied().fold(MIN_SCALE, f64::max)
}

/// Maps each sample to surface coordinates, oldest on the left.
pub fn points(samples: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    let max_hash = scale_max(samples);
    let chart_width = width - PADDING * 2.0;
    let chart_height = height - PADDING * 2.0;
    let last_index = samples.len().saturating_sub(1).max(1) as f64;

    samples
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let x = PADDING + (index as f64 / last_index) * chart_width;
            let y = height - PADDING - (sample / max_hash) * chart_height;
            (x, y)
        })
        .collect()
}

/// Draws `samples` onto `surface`. An empty history only clears it.
///
/// Output depends on nothing but `samples` and the surface size.
pub fn render<S: Surface + ?Sized>(samples: &[f64], surface: &mut S) {
    surface.clear();
    if samples.is_empty() {
        return;
    }

    let width = surface.width();
    let height = surface.height();
    let max_hash = scale_max(samples);

    surface.begin_path();
    for (index, (x, y)) in points(samples, width, height).into_iter().enumerate() {
        if index == 0 {
            surface.move_to(x, y);
        } else {
            surface.line_to(x, y);
        }
    }
    surface.stroke();

    surface.line_to(width - PADDING, height - PADDING);
    surface.line_to(PADDING, height - PADDING);
    surface.close_path();
    surface.fill();

    // Ties round away from zero.
    surface.fill_text(&format!("{:.0} MH/s", max_hash.round()), PADDING, PADDING);
    surface.fill_text("0 MH/s", PADDING, height - PADDING);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Stroke,
    ClosePath,
    Fill,
    Text { text: String, x: f64, y: f64 },
}

/// A [`Surface`] that records every call in order.
#[derive(Clone, Debug)]
pub struct PathRecorder {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl PathRecorder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// True when anything beyond clearing has been drawn.
    #[cfg(test)]
    pub fn has_geometry(&self) -> bool {
        self.ops.iter().any(|op| !matches!(op, DrawOp::Clear))
    }
}

impl Surface for PathRecorder {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(x, y));
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(recorder: &PathRecorder) -> Vec<(String, f64, f64)> {
        recorder
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, x, y } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_history_draws_nothing() {
        let mut recorder = PathRecorder::new(400.0, 200.0);
        render(&[], &mut recorder);
        assert_eq!(recorder.ops(), &[DrawOp::Clear]);
        assert!(!recorder.has_geometry());
    }

    #[test]
    fn single_sample_sits_on_left_padding() {
        let mut recorder = PathRecorder::new(400.0, 200.0);
        render(&[50.0], &mut recorder);

        // Scale floors at 100, so 50 lands half way up the plot area.
        assert_eq!(recorder.ops()[2], DrawOp::MoveTo(PADDING, 200.0 - 20.0 - 0.5 * 160.0));
        assert_eq!(points(&[50.0], 400.0, 200.0), vec![(20.0, 100.0)]);
    }

    #[test]
    fn spans_plot_area_and_scales_to_peak() {
        let samples = [100.0, 250.0, 200.0];
        let pts = points(&samples, 440.0, 290.0);

        assert_eq!(pts[0].0, 20.0);
        assert_eq!(pts[1].0, 220.0);
        assert_eq!(pts[2].0, 420.0);
        // Peak touches the top padding, the rest scale against it.
        assert_eq!(pts[1].1, 20.0);
        assert_eq!(pts[0].1, 290.0 - 20.0 - 0.4 * 250.0);
        assert_eq!(scale_max(&samples), 250.0);
    }

    #[test]
    fn draws_area_and_labels() {
        let mut recorder = PathRecorder::new(300.0, 150.0);
        render(&[120.0, 180.6], &mut recorder);

        let ops = recorder.ops();
        assert_eq!(
            &ops[..6],
            &[
                DrawOp::Clear,
                DrawOp::BeginPath,
                DrawOp::MoveTo(20.0, 150.0 - 20.0 - (120.0 / 180.6) * 110.0),
                DrawOp::LineTo(280.0, 20.0),
                DrawOp::Stroke,
                DrawOp::LineTo(280.0, 130.0),
            ]
        );
        assert_eq!(&ops[6..9], &[DrawOp::LineTo(20.0, 130.0), DrawOp::ClosePath, DrawOp::Fill]);
        assert_eq!(
            texts(&recorder),
            vec![
                ("181 MH/s".to_string(), 20.0, 20.0),
                ("0 MH/s".to_string(), 20.0, 130.0),
            ]
        );
    }

    #[test]
    fn scale_label_rounds_half_up() {
        let mut recorder = PathRecorder::new(300.0, 150.0);
        render(&[180.5, 120.0], &mut recorder);
        assert_eq!(texts(&recorder)[0].0, "181 MH/s");

        render(&[100.49], &mut recorder);
        assert_eq!(texts(&recorder)[0].0, "100 MH/s");
    }

    #[test]
    fn low_samples_use_minimum_scale() {
        let mut recorder = PathRecorder::new(300.0, 150.0);
        render(&[0.0, 1.5, 3.0], &mut recorder);
        assert_eq!(texts(&recorder)[0].0, "100 MH/s");
    }

    #[test]
    fn redraw_is_idempotent() {
        let samples: Vec<f64> = (0..60).map(|i| 150.0 + (i % 7) as f64).collect();
        let mut recorder = PathRecorder::new(640.0, 240.0);
        render(&samples, &mut recorder);
        let first = recorder.ops().to_vec();
        render(&samples, &mut recorder);
        assert_eq!(recorder.ops(), first.as_slice());
    }

    #[test]
    fn zero_sized_surface_does_not_fault() {
        let mut recorder = PathRecorder::new(0.0, 0.0);
        render(&[10.0, 20.0, 30.0], &mut recorder);
        assert!(recorder.has_geometry());
        assert!(recorder
            .ops()
            .iter()
            .all(|op| match op {
                DrawOp::MoveTo(x, y) | DrawOp::LineTo(x, y) => x.is_finite() && y.is_finite(),
                _ => true,
            }));
    }
}
