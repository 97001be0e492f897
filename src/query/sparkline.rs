use std::fmt;

const GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Price history scaled onto the watchlist's 60x20 inline chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Sparkline {
    pub min: f64,
    pub max: f64,
    values: Vec<f64>,
}

impl Sparkline {
    pub const WIDTH: f64 = 60.0;
    pub const HEIGHT: f64 = 20.0;
    pub const AMPLITUDE: f64 = 15.0;

    fn range(&self) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 { 1.0 } else { range }
    }

    /// Chart coordinates, y growing downwards.
    pub fn points(&self) -> Vec<(f64, f64)> {
        let last = self.values.len().saturating_sub(1).max(1) as f64;
        let range = self.range();
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let x = i as f64 / last * Self::WIDTH;
                let y = Self::HEIGHT - (v - self.min) / range * Self::AMPLITUDE;
                (x, y)
            })
            .collect()
    }

    pub fn bars(&self) -> String {
        let range = self.range();
        let top = (GLYPHS.len() - 1) as f64;
        self.values
            .iter()
            .map(|v| GLYPHS[((v - self.min) / range * top).round().clamp(0.0, top) as usize])
            .collect()
    }
}

/// Polyline `points` attribute form: `x,y x,y ...`.
impl fmt::Display for Sparkline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let points = self
            .points()
            .iter()
            .map(|(x, y)| format!("{},{}", x, y))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", points)
    }
}

/// `None` for an empty history, or one holding a non-finite value.
pub fn sparkline(history: &[f64]) -> Option<Sparkline> {
    if history.is_empty() || history.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let max = history.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = history.iter().copied().fold(f64::INFINITY, f64::min);
    Some(Sparkline {
        min,
        max,
        values: history.to_vec(),
    })
}
