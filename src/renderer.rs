// Proximity renderer: clears the surface, paints one dot per particle and a fading line
// between every pair closer than the connection threshold.
// Drawing goes through the `Surface` trait so the pair walk runs the same natively and on a
// browser canvas.

use crate::color::Color;
use crate::error::Result;
use crate::particle::Particle;
use vecmath::{vec2_len, vec2_sub, Vector2};

pub trait Surface {
    /// Sets the pixel dimensions of the backing store.
    fn resize(&mut self, width: u32, height: u32);
    fn fill_background(&mut self, width: f64, height: f64, color: Color) -> Result<()>;
    fn fill_dot(&mut self, center: Vector2<f64>, radius: f64, color: Color) -> Result<()>;
    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
    ) -> Result<()>;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderStyle {
    pub background: Color,
    pub dot: Color,
    pub line: Color,
    pub line_width: f64,
    pub max_line_alpha: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle {
            background: Color::from_u32(0x000000ff),
            dot: Color::rgba(0, 243, 255, 0.9),
            line: Color::rgba(0, 243, 255, 1.0),
            line_width: 0.7,
            max_line_alpha: 0.35,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub dots_drawn: usize,
    pub pairs_evaluated: usize,
    pub connections_drawn: usize,
}

/// Linear falloff: `max_alpha` at distance zero, 0 at the threshold and beyond.
pub fn connection_alpha(distance: f64, threshold: f64, max_alpha: f64) -> f64 {
    if threshold <= 0.0 || distance >= threshold {
        return 0.0;
    }
    (1.0 - distance / threshold) * max_alpha
}

pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    connection_threshold: f64,
    style: &RenderStyle,
    width: u32,
    height: u32,
) -> Result<RenderStats> {
    let mut stats = RenderStats::default();
    surface.fill_background(width as f64, height as f64, style.background)?;

    for (i, p1) in particles.iter().enumerate() {
        surface.fill_dot(p1.pos, p1.size, style.dot)?;
        stats.dots_drawn += 1;

        for p2 in &particles[i + 1..] {
            stats.pairs_evaluated += 1;
            let distance = vec2_len(vec2_sub(p1.pos, p2.pos));
            if distance < connection_threshold {
                let alpha = connection_alpha(distance, connection_threshold, style.max_line_alpha);
                let color = style.line.with_alpha(alpha);
                surface.stroke_line(p1.pos, p2.pos, style.line_width, color)?;
                stats.connections_drawn += 1;
            }
        }
    }
    Ok(stats)
}
