// Simple particle struct to keep track of individual position, velocity, and dot size,
// plus seeding of the whole collection at mount

use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
}

impl Particle {
    // Velocity components are drawn from (random - 0.5) * SPEED_SPAN
    pub const SPEED_SPAN: f64 = 0.35;
    pub const MIN_SIZE: f64 = 1.2;
    pub const SIZE_SPAN: f64 = 1.5;

    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, size: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            size,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * Particle::SPEED_SPAN;
        let vel_y = (rng.gen::<f64>() - 0.5) * Particle::SPEED_SPAN;
        let size = rng.gen::<f64>() * Particle::SIZE_SPAN + Particle::MIN_SIZE;
        Particle::new(pos_x, pos_y, vel_x, vel_y, size)
    }
}

/// Creates `count` independent particles spread uniformly over a `width` x `height` surface.
pub fn seed<R: Rng + ?Sized>(rng: &mut R, count: usize, width: u32, height: u32) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(count);
    for _ in 0..count {
        particles.push(Particle::random(rng, width as f64, height as f64));
    }
    log::debug!("seeded {} particles over {}x{}", count, width, height);
    particles
}
