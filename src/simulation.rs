// Per-tick movement: constant velocity with wrap-around edges

use crate::particle::Particle;
use vecmath::vec2_add;

pub fn advance(particles: &mut [Particle], width: u32, height: u32) {
    let width = width as f64;
    let height = height as f64;
    for particle in particles.iter_mut() {
        particle.pos = vec2_add(particle.pos, particle.vel);
        particle.pos[0] = wrap(particle.pos[0], width);
        particle.pos[1] = wrap(particle.pos[1], height);
    }
}

// Single-step wrap into [0, extent). The fold only kicks in when a particle ended up more
// than one extent away, i.e. after the surface shrank underneath it.
fn wrap(coord: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return coord;
    }
    let mut c = coord;
    if c < 0.0 {
        c += extent;
    } else if c >= extent {
        c -= extent;
    }
    if c < 0.0 || c >= extent {
        c = c.rem_euclid(extent);
        if c >= extent {
            c = 0.0;
        }
    }
    c
}
