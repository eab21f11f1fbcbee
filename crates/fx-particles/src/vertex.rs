//! Vertex data packing for renderers
//!
//! Each particle is written as four RGBA-style texels so the buffer can be
//! uploaded as a float texture or a plain vertex stream.

use crate::particle::Particle;

/// Texels written per particle
pub const TEXELS_PER_PARTICLE: usize = 4;

/// Floats written per particle
pub const FLOATS_PER_PARTICLE: usize = TEXELS_PER_PARTICLE * 4;

/// Pack particles for GPU upload
///
/// Layout per particle:
/// - Texel 0: position.xyz + lifetime fraction
/// - Texel 1: color.rgba, normalized
/// - Texel 2: dimensions.xyz + 0.0
/// - Texel 3: orientation.xyz + 0.0
pub fn fill_vertex_data(particles: &[Particle]) -> Vec<f32> {
    let mut data = vec![0.0; particles.len() * FLOATS_PER_PARTICLE];

    for (particle, chunk) in particles
        .iter()
        .zip(data.chunks_exact_mut(FLOATS_PER_PARTICLE))
    {
        let state = &particle.current;

        // Texel 0: position
        chunk[0..3].copy_from_slice(&state.position.to_array());
        chunk[3] = particle.lifetime_fraction();

        // Texel 1: color
        chunk[4..8].copy_from_slice(&state.color.to_f32_array());

        // Texel 2: dimensions
        chunk[8..11].copy_from_slice(&state.dimensions.to_array());

        // Texel 3: orientation
        chunk[12..15].copy_from_slice(&state.orientation.to_array());
    }

    data
}
