//! Initial configurations used by the demos.

use crate::{Body, OscillatorState};

/// Three bodies on a triangle around `center`, launched with zero net momentum
/// when their masses are equal.
///
/// Body 0 sits `radius` to the right of center moving down the screen's
/// y-axis; bodies 1 and 2 sit half a radius to the left, one radius above and
/// below, moving outward.
#[must_use]
pub fn three_body(center: (f64, f64), radius: f64, speed: f64) -> Vec<Body> {
    let (cx, cy) = center;

    vec![
        Body::new(cx + radius, cy, 0.0, -speed),
        Body::new(cx - radius / 2.0, cy + radius, speed, speed / 2.0),
        Body::new(cx - radius / 2.0, cy - radius, -speed, speed / 2.0),
    ]
}

/// Two equal masses `separation` apart on a circular orbit about `center`.
///
/// Each body moves at `sqrt(G m / 2d)`, the speed that balances centripetal
/// and gravitational acceleration. The softening floor must be smaller than
/// `separation` for the orbit to stay circular.
#[must_use]
pub fn circular_binary(center: (f64, f64), g: f64, mass: f64, separation: f64) -> Vec<Body> {
    let (cx, cy) = center;
    let half = separation / 2.0;
    let speed = (g * mass / (2.0 * separation)).sqrt();

    vec![
        Body::new(cx - half, cy, 0.0, -speed),
        Body::new(cx + half, cy, 0.0, speed),
    ]
}

/// The default oscillator start: displaced 100 units, at rest.
#[must_use]
pub fn displaced_oscillator() -> OscillatorState {
    OscillatorState { x: 100.0, v: 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::NBody;

    #[test]
    fn three_body_has_zero_momentum_for_equal_masses() {
        let system = NBody::new(1.0, [5.0; 3]).unwrap();
        let bodies = three_body((0.0, 0.0), 10.0, 3.0);

        assert_eq!(system.total_momentum(&bodies).unwrap(), (0.0, 0.0));
        assert_eq!(bodies[0], Body::new(10.0, 0.0, 0.0, -3.0));
    }

    #[test]
    fn circular_binary_balances_gravity() {
        let (g, mass, separation) = (2.0, 8.0, 4.0);
        let system = NBody::new(g, [mass, mass]).unwrap().with_min_distance(0.0).unwrap();
        let bodies = circular_binary((1.0, 1.0), g, mass, separation);

        // Centripetal acceleration v² / (d/2) equals the gravitational pull.
        let acc = system.accelerations(&bodies).unwrap();
        let speed = bodies[1].vy;
        assert_relative_eq!(acc[0].0, speed * speed / (separation / 2.0));
        assert_eq!(system.center_of_mass(&bodies).unwrap(), (1.0, 1.0));
    }
}
