use approx::assert_abs_diff_eq;
use integration_tests::{BODY_MASS, G};
use orrery_models::{Body, NBody};
use orrery_sim::Settings;
use orrery_solvers::Method;

fn momentum(sim: &orrery_sim::Simulation<NBody>) -> (f64, f64) {
    let bodies = sim.system().bodies(sim.state()).unwrap();
    sim.system().total_momentum(&bodies).unwrap()
}

#[test]
fn momentum_is_conserved_by_every_explicit_method() {
    for method in [Method::Euler, Method::Midpoint, Method::Rk4] {
        let mut sim = integration_tests::three_body().unwrap();
        let (px0, py0) = momentum(&sim);
        assert_abs_diff_eq!(px0, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(py0, 0.0, epsilon = 1e-12);

        sim.run();
        let settings = Settings {
            step: 0.001,
            ..Settings::default().with_method(method)
        };
        for _ in 0..60 {
            sim.advance(1.0 / 60.0, &settings).unwrap();
        }

        let (px, py) = momentum(&sim);
        assert_abs_diff_eq!(px, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(py, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn changing_g_keeps_positions_and_changes_motion() {
    let settings = Settings::default();

    let mut original = integration_tests::three_body().unwrap();
    original.run();
    original.advance(0.5, &settings).unwrap();

    let mut stronger = original.clone();
    stronger.replace_system(NBody::new(4.0 * G, [BODY_MASS; 3]).unwrap());
    assert_eq!(stronger.state(), original.state());

    original.advance(0.5, &settings).unwrap();
    stronger.advance(0.5, &settings).unwrap();

    assert_eq!(stronger.time(), original.time());
    assert!(stronger.state().distance(original.state()).unwrap() > 1e-3);
}

#[test]
fn dragging_a_body_replaces_its_position_and_stops_it() {
    let mut sim = integration_tests::three_body().unwrap();
    let mut bodies = sim.system().bodies(sim.state()).unwrap();
    bodies[1] = Body::new(250.0, 150.0, 0.0, 0.0);

    sim.set_state(NBody::to_state(&bodies)).unwrap();

    let after = sim.system().bodies(sim.state()).unwrap();
    assert_eq!(after[1], bodies[1]);
    assert_eq!(sim.origin().state, *sim.state());
}

#[test]
fn wrong_body_count_is_reported() {
    let mut sim = integration_tests::three_body().unwrap();
    let two = NBody::to_state(&[Body::default(), Body::default()]);

    let err = sim.set_state(two).unwrap_err();

    assert!(matches!(err, orrery_sim::Error::Shape(_)));
    assert!(err.to_string().contains("does not match"));
}
