use approx::assert_relative_eq;
use orrery_models::{Oscillator, OscillatorState};
use orrery_sim::{Phase, Settings, Simulation};
use orrery_solvers::Method;

fn current(sim: &Simulation<Oscillator>) -> OscillatorState {
    OscillatorState::try_from(sim.state()).unwrap()
}

#[test]
fn one_rk4_tick_matches_golden_values() {
    let mut sim = integration_tests::oscillator().unwrap();
    sim.run();

    sim.tick(&Settings::default()).unwrap();

    let state = current(&sim);
    assert_relative_eq!(state.x, 99.950_004_166_666_67, max_relative = 1e-14);
    assert_relative_eq!(state.v, -9.998_333_333_333_335, max_relative = 1e-14);
}

#[test]
fn rk4_returns_after_one_period_and_euler_does_not() {
    let settings = Settings::default();
    let mut errors = Vec::new();

    for method in [Method::Euler, Method::Midpoint, Method::Rk4] {
        let sim = integration_tests::oscillator().unwrap();
        let period = sim.system().period();
        let mut sim = sim.with_end_time(period);
        sim.run();

        while sim.phase() == Phase::Running {
            sim.advance(1.0 / 60.0, &settings.with_method(method)).unwrap();
        }

        assert_relative_eq!(sim.time(), period, epsilon = 1e-12);
        errors.push((current(&sim).x - 100.0).abs());
    }

    assert!(errors[2] < 0.1, "rk4 error {}", errors[2]);
    assert!(errors[0] > 10.0 * errors[2], "{errors:?}");
    assert!(errors[0] > errors[1] && errors[1] > errors[2], "{errors:?}");
}

#[test]
fn implicit_methods_converge_and_agree_with_rk4() {
    let damped = Oscillator::new_si(10.0, 1.0, 0.5).unwrap();
    let mut reference = integration_tests::oscillator().unwrap();
    reference.replace_system(damped);
    reference.run();
    reference.advance(1.0, &Settings::default()).unwrap();
    let expected = current(&reference);

    // Backward Euler is first order and visibly over-damps.
    for (method, x_tol, v_tol) in [
        (Method::BackwardEuler, 8.0, 25.0),
        (Method::ImplicitMidpoint, 0.5, 2.0),
    ] {
        let mut sim = integration_tests::oscillator().unwrap();
        sim.replace_system(damped);
        sim.run();

        let frame = sim.advance(1.0, &Settings::default().with_method(method)).unwrap();

        assert_eq!(frame.steps, 100, "{method}");
        assert_eq!(frame.unconverged, 0, "{method}");

        let state = current(&sim);
        assert_relative_eq!(state.x, expected.x, epsilon = x_tol);
        assert_relative_eq!(state.v, expected.v, epsilon = v_tol);
    }
}

#[test]
fn dragging_restarts_the_analytic_reference() {
    let mut sim = integration_tests::oscillator().unwrap();
    sim.run();
    sim.advance(0.7, &Settings::default()).unwrap();

    let dragged = OscillatorState { x: -30.0, v: 0.0 };
    sim.set_state(dragged.into()).unwrap();
    sim.advance(0.5, &Settings::default()).unwrap();

    let exact = sim.system().analytic(dragged, sim.time_since_origin());
    let state = current(&sim);
    assert_relative_eq!(sim.time_since_origin(), 0.5, epsilon = 1e-12);
    assert_relative_eq!(state.x, exact.x, epsilon = 1e-5);
    assert_relative_eq!(state.v, exact.v, epsilon = 1e-5);
}
