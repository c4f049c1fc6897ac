use peer_ivp::prelude::*;

mod common;
use common::{Constant, Cubic, Oscillators, Ramp, init_logger, peer_methods};

#[test]
fn quadratic_reaches_the_exact_value_for_every_peer_method() {
    init_logger();
    for peer in peer_methods() {
        let mut y = [100.0];
        let stats = peer
            .integrate(&Ramp, -10.0, 10.0, &mut y, &Config::default())
            .unwrap();
        let name = peer.info().name;
        assert!((y[0] - 100.0).abs() < 1e-4, "{name}: y = {}", y[0]);
        assert!((stats.current_time - 10.0).abs() < 1e-4, "{name}");
        assert_eq!(stats.status, Status::Done, "{name}");
        assert_eq!(stats.rejected_count, 0, "{name}");
    }
}

#[test]
fn constant_derivative_in_several_components() {
    for peer in peer_methods() {
        let mut y = [1.0, 2.0];
        peer.integrate(&Constant(0.5), 0.0, 4.0, &mut y, &Config::default())
            .unwrap();
        assert!((y[0] - 3.0).abs() < 1e-9, "{}: {y:?}", peer.info().name);
        assert!((y[1] - 4.0).abs() < 1e-9, "{}: {y:?}", peer.info().name);
    }
}

#[test]
fn cubic_is_exact_from_order_four() {
    let config = Config::builder().absolute_tolerance(1e-6).build();
    for peer in peer_methods().filter(|p| p.info().order >= 4) {
        let mut y = [0.0];
        let stats = peer.integrate(&Cubic, -2.0, 3.0, &mut y, &config).unwrap();
        // y(t) = t^3 - t + 6
        assert!((y[0] - 30.0).abs() < 1e-8, "{}: {}", peer.info().name, y[0]);
        assert!((stats.current_time - 3.0).abs() < 1e-6);
    }

    // second order only controls the local error
    let mut y = [0.0];
    Peer::new(PeerMethod::EPP2)
        .integrate(&Cubic, -2.0, 3.0, &mut y, &config)
        .unwrap();
    assert!((y[0] - 30.0).abs() < 1e-3);
}

#[test]
fn oscillators_follow_the_exact_solution() {
    let config = Config::builder().absolute_tolerance(1e-7).build();
    for peer in peer_methods().filter(|p| p.method() != PeerMethod::EPP2) {
        let mut y = [1.0, 0.0, 1.0, 0.0];
        peer.integrate(&Oscillators, 0.0, 6.0, &mut y, &config).unwrap();
        let name = peer.info().name;
        assert!((y[0] - 6.0_f64.cos()).abs() < 1e-5, "{name}: {y:?}");
        assert!((y[2] - 12.0_f64.cos()).abs() < 5e-3, "{name}: {y:?}");
    }
}

#[test]
fn error_model_blending_keeps_accuracy() {
    let config = Config::builder().absolute_tolerance(1e-7).build();
    for method in [PeerMethod::EPP4y3, PeerMethod::EPP6j1, PeerMethod::EPP8_d] {
        let peer = Peer::with_error_model_blending(method);
        let mut y = [1.0, 0.0, 1.0, 0.0];
        let stats = peer.integrate(&Oscillators, 0.0, 6.0, &mut y, &config).unwrap();
        assert_eq!(stats.status, Status::Done);
        assert!((y[0] - 6.0_f64.cos()).abs() < 1e-5, "{method}: {y:?}");
        assert!((y[2] - 12.0_f64.cos()).abs() < 5e-3, "{method}: {y:?}");
    }
}

#[test]
fn embedded_rk_methods_on_oscillators() {
    let config = Config::builder().absolute_tolerance(1e-7).build();
    for method in RkMethod::ALL {
        let mut y = [1.0, 0.0, 1.0, 0.0];
        let stats = EmbeddedRk::new(method)
            .integrate(&Oscillators, 0.0, 6.0, &mut y, &config)
            .unwrap();
        assert_eq!(stats.current_time, 6.0);
        assert!((y[0] - 6.0_f64.cos()).abs() < 1e-5, "{method}: {y:?}");
        assert!((y[2] - 12.0_f64.cos()).abs() < 1e-4, "{method}: {y:?}");
    }
}
