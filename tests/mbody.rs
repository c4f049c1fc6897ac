use peer_ivp::prelude::*;
use peer_ivp::problems::{MBody, Problem};

mod common;
use common::init_logger;

fn reference(mbody: &MBody, t_end: f64) -> Vec<f64> {
    let mut y = mbody.initialize();
    let config = Config::builder().absolute_tolerance(1e-12).build();
    EmbeddedRk::new(RkMethod::DoPri5)
        .integrate(mbody, 0.0, t_end, &mut y, &config)
        .unwrap();
    y
}

fn max_difference(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
}

#[test]
fn short_run_matches_dopri5() {
    init_logger();
    let mbody = MBody::new(4);
    let mut y = mbody.initialize();
    let energy = mbody.energy(&y);

    let config = Config::builder().absolute_tolerance(1e-5).build();
    let stats = Peer::new(PeerMethod::EPP8_d)
        .integrate(&mbody, 0.0, 0.1, &mut y, &config)
        .unwrap();

    assert!(stats.step_count > 0);
    assert!((stats.current_time - 0.1).abs() < 1e-5);
    assert!(max_difference(&y, &reference(&mbody, 0.1)) < 1e-8);
    assert!((mbody.energy(&y) - energy).abs() < 1e-10);
}

#[test]
fn long_run_conserves_energy() {
    let mbody = MBody::new(4);
    let mut y = mbody.initialize();
    let energy = mbody.energy(&y);

    let config = Config::builder().absolute_tolerance(1e-5).build();
    let stats = Peer::new(PeerMethod::EPP8_d)
        .integrate(&mbody, 0.0, 5.0, &mut y, &config)
        .unwrap();

    assert_eq!(stats.status, Status::Done);
    assert!(max_difference(&y, &reference(&mbody, 5.0)) < 1e-3);
    assert!((mbody.energy(&y) - energy).abs() < 1e-5);
}

#[test]
fn parallel_stages_give_the_same_trajectory() {
    let mbody = MBody::new(6);
    let serial = Config::builder().absolute_tolerance(1e-6).build();
    let parallel = Config::builder().absolute_tolerance(1e-6).parallel(true).build();
    let peer = Peer::new(PeerMethod::EPP6j1);

    let mut y1 = mbody.initialize();
    let s1 = peer.integrate(&mbody, 0.0, 1.0, &mut y1, &serial).unwrap();
    let mut y2 = mbody.initialize();
    let s2 = peer.integrate(&mbody, 0.0, 1.0, &mut y2, &parallel).unwrap();

    assert_eq!(y1, y2);
    assert_eq!(s1, s2);
}
