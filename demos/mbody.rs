//! # Example: N-body problem with an explicit peer method
//!
//! Integrates the softened gravitational motion of a few bodies with EPP8_d,
//! compares against a tightly converged Dormand-Prince run and reports the
//! energy drift.
//!
//! Run with `RUST_LOG=debug cargo run --example mbody -- 6 EPP6j1` to pick
//! the number of bodies and the method, and to see the startup and summary
//! log lines.

use peer_ivp::prelude::*;
use peer_ivp::problems::{MBody, Problem};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let bodies: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(4);
    let method: PeerMethod = args
        .next()
        .map(|a| a.parse().expect("unknown peer method"))
        .unwrap_or(PeerMethod::EPP8_d);

    let mbody = MBody::new(bodies);
    let (t0, t_end) = (0.0, 5.0);
    println!("{}", mbody.description());

    let config = Config::builder()
        .absolute_tolerance(1e-5)
        .relative_tolerance(1e-5)
        .parallel(true)
        .build();

    let mut y = mbody.initialize();
    let energy0 = mbody.energy(&y);
    let stats = Peer::new(method)
        .integrate(&mbody, t0, t_end, &mut y, &config)
        .expect("peer integration failed");

    println!("{method}: status {:?} at t = {}", stats.status, stats.current_time);
    println!(
        "Steps: {} (accepted {} / rejected {})",
        stats.step_count,
        stats.accepted_count(),
        stats.rejected_count
    );
    println!(
        "Evaluations: {} ({} for startup)",
        stats.evaluation_count, stats.startup_evaluation_count
    );
    println!("Energy drift: {:.3e}", mbody.energy(&y) - energy0);

    let mut reference = mbody.initialize();
    let tight = Config::builder().absolute_tolerance(1e-12).build();
    let ref_stats = EmbeddedRk::new(RkMethod::DoPri5)
        .integrate(&mbody, t0, t_end, &mut reference, &tight)
        .expect("reference integration failed");
    let deviation = y
        .iter()
        .zip(&reference)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    println!(
        "Max deviation from DoPri5 ({} steps): {:.3e}",
        ref_stats.step_count, deviation
    );
}
