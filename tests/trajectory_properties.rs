use arrow_ballistics::constants::GRAVITY_MPS2;
use arrow_ballistics::{
    ballistics, calc_theta, AngleSolver, BallisticsError, SimulationParams, TrajectoryIntegrator,
};

const DRAG: f64 = 0.0003747;

fn launch(speed: f64, angle_deg: f64, dt: f64, drag: f64) -> SimulationParams {
    SimulationParams::launch(speed, angle_deg.to_radians(), dt, drag)
}

#[test]
fn test_first_sample_equals_initial_state() {
    let cases = [
        launch(75.0, 3.0, 0.0002, DRAG),
        launch(40.0, 30.0, 0.001, 0.0),
        SimulationParams {
            initial_x: -5.0,
            initial_y: 12.0,
            initial_angle: -0.2,
            ..Default::default()
        },
    ];
    for params in &cases {
        let traj = ballistics(params).unwrap();
        let first = traj.initial();
        assert_eq!(first.time, 0.0);
        assert_eq!(first.velocity, params.initial_speed);
        assert_eq!(first.angle, params.initial_angle);
        assert_eq!(first.x, params.initial_x);
        assert_eq!(first.y, params.initial_y);
    }
}

#[test]
fn test_time_advances_by_time_step() {
    let params = launch(75.0, 20.0, 0.0005, DRAG);
    let traj = ballistics(&params).unwrap();
    assert!(traj.len() > 100);
    for pair in traj.samples().windows(2) {
        let dt = pair[1].time - pair[0].time;
        assert!((dt - params.time_step).abs() < 1e-9, "time step drifted: {dt}");
    }
}

#[test]
fn test_zero_drag_range_matches_analytic() {
    let traj = ballistics(&launch(75.0, 45.0, 0.0002, 0.0)).unwrap();
    let analytic = 75.0 * 75.0 / GRAVITY_MPS2;
    let relative = (traj.range() - analytic).abs() / analytic;
    assert!(relative < 0.02, "range {} vs analytic {}", traj.range(), analytic);
    assert!((traj.range() - 573.4).abs() < 0.5);
}

#[test]
fn test_euler_refinement_converges() {
    let ranges: Vec<f64> = [1e-2, 1e-3, 1e-4, 1e-5]
        .iter()
        .map(|&dt| ballistics(&launch(75.0, 3.0, dt, DRAG)).unwrap().range())
        .collect();
    let changes: Vec<f64> = ranges.windows(2).map(|w| (w[0] - w[1]).abs()).collect();
    assert!(changes[1] < changes[0], "ranges {ranges:?}");
    assert!(changes[2] < changes[1], "ranges {ranges:?}");
}

#[test]
fn test_drag_shortens_range() {
    let vacuum = ballistics(&launch(75.0, 30.0, 0.0005, 0.0)).unwrap();
    let drag = ballistics(&launch(75.0, 30.0, 0.0005, DRAG)).unwrap();
    assert!(drag.range() < vacuum.range());
    assert!(drag.impact_velocity() < vacuum.impact_velocity());
}

#[test]
fn test_solver_round_trip() {
    let known_deg = 5.0;
    let target = ballistics(&launch(75.0, known_deg, 0.0002, DRAG)).unwrap().range();

    let angle = calc_theta(75.0, target, 0.0002, DRAG).unwrap();
    assert!((angle.to_degrees() - known_deg).abs() < 2.0, "solved {}", angle.to_degrees());

    let landed = ballistics(&launch(75.0, angle.to_degrees(), 0.0002, DRAG)).unwrap().range();
    assert!((landed - target).abs() < 0.1);
}

#[test]
fn test_unreachable_targets_return_vertical_sentinel() {
    let negative = calc_theta(75.0, -1.0, 0.0002, DRAG).unwrap();
    assert!((negative.to_degrees() - 90.0).abs() < 1e-9);

    let solver = AngleSolver::new(75.0, 0.0002, DRAG);
    let reference = solver.range_at(10.0_f64.to_radians()).unwrap();
    let far = calc_theta(75.0, reference + 1.0, 0.0002, DRAG).unwrap();
    assert!((far.to_degrees() - 90.0).abs() < 1e-9);
}

#[test]
fn test_trace_has_one_line_per_sample() {
    let params = SimulationParams {
        initial_speed: 10.0,
        initial_angle: 0.0,
        time_step: 0.01,
        drag_coefficient: 0.0,
        stop_y: -100.0,
        stop_x: 0.25,
        verbose: true,
        ..Default::default()
    };
    let mut out = Vec::new();
    let traj = TrajectoryIntegrator::new(params).solve_traced(&mut out).unwrap();
    assert_eq!(traj.steps(), 3);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(!lines[0].starts_with("Time"));

    let times: Vec<f64> = lines[1..]
        .iter()
        .map(|l| {
            let rest = l.strip_prefix("Time ").unwrap();
            rest[..rest.find(':').unwrap()].parse().unwrap()
        })
        .collect();
    assert!(times.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_columns_release_together() {
    let traj = ballistics(&SimulationParams::default()).unwrap();
    let n = traj.len();
    let cols = traj.into_columns();
    assert_eq!(cols.time.len(), n);
    assert_eq!(cols.velocity.len(), n);
    assert_eq!(cols.angle.len(), n);
    assert_eq!(cols.x.len(), n);
    assert_eq!(cols.y.len(), n);
}

#[test]
fn test_invalid_inputs_fail_fast() {
    let bad_dt = SimulationParams { time_step: -0.1, ..Default::default() };
    assert!(matches!(
        ballistics(&bad_dt),
        Err(BallisticsError::InvalidParameter { .. })
    ));
    assert!(calc_theta(-75.0, 50.0, 0.0002, DRAG).is_err());
}
