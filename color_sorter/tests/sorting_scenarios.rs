use color_sorter::{
    ColorLabel, Command, Frame, FrameError, NeverSpawn, ScriptedSpawner, Simulation, SortColor,
    SortController, SorterConfig,
};
use std::collections::VecDeque;

fn solid(color: SortColor) -> Frame {
    Frame::solid(32, 24, color.rgb())
}

/// A frame source that plays back a fixed list and then repeats black frames.
fn playback(frames: impl IntoIterator<Item = Frame>) -> impl FnMut() -> Frame {
    let mut queue: VecDeque<Frame> = frames.into_iter().collect();
    move || queue.pop_front().unwrap_or_else(|| Frame::solid(32, 24, [0, 0, 0]))
}

#[test]
fn red_green_red_against_red_target() {
    let mut controller = SortController::default();
    assert_eq!(controller.target(), SortColor::Red);

    let positions: Vec<f64> = [SortColor::Red, SortColor::Green, SortColor::Red]
        .into_iter()
        .map(|color| controller.tick(&solid(color)).unwrap().gate_position)
        .collect();

    assert_eq!(positions, vec![0.1, 0.0, 0.1]);

    let tally = controller.tally();
    assert_eq!(tally.count(ColorLabel::Red), 2);
    assert_eq!(tally.count(ColorLabel::Green), 0);
    assert_eq!(tally.count(ColorLabel::Blue), 0);
    assert_eq!(tally.count(ColorLabel::Unknown), 0);
    assert!(controller.live_tokens().is_empty());
}

#[test]
fn tally_follows_the_target_in_force_at_each_tick() {
    let frames = [
        SortColor::Blue,
        SortColor::Blue,
        SortColor::Green,
        SortColor::Blue,
        SortColor::Green,
    ];
    let mut sim = Simulation::new(
        SortController::default(),
        playback(frames.map(solid)),
        NeverSpawn,
    );

    // Tick 1 under RED: blue does not count.
    sim.step().unwrap();
    sim.apply(Command::SetTarget(SortColor::Blue));
    // Ticks 2-3 under BLUE.
    sim.step().unwrap();
    sim.step().unwrap();
    sim.apply(Command::SetTarget(SortColor::Green));
    // Ticks 4-5 under GREEN.
    sim.step().unwrap();
    let last = sim.step().unwrap();

    assert_eq!(last.tally.count(ColorLabel::Blue), 1);
    assert_eq!(last.tally.count(ColorLabel::Green), 1);
    assert_eq!(last.tally.count(ColorLabel::Red), 0);
    assert_eq!(last.target, SortColor::Green);
}

#[test]
fn scripted_spawns_ride_the_belt_and_expire() {
    let mut sim = Simulation::new(
        SortController::default(),
        playback(Vec::<Frame>::new()),
        ScriptedSpawner::new([Some(SortColor::Green), None, Some(SortColor::Red)]),
    );

    let mut report = sim.step().unwrap();
    for _ in 0..3 {
        report = sim.step().unwrap();
    }
    let colors: Vec<ColorLabel> = report.live_tokens.iter().map(|t| t.color).collect();
    assert_eq!(colors, vec![ColorLabel::Green, ColorLabel::Red]);
    assert_eq!(report.live_tokens[0].position, 1.5);
    assert_eq!(report.live_tokens[1].position, 0.5);
    assert!(report.live_tokens[0].id < report.live_tokens[1].id);

    // The green token was placed after tick 1 and needs 200 ticks to clear the belt.
    while sim.controller().ticks() < 200 {
        report = sim.step().unwrap();
    }
    assert_eq!(report.live_tokens.len(), 2);
    report = sim.step().unwrap();
    assert_eq!(report.tick, 201);
    assert_eq!(report.live_tokens.len(), 1);
    assert_eq!(report.live_tokens[0].color, ColorLabel::Red);

    // Live tokens always sit inside the belt.
    assert!(report.live_tokens.iter().all(|t| (0.0..100.0).contains(&t.position)));
}

#[test]
fn sustained_match_holds_the_gate_open() {
    let mut controller = SortController::default();
    let mut positions = Vec::new();
    for _ in 0..15 {
        positions.push(controller.tick(&solid(SortColor::Red)).unwrap().gate_position);
    }
    assert!(positions.iter().all(|p| (0.0..=1.0).contains(p)));
    assert!(positions[9] >= 0.99);
    assert!(positions[10..].iter().all(|p| *p == 1.0));
    assert_eq!(controller.tally().count(ColorLabel::Red), 15);
}

#[test]
fn malformed_frame_propagates_to_the_driver() {
    let mut sim = Simulation::new(
        SortController::default(),
        playback([solid(SortColor::Red), Frame::from_raw(8, 8, 4, vec![0; 256])]),
        NeverSpawn,
    );
    sim.step().unwrap();
    let err = sim.step().unwrap_err();
    assert_eq!(err, FrameError::ChannelCount(4));

    // The driver may keep going; the failed tick did not count.
    let report = sim.step().unwrap();
    assert_eq!(report.tick, 2);
    assert_eq!(report.tally.count(ColorLabel::Red), 1);
}

#[test]
fn independent_controllers_do_not_share_state() {
    let mut first = SortController::default();
    let mut second = SortController::new(&SorterConfig {
        initial_target: SortColor::Blue,
        ..SorterConfig::default()
    });

    first.tick(&solid(SortColor::Red)).unwrap();
    second.tick(&solid(SortColor::Red)).unwrap();

    assert_eq!(first.tally().count(ColorLabel::Red), 1);
    assert_eq!(second.tally().total(), 0);
    assert_eq!(first.gate_position(), 0.1);
    assert_eq!(second.gate_position(), 0.0);
}

#[test]
fn synthetic_camera_drives_a_full_run() {
    let config = SorterConfig {
        spawn_probability: 0.2,
        ..SorterConfig::default()
    };
    let mut sim = Simulation::synthetic(&config, Some(3));
    let mut matched = 0;
    for _ in 0..60 {
        let report = sim.step().unwrap();
        assert_ne!(report.detected, ColorLabel::Unknown);
        if report.matched() {
            matched += 1;
        }
        assert!((0.0..=1.0).contains(&report.gate_position));
    }
    let controller = sim.into_controller();
    assert_eq!(controller.tally().count(ColorLabel::Red), matched);
    assert_eq!(controller.tally().total(), matched);
}
