//! One complete automatic strapping cycle on the simulated rig.

use super::{SimRig, ms};
use bxt_common::control_unit::display::InfoField;
use bxt_common::control_unit::events::{LogEventKind, Logbook};
use bxt_common::control_unit::state::TimeoutTier;
use bxt_common::control_unit::steps::CycleStep;
use bxt_common::hal::driver::RigDriver;
use bxt_control_unit::config::load_config_from_str;
use bxt_control_unit::cycle::CycleRunner;
use bxt_hal::{MemoryLogbook, SimulationDriver};

const COOLING_4S: &str = "[timing]\ncooling_time_s = 4\n";

#[test]
fn auto_cycle_counts_exactly_one_cycle() {
    let mut rig = SimRig::new(COOLING_4S);
    rig.orch.start_auto();

    let report = rig
        .run_until(ms(25_000), |r, _| r.completed == Some(CycleStep::Weld))
        .expect("cycle should finish");

    assert_eq!(report.completed, Some(CycleStep::Weld));
    // Strokes plus tension travel plus 4 s cooling.
    assert!(rig.now > ms(18_000) && rig.now < ms(19_000), "finished at {:?}", rig.now);
    assert_eq!(rig.logbook.cycle_count(), 1);
    assert_eq!(rig.logbook.session_count(), 1);

    // Wrapped to the first step and still running.
    assert_eq!(rig.orch.sequencer().current_index(), 0);
    assert!(rig.orch.mode().is_running());
    assert_eq!(rig.orch.escalator().tier(), TimeoutTier::Idle);
    assert_eq!(rig.log_kinds(), vec![LogEventKind::ControllerOn]);
}

#[test]
fn steps_run_in_order() {
    let mut rig = SimRig::new(COOLING_4S);
    rig.orch.start_auto();

    let mut order = Vec::new();
    rig.run_until(ms(25_000), |r, _| {
        if let Some(step) = r.completed {
            order.push(step);
        }
        r.completed == Some(CycleStep::Weld)
    });

    assert_eq!(order, CycleStep::ALL.to_vec());
}

#[test]
fn weld_cooling_shows_countdown() {
    let mut rig = SimRig::new(COOLING_4S);
    rig.orch.start_auto();

    let report = rig.run_until(ms(25_000), |_, orch| {
        matches!(orch.info(), InfoField::Cooling { .. })
    });
    assert!(report.is_some());
    assert_eq!(rig.orch.current_step(), CycleStep::Weld);
    assert_eq!(rig.orch.info(), InfoField::Cooling { remaining_s: 4 });

    rig.run_until(ms(5_000), |r, _| r.completed.is_some());
    assert_eq!(rig.orch.info(), InfoField::Hidden);
}

#[test]
fn progress_keeps_back_to_back_cycles_free_of_timeouts() {
    let mut rig = SimRig::new(COOLING_4S);
    rig.orch.start_auto();
    rig.run_for(ms(40_000));

    assert_eq!(rig.logbook.cycle_count(), 2);
    assert_eq!(rig.orch.escalator().tier(), TimeoutTier::Idle);
    assert_eq!(rig.log_kinds(), vec![LogEventKind::ControllerOn]);
}

#[test]
fn cycle_runner_drives_the_simulated_rig() {
    let loaded = load_config_from_str(COOLING_4S).unwrap();
    let mut runner =
        CycleRunner::new(&loaded, Box::new(SimulationDriver::new()), MemoryLogbook::new()).unwrap();
    runner.start_auto();
    runner.advance(2_000);

    assert_eq!(runner.now(), ms(20_000));
    assert_eq!(runner.logbook().cycle_count(), 1);
    assert_eq!(
        runner.logbook().entries().next().map(|e| e.kind),
        Some(LogEventKind::ControllerOn)
    );

    let diag = runner.driver().diagnostics().unwrap();
    assert_eq!(diag.cycle_count, 2_000);
    assert!(diag.strokes_completed >= 7);

    runner.shutdown().unwrap();
}
