//! Step mode: one step per start, manual stepping, no timeout supervision.

use super::{SimRig, ms};
use bxt_common::control_unit::command::{JogAction, OperatorCommand};
use bxt_common::control_unit::events::LogEventKind;
use bxt_common::control_unit::state::{RunMode, RunState, TimeoutTier};
use bxt_common::control_unit::steps::CycleStep;
use bxt_common::hal::types::{CylinderId, RigIo};
use bxt_control_unit::state::sequencer::SequencerError;

#[test]
fn boots_paused_in_step_mode() {
    let mut rig = SimRig::new("");
    rig.run_for(ms(1_000));

    let snap = rig.orch.snapshot();
    assert_eq!(snap.mode, RunMode::Step);
    assert_eq!(snap.run_state, RunState::Paused);
    assert_eq!(snap.step, CycleStep::PullRockerLever);
    assert!(!rig.driver.is_extended(CylinderId::RockerLever));
    assert!(rig.driver.beacon());
    assert!(!rig.driver.fault_lamp());
}

#[test]
fn start_runs_one_step_then_pauses() {
    let mut rig = SimRig::new("");
    rig.submit(OperatorCommand::ToggleRunning);

    let report = rig
        .run_until(ms(3_000), |r, _| r.paused_on_step)
        .expect("step completes");
    assert_eq!(report.completed, Some(CycleStep::PullRockerLever));
    assert_eq!(rig.orch.current_step(), CycleStep::ReleaseStrapClamp);
    assert!(!rig.orch.mode().is_running());
    // Start/stop is only logged in Auto mode.
    assert_eq!(rig.log_kinds(), vec![LogEventKind::ControllerOn]);

    // Stays on the next step until started again.
    rig.run_for(ms(2_000));
    assert_eq!(rig.orch.current_step(), CycleStep::ReleaseStrapClamp);
}

#[test]
fn long_pause_never_times_out() {
    let mut rig = SimRig::new("[timing]\ncooling_time_s = 4\ncycle_time_estimate_s = 1\n");
    rig.run_for(ms(60_000));
    assert_eq!(rig.orch.escalator().tier(), TimeoutTier::Idle);
    assert_eq!(rig.log_kinds(), vec![LogEventKind::ControllerOn]);
}

#[test]
fn manual_stepping() {
    let mut rig = SimRig::new("");
    rig.submit(OperatorCommand::StepForward);
    rig.submit(OperatorCommand::StepForward);
    let report = rig.tick();
    assert_eq!(rig.orch.sequencer().current_index(), 2);
    assert!(!report.paused_on_step);

    rig.submit(OperatorCommand::StepBack);
    rig.tick();
    assert_eq!(rig.orch.current_step(), CycleStep::ReleaseStrapClamp);

    for _ in 0..5 {
        rig.submit(OperatorCommand::StepBack);
    }
    rig.tick();
    assert_eq!(rig.orch.sequencer().current_index(), 0);

    rig.orch.jump_to(7).unwrap();
    rig.submit(OperatorCommand::StepForward);
    rig.tick();
    assert_eq!(rig.orch.current_step(), CycleStep::PullRockerLever);

    assert_eq!(
        rig.orch.jump_to(8),
        Err(SequencerError::StepOutOfRange { index: 8, len: 8 })
    );
    assert_eq!(rig.orch.sequencer().current_index(), 0);
}

#[test]
fn auto_start_and_stop_are_logged() {
    let mut rig = SimRig::new("");
    rig.submit(OperatorCommand::ToggleMode);
    rig.submit(OperatorCommand::ToggleRunning);
    rig.tick();
    assert!(rig.orch.mode().is_autonomous());

    rig.run_for(ms(3_000));
    // Auto mode does not pause between steps.
    assert!(rig.orch.sequencer().current_index() >= 1);
    assert!(rig.orch.mode().is_running());

    rig.submit(OperatorCommand::ToggleRunning);
    rig.tick();
    assert!(!rig.orch.mode().is_running());
    assert_eq!(
        rig.log_kinds(),
        vec![
            LogEventKind::ControllerOn,
            LogEventKind::ManualStart,
            LogEventKind::ManualStop,
        ]
    );
}

#[test]
fn jog_toggles_a_cylinder() {
    let mut rig = SimRig::new("");
    rig.submit(OperatorCommand::Jog {
        cylinder: CylinderId::Knife,
        action: JogAction::Toggle,
    });
    rig.tick();
    assert!(rig.driver.is_extended(CylinderId::Knife));

    rig.submit(OperatorCommand::Jog {
        cylinder: CylinderId::Knife,
        action: JogAction::Toggle,
    });
    rig.tick();
    assert!(!rig.driver.is_extended(CylinderId::Knife));
}
