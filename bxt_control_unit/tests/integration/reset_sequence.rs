//! Physical reset: quiesce, home stroke, finalize.

use super::{FAST_TIMING, SimRig, ms};
use bxt_common::control_unit::command::OperatorCommand;
use bxt_common::control_unit::state::{ResetStage, RunMode};
use bxt_common::hal::types::{CylinderId, RigIo};
use bxt_control_unit::safety::reset::ResetAction;
use bxt_control_unit::safety::timeout::TimeoutAction;

#[test]
fn operator_reset_homes_and_stays_paused() {
    let mut rig = SimRig::new("");
    rig.orch.start_auto();
    // Sled retracting.
    rig.run_for(ms(4_000));
    assert_eq!(rig.orch.sequencer().current_index(), 2);
    assert!(rig.driver.is_extended(CylinderId::Sled));

    rig.submit(OperatorCommand::RequestReset);
    let report = rig.tick();
    let quiesced_at = rig.now;
    assert_eq!(report.reset, ResetAction::Quiesced);
    assert!(!rig.driver.is_extended(CylinderId::Sled));
    assert!(rig.driver.is_extended(CylinderId::RockerLever));
    assert!(rig.orch.reset_sequencer().is_resetting());
    assert_eq!(rig.orch.reset_sequencer().stage(), ResetStage::HomeStroke);
    assert_eq!(rig.orch.sequencer().current_index(), 0);
    assert_eq!(rig.orch.mode().mode(), RunMode::Step);
    assert!(!rig.orch.mode().is_running());

    let report = rig
        .run_until(ms(3_000), |r, _| matches!(r.reset, ResetAction::Completed { .. }))
        .expect("home stroke completes");
    assert_eq!(report.reset, ResetAction::Completed { resume: false });
    assert_eq!(rig.now - quiesced_at, ms(1_500));
    assert!(!rig.orch.reset_sequencer().is_resetting());
    assert!(!rig.orch.mode().is_running());
    assert_eq!(rig.orch.sequencer().current_index(), 0);
}

#[test]
fn repeated_request_does_not_restart_homing() {
    let mut rig = SimRig::new("");
    rig.submit(OperatorCommand::RequestReset);
    rig.tick();
    let quiesced_at = rig.now;

    rig.run_for(ms(1_000));
    rig.submit(OperatorCommand::RequestReset);
    let report = rig.tick();
    assert_eq!(report.reset, ResetAction::Homing);

    rig.run_until(ms(3_000), |r, _| matches!(r.reset, ResetAction::Completed { .. }))
        .expect("home stroke completes");
    assert_eq!(rig.now - quiesced_at, ms(1_500));
}

#[test]
fn steps_are_not_dispatched_while_resetting() {
    let mut rig = SimRig::new("");
    rig.submit(OperatorCommand::RequestReset);
    rig.tick();

    // Running is forced off for the whole reset.
    rig.submit(OperatorCommand::ToggleRunning);
    let report = rig.tick();
    assert_eq!(report.reset, ResetAction::Homing);
    assert_eq!(report.completed, None);
    assert!(!rig.orch.mode().is_running());
}

#[test]
fn automatic_reset_resumes_in_auto() {
    let mut rig = SimRig::new(FAST_TIMING);
    rig.orch.start_auto();

    let report = rig
        .run_until(ms(6_000), |r, _| r.timeout == TimeoutAction::ResetAndResume)
        .expect("first tier");
    assert_eq!(report.reset, ResetAction::Quiesced);

    let report = rig
        .run_until(ms(3_000), |r, _| matches!(r.reset, ResetAction::Completed { .. }))
        .expect("home stroke completes");
    assert_eq!(report.reset, ResetAction::Completed { resume: true });
    assert!(rig.orch.mode().is_running());
    assert_eq!(rig.orch.mode().mode(), RunMode::Auto);
    assert_eq!(rig.orch.sequencer().current_index(), 0);

    // Cycle restarts from the first step.
    rig.tick();
    assert!(rig.driver.is_extended(CylinderId::RockerLever));
}
