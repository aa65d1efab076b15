//! Three-tier inactivity escalation on the simulated rig.
//!
//! With `FAST_TIMING` and the default strokes the end switch would first
//! close about 13 s into a cycle, so every 5 s deadline expires first.

use super::{FAST_TIMING, SimRig, ms};
use bxt_common::control_unit::command::OperatorCommand;
use bxt_common::control_unit::display::InfoField;
use bxt_common::control_unit::events::{LogEventKind, Logbook};
use bxt_common::control_unit::safety::FaultFlags;
use bxt_common::control_unit::state::{RunMode, RunState, TimeoutTier};
use bxt_control_unit::safety::reset::ResetAction;
use bxt_control_unit::safety::timeout::TimeoutAction;
use std::time::Duration;

/// Tick until `limit`, collecting every escalation step with its time.
fn escalations(rig: &mut SimRig, limit: Duration) -> Vec<(Duration, TimeoutAction)> {
    let mut timeline = Vec::new();
    let end = rig.now + limit;
    while rig.now < end {
        let report = rig.tick();
        if !matches!(report.timeout, TimeoutAction::None | TimeoutAction::CoolingDown { .. }) {
            timeline.push((rig.now, report.timeout));
        }
        if report.timeout == TimeoutAction::Shutdown {
            break;
        }
    }
    timeline
}

#[test]
fn escalates_reset_wait_then_shutdown() {
    let mut rig = SimRig::new(FAST_TIMING);
    rig.orch.start_auto();

    let timeline = escalations(&mut rig, ms(40_000));
    let actions: Vec<TimeoutAction> = timeline.iter().map(|(_, a)| *a).collect();
    assert_eq!(
        actions,
        vec![
            TimeoutAction::ResetAndResume,
            TimeoutAction::CooldownStarted {
                remaining: Duration::from_secs(10)
            },
            TimeoutAction::CooldownElapsed,
            TimeoutAction::Shutdown,
        ]
    );

    // First deadline runs from boot.
    assert_eq!(timeline[0].0, ms(5_000));
    // The wait lasts exactly the configured time.
    assert_eq!(timeline[2].0 - timeline[1].0, Duration::from_secs(10));

    assert_eq!(
        rig.log_kinds(),
        vec![
            LogEventKind::ControllerOn,
            LogEventKind::ShortTimeout,
            LogEventKind::LongTimeout,
            LogEventKind::Shutdown,
        ]
    );

    let snap = rig.orch.snapshot();
    assert_eq!(snap.mode, RunMode::Step);
    assert_eq!(snap.run_state, RunState::Paused);
    assert_eq!(snap.step_number(), 1);
    assert_eq!(snap.tier, TimeoutTier::Idle);
    assert!(snap.faults.contains(FaultFlags::TIMEOUT_SHUTDOWN));
    assert_eq!(snap.info, InfoField::Shutdown);
    assert_eq!(rig.logbook.cycle_count(), 0);
}

#[test]
fn second_tier_pauses_and_shows_countdown() {
    let mut rig = SimRig::new(FAST_TIMING);
    rig.orch.start_auto();

    let report = rig
        .run_until(ms(20_000), |r, _| {
            matches!(r.timeout, TimeoutAction::CooldownStarted { .. })
        })
        .expect("second tier");
    assert_eq!(report.reset, ResetAction::Idle);

    assert!(rig.orch.escalator().is_timeout_active());
    assert_eq!(rig.orch.escalator().tier(), TimeoutTier::Second);
    assert!(!rig.orch.mode().is_running());
    assert_eq!(rig.orch.mode().mode(), RunMode::Auto);
    assert!(rig.orch.faults().contains(FaultFlags::TIMEOUT_WAIT));
    assert_eq!(rig.orch.info(), InfoField::TimeoutWait { remaining_s: 10 });

    rig.run_for(ms(3_000));
    assert_eq!(rig.orch.info(), InfoField::TimeoutWait { remaining_s: 7 });
    assert!(rig.orch.escalator().is_timeout_active());

    // Reset and resume once the wait is over.
    let report = rig
        .run_until(ms(8_000), |r, _| r.timeout == TimeoutAction::CooldownElapsed)
        .expect("wait elapses");
    assert_eq!(report.reset, ResetAction::Quiesced);
    assert!(!rig.orch.faults().contains(FaultFlags::TIMEOUT_WAIT));
    assert_eq!(rig.orch.info(), InfoField::Hidden);

    let report = rig
        .run_until(ms(3_000), |r, _| matches!(r.reset, ResetAction::Completed { .. }))
        .expect("home stroke");
    assert_eq!(report.reset, ResetAction::Completed { resume: true });
    assert!(rig.orch.mode().is_running());
}

#[test]
fn shutdown_blinks_slowly_and_stays_quiet() {
    let mut rig = SimRig::new(FAST_TIMING);
    rig.orch.start_auto();
    escalations(&mut rig, ms(40_000));
    assert_eq!(rig.orch.escalator().tier(), TimeoutTier::Idle);

    let mut lamp = rig.driver.fault_lamp();
    let mut toggles = 0;
    for _ in 0..500 {
        rig.tick();
        assert_ne!(rig.driver.fault_lamp(), rig.driver.beacon());
        if rig.driver.fault_lamp() != lamp {
            lamp = rig.driver.fault_lamp();
            toggles += 1;
        }
    }
    // 5 s at a 2 s half-period.
    assert_eq!(toggles, 2);

    // Paused in Step mode: the deadline is held, nothing escalates.
    rig.run_for(ms(60_000));
    assert_eq!(rig.log_kinds().len(), 4);
    assert_eq!(rig.orch.escalator().tier(), TimeoutTier::Idle);
}

#[test]
fn operator_reset_cancels_wait_but_keeps_tier() {
    let mut rig = SimRig::new(FAST_TIMING);
    rig.orch.start_auto();
    rig.run_until(ms(20_000), |r, _| {
        matches!(r.timeout, TimeoutAction::CooldownStarted { .. })
    })
    .expect("second tier");

    rig.submit(OperatorCommand::RequestReset);
    let report = rig.tick();
    assert_eq!(report.reset, ResetAction::Quiesced);
    assert!(!rig.orch.escalator().is_timeout_active());
    assert!(!rig.orch.faults().contains(FaultFlags::TIMEOUT_WAIT));
    assert_eq!(rig.orch.info(), InfoField::Hidden);
    assert_eq!(rig.orch.mode().mode(), RunMode::Step);

    let report = rig
        .run_until(ms(3_000), |r, _| matches!(r.reset, ResetAction::Completed { .. }))
        .expect("home stroke");
    assert_eq!(report.reset, ResetAction::Completed { resume: false });
    assert!(!rig.orch.mode().is_running());
    assert_eq!(rig.orch.escalator().tier(), TimeoutTier::Second);

    // Next unanswered deadline goes straight to the third tier.
    rig.submit(OperatorCommand::ToggleMode);
    rig.submit(OperatorCommand::ToggleRunning);
    let report = rig
        .run_until(ms(6_000), |r, _| r.timeout != TimeoutAction::None)
        .expect("deadline expires");
    assert_eq!(report.timeout, TimeoutAction::Shutdown);
    assert_eq!(
        rig.log_kinds(),
        vec![
            LogEventKind::ControllerOn,
            LogEventKind::ShortTimeout,
            LogEventKind::LongTimeout,
            LogEventKind::ManualStart,
            LogEventKind::Shutdown,
        ]
    );
}

/// Short strokes so the end switch closes about 2.4 s into each cycle.
const QUICK_STROKES: &str = "\
[timing]
cooling_time_s = 4
cycle_time_estimate_s = 1
long_timeout_wait_s = 10

[strokes]
rocker_lever = { extend_ms = 100, retract_ms = 100 }
clamp_release = { extend_ms = 0, retract_ms = 100 }
sled_retract = { extend_ms = 100, retract_ms = 0 }
strap_feed = { extend_ms = 100, retract_ms = 0 }
knife = { extend_ms = 100, retract_ms = 100 }
";

#[test]
fn progress_after_first_tier_clears_escalation() {
    let mut rig = SimRig::new(QUICK_STROKES);
    rig.orch.start_auto();

    // Tension, weld and cooling outlast the 5 s deadline once.
    rig.run_until(ms(15_000), |r, _| r.timeout == TimeoutAction::ResetAndResume)
        .expect("first tier");
    assert_eq!(rig.orch.escalator().tier(), TimeoutTier::First);
    assert_eq!(rig.logbook.cycle_count(), 0);

    // The restarted cycle reaches the end switch before the next deadline.
    rig.run_until(ms(5_000), |_, orch| orch.escalator().tier() == TimeoutTier::Idle)
        .expect("progress clears the tier");
    assert_eq!(
        rig.log_kinds(),
        vec![LogEventKind::ControllerOn, LogEventKind::ShortTimeout]
    );
}
