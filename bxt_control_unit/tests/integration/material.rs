//! Strap supply running out on the simulated rig.

use super::{SimRig, ms};
use bxt_common::control_unit::display::InfoField;
use bxt_common::control_unit::events::LogEventKind;
use bxt_common::control_unit::safety::FaultFlags;
use bxt_common::control_unit::state::RunMode;
use bxt_common::control_unit::steps::CycleStep;
use bxt_common::hal::types::{CylinderId, RigIo};
use bxt_control_unit::safety::material::MaterialStatus;

const ONE_COIL: &str = "\
[timing]
cooling_time_s = 4

[simulation]
strap_supply_cycles = 1
";

#[test]
fn empty_coil_stops_the_rig() {
    let mut rig = SimRig::new(ONE_COIL);
    rig.orch.start_auto();

    rig.run_until(ms(10_000), |r, _| r.material == MaterialStatus::Lost)
        .expect("coil runs out on the first cut");

    assert_eq!(rig.driver.strap_supply(), Some(0));
    assert_eq!(rig.orch.current_step(), CycleStep::CutStrap);
    assert!(!rig.orch.mode().is_running());
    assert_eq!(rig.orch.mode().mode(), RunMode::Step);
    assert!(!rig.driver.is_extended(CylinderId::Knife));
    assert!(rig.orch.faults().contains(FaultFlags::MATERIAL_ABSENT));
    assert_eq!(rig.orch.info(), InfoField::MaterialEmpty);
    assert_eq!(
        rig.log_kinds(),
        vec![LogEventKind::ControllerOn, LogEventKind::MaterialEmpty]
    );
}

#[test]
fn fault_lamp_blinks_until_refilled() {
    let mut rig = SimRig::new(ONE_COIL);
    rig.orch.start_auto();
    rig.run_until(ms(10_000), |r, _| r.material == MaterialStatus::Lost)
        .expect("coil runs out");
    assert!(!rig.driver.fault_lamp());

    // Fast half-period is 600 ms.
    rig.run_for(ms(700));
    assert!(rig.driver.fault_lamp());
    assert!(!rig.driver.beacon());

    // Absent is reported once.
    rig.run_for(ms(2_000));
    assert_eq!(
        rig.log_kinds()
            .iter()
            .filter(|k| **k == LogEventKind::MaterialEmpty)
            .count(),
        1
    );

    rig.driver.refill_strap(5);
    rig.run_for(ms(600));
    assert!(!rig.orch.faults().contains(FaultFlags::MATERIAL_ABSENT));
    assert!(!rig.driver.fault_lamp());
    assert!(rig.driver.beacon());
}
