//! Control loop driver
//!
//! Runs the controller forever and logs what each iteration did. The
//! controller blocks for the whole of an alert or watering run, so nothing
//! else is scheduled on this executor.

use defmt::*;

use sprig_core::controller::{CommandReport, Controller, Cycle, MonitorReport};

use crate::board::PicoBoard;

pub fn run(mut controller: Controller<PicoBoard>) -> ! {
    info!("Control loop running");

    loop {
        match controller.poll() {
            Ok(Cycle::Command(report)) => log_command(&report),
            Ok(Cycle::Monitor(report)) => log_monitor(&report),
            Err(e) => warn!("Loop iteration failed: {}", e),
        }
    }
}

fn log_command(report: &CommandReport) {
    match report.command {
        Ok(command) => info!("Command: {}", command),
        Err(e) => debug!("Rejected line: {}", e),
    }
    for kind in &report.alerts {
        info!("Alert sounded: {}", kind);
    }
    if let Some(Err(e)) = report.saved {
        warn!("Settings not saved: {}", e);
    }
}

fn log_monitor(report: &MonitorReport) {
    let m = &report.metrics;
    trace!(
        "t={}s volume={} light={} moisture={} battery={}",
        report.seconds_of_day,
        m.volume_ml,
        m.light_percent,
        m.moisture_percent,
        m.battery_volts
    );
    if let Err(e) = m.volume_ml {
        warn!("Volume probe: {}", e);
    }
    for kind in &report.alerts {
        warn!("Alert sounded: {}", kind);
    }
    if let Some(watering) = report.watering {
        info!(
            "Watered for {} cycles, stopped: {}",
            watering.cycles, watering.stop
        );
    }
}
