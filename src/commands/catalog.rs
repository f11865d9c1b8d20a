//! `organs` and `devices`: the fixed organ catalog and mock sensor discovery.

use super::AppContext;
use crate::core::{Language, OrganKey, SensorType, DEFAULT_SELECTION};
use crate::session::{Device, DeviceScanner, SensorPairing};
use anyhow::Result;
use std::fmt::Write;

pub fn handle_organs(ctx: &AppContext) -> Result<()> {
    print!("{}", render_organs(ctx.language));
    Ok(())
}

pub fn render_organs(language: Language) -> String {
    let mut out = String::new();
    for organ in OrganKey::ALL {
        let marker = if DEFAULT_SELECTION.contains(&organ) { "*" } else { " " };
        let _ = writeln!(out, "{} {:<12} {}", marker, organ.key(), organ.display_name(language));
    }
    out
}

/// Run discovery for `sensor_type`. BLE discovery takes the configured
/// simulated time behind a spinner; USB is immediate.
pub async fn discover<S: DeviceScanner>(
    ctx: &AppContext,
    pairing: &mut SensorPairing,
    scanner: &S,
    sensor_type: SensorType,
) -> Vec<Device> {
    pairing.select_type(sensor_type);
    if sensor_type == SensorType::Ble {
        let spinner = ctx.progress.create_spinner(ctx.text(
            "Bluetooth cihazları aranıyor...",
            "Searching for Bluetooth devices...",
        ));
        tokio::time::sleep(ctx.config.scan.ble_discovery()).await;
        spinner.finish_and_clear();
    }
    let devices = pairing.scan(scanner).to_vec();
    tracing::info!(sensor = %sensor_type, found = devices.len(), "device discovery finished");
    devices
}

pub async fn handle_devices<S: DeviceScanner>(
    ctx: &AppContext,
    scanner: &S,
    sensor_type: SensorType,
) -> Result<()> {
    let mut pairing = SensorPairing::new();
    let devices = discover(ctx, &mut pairing, scanner, sensor_type).await;
    if devices.is_empty() {
        println!(
            "{}",
            ctx.formatter
                .warning(ctx.text("Cihaz bulunamadı", "No devices found"))
        );
        return Ok(());
    }
    print!("{}", render_devices(&devices));
    Ok(())
}

pub fn render_devices(devices: &[Device]) -> String {
    let mut out = String::new();
    for (index, device) in devices.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {} [{}]", index + 1, device.name, device.id);
    }
    out
}
