use std::fmt;
use std::ops::Range;

use log::info;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplianceError {
    #[error("power and electromagnetic emission cannot be negative (got {power} W, {emission} µT)")]
    NegativeAttribute { power: f64, emission: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplianceKind {
    ElectricStove,
    Hairdryer,
    Microwave,
    VacuumCleaner,
    WashingMachine,
}

impl ApplianceKind {
    pub const ALL: [ApplianceKind; 5] = [
        ApplianceKind::ElectricStove,
        ApplianceKind::Hairdryer,
        ApplianceKind::Microwave,
        ApplianceKind::VacuumCleaner,
        ApplianceKind::WashingMachine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ApplianceKind::ElectricStove => "Electric stove",
            ApplianceKind::Hairdryer => "Hairdryer",
            ApplianceKind::Microwave => "Microwave",
            ApplianceKind::VacuumCleaner => "Vacuum cleaner",
            ApplianceKind::WashingMachine => "Washing machine",
        }
    }

    // Watts.
    pub fn power_range(&self) -> Range<f64> {
        match self {
            ApplianceKind::ElectricStove => 1000.0..3000.0,
            ApplianceKind::Hairdryer => 500.0..1000.0,
            ApplianceKind::Microwave => 600.0..1000.0,
            ApplianceKind::VacuumCleaner => 500.0..2000.0,
            ApplianceKind::WashingMachine => 500.0..1000.0,
        }
    }

    // Microteslas.
    pub fn emission_range(&self) -> Range<f64> {
        match self {
            ApplianceKind::ElectricStove => 40.0..50.0,
            ApplianceKind::Hairdryer => 1500.0..2000.0,
            ApplianceKind::Microwave => 150.0..200.0,
            ApplianceKind::VacuumCleaner => 600.0..800.0,
            ApplianceKind::WashingMachine => 40.0..50.0,
        }
    }
}

impl fmt::Display for ApplianceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Draws a value in `[min, max)` from `rng`.
pub fn random_value<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + (max - min) * rng.gen::<f64>()
}

/// Gets told whenever an appliance is plugged in or unplugged.
pub trait PlugListener {
    fn plugged_in(&mut self, appliance: &Appliance);
    fn unplugged(&mut self, appliance: &Appliance);
}

pub struct NoopPlugListener {}

impl PlugListener for NoopPlugListener {
    fn plugged_in(&mut self, _appliance: &Appliance) {}
    fn unplugged(&mut self, _appliance: &Appliance) {}
}

pub struct LogPlugListener {}

impl PlugListener for LogPlugListener {
    fn plugged_in(&mut self, appliance: &Appliance) {
        info!("{} by {} was plugged in", appliance.name(), appliance.brand());
    }

    fn unplugged(&mut self, appliance: &Appliance) {
        info!("{} by {} was unplugged", appliance.name(), appliance.brand());
    }
}

/// A household appliance. Two appliances are equal when kind, brand and
/// both measurements match; whether they are plugged in does not count.
#[derive(Debug, Clone)]
pub struct Appliance {
    kind: ApplianceKind,
    brand: String,
    power: f64,
    electromagnetic_emission: f64,
    plugged_in: bool,
}

impl Appliance {
    pub fn new(
        kind: ApplianceKind,
        brand: impl Into<String>,
        power: f64,
        electromagnetic_emission: f64,
    ) -> Result<Appliance, ApplianceError> {
        // NaN would break equality
        let invalid = |v: f64| v.is_nan() || v < 0.0;
        if invalid(power) || invalid(electromagnetic_emission) {
            return Err(ApplianceError::NegativeAttribute {
                power,
                emission: electromagnetic_emission,
            });
        }
        Ok(Appliance {
            kind,
            brand: brand.into(),
            power,
            electromagnetic_emission,
            plugged_in: false,
        })
    }

    /// Builds an appliance with power and emission drawn from the ranges
    /// typical for its kind.
    pub fn random<R: Rng>(
        kind: ApplianceKind,
        brand: impl Into<String>,
        rng: &mut R,
    ) -> Result<Appliance, ApplianceError> {
        let power = kind.power_range();
        let emission = kind.emission_range();
        Appliance::new(
            kind,
            brand,
            random_value(rng, power.start, power.end),
            random_value(rng, emission.start, emission.end),
        )
    }

    pub fn kind(&self) -> ApplianceKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn electromagnetic_emission(&self) -> f64 {
        self.electromagnetic_emission
    }

    pub fn is_plugged_in(&self) -> bool {
        self.plugged_in
    }

    pub fn plug_in(&mut self, listener: &mut dyn PlugListener) {
        listener.plugged_in(self);
        self.plugged_in = true;
    }

    pub fn unplug(&mut self, listener: &mut dyn PlugListener) {
        listener.unplugged(self);
        self.plugged_in = false;
    }
}

impl PartialEq for Appliance {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.brand == other.brand
            && self.power == other.power
            && self.electromagnetic_emission == other.electromagnetic_emission
    }
}

// Attributes are never NaN, so equality is total.
impl Eq for Appliance {}

impl fmt::Display for Appliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
