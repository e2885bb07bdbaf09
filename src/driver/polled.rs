// src/driver/polled.rs

use crate::common::codec::{decode_register, quantize};
use crate::common::error::Ft300Error;
use crate::common::hal_traits::RegisterBus;
use crate::common::protocol::{AXIS_COUNT, FORCE_TORQUE_BASE_REGISTER};
use crate::common::types::{Axis, Measurement};

/// Polled-mode sampling session.
///
/// Owns the register channel for its lifetime. The zero reference is
/// captured once by [`Sampler::tare`], with the sensor at rest, and every
/// later [`Sampler::sample`] is reported relative to it. Tick cadence is
/// caller-owned (the reference setup polls at 1 Hz); this type only
/// provides the per-tick transform.
pub struct Sampler<REG: RegisterBus> {
    bus: REG,
    zero: Measurement,
}

impl<REG: RegisterBus> Sampler<REG> {
    /// Reads the register block once and captures it as the session zero
    /// reference. The sensor is expected to be unloaded when this runs.
    pub fn tare(mut bus: REG) -> Result<Self, Ft300Error<REG::Error>> {
        let zero = read_decoded(&mut bus)?;
        log::debug!("zero reference captured from register block");
        Ok(Sampler { bus, zero })
    }

    /// The reading captured at [`Sampler::tare`], unrounded.
    pub fn zero_reference(&self) -> Measurement {
        self.zero
    }

    /// One per-tick transform: read the register block, decode each axis,
    /// subtract the zero reference and round - forces to whole newtons,
    /// torques to 0.01 N.m.
    ///
    /// Channel failures here are transient; the caller may simply retry at
    /// the next tick.
    pub fn sample(&mut self) -> Result<Measurement, Ft300Error<REG::Error>> {
        let raw = read_decoded(&mut self.bus)?;

        let mut out = Measurement::ZERO;
        for axis in Axis::ALL {
            let decimals = if axis.is_force() { 0 } else { 2 };
            out.set_axis(
                axis,
                quantize(raw.axis(axis) - self.zero.axis(axis), decimals),
            );
        }
        Ok(out)
    }

    /// Hands the register channel back, ending the session.
    pub fn release(self) -> REG {
        self.bus
    }
}

/// Reads the six-register measurement block and applies the register codec
/// with the per-axis scale. No zero correction, no rounding.
fn read_decoded<REG: RegisterBus>(bus: &mut REG) -> Result<Measurement, Ft300Error<REG::Error>> {
    let mut registers = [0u16; AXIS_COUNT];
    bus.read_registers(FORCE_TORQUE_BASE_REGISTER, &mut registers)
        .map_err(Ft300Error::Io)?;

    let mut out = Measurement::ZERO;
    for axis in Axis::ALL {
        out.set_axis(axis, decode_register(registers[axis.index()], axis.scale()));
    }
    Ok(out)
}
