// src/common/types.rs

use crate::common::codec::{FORCE_SCALE, TORQUE_SCALE};

/// Measurement axes in wire order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Axis {
    Fx,
    Fy,
    Fz,
    Tx,
    Ty,
    Tz,
}

impl Axis {
    /// All axes in the order they appear in frames and in the register block.
    pub const ALL: [Axis; 6] = [Axis::Fx, Axis::Fy, Axis::Fz, Axis::Tx, Axis::Ty, Axis::Tz];

    /// Position of this axis within a frame or register block.
    pub fn index(self) -> usize {
        match self {
            Axis::Fx => 0,
            Axis::Fy => 1,
            Axis::Fz => 2,
            Axis::Tx => 3,
            Axis::Ty => 4,
            Axis::Tz => 5,
        }
    }

    /// Whether this is a force axis (newtons) as opposed to torque (N.m).
    pub fn is_force(self) -> bool {
        matches!(self, Axis::Fx | Axis::Fy | Axis::Fz)
    }

    /// Fixed-point divisor for raw words on this axis.
    pub fn scale(self) -> i32 {
        if self.is_force() {
            FORCE_SCALE
        } else {
            TORQUE_SCALE
        }
    }
}

/// A zero-corrected 6-axis force/torque reading.
///
/// Forces are in newtons, torques in newton-meters. Produced by decoding a
/// raw frame or register block and subtracting the session's zero reference.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Measurement {
    /// Force along X in newtons.
    pub fx: f32,
    /// Force along Y in newtons.
    pub fy: f32,
    /// Force along Z in newtons.
    pub fz: f32,
    /// Torque about X in newton-meters.
    pub tx: f32,
    /// Torque about Y in newton-meters.
    pub ty: f32,
    /// Torque about Z in newton-meters.
    pub tz: f32,
}

impl Measurement {
    /// The all-zero reading.
    pub const ZERO: Measurement = Measurement {
        fx: 0.0,
        fy: 0.0,
        fz: 0.0,
        tx: 0.0,
        ty: 0.0,
        tz: 0.0,
    };

    /// Value of one axis.
    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Fx => self.fx,
            Axis::Fy => self.fy,
            Axis::Fz => self.fz,
            Axis::Tx => self.tx,
            Axis::Ty => self.ty,
            Axis::Tz => self.tz,
        }
    }

    /// Sets the value of one axis.
    pub fn set_axis(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Fx => self.fx = value,
            Axis::Fy => self.fy = value,
            Axis::Fz => self.fz = value,
            Axis::Tx => self.tx = value,
            Axis::Ty => self.ty = value,
            Axis::Tz => self.tz = value,
        }
    }
}

/// One decoded streaming sample together with session throughput.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StreamSample {
    /// The zero-corrected reading.
    pub measurement: Measurement,
    /// Average session data rate, rounded to whole hertz.
    pub frequency_hz: u32,
    /// 1-based index of this sample within the session.
    pub sequence: u32,
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_order_matches_wire_layout() {
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }

    #[test]
    fn axis_scales() {
        assert_eq!(Axis::Fx.scale(), 100);
        assert_eq!(Axis::Fz.scale(), 100);
        assert_eq!(Axis::Tx.scale(), 1000);
        assert_eq!(Axis::Tz.scale(), 1000);
    }

    #[test]
    fn axis_accessors_round_trip() {
        let mut m = Measurement::ZERO;
        for (i, axis) in Axis::ALL.iter().enumerate() {
            m.set_axis(*axis, i as f32 + 0.5);
        }
        assert_eq!(m.fx, 0.5);
        assert_eq!(m.tz, 5.5);
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(m.axis(*axis), i as f32 + 0.5);
        }
    }
}
