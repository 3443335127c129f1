// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Busy-wait delays. Interrupts stay disabled in the bootloader, so there is
//! no timer to sleep on.

use crate::config::CPU_FREQ_HZ;

const CYCLES_PER_US: u32 = CPU_FREQ_HZ / 1_000_000;
/// `nop` plus loop overhead.
const CYCLES_PER_SPIN: u32 = 4;

#[derive(Clone, Copy, Default)]
pub struct BusyDelay;

#[inline(always)]
fn spin(iterations: u32) {
    for _ in 0..iterations {
        avr_device::asm::nop();
    }
}

impl embedded_hal::delay::DelayNs for BusyDelay {
    fn delay_ns(&mut self, ns: u32) {
        spin((ns / 1_000).max(1) * CYCLES_PER_US / CYCLES_PER_SPIN);
    }

    fn delay_us(&mut self, us: u32) {
        for _ in 0..us {
            spin(CYCLES_PER_US / CYCLES_PER_SPIN);
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1_000);
        }
    }
}
