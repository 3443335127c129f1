// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Reset bookkeeping and control transfer.

use crate::config::RAMEND;
use avr_device::atmega1284p::{CPU, WDT};
use core::arch::asm;
use multirom_common::{BootSignals, ResetCause};

const PORF: u8 = 1 << 0;
const EXTRF: u8 = 1 << 1;
const BORF: u8 = 1 << 2;
const WDRF: u8 = 1 << 3;

const WDTCSR_WDCE: u8 = 1 << 4;
const WDTCSR_WDE: u8 = 1 << 3;
/// WDP = 0: ~16 ms.
const WDTCSR_15MS: u8 = 0;

/// Read and clear MCUSR, then stop a watchdog left running by the
/// application or by [`reset`].
pub fn take_reset_flags(cpu: &CPU, wdt: &WDT) -> u8 {
    let flags = cpu.mcusr.read().bits();
    avr_device::interrupt::free(|_| unsafe {
        // WDRF must be cleared before WDE can be.
        cpu.mcusr.write(|w| w.bits(0));
        wdt.wdtcsr.write(|w| w.bits(WDTCSR_WDCE | WDTCSR_WDE));
        wdt.wdtcsr.write(|w| w.bits(0));
    });
    flags
}

pub fn reset_cause(flags: u8) -> ResetCause {
    if flags & PORF != 0 {
        ResetCause::PowerOn
    } else if flags & EXTRF != 0 {
        ResetCause::External
    } else if flags & BORF != 0 {
        ResetCause::BrownOut
    } else if flags & WDRF != 0 {
        ResetCause::Watchdog
    } else {
        ResetCause::Unknown
    }
}

/// Inputs sampled once right after reset.
pub struct Signals {
    cause: ResetCause,
    select: bool,
}

impl Signals {
    pub fn new(flags: u8, select: bool) -> Self {
        Self {
            cause: reset_cause(flags),
            select,
        }
    }
}

impl BootSignals for Signals {
    fn reset_cause(&mut self) -> ResetCause {
        self.cause
    }

    fn select_asserted(&mut self) -> bool {
        self.select
    }
}

/// Arm the watchdog with its shortest timeout and wait for it to bite.
pub fn reset(wdt: &WDT) -> ! {
    avr_device::interrupt::free(|_| unsafe {
        wdt.wdtcsr.write(|w| w.bits(WDTCSR_WDCE | WDTCSR_WDE));
        wdt.wdtcsr.write(|w| w.bits(WDTCSR_WDE | WDTCSR_15MS));
    });
    loop {}
}

/// Jump to the reset vector at address 0 with a fresh stack.
///
/// # Safety
/// The vector region must hold a complete table, and RWW reads must be
/// enabled again after the last SPM operation.
pub unsafe fn start_application() -> ! {
    avr_device::interrupt::disable();
    asm!(
        "out 0x3E, {hi}",
        "out 0x3D, {lo}",
        "jmp 0",
        hi = in(reg) (RAMEND >> 8) as u8,
        lo = in(reg) RAMEND as u8,
        options(noreturn),
    );
}
