// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Self-programming of the application section.
//!
//! `spm` only works from the boot section, which is where this binary is
//! linked. RAMPZ:Z holds the byte address; the page buffer word goes in
//! r1:r0, so r1 is cleared again afterwards.

use crate::config::{BOOT_START, SPM_PAGESIZE, VECTORS_SIZE};
use avr_device::atmega1284p::{BOOT_LOAD, CPU, EEPROM};
use core::arch::asm;
use multirom_common::ProgramMemory;

const SPMEN: u8 = 1 << 0;
const PGERS: u8 = 1 << 1;
const PGWRT: u8 = 1 << 2;
const RWWSRE: u8 = 1 << 4;
const RWWSB: u8 = 1 << 6;

const EECR_EEPE: u8 = 1 << 1;

pub struct SelfProgram {
    cpu: CPU,
}

impl SelfProgram {
    pub fn new(cpu: CPU) -> Self {
        Self { cpu }
    }

    /// SPM must not start while an EEPROM write is in progress. The EEPROM
    /// itself is owned by [`crate::hal::Eeprom`]; only EECR is polled here.
    fn eeprom_busy(&self) -> bool {
        unsafe { (*EEPROM::ptr()).eecr.read().bits() & EECR_EEPE != 0 }
    }

    fn spm_busy(&self) -> bool {
        unsafe { (*BOOT_LOAD::ptr()).spmcsr.read().bits() & SPMEN != 0 }
    }

    /// Issue `command` on the page or word at `address`.
    fn spm(&mut self, address: u32, command: u8) {
        avr_device::interrupt::free(|_| unsafe {
            asm!(
                "out 0x3B, {rampz}",
                "out 0x37, {command}",
                "spm",
                rampz = in(reg) (address >> 16) as u8,
                command = in(reg) command,
                in("Z") address as u16,
            );
        });
    }

    pub fn rww_busy(&self) -> bool {
        unsafe { (*BOOT_LOAD::ptr()).spmcsr.read().bits() & RWWSB != 0 }
    }
}

impl ProgramMemory for SelfProgram {
    const PAGE_SIZE: usize = SPM_PAGESIZE;
    const APP_END: u32 = BOOT_START;
    const VECTORS_SIZE: usize = VECTORS_SIZE;

    fn erase_page(&mut self, address: u32) {
        self.spm(address, PGERS | SPMEN);
    }

    fn fill_word(&mut self, address: u32, word: u16) {
        avr_device::interrupt::free(|_| unsafe {
            asm!(
                "movw r0, {word}",
                "out 0x3B, {rampz}",
                "out 0x37, {command}",
                "spm",
                "clr r1",
                word = in(reg_pair) word,
                rampz = in(reg) (address >> 16) as u8,
                command = in(reg) SPMEN,
                in("Z") address as u16,
            );
        });
    }

    fn write_page(&mut self, address: u32) {
        self.spm(address, PGWRT | SPMEN);
    }

    fn wait_idle(&mut self) {
        while self.spm_busy() || self.eeprom_busy() {}
    }

    fn enable_rww(&mut self) {
        while self.rww_busy() {
            self.wait_idle();
            self.spm(0, RWWSRE | SPMEN);
        }
    }

    fn read(&mut self, address: u32, buf: &mut [u8]) {
        for (i, byte) in buf.iter_mut().enumerate() {
            let at = address + i as u32;
            unsafe {
                asm!(
                    "out 0x3B, {rampz}",
                    "elpm {out}, Z",
                    rampz = in(reg) (at >> 16) as u8,
                    out = out(reg) *byte,
                    in("Z") at as u16,
                    options(nostack, readonly),
                );
            }
        }
    }
}
