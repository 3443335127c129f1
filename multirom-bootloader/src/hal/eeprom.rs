// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! On-chip EEPROM holding the boot configuration record.

use avr_device::atmega1284p::EEPROM;
use multirom_common::ConfigMemory;

const EECR_EERE: u8 = 1 << 0;
const EECR_EEPE: u8 = 1 << 1;

pub struct Eeprom {
    eeprom: EEPROM,
}

impl Eeprom {
    pub fn new(eeprom: EEPROM) -> Self {
        Self { eeprom }
    }

    fn busy(&self) -> bool {
        self.eeprom.eecr.read().bits() & EECR_EEPE != 0
    }

    fn wait_idle(&self) {
        while self.busy() {}
    }

    fn read_byte(&mut self, address: u16) -> u8 {
        self.wait_idle();
        unsafe {
            self.eeprom.eear.write(|w| w.bits(address));
            self.eeprom.eecr.write(|w| w.bits(EECR_EERE));
        }
        self.eeprom.eedr.read().bits()
    }

    fn write_byte(&mut self, address: u16, value: u8) {
        self.wait_idle();
        unsafe {
            self.eeprom.eear.write(|w| w.bits(address));
            self.eeprom.eedr.write(|w| w.bits(value));
            // EEMPE then EEPE within four cycles (EECR is I/O 0x1F).
            avr_device::interrupt::free(|_| {
                core::arch::asm!("sbi 0x1F, 2", "sbi 0x1F, 1");
            });
        }
    }
}

impl ConfigMemory for Eeprom {
    fn read(&mut self, address: u16, buf: &mut [u8]) {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_byte(address + i as u16);
        }
    }

    /// Cells already holding the right value are not rewritten.
    fn write(&mut self, address: u16, data: &[u8]) {
        for (i, &value) in data.iter().enumerate() {
            let at = address + i as u16;
            if self.read_byte(at) != value {
                self.write_byte(at, value);
            }
        }
        self.wait_idle();
    }
}
