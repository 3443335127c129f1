// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! PORTC pins: external flash chip select and the boot-select input.

use crate::config::{FLASH_CS_PIN, SELECT_PIN};
use avr_device::atmega1284p::PORTC;
use core::convert::Infallible;

const CS_MASK: u8 = 1 << FLASH_CS_PIN;
const SELECT_MASK: u8 = 1 << SELECT_PIN;

/// Drive the chip select high (deselected) and make it an output; enable the
/// pull-up on the boot-select input.
pub fn init(portc: &PORTC) {
    unsafe {
        portc.portc.modify(|r, w| w.bits(r.bits() | CS_MASK | SELECT_MASK));
        portc.ddrc.modify(|r, w| w.bits((r.bits() | CS_MASK) & !SELECT_MASK));
    }
}

/// `true` while the boot-select input is pulled low.
pub fn select_asserted(portc: &PORTC) -> bool {
    portc.pinc.read().bits() & SELECT_MASK == 0
}

/// Chip select of the SST25 staging flash (PC3).
pub struct FlashChipSelect {
    portc: PORTC,
}

impl FlashChipSelect {
    pub fn new(portc: PORTC) -> Self {
        init(&portc);
        Self { portc }
    }
}

impl embedded_hal::digital::ErrorType for FlashChipSelect {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for FlashChipSelect {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        unsafe {
            self.portc.portc.modify(|r, w| w.bits(r.bits() & !CS_MASK));
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        unsafe {
            self.portc.portc.modify(|r, w| w.bits(r.bits() | CS_MASK));
        }
        Ok(())
    }
}
