// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! ATmega1284P backends for the bootloader core's hardware traits.

pub mod cpu;
pub mod delay;
pub mod eeprom;
pub mod gpio;
pub mod spi;
pub mod spm;

pub use cpu::Signals;
pub use delay::BusyDelay;
pub use eeprom::Eeprom;
pub use gpio::FlashChipSelect;
pub use spi::{DataOrder, Spi, SpiClock, SpiMode};
pub use spm::SelfProgram;
