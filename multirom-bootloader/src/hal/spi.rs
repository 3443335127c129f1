// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! SPI master on PORTB (SS PB4, MOSI PB5, MISO PB6, SCK PB7).

use avr_device::atmega1284p::{PORTB, SPI};
use core::convert::Infallible;

const SPCR_SPE: u8 = 1 << 6;
const SPCR_DORD: u8 = 1 << 5;
const SPCR_MSTR: u8 = 1 << 4;
const SPSR_SPIF: u8 = 1 << 7;
const SPSR_SPI2X: u8 = 1 << 0;

/// SS must stay an output for the SPI unit to remain master.
const DDRB_SPI_OUT: u8 = (1 << 4) | (1 << 5) | (1 << 7);

/// SPI data order
#[derive(Clone, Copy)]
pub enum DataOrder {
    MsbFirst,
    LsbFirst,
}

/// SPI mode configurations
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum SpiMode {
    Mode0 = 0x00, // CPOL=0, CPHA=0
    Mode1 = 0x04, // CPOL=0, CPHA=1
    Mode2 = 0x08, // CPOL=1, CPHA=0
    Mode3 = 0x0C, // CPOL=1, CPHA=1
}

/// SPI clock divider (SPR1:SPR0)
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum SpiClock {
    Div4 = 0,
    Div16 = 1,
    Div64 = 2,
    Div128 = 3,
}

pub struct Spi {
    spi: SPI,
}

impl Spi {
    pub fn new(
        spi: SPI,
        portb: &PORTB,
        order: DataOrder,
        mode: SpiMode,
        clock: SpiClock,
        double_speed: bool,
    ) -> Self {
        let dord = match order {
            DataOrder::MsbFirst => 0,
            DataOrder::LsbFirst => SPCR_DORD,
        };

        unsafe {
            portb.ddrb.modify(|r, w| w.bits(r.bits() | DDRB_SPI_OUT));
            spi.spcr
                .write(|w| w.bits(SPCR_SPE | SPCR_MSTR | dord | mode as u8 | clock as u8));
            spi.spsr
                .write(|w| w.bits(if double_speed { SPSR_SPI2X } else { 0 }));
        }

        Self { spi }
    }

    /// Exchange one byte.
    fn exchange(&mut self, byte: u8) -> u8 {
        unsafe {
            self.spi.spdr.write(|w| w.bits(byte));
        }
        while self.spi.spsr.read().bits() & SPSR_SPIF == 0 {}
        self.spi.spdr.read().bits()
    }
}

impl embedded_hal::spi::ErrorType for Spi {
    type Error = Infallible;
}

impl embedded_hal::spi::SpiBus<u8> for Spi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words {
            *word = self.exchange(0x00);
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for &word in words {
            self.exchange(word);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        for i in 0..read.len().max(write.len()) {
            let byte = self.exchange(write.get(i).copied().unwrap_or(0x00));
            if let Some(slot) = read.get_mut(i) {
                *slot = byte;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words {
            *word = self.exchange(*word);
        }
        Ok(())
    }

    /// Every exchange waits for SPIF, so nothing is ever in flight.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
