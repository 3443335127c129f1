// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Polled debug console on USART1, only built with `softdebug`.

use crate::config::{CONSOLE_BAUD, CPU_FREQ_HZ};
use avr_device::atmega1284p::USART1;
use core::convert::Infallible;
use multirom_common::{BootOutcome, BootReport, InstallReport, LoadReport};
use ufmt::{uwrite, uwriteln};

const UCSRA_UDRE: u8 = 1 << 5;
const UCSRA_TXC: u8 = 1 << 6;
const UCSRB_TXEN: u8 = 1 << 3;
/// 8 data bits, no parity, 1 stop bit.
const UCSRC_8N1: u8 = 0x06;
const UBRR: u16 = (CPU_FREQ_HZ / (16 * CONSOLE_BAUD) - 1) as u16;

pub struct Console {
    usart: USART1,
    sent: bool,
}

impl Console {
    pub fn new(usart: USART1) -> Self {
        unsafe {
            usart.ubrr1.write(|w| w.bits(UBRR));
            usart.ucsr1c.write(|w| w.bits(UCSRC_8N1));
            usart.ucsr1b.write(|w| w.bits(UCSRB_TXEN));
        }
        Self { usart, sent: false }
    }

    fn write_byte(&mut self, byte: u8) {
        while self.usart.ucsr1a.read().bits() & UCSRA_UDRE == 0 {}
        unsafe {
            // TXC is cleared by writing a one.
            self.usart.ucsr1a.write(|w| w.bits(UCSRA_TXC));
            self.usart.udr1.write(|w| w.bits(byte));
        }
        self.sent = true;
    }

    /// Wait until the last byte has left the shift register, before control
    /// is handed over.
    pub fn flush(&mut self) {
        if self.sent {
            while self.usart.ucsr1a.read().bits() & UCSRA_TXC == 0 {}
        }
    }
}

impl ufmt::uWrite for Console {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
        Ok(())
    }
}

pub fn print_outcome(console: &mut Console, outcome: &BootOutcome) -> Result<(), Infallible> {
    match outcome {
        BootOutcome::Reset(_) => uwriteln!(console, "multirom: invalid config, resetting"),
        BootOutcome::Start(report) => print_report(console, report),
    }
}

fn print_report(console: &mut Console, report: &BootReport) -> Result<(), Infallible> {
    uwriteln!(console, "multirom: mode {}", report.mode as u8)?;
    match report.load {
        LoadReport::Idle => {}
        LoadReport::Loaded { slot, pages } => {
            uwriteln!(console, "  loaded slot {} ({} pages)", slot, pages)?
        }
        LoadReport::Failed { slot, .. } => uwriteln!(console, "  load into slot {} FAILED", slot)?,
    }
    match report.install {
        InstallReport::Kept => {}
        InstallReport::Installed { slot, patched, .. } => {
            uwriteln!(console, "  vectors of slot {} installed, {} patched", slot, patched)?
        }
        InstallReport::Deferred { slot } => {
            uwriteln!(console, "  vectors of slot {} deferred", slot)?
        }
        InstallReport::Failed { slot, .. } => {
            uwriteln!(console, "  vectors of slot {} FAILED", slot)?
        }
    }
    uwrite!(console, "  starting slot {}\r\n", report.slot)
}
