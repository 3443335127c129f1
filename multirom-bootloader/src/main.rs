// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

#![no_std]
#![no_main]
#![feature(asm_experimental_arch)]

mod config;
#[cfg(feature = "softdebug")]
mod console;
mod hal;

use avr_device::atmega1284p::Peripherals;
use embedded_hal::delay::DelayNs;
use hal::{cpu, gpio};
use hal::{BusyDelay, DataOrder, Eeprom, FlashChipSelect, SelfProgram, Signals, Spi, SpiClock, SpiMode};
use multirom_common::{BootOutcome, Bootloader, ProgramMemory, SpiFlash};
use panic_halt as _;

/// Settle time for the boot-select pull-up before sampling it.
const SELECT_SETTLE_US: u32 = 10;

#[avr_device::entry]
fn main() -> ! {
    // Interrupts stay disabled for the whole boot: the vector table they
    // would dispatch through may be rewritten.
    let Some(dp) = Peripherals::take() else {
        loop {}
    };

    let flags = cpu::take_reset_flags(&dp.CPU, &dp.WDT);
    gpio::init(&dp.PORTC);
    BusyDelay.delay_us(SELECT_SETTLE_US);
    let mut signals = Signals::new(flags, gpio::select_asserted(&dp.PORTC));

    // SST25VF010A: mode 0, MSB first, fCPU/2.
    let spi = Spi::new(
        dp.SPI,
        &dp.PORTB,
        DataOrder::MsbFirst,
        SpiMode::Mode0,
        SpiClock::Div4,
        true,
    );
    let staging = SpiFlash::new(spi, FlashChipSelect::new(dp.PORTC), BusyDelay);

    let mut loader = Bootloader::new(
        staging,
        SelfProgram::new(dp.CPU),
        Eeprom::new(dp.EEPROM),
        BusyDelay,
    );
    let outcome = loader.run(&mut signals);

    #[cfg(feature = "softdebug")]
    {
        let mut console = console::Console::new(dp.USART1);
        let _ = console::print_outcome(&mut console, &outcome);
        console.flush();
    }

    match outcome {
        BootOutcome::Reset(_) => cpu::reset(&dp.WDT),
        BootOutcome::Start(_) => {
            let (_, mut spm, _, _) = loader.release();
            spm.enable_rww();
            unsafe { cpu::start_application() }
        }
    }
}
