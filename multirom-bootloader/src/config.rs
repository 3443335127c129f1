// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Board configuration.

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// Top of SRAM, loaded into SP before jumping to a slot.
pub const RAMEND: u16 = 0x40FF;

/// Start of the boot section; the bootloader is linked here.
pub const BOOT_START: u32 = 0x1_E000;

/// Self-programming page size in bytes.
pub const SPM_PAGESIZE: usize = 256;

/// Interrupt vector table size in bytes (35 vectors of 4 bytes).
pub const VECTORS_SIZE: usize = 140;

/// External flash chip select (PC3, active low).
pub const FLASH_CS_PIN: u8 = 3;

/// Boot-select input (PC2, active low with pull-up).
pub const SELECT_PIN: u8 = 2;

/// Debug console baud rate on USART1.
#[cfg(feature = "softdebug")]
pub const CONSOLE_BAUD: u32 = 19_200;
