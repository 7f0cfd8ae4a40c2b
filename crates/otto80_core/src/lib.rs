pub mod cpu;
pub mod disasm;
pub mod error;
pub mod opcodes;

pub use cpu::{Cpu8080, CpuConfig, Flags};
pub use disasm::Disassembler;
pub use error::{CoreError, Result};

/// Total addressable memory size (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;
