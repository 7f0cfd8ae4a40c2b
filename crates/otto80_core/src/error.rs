use thiserror::Error;

/// Convenience alias for fallible core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Fatal faults raised by the interpreter and the disassembler.
///
/// Every variant is terminal: callers stop the run and surface the error
/// rather than retry. A clean HLT is not an error and never produces one
/// of these.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// An opcode with no installed handler was fetched. `pc` is the
    /// address the opcode was fetched from.
    #[error("undefined opcode {opcode:#04x} at {pc:#06x}")]
    UndefinedOpcode { pc: u16, opcode: u8 },

    /// PUSH/CALL/RST would have wrapped the stack pointer below zero.
    #[error("stack underflow at {pc:#06x} (sp = {sp:#06x})")]
    StackUnderflow { pc: u16, sp: u16 },

    /// The instruction stream ended in the middle of an instruction.
    #[error("instruction stream ended mid-instruction at {addr:#06x}")]
    UnexpectedEof { addr: u16 },

    /// The opcode table reported an instruction length outside 1..=3.
    #[error("opcode {opcode:#04x} has malformed length {len}")]
    MalformedInstruction { opcode: u8, len: u8 },
}
