use anyhow::Result;
use otto80_core::{Cpu8080, Disassembler};

/// Print a disassembly listing of a program image to stdout.
pub fn disassemble(image: &[u8]) -> Result<()> {
    let mut disasm = Disassembler::new(image);
    while disasm.has_content() {
        println!("{}", disasm.next_line()?);
    }
    Ok(())
}

/// Execute a program image until the CPU halts.
pub fn run(image: &[u8]) -> Result<()> {
    let mut cpu = Cpu8080::new();
    cpu.load_image(image);
    cpu.run()?;
    log::info!("halted at {:#06x}", cpu.pc);
    Ok(())
}
