use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: otto80 <image> [disasm]");
        std::process::exit(2);
    };
    let mode = args.next().unwrap_or_default();

    log::info!("loading program image {}", path);
    let image = std::fs::read(&path)?;

    if mode == "disasm" {
        otto80::disassemble(&image)
    } else {
        otto80::run(&image)
    }
}
