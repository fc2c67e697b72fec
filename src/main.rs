use anyhow::Result;
use is_terminal::IsTerminal;
use std::io;

fn main() -> Result<()> {
    let args = genecross::args::parsed();
    if io::stdout().is_terminal() {
        genecross::run(&args, io::stdout().lock())?;
    } else {
        genecross::run(&args, io::BufWriter::new(io::stdout().lock()))?;
    }
    Ok(())
}
