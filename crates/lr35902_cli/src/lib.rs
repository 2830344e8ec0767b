use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use lr35902::{Cartridge, GameBoy, RunSummary};
use typed_builder::TypedBuilder;

/// How a ROM should be run.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RunConfig {
    #[builder(setter(into))]
    pub rom_path: PathBuf,
    #[builder(default = 1_000_000)]
    pub max_steps: u64,
    #[builder(default = 0x0100)]
    pub entry_point: u16,
}

impl RunConfig {
    /// Build a config from `<rom> [max-steps] [entry-point-hex]`.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let Some(rom_path) = args.next() else {
            bail!("usage: lr35902 <rom> [max-steps] [entry-point-hex]");
        };
        let mut config = RunConfig::builder()
            .rom_path(rom_path.as_ref())
            .build();

        if let Some(steps) = args.next() {
            let steps = steps.as_ref();
            config.max_steps = steps
                .parse()
                .with_context(|| format!("invalid step count '{steps}'"))?;
        }
        if let Some(entry) = args.next() {
            config.entry_point = parse_hex_u16(entry.as_ref())?;
        }
        if args.next().is_some() {
            bail!("too many arguments");
        }
        Ok(config)
    }
}

fn parse_hex_u16(text: &str) -> Result<u16> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16).with_context(|| format!("invalid entry point '{text}'"))
}

pub fn load_rom(path: &Path) -> Result<Cartridge> {
    let rom = std::fs::read(path)
        .with_context(|| format!("failed to read ROM file '{}'", path.display()))?;
    let cartridge = Cartridge::from_rom(rom);
    log::info!(
        "Loaded '{}': {} bytes, {:?}",
        path.display(),
        cartridge.len(),
        cartridge.rom_type()
    );
    Ok(cartridge)
}

/// Load the ROM, start at the entry point and step until halt or the step
/// budget runs out.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let cartridge = load_rom(&config.rom_path)?;
    let mut gb = GameBoy::new(cartridge);
    gb.cpu.regs.pc = config.entry_point;

    let summary = gb
        .run(config.max_steps)
        .with_context(|| format!("execution failed at PC=0x{:04X}", gb.cpu.regs.pc))?;
    log::info!(
        "{:?} after {} steps, {} cycles; PC=0x{:04X} AF=0x{:04X} BC=0x{:04X} DE=0x{:04X} HL=0x{:04X} SP=0x{:04X}",
        summary.reason,
        summary.steps,
        summary.cycles,
        gb.cpu.regs.pc,
        gb.cpu.regs.af(),
        gb.cpu.regs.bc(),
        gb.cpu.regs.de(),
        gb.cpu.regs.hl(),
        gb.cpu.regs.sp,
    );
    Ok(summary)
}
