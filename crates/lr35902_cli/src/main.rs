use lr35902_cli::RunConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = RunConfig::from_args(std::env::args().skip(1))?;
    log::info!("Running ROM path: '{}'", config.rom_path.display());
    lr35902_cli::run(&config)?;
    Ok(())
}
