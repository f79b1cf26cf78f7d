use anyhow::Context;
use chj_logo::LogoConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = LogoConfig::default();
    chj_logo::generate_logo(&config)
        .with_context(|| format!("failed to generate {}", config.output_path.display()))?;
    Ok(())
}
