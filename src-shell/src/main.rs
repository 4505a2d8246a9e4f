use anyhow::Context;
use veil_core::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    veil_core::init_logging();

    let config = match std::env::var("VEIL_CONFIG") {
        Ok(path) => Config::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        Err(_) => Config::default(),
    };

    let voice_enabled = !matches!(
        std::env::var("VEIL_VOICE").as_deref(),
        Ok("off") | Ok("0") | Ok("false")
    );

    veil_lib::run(config, voice_enabled).await
}
