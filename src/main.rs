use anyhow::Context;
use shelf_app::{bootstrap, LendingService};
use shelf_kernel::settings::Settings;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load SHELF settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        seed = ?settings.library.seed_path,
        "shelf-app bootstrap starting"
    );

    let mut service = LendingService::new();
    bootstrap::seed(&mut service, &settings.library)?;

    for (title, record) in service.catalog().iter() {
        tracing::info!(
            %title,
            available = record.available,
            total = record.total,
            "catalog entry"
        );
    }

    tracing::info!(books = service.catalog().len(), "shelf-app bootstrap complete");
    Ok(())
}
