//! Startup wiring shared by the binaries.

use anyhow::Context;
use shelf_import::ImportFormat;
use shelf_kernel::LibrarySettings;

use crate::modules::LendingService;

/// Import the configured seed file into `service`.
///
/// Returns how many stock entries were applied; zero when no seed file is
/// configured. `seed_format` wins over the file extension.
pub fn seed(service: &mut LendingService, library: &LibrarySettings) -> anyhow::Result<usize> {
    let Some(path) = &library.seed_path else {
        return Ok(0);
    };

    let format = library
        .seed_format
        .as_deref()
        .map(str::parse::<ImportFormat>)
        .transpose()
        .with_context(|| "invalid library.seed_format")?;

    let entries = shelf_import::read_file(path, format)
        .with_context(|| format!("failed to import seed stock from '{}'", path.display()))?;
    let applied = service
        .ingest(entries.into_iter().map(<(String, u32)>::from))
        .with_context(|| format!("failed to apply seed stock from '{}'", path.display()))?;

    tracing::info!(target: "shelf::bootstrap", path = %path.display(), applied, "catalog seeded");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_kernel::Settings;

    #[test]
    fn without_seed_path_nothing_is_imported() {
        let mut service = LendingService::new();
        let applied = seed(&mut service, &LibrarySettings::default()).unwrap();

        assert_eq!(applied, 0);
        assert!(service.catalog().is_empty());
    }

    #[test]
    fn relative_seed_path_is_read_from_the_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            "[library]\nseed_path = \"stock.json\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("stock.json"),
            r#"[{"title": "Dune", "total_copies": 2}, {"title": "1984", "total_copies": 1}]"#,
        )
        .unwrap();

        let settings = Settings::load_from(dir.path(), "local").unwrap();
        let mut service = LendingService::new();
        let applied = seed(&mut service, &settings.library).unwrap();

        assert_eq!(applied, 2);
        assert_eq!(service.search("Dune").unwrap().record.total, 2);
    }

    #[test]
    fn seed_format_overrides_the_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.txt");
        std::fs::write(&path, "title,total_copies\nHobbit,3\n").unwrap();

        let library = LibrarySettings {
            seed_path: Some(path),
            seed_format: Some("CSV".to_string()),
        };
        let mut service = LendingService::new();
        seed(&mut service, &library).unwrap();

        assert_eq!(service.search("Hobbit").unwrap().record.available, 3);
    }

    #[test]
    fn unsupported_seed_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.json");
        std::fs::write(&path, "[]").unwrap();

        let library = LibrarySettings {
            seed_path: Some(path),
            seed_format: Some("yaml".to_string()),
        };
        let mut service = LendingService::new();
        let err = seed(&mut service, &library).unwrap_err();

        assert!(err.to_string().contains("invalid library.seed_format"));
        assert!(service.catalog().is_empty());
    }

    #[test]
    fn missing_seed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let library = LibrarySettings {
            seed_path: Some(dir.path().join("absent.json")),
            seed_format: None,
        };
        let err = seed(&mut LendingService::new(), &library).unwrap_err();

        assert!(err.to_string().contains("absent.json"));
    }
}
