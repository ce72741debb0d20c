use attrition_artifacts::LoadedArtifacts;
use attrition_config::AttritionConfig;
use attrition_core::{FormDefaults, derive_form_defaults};

/// Shared read-only resources, loaded once at startup.
pub struct AppContext {
    pub artifacts: LoadedArtifacts,
    /// Initial form state derived from the defaults row.
    pub form_defaults: FormDefaults,
}

impl AppContext {
    /// Load both artifacts named by `config`. Fails before any command runs if
    /// either is missing or unreadable.
    pub fn init(config: &AttritionConfig) -> anyhow::Result<Self> {
        let artifacts = attrition_artifacts::load(
            &config.artifacts.pipeline_path,
            &config.artifacts.defaults_path,
        )?;

        if let Some(shim) = artifacts.shim {
            tracing::info!(shim, "pipeline artifact loaded through a compatibility shim");
        }

        let form_defaults = derive_form_defaults(&artifacts.defaults);

        Ok(Self {
            artifacts,
            form_defaults,
        })
    }

    /// Load from explicit paths, for tests and tooling.
    #[cfg(test)]
    pub fn from_paths(
        pipeline: impl Into<std::path::PathBuf>,
        defaults: impl Into<std::path::PathBuf>,
    ) -> anyhow::Result<Self> {
        use anyhow::Context as _;

        let mut config = AttritionConfig::default();
        config
            .artifacts
            .apply_overrides(Some(pipeline.into()), Some(defaults.into()));
        Self::init(&config).context("failed to load model artifacts")
    }

    /// The bundled sample artifacts under `models/`.
    #[cfg(test)]
    pub fn sample() -> Self {
        let models = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models");
        Self::from_paths(
            models.join("attrition_pipeline.json"),
            models.join("defaults_row.csv"),
        )
        .expect("sample artifacts load")
    }
}
