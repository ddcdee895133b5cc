use crate::config::{LogoConfig, PlaceholderSpec};
use crate::decode::decode_logo;
use crate::error::PrepareError;
use crate::placeholder::synthesize_placeholder;
use quittance_traits::AssetSource;
use quittance_types::{LogoOrigin, ResolvedImage};
use std::sync::Arc;
use std::time::Duration;

/// Diagnostic view of what [`LogoResolver::resolve`] will return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoStatus {
    Canonical,
    Placeholder { reason: Option<String> },
}

/// Hands out logo pixels that are always ready for immediate placement.
///
/// A resolver is created by one of the `prepare*` constructors, which do all
/// loading and decoding up front. After that it is read-only and can be shared
/// freely between threads; [`resolve`](Self::resolve) never blocks and never fails.
#[derive(Debug, Clone)]
pub struct LogoResolver {
    prepared: Option<ResolvedImage>,
    placeholder: PlaceholderSpec,
    fallback_reason: Option<String>,
}

impl LogoResolver {
    /// A resolver that always draws the placeholder mark.
    pub fn placeholder_only(spec: PlaceholderSpec) -> Self {
        Self {
            prepared: None,
            placeholder: spec,
            fallback_reason: None,
        }
    }

    /// A resolver around an already-decoded logo.
    pub fn with_image(image: ResolvedImage, spec: PlaceholderSpec) -> Self {
        Self {
            prepared: Some(image),
            placeholder: spec,
            fallback_reason: None,
        }
    }

    /// Decodes a logo that is already in memory, e.g. embedded with `include_bytes!`.
    pub fn from_encoded(name: &str, bytes: &[u8], spec: PlaceholderSpec) -> Self {
        match decode_logo(name, bytes) {
            Ok(image) => Self::with_image(image, spec),
            Err(err) => Self::fallback(spec, err),
        }
    }

    /// Loads and decodes the configured asset on the calling thread.
    ///
    /// Never fails: any problem is logged and yields a placeholder-mode resolver.
    pub fn prepare(source: &dyn AssetSource, config: &LogoConfig) -> Self {
        let outcome = match config.asset.as_deref() {
            Some(path) => load_and_decode(source, path),
            None => Err(PrepareError::NotConfigured),
        };
        Self::from_outcome(outcome, config.placeholder.clone(), source.name())
    }

    /// Like [`prepare`](Self::prepare), but runs the blocking load on tokio's
    /// blocking pool and gives up after `config.prepare_timeout_ms`.
    pub async fn prepare_async(source: Arc<dyn AssetSource>, config: LogoConfig) -> Self {
        let source_name = source.name();
        let Some(path) = config.asset.clone() else {
            return Self::from_outcome(Err(PrepareError::NotConfigured), config.placeholder, source_name);
        };

        let limit = Duration::from_millis(config.prepare_timeout_ms);
        let task = tokio::task::spawn_blocking(move || load_and_decode(source.as_ref(), &path));
        let outcome = match tokio::time::timeout(limit, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(PrepareError::Task(join_err.to_string())),
            Err(_) => Err(PrepareError::Timeout(config.prepare_timeout_ms)),
        };
        Self::from_outcome(outcome, config.placeholder, source_name)
    }

    fn from_outcome(
        outcome: Result<ResolvedImage, PrepareError>,
        spec: PlaceholderSpec,
        source_name: &str,
    ) -> Self {
        match outcome {
            Ok(image) => {
                log::info!(
                    "Prepared logo from {} ({:?}, {}x{}, {} bytes)",
                    source_name,
                    image.format,
                    image.width,
                    image.height,
                    image.byte_len()
                );
                Self::with_image(image, spec)
            }
            Err(err) => Self::fallback(spec, err),
        }
    }

    fn fallback(spec: PlaceholderSpec, err: PrepareError) -> Self {
        match err {
            PrepareError::NotConfigured => log::info!("No logo asset configured; using placeholder mark"),
            ref other => log::warn!("Falling back to placeholder logo: {}", other),
        }
        Self {
            prepared: None,
            placeholder: spec,
            fallback_reason: Some(err.to_string()),
        }
    }

    /// Returns logo pixels ready for placement.
    ///
    /// The prepared logo is returned as a cheap clone. In placeholder mode the
    /// mark is drawn right here, which is a bounded in-memory computation.
    pub fn resolve(&self) -> ResolvedImage {
        match &self.prepared {
            Some(image) => image.clone(),
            None => {
                log::debug!("Drawing placeholder logo mark '{}'", self.placeholder.mark.mark());
                synthesize_placeholder(&self.placeholder)
            }
        }
    }

    pub fn origin(&self) -> LogoOrigin {
        if self.prepared.is_some() {
            LogoOrigin::Canonical
        } else {
            LogoOrigin::Placeholder
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.prepared.is_none()
    }

    pub fn status(&self) -> LogoStatus {
        match &self.prepared {
            Some(_) => LogoStatus::Canonical,
            None => LogoStatus::Placeholder {
                reason: self.fallback_reason.clone(),
            },
        }
    }

    pub fn placeholder_spec(&self) -> &PlaceholderSpec {
        &self.placeholder
    }
}

fn load_and_decode(source: &dyn AssetSource, path: &str) -> Result<ResolvedImage, PrepareError> {
    let bytes = source.load(path)?;
    decode_logo(path, &bytes)
}
