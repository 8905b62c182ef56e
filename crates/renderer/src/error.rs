/// Failure taxonomy for engine initialization.
///
/// All four variants are raised only from `Engine::init` and are
/// unrecoverable for that engine instance: there is no automatic
/// retry, and the embedder is expected to surface a fallback (or
/// construct a fresh engine) instead. Cloneable so the engine can park
/// the value in its `Failed` state while still returning it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InitError {
    /// The host lacks GPU rendering capability entirely.
    #[error("host reports no GPU rendering capability")]
    NoGpuSupport,
    /// Capability is present but no adapter was usable, either because
    /// none matched the surface or because the device request failed.
    /// The payload preserves the underlying reason.
    #[error("no usable GPU adapter: {0}")]
    NoAdapter(String),
    /// The surface cannot be configured for presentation.
    #[error("surface cannot be configured for presentation: {0}")]
    NoSurfaceContext(String),
    /// Shader compilation or pipeline layout validation failed.
    #[error("failed to construct render pipeline: {0}")]
    PipelineConstruction(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_failures_carry_the_underlying_reason() {
        let err = InitError::NoAdapter("device request refused by driver".into());
        assert!(err.to_string().contains("device request refused by driver"));
    }
}
