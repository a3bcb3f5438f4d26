//! # Detector Selection
//!
//! The selector lowercases the detector identity and checks it against a
//! registry of independent substring fragments. Unmatched identities are
//! not an error for the selector; the provider decides whether a missing
//! channel map is fatal.

#[cfg(test)]
mod tests {
    use crate::fixtures::{config_for, reference_detector, source_with};
    use geo_channel_map::{
        ChannelMapAlg, ChannelMapVariant, ConfigError, ExperimentHelper, GeometryApi,
        GeometryConfig, GeometryError, GeometryProvider, StandardGeometryHelper,
        SyntheticDetector, STANDARD_DETECTORS,
    };
    use std::sync::Arc;

    #[test]
    fn test_known_detector_gets_channel_map() {
        let helper = StandardGeometryHelper::new();
        let hierarchy = reference_detector().hierarchy("microboone");

        let selection = helper
            .configure("microboone", &GeometryConfig::default(), &hierarchy)
            .unwrap()
            .expect("microboone is a standard detector");

        assert_eq!(selection.variant, "standard");
        assert_eq!(selection.channel_map.channel_count().unwrap(), 60);
        assert_eq!(selection.geometry.n_wires(), 60);
    }

    #[test]
    fn test_unknown_detector_gets_nothing() {
        let helper = StandardGeometryHelper::new();
        let hierarchy = reference_detector().hierarchy("unknown-detector-xyz");

        let selection = helper
            .configure("unknown-detector-xyz", &GeometryConfig::default(), &hierarchy)
            .unwrap();
        assert!(selection.is_none());
    }

    #[test]
    fn test_identity_match_is_case_insensitive_substring() {
        let helper = StandardGeometryHelper::new();

        for name in STANDARD_DETECTORS {
            assert_eq!(helper.select(name), Some(ChannelMapVariant::Standard));
        }
        assert_eq!(helper.select("MicroBooNE_v2"), Some(ChannelMapVariant::Standard));
        assert_eq!(helper.select("icarus-t600"), Some(ChannelMapVariant::Standard));
        // Fragments are independent: "bo" matches anywhere
        assert_eq!(helper.select("robot"), Some(ChannelMapVariant::Standard));
        assert_eq!(helper.select("dune10kt"), None);
        assert_eq!(helper.select(""), None);
    }

    #[test]
    fn test_unsupported_detector_fails_provider_start() {
        let source = source_with([("dune10kt", reference_detector())]);

        let err = GeometryProvider::start(config_for("dune10kt"), source).err().unwrap();
        match err {
            GeometryError::LoadFailed { detector, source, .. } => {
                assert_eq!(detector, "dune10kt");
                assert!(matches!(
                    *source,
                    GeometryError::Configuration(ConfigError::UnsupportedDetector { .. })
                ));
            }
            other => panic!("expected LoadFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_detector_without_channel_map() {
        let source = source_with([("dune10kt", reference_detector())]);
        let config = GeometryConfig {
            require_channel_map: false,
            ..config_for("dune10kt")
        };

        let provider = GeometryProvider::start(config, source).unwrap();
        let loaded = provider.current().unwrap();

        assert!(loaded.geometry.is_none());
        assert!(loaded.channel_map.is_none());
        assert!(matches!(
            provider.channel_map(),
            Err(GeometryError::NoChannelMap { .. })
        ));
        assert_eq!(provider.detector_name().as_deref(), Some("dune10kt"));
    }

    #[test]
    fn test_custom_registry_through_provider() {
        let source = source_with([("dune10kt", SyntheticDetector::new().with_wires_per_plane(4))]);
        let helper = StandardGeometryHelper::with_registry([(
            "DUNE".to_string(),
            ChannelMapVariant::Standard,
        )]);
        let provider =
            GeometryProvider::with_helper(config_for("dune10kt"), source, Arc::new(helper))
                .unwrap();

        provider
            .load_geometry(provider.config().initial_description())
            .unwrap();
        assert_eq!(provider.channel_map().unwrap().channel_count().unwrap(), 12);
    }
}
