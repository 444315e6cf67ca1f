// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for servicedeck.
//!
//! Pure data and validation. No async, no I/O: everything that talks to the
//! backend or the screen goes through ports in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: validated `Service` values are only built by
//!   validation, never patched afterwards
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{
    NewService, Service, ServiceId, ServiceRecord, catalog::seed_catalog,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{GRID_GUTTER, Theme, Viewport};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn record(id: &str, title: Option<&str>) -> ServiceRecord {
        ServiceRecord {
            id: id.into(),
            title: title.map(Into::into),
            description: Some("desc".into()),
            created_at: None,
            updated_at: None,
        }
    }

    // ========================================================================
    // Service Tests
    // ========================================================================

    #[test]
    fn record_with_title_validates() {
        let service = record("a1", Some("Amplify")).into_service().unwrap();

        assert_eq!(service.id().as_str(), "a1");
        assert_eq!(service.title(), "Amplify");
        assert_eq!(service.description(), "desc");
    }

    #[test]
    fn record_without_title_is_rejected() {
        let err = record("a1", None).into_service().unwrap_err();

        assert!(matches!(
            err,
            DomainError::MissingRequiredField { field: "title", .. }
        ));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn record_with_blank_title_is_rejected() {
        assert!(matches!(
            record("a1", Some("   ")).into_service(),
            Err(DomainError::BlankField { .. })
        ));
    }

    #[test]
    fn missing_description_becomes_empty() {
        let mut raw = record("a1", Some("Cognito"));
        raw.description = None;

        assert_eq!(raw.into_service().unwrap().description(), "");
    }

    #[test]
    fn blank_id_is_rejected() {
        assert!(ServiceId::try_new("").is_err());
        assert!(ServiceId::from_str("  ").is_err());
        assert!(record("", Some("x")).into_service().is_err());
    }

    #[test]
    fn glyph_is_first_character() {
        let service = record("l1", Some("Location Service"))
            .into_service()
            .unwrap();
        assert_eq!(service.glyph(), 'L');

        let unicode = record("u1", Some("Ünicode")).into_service().unwrap();
        assert_eq!(unicode.glyph(), 'Ü');
    }

    #[test]
    fn glyph_does_not_skip_leading_whitespace() {
        let service = record("w1", Some(" Pinpoint")).into_service().unwrap();
        assert_eq!(service.glyph(), ' ');
    }

    #[test]
    fn draft_matches_listed_service_by_fields() {
        let draft = NewService::new("Amplify", "desc");
        let listed = DomainValidator::validate_record(record("a1", Some("Amplify"))).unwrap();
        let other = DomainValidator::validate_record(record("a2", Some("AppSync"))).unwrap();

        assert!(draft.matches(&listed));
        assert!(!draft.matches(&other));
    }

    #[test]
    fn record_deserializes_from_camel_case() {
        let raw: ServiceRecord = serde_json::from_str(
            r#"{"id":"x","title":"AppSync","description":null,"createdAt":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(raw.title.as_deref(), Some("AppSync"));
        assert!(raw.created_at.is_some());
        assert!(raw.updated_at.is_none());
    }

    // ========================================================================
    // Listing Validation Tests
    // ========================================================================

    #[test]
    fn listing_keeps_server_order_and_reports_rejects() {
        let (services, rejected) = DomainValidator::validate_listing(vec![
            record("b", Some("Beta")),
            record("x", None),
            record("a", Some("Alpha")),
        ]);

        let ids: Vec<_> = services.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(rejected.len(), 1);
    }

    #[test]
    fn listing_rejects_duplicate_ids() {
        let (services, rejected) = DomainValidator::validate_listing(vec![
            record("a", Some("First")),
            record("a", Some("Second")),
        ]);

        assert_eq!(services.len(), 1);
        assert_eq!(services[0].title(), "First");
        assert!(matches!(
            rejected[0],
            DomainError::DuplicateServiceId { .. }
        ));
    }

    // ========================================================================
    // Catalog Tests
    // ========================================================================

    #[test]
    fn seed_catalog_has_six_entries_in_order() {
        let catalog = seed_catalog();
        let titles: Vec<_> = catalog.iter().map(|s| s.title.as_str()).collect();

        assert_eq!(
            titles,
            [
                "Amplify",
                "AppSync",
                "Cognito",
                "Pinpoint",
                "Location Service",
                "Device Farm"
            ]
        );
    }

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn theme_parses_correctly() {
        assert_eq!(Theme::from_str("dark").unwrap(), Theme::Dark);
        assert_eq!(Theme::from_str("LIGHT").unwrap(), Theme::Light);
        assert!(Theme::from_str("sepia").is_err());
    }

    #[test]
    fn dark_theme_uses_dark_background() {
        assert_eq!(Theme::Dark.background(), "#232F3E");
        assert_eq!(Theme::Light.background(), "#FFFFFF");
    }

    #[test]
    fn card_width_is_half_viewport_minus_gutter() {
        let viewport = Viewport::try_new(390).unwrap();
        assert_eq!(viewport.card_width(), 171);
    }

    #[test]
    fn narrow_viewport_is_rejected() {
        assert!(Viewport::try_new(GRID_GUTTER * 2).is_err());
        assert!(Viewport::try_new(Viewport::MIN_WIDTH).is_ok());
    }
}
