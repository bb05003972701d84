//! Reference Bluetooth Mesh model catalog for meshcodec.
//!
//! Provides the Generic Level, Light CTL and Light CTL Setup message
//! families, the shared transition-time layouts, and small adapters for
//! values that carry more meaning than their integer form.

pub mod generic_level;
pub mod generics;
pub mod light_ctl;

use std::sync::OnceLock;

use schema::{Catalog, CatalogDef};

pub use generics::{StatusCode, StepResolution, TransitionTime};

/// `(layout, field path)` pairs holding a [`StatusCode`].
pub const STATUS_FIELDS: &[(&str, &str)] = &[(light_ctl::RANGE_STATUS_LAYOUT, "status")];

/// Authoring form of the reference catalog.
pub fn catalog_def() -> CatalogDef {
    let mut layouts = generics::layouts();
    layouts.extend(generic_level::layouts());
    layouts.extend(light_ctl::layouts());

    let mut variant_sets = generic_level::variant_sets();
    variant_sets.extend(light_ctl::variant_sets());

    CatalogDef {
        layouts,
        variant_sets,
        families: vec![
            generic_level::family(),
            light_ctl::family(),
            light_ctl::setup_family(),
        ],
    }
}

/// The compiled reference catalog, built on first use.
///
/// # Panics
///
/// Panics if the reference definitions fail validation, which the tests in
/// this crate rule out.
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| match Catalog::new(catalog_def()) {
        Ok(catalog) => catalog,
        Err(err) => panic!("reference catalog is invalid: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::Params;

    #[test]
    fn reference_catalog_builds() {
        let catalog = Catalog::new(catalog_def()).unwrap();
        assert_eq!(catalog.families().len(), 3);
        assert_eq!(catalog.messages().count(), 8 + 12 + 4);
    }

    #[test]
    fn catalog_is_shared() {
        assert!(std::ptr::eq(catalog(), catalog()));
    }

    #[test]
    fn opcode_ranges() {
        let catalog = catalog();
        for opcode in 0x8205..=0x820C {
            assert_eq!(catalog.dispatch(opcode).unwrap().family, generic_level::FAMILY);
        }
        for opcode in 0x825D..=0x8268 {
            assert_eq!(catalog.dispatch(opcode).unwrap().family, light_ctl::FAMILY);
        }
        for opcode in 0x8269..=0x826C {
            assert_eq!(catalog.dispatch(opcode).unwrap().family, light_ctl::SETUP_FAMILY);
        }
        assert!(catalog.dispatch(0x820D).is_none());
    }

    #[test]
    fn set_and_unacknowledged_share_params() {
        let catalog = catalog();
        let pairs = [
            (generic_level::GENERIC_LEVEL_SET, generic_level::GENERIC_LEVEL_SET_UNACKNOWLEDGED),
            (generic_level::GENERIC_DELTA_SET, generic_level::GENERIC_DELTA_SET_UNACKNOWLEDGED),
            (generic_level::GENERIC_MOVE_SET, generic_level::GENERIC_MOVE_SET_UNACKNOWLEDGED),
            (light_ctl::LIGHT_CTL_SET, light_ctl::LIGHT_CTL_SET_UNACKNOWLEDGED),
        ];
        for (ack, unack) in pairs {
            assert_eq!(
                catalog.dispatch(ack).unwrap().params,
                catalog.dispatch(unack).unwrap().params
            );
        }
    }

    #[test]
    fn layout_lengths() {
        let catalog = catalog();
        let len = |name: &str| catalog.layout_by_name(name).unwrap().byte_len;
        assert_eq!(len("GenericLevelSetMinimal"), 3);
        assert_eq!(len("GenericLevelSetOptional"), 5);
        assert_eq!(len("GenericDeltaSetOptional"), 7);
        assert_eq!(len("GenericLevelStatusOptional"), 5);
        assert_eq!(len("LightCTLSetOptional"), 9);
        assert_eq!(len("LightCTLRangeStatus"), 5);
    }

    #[test]
    fn status_fields_exist() {
        let catalog = catalog();
        for &(layout, path) in STATUS_FIELDS {
            let layout = catalog.layout_by_name(layout).unwrap();
            let idx = layout.field_index(path).unwrap();
            assert_eq!(layout.fields[idx].primitive, schema::PrimitiveType::UInt8);
        }
    }

    #[test]
    fn status_layout_nests_remaining_time() {
        let catalog = catalog();
        let Params::Variants(id) = catalog
            .dispatch(generic_level::GENERIC_LEVEL_STATUS)
            .unwrap()
            .params
        else {
            panic!("status has variants");
        };
        let optional = catalog.layout(catalog.variant_set(id).variants[0].layout);
        assert_eq!(optional.field_index("remaining_time.steps"), Some(3));
    }
}
