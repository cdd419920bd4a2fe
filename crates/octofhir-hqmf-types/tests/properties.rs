//! Property-based tests for value normalization

use octofhir_hqmf_types::{
    INVERSIONS, Interval, Quantity, QuantityValue, SubsetOperatorType, SubsetSelector,
    TemporalRelationship, TemporalRelationshipType,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn relationship_type() -> impl Strategy<Value = TemporalRelationshipType> {
    proptest::sample::select(TemporalRelationshipType::ALL.to_vec())
}

fn subset_type() -> impl Strategy<Value = SubsetOperatorType> {
    proptest::sample::select(SubsetOperatorType::ALL.to_vec())
}

fn decimal() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000, 0u32..6)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

proptest! {
    #[test]
    fn inverting_twice_is_identity(code in relationship_type()) {
        if let Some(inverse) = code.inverse() {
            prop_assert_eq!(inverse.inverse(), Some(code));
        }
    }

    #[test]
    fn inversion_table_covers_exactly_its_keys(code in relationship_type()) {
        let listed = INVERSIONS.iter().any(|(from, _)| *from == code);
        prop_assert_eq!(code.inverse().is_some(), listed);
    }

    #[test]
    fn relationship_code_parses_back(code in relationship_type()) {
        prop_assert_eq!(code.as_code().parse::<TemporalRelationshipType>().unwrap(), code);
    }

    #[test]
    fn high_only_offset_has_opposite_sign(value in decimal(), code in relationship_type()) {
        let range = Interval::default().with_high(Quantity::from_value(value));
        let rel = TemporalRelationship::new(code, None, Some(range.into())).unwrap();
        prop_assert_eq!(rel.offset().unwrap().value(), Some(&QuantityValue::from(-value)));
    }

    #[test]
    fn low_only_offset_keeps_sign(value in decimal()) {
        let range = Interval::default().with_low(Quantity::from_value(value));
        let rel =
            TemporalRelationship::new(TemporalRelationshipType::Eas, None, Some(range.into()))
                .unwrap();
        prop_assert_eq!(rel.offset().unwrap().value(), Some(&QuantityValue::from(value)));
    }

    #[test]
    fn subset_point_is_always_a_point_range(value in 0i64..1000, code in subset_type()) {
        let selector = SubsetSelector::new(code, Some(Quantity::from_value(value).into()));
        let range = selector.value().unwrap();
        prop_assert!(range.is_point());
        prop_assert_eq!(range.stringify().unwrap(), format!("={}", value));
    }

    #[test]
    fn quantity_survives_json(
        value in decimal(),
        unit in proptest::option::of("[a-z]{1,4}"),
        inclusive in any::<bool>(),
        derived in any::<bool>(),
    ) {
        let quantity = Quantity::new(
            Some("PQ".to_string()),
            unit,
            Some(value.into()),
            inclusive,
            derived,
            None,
        );
        let json = serde_json::to_value(&quantity).unwrap();
        let parsed: Quantity = serde_json::from_value(json).unwrap();
        prop_assert_eq!(parsed, quantity);
    }
}
