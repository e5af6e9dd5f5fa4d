use correios::{normalize, PackageSpec, Shape};
use proptest::prelude::*;

fn shape_strategy() -> impl Strategy<Value = Shape> {
    prop_oneof![Just(Shape::Box), Just(Shape::Roll), Just(Shape::Envelope)]
}

fn package_strategy() -> impl Strategy<Value = PackageSpec> {
    (
        shape_strategy(),
        0.0f64..500.0,
        0.0f64..500.0,
        0.0f64..500.0,
        0.0f64..500.0,
        0.0f64..500.0,
    )
        .prop_map(|(shape, weight_kg, length, width, height, diameter)| PackageSpec {
            shape,
            weight_kg,
            length,
            width,
            height,
            diameter,
        })
}

fn integral_package_strategy() -> impl Strategy<Value = PackageSpec> {
    (shape_strategy(), 0u32..400, 0u32..400, 0u32..400, 0u32..400).prop_map(
        |(shape, length, width, height, diameter)| PackageSpec {
            shape,
            weight_kg: 1.0,
            length: f64::from(length),
            width: f64::from(width),
            height: f64::from(height),
            diameter: f64::from(diameter),
        },
    )
}

proptest! {
    #[test]
    fn normalize_is_idempotent(spec in package_strategy()) {
        let once = normalize(&spec);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalized_package_fits_its_shape(spec in package_strategy()) {
        let result = normalize(&spec);

        prop_assert!(result.weight_kg >= 0.3);
        match result.shape {
            Shape::Box => {
                prop_assert!(result.weight_kg <= 30.0);
                prop_assert_eq!(result.diameter, 0.0);
                prop_assert!((16.0..=105.0).contains(&result.length));
                prop_assert!((11.0..=105.0).contains(&result.width));
                prop_assert!((2.0..=105.0).contains(&result.height));
                prop_assert!(result.length + result.width + result.height <= 200.0);
            }
            Shape::Roll => {
                prop_assert!(result.weight_kg <= 30.0);
                prop_assert_eq!(result.width, 0.0);
                prop_assert_eq!(result.height, 0.0);
                prop_assert!((18.0..=105.0).contains(&result.length));
                prop_assert!((5.0..=91.0).contains(&result.diameter));
                prop_assert!(result.length + 2.0 * result.diameter <= 200.0);
            }
            Shape::Envelope => {
                prop_assert!(result.weight_kg <= 1.0);
                prop_assert_eq!(result.height, 0.0);
                prop_assert_eq!(result.diameter, 0.0);
                prop_assert!((16.0..=60.0).contains(&result.length));
                prop_assert!((11.0..=60.0).contains(&result.width));
            }
        }
    }

    #[test]
    fn integral_dimensions_stay_integral(spec in integral_package_strategy()) {
        let result = normalize(&spec);

        for value in [result.length, result.width, result.height, result.diameter] {
            prop_assert_eq!(value.fract(), 0.0);
        }
    }
}

#[test]
fn test_box_boundary() {
    let input = PackageSpec {
        shape: Shape::Box,
        weight_kg: 200.0,
        length: 200.0,
        width: 200.0,
        height: 200.0,
        diameter: 200.0,
    };

    let result = normalize(&input);
    assert_eq!(result.weight_kg, 30.0);
    assert_eq!(result.diameter, 0.0);
    assert_eq!((result.length, result.width, result.height), (66.0, 66.0, 66.0));
}

#[test]
fn test_roll_boundary() {
    let input = PackageSpec {
        shape: Shape::Roll,
        weight_kg: 0.15,
        length: 200.0,
        width: 200.0,
        height: 200.0,
        diameter: 200.0,
    };

    let result = normalize(&input);
    assert_eq!(result.weight_kg, 0.3);
    assert_eq!(result.diameter, 62.0);
    assert_eq!(result.length, 76.0);
    assert_eq!(result.width, 0.0);
    assert_eq!(result.height, 0.0);
}
