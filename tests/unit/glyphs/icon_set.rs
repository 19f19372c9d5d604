use super::*;

const SQUARE_SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10">
  <rect x="0" y="0" width="10" height="10" fill="#000"/>
</svg>"##;

#[test]
fn builtin_sets_produce_coverage() {
    let size = SurfaceSize::new(300, 300);
    for art in [IconArt::Supplier, IconArt::Warehouse] {
        let mask = art.rasterize(size).unwrap();
        assert_eq!(mask.width, 300);
        assert_eq!(mask.height, 300);
        let n = mask.count_above(40);
        assert!(n > 1_000, "{art:?} produced only {n} opaque pixels");
        // Coverage stays inside the ring's bounding area plus icon overhang.
        assert_eq!(mask.get(0, 0), 0);
        assert_eq!(mask.get(299, 299), 0);
    }
}

#[test]
fn supplier_and_warehouse_differ() {
    let size = SurfaceSize::new(200, 200);
    let a = IconArt::Supplier.rasterize(size).unwrap();
    let b = IconArt::Warehouse.rasterize(size).unwrap();
    assert_ne!(a.alpha, b.alpha);
}

#[test]
fn rasterization_is_stable_for_a_fixed_size() {
    let size = SurfaceSize::new(240, 180);
    let a = IconArt::Warehouse.rasterize(size).unwrap().count_above(40);
    let b = IconArt::Warehouse.rasterize(size).unwrap().count_above(40);
    assert_eq!(a, b);
}

#[test]
fn none_set_yields_empty_mask() {
    let mask = IconArt::None.rasterize(SurfaceSize::new(50, 40)).unwrap();
    assert_eq!(mask.count_above(0), 0);
    assert!(IconArt::None.is_none());
}

#[test]
fn zero_area_rasterization_fails_fast() {
    assert!(IconArt::Supplier.rasterize(SurfaceSize::new(0, 0)).is_err());
    assert!(IconArt::None.rasterize(SurfaceSize::new(0, 10)).is_err());
}

#[test]
fn svg_silhouette_is_fitted_and_centered() {
    let art = IconArt::from_svg_bytes(SQUARE_SVG).unwrap();
    let mask = art.rasterize(SurfaceSize::new(100, 50)).unwrap();
    // 0.8 * 50 = 40px square centered at (50, 25).
    assert!(mask.get(50, 25) > 200);
    assert_eq!(mask.get(10, 25), 0);
    let n = mask.count_above(40);
    assert!((1_500..=1_700).contains(&n), "n={n}");
}

#[test]
fn icon_set_json_forms() {
    let set: IconSet = serde_json::from_str(r#""warehouse""#).unwrap();
    assert_eq!(set, IconSet::Warehouse);
    let set: IconSet = serde_json::from_str(r#"{"svg":{"path":"logo.svg"}}"#).unwrap();
    assert_eq!(
        set,
        IconSet::Svg {
            path: PathBuf::from("logo.svg")
        }
    );
}

#[test]
fn missing_svg_file_is_an_error() {
    let set = IconSet::Svg {
        path: PathBuf::from("definitely/not/here.svg"),
    };
    assert!(IconArt::load(&set, Path::new(".")).is_err());
}
