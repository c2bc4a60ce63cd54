use crate::image_pipeline::adjust::{AdjustmentParams, ColorMap, ToneCurve, gamma_lut, render};
use crate::image_pipeline::normalize::NormalizedCache;

fn mono_cache(width: usize, height: usize) -> NormalizedCache {
    NormalizedCache {
        width,
        height,
        channels: 1,
        buffer: (0..width * height).map(|i| (i * 7 % 256) as u8).collect(),
        source_min: 0.0,
        source_max: 255.0,
        stretched: false,
    }
}

#[test]
fn test_neutral_params_reproduce_normalized_values() {
    let cache = mono_cache(37, 23);
    let raster = render(&cache, &AdjustmentParams::default(), 1);

    assert_eq!((raster.width, raster.height), (37, 23));
    for y in 0..cache.height {
        for x in 0..cache.width {
            let v = cache.pixel(x, y)[0];
            assert_eq!(raster.pixel(x, y), [v, v, v, 255]);
        }
    }
}

#[test]
fn test_gamma_lut() {
    let identity = gamma_lut(1.0);
    assert!(identity.iter().enumerate().all(|(i, &v)| i == v as usize));

    let lut = gamma_lut(2.2);
    assert_eq!(lut[0], 0);
    assert_eq!(lut[255], 255);
    let expected = (255.0 * (128.0f64 / 255.0).powf(1.0 / 2.2)).round() as u8;
    assert_eq!(lut[128], expected);
    assert!(lut[128] > 128);
    assert!(lut.windows(2).all(|w| w[0] <= w[1]));

    let darker = gamma_lut(0.5);
    assert!(darker[128] < 128);
}

#[test]
fn test_invalid_gamma_is_identity() {
    assert_eq!(gamma_lut(0.0), gamma_lut(1.0));
    assert_eq!(gamma_lut(f64::NAN), gamma_lut(1.0));
    let params = AdjustmentParams {
        gamma: -3.0,
        ..AdjustmentParams::default()
    };
    assert!(ToneCurve::new(&params).is_identity());
}

#[test]
fn test_brightness_and_contrast() {
    let contrast = ToneCurve::new(&AdjustmentParams {
        contrast: 2.0,
        ..AdjustmentParams::default()
    });
    assert_eq!(contrast.apply(100), 72);
    assert_eq!(contrast.apply(128), 128);
    assert_eq!(contrast.apply(10), 0);
    assert_eq!(contrast.apply(250), 255);

    let brightness = ToneCurve::new(&AdjustmentParams {
        brightness: 20.0,
        ..AdjustmentParams::default()
    });
    assert_eq!(brightness.apply(100), 120);
    assert_eq!(brightness.apply(250), 255);
}

#[test]
fn test_black_and_white_points() {
    let tone = ToneCurve::new(&AdjustmentParams {
        black_point_pct: 10.0,
        white_point_pct: 90.0,
        ..AdjustmentParams::default()
    });
    assert_eq!(tone.apply(20), 0);
    assert_eq!(tone.apply(25), 0);
    assert_eq!(tone.apply(128), 128);
    assert_eq!(tone.apply(230), 255);

    // inverted points are ignored
    let inverted = ToneCurve::new(&AdjustmentParams {
        black_point_pct: 80.0,
        white_point_pct: 20.0,
        ..AdjustmentParams::default()
    });
    assert!(inverted.is_identity());
}

#[test]
fn test_preview_stride() {
    let cache = mono_cache(10, 7);
    let raster = render(&cache, &AdjustmentParams::default(), 4);

    assert_eq!((raster.width, raster.height, raster.stride), (3, 2, 4));
    assert_eq!(raster.pixels.len(), 3 * 2 * 4);
    let v = cache.pixel(4, 4)[0];
    assert_eq!(raster.pixel(1, 1), [v, v, v, 255]);
    let v = cache.pixel(8, 0)[0];
    assert_eq!(raster.pixel(2, 0), [v, v, v, 255]);
}

#[test]
fn test_zero_stride_means_full_resolution() {
    let cache = mono_cache(5, 5);
    assert_eq!(render(&cache, &AdjustmentParams::default(), 0).width, 5);
}

#[test]
fn test_color_maps() {
    assert_eq!(ColorMap::Grayscale.apply(77), [77, 77, 77]);
    assert_eq!(ColorMap::Heat.apply(0), [0, 0, 0]);
    assert_eq!(ColorMap::Heat.apply(255), [255, 255, 255]);
    assert_eq!(ColorMap::Heat.apply(85), [255, 0, 0]);
    assert_eq!(ColorMap::Viridis.apply(0), [68, 1, 84]);
    assert_eq!(ColorMap::Viridis.apply(255), [253, 231, 37]);
    assert_eq!(ColorMap::Plasma.apply(0), [13, 8, 135]);
    assert_eq!(ColorMap::Plasma.apply(255), [240, 249, 33]);

    let luma = |[r, g, b]: [u8; 3]| 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    for map in [ColorMap::Heat, ColorMap::Viridis, ColorMap::Plasma] {
        let palette = map.palette();
        assert!(luma(palette.get(255)) > luma(palette.get(128)));
        assert!(luma(palette.get(128)) > luma(palette.get(0)));
    }
}

#[test]
fn test_color_map_render_is_opaque() {
    let cache = mono_cache(8, 8);
    let params = AdjustmentParams {
        color_map: ColorMap::Viridis,
        ..AdjustmentParams::default()
    };
    let raster = render(&cache, &params, 1);

    assert!(raster.pixels.chunks_exact(4).all(|px| px[3] == 255));
    let v = cache.pixel(3, 2)[0];
    let [r, g, b] = ColorMap::Viridis.apply(v);
    assert_eq!(raster.pixel(3, 2), [r, g, b, 255]);
}

#[test]
fn test_color_cache_ignores_color_map() {
    let cache = NormalizedCache {
        width: 2,
        height: 1,
        channels: 3,
        buffer: vec![10, 100, 200, 0, 128, 255],
        source_min: 0.0,
        source_max: 255.0,
        stretched: false,
    };
    let params = AdjustmentParams {
        color_map: ColorMap::Heat,
        brightness: 10.0,
        ..AdjustmentParams::default()
    };
    let raster = render(&cache, &params, 1);

    assert_eq!(raster.pixel(0, 0), [20, 110, 210, 255]);
    assert_eq!(raster.pixel(1, 0), [10, 138, 255, 255]);
    assert_eq!(raster.to_rgb(), vec![20, 110, 210, 10, 138, 255]);
}

#[test]
fn test_render_leaves_cache_untouched() {
    let cache = mono_cache(16, 16);
    let before = cache.clone();
    let params = AdjustmentParams {
        contrast: 1.7,
        gamma: 0.6,
        color_map: ColorMap::Plasma,
        ..AdjustmentParams::default()
    };

    let first = render(&cache, &params, 1);
    let second = render(&cache, &params, 1);
    assert_eq!(first, second);
    assert_eq!(cache, before);
}

#[test]
fn test_empty_cache_renders_nothing() {
    let raster = render(&NormalizedCache::empty(), &AdjustmentParams::default(), 4);
    assert!(raster.is_empty());
    assert!(raster.pixels.is_empty());
}

#[test]
fn test_params_json() {
    assert_eq!(serde_json::to_string(&ColorMap::Viridis).unwrap(), "\"viridis\"");

    let params: AdjustmentParams =
        serde_json::from_str(r#"{"gamma": 2.0, "color_map": "heat"}"#).unwrap();
    assert_eq!(params.gamma, 2.0);
    assert_eq!(params.color_map, ColorMap::Heat);
    assert_eq!(params.contrast, 1.0);
    assert!(params.auto_stretch);
}

#[test]
fn test_color_map_labels() {
    for map in ColorMap::ALL {
        assert_eq!(ColorMap::from_label(map.label()), Some(map));
    }
    assert_eq!(ColorMap::from_label("viridis"), Some(ColorMap::Viridis));
    assert_eq!(ColorMap::from_label("jet"), None);
}
