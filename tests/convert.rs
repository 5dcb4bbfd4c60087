use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use inkcurve::{Converter, InkcurveError, PixelGrid, Settings};
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("inkcurve-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Dark disc on a white background.
fn disc_image(size: u32) -> DynamicImage {
    let mut img = RgbImage::from_pixel(size, size, Rgb([255, 255, 255]));
    let c = size as i64 / 2;
    let r2 = (size as i64 / 3).pow(2);
    for (x, y, p) in img.enumerate_pixels_mut() {
        let (dx, dy) = (x as i64 - c, y as i64 - c);
        if dx * dx + dy * dy < r2 {
            *p = Rgb([20, 30, 40]);
        }
    }
    DynamicImage::ImageRgb8(img)
}

#[test]
fn test_white_image_has_no_curves() {
    let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(120, 90, Luma([255])));
    for (offset, threshold) in [(30, 8000), (4, 1), (10, 50)] {
        let converter = Converter::new(Settings { offset, threshold }).unwrap();
        let sketch = converter.render(&img);
        assert_eq!(sketch.curve_count(), 0);
        assert!(sketch.bands.iter().all(|b| b.control_points.is_empty()));
        let gray = sketch.surface.into_image().into_luma8();
        assert!(gray.pixels().all(|p| p.0[0] == 255));
    }
}

#[test]
fn test_black_image_has_evenly_spaced_points() {
    let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(100, 100, Luma([0])));
    let converter = Converter::default().with_threshold(100);
    let bands = converter.trace(&img);
    assert_eq!(bands.iter().map(|b| b.y).collect::<Vec<_>>(), vec![15, 37, 59, 81]);
    for band in &bands {
        // every column exceeds the threshold on its own
        assert_eq!(band.control_points, (0..100).collect::<Vec<_>>());
        assert_eq!(band.curves.len(), 33);
    }
}

#[test]
fn test_one_pixel_tall_image_is_blank() {
    let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(50, 1, Luma([0])));
    let sketch = Converter::default().with_threshold(1).render(&img);
    assert!(sketch.bands.is_empty());
    let gray = sketch.surface.into_image().into_luma8();
    assert!(gray.pixels().all(|p| p.0[0] == 255));
}

#[test]
fn test_tracing_is_deterministic() {
    let img = disc_image(90);
    let converter = Converter::default().with_threshold(2000);
    let first = converter.trace(&img);
    assert!(first.iter().any(|b| !b.curves.is_empty()));
    assert_eq!(first, converter.trace(&img));
    assert_eq!(first, converter.with_parallel(true).trace(&img));
}

#[test]
fn test_higher_threshold_never_adds_points() {
    let img = disc_image(90);
    let mut previous: Option<Vec<usize>> = None;
    for threshold in [0, 100, 1000, 3000, 8000, 20000] {
        let counts: Vec<usize> = Converter::default()
            .with_threshold(threshold)
            .trace(&img)
            .iter()
            .map(|b| b.control_points.len())
            .collect();
        if let Some(prev) = &previous {
            assert!(counts.iter().zip(prev).all(|(now, before)| now <= before));
        }
        previous = Some(counts);
    }
}

#[test]
fn test_consecutive_curves_share_endpoints() {
    let img = disc_image(120);
    for band in Converter::default().with_threshold(500).trace(&img) {
        for pair in band.curves.windows(2) {
            assert_eq!(pair[0].x[3], pair[1].x[0]);
        }
    }
}

#[test]
fn test_sampling_at_edges_matches_clipped_sum() {
    let img = disc_image(40);
    let grid = PixelGrid::from_image(&img);
    for y in [0i64, 39] {
        for x in 0..40 {
            let expected: u64 = (y - 5..y + 5)
                .filter(|r| (0..40).contains(r))
                .map(|r| 255 - grid.grey(x as i64, r).unwrap() as u64)
                .sum();
            assert_eq!(inkcurve::sample_inverted_intensity(&grid, x, y, 5), expected);
        }
    }
}

#[test]
fn test_convert_file_round_trip() {
    let dir = scratch_dir("roundtrip");
    let input = dir.join("in.png");
    let output = dir.join("out.jpg");
    disc_image(80).save(&input).unwrap();

    let sketch = Converter::default().with_threshold(1500).convert_file(&input, &output).unwrap();
    assert!(sketch.summary().curves > 0);

    let written = image::open(&output).unwrap();
    assert_eq!((written.width(), written.height()), (80, 80));
    assert_eq!(image::ImageFormat::from_path(&output).unwrap(), ImageFormat::Jpeg);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_decode_failure_writes_nothing() {
    let dir = scratch_dir("garbage");
    let input = dir.join("in.png");
    let output = dir.join("out.jpg");
    std::fs::write(&input, b"definitely not a png").unwrap();

    let err = Converter::default().convert_file(&input, &output).err().unwrap();
    assert!(matches!(err, InkcurveError::Image(_)));
    assert!(!output.exists());
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = scratch_dir("missing");
    let err = Converter::default()
        .convert_file(dir.join("nope.png"), dir.join("out.jpg"))
        .err()
        .unwrap();
    assert!(matches!(err, InkcurveError::Io(_)));
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_settings_preset_file() {
    let dir = scratch_dir("preset");
    let path = dir.join("preset.json");
    std::fs::write(&path, r#"{ "offset": 12 }"#).unwrap();
    assert_eq!(Settings::from_json_file(&path).unwrap(), Settings { offset: 12, threshold: 8000 });

    std::fs::write(&path, r#"{ "offset": 1 }"#).unwrap();
    assert!(matches!(Settings::from_json_file(&path), Err(InkcurveError::Settings(_))));

    std::fs::write(&path, r#"{ "offset": 2000000000 }"#).unwrap();
    assert!(matches!(Settings::from_json_file(&path), Err(InkcurveError::Settings(_))));
    std::fs::remove_dir_all(&dir).ok();
}
