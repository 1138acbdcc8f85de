use std::path::PathBuf;

use opencv::core::{Point, Scalar, Size};
use opencv::{self as cv, prelude::*};

use count_coins::pipeline::{count_coins, preprocess, valid_contours, TallyError};
use count_coins::{cv_utils, Denomination, TallyParams};

/// Radii chosen so the four size classes are well separated and every blob
/// clears the 500 px² noise floor even before morphology grows it.
const MARKER_RADII: [i32; 4] = [16, 22, 30, 40];

fn blank_scene() -> Mat {
    cv::core::Mat::new_size_with_default(
        Size::new(800, 600),
        cv::core::CV_8UC3,
        Scalar::new(0.0, 0.0, 0.0, 255.0),
    )
    .unwrap()
}

fn draw_blob(scene: &mut Mat, center: Point, radius: i32) {
    let white = Scalar::new(255.0, 255.0, 255.0, 255.0);
    cv::imgproc::circle(
        scene,
        center,
        radius,
        white,
        cv::imgproc::FILLED,
        cv::imgproc::LINE_8,
        0,
    )
    .unwrap();
}

/// One reference marker per size class, nothing else.
fn markers_only_scene() -> Mat {
    let mut scene = blank_scene();
    let centers = [
        Point::new(100, 100),
        Point::new(300, 100),
        Point::new(550, 120),
        Point::new(150, 350),
    ];
    for (center, radius) in centers.iter().zip(MARKER_RADII) {
        draw_blob(&mut scene, *center, radius);
    }
    scene
}

fn save_scene(scene: &Mat, name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    assert!(cv_utils::write_image(path.to_str().unwrap(), scene).unwrap());
    path
}

#[test]
fn markers_only_scene_tallies_to_zero() {
    let path = save_scene(&markers_only_scene(), "count_coins_markers_only.png");
    let outcome = count_coins(path.to_str().unwrap(), &TallyParams::default()).unwrap();

    assert_eq!(outcome.counts.total_objects(), 4);
    for line in &outcome.report.lines {
        assert_eq!(line.raw, 1, "one marker per class: {:?}", line.denomination);
        assert_eq!(line.real, 0);
    }
    assert_eq!(outcome.report.total, 0);
}

#[test]
fn two_coins_of_the_largest_class_tally_to_twenty() {
    let mut scene = markers_only_scene();
    // Two coins the size of the largest marker.
    draw_blob(&mut scene, Point::new(400, 420), MARKER_RADII[3]);
    draw_blob(&mut scene, Point::new(650, 420), MARKER_RADII[3]);
    let path = save_scene(&scene, "count_coins_two_tens.png");

    let outcome = count_coins(path.to_str().unwrap(), &TallyParams::default()).unwrap();

    assert_eq!(outcome.counts.total_objects(), 6);
    assert_eq!(outcome.counts.raw(Denomination::Ten), 3);
    let ten = outcome
        .report
        .lines
        .iter()
        .find(|l| l.denomination == Denomination::Ten)
        .unwrap();
    assert_eq!(ten.real, 2);
    assert_eq!(outcome.report.total, 20);
}

#[test]
fn raw_counts_cover_every_valid_contour() {
    let mut scene = markers_only_scene();
    draw_blob(&mut scene, Point::new(420, 400), 23);
    let path = save_scene(&scene, "count_coins_cover.png");

    let params = TallyParams::default();
    let outcome = count_coins(path.to_str().unwrap(), &params).unwrap();

    let binary = preprocess(&cv_utils::read_image(path.to_str().unwrap()).unwrap(), &params).unwrap();
    let contours = valid_contours(&binary, params.min_area).unwrap();
    assert_eq!(outcome.counts.total_objects() as usize, contours.len());
}

#[test]
fn same_seed_gives_identical_tallies() {
    let mut scene = markers_only_scene();
    draw_blob(&mut scene, Point::new(420, 400), MARKER_RADII[1]);
    let path = save_scene(&scene, "count_coins_repeat.png");

    let params = TallyParams::default();
    let first = count_coins(path.to_str().unwrap(), &params).unwrap();
    let second = count_coins(path.to_str().unwrap(), &params).unwrap();

    assert_eq!(first.report.total, second.report.total);
    for denom in Denomination::descending() {
        assert_eq!(first.counts.raw(denom), second.counts.raw(denom));
    }
}

#[test]
fn fewer_than_four_objects_aborts() {
    let mut scene = blank_scene();
    draw_blob(&mut scene, Point::new(100, 100), 20);
    draw_blob(&mut scene, Point::new(300, 100), 30);
    draw_blob(&mut scene, Point::new(500, 100), 40);
    let path = save_scene(&scene, "count_coins_too_few.png");

    let Err(err) = count_coins(path.to_str().unwrap(), &TallyParams::default()) else {
        panic!("expected the tally to abort");
    };
    match err {
        TallyError::TooFewObjects { found } => assert_eq!(found, 3),
        other => panic!("expected TooFewObjects, got {other:?}"),
    }
}

#[test]
fn noise_below_the_area_floor_is_ignored() {
    let mut scene = markers_only_scene();
    // A speck well under the floor even after dilation.
    draw_blob(&mut scene, Point::new(700, 550), 3);
    let path = save_scene(&scene, "count_coins_noise.png");

    let outcome = count_coins(path.to_str().unwrap(), &TallyParams::default()).unwrap();
    assert_eq!(outcome.counts.total_objects(), 4);
}

#[test]
fn unreadable_path_aborts() {
    let Err(err) = count_coins("no-such-dir/no-such-image.png", &TallyParams::default()) else {
        panic!("expected the tally to abort");
    };
    match err {
        TallyError::UnreadableImage { path } => {
            assert_eq!(path, "no-such-dir/no-such-image.png")
        }
        other => panic!("expected UnreadableImage, got {other:?}"),
    }
}

#[test]
fn annotated_image_keeps_input_dimensions() {
    let path = save_scene(&markers_only_scene(), "count_coins_dims.png");
    let outcome = count_coins(path.to_str().unwrap(), &TallyParams::default()).unwrap();
    assert_eq!(outcome.annotated.cols(), 800);
    assert_eq!(outcome.annotated.rows(), 600);
}
