use opencv::core::Point;
use opencv::core::Vector;
use opencv::{self as cv, prelude::*};

use crate::cv_utils;
use crate::denomination::Denomination;

const OUTLINE_THICKNESS: i32 = 3;
const LABEL_SCALE: f64 = 0.6;
const LABEL_THICKNESS: i32 = 2;

/// Outlines one contour in its denomination color and writes the dollar
/// value at the contour centroid. Degenerate contours (zero area moment)
/// keep their outline but get no label.
pub fn annotate_contour(
    phase: &mut Mat,
    contour: &Vector<Point>,
    denom: Denomination,
) -> Result<(), anyhow::Error> {
    let mut single: Vector<Vector<Point>> = Vector::new();
    single.push(contour.clone());

    let zero_offset = Point::new(0, 0);
    cv::imgproc::draw_contours(
        phase,
        &single,
        -1,
        denom.color(),
        OUTLINE_THICKNESS,
        cv::imgproc::LINE_8,
        &cv::core::no_array(),
        i32::MAX,
        zero_offset,
    )?;

    if let Some(center) = cv_utils::centroid(contour)? {
        let white = cv::core::Scalar::new(255.0, 255.0, 255.0, 255.0);
        cv::imgproc::put_text(
            phase,
            &format!("${}", denom.value()),
            Point::new(center.x - 15, center.y + 5),
            cv::imgproc::FONT_HERSHEY_SIMPLEX,
            LABEL_SCALE,
            white,
            LABEL_THICKNESS,
            cv::imgproc::LINE_8,
            false,
        )?;
    }

    Ok(())
}
