use opencv::core::Point;
use opencv::core::Vector;
use opencv::{self as cv, prelude::*};

pub fn read_image(file_name: &str) -> Result<Mat, opencv::Error> {
    cv::imgcodecs::imread(file_name, cv::imgcodecs::IMREAD_COLOR)
}

pub fn write_image(name: &str, phase: &Mat) -> Result<bool, opencv::Error> {
    cv::imgcodecs::imwrite(name, &phase, &cv::core::Vector::default())
}

pub fn to_grey(phase: &Mat) -> Result<Mat, anyhow::Error> {
    let mut new_phase = cv::core::Mat::default();
    cv::imgproc::cvt_color(&phase, &mut new_phase, cv::imgproc::COLOR_BGR2GRAY, 0)?;
    Ok(new_phase)
}

pub fn threshold(phase: &Mat, threshold_value: i32) -> Result<Mat, anyhow::Error> {
    let mut new_phase = cv::core::Mat::default();
    cv::imgproc::threshold(
        &phase,
        &mut new_phase,
        threshold_value as f64,
        255.0,
        cv::imgproc::THRESH_BINARY,
    )?;

    Ok(new_phase)
}

fn square_kernel(size: i32) -> Result<Mat, anyhow::Error> {
    let anchor = Point::new(-1, -1);
    let ksize = cv::core::Size::new(size, size);
    let kernel = cv::imgproc::get_structuring_element(cv::imgproc::MORPH_RECT, ksize, anchor)?;
    Ok(kernel)
}

pub fn dilate(phase: &Mat, kernel_size: i32, iterations: i32) -> Result<Mat, anyhow::Error> {
    let mut new_phase = cv::core::Mat::default();
    let anchor = Point::new(-1, -1);
    cv::imgproc::dilate(
        &phase,
        &mut new_phase,
        &square_kernel(kernel_size)?,
        anchor,
        iterations,
        cv::core::BORDER_CONSTANT,
        cv::imgproc::morphology_default_border_value()?,
    )?;

    Ok(new_phase)
}

pub fn erode(phase: &Mat, kernel_size: i32, iterations: i32) -> Result<Mat, anyhow::Error> {
    let mut new_phase = cv::core::Mat::default();
    let anchor = Point::new(-1, -1);
    cv::imgproc::erode(
        &phase,
        &mut new_phase,
        &square_kernel(kernel_size)?,
        anchor,
        iterations,
        cv::core::BORDER_CONSTANT,
        cv::imgproc::morphology_default_border_value()?,
    )?;

    Ok(new_phase)
}

/// External boundaries only; holes inside a coin do not produce contours.
pub fn find_external_contours(phase: &Mat) -> Result<Vector<Vector<Point>>, anyhow::Error> {
    let mut contour_values: Vector<Vector<Point>> = Vector::new();
    cv::imgproc::find_contours(
        &phase,
        &mut contour_values,
        cv::imgproc::RETR_EXTERNAL,
        cv::imgproc::CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;

    Ok(contour_values)
}

pub fn contour_area(contour: &Vector<Point>) -> Result<f64, anyhow::Error> {
    let area = cv::imgproc::contour_area(contour, false)?;
    Ok(area)
}

/// Area-weighted center from the zeroth and first moments; `None` when the
/// contour is degenerate (m00 == 0).
pub fn centroid(contour: &Vector<Point>) -> Result<Option<Point>, anyhow::Error> {
    let moments = cv::imgproc::moments_def(contour)?;
    if moments.m00 == 0.0 {
        return Ok(None);
    }
    let cx = (moments.m10 / moments.m00) as i32;
    let cy = (moments.m01 / moments.m00) as i32;
    Ok(Some(Point::new(cx, cy)))
}

pub fn show_image(text: &str, img: &Mat) {
    let _ = cv::highgui::imshow(text, img);
}

pub fn wait_key(delay: i32) -> Result<i32, cv::Error> {
    cv::highgui::wait_key(delay)
}

pub fn destroy_all_windows() {
    let _ = cv::highgui::destroy_all_windows();
}
