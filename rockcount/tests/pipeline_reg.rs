//! Pipeline regression test
//!
//! End-to-end counting through [`RockCounter`]: payload forms, strategy
//! choice, the inclusive area band and failure reporting.
//!
//! Run with:
//! ```
//! cargo test -p rockcount --test pipeline_reg
//! ```

use rockcount::{AnalysisParams, AnalysisResult, ErrorKind, Method, RockCounter, count_rocks};
use rockcount_test::{
    RegParams, blank_mask, disk_image, encode_png, mask_to_image, paint_rect, to_data_url,
    to_wrapped_base64, two_touching_disks,
};

/// Parameters that keep the painted mask exact: no smoothing, fixed
/// threshold, no cleanup, connected components.
fn exact_params() -> AnalysisParams {
    AnalysisParams::new()
        .with_blur(0)
        .with_otsu(false)
        .with_cleanup_radii(0, 0)
        .with_watershed(false)
}

fn rect_image(width: u32, height: u32, rect_w: u32, rect_h: u32) -> rockcount::ColorGrid {
    let mut mask = blank_mask(width, height);
    paint_rect(&mut mask, 1, 1, rect_w, rect_h);
    mask_to_image(&mask)
}

#[test]
fn pipeline_counting_reg() {
    let mut rp = RegParams::new("pipeline_counting");

    // Empty scene: a successful zero
    let blank = disk_image(60, 60, &[]);
    let result = RockCounter::default().analyze_grid(&blank);
    rp.compare_values(0.0, result.count as f64, 0.0);
    rp.check(result.method != Method::None, "empty scene still reports a method");
    rp.check(result.error.is_none(), "empty scene has no error");

    // One clean blob
    let blob = disk_image(60, 60, &[rockcount_test::Disk::new(30, 30, 10)]);
    let counter = RockCounter::new(AnalysisParams::default().with_watershed(false));
    let result = counter.analyze_grid(&blob);
    rp.compare_values(1.0, result.count as f64, 0.0);
    rp.check(
        result.method == Method::ConnectedComponents,
        "blob counted by connected components",
    );

    // Lower band edge: 49 px dropped, 50 px kept
    let counter = RockCounter::new(exact_params());
    rp.compare_values(0.0, counter.analyze_grid(&rect_image(20, 20, 7, 7)).count as f64, 0.0);
    rp.compare_values(1.0, counter.analyze_grid(&rect_image(20, 20, 5, 10)).count as f64, 0.0);

    // Upper band edge on a 20x10 image: cap floor(200 * 0.4) = 80
    let counter = RockCounter::new(exact_params().with_min_area_px(1));
    rp.compare_values(1.0, counter.analyze_grid(&rect_image(20, 10, 8, 8)).count as f64, 0.0);
    rp.compare_values(1.0, counter.analyze_grid(&rect_image(20, 10, 10, 8)).count as f64, 0.0);
    rp.compare_values(0.0, counter.analyze_grid(&rect_image(20, 10, 9, 9)).count as f64, 0.0);

    assert!(rp.cleanup(), "pipeline counting regression test failed");
}

#[test]
fn pipeline_separation_reg() {
    let mut rp = RegParams::new("pipeline_separation");

    let image = two_touching_disks();
    let png = encode_png(&image).expect("encode png");

    // Plain labeling sees one fused blob
    let cc = count_rocks(&png, &AnalysisParams::default().with_watershed(false));
    rp.compare_values(1.0, cc.count as f64, 0.0);
    rp.check(cc.method == Method::ConnectedComponents, "fused blob by connected components");

    let ws = count_rocks(&png, &AnalysisParams::default());
    if cfg!(feature = "watershed") {
        rp.compare_values(2.0, ws.count as f64, 0.0);
        rp.check(ws.method == Method::Watershed, "watershed splits the blob");
    } else {
        rp.check(ws == cc, "without watershed the request falls back");
    }

    // A seed spacing wider than the image falls back to connected components
    let wide = count_rocks(&png, &AnalysisParams::default().with_watershed_min_distance(60));
    rp.compare_values(1.0, wide.count as f64, 0.0);
    rp.check(wide.method == Method::ConnectedComponents, "no seeds, fallback");

    // Data URL and raw bytes agree, surrounding whitespace is ignored
    let url = format!("  {}\n", to_data_url("png", &png));
    let from_url = count_rocks(&url, &AnalysisParams::default());
    rp.check(from_url == ws, "data URL matches raw bytes");

    // MIME-wrapped base64, bare and inside a data URL
    let wrapped = to_wrapped_base64(&png, 76);
    rp.check(wrapped.contains('\n'), "payload is line wrapped");
    let from_wrapped = count_rocks(&wrapped, &AnalysisParams::default());
    rp.check(from_wrapped == ws, "wrapped base64 matches raw bytes");
    let wrapped_url = format!("data:image/png;base64,{}", wrapped.replace('\n', "\r\n"));
    let from_wrapped_url = count_rocks(&wrapped_url, &AnalysisParams::default());
    rp.check(from_wrapped_url == ws, "wrapped data URL matches raw bytes");

    // Same input, same output
    let counter = RockCounter::default();
    let first = counter.analyze(&png);
    let second = counter.analyze(&png);
    rp.check(first == second, "analysis is idempotent");

    assert!(rp.cleanup(), "pipeline separation regression test failed");
}

#[test]
fn pipeline_failure_reg() {
    let mut rp = RegParams::new("pipeline_failure");
    let counter = RockCounter::default();

    let png = encode_png(&two_touching_disks()).expect("encode png");
    let truncated = &png[..png.len() / 2];
    let result = counter.analyze(truncated);
    rp.compare_values(0.0, result.count as f64, 0.0);
    rp.check(result.method == Method::None, "truncated png has no method");
    rp.check(
        result.error.as_deref().is_some_and(|e| !e.is_empty()),
        "truncated png has an error message",
    );
    rp.check(
        counter
            .try_analyze(truncated)
            .is_err_and(|e| e.kind() == ErrorKind::UndecodableImage),
        "truncated png is undecodable",
    );

    let garbage = counter.analyze(&b"definitely not an image"[..]);
    rp.check(garbage.method == Method::None, "garbage bytes fail");

    for url in [
        "data:image/png,AAAA",
        "data:text/plain;base64,AAAA",
        "data:image/;base64,AAAA",
    ] {
        rp.check(
            counter
                .try_analyze(url)
                .is_err_and(|e| e.kind() == ErrorKind::MalformedEnvelope),
            url,
        );
        rp.check(counter.analyze(url).method == Method::None, url);
    }

    // Negative or non-finite band fractions are processing failures
    for frac in [-0.5, f64::NAN] {
        let bad = RockCounter::new(AnalysisParams::default().with_max_area_frac(frac));
        rp.check(
            bad.try_analyze(&png)
                .is_err_and(|e| e.kind() == ErrorKind::ProcessingFailure),
            "invalid fraction rejected",
        );
    }

    // A fraction above one only lifts the cap
    let loose = RockCounter::new(exact_params().with_max_area_frac(1.5));
    let result = loose.analyze_grid(&rect_image(20, 10, 18, 8));
    rp.compare_values(1.0, result.count as f64, 0.0);
    rp.check(result.error.is_none(), "fraction above one accepted");

    assert!(rp.cleanup(), "pipeline failure regression test failed");
}

#[test]
fn pipeline_serde_reg() {
    let mut rp = RegParams::new("pipeline_serde");

    let result = AnalysisResult::counted(3, Method::ConnectedComponents);
    let json = serde_json::to_value(&result).expect("serialize result");
    rp.check(
        json == serde_json::json!({"count": 3, "method": "connected_components", "error": null}),
        "result wire form",
    );
    let back: AnalysisResult = serde_json::from_value(json).expect("deserialize result");
    rp.check(back == result, "result survives json");

    let failed = count_rocks("data:image/png,AAAA", &AnalysisParams::default());
    let json = serde_json::to_value(&failed).expect("serialize failure");
    rp.check(json["method"] == "none", "failure method is none");
    rp.check(json["error"].is_string(), "failure error is a string");

    let params: AnalysisParams = serde_json::from_str("{}").expect("empty params");
    rp.check(params == AnalysisParams::default(), "empty object gives defaults");
    let params: AnalysisParams =
        serde_json::from_str(r#"{"use_watershed": false, "min_area_px": 10}"#)
            .expect("partial params");
    rp.check(!params.use_watershed, "use_watershed overridden");
    rp.compare_values(10.0, params.min_area_px as f64, 0.0);
    rp.compare_values(0.4, params.max_area_frac, 0.0);

    assert!(rp.cleanup(), "pipeline serde regression test failed");
}
