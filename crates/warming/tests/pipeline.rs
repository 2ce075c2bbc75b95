//! End-to-end run: anomalies, warming level, index at that level.

use approx::assert_relative_eq;
use boreas_datalist::{metadata, process_datalist, DataList, Metadata};
use boreas_warming::{
    at_warming_level, calc_anomaly, calc_year_of_warming_level, AnomalyMethod, AnomalyOptions,
    AtLevelOptions, Reduce, Series,
};

fn member(model: &str) -> Metadata {
    metadata([("model", model), ("exp", "ssp585"), ("ens", "r1i1p1f1")])
}

/// A temperature series warming linearly by `rate` degrees per year after
/// a flat 1850-1900 baseline at `base`.
fn ramp(base: f64, rate: f64) -> Series {
    let values = (0..251)
        .map(|i| {
            let year = 1850 + i;
            if year <= 1900 {
                base
            } else {
                base + rate * f64::from(year - 1900)
            }
        })
        .collect();
    Series::annual(1850, values)
}

#[test]
fn warming_level_pipeline() {
    // Two models with different climate sensitivity, one flat control.
    let tas_raw: DataList<Series> = vec![
        (ramp(13.0, 0.02), member("FAST")),
        (ramp(14.0, 0.01), member("SLOW")),
        (ramp(13.5, 0.0), member("FLAT")),
    ];

    let opts = AnomalyOptions::new();
    let anomalies = process_datalist(tas_raw, |tas, meta| {
        calc_anomaly(tas, 1850, 1900, AnomalyMethod::Absolute, &opts, Some(meta))
    })
    .unwrap();
    assert_eq!(anomalies.len(), 3);

    // The offset cancels; only the ramp remains.
    let fast = &anomalies[0].0;
    assert_relative_eq!(fast.values()[0], 0.0);
    let period = calc_year_of_warming_level(fast, 1.5, 20).unwrap().unwrap();
    // The 20-year mean of 0.02 * (year - 1900) exceeds 1.5 once the window
    // is centered just past 1975.
    assert!(period.center > 1970 && period.center < 1980);
    assert_eq!(period.end - period.begin + 1, 20);

    // The slower model crosses the same level roughly twice as late.
    let slow_period = calc_year_of_warming_level(&anomalies[1].0, 1.5, 20)
        .unwrap()
        .unwrap();
    assert!(slow_period.center > 2040 && slow_period.center < 2060);

    // The flat control never crosses.
    assert!(calc_year_of_warming_level(&anomalies[2].0, 1.5, 20)
        .unwrap()
        .is_none());

    // An index known exactly per year; here just the year itself.
    let index_list: DataList<Series> = anomalies
        .iter()
        .map(|(_, meta)| {
            let series = Series::annual(1850, (1850..=2100).map(f64::from).collect());
            (series, meta.clone())
        })
        .collect();

    let out = at_warming_level(
        &anomalies,
        &index_list,
        1.5,
        Reduce::Mean,
        &AtLevelOptions::new(),
    )
    .unwrap();

    // The flat member is skipped; the others report their window centers.
    assert_eq!(out.len(), 2);
    assert_relative_eq!(out[0].0, f64::from(period.center), epsilon = 0.51);
    assert_relative_eq!(out[1].0, f64::from(slow_period.center), epsilon = 0.51);
}
