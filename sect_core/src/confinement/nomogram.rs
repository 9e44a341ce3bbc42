//! # Mander Design Chart
//!
//! Static digitization of the Mander confined-strength chart: sixteen
//! constant-strength curves sampled at sixteen points each, interpolated
//! in two 1-D stages to read fcc/fc0 from the two lateral confinement
//! ratios. The table is immutable data; the lookup reports its two failure
//! conditions (ratio outside the chart, no curve intersection) as typed
//! errors rather than sentinel values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest-ratio axis of the chart (one value per curve sample row).
const RATIO_AXIS: [f64; 16] = [
    0.0,
    0.017_828_571,
    0.038_057_143,
    0.057_257_143,
    0.077_485_714,
    0.097_714_286,
    0.117_600_000,
    0.138_171_429,
    0.157_714_286,
    0.177_257_143,
    0.197_142_857,
    0.217_028_571,
    0.237_600_00,
    0.258_514_286,
    0.278_400_000,
    0.3,
];

/// Strength ratios at which the sixteen chart curves terminate
/// (their value at the largest confinement ratio).
const CURVE_GRID: [f64; 16] = [
    1.290_835_58,
    1.420_485_175,
    1.539_622_642,
    1.634_231_806,
    1.720_080_863,
    1.805_929_919,
    1.877_762_803,
    1.939_083_558,
    2.003_908_356,
    2.052_964_96,
    2.105_525_606,
    2.154_582_2,
    2.189_622_642,
    2.224_663_073,
    2.257_951_482,
    2.3,
];

/// Largest-ratio axis values that select a chart curve.
const CURVE_SELECTOR: [f64; 16] = [
    0.0,
    0.030_217_856_132_183_404,
    0.043_907_390_934_601_435,
    0.059_140_699_574_280_35,
    0.076_695_998_497_658_89,
    0.1,
    0.118_697_957,
    0.136_568_755,
    0.157_742_049,
    0.175_922_121,
    0.2,
    0.219_665_655,
    0.237_465_214,
    0.256_707_074,
    0.276_431_578,
    0.3,
];

/// The sixteen digitized curves. `CURVES[j][i]` is the strength ratio of
/// curve `j` at ratio-axis row `i`.
const CURVES: [[f64; 16]; 16] = [
    [
        1.0, 1.040_296_496, 1.080_592_992, 1.113_881_402, 1.140_161_725, 1.162_938_005,
        1.182_210_243, 1.201_482_48, 1.219_002_695, 1.233_018_868, 1.245_283_019,
        1.255_795_148, 1.264_555_256, 1.276_819_407, 1.282_075_472, 1.290_835_58,
    ],
    [
        1.0, 1.124_393_531, 1.178_706_199, 1.215_498_652, 1.245_283_019, 1.268_059_299,
        1.289_083_558, 1.311_859_838, 1.332_884_097, 1.348_652_291, 1.362_668_464,
        1.374_932_615, 1.388_948_787, 1.401_212_938, 1.411_725_067, 1.420_485_175,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.294_339_623, 1.329_380_054, 1.359_164_42,
        1.388_948_787, 1.411_725_067, 1.436_253_369, 1.453_773_585, 1.467_789_757,
        1.485_309_973, 1.502_830_189, 1.516_846_361, 1.527_358_491, 1.539_622_642,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.401_212_938, 1.438_005_391,
        1.466_037_736, 1.494_070_081, 1.518_598_383, 1.539_622_642, 1.557_142_857,
        1.576_415_094, 1.593_935_31, 1.609_703_504, 1.623_719_677, 1.634_231_806,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.455_525_606, 1.501_078_167,
        1.537_870_62, 1.569_407_008, 1.599_191_375, 1.623_719_677, 1.644_743_935,
        1.662_264_151, 1.679_784_367, 1.699_056_604, 1.711_320_755, 1.720_080_863,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.455_525_606, 1.557_142_857,
        1.600_943_396, 1.635_983_827, 1.667_520_216, 1.695_552_561, 1.716_576_819,
        1.739_353_1, 1.758_625_337, 1.777_897_574, 1.791_913_747, 1.805_929_919,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.455_525_606, 1.557_142_857,
        1.651_752_022, 1.690_296_496, 1.727_088_949, 1.756_873_315, 1.784_905_66,
        1.807_681_941, 1.830_458_221, 1.849_730_458, 1.865_498_652, 1.877_762_803,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.455_525_606, 1.557_142_857,
        1.651_752_022, 1.741_105_121, 1.783_153_639, 1.812_938_005, 1.835_714_286,
        1.858_490_566, 1.881_266_846, 1.904_043_127, 1.921_563_342, 1.939_083_558,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.455_525_606, 1.557_142_857,
        1.651_752_022, 1.741_105_121, 1.823_450_135, 1.863_746_631, 1.893_530_997,
        1.919_811_321, 1.944_339_623, 1.967_115_903, 1.984_636_119, 2.003_908_356,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.455_525_606, 1.557_142_857,
        1.651_752_022, 1.741_105_121, 1.823_450_135, 1.904_043_127, 1.933_827_493,
        1.958_355_795, 1.984_636_119, 2.010_916_442, 2.033_692_722, 2.052_964_96,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.455_525_606, 1.557_142_857,
        1.651_752_022, 1.741_105_121, 1.823_450_135, 1.904_043_127, 1.970_619_946,
        2.002_156_334, 2.030_188_679, 2.058_221_024, 2.080_997_305, 2.105_525_606,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.455_525_606, 1.557_142_857,
        1.651_752_022, 1.741_105_121, 1.823_450_135, 1.904_043_127, 1.970_619_946,
        2.040_700_809, 2.070_485_175, 2.103_773_585, 2.128_301_887, 2.154_582_21,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.455_525_606, 1.557_142_857,
        1.651_752_022, 1.741_105_121, 1.823_450_135, 1.904_043_127, 1.970_619_946,
        2.040_700_809, 2.105_525_606, 2.137_061_995, 2.163_342_318, 2.189_622_642,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.455_525_606, 1.557_142_857,
        1.651_752_022, 1.741_105_121, 1.823_450_135, 1.904_043_127, 1.970_619_946,
        2.040_700_809, 2.105_525_606, 2.175_606_469, 2.201_838_275, 2.224_663_073,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.455_525_606, 1.557_142_857,
        1.651_752_022, 1.741_105_121, 1.823_450_135, 1.904_043_127, 1.970_619_946,
        2.040_700_809, 2.105_525_606, 2.175_606_469, 2.235_175_202, 2.257_951_482,
    ],
    [
        1.0, 1.124_393_531, 1.243_530_997, 1.353_908_356, 1.455_525_606, 1.557_142_857,
        1.651_752_022, 1.741_105_121, 1.823_450_135, 1.904_043_127, 1.970_619_946,
        2.040_700_809, 2.105_525_606, 2.175_606_469, 2.235_175_202, 2.3,
    ],
];

/// Why a chart lookup produced no strength ratio.
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartError {
    /// The larger confinement ratio lies outside the digitized chart
    #[error("confinement ratio {ratio:.4} is outside the chart range [0, 0.3]")]
    OutOfRange { ratio: f64 },
    /// The smaller-ratio line does not intersect the interpolated curve
    #[error("no chart intersection for confinement ratio {ratio:.4}")]
    NoIntersection { ratio: f64 },
}

/// Piecewise-linear interpolation with end clamping (grid must be sorted).
fn interp(x: f64, grid: &[f64], values: &[f64]) -> f64 {
    if x <= grid[0] {
        return values[0];
    }
    if x >= grid[grid.len() - 1] {
        return values[values.len() - 1];
    }
    let k = grid.partition_point(|&g| g < x) - 1;
    let t = (x - grid[k]) / (grid[k + 1] - grid[k]);
    values[k] + t * (values[k + 1] - values[k])
}

/// Read the confined strength ratio fcc/fc0 from the chart.
///
/// `ratio_1` enters on the curve-intersection axis, `ratio_2` selects the
/// interpolated curve, matching how the chart is traced by hand.
pub fn peak_ratio(ratio_1: f64, ratio_2: f64) -> Result<f64, ChartError> {
    if ratio_2 < CURVE_SELECTOR[0] || ratio_2 > CURVE_SELECTOR[15] {
        return Err(ChartError::OutOfRange { ratio: ratio_2 });
    }

    // stage 1: place ratio_2 on the curve grid
    let equivalent = interp(ratio_2, &CURVE_SELECTOR, &CURVE_GRID);

    // stage 2: interpolate a synthetic curve between the digitized ones
    let mut curve = [0.0_f64; 16];
    for (i, point) in curve.iter_mut().enumerate() {
        let across: Vec<f64> = CURVES.iter().map(|c| c[i]).collect();
        *point = interp(equivalent, &CURVE_GRID, &across);
    }

    // intersect with the smaller-ratio line
    for i in 0..RATIO_AXIS.len() - 1 {
        if (RATIO_AXIS[i] - ratio_1) * (RATIO_AXIS[i + 1] - ratio_1) <= 0.0 {
            let t = (ratio_1 - RATIO_AXIS[i]) / (RATIO_AXIS[i + 1] - RATIO_AXIS[i]);
            return Ok(curve[i] + t * (curve[i + 1] - curve[i]));
        }
    }
    Err(ChartError::NoIntersection { ratio: ratio_1 })
}
