/// Compute X (trials) and Y (seconds) upper bounds for the reaction time chart
pub fn compute_chart_params(points: &[(f64, f64)], min_trials: usize) -> (f64, f64) {
    let slowest = points.iter().map(|&(_, secs)| secs).fold(0.0_f64, f64::max);
    let last_trial = points.last().map_or(0.0, |&(trial, _)| trial);

    let x_max = last_trial.max(min_trials as f64).max(2.0);
    // leave headroom above the slowest response, at least one second
    let y_max = ((slowest * 1.2) * 10.0).ceil() / 10.0;

    (x_max, y_max.max(1.0))
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.1}")
    }
}
