//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{BilinearFit, FitConfig, HazardResult};
use crate::io::ingest::IngestedSamples;

/// Format the full fit summary (dataset accounting + fitted parameters).
pub fn format_fit_summary(fit: &BilinearFit, ingest: &IngestedSamples, config: &FitConfig) -> String {
    let mut out = String::new();

    out.push_str("=== scour - Bilinear Profile Fit ===\n");
    out.push_str(&format!(
        "Rows: read={} used={} rejected={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));
    out.push_str(&format!("Breakpoint grid: {} candidates\n", config.grid_size));

    out.push_str("\nFitted parameters:\n");
    out.push_str(&format!("- k1 (initial stiffness)    = {:.6}\n", fit.k1));
    out.push_str(&format!("- k2 (post-yield stiffness) = {:.6}\n", fit.k2));
    out.push_str(&format!("- d_y (yield displacement)  = {:.6}\n", fit.dy));
    out.push_str(&format!("- f_y (yield force)         = {:.6}\n", fit.fy));
    out.push_str(&format!("- SSE                       = {:.6}\n", fit.sse));

    out
}

/// Format row-level ingest problems, one line each.
pub fn format_row_errors(ingest: &IngestedSamples) -> String {
    let mut out = String::new();
    for err in &ingest.row_errors {
        out.push_str(&format!("line {}: {}\n", err.line, err.message));
    }
    out
}

/// Format the hazard summary plus a decimated exceedance table.
///
/// `table_rows = 0` suppresses the table.
pub fn format_hazard_summary(result: &HazardResult, table_rows: usize) -> String {
    let mut out = String::new();

    out.push_str("=== scour - 50-year Scour Hazard ===\n");
    out.push_str(&format!("Samples: n={}\n", result.depths.len()));
    if let Some(scales) = &result.scales {
        out.push_str(&format!(
            "Scales: Re={:.4e} | z_max={:.1} mm | z50={:.1} mm\n",
            scales.reynolds, scales.z_max_mm, scales.z50_mm
        ));
    } else {
        out.push_str("Scales: (combined batches)\n");
    }
    out.push_str(&format!(
        "Depth (m): mean={:.4} std={:.4} | log-mean={:.4} log-std={:.4}\n",
        result.mean, result.std, result.log_mean, result.log_std
    ));
    out.push_str(&format!(
        "Range (m): [{:.4}, {:.4}]\n",
        result.depths_sorted.first().copied().unwrap_or(f64::NAN),
        result.depths_sorted.last().copied().unwrap_or(f64::NAN)
    ));

    if table_rows > 0 && !result.depths_sorted.is_empty() {
        out.push_str("\nHazard curve (exceedance):\n");
        out.push_str("  depth (m)   P[Z > z]\n");
        for idx in decimate(result.depths_sorted.len(), table_rows) {
            out.push_str(&format!(
                "  {:>9.4}   {:>8.4}\n",
                result.depths_sorted[idx],
                1.0 - result.cdf[idx]
            ));
        }
    }

    out
}

/// Pick up to `rows` evenly spaced indices across `0..len`, always
/// including the first and last point.
fn decimate(len: usize, rows: usize) -> Vec<usize> {
    if len <= rows {
        return (0..len).collect();
    }
    // len > rows implies len >= 2; two rows is the smallest useful table.
    let rows = rows.max(2);
    let mut out = Vec::with_capacity(rows);
    for i in 0..rows {
        let idx = (i as f64 * (len - 1) as f64 / (rows - 1) as f64).round() as usize;
        if out.last() != Some(&idx) {
            out.push(idx);
        }
    }
    out
}
