use crate::types::{PricePoint, PriceSeries};

/// Sum several per-asset price paths into one portfolio-level path.
///
/// Series are combined by index, not by timestamp: point `i` of the output
/// takes its timestamp from the first series and its value from the sum of
/// every series' point `i`.  Longer inputs are truncated to the shortest.
/// This assumes all inputs were generated back-to-back against the same
/// "now", so index `i` means the same hour in each of them; series built at
/// different instants may be misaligned by up to the generation gap.
pub fn combine_series(series: &[PriceSeries]) -> PriceSeries {
    if series.is_empty() {
        return Vec::new();
    }

    let min_len = series.iter().map(|s| s.len()).min().unwrap_or(0);

    (0..min_len)
        .map(|i| PricePoint {
            timestamp: series[0][i].timestamp,
            value: series.iter().map(|s| s[i].value).sum(),
        })
        .collect()
}
