use std::io::Write;

use market_dashboard_core::models::chart::{ChartPayload, WidgetView};
use market_dashboard_core::models::snapshot::AssetSnapshot;

use crate::error::CliError;

/// Write a snapshot header, then each widget as a titled, ranked list of
/// names and formatted values.
pub fn render_table<W: Write>(
    out: &mut W,
    snapshot: &AssetSnapshot,
    views: &[WidgetView],
    currency_symbol: &str,
) -> Result<(), CliError> {
    if snapshot.is_empty() {
        writeln!(out, "Market snapshot: no data")?;
    } else {
        writeln!(
            out,
            "Market snapshot: {} assets, fetched {}",
            snapshot.len(),
            snapshot.fetched_at().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
    }

    for view in views {
        writeln!(out)?;
        writeln!(out, "{} [{}]", view.title, view.chart_kind)?;
        writeln!(out, "{}", view.subheader)?;

        if view.series.is_empty() {
            writeln!(out, "  (no data)")?;
            continue;
        }

        let formatted = view.formatted_values(currency_symbol);
        let name_width = view
            .series
            .labels()
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let value_width = formatted.iter().map(String::len).max().unwrap_or(0);

        for (rank, (label, value)) in view.series.labels().iter().zip(&formatted).enumerate() {
            writeln!(
                out,
                "  {:>2}. {label:<name_width$}  {value:>value_width$}",
                rank + 1
            )?;
        }
    }
    Ok(())
}

pub fn render_json<W: Write>(
    out: &mut W,
    payloads: &[ChartPayload],
    pretty: bool,
) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, payloads)?;
    } else {
        serde_json::to_writer(&mut *out, payloads)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use market_dashboard_core::models::asset::AssetRecord;
    use market_dashboard_core::models::chart::{ChartKind, RankedSeries};
    use market_dashboard_core::models::widget::WidgetKind;

    fn view(series: RankedSeries) -> WidgetView {
        WidgetView {
            kind: WidgetKind::HighestVolume,
            title: "Top 3 Cryptocurrencies By Volume".into(),
            subheader: "Top 3 Cryptocurrencies Measured By Their Total Volume".into(),
            chart_kind: ChartKind::Pie,
            series,
        }
    }

    #[test]
    fn table_lists_ranked_rows_with_currency() {
        let mut series = RankedSeries::new();
        series.push("Tether", 52_000_000_000.0);
        series.push("Bitcoin", 31_500_000_000.5);

        let at = Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 5).unwrap();
        let snapshot = AssetSnapshot::with_timestamp(
            vec![AssetRecord::new("tether", "Tether"), AssetRecord::new("bitcoin", "Bitcoin")],
            at,
        );

        let mut out = Vec::new();
        render_table(&mut out, &snapshot, &[view(series)], "$").unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(
            "Market snapshot: 2 assets, fetched 2024-03-14 09:30:05 UTC\n\n\
             Top 3 Cryptocurrencies By Volume [Pie]\n"
        ));
        assert!(text.contains("   1. Tether   $52,000,000,000.00\n"));
        assert!(text.contains("   2. Bitcoin  $31,500,000,000.50\n"));
    }

    #[test]
    fn empty_series_prints_placeholder() {
        let mut out = Vec::new();
        render_table(&mut out, &AssetSnapshot::empty(), &[view(RankedSeries::new())], "$").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Market snapshot: no data\n"));
        assert!(text.ends_with("  (no data)\n"));
    }

    #[test]
    fn json_is_a_single_line_array() {
        let mut out = Vec::new();
        render_json(&mut out, &[], false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
