// ═══════════════════════════════════════════════════════════════════
// Ranking Tests: rank(), project(), the four widget policies
// ═══════════════════════════════════════════════════════════════════

use market_dashboard_core::errors::CoreError;
use market_dashboard_core::models::asset::{AssetField, AssetRecord};
use market_dashboard_core::models::policy::{Comparison, Direction, RankingPolicy, RecordFilter};
use market_dashboard_core::models::snapshot::AssetSnapshot;
use market_dashboard_core::models::widget::WidgetKind;
use market_dashboard_core::services::projection_service::{project, project_field};
use market_dashboard_core::services::chart_service::ChartService;
use market_dashboard_core::services::ranking_service::{rank, rank_where};

fn priced(name: &str, price: f64) -> AssetRecord {
    AssetRecord::new(name.to_lowercase(), name).with_current_price(price)
}

fn names(ranked: &[&AssetRecord]) -> Vec<String> {
    ranked.iter().map(|r| r.name.clone()).collect()
}

fn policy(key: AssetField, direction: Direction, limit: usize) -> RankingPolicy {
    RankingPolicy::new(key, direction, None, limit).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  Policy construction
// ═══════════════════════════════════════════════════════════════════

mod policy_construction {
    use super::*;

    #[test]
    fn zero_limit_is_rejected() {
        let err = RankingPolicy::new(AssetField::MarketCap, Direction::Descending, None, 0)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPolicy(_)));
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let filter = RecordFilter::above(AssetField::CurrentPrice, f64::NAN);
        let err = RankingPolicy::new(AssetField::CurrentPrice, Direction::Ascending, Some(filter), 5)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPolicy(_)));
    }

    #[test]
    fn accessors_reflect_inputs() {
        let filter = RecordFilter::above(AssetField::CurrentPrice, 100.0);
        let p = RankingPolicy::new(AssetField::CurrentPrice, Direction::Ascending, Some(filter), 5)
            .unwrap();
        assert_eq!(p.key(), AssetField::CurrentPrice);
        assert_eq!(p.direction(), Direction::Ascending);
        assert_eq!(p.filter(), Some(&filter));
        assert_eq!(p.limit(), 5);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  rank()
// ═══════════════════════════════════════════════════════════════════

mod ranking {
    use super::*;

    #[test]
    fn empty_snapshot_ranks_to_empty() {
        for kind in WidgetKind::ALL {
            let spec = kind.spec().unwrap();
            assert!(rank(&[], &spec.policy).is_empty());
        }
    }

    #[test]
    fn ascending_puts_lowest_first() {
        let records = vec![priced("A", 3.0), priced("B", 1.0), priced("C", 2.0)];
        let ranked = rank(&records, &policy(AssetField::CurrentPrice, Direction::Ascending, 5));
        assert_eq!(names(&ranked), ["B", "C", "A"]);
    }

    #[test]
    fn descending_puts_highest_first() {
        let records = vec![priced("A", 3.0), priced("B", 1.0), priced("C", 2.0)];
        let ranked = rank(&records, &policy(AssetField::CurrentPrice, Direction::Descending, 5));
        assert_eq!(names(&ranked), ["A", "C", "B"]);
    }

    #[test]
    fn output_never_exceeds_limit() {
        let records: Vec<AssetRecord> = (0..20).map(|i| priced(&format!("C{i}"), i as f64)).collect();
        for limit in [1, 3, 5, 19, 20, 50] {
            let ranked = rank(&records, &policy(AssetField::CurrentPrice, Direction::Descending, limit));
            assert_eq!(ranked.len(), limit.min(records.len()));
        }
    }

    #[test]
    fn ties_keep_snapshot_order_in_both_directions() {
        let records = vec![
            priced("First", 10.0),
            priced("Low", 1.0),
            priced("Second", 10.0),
            priced("Third", 10.0),
        ];

        let asc = rank(&records, &policy(AssetField::CurrentPrice, Direction::Ascending, 5));
        assert_eq!(names(&asc), ["Low", "First", "Second", "Third"]);

        let desc = rank(&records, &policy(AssetField::CurrentPrice, Direction::Descending, 5));
        assert_eq!(names(&desc), ["First", "Second", "Third", "Low"]);
    }

    #[test]
    fn ties_cut_by_limit_keep_earliest() {
        let records = vec![priced("A", 5.0), priced("B", 5.0), priced("C", 5.0)];
        let ranked = rank(&records, &policy(AssetField::CurrentPrice, Direction::Descending, 2));
        assert_eq!(names(&ranked), ["A", "B"]);
    }

    #[test]
    fn signed_zeroes_tie() {
        let records = vec![priced("Neg", -0.0), priced("Pos", 0.0)];
        let desc = rank(&records, &policy(AssetField::CurrentPrice, Direction::Descending, 5));
        assert_eq!(names(&desc), ["Neg", "Pos"]);
    }

    #[test]
    fn ranking_twice_is_identical() {
        let records = vec![priced("A", 7.0), priced("B", 7.0), priced("C", 1.0), priced("D", 9.0)];
        let p = policy(AssetField::CurrentPrice, Direction::Descending, 3);
        let first: Vec<&AssetRecord> = rank(&records, &p);
        let second: Vec<&AssetRecord> = rank(&records, &p);
        assert_eq!(first, second);
    }

    #[test]
    fn input_is_not_reordered() {
        let records = vec![priced("A", 3.0), priced("B", 1.0)];
        let before = records.clone();
        let _ = rank(&records, &policy(AssetField::CurrentPrice, Direction::Ascending, 5));
        assert_eq!(records, before);
    }

    #[test]
    fn filter_is_honoured_for_every_result() {
        let records: Vec<AssetRecord> =
            (0..30).map(|i| priced(&format!("C{i}"), (i * 13 % 29) as f64 * 10.0)).collect();
        let filter = RecordFilter::new(AssetField::CurrentPrice, Comparison::GreaterOrEqual, 150.0);
        let p = RankingPolicy::new(AssetField::CurrentPrice, Direction::Ascending, Some(filter), 10)
            .unwrap();

        let ranked = rank(&records, &p);
        assert!(!ranked.is_empty());
        assert!(ranked.iter().all(|r| filter.matches(r)));
    }

    #[test]
    fn every_comparison_operator() {
        let records = vec![priced("Low", 50.0), priced("Edge", 100.0), priced("High", 150.0)];
        let cases = [
            (Comparison::GreaterThan, vec!["High"]),
            (Comparison::GreaterOrEqual, vec!["Edge", "High"]),
            (Comparison::LessThan, vec!["Low"]),
            (Comparison::LessOrEqual, vec!["Low", "Edge"]),
        ];
        for (comparison, expected) in cases {
            let filter = RecordFilter::new(AssetField::CurrentPrice, comparison, 100.0);
            let p = RankingPolicy::new(AssetField::CurrentPrice, Direction::Ascending, Some(filter), 5)
                .unwrap();
            assert_eq!(names(&rank(&records, &p)), expected, "{comparison:?}");
        }
    }

    #[test]
    fn eligibility_is_applied_before_the_limit() {
        let records = vec![priced("A", 4.0), priced("B", 3.0), priced("C", 2.0), priced("D", 1.0)];
        let p = policy(AssetField::CurrentPrice, Direction::Descending, 2);
        let ranked = rank_where(&records, &p, |r| r.name != "A");
        assert_eq!(names(&ranked), ["B", "C"]);
    }

    #[test]
    fn filter_on_a_different_field_than_the_key() {
        let records = vec![
            priced("Big", 1.0).with_market_cap(1e9),
            priced("Small", 2.0).with_market_cap(1e3),
            priced("NoCap", 3.0),
        ];
        let filter = RecordFilter::above(AssetField::MarketCap, 1e6);
        let p = RankingPolicy::new(AssetField::CurrentPrice, Direction::Descending, Some(filter), 5)
            .unwrap();
        assert_eq!(names(&rank(&records, &p)), ["Big"]);
    }

    #[test]
    fn non_finite_or_missing_keys_are_excluded() {
        let records = vec![
            priced("Nan", f64::NAN),
            priced("Inf", f64::INFINITY),
            priced("NegInf", f64::NEG_INFINITY),
            AssetRecord::new("missing", "Missing"),
            priced("Ok", 1.0),
        ];
        for direction in [Direction::Ascending, Direction::Descending] {
            let ranked = rank(&records, &policy(AssetField::CurrentPrice, direction, 10));
            assert_eq!(names(&ranked), ["Ok"]);
        }
    }

    #[test]
    fn missing_market_cap_only_affects_market_cap_ranking() {
        let records = vec![
            AssetRecord::new("a", "A").with_total_volume(5.0),
            AssetRecord::new("b", "B").with_total_volume(4.0).with_market_cap(100.0),
        ];
        let by_cap = rank(&records, &policy(AssetField::MarketCap, Direction::Descending, 3));
        assert_eq!(names(&by_cap), ["B"]);

        let by_volume = rank(&records, &policy(AssetField::TotalVolume, Direction::Descending, 3));
        assert_eq!(names(&by_volume), ["A", "B"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  project()
// ═══════════════════════════════════════════════════════════════════

mod projection {
    use super::*;

    #[test]
    fn empty_ranking_projects_to_empty_series() {
        let series = project(&[], |r| r.name.clone(), |r| r.current_price);
        assert!(series.is_empty());
        assert!(series.labels().is_empty());
        assert!(series.values().is_empty());
    }

    #[test]
    fn preserves_ranked_order() {
        let records = vec![priced("Z", 1.0), priced("A", 2.0), priced("M", 3.0)];
        let ranked: Vec<&AssetRecord> = records.iter().collect();
        let series = project_field(&ranked, AssetField::CurrentPrice);
        assert_eq!(series.labels(), ["Z", "A", "M"]);
        assert_eq!(series.values(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn custom_label_and_value_selectors() {
        let records = vec![priced("Bitcoin", 2.0)];
        let ranked: Vec<&AssetRecord> = records.iter().collect();
        let series = project(&ranked, |r| r.id.to_uppercase(), |r| r.current_price.map(|p| p * 10.0));
        assert_eq!(series.labels(), ["BITCOIN"]);
        assert_eq!(series.values(), [20.0]);
    }

    #[test]
    fn non_finite_value_is_dropped_with_its_label() {
        let records = vec![priced("A", 1.0), priced("B", f64::NAN), priced("C", 3.0)];
        let ranked: Vec<&AssetRecord> = records.iter().collect();
        let series = project_field(&ranked, AssetField::CurrentPrice);
        assert_eq!(series.labels(), ["A", "C"]);
        assert_eq!(series.values(), [1.0, 3.0]);
    }

    #[test]
    fn pairs_iterate_in_order() {
        let records = vec![priced("A", 1.5), priced("B", 2.5)];
        let ranked: Vec<&AssetRecord> = records.iter().collect();
        let series = project_field(&ranked, AssetField::CurrentPrice);
        let pairs: Vec<(&str, f64)> = series.iter().collect();
        assert_eq!(pairs, vec![("A", 1.5), ("B", 2.5)]);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Widget policies end to end
// ═══════════════════════════════════════════════════════════════════

mod widget_policies {
    use super::*;

    #[test]
    fn policy_table() {
        let cheapest = WidgetKind::CheapestAboveThreshold.spec().unwrap();
        assert_eq!(cheapest.policy.key(), AssetField::CurrentPrice);
        assert_eq!(cheapest.policy.direction(), Direction::Ascending);
        assert_eq!(
            cheapest.policy.filter(),
            Some(&RecordFilter::above(AssetField::CurrentPrice, 100.0))
        );
        assert_eq!(cheapest.policy.limit(), 5);

        let atl = WidgetKind::AllTimeLow.spec().unwrap();
        assert_eq!(atl.policy.key(), AssetField::AllTimeLow);
        assert_eq!(atl.policy.direction(), Direction::Descending);
        assert!(atl.policy.filter().is_none());
        assert_eq!(atl.policy.limit(), 5);

        let volume = WidgetKind::HighestVolume.spec().unwrap();
        assert_eq!(volume.policy.key(), AssetField::TotalVolume);
        assert_eq!(volume.policy.direction(), Direction::Descending);
        assert_eq!(volume.policy.limit(), 3);

        let cap = WidgetKind::HighestMarketCap.spec().unwrap();
        assert_eq!(cap.policy.key(), AssetField::MarketCap);
        assert_eq!(cap.policy.direction(), Direction::Descending);
        assert_eq!(cap.policy.limit(), 3);
    }

    #[test]
    fn cheapest_above_threshold_example() {
        let snapshot = AssetSnapshot::new(vec![
            priced("A", 50.0),
            priced("B", 150.0),
            priced("C", 120.0),
            priced("D", 300.0),
        ]);
        let spec = WidgetKind::CheapestAboveThreshold.spec().unwrap();
        let ranked = rank(snapshot.records(), &spec.policy);
        assert_eq!(names(&ranked), ["C", "B", "D"]);

        let series = project_field(&ranked, spec.value_field);
        assert_eq!(series.values(), [120.0, 150.0, 300.0]);
    }

    #[test]
    fn cheapest_threshold_is_strict() {
        let records = vec![priced("Exactly", 100.0), priced("Above", 100.01)];
        let spec = WidgetKind::CheapestAboveThreshold.spec().unwrap();
        assert_eq!(names(&rank(&records, &spec.policy)), ["Above"]);
    }

    /// The all-time-low widget ranks on `atl` but plots `ath`.
    /// If this test starts failing, the cross-field projection was changed.
    #[test]
    fn all_time_low_ranks_by_atl_but_plots_ath() {
        let records = vec![
            AssetRecord::new("x", "X").with_all_time_low(10.0).with_all_time_high(1000.0),
            AssetRecord::new("y", "Y").with_all_time_low(5.0).with_all_time_high(200.0),
        ];
        let spec = WidgetKind::AllTimeLow.spec().unwrap();
        assert_eq!(spec.value_field, AssetField::AllTimeHigh);

        let ranked = rank(&records, &spec.policy);
        assert_eq!(names(&ranked), ["X", "Y"]);

        let series = project_field(&ranked, spec.value_field);
        assert_eq!(series.labels(), ["X", "Y"]);
        assert_eq!(series.values(), [1000.0, 200.0]);
    }

    #[test]
    fn all_time_low_skips_records_without_ath_before_the_limit() {
        let mut records: Vec<AssetRecord> = (0..6)
            .map(|i| {
                AssetRecord::new(format!("c{i}"), format!("C{i}"))
                    .with_all_time_low(100.0 - i as f64)
                    .with_all_time_high(1000.0 + i as f64)
            })
            .collect();
        records[0].all_time_high = None;
        let snapshot = AssetSnapshot::new(records);
        let spec = WidgetKind::AllTimeLow.spec().unwrap();

        let view = ChartService::new().build_view(&spec, &snapshot);
        assert_eq!(view.series.labels(), ["C1", "C2", "C3", "C4", "C5"]);
        assert_eq!(view.series.values(), [1001.0, 1002.0, 1003.0, 1004.0, 1005.0]);
    }

    #[test]
    fn highest_volume_takes_three_with_stable_ties() {
        let records = vec![
            AssetRecord::new("a", "A").with_total_volume(10.0),
            AssetRecord::new("b", "B").with_total_volume(50.0),
            AssetRecord::new("c", "C").with_total_volume(30.0),
            AssetRecord::new("d", "D").with_total_volume(30.0),
            AssetRecord::new("e", "E").with_total_volume(5.0),
        ];
        let spec = WidgetKind::HighestVolume.spec().unwrap();
        let ranked = rank(&records, &spec.policy);
        assert_eq!(names(&ranked), ["B", "C", "D"]);

        let series = project_field(&ranked, spec.value_field);
        assert_eq!(series.values(), [50.0, 30.0, 30.0]);
    }

    #[test]
    fn highest_volume_with_small_snapshot() {
        let records = vec![
            AssetRecord::new("a", "A").with_total_volume(1.0),
            AssetRecord::new("b", "B").with_total_volume(2.0),
        ];
        let spec = WidgetKind::HighestVolume.spec().unwrap();
        assert_eq!(names(&rank(&records, &spec.policy)), ["B", "A"]);
    }

    #[test]
    fn market_cap_skips_nan_and_missing() {
        let records = vec![
            AssetRecord::new("a", "A").with_market_cap(f64::NAN),
            AssetRecord::new("b", "B"),
            AssetRecord::new("c", "C").with_market_cap(3.0),
            AssetRecord::new("d", "D").with_market_cap(4.0),
        ];
        let spec = WidgetKind::HighestMarketCap.spec().unwrap();
        assert_eq!(names(&rank(&records, &spec.policy)), ["D", "C"]);
    }

    #[test]
    fn nan_price_never_reaches_cheapest_widget() {
        let records = vec![priced("Nan", f64::NAN), priced("Real", 150.0)];
        let spec = WidgetKind::CheapestAboveThreshold.spec().unwrap();
        assert_eq!(names(&rank(&records, &spec.policy)), ["Real"]);
    }
}
