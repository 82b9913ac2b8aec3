use crate::categories::{
    DayOfWeek, HumidityBucket, Season, TemperatureBucket, WeatherSituation, WindBucket,
};
use crate::models::{
    BarPoint, BarSeries, CountBar, CountPlot, DailyRecord, DashboardResponse, Dataset,
    HourlyRecord, PieSeries, PieSlice, RiderTotals, SelectedRange, WeatherPanels,
};
use crate::range::DateRange;
use std::collections::BTreeMap;

const AVERAGE_RENTALS: &str = "Average Bike Rentals";
const DAY_COUNT: &str = "Jumlah Hari";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionCounts {
    pub temperature: BTreeMap<TemperatureBucket, u64>,
    pub humidity: BTreeMap<HumidityBucket, u64>,
    pub wind: BTreeMap<WindBucket, u64>,
    pub weather: BTreeMap<WeatherSituation, u64>,
}

pub fn rider_totals<'a>(days: impl IntoIterator<Item = &'a DailyRecord>) -> RiderTotals {
    days.into_iter().fold(
        RiderTotals {
            registered: 0,
            casual: 0,
        },
        |acc, day| RiderTotals {
            registered: acc.registered + u64::from(day.registered),
            casual: acc.casual + u64::from(day.casual),
        },
    )
}

pub fn weekday_means<'a>(
    days: impl IntoIterator<Item = &'a DailyRecord>,
) -> BTreeMap<DayOfWeek, f64> {
    mean_by(days, |day| day.weekday, |day| day.cnt)
}

pub fn hourly_means<'a>(hours: impl IntoIterator<Item = &'a HourlyRecord>) -> BTreeMap<u8, f64> {
    mean_by(hours, |hour| hour.hour, |hour| hour.day.cnt)
}

pub fn holiday_sums<'a>(days: impl IntoIterator<Item = &'a DailyRecord>) -> BTreeMap<bool, u64> {
    let mut sums = BTreeMap::new();
    for day in days {
        *sums.entry(day.holiday).or_insert(0u64) += u64::from(day.cnt);
    }
    sums
}

pub fn season_means<'a>(days: impl IntoIterator<Item = &'a DailyRecord>) -> BTreeMap<Season, f64> {
    mean_by(days, |day| day.season, |day| day.cnt)
}

pub fn working_day_means<'a>(
    days: impl IntoIterator<Item = &'a DailyRecord>,
) -> BTreeMap<bool, f64> {
    mean_by(days, |day| day.working_day, |day| day.cnt)
}

pub fn condition_counts<'a>(days: impl IntoIterator<Item = &'a DailyRecord>) -> ConditionCounts {
    let mut counts = ConditionCounts::default();
    for day in days {
        let categories = &day.categories;
        *counts.temperature.entry(categories.temperature).or_default() += 1;
        *counts.humidity.entry(categories.humidity).or_default() += 1;
        *counts.wind.entry(categories.wind).or_default() += 1;
        *counts.weather.entry(categories.weather).or_default() += 1;
    }
    counts
}

/// Position of the largest value; the first one wins on ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}

fn mean_by<'a, T: 'a, K: Ord>(
    rows: impl IntoIterator<Item = &'a T>,
    key: impl Fn(&T) -> K,
    value: impl Fn(&T) -> u32,
) -> BTreeMap<K, f64> {
    let mut groups: BTreeMap<K, (u64, u64)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(key(row)).or_default();
        entry.0 += u64::from(value(row));
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(key, (sum, count))| (key, sum as f64 / count as f64))
        .collect()
}

pub fn build_dashboard(dataset: &Dataset, range: DateRange) -> DashboardResponse {
    let days: Vec<&DailyRecord> = dataset
        .daily
        .iter()
        .filter(|day| range.contains(day.date))
        .collect();
    let hours: Vec<&HourlyRecord> = dataset
        .hourly
        .iter()
        .filter(|hour| range.contains(hour.day.date))
        .collect();

    let (min_date, max_date) = dataset.date_bounds().unwrap_or((range.start, range.end));

    DashboardResponse {
        range: SelectedRange {
            start: range.start.to_string(),
            end: range.end.to_string(),
            min_date: min_date.to_string(),
            max_date: max_date.to_string(),
            days_selected: days.len(),
        },
        totals: rider_totals(days.iter().copied()),
        by_weekday: weekday_chart(&weekday_means(days.iter().copied())),
        by_hour: hourly_chart(&hourly_means(hours.iter().copied())),
        by_holiday: holiday_pie(&holiday_sums(days.iter().copied())),
        by_season: season_pie(&season_means(days.iter().copied())),
        by_working_day: working_day_chart(&working_day_means(days.iter().copied())),
        conditions: weather_panels(&condition_counts(days.iter().copied())),
    }
}

pub fn weekday_chart(means: &BTreeMap<DayOfWeek, f64>) -> BarSeries {
    let points = means
        .iter()
        .map(|(weekday, &mean)| BarPoint {
            key: weekday.code(),
            label: weekday.label().to_string(),
            value: mean,
        })
        .collect();
    bar_series("Rata-Rata Sewa Sepeda Berdasarkan Hari", None, points)
}

pub fn hourly_chart(means: &BTreeMap<u8, f64>) -> BarSeries {
    let points = means
        .iter()
        .map(|(&hour, &mean)| BarPoint {
            key: hour,
            label: hour.to_string(),
            value: mean,
        })
        .collect();
    bar_series(
        "Rata-Rata Sewa Sepeda Berdasarkan Jam",
        Some("Hour of the Day"),
        points,
    )
}

pub fn working_day_chart(means: &BTreeMap<bool, f64>) -> BarSeries {
    let points = means
        .iter()
        .map(|(&working, &mean)| BarPoint {
            key: u8::from(working),
            label: working_day_label(working).to_string(),
            value: mean,
        })
        .collect();
    bar_series("Sewa Sepeda: Hari Kerja vs Akhir Pekan", None, points)
}

fn working_day_label(working: bool) -> &'static str {
    if working { "Working Day" } else { "Weekend/Holiday" }
}

fn bar_series(title: &str, x_label: Option<&str>, points: Vec<BarPoint>) -> BarSeries {
    let values: Vec<f64> = points.iter().map(|point| point.value).collect();
    BarSeries {
        title: title.to_string(),
        x_label: x_label.map(str::to_string),
        y_label: AVERAGE_RENTALS.to_string(),
        highlight: argmax(&values),
        points,
    }
}

/// The first slice is always pulled out.
pub fn holiday_pie(sums: &BTreeMap<bool, u64>) -> PieSeries {
    let slices = sums
        .iter()
        .map(|(&holiday, &sum)| {
            let label = if holiday { "Holidays" } else { "Regular Days" };
            (label, sum as f64)
        })
        .collect::<Vec<_>>();
    pie_series("Holidays vs Regular Days", &slices, Some(0))
}

/// The slice whose position matches the argmax of the means is pulled out.
pub fn season_pie(means: &BTreeMap<Season, f64>) -> PieSeries {
    let slices = means
        .iter()
        .map(|(season, &mean)| (season.label(), mean))
        .collect::<Vec<_>>();
    let values: Vec<f64> = slices.iter().map(|(_, value)| *value).collect();
    pie_series("Season", &slices, argmax(&values))
}

fn pie_series(title: &str, slices: &[(&str, f64)], offset: Option<usize>) -> PieSeries {
    let total: f64 = slices.iter().map(|(_, value)| value).sum();
    PieSeries {
        title: title.to_string(),
        slices: slices
            .iter()
            .enumerate()
            .map(|(index, &(label, value))| PieSlice {
                label: label.to_string(),
                value,
                percent: if total > 0.0 { value / total * 100.0 } else { 0.0 },
                offset: offset == Some(index),
            })
            .collect(),
    }
}

pub fn weather_panels(counts: &ConditionCounts) -> WeatherPanels {
    WeatherPanels {
        temperature: count_plot(
            "Distribusi Hari Berdasarkan Suhu",
            "Kategori Suhu",
            TemperatureBucket::ALL
                .iter()
                .map(|bucket| (bucket.label(), tally(&counts.temperature, bucket))),
        ),
        humidity: count_plot(
            "Distribusi Hari Berdasarkan Kelembapan",
            "Kategori Kelembapan",
            HumidityBucket::ALL
                .iter()
                .map(|bucket| (bucket.label(), tally(&counts.humidity, bucket))),
        ),
        wind: count_plot(
            "Distribusi Hari Berdasarkan Kecepatan Angin",
            "Kategori Kecepatan Angin",
            WindBucket::ALL
                .iter()
                .map(|bucket| (bucket.label(), tally(&counts.wind, bucket))),
        ),
        weather: count_plot(
            "Distribusi Hari Berdasarkan Kondisi Cuaca",
            "Kategori Kondisi Cuaca",
            WeatherSituation::ALL
                .iter()
                .map(|situation| (situation.label(), tally(&counts.weather, situation))),
        ),
    }
}

fn tally<K: Ord>(counts: &BTreeMap<K, u64>, key: &K) -> u64 {
    counts.get(key).copied().unwrap_or(0)
}

fn count_plot<'a>(
    title: &str,
    x_label: &str,
    bars: impl Iterator<Item = (&'a str, u64)>,
) -> CountPlot {
    CountPlot {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: DAY_COUNT.to_string(),
        bars: bars
            .map(|(label, count)| CountBar {
                label: label.to_string(),
                count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawDayRow;
    use chrono::{Duration, NaiveDate};

    fn day(offset: i64, weekday: u8, holiday: u8, season: u8, cnt: u32) -> DailyRecord {
        let date = NaiveDate::from_ymd_opt(2011, 1, 2).unwrap() + Duration::days(offset);
        RawDayRow {
            dteday: date.to_string(),
            season,
            holiday,
            weekday,
            workingday: u8::from(holiday == 0 && (1..=5).contains(&weekday)),
            weathersit: 1,
            temp: 0.3,
            hum: 0.5,
            windspeed: 0.2,
            casual: cnt / 4,
            registered: cnt - cnt / 4,
            cnt,
        }
        .into_record()
        .unwrap()
    }

    fn two_weeks() -> Vec<DailyRecord> {
        (0..14)
            .map(|offset| {
                let weekday = (offset % 7) as u8;
                let cnt = 1000 + u32::from(weekday) * 100 + if offset >= 7 { 50 } else { 0 };
                day(offset, weekday, 0, 1, cnt)
            })
            .collect()
    }

    #[test]
    fn holiday_sums_per_flag() {
        let days = vec![day(0, 0, 0, 1, 100), day(1, 1, 1, 1, 50), day(2, 2, 0, 1, 200)];
        let sums = holiday_sums(&days);
        assert_eq!(sums.get(&false), Some(&300));
        assert_eq!(sums.get(&true), Some(&50));
        assert_eq!(sums.len(), 2);
    }

    #[test]
    fn weekday_means_match_population_mean_and_highlight_argmax() {
        let days = two_weeks();
        let means = weekday_means(&days);
        assert_eq!(means.len(), 7);

        let population = days.iter().map(|d| f64::from(d.cnt)).sum::<f64>() / days.len() as f64;
        let mean_of_means = means.values().sum::<f64>() / 7.0;
        assert!((population - mean_of_means).abs() < 1e-9);
        assert_eq!(means[&DayOfWeek::Wednesday], 1325.0);

        let chart = weekday_chart(&means);
        let values: Vec<f64> = chart.points.iter().map(|p| p.value).collect();
        assert_eq!(chart.highlight, argmax(&values));
        assert_eq!(chart.highlight, Some(6));
        assert_eq!(chart.points[0].label, "Sunday");
        assert_eq!(chart.points[6].label, "Saturday");
    }

    #[test]
    fn argmax_prefers_first_maximum() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn hourly_means_group_by_hour() {
        let base = day(0, 0, 0, 1, 0);
        let hours: Vec<HourlyRecord> = [(8u8, 100u32), (8, 300), (17, 500)]
            .into_iter()
            .map(|(hour, cnt)| {
                let mut record = base.clone();
                record.cnt = cnt;
                HourlyRecord { day: record, hour }
            })
            .collect();
        let means = hourly_means(&hours);
        assert_eq!(means.get(&8), Some(&200.0));
        assert_eq!(means.get(&17), Some(&500.0));

        let chart = hourly_chart(&means);
        assert_eq!(chart.highlight, Some(1));
        assert_eq!(chart.points[1].key, 17);
    }

    #[test]
    fn holiday_pie_offsets_first_slice() {
        let days = vec![day(0, 0, 0, 1, 100), day(1, 1, 1, 1, 50), day(2, 2, 0, 1, 200)];
        let pie = holiday_pie(&holiday_sums(&days));
        assert_eq!(pie.slices[0].label, "Regular Days");
        assert!(pie.slices[0].offset);
        assert!(!pie.slices[1].offset);
        assert!((pie.slices[1].percent - 50.0 / 350.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn season_pie_offsets_slice_at_argmax_position() {
        let days = vec![
            day(0, 0, 0, 1, 100),
            day(1, 1, 0, 2, 400),
            day(2, 2, 0, 3, 700),
            day(3, 3, 0, 3, 500),
            day(4, 4, 0, 4, 300),
        ];
        let pie = season_pie(&season_means(&days));
        let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Springer", "Summer", "Fall", "Winter"]);
        let offsets: Vec<bool> = pie.slices.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, [false, false, true, false]);
    }

    #[test]
    fn condition_counts_keep_fixed_order_with_zeros() {
        let days = two_weeks();
        let panels = weather_panels(&condition_counts(&days));
        let temperature: Vec<(&str, u64)> = panels
            .temperature
            .bars
            .iter()
            .map(|bar| (bar.label.as_str(), bar.count))
            .collect();
        assert_eq!(
            temperature,
            [("Dingin", 0), ("Sejuk", 14), ("Hangat", 0), ("Panas", 0)]
        );
        assert_eq!(panels.weather.bars.len(), 4);
        assert_eq!(panels.weather.bars[0].count, 14);
        assert_eq!(panels.wind.bars[0].label, "Tenang");
        assert_eq!(panels.humidity.bars[1].count, 14);
    }

    #[test]
    fn dashboard_applies_range_to_every_aggregate() {
        let dataset = Dataset {
            daily: two_weeks(),
            hourly: Vec::new(),
        };
        let start = dataset.daily[0].date;
        let range = DateRange {
            start,
            end: start + Duration::days(6),
        };
        let dashboard = build_dashboard(&dataset, range);
        assert_eq!(dashboard.range.days_selected, 7);
        assert_eq!(dashboard.by_weekday.points[0].value, 1000.0);
        let total_cnt: u64 = dataset.daily[..7].iter().map(|d| u64::from(d.cnt)).sum();
        assert_eq!(
            dashboard.totals.registered + dashboard.totals.casual,
            total_cnt
        );
        let counted: u64 = dashboard.conditions.temperature.bars.iter().map(|b| b.count).sum();
        assert_eq!(counted, 7);
        assert!(dashboard.by_hour.points.is_empty());
        assert_eq!(dashboard.by_hour.highlight, None);
    }

    #[test]
    fn dashboard_is_deterministic() {
        let dataset = Dataset {
            daily: two_weeks(),
            hourly: Vec::new(),
        };
        let (start, end) = dataset.date_bounds().unwrap();
        let range = DateRange { start, end };
        assert_eq!(build_dashboard(&dataset, range), build_dashboard(&dataset, range));
    }

    #[test]
    fn dashboard_json_uses_field_names_read_by_page() {
        let days = vec![day(0, 0, 0, 1, 100), day(1, 1, 1, 3, 50), day(2, 2, 0, 3, 200)];
        let dataset = Dataset {
            daily: days,
            hourly: Vec::new(),
        };
        let (start, end) = dataset.date_bounds().unwrap();
        let json = serde_json::to_value(build_dashboard(&dataset, DateRange { start, end })).unwrap();

        assert_eq!(json["range"]["days_selected"], 3);
        assert_eq!(json["totals"]["casual"], 25 + 12 + 50);
        assert_eq!(json["by_weekday"]["points"][0]["label"], "Sunday");
        assert_eq!(json["by_weekday"]["highlight"], 2);
        assert_eq!(json["by_weekday"]["y_label"], "Average Bike Rentals");
        assert!(json["by_hour"]["highlight"].is_null());
        assert_eq!(json["by_hour"]["x_label"], "Hour of the Day");
        assert_eq!(json["by_holiday"]["slices"][0]["offset"], true);
        assert_eq!(json["by_holiday"]["slices"][1]["label"], "Holidays");
        assert_eq!(json["by_season"]["slices"][1]["label"], "Fall");
        assert_eq!(json["by_season"]["slices"][1]["offset"], true);
        assert!(json["by_working_day"]["points"].is_array());
        assert_eq!(json["conditions"]["temperature"]["bars"][1]["count"], 3);
        assert_eq!(json["conditions"]["weather"]["y_label"], "Jumlah Hari");
    }
}
