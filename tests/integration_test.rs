use std::collections::BTreeMap;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use airquality_dash::{routes, Catalog, Config};

#[derive(Debug, Deserialize)]
struct Reading {
    hour_label: String,
    aqi: i64,
    pm25: i64,
    pm10: i64,
    no2: i64,
    so2: i64,
    co: i64,
    o3: i64,
}

#[derive(Debug, Deserialize)]
struct HourPoint {
    hour_label: String,
    aqi: i64,
}

#[derive(Debug, Deserialize)]
struct Summary {
    mean_aqi: f64,
    peak: HourPoint,
    distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct Limit {
    pollutant: String,
    safe_limit: u32,
}

#[derive(Debug, Deserialize)]
struct DayView {
    readings: Vec<Reading>,
    summary: Summary,
    safe_limits: Vec<Limit>,
}

#[derive(Debug, Deserialize)]
struct Daily {
    date: String,
    aqi: i64,
}

#[derive(Debug, Deserialize)]
struct HistoryView {
    window_days: u32,
    end_date: String,
    series: BTreeMap<String, Vec<Daily>>,
}

#[derive(Debug, Deserialize)]
struct Status {
    label: String,
    severity_rank: u8,
}

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_app(seed: Option<u64>) -> Result<String> {
    // ---
    let config = Config {
        rng_seed: seed,
        ..Config::default()
    };
    let app = routes::router(routes::AppState::new(Catalog::builtin(), config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn day_endpoint_generates_full_profile() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let url = format!("{}/cities/Delhi/day", base);

    let view: DayView = Client::new().get(&url).send().await?.json().await?;

    assert_eq!(view.readings.len(), 24, "expected 24 hourly readings");
    for (hour, r) in view.readings.iter().enumerate() {
        // ---
        assert_eq!(r.hour_label, format!("{:02}:00", hour));
        assert!(r.aqi >= 0);

        // Pollutants follow their fixed ratios within the noise band.
        let checks = [
            (r.pm25, 0.65),
            (r.pm10, 0.85),
            (r.no2, 0.28),
            (r.so2, 0.15),
            (r.co, 0.12),
            (r.o3, 0.22),
        ];
        for (value, ratio) in checks {
            let exact = r.aqi as f64 * ratio;
            assert!(
                value >= (exact * 0.95).floor() as i64 && value <= (exact * 1.05).floor() as i64,
                "pollutant {} outside band for AQI {} (ratio {})",
                value,
                r.aqi,
                ratio
            );
        }
    }

    let max = view.readings.iter().map(|r| r.aqi).max().unwrap();
    assert_eq!(view.summary.peak.aqi, max);
    assert_eq!(view.summary.distribution.values().sum::<usize>(), 24);
    assert!(view.summary.mean_aqi > 0.0);
    assert!(!view.summary.peak.hour_label.is_empty());

    assert_eq!(view.safe_limits.len(), 6);
    assert_eq!(view.safe_limits[0].pollutant, "PM2.5");
    assert_eq!(view.safe_limits[0].safe_limit, 60);
    assert_eq!(view.safe_limits[4].pollutant, "CO");
    assert_eq!(view.safe_limits[4].safe_limit, 4);

    Ok(())
}

#[tokio::test]
async fn seeded_services_agree() -> Result<()> {
    // ---
    let a = spawn_app(Some(11)).await?;
    let b = spawn_app(Some(11)).await?;
    let client = Client::new();

    let first: DayView = client
        .get(format!("{}/cities/Tokyo/day", a))
        .send()
        .await?
        .json()
        .await?;
    let second: DayView = client
        .get(format!("{}/cities/Tokyo/day", b))
        .send()
        .await?
        .json()
        .await?;

    let aqi_a: Vec<i64> = first.readings.iter().map(|r| r.aqi).collect();
    let aqi_b: Vec<i64> = second.readings.iter().map(|r| r.aqi).collect();
    assert_eq!(aqi_a, aqi_b);

    Ok(())
}

#[tokio::test]
async fn history_window_ends_on_requested_date() -> Result<()> {
    // ---
    let base = spawn_app(Some(3)).await?;
    let url = format!("{}/history?cities=Delhi,London&end=2025-03-26", base);

    let view: HistoryView = Client::new().get(&url).send().await?.json().await?;

    assert_eq!(view.window_days, 30);
    assert_eq!(view.end_date, "2025-03-26");
    assert_eq!(view.series.len(), 2);

    let delhi = &view.series["Delhi"];
    assert_eq!(delhi.len(), 30);
    assert_eq!(delhi.first().unwrap().date, "2025-02-25");
    assert_eq!(delhi.last().unwrap().date, "2025-03-26");
    assert!(delhi.windows(2).all(|w| w[0].date < w[1].date));
    assert!(delhi.iter().all(|d| (265..=358).contains(&d.aqi)));

    Ok(())
}

#[tokio::test]
async fn search_and_lookup_errors() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let client = Client::new();

    let found: Vec<serde_json::Value> = client
        .get(format!("{}/cities?q=australia", base))
        .send()
        .await?
        .json()
        .await?;
    let names: Vec<&str> = found.iter().filter_map(|c| c["name"].as_str()).collect();
    assert_eq!(names, vec!["Sydney", "Melbourne"]);

    let missing = client.get(format!("{}/cities/Atlantis/day", base)).send().await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let no_hotspots = client.get(format!("{}/cities/Tokyo/hotspots", base)).send().await?;
    assert_eq!(no_hotspots.status(), StatusCode::NOT_FOUND);

    let bad_history = client
        .get(format!("{}/history?cities=Delhi,Atlantis", base))
        .send()
        .await?;
    assert_eq!(bad_history.status(), StatusCode::NOT_FOUND);

    let bad_comparison = client
        .get(format!("{}/comparison?cities=Atlantis", base))
        .send()
        .await?;
    assert_eq!(bad_comparison.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn status_endpoint_classifies() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let client = Client::new();

    let status: Status = client
        .get(format!("{}/status/201", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(status.label, "Very Unhealthy");
    assert_eq!(status.severity_rank, 4);

    let negative = client.get(format!("{}/status/-1", base)).send().await?;
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn comparison_and_hotspots() -> Result<()> {
    // ---
    let base = spawn_app(None).await?;
    let client = Client::new();

    let cmp: serde_json::Value = client
        .get(format!("{}/comparison", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(cmp["highest"]["name"], "Delhi");
    assert_eq!(cmp["lowest"]["name"], "Sydney");
    assert_eq!(cmp["unhealthy"], 3);
    assert_eq!(cmp["total"], 10);

    let report: serde_json::Value = client
        .get(format!("{}/cities/Delhi/hotspots", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(report["worst"]["name"], "Anand Vihar");
    assert_eq!(report["mask"]["urgency"], "CRITICAL");
    assert_eq!(report["top"].as_array().map(Vec::len), Some(3));

    let health: serde_json::Value = client
        .get(format!("{}/health", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(health["status"], "ok");

    Ok(())
}
