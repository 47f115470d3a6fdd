#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for rights monitor analytics.
//!
//! Loads a JSON snapshot into memory, runs one aggregation, and prints the
//! result as pretty JSON on stdout.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rights_monitor_analytics::{
    get_geo_data, get_overview, get_report_analytics, get_timeline, get_violation_counts,
};
use rights_monitor_analytics_models::{FilterParams, GeoParams, OverviewParams, TimelineParams};
use rights_monitor_store::{RecordStore, connect};

#[derive(Parser)]
#[command(name = "rights_monitor_cli", about = "Case analytics from a record snapshot")]
struct Cli {
    /// Snapshot file to load. Falls back to `RIGHTS_MONITOR_SNAPSHOT`.
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Violation-type counts across matching cases
    Violations(Filters),
    /// Cases clustered by location
    Geo {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        violation_type: Option<String>,
    },
    /// Case counts over time
    Timeline {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        violation_type: Option<String>,
        /// day, week, month, or year
        #[arg(long)]
        interval: Option<String>,
    },
    /// Dashboard totals and violation counts
    Overview {
        #[command(flatten)]
        filters: Filters,
        /// Include a monthly timeline
        #[arg(long)]
        timeline: bool,
        /// Include geo clusters
        #[arg(long)]
        geo: bool,
    },
    /// Incident report totals by violation label and review status
    Reports(Filters),
}

#[derive(Args, Default)]
struct Filters {
    #[arg(long)]
    start_date: Option<String>,
    #[arg(long)]
    end_date: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    violation_type: Option<String>,
}

impl From<Filters> for FilterParams {
    fn from(filters: Filters) -> Self {
        Self {
            start_date: filters.start_date,
            end_date: filters.end_date,
            country: filters.country,
            region: filters.region,
            violation_type: filters.violation_type,
        }
    }
}

/// Runs `command` against `store` and returns the result as JSON.
async fn execute(
    store: &dyn RecordStore,
    command: Commands,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let value = match command {
        Commands::Violations(filters) => {
            serde_json::to_value(get_violation_counts(store, &filters.into()).await?)?
        }
        Commands::Geo {
            country,
            region,
            violation_type,
        } => {
            let params = GeoParams {
                country,
                region,
                violation_type,
            };
            serde_json::to_value(get_geo_data(store, &params).await?)?
        }
        Commands::Timeline {
            start_date,
            end_date,
            violation_type,
            interval,
        } => {
            let params = TimelineParams {
                start_date,
                end_date,
                violation_type,
                interval,
            };
            serde_json::to_value(get_timeline(store, &params).await?)?
        }
        Commands::Overview {
            filters,
            timeline,
            geo,
        } => {
            let params = OverviewParams {
                start_date: filters.start_date,
                end_date: filters.end_date,
                country: filters.country,
                region: filters.region,
                violation_type: filters.violation_type,
                include_timeline: timeline,
                include_geo: geo,
            };
            serde_json::to_value(get_overview(store, &params).await?)?
        }
        Commands::Reports(filters) => {
            serde_json::to_value(get_report_analytics(store, &filters.into()).await?)?
        }
    };

    Ok(value)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let store: Box<dyn RecordStore> = match &cli.snapshot {
        Some(path) => Box::new(connect::open(Some(path.as_path())).await?),
        None => connect::connect_from_env().await?,
    };

    match execute(store.as_ref(), cli.command).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            log::error!("Aggregation failed: {e}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rights_monitor_analytics::AnalyticsError;
    use rights_monitor_store::{memory::MemoryStore, snapshot::Snapshot};

    fn fixture() -> MemoryStore {
        let snapshot = Snapshot::from_json(
            r#"{
                "cases": [
                    {
                        "case_id": "C-1",
                        "title": "Detention",
                        "violation_types": ["arbitrary_detention"],
                        "location": {
                            "country": "Myanmar",
                            "region": "Rakhine",
                            "coordinates": { "type": "Point", "coordinates": [93.0, 20.1] }
                        },
                        "date_occurred": "2023-06-01"
                    },
                    {
                        "case_id": "C-2",
                        "title": "Displacement",
                        "violation_types": ["forced_displacement", "arbitrary_detention"],
                        "location": { "country": "Myanmar", "region": "Shan" },
                        "date_occurred": "2023-06-20"
                    }
                ],
                "incident_reports": [
                    {
                        "report_id": "IR-1",
                        "status": "verified",
                        "incident_details": {
                            "date": "2023-06-02",
                            "location": { "country": "Myanmar", "city": "Sittwe" },
                            "violation_types": ["arbitrary_detention"]
                        }
                    }
                ],
                "victims": [{ "victim_id": "V-1" }]
            }"#,
        )
        .unwrap();
        MemoryStore::from_snapshot(snapshot)
    }

    #[test]
    fn parses_overview_flags_and_global_snapshot() {
        let cli = Cli::try_parse_from([
            "rights_monitor_cli",
            "overview",
            "--country",
            "Myanmar",
            "--geo",
            "--snapshot",
            "records.json",
        ])
        .unwrap();

        assert_eq!(cli.snapshot, Some(PathBuf::from("records.json")));
        match cli.command {
            Commands::Overview {
                filters,
                timeline,
                geo,
            } => {
                assert_eq!(filters.country.as_deref(), Some("Myanmar"));
                assert!(!timeline);
                assert!(geo);
            }
            _ => panic!("expected overview"),
        }
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["rights_monitor_cli", "export"]).is_err());
    }

    #[tokio::test]
    async fn violations_command_prints_sorted_counts() {
        let value = execute(&fixture(), Commands::Violations(Filters::default()))
            .await
            .unwrap();
        assert_eq!(value[0]["violation_type"], "arbitrary_detention");
        assert_eq!(value[0]["count"], 2);
        assert_eq!(value[1]["violation_type"], "forced_displacement");
    }

    #[tokio::test]
    async fn timeline_command_uses_requested_interval() {
        let value = execute(
            &fixture(),
            Commands::Timeline {
                start_date: Some("2023-01-01".to_string()),
                end_date: Some("2023-12-31".to_string()),
                violation_type: None,
                interval: Some("year".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(value[0]["date"], "2023-01-01");
        assert_eq!(value[0]["count"], 2);
    }

    #[tokio::test]
    async fn overview_command_includes_geo() {
        let value = execute(
            &fixture(),
            Commands::Overview {
                filters: Filters::default(),
                timeline: false,
                geo: true,
            },
        )
        .await
        .unwrap();
        assert_eq!(value["total_cases"], 2);
        assert_eq!(value["total_victims"], 1);
        assert_eq!(value["geo_data"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn parses_reports_filters() {
        let cli = Cli::try_parse_from([
            "rights_monitor_cli",
            "reports",
            "--country",
            "Myanmar",
        ])
        .unwrap();
        match cli.command {
            Commands::Reports(filters) => {
                assert_eq!(filters.country.as_deref(), Some("Myanmar"));
            }
            _ => panic!("expected reports"),
        }
    }

    #[tokio::test]
    async fn reports_command_summarizes_reports() {
        let value = execute(&fixture(), Commands::Reports(Filters::default()))
            .await
            .unwrap();
        assert_eq!(value["total_reports"], 1);
        assert_eq!(value["by_status"]["verified"], 1);
        assert_eq!(value["by_status"]["new"], 0);
        assert_eq!(value["by_violation_type"][0]["violation_type"], "arbitrary_detention");
    }

    #[tokio::test]
    async fn invalid_date_surfaces_as_analytics_error() {
        let err = execute(
            &fixture(),
            Commands::Violations(Filters {
                start_date: Some("June".to_string()),
                ..Filters::default()
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalyticsError>(),
            Some(AnalyticsError::InvalidDate { .. })
        ));
    }
}
