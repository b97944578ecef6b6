use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use burnmap_core::display::to_geojson;
#[cfg(not(feature = "live"))]
use burnmap_core::weather::power_request_url;
use burnmap_core::weather::{fetch_wind, power_timestamp, PowerTransport};
use burnmap_core::{
    aggregate, aggregate_years, parse_table, predict_at, resolve_origin, Aggregate,
    CentroidGazetteer, FuelEnvironment, GeoPoint, PipelineConfig, WindInput, WindPrediction,
    WindSourceError,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Burned-area totals and fire-spread heading from the terminal
#[derive(Parser, Debug)]
#[command(name = "burnmap")]
#[command(author, version, about = "Canadian burned-area totals and spread heading", long_about = None)]
struct Cli {
    /// Pipeline configuration (JSON); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sum burned hectares per province from a CSV/TSV export
    Totals {
        /// Delimited text file with a header row
        input: PathBuf,

        /// First year to include
        #[arg(long)]
        from_year: Option<i32>,

        /// Last year to include
        #[arg(long)]
        to_year: Option<i32>,

        /// Emit the map markers as a GeoJSON FeatureCollection
        #[arg(long)]
        geojson: bool,
    },
    /// Predict the spread heading and the wind arrow at a point
    Heading {
        /// Wind speed in km/h
        #[arg(short, long)]
        speed: Option<f64>,

        /// Direction the wind blows FROM, in degrees (0=North, 90=East)
        #[arg(short, long)]
        direction: Option<f64>,

        /// Fuel environment (grass, shrub, forest)
        #[arg(short, long, default_value = "grass")]
        fuel: String,

        /// Slope grade in percent
        #[arg(long)]
        slope: Option<f64>,

        /// Upslope direction in degrees
        #[arg(long)]
        slope_dir: Option<f64>,

        /// Place name, province or "lat, lon"
        #[arg(short, long, default_value = "Alberta")]
        place: String,
    },
    /// Read observed wind from a saved NASA POWER wind-rose response
    Wind {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Hour to read, `YYYY-MM-DDTHH` UTC (defaults to now)
        #[arg(long)]
        hour: Option<String>,

        /// Saved response body; without it the hour is fetched live (with
        /// the `live` feature) or the request URL is printed
        #[arg(long)]
        response: Option<PathBuf>,

        /// Fuel used to turn the observation into a heading
        #[arg(short, long, default_value = "grass")]
        fuel: String,
    },
}

/// Serves a previously downloaded response body.
struct SavedResponse<'a>(&'a Path);

impl PowerTransport for SavedResponse<'_> {
    fn get(&self, url: &str) -> Result<String, WindSourceError> {
        debug!("Answering {url} from {}", self.0.display());
        fs::read_to_string(self.0)
            .map_err(|e| WindSourceError::Transport(format!("{}: {e}", self.0.display())))
    }
}

/// Fetches the wind-rose body from the POWER API over HTTPS.
#[cfg(feature = "live")]
#[derive(Default)]
struct LiveTransport {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "live")]
impl PowerTransport for LiveTransport {
    fn get(&self, url: &str) -> Result<String, WindSourceError> {
        debug!("Requesting {url}");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| WindSourceError::Transport(format!("request error: {e}")))?;
        if !response.status().is_success() {
            return Err(WindSourceError::Transport(format!(
                "POWER responded with {}",
                response.status()
            )));
        }
        response
            .text()
            .map_err(|e| WindSourceError::Transport(format!("failed to read POWER body: {e}")))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult {
    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    match cli.command {
        Command::Totals {
            input,
            from_year,
            to_year,
            geojson,
        } => handle_totals(&input, from_year, to_year, geojson, cli.json, &config),
        Command::Heading {
            speed,
            direction,
            fuel,
            slope,
            slope_dir,
            place,
        } => {
            let input = WindInput::from_parts(
                speed,
                direction,
                FuelEnvironment::from_name_or_default(&fuel),
                slope,
                slope_dir,
            );
            let origin = resolve_origin(&CentroidGazetteer, &place)?;
            info!("Anchoring prediction at {} {}", origin.display_name, origin.point);
            print_prediction(predict_at(origin.point, input, &config), cli.json)
        }
        Command::Wind {
            lat,
            lon,
            hour,
            response,
            fuel,
        } => {
            let point = GeoPoint::checked(lat, lon)
                .ok_or_else(|| format!("coordinates out of range: {lat}, {lon}"))?;
            let at = match hour {
                Some(text) => parse_hour(&text)?,
                None => Utc::now(),
            };
            handle_wind(point, at, response.as_deref(), &fuel, cli.json, &config)
        }
    }
}

fn parse_hour(text: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(&format!("{text}:00"), "%Y-%m-%dT%H:%M")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid hour '{text}' (expected YYYY-MM-DDTHH): {e}"))
}

fn handle_totals(
    input: &Path,
    from_year: Option<i32>,
    to_year: Option<i32>,
    geojson: bool,
    json: bool,
    config: &PipelineConfig,
) -> CliResult {
    let text = fs::read_to_string(input).map_err(|e| format!("{}: {e}", input.display()))?;
    let table = parse_table(&text);
    let totals = if from_year.is_some() || to_year.is_some() {
        let years = from_year.unwrap_or(i32::MIN)..=to_year.unwrap_or(i32::MAX);
        aggregate_years(&table.records, years)
    } else {
        aggregate(&table.records)
    };
    let features = burnmap_core::province_features(&totals, &config.marker);

    if geojson {
        println!("{}", serde_json::to_string_pretty(&to_geojson(&features))?);
    } else if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "columns": table.columns,
                "totals": totals,
                "features": features,
            }))?
        );
    } else {
        print_totals(&totals);
    }
    Ok(())
}

fn print_totals(totals: &Aggregate) {
    if totals.is_empty() {
        println!("No burned-area rows matched a province or territory.");
        return;
    }
    println!("{:<28} {:>16}", "Province/Territory", "Burned (ha)");
    for total in totals.province_totals() {
        println!(
            "{:<28} {:>16.1}",
            format!("{} ({})", total.code.name(), total.code.code()),
            total.total_ha.value()
        );
    }
    println!("{:<28} {:>16.1}", "Total", totals.grand_total.value());
    println!(
        "\n{} rows included, {} skipped",
        totals.included, totals.skipped
    );
}

fn print_prediction(prediction: Option<WindPrediction>, json: bool) -> CliResult {
    let Some(prediction) = prediction else {
        println!("Enter a wind speed and direction to predict the spread heading.");
        return Ok(());
    };
    if json {
        let mut value = serde_json::to_value(prediction)?;
        value["polylines"] = serde_json::to_value(prediction.arrow.polylines())?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let input = prediction.input;
    println!(
        "Wind {} from {} over {}",
        input.speed, input.dir_from, input.fuel
    );
    if let Some(slope) = input.slope {
        println!("Slope {} rising toward {}", slope.percent, slope.dir_to);
    }
    println!(
        "Predicted spread heading: {} ({})",
        prediction.heading.heading, prediction.heading.compass
    );
    let arrow = prediction.arrow;
    println!("Arrow shaft: {} -> {}", arrow.start, arrow.end);
    println!(
        "Arrow head:  {} -> {} -> {}",
        arrow.left_barb, arrow.end, arrow.right_barb
    );
    Ok(())
}

fn handle_wind(
    point: GeoPoint,
    at: DateTime<Utc>,
    response: Option<&Path>,
    fuel: &str,
    json: bool,
    config: &PipelineConfig,
) -> CliResult {
    let observation = match response {
        Some(path) => fetch_wind(&SavedResponse(path), point, at)?,
        #[cfg(feature = "live")]
        None => fetch_wind(&LiveTransport::default(), point, at)?,
        #[cfg(not(feature = "live"))]
        None => {
            println!("{}", power_request_url(point, &power_timestamp(at)));
            return Ok(());
        }
    };
    let Some(observation) = observation else {
        println!("No wind reading for {} at {}", point, power_timestamp(at));
        return Ok(());
    };
    let input = observation.to_wind_input(FuelEnvironment::from_name_or_default(fuel));
    let prediction = predict_at(point, Some(input), config);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "timestamp": observation.timestamp,
                "speed_mps": observation.speed,
                "dir_from_deg": observation.dir_from,
                "prediction": prediction,
            }))?
        );
        return Ok(());
    }

    println!(
        "Observed {} ({}) from {} at {}",
        observation.speed,
        input.speed,
        observation.dir_from,
        observation.timestamp
    );
    print_prediction(prediction, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_hour() {
        let at = parse_hour("2024-07-05T09").unwrap();
        assert_eq!((at.year(), at.month(), at.day(), at.hour()), (2024, 7, 5, 9));
        assert!(parse_hour("yesterday").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "burnmap", "heading", "--speed", "20", "--direction", "270", "--fuel", "forest",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::Heading { speed: Some(s), .. } if s == 20.0
        ));

        let cli = Cli::try_parse_from(["burnmap", "wind", "--lat", "50", "--lon", "-100"])
            .unwrap();
        assert!(matches!(cli.command, Command::Wind { lon, .. } if lon == -100.0));
    }

    #[test]
    fn test_saved_response_transport() {
        let path =
            std::env::temp_dir().join(format!("burnmap-power-{}.json", std::process::id()));
        fs::write(&path, "{\"properties\":{}}").unwrap();
        let body = SavedResponse(&path).get("https://example.invalid").unwrap();
        assert_eq!(body, "{\"properties\":{}}");
        fs::remove_file(&path).unwrap();

        let missing = SavedResponse(Path::new("/nonexistent/burnmap-power.json"));
        assert!(matches!(
            missing.get("https://example.invalid"),
            Err(WindSourceError::Transport(_))
        ));
    }

    #[cfg(feature = "live")]
    #[test]
    fn test_live_transport_reports_unreachable_host() {
        let result = LiveTransport::default().get("http://127.0.0.1:9/temporal/hourly/windrose");
        assert!(matches!(
            result,
            Err(WindSourceError::Transport(msg)) if msg.starts_with("request error")
        ));
    }
}
