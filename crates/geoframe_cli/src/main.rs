use clap::{Parser, Subcommand};
use geoframe_frames::{
    Aer, Ecef, Eci, Ellipsoid, Enu, FrameError, Geodetic, InversionConfig, aer_to_ecef,
    aer_to_enu, ecef_to_aer, ecef_to_eci, ecef_to_enu, ecef_to_geodetic_with, eci_to_ecef,
    enu_to_aer, enu_to_ecef, geodetic_to_ecef,
};
use geoframe_rs::{Converter, FrameKind, GeoframeError, Position};
use geoframe_time::{Epoch, TimeError, local_sidereal_time_deg};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "geoframe", about = "Geodetic / ECEF / ECI / ENU / AER conversions")]
struct Cli {
    /// Reference ellipsoid (wgs84, cgcs2000, moon, mars)
    #[arg(long, global = true, env = "GEOFRAME_DATUM", default_value = "wgs84")]
    datum: String,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Geodetic inversion convergence tolerance in radians
    #[arg(long, global = true, default_value_t = 1e-9)]
    tolerance: f64,
    /// Geodetic inversion iteration cap (1-100)
    #[arg(long, global = true, default_value_t = 10)]
    max_iterations: u32,
    #[command(subcommand)]
    command: Commands,
}

/// Local reference point for ENU/AER commands.
#[derive(clap::Args, Debug, Clone, Copy)]
struct Reference {
    /// Reference latitude in degrees
    #[arg(long)]
    lat0: f64,
    /// Reference longitude in degrees
    #[arg(long)]
    lon0: f64,
    /// Reference height above the ellipsoid in meters
    #[arg(long, default_value_t = 0.0)]
    h0: f64,
}

impl Reference {
    fn geodetic(&self) -> Geodetic {
        Geodetic::new(self.lat0, self.lon0, self.h0)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// ENU offset to azimuth/elevation/range
    #[command(name = "enu2aer", allow_negative_numbers = true)]
    Enu2Aer { e: f64, n: f64, u: f64 },
    /// Azimuth/elevation/range to ENU offset
    #[command(name = "aer2enu", allow_negative_numbers = true)]
    Aer2Enu { az: f64, el: f64, srange: f64 },
    /// Azimuth/elevation/range from a reference point to ECEF
    #[command(name = "aer2ecef", allow_negative_numbers = true)]
    Aer2Ecef {
        az: f64,
        el: f64,
        srange: f64,
        #[command(flatten)]
        reference: Reference,
    },
    /// ECEF to azimuth/elevation/range from a reference point
    #[command(name = "ecef2aer", allow_negative_numbers = true)]
    Ecef2Aer {
        x: f64,
        y: f64,
        z: f64,
        #[command(flatten)]
        reference: Reference,
    },
    /// Geodetic latitude/longitude/altitude to ECEF
    #[command(name = "geodetic2ecef", allow_negative_numbers = true)]
    Geodetic2Ecef { lat: f64, lon: f64, alt: f64 },
    /// ECEF to geodetic latitude/longitude/altitude
    #[command(name = "ecef2geodetic", allow_negative_numbers = true)]
    Ecef2Geodetic { x: f64, y: f64, z: f64 },
    /// ECEF to ENU offset from a reference point
    #[command(name = "ecef2enu", allow_negative_numbers = true)]
    Ecef2Enu {
        x: f64,
        y: f64,
        z: f64,
        #[command(flatten)]
        reference: Reference,
    },
    /// ENU offset from a reference point to ECEF
    #[command(name = "enu2ecef", allow_negative_numbers = true)]
    Enu2Ecef {
        e: f64,
        n: f64,
        u: f64,
        #[command(flatten)]
        reference: Reference,
    },
    /// Julian Date of a timestamp
    #[command(name = "julian-date", allow_negative_numbers = true)]
    JulianDate {
        /// Unix seconds or UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        time: String,
    },
    /// Greenwich Mean Sidereal Time
    #[command(name = "gst", allow_negative_numbers = true)]
    Gst {
        /// Unix seconds or UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long, conflicts_with = "jd")]
        time: Option<String>,
        /// Julian Date
        #[arg(long)]
        jd: Option<f64>,
        /// Also report local sidereal time at this east longitude (degrees)
        #[arg(long)]
        lon: Option<f64>,
    },
    /// ECI to ECEF at a timestamp
    #[command(name = "eci2ecef", allow_negative_numbers = true)]
    Eci2Ecef {
        x: f64,
        y: f64,
        z: f64,
        /// Unix seconds or UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        time: String,
    },
    /// ECEF to ECI at a timestamp
    #[command(name = "ecef2eci", allow_negative_numbers = true)]
    Ecef2Eci {
        x: f64,
        y: f64,
        z: f64,
        /// Unix seconds or UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        time: String,
    },
    /// Convert between any two frames
    #[command(allow_negative_numbers = true)]
    Convert {
        /// Source frame: geodetic, ecef, eci, enu, aer
        #[arg(long)]
        from: FrameKind,
        /// Target frame: geodetic, ecef, eci, enu, aer
        #[arg(long)]
        to: FrameKind,
        a: f64,
        b: f64,
        c: f64,
        /// Reference latitude in degrees (ENU/AER)
        #[arg(long)]
        lat0: Option<f64>,
        /// Reference longitude in degrees (ENU/AER)
        #[arg(long)]
        lon0: Option<f64>,
        /// Reference height in meters (ENU/AER)
        #[arg(long, default_value_t = 0.0)]
        h0: f64,
        /// Unix seconds or UTC datetime (ECI)
        #[arg(long)]
        time: Option<String>,
    },
    /// List supported datums
    Datums,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Convert(#[from] GeoframeError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(&'static str),
}

/// A command result, printable as text or JSON.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Output {
    Aer(Aer),
    Enu(Enu),
    Ecef(Ecef),
    Eci(Eci),
    Geodetic(Geodetic),
    JulianDate {
        jd: f64,
    },
    Sidereal {
        jd: f64,
        gst_deg: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        lst_deg: Option<f64>,
    },
    Position(Position),
    Datums(Vec<Ellipsoid>),
}

impl Output {
    fn text(&self) -> String {
        match self {
            Output::Aer(a) => format!(
                "Azimuth:   {:.9} deg\nElevation: {:.9} deg\nRange:     {:.4} m",
                a.az_deg, a.el_deg, a.range_m
            ),
            Output::Enu(v) => format!(
                "East:  {:.4} m\nNorth: {:.4} m\nUp:    {:.4} m",
                v.east_m, v.north_m, v.up_m
            ),
            Output::Ecef(p) => format!("X: {:.4} m\nY: {:.4} m\nZ: {:.4} m", p.x_m, p.y_m, p.z_m),
            Output::Eci(p) => format!("X: {:.4} m\nY: {:.4} m\nZ: {:.4} m", p.x_m, p.y_m, p.z_m),
            Output::Geodetic(g) => format!(
                "Latitude:  {:.9} deg\nLongitude: {:.9} deg\nAltitude:  {:.4} m",
                g.lat_deg, g.lon_deg, g.alt_m
            ),
            Output::JulianDate { jd } => format!("JD: {jd:.9}"),
            Output::Sidereal {
                jd,
                gst_deg,
                lst_deg,
            } => {
                let mut s = format!("JD:  {jd:.9}\nGST: {gst_deg:.9} deg");
                if let Some(lst) = lst_deg {
                    s.push_str(&format!("\nLST: {lst:.9} deg"));
                }
                s
            }
            Output::Position(p) => p.to_string(),
            Output::Datums(list) => list
                .iter()
                .map(|e| {
                    format!(
                        "{:<10} {:<18} a = {:.4} m  b = {:.8} m  1/f = {:.9}",
                        e.name,
                        e.display_name,
                        e.semi_major_axis_m,
                        e.semi_minor_axis_m,
                        1.0 / e.flattening
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

fn parse_epoch(s: &str) -> Result<Epoch, CliError> {
    Ok(s.parse::<Epoch>()?)
}

fn run(cli: &Cli) -> Result<Output, CliError> {
    let inversion = InversionConfig {
        tolerance_rad: cli.tolerance,
        max_iterations: cli.max_iterations,
    };
    inversion.validate()?;
    // Datum-free commands still reject an unknown datum name up front.
    let ell = Ellipsoid::lookup(&cli.datum)?;
    log::debug!("datum {} ({}), inversion {inversion:?}", ell.name, ell.display_name);

    let out = match &cli.command {
        Commands::Enu2Aer { e, n, u } => Output::Aer(enu_to_aer(&Enu::new(*e, *n, *u))?),
        Commands::Aer2Enu { az, el, srange } => {
            Output::Enu(aer_to_enu(&Aer::new(*az, *el, *srange))?)
        }
        Commands::Aer2Ecef {
            az,
            el,
            srange,
            reference,
        } => Output::Ecef(aer_to_ecef(
            &Aer::new(*az, *el, *srange),
            &reference.geodetic(),
            &ell,
        )?),
        Commands::Ecef2Aer { x, y, z, reference } => Output::Aer(ecef_to_aer(
            &Ecef::new(*x, *y, *z),
            &reference.geodetic(),
            &ell,
        )?),
        Commands::Geodetic2Ecef { lat, lon, alt } => {
            Output::Ecef(geodetic_to_ecef(&Geodetic::new(*lat, *lon, *alt), &ell)?)
        }
        Commands::Ecef2Geodetic { x, y, z } => Output::Geodetic(ecef_to_geodetic_with(
            &Ecef::new(*x, *y, *z),
            &ell,
            &inversion,
        )?),
        Commands::Ecef2Enu { x, y, z, reference } => Output::Enu(ecef_to_enu(
            &Ecef::new(*x, *y, *z),
            &reference.geodetic(),
            &ell,
        )?),
        Commands::Enu2Ecef { e, n, u, reference } => Output::Ecef(enu_to_ecef(
            &Enu::new(*e, *n, *u),
            &reference.geodetic(),
            &ell,
        )?),
        Commands::JulianDate { time } => {
            let epoch = parse_epoch(time)?;
            log::debug!("epoch {} ({} s)", epoch.to_utc(), epoch.as_unix_seconds());
            Output::JulianDate { jd: epoch.as_jd() }
        }
        Commands::Gst { time, jd, lon } => {
            let epoch = match (time, jd) {
                (Some(t), None) => parse_epoch(t)?,
                (None, Some(jd)) => Epoch::from_jd(*jd)?,
                _ => return Err(CliError::Usage("gst needs exactly one of --time or --jd")),
            };
            let gst_deg = epoch.gst_deg();
            Output::Sidereal {
                jd: epoch.as_jd(),
                gst_deg,
                lst_deg: lon.map(|lon| local_sidereal_time_deg(gst_deg, lon)),
            }
        }
        Commands::Eci2Ecef { x, y, z, time } => {
            Output::Ecef(eci_to_ecef(&Eci::new(*x, *y, *z), parse_epoch(time)?))
        }
        Commands::Ecef2Eci { x, y, z, time } => {
            Output::Eci(ecef_to_eci(&Ecef::new(*x, *y, *z), parse_epoch(time)?))
        }
        Commands::Convert {
            from,
            to,
            a,
            b,
            c,
            lat0,
            lon0,
            h0,
            time,
        } => {
            let mut conv = Converter::new(ell).inversion(inversion);
            match (lat0, lon0) {
                (Some(lat), Some(lon)) => conv = conv.reference(Geodetic::new(*lat, *lon, *h0)),
                (None, None) => {}
                _ => return Err(CliError::Usage("--lat0 and --lon0 must be given together")),
            }
            if let Some(t) = time {
                conv = conv.epoch(parse_epoch(t)?);
            }
            let input = match from {
                FrameKind::Geodetic => Position::Geodetic(Geodetic::new(*a, *b, *c)),
                FrameKind::Ecef => Position::Ecef(Ecef::new(*a, *b, *c)),
                FrameKind::Eci => Position::Eci(Eci::new(*a, *b, *c)),
                FrameKind::Enu => Position::Enu(Enu::new(*a, *b, *c)),
                FrameKind::Aer => Position::Aer(Aer::new(*a, *b, *c)),
            };
            Output::Position(conv.convert(&input, *to)?)
        }
        Commands::Datums => Output::Datums(
            Ellipsoid::names()
                .map(Ellipsoid::lookup)
                .collect::<Result<Vec<_>, _>>()?,
        ),
    };
    Ok(out)
}

fn render(out: &Output, json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(out)?)
    } else {
        Ok(out.text())
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli).and_then(|out| render(&out, cli.json)) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["geoframe"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn ecef2geodetic_with_negative_inputs() {
        let out = run(&cli(&["ecef2geodetic", "-2700226.9", "-4292413.9", "3855273.8"])).unwrap();
        let Output::Geodetic(g) = out else {
            panic!("unexpected output {out:?}");
        };
        assert!((g.lat_deg - 37.429_288).abs() < 1e-6);
        assert!((g.lon_deg + 122.172_748).abs() < 1e-6);
    }

    #[test]
    fn enu2aer_json() {
        let out = run(&cli(&["enu2aer", "10", "20", "30"])).unwrap();
        let json: serde_json::Value = serde_json::from_str(&render(&out, true).unwrap()).unwrap();
        assert!((json["az_deg"].as_f64().unwrap() - 26.565_051).abs() < 1e-6);
        assert!((json["range_m"].as_f64().unwrap() - 37.416_574).abs() < 1e-6);
    }

    #[test]
    fn reference_accepts_negative_longitude() {
        let out = run(&cli(&[
            "ecef2enu", "-2702584.6", "-4325039.5", "3817393.2", "--lat0", "37", "--lon0", "-122",
        ]))
        .unwrap();
        let Output::Enu(enu) = out else {
            panic!("unexpected output {out:?}");
        };
        assert!(enu.east_m.abs() < 1.0);
        assert!(enu.up_m.abs() < 1.0);
    }

    #[test]
    fn julian_date_accepts_iso_and_number() {
        for time in ["2000-01-01T12:00:00Z", "946728000"] {
            let Output::JulianDate { jd } = run(&cli(&["julian-date", time])).unwrap() else {
                panic!("unexpected output");
            };
            assert_eq!(jd, 2_451_545.0);
        }
    }

    #[test]
    fn gst_requires_one_input() {
        assert!(matches!(
            run(&cli(&["gst"])),
            Err(CliError::Usage(_))
        ));
        let Output::Sidereal { gst_deg, lst_deg, .. } =
            run(&cli(&["gst", "--jd", "2451545.0", "--lon", "90"])).unwrap()
        else {
            panic!("unexpected output");
        };
        assert!((gst_deg - 280.460_618).abs() < 1e-5);
        assert!((lst_deg.unwrap() - 10.460_618).abs() < 1e-5);
    }

    #[test]
    fn unknown_datum_is_an_error() {
        let err = run(&cli(&["--datum", "nad27", "geodetic2ecef", "0", "0", "0"])).unwrap_err();
        assert!(matches!(err, CliError::Frame(FrameError::UnknownDatum(_))));
    }

    #[test]
    fn bad_iteration_cap_is_rejected() {
        let err = run(&cli(&["--max-iterations", "0", "enu2aer", "1", "0", "0"])).unwrap_err();
        assert!(matches!(err, CliError::Frame(FrameError::InvalidConfig(_))));
    }

    #[test]
    fn convert_needs_epoch_for_eci() {
        let err = run(&cli(&[
            "convert", "--from", "ecef", "--to", "eci", "7000000", "0", "0",
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Convert(GeoframeError::MissingEpoch { .. })
        ));
    }

    #[test]
    fn datums_lists_all() {
        let Output::Datums(list) = run(&cli(&["datums"])).unwrap() else {
            panic!("unexpected output");
        };
        let names: Vec<_> = list.iter().map(|e| e.name).collect();
        assert_eq!(names, ["wgs84", "cgcs2000", "moon", "mars"]);
    }
}
