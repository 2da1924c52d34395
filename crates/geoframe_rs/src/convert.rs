use std::fmt;
use std::str::FromStr;

use geoframe_frames::{
    Aer, Ecef, Eci, Ellipsoid, Enu, Epoch, Geodetic, InversionConfig, aer_to_ecef, aer_to_enu,
    ecef_to_aer, ecef_to_eci, ecef_to_enu, ecef_to_geodetic_with, eci_to_ecef, enu_to_aer,
    enu_to_ecef, geodetic_to_ecef,
};

use crate::error::GeoframeError;

/// Coordinate frame tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FrameKind {
    Geodetic,
    Ecef,
    Eci,
    Enu,
    Aer,
}

impl FrameKind {
    pub const ALL: [FrameKind; 5] = [
        FrameKind::Geodetic,
        FrameKind::Ecef,
        FrameKind::Eci,
        FrameKind::Enu,
        FrameKind::Aer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FrameKind::Geodetic => "geodetic",
            FrameKind::Ecef => "ecef",
            FrameKind::Eci => "eci",
            FrameKind::Enu => "enu",
            FrameKind::Aer => "aer",
        }
    }

    /// Local frames are anchored at a reference point.
    pub fn is_local(self) -> bool {
        matches!(self, FrameKind::Enu | FrameKind::Aer)
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        FrameKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| format!("unknown frame: {s:?}"))
    }
}

/// A position expressed in one of the supported frames.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "frame", rename_all = "lowercase"))]
pub enum Position {
    Geodetic(Geodetic),
    Ecef(Ecef),
    Eci(Eci),
    Enu(Enu),
    Aer(Aer),
}

impl Position {
    pub fn kind(&self) -> FrameKind {
        match self {
            Position::Geodetic(_) => FrameKind::Geodetic,
            Position::Ecef(_) => FrameKind::Ecef,
            Position::Eci(_) => FrameKind::Eci,
            Position::Enu(_) => FrameKind::Enu,
            Position::Aer(_) => FrameKind::Aer,
        }
    }
}

impl From<Geodetic> for Position {
    fn from(p: Geodetic) -> Self {
        Position::Geodetic(p)
    }
}

impl From<Ecef> for Position {
    fn from(p: Ecef) -> Self {
        Position::Ecef(p)
    }
}

impl From<Eci> for Position {
    fn from(p: Eci) -> Self {
        Position::Eci(p)
    }
}

impl From<Enu> for Position {
    fn from(p: Enu) -> Self {
        Position::Enu(p)
    }
}

impl From<Aer> for Position {
    fn from(p: Aer) -> Self {
        Position::Aer(p)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Geodetic(g) => write!(
                f,
                "lat {:.9}° lon {:.9}° alt {:.4} m",
                g.lat_deg, g.lon_deg, g.alt_m
            ),
            Position::Ecef(p) => write!(f, "ecef x {:.4} y {:.4} z {:.4} m", p.x_m, p.y_m, p.z_m),
            Position::Eci(p) => write!(f, "eci x {:.4} y {:.4} z {:.4} m", p.x_m, p.y_m, p.z_m),
            Position::Enu(v) => write!(
                f,
                "e {:.4} n {:.4} u {:.4} m",
                v.east_m, v.north_m, v.up_m
            ),
            Position::Aer(a) => write!(
                f,
                "az {:.9}° el {:.9}° range {:.4} m",
                a.az_deg, a.el_deg, a.range_m
            ),
        }
    }
}

/// Converts positions between frames.
///
/// Every conversion is routed through ECEF. Local frames (ENU, AER) need
/// a [`reference`](Converter::reference) point, ECI needs an
/// [`epoch`](Converter::epoch); a conversion missing either fails with
/// [`GeoframeError::MissingReference`] or [`GeoframeError::MissingEpoch`].
/// ENU ↔ AER is direct and needs neither.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Converter {
    ellipsoid: Ellipsoid,
    reference: Option<Geodetic>,
    epoch: Option<Epoch>,
    inversion: InversionConfig,
}

impl Converter {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self {
            ellipsoid,
            ..Self::default()
        }
    }

    /// Converter on a named datum (case-insensitive).
    pub fn with_datum(name: &str) -> Result<Self, GeoframeError> {
        Ok(Self::new(Ellipsoid::lookup(name)?))
    }

    pub fn reference(mut self, reference: Geodetic) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn epoch(mut self, epoch: Epoch) -> Self {
        self.epoch = Some(epoch);
        self
    }

    pub fn inversion(mut self, config: InversionConfig) -> Self {
        self.inversion = config;
        self
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn reference_point(&self) -> Option<&Geodetic> {
        self.reference.as_ref()
    }

    pub fn epoch_value(&self) -> Option<Epoch> {
        self.epoch
    }

    pub fn inversion_config(&self) -> &InversionConfig {
        &self.inversion
    }

    /// Convert `position` into the `target` frame.
    pub fn convert(&self, position: &Position, target: FrameKind) -> Result<Position, GeoframeError> {
        let from = position.kind();
        match (position, target) {
            (p, t) if p.kind() == t => Ok(*p),
            (Position::Enu(v), FrameKind::Aer) => Ok(Position::Aer(enu_to_aer(v)?)),
            (Position::Aer(a), FrameKind::Enu) => Ok(Position::Enu(aer_to_enu(a)?)),
            _ => {
                let ecef = self.hub(position, target)?;
                self.project(&ecef, from, target)
            }
        }
    }

    /// Convert `position` to ECEF.
    pub fn to_ecef(&self, position: &Position) -> Result<Ecef, GeoframeError> {
        self.hub(position, FrameKind::Ecef)
    }

    fn hub(&self, position: &Position, target: FrameKind) -> Result<Ecef, GeoframeError> {
        let from = position.kind();
        let ecef = match position {
            Position::Ecef(p) => *p,
            Position::Geodetic(g) => geodetic_to_ecef(g, &self.ellipsoid)?,
            Position::Eci(p) => eci_to_ecef(p, self.require_epoch(from, target)?),
            Position::Enu(v) => enu_to_ecef(v, self.require_reference(from, target)?, &self.ellipsoid)?,
            Position::Aer(a) => aer_to_ecef(a, self.require_reference(from, target)?, &self.ellipsoid)?,
        };
        Ok(ecef)
    }

    fn project(
        &self,
        ecef: &Ecef,
        from: FrameKind,
        target: FrameKind,
    ) -> Result<Position, GeoframeError> {
        let out = match target {
            FrameKind::Ecef => Position::Ecef(*ecef),
            FrameKind::Geodetic => Position::Geodetic(ecef_to_geodetic_with(
                ecef,
                &self.ellipsoid,
                &self.inversion,
            )?),
            FrameKind::Eci => Position::Eci(ecef_to_eci(ecef, self.require_epoch(from, target)?)),
            FrameKind::Enu => Position::Enu(ecef_to_enu(
                ecef,
                self.require_reference(from, target)?,
                &self.ellipsoid,
            )?),
            FrameKind::Aer => Position::Aer(ecef_to_aer(
                ecef,
                self.require_reference(from, target)?,
                &self.ellipsoid,
            )?),
        };
        Ok(out)
    }

    fn require_reference(&self, from: FrameKind, to: FrameKind) -> Result<&Geodetic, GeoframeError> {
        self.reference
            .as_ref()
            .ok_or(GeoframeError::MissingReference { from, to })
    }

    fn require_epoch(&self, from: FrameKind, to: FrameKind) -> Result<Epoch, GeoframeError> {
        self.epoch.ok_or(GeoframeError::MissingEpoch { from, to })
    }
}
