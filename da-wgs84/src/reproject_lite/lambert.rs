//! Projection conique conforme de Lambert avec 2 parallèles standards
//!
//! Utilisée par Statistique Canada (EPSG:3347, NAD83).

use super::ellipsoid::Ellipsoid;
use super::Geographic;
use anyhow::{bail, Result};

/// Paramètres d'une projection Lambert conique conforme (2SP)
#[derive(Debug, Clone, Copy)]
pub struct LambertParams {
    /// Longitude origine
    pub lon0: f64,
    /// Latitude origine
    pub lat0: f64,
    /// Premier parallèle standard
    pub lat1: f64,
    /// Deuxième parallèle standard
    pub lat2: f64,
    /// False easting
    pub x0: f64,
    /// False northing
    pub y0: f64,
    pub ellipsoid: Ellipsoid,
}

impl LambertParams {
    /// Statistics Canada Lambert (EPSG:3347)
    pub fn statcan() -> Self {
        Self {
            lon0: (-91.0 - 52.0 / 60.0_f64).to_radians(), // -91°52'
            lat0: 63.390675_f64.to_radians(),
            lat1: 49.0_f64.to_radians(),
            lat2: 77.0_f64.to_radians(),
            x0: 6_200_000.0,
            y0: 3_000_000.0,
            ellipsoid: Ellipsoid::GRS80,
        }
    }
}

/// Projection Lambert avec ses constantes précalculées
#[derive(Debug, Clone, Copy)]
pub struct LambertConic {
    params: LambertParams,
    /// Exposant de la projection
    n: f64,
    /// Constante C
    c: f64,
    /// Rayon à l'origine
    r0: f64,
    e: f64,
}

impl LambertConic {
    pub fn new(params: LambertParams) -> Self {
        let e = params.ellipsoid.e();

        let n1 = params.ellipsoid.grande_normale(params.lat1);
        let n2 = params.ellipsoid.grande_normale(params.lat2);

        let iso_lat1 = isometric_latitude(params.lat1, e);
        let iso_lat2 = isometric_latitude(params.lat2, e);
        let iso_lat0 = isometric_latitude(params.lat0, e);

        let n = (n1 * params.lat1.cos()).ln() - (n2 * params.lat2.cos()).ln();
        let n = n / (iso_lat2 - iso_lat1);

        let c = (n1 * params.lat1.cos() / n) * (n * iso_lat1).exp();
        let r0 = c * (-n * iso_lat0).exp();

        Self { params, n, c, r0, e }
    }

    pub fn statcan() -> Self {
        Self::new(LambertParams::statcan())
    }

    /// Coordonnées projetées (mètres) vers géographiques
    pub fn inverse(&self, x: f64, y: f64) -> Result<Geographic> {
        if !x.is_finite() || !y.is_finite() {
            bail!("Non-finite projected coordinate ({}, {})", x, y);
        }

        let dx = x - self.params.x0;
        let dy = y - self.params.y0;

        let r = (dx.powi(2) + (self.r0 - dy).powi(2)).sqrt();
        if r < 1e-6 {
            bail!("Point ({}, {}) is the cone apex, latitude is undefined", x, y);
        }
        let r = if self.n < 0.0 { -r } else { r };

        let gamma = if self.n < 0.0 {
            (-dx).atan2(dy - self.r0)
        } else {
            dx.atan2(self.r0 - dy)
        };

        let iso_lat = -(r / self.c).ln() / self.n;
        let lat = latitude_from_isometric(iso_lat, self.e);
        let lon = self.params.lon0 + gamma / self.n;

        Ok(Geographic::new(lon, lat))
    }

    /// Coordonnées géographiques vers projetées (mètres)
    pub fn forward(&self, geo: Geographic) -> Result<(f64, f64)> {
        if !geo.lat.is_finite() || !geo.lon.is_finite() {
            bail!("Non-finite geographic coordinate ({}, {})", geo.lon, geo.lat);
        }
        if geo.lat.abs() >= std::f64::consts::FRAC_PI_2 {
            bail!("Latitude {}° is outside the projection domain", geo.lat.to_degrees());
        }

        let iso_lat = isometric_latitude(geo.lat, self.e);
        let r = self.c * (-self.n * iso_lat).exp();
        let gamma = self.n * (geo.lon - self.params.lon0);

        let x = self.params.x0 + r * gamma.sin();
        let y = self.params.y0 + self.r0 - r * gamma.cos();

        Ok((x, y))
    }
}

/// Calcule la latitude isométrique
fn isometric_latitude(lat: f64, e: f64) -> f64 {
    let sin_lat = lat.sin();
    let term = ((1.0 - e * sin_lat) / (1.0 + e * sin_lat)).powf(e / 2.0);
    ((std::f64::consts::FRAC_PI_4 + lat / 2.0).tan() * term).ln()
}

/// Calcule la latitude depuis la latitude isométrique (itératif)
fn latitude_from_isometric(iso_lat: f64, e: f64) -> f64 {
    let mut lat = 2.0 * iso_lat.exp().atan() - std::f64::consts::FRAC_PI_2;

    for _ in 0..15 {
        let sin_lat = lat.sin();
        let term = ((1.0 + e * sin_lat) / (1.0 - e * sin_lat)).powf(e / 2.0);
        let new_lat = 2.0 * (iso_lat.exp() * term).atan() - std::f64::consts::FRAC_PI_2;

        if (new_lat - lat).abs() < 1e-12 {
            return new_lat;
        }
        lat = new_lat;
    }
    lat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_false_origin() {
        let geo = LambertConic::statcan().inverse(6_200_000.0, 3_000_000.0).unwrap();
        let (lon, lat) = geo.to_degrees();

        assert!((lon - (-91.866666666)).abs() < 1e-6, "lon={}", lon);
        assert!((lat - 63.390675).abs() < 1e-6, "lat={}", lat);
    }

    #[test]
    fn test_standard_parallels_scale() {
        // Sur un parallèle standard, le facteur d'échelle vaut 1 :
        // 1 km vers l'est au méridien central ≈ 1 km sur l'ellipsoïde
        let conic = LambertConic::statcan();
        let lat = 49.0_f64.to_radians();
        let (x, y) = conic.forward(Geographic::new(conic.params.lon0, lat)).unwrap();
        let east = conic.inverse(x + 1000.0, y).unwrap();

        let n = Ellipsoid::GRS80.grande_normale(lat);
        let ground = (east.lon - conic.params.lon0) * n * lat.cos();
        assert!((ground - 1000.0).abs() < 0.5, "ground={}", ground);
    }

    #[test]
    fn test_round_trip_canada() {
        let conic = LambertConic::statcan();
        let cities = [
            (-75.6972, 45.4215),  // Ottawa
            (-123.1207, 49.2827), // Vancouver
            (-52.7126, 47.5615),  // St. John's
            (-114.3718, 62.4540), // Yellowknife
            (-62.3481, 82.5018),  // Alert
        ];

        for (lon, lat) in cities {
            let (x, y) = conic.forward(Geographic::from_degrees(lon, lat)).unwrap();
            let (lon2, lat2) = conic.inverse(x, y).unwrap().to_degrees();
            assert!((lon2 - lon).abs() < 1e-6, "lon {} -> {}", lon, lon2);
            assert!((lat2 - lat).abs() < 1e-6, "lat {} -> {}", lat, lat2);
        }
    }

    #[test]
    fn test_ottawa_east_of_origin() {
        let (x, y) = LambertConic::statcan()
            .forward(Geographic::from_degrees(-75.6972, 45.4215))
            .unwrap();
        assert!(x > 6_200_000.0, "x={}", x);
        assert!(y < 3_000_000.0, "y={}", y);
    }

    #[test]
    fn test_non_finite_rejected() {
        let conic = LambertConic::statcan();
        assert!(conic.inverse(f64::NAN, 0.0).is_err());
        assert!(conic.inverse(0.0, f64::INFINITY).is_err());
        assert!(conic.forward(Geographic::from_degrees(0.0, 91.0)).is_err());
    }

    #[test]
    fn test_apex_rejected() {
        let conic = LambertConic::statcan();
        let apex_y = conic.params.y0 + conic.r0;
        assert!(conic.inverse(conic.params.x0, apex_y).is_err());
    }
}
